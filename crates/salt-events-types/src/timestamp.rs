use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, Timelike, Utc};
use regex::Regex;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::validation::ValidationError;

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

static STAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d{1,9})?(Z|[+-]\d{2}:\d{2})?$")
        .expect("invalid regex")
});

/// Wire representation a [`Timestamp`] was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StampFormat {
    /// Salt's default `YYYY-MM-DDTHH:MM:SS[.ffffff]`, implicitly UTC.
    #[default]
    Naive,
    /// RFC 3339 with an explicit offset.
    Rfc3339 {
        /// Whether UTC was written as `Z` rather than `+00:00`.
        zulu: bool,
    },
    /// Fractional seconds since the Unix epoch, as a JSON number.
    EpochSeconds,
}

/// Point in time carried in an event's `_stamp` field.
///
/// Producers disagree on the encoding, so the timestamp keeps the format it
/// was parsed from and serializes back to the same one. Two timestamps are
/// equal only when they would serialize identically: same instant, same UTC
/// offset and same format.
#[derive(Debug, Clone, Copy)]
pub struct Timestamp {
    at: DateTime<FixedOffset>,
    format: StampFormat,
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at
            && self.at.offset() == other.at.offset()
            && self.format == other.format
    }
}

impl Eq for Timestamp {}

impl Hash for Timestamp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.at.hash(state);
        self.at.offset().local_minus_utc().hash(state);
        self.format.hash(state);
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self {
            at: DateTime::<Utc>::UNIX_EPOCH.fixed_offset(),
            format: StampFormat::Naive,
        }
    }
}

impl Timestamp {
    /// Wraps a UTC instant; it serializes in salt's naive format.
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self {
            at: at.fixed_offset(),
            format: StampFormat::Naive,
        }
    }

    /// Parses a naive or RFC 3339 timestamp string.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let s = value.as_ref();
        let mismatch = || ValidationError::PatternMismatch {
            field: "timestamp",
            value: s.to_string(),
        };

        let caps = STAMP_RE.captures(s).ok_or_else(mismatch)?;
        match caps.get(2) {
            Some(offset) => {
                let at = DateTime::parse_from_rfc3339(s).map_err(|_| mismatch())?;
                Ok(Self {
                    at,
                    format: StampFormat::Rfc3339 {
                        zulu: offset.as_str() == "Z",
                    },
                })
            }
            None => {
                let naive =
                    NaiveDateTime::parse_from_str(s, NAIVE_FORMAT).map_err(|_| mismatch())?;
                Ok(Self {
                    at: naive.and_utc().fixed_offset(),
                    format: StampFormat::Naive,
                })
            }
        }
    }

    /// Builds a timestamp from fractional seconds since the epoch.
    ///
    /// Precision is kept to the microsecond, which is what Salt emits.
    pub fn from_epoch_seconds(secs: f64) -> Result<Self, ValidationError> {
        let out_of_bounds = || ValidationError::OutOfBounds {
            field: "timestamp",
            value: secs.to_string(),
        };
        if !secs.is_finite() || secs.abs() >= i64::MAX as f64 {
            return Err(out_of_bounds());
        }

        let mut whole = secs.floor() as i64;
        let mut micros = ((secs - secs.floor()) * 1e6).round() as u32;
        if micros >= 1_000_000 {
            whole += 1;
            micros -= 1_000_000;
        }

        let at = DateTime::<Utc>::from_timestamp(whole, micros * 1_000)
            .ok_or_else(out_of_bounds)?;
        Ok(Self {
            at: at.fixed_offset(),
            format: StampFormat::EpochSeconds,
        })
    }

    /// The instant in UTC.
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.at.with_timezone(&Utc)
    }

    /// The representation this timestamp serializes to.
    pub fn format(&self) -> StampFormat {
        self.format
    }

    /// Fractional seconds since the Unix epoch.
    pub fn epoch_seconds(&self) -> f64 {
        let micros = self.at.nanosecond() / 1_000;
        self.at.timestamp() as f64 + f64::from(micros) / 1e6
    }

    fn naive_string(&self) -> String {
        let naive = self.at.naive_utc();
        let fmt = match naive.nanosecond() {
            0 => "%Y-%m-%dT%H:%M:%S",
            n if n % 1_000 == 0 => "%Y-%m-%dT%H:%M:%S%.6f",
            _ => "%Y-%m-%dT%H:%M:%S%.9f",
        };
        naive.format(fmt).to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format {
            StampFormat::Naive => f.write_str(&self.naive_string()),
            StampFormat::Rfc3339 { zulu } => {
                f.write_str(&self.at.to_rfc3339_opts(SecondsFormat::AutoSi, zulu))
            }
            StampFormat::EpochSeconds => write!(f, "{}", self.epoch_seconds()),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.format {
            StampFormat::EpochSeconds => serializer.serialize_f64(self.epoch_seconds()),
            _ => serializer.collect_str(self),
        }
    }
}

struct TimestampVisitor;

impl Visitor<'_> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an ISO-8601 timestamp string or seconds since the epoch")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Timestamp, E> {
        Timestamp::parse(v).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Timestamp, E> {
        Timestamp::from_epoch_seconds(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Timestamp, E> {
        self.visit_f64(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Timestamp, E> {
        self.visit_f64(v as f64)
    }

    // `null` reads as the zero value, like an absent `_stamp`.
    fn visit_unit<E: de::Error>(self) -> Result<Timestamp, E> {
        Ok(Timestamp::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Timestamp, E> {
        Ok(Timestamp::default())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TimestampVisitor)
    }
}
