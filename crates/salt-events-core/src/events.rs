use salt_events_types::{Opaque, Timestamp};
use serde::{Deserialize, Serialize};

use crate::catalog::Constructor;
use crate::errors::DecodeError;
use crate::kind::EventKind;
use crate::nullable::null_as_default;
use crate::pattern::TagCaptures;

/// Job published to minions (`salt/job/<jid>/new`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobNew {
    /// Positional and keyword arguments passed to the function.
    #[serde(rename = "arg", deserialize_with = "null_as_default")]
    pub arguments: Vec<Opaque>,
    /// Execution module function, e.g. `state.apply`.
    #[serde(rename = "fun", deserialize_with = "null_as_default")]
    pub function: String,
    /// Job identifier.
    #[serde(rename = "jid", deserialize_with = "null_as_default")]
    pub job: String,
    /// Minions expected to answer.
    #[serde(deserialize_with = "null_as_default")]
    pub minions: Vec<String>,
    /// Target expression; a string or a list depending on `tgt_type`.
    #[serde(rename = "tgt")]
    pub target: Opaque,
    /// Targeting mode (`glob`, `list`, `compound`, ...).
    #[serde(rename = "tgt_type", deserialize_with = "null_as_default")]
    pub target_type: String,
    /// When the event was fired.
    #[serde(rename = "_stamp")]
    pub time: Timestamp,
    /// User that published the job.
    #[serde(deserialize_with = "null_as_default")]
    pub user: String,
}

/// Job result from one minion (`salt/job/<jid>/ret[/<id>]`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobReturn {
    /// Arguments the function ran with.
    #[serde(rename = "fun_args", deserialize_with = "null_as_default")]
    pub arguments: Vec<Opaque>,
    /// Command type, usually `_return`.
    #[serde(rename = "cmd", deserialize_with = "null_as_default")]
    pub command: String,
    /// Execution module function.
    #[serde(rename = "fun", deserialize_with = "null_as_default")]
    pub function: String,
    /// Job identifier.
    #[serde(rename = "jid", deserialize_with = "null_as_default")]
    pub job: String,
    /// Minion that returned.
    #[serde(rename = "id", deserialize_with = "null_as_default")]
    pub minion: String,
    /// Outputter hint, e.g. `highstate`.
    #[serde(rename = "out", deserialize_with = "null_as_default")]
    pub output: String,
    /// Function return data.
    #[serde(rename = "return")]
    pub ret: Opaque,
    /// Process-style return code.
    #[serde(rename = "retcode", deserialize_with = "null_as_default")]
    pub return_code: i64,
    /// Whether the function succeeded.
    #[serde(deserialize_with = "null_as_default")]
    pub success: bool,
    /// When the event was fired.
    #[serde(rename = "_stamp")]
    pub time: Timestamp,
}

/// Result of a single state, as carried in a progress event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateResult {
    /// Position of the state in the run.
    #[serde(rename = "__run_num__", deserialize_with = "null_as_default")]
    pub run_num: i64,
    /// SLS file the state came from.
    #[serde(rename = "__sls__", deserialize_with = "null_as_default")]
    pub sls: String,
    /// State ID declaration.
    #[serde(rename = "__id__", deserialize_with = "null_as_default")]
    pub state_id: String,
    /// Changes made by the state.
    pub changes: Opaque,
    /// Human-readable comment.
    #[serde(deserialize_with = "null_as_default")]
    pub comment: String,
    /// Duration in milliseconds.
    #[serde(deserialize_with = "null_as_default")]
    pub duration: f64,
    /// Whether the state succeeded.
    #[serde(deserialize_with = "null_as_default")]
    pub result: bool,
    /// Local start time as formatted by the minion.
    #[serde(deserialize_with = "null_as_default")]
    pub start_time: String,
    /// State name argument.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// Body of a progress event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressData {
    /// Total number of states in the run.
    #[serde(deserialize_with = "null_as_default")]
    pub len: i64,
    /// Result of the state that just finished.
    #[serde(deserialize_with = "null_as_default")]
    pub ret: StateResult,
}

/// State progress from a minion (`salt/job/<jid>/prog/<id>/<n>`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobProgress {
    /// When the event was fired.
    #[serde(rename = "_stamp")]
    pub time: Timestamp,
    /// Master the minion reports to.
    #[serde(rename = "_master", deserialize_with = "null_as_default")]
    pub master: String,
    /// Command type, usually `_minion_event`.
    #[serde(rename = "cmd", deserialize_with = "null_as_default")]
    pub command: String,
    /// Minion reporting progress.
    #[serde(rename = "id", deserialize_with = "null_as_default")]
    pub minion: String,
    /// Job identifier.
    #[serde(rename = "jid", deserialize_with = "null_as_default")]
    pub job: String,
    /// Progress body.
    #[serde(deserialize_with = "null_as_default")]
    pub data: ProgressData,
}

/// Minion authentication attempt (`salt/auth`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinionAuth {
    /// Public key presented by the minion.
    #[serde(rename = "pub", deserialize_with = "null_as_default")]
    pub key: String,
    /// Minion ID.
    #[serde(rename = "id", deserialize_with = "null_as_default")]
    pub minion: String,
    /// Whether authentication succeeded.
    #[serde(deserialize_with = "null_as_default")]
    pub result: bool,
    /// Key state: `accept`, `pend` or `reject`.
    #[serde(rename = "act", deserialize_with = "null_as_default")]
    pub status: String,
    /// When the event was fired.
    #[serde(rename = "_stamp")]
    pub time: Timestamp,
}

/// Beacon fired on a minion (`salt/beacon/<id>/<name>[/<suffix>]`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinionBeacon {
    /// Beacon-specific data.
    pub data: Opaque,
    /// Minion ID.
    #[serde(rename = "id", deserialize_with = "null_as_default")]
    pub minion: String,
    /// Beacon name; taken from the tag when the payload omits it.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// When the event was fired.
    #[serde(rename = "_stamp")]
    pub time: Timestamp,
}

/// Minion key change on the master (`salt/key`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinionKey {
    /// Minion ID.
    #[serde(rename = "id", deserialize_with = "null_as_default")]
    pub minion: String,
    /// Whether the action succeeded.
    #[serde(deserialize_with = "null_as_default")]
    pub result: bool,
    /// Action taken: `accept`, `reject` or `delete`.
    #[serde(rename = "act", deserialize_with = "null_as_default")]
    pub status: String,
    /// When the event was fired.
    #[serde(rename = "_stamp")]
    pub time: Timestamp,
}

/// Minion data refresh request (`minion/refresh/<id>`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinionRefresh {
    /// Minion ID; taken from the tag when the payload omits it.
    #[serde(rename = "id", deserialize_with = "null_as_default")]
    pub minion: String,
    /// When the event was fired.
    #[serde(rename = "_stamp")]
    pub time: Timestamp,
}

/// Minion start (`salt/minion/<id>/start`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinionStart {
    /// Minion ID.
    #[serde(rename = "id", deserialize_with = "null_as_default")]
    pub minion: String,
    /// When the event was fired.
    #[serde(rename = "_stamp")]
    pub time: Timestamp,
}

/// Connected minions changed (`salt/presence/change`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceChange {
    /// Minions that disconnected.
    #[serde(deserialize_with = "null_as_default")]
    pub lost: Vec<String>,
    /// Minions that connected.
    #[serde(deserialize_with = "null_as_default")]
    pub new: Vec<String>,
    /// When the event was fired.
    #[serde(rename = "_stamp")]
    pub time: Timestamp,
}

/// Currently connected minions (`salt/presence/present`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresencePresent {
    /// Connected minion IDs.
    #[serde(rename = "present", deserialize_with = "null_as_default")]
    pub minions: Vec<String>,
    /// When the event was fired.
    #[serde(rename = "_stamp")]
    pub time: Timestamp,
}

macro_rules! events {
    ($($variant:ident => $doc:expr),* $(,)?) => {
        /// A decoded event of some kind.
        ///
        /// Serializes as the bare payload of the inner event; the kind is not
        /// written because the tag carries it.
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(untagged)]
        pub enum Event {
            $(
                #[doc = $doc]
                $variant($variant),
            )*
        }

        impl Event {
            /// Kind of this event.
            pub fn kind(&self) -> EventKind {
                match self {
                    $(Event::$variant(_) => EventKind::$variant,)*
                }
            }

            /// When the event was fired.
            pub fn time(&self) -> &Timestamp {
                match self {
                    $(Event::$variant(event) => &event.time,)*
                }
            }

            /// Replaces this event's fields with those decoded from `payload`.
            ///
            /// Keys missing from the payload keep their zero value. On error the
            /// event is left untouched.
            pub fn decode_value(&mut self, payload: Opaque) -> Result<(), DecodeError> {
                let kind = self.kind();
                match self {
                    $(Event::$variant(event) => {
                        *event = serde_json::from_value(payload)
                            .map_err(|source| DecodeError { kind, source })?;
                    })*
                }
                Ok(())
            }

            /// Like [`Event::decode_value`], from raw JSON bytes.
            pub fn decode_slice(&mut self, payload: &[u8]) -> Result<(), DecodeError> {
                let kind = self.kind();
                match self {
                    $(Event::$variant(event) => {
                        *event = serde_json::from_slice(payload)
                            .map_err(|source| DecodeError { kind, source })?;
                    })*
                }
                Ok(())
            }
        }

        impl EventKind {
            /// Factory producing a zero-valued event of this kind.
            pub fn constructor(self) -> Constructor {
                match self {
                    $(EventKind::$variant => {
                        (|| Event::$variant($variant::default())) as Constructor
                    })*
                }
            }
        }

        $(
            impl From<$variant> for Event {
                fn from(event: $variant) -> Self {
                    Event::$variant(event)
                }
            }
        )*
    };
}

events! {
    MinionRefresh => "Minion refresh request.",
    MinionAuth => "Minion authentication attempt.",
    MinionBeacon => "Beacon fired on a minion.",
    JobNew => "Job published.",
    JobReturn => "Job result from a minion.",
    JobProgress => "State progress from a minion.",
    MinionKey => "Minion key change.",
    MinionStart => "Minion start.",
    PresenceChange => "Connected minions changed.",
    PresencePresent => "Currently connected minions.",
}

impl Event {
    /// Fills fields that are carried by the tag rather than the payload.
    ///
    /// Only `MinionRefresh::minion` (capture `id`) and `MinionBeacon::name`
    /// (capture `name`) are bound this way, and only when still empty.
    pub fn apply_captures(&mut self, captures: &TagCaptures) {
        let (field, capture) = match self {
            Event::MinionRefresh(event) => (&mut event.minion, "id"),
            Event::MinionBeacon(event) => (&mut event.name, "name"),
            _ => return,
        };
        if field.is_empty() {
            if let Some(value) = captures.get(capture) {
                *field = value.to_string();
            }
        }
    }
}
