use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::UnknownKindError;

/// Name of an event kind.
///
/// Variants are listed in the declaration order of the standard catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A minion asked the master to refresh its data.
    MinionRefresh,
    /// A minion attempted to authenticate.
    MinionAuth,
    /// A beacon fired on a minion.
    MinionBeacon,
    /// A job was published.
    JobNew,
    /// A minion returned a job result.
    JobReturn,
    /// A minion reported progress on a running state job.
    JobProgress,
    /// A minion key was accepted, rejected or deleted.
    MinionKey,
    /// A minion started.
    MinionStart,
    /// Minions connected or disconnected.
    PresenceChange,
    /// Periodic list of connected minions.
    PresencePresent,
}

impl EventKind {
    /// Every kind, in standard catalog order.
    pub const ALL: [EventKind; 10] = [
        EventKind::MinionRefresh,
        EventKind::MinionAuth,
        EventKind::MinionBeacon,
        EventKind::JobNew,
        EventKind::JobReturn,
        EventKind::JobProgress,
        EventKind::MinionKey,
        EventKind::MinionStart,
        EventKind::PresenceChange,
        EventKind::PresencePresent,
    ];

    /// Stable snake-case name, suitable as a cache or routing key.
    pub fn name(self) -> &'static str {
        match self {
            EventKind::MinionRefresh => "minion_refresh",
            EventKind::MinionAuth => "minion_auth",
            EventKind::MinionBeacon => "minion_beacon",
            EventKind::JobNew => "job_new",
            EventKind::JobReturn => "job_return",
            EventKind::JobProgress => "job_progress",
            EventKind::MinionKey => "minion_key",
            EventKind::MinionStart => "minion_start",
            EventKind::PresenceChange => "presence_change",
            EventKind::PresencePresent => "presence_present",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventKind {
    type Err = UnknownKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownKindError(s.to_string()))
    }
}
