use std::sync::LazyLock;

use crate::errors::CatalogError;
use crate::events::Event;
use crate::kind::EventKind;
use crate::pattern::Pattern;

/// Zero-argument factory returning a fresh, zero-valued event.
pub type Constructor = fn() -> Event;

/// Tag patterns of the standard catalog, in match precedence order.
///
/// The patterns are written not to overlap. Should two of them ever match the
/// same tag, the one listed first wins.
pub const STANDARD_PATTERNS: [(EventKind, &str); 10] = [
    (EventKind::MinionRefresh, r"minion/refresh/(?P<id>[^/]+)"),
    (EventKind::MinionAuth, r"salt/auth"),
    (
        EventKind::MinionBeacon,
        r"salt/beacon/(?P<id>[^/]+)/(?P<name>[^/]+)(?:/.*)?",
    ),
    (EventKind::JobNew, r"salt/job/(?P<jid>\d+)/new"),
    (EventKind::JobReturn, r"salt/job/(?P<jid>\d+)/ret(?:/(?P<id>[^/]+))?"),
    (
        EventKind::JobProgress,
        r"salt/job/(?P<jid>\d+)/prog/(?P<id>[^/]+)/(?P<seq>\d+)",
    ),
    (EventKind::MinionKey, r"salt/key"),
    (EventKind::MinionStart, r"salt/minion/(?P<id>[^/]+)/start"),
    (EventKind::PresenceChange, r"salt/presence/change"),
    (EventKind::PresencePresent, r"salt/presence/present"),
];

static STANDARD: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::from_patterns(&STANDARD_PATTERNS).expect("standard tag patterns must compile")
});

/// One pattern and the constructor for the kind it selects.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    kind: EventKind,
    pattern: Pattern,
    constructor: Constructor,
}

impl CatalogEntry {
    /// Kind this entry produces.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Pattern a tag must match to select this entry.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Allocates a new zero-valued event of this entry's kind.
    pub fn construct(&self) -> Event {
        (self.constructor)()
    }
}

/// Ordered, immutable list of catalog entries.
///
/// Order is match precedence. A catalog cannot be modified once built, so
/// results keyed by [`EventKind`] stay valid for its whole lifetime.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Builds a catalog from `(kind, pattern)` pairs, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidPattern`] for the first pattern that does
    /// not compile; no partial catalog is produced.
    pub fn from_patterns(specs: &[(EventKind, &str)]) -> Result<Self, CatalogError> {
        let entries = specs
            .iter()
            .map(|&(kind, expr)| {
                Ok(CatalogEntry {
                    kind,
                    pattern: Pattern::new(expr)?,
                    constructor: kind.constructor(),
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;
        Ok(Self { entries })
    }

    /// The process-wide catalog of known Salt master events.
    ///
    /// Compiled on first use. The built-in patterns are part of the program,
    /// so a failure to compile them panics instead of degrading.
    pub fn standard() -> &'static Catalog {
        &STANDARD
    }

    /// All entries, in match precedence order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// First entry producing `kind`, if any.
    pub fn entry(&self, kind: EventKind) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.kind == kind)
    }

    /// Kinds in match precedence order.
    pub fn kinds(&self) -> impl Iterator<Item = EventKind> + '_ {
        self.entries.iter().map(CatalogEntry::kind)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
