use salt_events_types::Opaque;
use tracing::{debug, trace};

use crate::catalog::Catalog;
use crate::envelope::EventEnvelope;
use crate::errors::DecodeError;
use crate::events::Event;
use crate::kind::EventKind;
use crate::pattern::TagCaptures;

/// Outcome of classifying a tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// A pattern matched; the event is zero-valued until decoded.
    Matched(Match),
    /// No pattern matched. Expected for tags this catalog does not describe.
    NoMatch,
}

impl Classification {
    /// Kind of the matched event, if any.
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            Classification::Matched(m) => Some(m.kind()),
            Classification::NoMatch => None,
        }
    }

    /// Converts into the match, discarding `NoMatch`.
    pub fn into_match(self) -> Option<Match> {
        match self {
            Classification::Matched(m) => Some(m),
            Classification::NoMatch => None,
        }
    }
}

/// A freshly allocated event selected by a tag, plus the tag's captures.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    event: Event,
    captures: TagCaptures,
}

impl Match {
    /// Kind selected by the tag.
    pub fn kind(&self) -> EventKind {
        self.event.kind()
    }

    /// The event as allocated (zero-valued).
    pub fn event(&self) -> &Event {
        &self.event
    }

    /// Named groups captured from the tag.
    pub fn captures(&self) -> &TagCaptures {
        &self.captures
    }

    /// Splits into the event and the captures.
    pub fn into_parts(self) -> (Event, TagCaptures) {
        (self.event, self.captures)
    }

    /// Decodes a JSON payload into the allocated event.
    ///
    /// Tag-carried fields the payload leaves empty are filled from the
    /// captures afterwards (see [`Event::apply_captures`]).
    pub fn decode_value(self, payload: Opaque) -> Result<Event, DecodeError> {
        let (mut event, captures) = self.into_parts();
        event.decode_value(payload)?;
        event.apply_captures(&captures);
        Ok(event)
    }

    /// Like [`Match::decode_value`], from raw JSON bytes.
    pub fn decode_slice(self, payload: &[u8]) -> Result<Event, DecodeError> {
        let (mut event, captures) = self.into_parts();
        event.decode_slice(payload)?;
        event.apply_captures(&captures);
        Ok(event)
    }
}

/// Maps tags to event kinds using a catalog.
///
/// Holds only a shared reference to the catalog, so any number of classifiers
/// can run concurrently against the same one.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    catalog: &'a Catalog,
}

impl<'a> Classifier<'a> {
    /// Creates a classifier over `catalog`.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// The catalog this classifier scans.
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Finds the first entry whose pattern matches the whole tag and
    /// allocates a zero-valued event of its kind.
    ///
    /// Nothing is allocated when no entry matches.
    pub fn classify(&self, tag: &str) -> Classification {
        for entry in self.catalog.entries() {
            if let Some(captures) = entry.pattern().captures(tag) {
                debug!(tag, kind = %entry.kind(), "classified event tag");
                return Classification::Matched(Match {
                    event: entry.construct(),
                    captures,
                });
            }
        }
        trace!(tag, "no pattern matches event tag");
        Classification::NoMatch
    }

    /// Kind of the first matching entry, without allocating an event.
    pub fn classify_kind(&self, tag: &str) -> Option<EventKind> {
        self.catalog
            .entries()
            .iter()
            .find(|entry| entry.pattern().is_match(tag))
            .map(|entry| entry.kind())
    }

    /// Classifies `tag` and decodes `payload` into the selected kind.
    ///
    /// Returns `Ok(None)` when the tag is unknown; the payload is not looked at
    /// in that case.
    pub fn decode(&self, tag: &str, payload: Opaque) -> Result<Option<Event>, DecodeError> {
        match self.classify(tag) {
            Classification::Matched(m) => m.decode_value(payload).map(Some),
            Classification::NoMatch => Ok(None),
        }
    }

    /// Decodes one event stream envelope.
    pub fn decode_envelope(&self, envelope: EventEnvelope) -> Result<Option<Event>, DecodeError> {
        self.decode(&envelope.tag, envelope.data)
    }
}

impl Classifier<'static> {
    /// Classifier over [`Catalog::standard`].
    pub fn standard() -> Self {
        Self::new(Catalog::standard())
    }
}

impl Default for Classifier<'static> {
    fn default() -> Self {
        Self::standard()
    }
}
