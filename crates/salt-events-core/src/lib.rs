//! Tag classification and typed decoding for Salt master events.
//!
//! This crate provides:
//! - Typed schemas for the Salt master events this system understands
//! - An ordered catalog of tag patterns, one per event kind
//! - A classifier that maps a tag to a freshly allocated, zero-valued event
//! - A decode step that fills that event from its JSON payload
//!
//! Core invariants:
//! - The tag alone selects the schema; payloads carry no discriminator
//! - Patterns are evaluated against the whole tag, in declaration order,
//!   and the first match wins
//! - The built-in catalog is compiled once and never changes afterwards
//! - An unknown tag is a normal outcome ([`Classification::NoMatch`]), not an error
//!
//! ```rust
//! use salt_events_core::{Classifier, Event};
//! use serde_json::json;
//!
//! let classifier = Classifier::standard();
//! let event = classifier
//!     .decode("salt/presence/present", json!({"present": ["web01", "db01"]}))?
//!     .expect("presence tag is known");
//!
//! match event {
//!     Event::PresencePresent(present) => assert_eq!(present.minions.len(), 2),
//!     other => panic!("unexpected kind {}", other.kind()),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![deny(missing_docs)]

/// The ordered pattern catalog.
pub mod catalog;
/// Tag classification.
pub mod classifier;
/// Event stream framing.
pub mod envelope;
/// Error types for catalog construction and decoding.
pub mod errors;
/// Event schemas.
pub mod events;
/// Event kind names.
pub mod kind;
mod nullable;
/// Anchored tag patterns and their captures.
pub mod pattern;

pub use catalog::{Catalog, CatalogEntry, Constructor, STANDARD_PATTERNS};
pub use classifier::{Classification, Classifier, Match};
pub use envelope::EventEnvelope;
pub use errors::{CatalogError, DecodeError, UnknownKindError};
pub use events::{
    Event, JobNew, JobProgress, JobReturn, MinionAuth, MinionBeacon, MinionKey, MinionRefresh,
    MinionStart, PresenceChange, PresencePresent, ProgressData, StateResult,
};
pub use kind::EventKind;
pub use pattern::{Pattern, TagCaptures};
pub use salt_events_types::{Opaque, Timestamp};
