use thiserror::Error;

use crate::kind::EventKind;

/// Errors raised while building a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A tag pattern failed to compile.
    #[error("invalid tag pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// Pattern source as written in the catalog.
        pattern: String,
        /// Underlying regex error.
        source: regex::Error,
    },
}

/// A payload did not have the shape of the kind its tag selected.
#[derive(Error, Debug)]
#[error("failed to decode {kind} payload: {source}")]
pub struct DecodeError {
    /// Kind selected by the tag.
    pub kind: EventKind,
    /// Underlying JSON error.
    pub source: serde_json::Error,
}

/// A string did not name a known event kind.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown event kind: {0}")]
pub struct UnknownKindError(pub String);
