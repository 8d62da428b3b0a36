//! Wire primitives shared by the Salt master event schemas.
//!
//! Salt producers are not uniform about how they encode the `_stamp` field,
//! and several payload subfields have no fixed shape. This crate holds the two
//! types that absorb that looseness so the event schemas can stay strongly
//! typed everywhere else.
//!
#![deny(missing_docs)]

/// Untyped payload values.
pub mod opaque;
/// Event timestamps that remember their wire representation.
pub mod timestamp;
/// Validation errors for wire primitives.
pub mod validation;

pub use opaque::Opaque;
pub use timestamp::{StampFormat, Timestamp};
pub use validation::ValidationError;
