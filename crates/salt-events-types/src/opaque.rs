use serde_json::Value;

/// Loosely-shaped payload value.
///
/// Salt carries targets, job arguments, return data and beacon data with no
/// fixed schema. They stay as a tagged union of null, bool, number, string,
/// array and object so callers can still inspect them without guessing types.
pub type Opaque = Value;
