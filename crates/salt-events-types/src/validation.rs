use thiserror::Error;

/// Errors raised while reading a `_stamp` value.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The string is neither salt's naive form nor RFC 3339, or names an
    /// impossible date.
    #[error("{field} '{value}' is not a recognised timestamp format")]
    PatternMismatch {
        /// Field that failed, always `timestamp` today.
        field: &'static str,
        /// Offending text.
        value: String,
    },
    /// Epoch seconds that are NaN, infinite or beyond chrono's range.
    #[error("{field} {value} is outside the representable range")]
    OutOfBounds {
        /// Field that failed, always `timestamp` today.
        field: &'static str,
        /// Offending number, as printed.
        value: String,
    },
}
