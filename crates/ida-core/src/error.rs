//! Structured errors for domain-primitive construction.

use thiserror::Error;

/// Errors raised when constructing or parsing core value types.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The byte value is at or above the BN254 scalar-field modulus.
    #[error("field value out of range: 0x{value}")]
    FieldOutOfRange {
        /// Hex rendering of the rejected bytes.
        value: String,
    },

    /// A hex string did not decode to the expected width.
    #[error("invalid {what} length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// What was being decoded (for diagnostics).
        what: &'static str,
        /// Expected byte width.
        expected: usize,
        /// Actual byte width after decoding.
        got: usize,
    },

    /// Hex decoding failed.
    #[error("invalid hex in {what}: {reason}")]
    InvalidHex {
        /// What was being decoded.
        what: &'static str,
        /// Decoder diagnostic.
        reason: String,
    },

    /// An anchor identifier was zero, negative, or malformed.
    #[error("invalid anchor id {value:?}: {reason}")]
    InvalidAnchorId {
        /// The offending input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A timestamp string was not valid ISO-8601.
    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp {
        /// The offending input.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },
}
