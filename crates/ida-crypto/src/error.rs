//! Structured errors for cryptographic operations.

use thiserror::Error;

/// Errors from hashing, commitment, and signing operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// The Poseidon permutation rejected its input or parameters.
    #[error("poseidon hash failed: {0}")]
    Poseidon(String),

    /// A commitment tree cannot be built from zero leaves.
    #[error("cannot build a commitment tree from an empty batch")]
    EmptyBatch,

    /// A proof was requested for a leaf index outside the batch.
    #[error("leaf index {index} out of range for {leaves} leaves")]
    LeafIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of leaves in the batch.
        leaves: usize,
    },

    /// The signing key string could not be parsed.
    #[error("invalid signing key: {0}")]
    KeyParse(String),

    /// Producing a signature failed.
    #[error("signing failed: {0}")]
    Signing(String),

    /// A signature string or byte form could not be parsed.
    #[error("malformed signature: {0}")]
    SignatureParse(String),

    /// Address recovery from a signature failed.
    #[error("signer recovery failed: {0}")]
    Recovery(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_index_display_names_both_numbers() {
        let err = CryptoError::LeafIndexOutOfRange {
            index: 9,
            leaves: 4,
        };
        let msg = format!("{err}");
        assert!(msg.contains('9'));
        assert!(msg.contains('4'));
    }

    #[test]
    fn empty_batch_display() {
        assert!(format!("{}", CryptoError::EmptyBatch).contains("empty batch"));
    }
}
