//! Ledger error taxonomy.
//!
//! The split matters to callers: a submission failure changed no state
//! and is safe to retry; a confirmation timeout is ambiguous and must be
//! re-queried before any retry; a revert is terminal for the attempt.

use alloy::primitives::B256;
use thiserror::Error;

/// Errors from anchor-registry operations.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The registry rejects the zero root; nothing was submitted.
    #[error("the zero root cannot be anchored")]
    ZeroRoot,

    /// Submitting the transaction failed before it reached the ledger.
    /// No state changed; the call is safe to retry.
    #[error("submission failed: {reason}")]
    Submission {
        /// Transport or signing diagnostic.
        reason: String,
    },

    /// The transaction was submitted but confirmation did not arrive in
    /// time. The anchor may or may not have landed; re-query before any
    /// retry.
    #[error("confirmation timed out (tx {tx_hash:?})")]
    ConfirmationTimeout {
        /// Hash of the in-flight transaction, when known.
        tx_hash: Option<B256>,
    },

    /// The transaction landed and reverted.
    #[error("transaction reverted: {reason}")]
    Reverted {
        /// Revert diagnostic.
        reason: String,
    },

    /// A read-only call failed at the transport layer.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// The ledger answered with something the adapter cannot interpret.
    #[error("invalid ledger response: {0}")]
    InvalidResponse(String),

    /// The adapter configuration is unusable (bad key, bad URL).
    #[error("configuration error: {0}")]
    Config(String),
}

impl LedgerError {
    /// Whether the operation can be retried without risking a duplicate
    /// anchor. Only failures that provably changed no state qualify.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Submission { .. } | Self::Rpc(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_and_rpc_are_retryable() {
        assert!(LedgerError::Submission {
            reason: "connection refused".into()
        }
        .is_retryable());
        assert!(LedgerError::Rpc("eof".into()).is_retryable());
    }

    #[test]
    fn ambiguous_and_terminal_failures_are_not_retryable() {
        assert!(!LedgerError::ConfirmationTimeout { tx_hash: None }.is_retryable());
        assert!(!LedgerError::Reverted {
            reason: "zero root".into()
        }
        .is_retryable());
        assert!(!LedgerError::ZeroRoot.is_retryable());
    }

    #[test]
    fn displays_carry_diagnostics() {
        let err = LedgerError::Submission {
            reason: "dns failure".into(),
        };
        assert!(format!("{err}").contains("dns failure"));
    }
}
