//! Orchestration error taxonomy.
//!
//! Validation failures are reported to the caller immediately and never
//! retried. Ledger trouble during registration is NOT an error here: the
//! flow degrades to an unanchored package instead. Login rejections
//! disclose signature-versus-proof and nothing finer.

use thiserror::Error;

use crate::policy::{EmailError, PolicyViolation};

/// Errors from stateless claim issue and verification.
#[derive(Error, Debug)]
pub enum ClaimError {
    /// The token is structurally broken (bad split, hex, or JSON).
    #[error("malformed claim token: {0}")]
    Malformed(String),

    /// The MAC does not match the payload.
    #[error("claim signature mismatch")]
    Forged,

    /// The claim expired.
    #[error("claim expired")]
    Expired,

    /// The claim is valid but of the wrong kind for this step.
    #[error("claim kind not valid for this operation")]
    WrongKind,
}

/// Errors from the email delivery collaborator.
#[derive(Error, Debug)]
pub enum MailerError {
    /// The delivery service reported a failure.
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Errors terminating a registration step.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// The submitted email address is not acceptable.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The passphrase misses one or more policy categories. Every
    /// missing category is listed, not just the first.
    #[error("weak passphrase: {}", format_violations(.violations))]
    WeakPassphrase {
        /// All violated categories.
        violations: Vec<PolicyViolation>,
    },

    /// The confirmation claim was rejected.
    #[error("confirmation rejected: {0}")]
    Claim(#[from] ClaimError),

    /// The confirmation email could not be delivered.
    #[error("confirmation delivery failed: {0}")]
    Delivery(#[from] MailerError),

    /// Hashing or signing failed.
    #[error("cryptographic failure: {0}")]
    Crypto(#[from] ida_crypto::CryptoError),
}

fn format_violations(violations: &[PolicyViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors terminating a login attempt. Every variant is terminal for the
/// request; no partial session exists.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LoginError {
    /// A required package field is absent.
    #[error("missing package field: {field}")]
    MissingField {
        /// JSON name of the absent field.
        field: &'static str,
    },

    /// A required package field is present but unparseable.
    #[error("malformed package field {field}: {reason}")]
    MalformedField {
        /// JSON name of the offending field.
        field: &'static str,
        /// Parser diagnostic.
        reason: String,
    },

    /// The recovered signer does not match the declared signer, or
    /// recovery itself failed.
    #[error("signature not verified")]
    SignatureRejected,

    /// The ledger did not verify the claimed leaf (or could not be
    /// consulted). Intentionally no finer detail.
    #[error("membership not verified")]
    ProofRejected,

    /// The session claim could not be produced after verification.
    #[error("session issuance failed")]
    SessionIssuance,
}
