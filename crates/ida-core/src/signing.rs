//! # Canonical signing input
//!
//! One registration state has exactly one byte encoding, used both when
//! the anchoring authority signs and when a holder's package is
//! re-verified at login. [`SigningInput::encode`] is that encoding; no
//! other serialization of these fields may be signed.
//!
//! ## Encoding contract
//!
//! `name=value` pairs joined with `|` in the fixed order
//! `leaf, root, email, passphrase, salt, issued`. Field values and the
//! salt render as lowercase hex, the timestamp as ISO-8601. When the root
//! is not yet known the entire `root=` pair is omitted; once a root
//! exists it is always included, binding the attestation to the anchored
//! value. Case normalization is part of the contract: every hex digit in
//! the output is lowercase by construction.

use crate::field::FieldElement;
use crate::salt::Salt;
use crate::timestamp::Timestamp;

/// The closed field set from which the canonical payload is derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningInput {
    /// The holder's leaf commitment.
    pub leaf: FieldElement,
    /// The anchored (or to-be-anchored) root; absent only before the root
    /// is known.
    pub root: Option<FieldElement>,
    /// Field hash of the normalized email address.
    pub email_hash: FieldElement,
    /// Field hash of the passphrase.
    pub passphrase_hash: FieldElement,
    /// The per-registration salt.
    pub salt: Salt,
    /// When the registration state was produced.
    pub issued_at: Timestamp,
}

impl SigningInput {
    /// Produce the canonical byte encoding.
    ///
    /// Deterministic and total: two encodings are byte-equal iff every
    /// field is equal.
    pub fn encode(&self) -> Vec<u8> {
        let mut parts: Vec<String> = Vec::with_capacity(6);
        parts.push(format!("leaf={}", self.leaf.to_hex()));
        if let Some(root) = &self.root {
            parts.push(format!("root={}", root.to_hex()));
        }
        parts.push(format!("email={}", self.email_hash.to_hex()));
        parts.push(format!("passphrase={}", self.passphrase_hash.to_hex()));
        parts.push(format!("salt={}", self.salt.to_hex()));
        parts.push(format!("issued={}", self.issued_at.to_iso8601()));
        parts.join("|").into_bytes()
    }
}
