//! # The holder-facing identity package
//!
//! [`IdentityPackage`] is the artifact a registration produces, owned
//! solely by the holder: the stack keeps no copy and can reconstruct
//! nothing from its own state. Every hash, leaf, and root appears both as
//! fixed-width lowercase hex and as a decimal string; the decimal mirrors
//! exist for external circuit tooling and always equal the hex value
//! reinterpreted as an unsigned integer.
//!
//! [`PresentedPackage`] is the lenient form a login request arrives in:
//! every field optional, so the orchestrator can name exactly which
//! required field is absent instead of failing at deserialization.

use serde::{Deserialize, Serialize};

/// Whether the package's root made it onto the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnchorState {
    /// Anchored and the identifier is known.
    Anchored,
    /// The transaction confirmed (or timed out ambiguously) but no
    /// identifier could be resolved. The root is, or may be, on the
    /// ledger; re-query before re-anchoring.
    AnchorUnconfirmed,
    /// Anchoring failed outright. The package is still signed and the
    /// holder keeps it; a later attempt can anchor the same root.
    NotAnchored,
}

/// The registration artifact returned to the holder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IdentityPackage {
    /// Anchoring outcome for this package.
    pub status: AnchorState,
    /// Ledger identifier in display form (`ID-000123`); absent unless
    /// `status` is `Anchored`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_id: Option<String>,
    /// Field hash of the normalized email, lowercase hex.
    pub email_hash: String,
    /// Decimal mirror of `email_hash`.
    pub email_hash_decimal: String,
    /// Field hash of the passphrase, lowercase hex.
    pub passphrase_hash: String,
    /// Decimal mirror of `passphrase_hash`.
    pub passphrase_hash_decimal: String,
    /// The leaf commitment, lowercase hex.
    pub leaf: String,
    /// Decimal mirror of `leaf`.
    pub leaf_decimal: String,
    /// The anchored root, lowercase hex.
    pub root: String,
    /// Decimal mirror of `root`.
    pub root_decimal: String,
    /// Registration salt, lowercase hex (32 characters).
    pub salt: String,
    /// Registration timestamp, ISO-8601.
    pub issued_at: String,
    /// Membership proof siblings, lowercase hex, leaf level first.
    /// Empty for the depth-zero case.
    pub proof: Vec<String>,
    /// The leaf's index within its batch.
    pub proof_index: u64,
    /// The anchoring authority's address, `0x`-prefixed lowercase hex.
    pub signer_address: String,
    /// EIP-191 signature over the canonical payload, 130 hex characters.
    pub signature: String,
}

/// A login request's view of a package: everything optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PresentedPackage {
    /// Anchoring status as presented (ignored during verification).
    pub status: Option<AnchorState>,
    /// Ledger identifier in display form.
    pub numeric_id: Option<String>,
    /// Email field hash, hex.
    pub email_hash: Option<String>,
    /// Decimal mirror (carried, not verified against).
    pub email_hash_decimal: Option<String>,
    /// Passphrase field hash, hex.
    pub passphrase_hash: Option<String>,
    /// Decimal mirror (carried, not verified against).
    pub passphrase_hash_decimal: Option<String>,
    /// Leaf commitment, hex.
    pub leaf: Option<String>,
    /// Decimal mirror (carried, not verified against).
    pub leaf_decimal: Option<String>,
    /// Anchored root, hex.
    pub root: Option<String>,
    /// Decimal mirror (carried, not verified against).
    pub root_decimal: Option<String>,
    /// Registration salt, hex.
    pub salt: Option<String>,
    /// Registration timestamp, ISO-8601.
    pub issued_at: Option<String>,
    /// Membership proof siblings, hex.
    pub proof: Option<Vec<String>>,
    /// The leaf's index within its batch.
    pub proof_index: Option<u64>,
    /// Declared signer address.
    pub signer_address: Option<String>,
    /// Signature hex.
    pub signature: Option<String>,
}

impl From<IdentityPackage> for PresentedPackage {
    fn from(pkg: IdentityPackage) -> Self {
        Self {
            status: Some(pkg.status),
            numeric_id: pkg.numeric_id,
            email_hash: Some(pkg.email_hash),
            email_hash_decimal: Some(pkg.email_hash_decimal),
            passphrase_hash: Some(pkg.passphrase_hash),
            passphrase_hash_decimal: Some(pkg.passphrase_hash_decimal),
            leaf: Some(pkg.leaf),
            leaf_decimal: Some(pkg.leaf_decimal),
            root: Some(pkg.root),
            root_decimal: Some(pkg.root_decimal),
            salt: Some(pkg.salt),
            issued_at: Some(pkg.issued_at),
            proof: Some(pkg.proof),
            proof_index: Some(pkg.proof_index),
            signer_address: Some(pkg.signer_address),
            signature: Some(pkg.signature),
        }
    }
}
