//! # ida-core: Domain Primitives for the IDA Stack
//!
//! This crate defines the value types shared across the workspace:
//!
//! - [`FieldElement`]: a canonical 32-byte value strictly below the BN254
//!   scalar-field modulus, the representation of every hash, leaf, and root.
//! - [`AnchorId`]: the 1-based numeric identifier a ledger assigns to an
//!   anchored root, with its `ID-000123` display form.
//! - [`Salt`]: 16 random bytes carried in the holder package for audit
//!   and uniqueness.
//! - [`Timestamp`]: UTC, whole-second precision, ISO-8601 rendering.
//! - [`MembershipProof`]: ordered sibling values plus a leaf index,
//!   sufficient to recompute a root from a leaf.
//! - [`SigningInput`]: the one sanctioned byte encoding of a registration
//!   state for signing and signature re-verification.
//!
//! ## Invariants
//!
//! Every `FieldElement` is in canonical range by construction: out-of-range
//! bytes are rejected at the boundary, never reduced a second time.
//! `SigningInput::encode()` is deterministic; two encodings are byte-equal
//! iff all input fields are equal. Nothing in this crate performs I/O.

pub mod error;
pub mod field;
pub mod id;
pub mod proof;
pub mod salt;
pub mod signing;
pub mod timestamp;

pub use error::CoreError;
pub use field::FieldElement;
pub use id::AnchorId;
pub use proof::MembershipProof;
pub use salt::Salt;
pub use signing::SigningInput;
pub use timestamp::Timestamp;
