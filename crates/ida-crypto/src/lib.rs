//! # ida-crypto: Cryptographic Primitives for the IDA Stack
//!
//! This crate provides the building blocks of the commitment protocol:
//!
//! - **Field hashing**: deterministic map from arbitrary UTF-8 text into
//!   the BN254 scalar field via SHA-256 followed by a width-1 Poseidon
//!   permutation (circom parameterization).
//! - **Commitments**: the order-sensitive two-input leaf commitment and
//!   the index-addressed [`CommitmentTree`] with duplicate-last pairing,
//!   membership-proof extraction, and [`fold_proof`] recomputation.
//! - **Attestation signing**: EIP-191 personal-message signatures by the
//!   anchoring authority, and address recovery for verification without
//!   the private key.
//!
//! All hash functions here are pure and lock-free; Poseidon hashers are
//! built per invocation from deterministic parameters, so concurrent use
//! needs no coordination.

pub mod commit;
pub mod error;
pub mod poseidon;
pub mod signer;

pub use commit::{fold_proof, hash_pair, leaf_commitment, CommitmentTree};
pub use error::CryptoError;
pub use poseidon::field_hash_text;
pub use signer::{recover_signer, signature_from_hex, signature_to_hex, AnchorSigner};
