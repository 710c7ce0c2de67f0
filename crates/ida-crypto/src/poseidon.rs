//! # Field hashing
//!
//! Maps arbitrary-length UTF-8 text to a canonical BN254 field value in
//! two fixed steps: a SHA-256 digest of the raw bytes, then a width-1
//! Poseidon permutation (circom parameterization) over the digest reduced
//! into the field. The result is deterministic across processes and
//! platforms and accepts any input, including the empty string.
//!
//! Normalization (trimming, lowercasing) is the caller's concern; the
//! bytes given here are hashed verbatim.

use ark_bn254::Fr;
use ark_ff::PrimeField;
use light_poseidon::{Poseidon, PoseidonHasher};
use sha2::{Digest, Sha256};

use ida_core::FieldElement;

use crate::error::CryptoError;

/// Width-1 Poseidon over a single field element.
pub(crate) fn poseidon1(a: Fr) -> Result<Fr, CryptoError> {
    let mut hasher =
        Poseidon::<Fr>::new_circom(1).map_err(|e| CryptoError::Poseidon(e.to_string()))?;
    hasher
        .hash(&[a])
        .map_err(|e| CryptoError::Poseidon(e.to_string()))
}

/// Width-2 Poseidon over an ordered pair of field elements.
pub(crate) fn poseidon2(a: Fr, b: Fr) -> Result<Fr, CryptoError> {
    let mut hasher =
        Poseidon::<Fr>::new_circom(2).map_err(|e| CryptoError::Poseidon(e.to_string()))?;
    hasher
        .hash(&[a, b])
        .map_err(|e| CryptoError::Poseidon(e.to_string()))
}

/// Hash text into the BN254 scalar field.
///
/// SHA-256 over the UTF-8 bytes, the 256-bit digest interpreted as an
/// unsigned big-endian integer and reduced into the field, then one
/// Poseidon permutation over that single element.
pub fn field_hash_text(text: &str) -> Result<FieldElement, CryptoError> {
    let digest = Sha256::digest(text.as_bytes());
    let reduced = Fr::from_be_bytes_mod_order(&digest);
    Ok(FieldElement::from_fr(poseidon1(reduced)?))
}
