//! # Canonical BN254 field values
//!
//! [`FieldElement`] is the workspace-wide representation of every hash
//! output, leaf, and root: 32 big-endian bytes whose integer value is
//! strictly below the BN254 scalar-field modulus.
//!
//! ## Invariant
//!
//! A `FieldElement` is in canonical range by construction. [`from_bytes`]
//! rejects out-of-range input instead of reducing it, so a value can never
//! be field-reduced twice on its way through the system. Crossing a
//! serialization boundary uses fixed-width lowercase hex; the decimal
//! rendering exists for interoperability with external circuit tooling and
//! always equals the hex value reinterpreted as an unsigned integer.
//!
//! [`from_bytes`]: FieldElement::from_bytes

use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A canonical value in the BN254 scalar field.
///
/// Stored as 32 big-endian bytes, always strictly below the field modulus.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldElement([u8; 32]);

impl FieldElement {
    /// The additive identity. The ledger rejects it as a root.
    pub fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Whether this is the zero element.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Canonicalize an arkworks field element.
    pub fn from_fr(value: Fr) -> Self {
        let be = value.into_bigint().to_bytes_be();
        let mut bytes = [0u8; 32];
        bytes[32 - be.len()..].copy_from_slice(&be);
        Self(bytes)
    }

    /// Reinterpret as an arkworks field element.
    pub fn to_fr(&self) -> Fr {
        Fr::from_be_bytes_mod_order(&self.0)
    }

    /// Construct from canonical big-endian bytes.
    ///
    /// A value at or above the modulus would change under reduction, so it
    /// is rejected rather than silently wrapped.
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CoreError> {
        let candidate = Self(bytes);
        if Self::from_fr(candidate.to_fr()) != candidate {
            return Err(CoreError::FieldOutOfRange {
                value: hex::encode(bytes),
            });
        }
        Ok(candidate)
    }

    /// Parse from fixed-width hex (64 characters, no prefix).
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let raw = hex::decode(s).map_err(|e| CoreError::InvalidHex {
            what: "field value",
            reason: e.to_string(),
        })?;
        let bytes: [u8; 32] = raw.try_into().map_err(|v: Vec<u8>| CoreError::InvalidLength {
            what: "field value",
            expected: 32,
            got: v.len(),
        })?;
        Self::from_bytes(bytes)
    }

    /// Lowercase fixed-width hex rendering (64 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Decimal rendering of the same unsigned integer.
    pub fn to_decimal_string(&self) -> String {
        self.to_fr().into_bigint().to_string()
    }

    /// Access the canonical big-endian bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Display for FieldElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FieldElement(0x{})", self.to_hex())
    }
}

impl From<Fr> for FieldElement {
    fn from(value: Fr) -> Self {
        Self::from_fr(value)
    }
}

impl Serialize for FieldElement {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}
