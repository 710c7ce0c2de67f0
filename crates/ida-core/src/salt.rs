//! # Registration salt
//!
//! Sixteen random bytes generated once per registration attempt. The salt
//! is carried in the holder package for audit and uniqueness; it does not
//! enter any hash input. Identical email/passphrase pairs therefore
//! produce identical leaves regardless of salt.

use rand_core::{OsRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Width of a registration salt in bytes.
pub const SALT_LEN: usize = 16;

/// A per-registration random salt.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Salt([u8; SALT_LEN]);

impl Salt {
    /// Generate a fresh salt from the operating-system RNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Construct from raw bytes.
    pub fn from_bytes(bytes: [u8; SALT_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse from hex (32 characters).
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let raw = hex::decode(s).map_err(|e| CoreError::InvalidHex {
            what: "salt",
            reason: e.to_string(),
        })?;
        let bytes: [u8; SALT_LEN] =
            raw.try_into().map_err(|v: Vec<u8>| CoreError::InvalidLength {
                what: "salt",
                expected: SALT_LEN,
                got: v.len(),
            })?;
        Ok(Self(bytes))
    }

    /// Lowercase hex rendering (32 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Access the raw bytes.
    pub fn as_bytes(&self) -> &[u8; SALT_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for Salt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Salt({})", self.to_hex())
    }
}

impl Serialize for Salt {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Salt {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}
