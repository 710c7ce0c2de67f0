//! # Anchor identifiers
//!
//! A ledger assigns each anchored root a 1-based numeric identifier in
//! strictly increasing order. [`AnchorId`] is the typed form of that
//! number; its holder-facing display form is `ID-` followed by the decimal
//! value zero-padded to at least six digits.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A positive, 1-based ledger-assigned identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AnchorId(u64);

impl AnchorId {
    /// Construct from a raw value. Zero is not a valid identifier.
    pub fn new(value: u64) -> Result<Self, CoreError> {
        if value == 0 {
            return Err(CoreError::InvalidAnchorId {
                value: "0".to_string(),
                reason: "identifiers start at 1".to_string(),
            });
        }
        Ok(Self(value))
    }

    /// The raw numeric value.
    pub fn get(&self) -> u64 {
        self.0
    }

    /// Holder-facing display form, e.g. `ID-000123`.
    ///
    /// Values wider than six digits are rendered in full, never truncated.
    pub fn display_form(&self) -> String {
        format!("ID-{:06}", self.0)
    }

    /// Strict parse of the display form produced by [`display_form`].
    ///
    /// Requires the `ID-` prefix and a positive all-digit payload.
    ///
    /// [`display_form`]: AnchorId::display_form
    pub fn parse_display(s: &str) -> Result<Self, CoreError> {
        let digits = s
            .strip_prefix("ID-")
            .ok_or_else(|| CoreError::InvalidAnchorId {
                value: s.to_string(),
                reason: "missing ID- prefix".to_string(),
            })?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::InvalidAnchorId {
                value: s.to_string(),
                reason: "payload must be decimal digits".to_string(),
            });
        }
        let value: u64 = digits.parse().map_err(|_| CoreError::InvalidAnchorId {
            value: s.to_string(),
            reason: "value does not fit in 64 bits".to_string(),
        })?;
        Self::new(value).map_err(|_| CoreError::InvalidAnchorId {
            value: s.to_string(),
            reason: "identifiers start at 1".to_string(),
        })
    }
}

impl std::fmt::Display for AnchorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_form())
    }
}

impl<'de> Deserialize<'de> for AnchorId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = u64::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}
