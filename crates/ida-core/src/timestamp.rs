//! # Whole-second UTC timestamps
//!
//! Registration timestamps enter the canonical signing input, so their
//! textual form must be reproducible bit-for-bit. [`Timestamp`] pins the
//! contract: UTC, truncated to whole seconds, rendered as ISO-8601 with a
//! `Z` suffix (`2026-08-08T12:00:00Z`).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A UTC timestamp with whole-second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current time, truncated to seconds.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Truncate an arbitrary datetime to whole seconds.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(DateTime::<Utc>::from_timestamp(dt.timestamp(), 0).unwrap_or(dt))
    }

    /// ISO-8601 rendering with seconds precision and `Z` suffix.
    pub fn to_iso8601(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Strict parse of an ISO-8601 string; sub-second digits are truncated.
    pub fn parse_iso8601(s: &str) -> Result<Self, CoreError> {
        let parsed =
            DateTime::parse_from_rfc3339(s).map_err(|e| CoreError::InvalidTimestamp {
                value: s.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self::from_datetime(parsed.with_timezone(&Utc)))
    }

    /// Access the underlying datetime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_iso8601())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse_iso8601(&raw).map_err(serde::de::Error::custom)
    }
}
