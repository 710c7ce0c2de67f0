//! # Stateless signed claims
//!
//! Short-lived facts ("this email was reachable", "this holder verified
//! against the ledger") travel as HMAC-SHA-256 claims keyed by a shared
//! secret. No server-side record backs them; the claim itself carries
//! everything, which is what keeps the registration steps stateless.
//!
//! ## Invalidation is by expiry only
//!
//! A claim verifies as many times as presented until it expires. There is
//! no consumed-claim set, so a confirmation claim can be redeemed
//! repeatedly within its lifetime. That property is intentional here and
//! pinned by a test; a hardened deployment would add one-time-use
//! tracking on top.
//!
//! ## Token form
//!
//! `hex(payload-json) . hex(mac)`. Verification recomputes the MAC over
//! the received payload bytes (constant-time comparison) before any
//! parsing of the payload is trusted, then checks expiry.

use std::time::Duration;

use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use ida_core::AnchorId;

use crate::error::ClaimError;

type HmacSha256 = Hmac<Sha256>;

/// A fact carried by a signed claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Claim {
    /// The named address was reachable at issue time.
    #[serde(rename_all = "camelCase")]
    EmailConfirmation {
        /// The normalized email address.
        email: String,
    },
    /// The holder verified against the ledger record with this id.
    #[serde(rename_all = "camelCase")]
    Session {
        /// The verified anchor identifier.
        anchor_id: AnchorId,
    },
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    claim: Claim,
    /// Unix seconds after which the claim is dead.
    expires_at: i64,
}

/// Issues and verifies stateless claims with a shared secret.
pub struct ClaimsKeeper {
    key: Vec<u8>,
}

impl ClaimsKeeper {
    /// Create a keeper from the shared secret.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            key: secret.to_vec(),
        }
    }

    /// Issue a claim valid for `ttl` from now.
    pub fn issue(&self, claim: Claim, ttl: Duration) -> Result<String, ClaimError> {
        let envelope = Envelope {
            claim,
            expires_at: Utc::now().timestamp() + ttl.as_secs() as i64,
        };
        let payload =
            serde_json::to_vec(&envelope).map_err(|e| ClaimError::Malformed(e.to_string()))?;
        let mac = self.mac_of(&payload)?;
        Ok(format!("{}.{}", hex::encode(&payload), hex::encode(mac)))
    }

    /// Verify a token and return its claim.
    ///
    /// The MAC check runs before the payload is parsed; expiry is checked
    /// last.
    pub fn verify(&self, token: &str) -> Result<Claim, ClaimError> {
        let (payload_hex, mac_hex) = token
            .split_once('.')
            .ok_or_else(|| ClaimError::Malformed("missing separator".to_string()))?;
        let payload =
            hex::decode(payload_hex).map_err(|e| ClaimError::Malformed(e.to_string()))?;
        let presented =
            hex::decode(mac_hex).map_err(|e| ClaimError::Malformed(e.to_string()))?;

        let expected = self.mac_of(&payload)?;
        if !bool::from(expected.ct_eq(&presented)) {
            return Err(ClaimError::Forged);
        }

        let envelope: Envelope =
            serde_json::from_slice(&payload).map_err(|e| ClaimError::Malformed(e.to_string()))?;
        if envelope.expires_at <= Utc::now().timestamp() {
            return Err(ClaimError::Expired);
        }
        Ok(envelope.claim)
    }

    fn mac_of(&self, payload: &[u8]) -> Result<Vec<u8>, ClaimError> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| ClaimError::Malformed(e.to_string()))?;
        mac.update(payload);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}
