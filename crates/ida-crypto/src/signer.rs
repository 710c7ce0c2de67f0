//! # Attestation signing and signer recovery
//!
//! The anchoring authority signs the canonical signing input with an
//! EIP-191 personal-message signature. Anyone holding the payload and the
//! 65-byte signature can later recover the signing address and compare it
//! against the authority's known address, so verification never needs the
//! private key.

use alloy::primitives::{Address, Signature};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;

use crate::error::CryptoError;

/// The anchoring authority's signing handle.
///
/// Wraps a local secp256k1 key. The stack assumes a single authority; key
/// custody beyond process memory is the embedding deployment's concern.
#[derive(Debug, Clone)]
pub struct AnchorSigner {
    inner: PrivateKeySigner,
}

impl AnchorSigner {
    /// Parse a signer from a hex-encoded private key.
    pub fn from_hex_key(key: &str) -> Result<Self, CryptoError> {
        let inner: PrivateKeySigner = key
            .parse()
            .map_err(|e| CryptoError::KeyParse(format!("{e}")))?;
        Ok(Self { inner })
    }

    /// Generate an ephemeral signer (tests and local development).
    pub fn random() -> Self {
        Self {
            inner: PrivateKeySigner::random(),
        }
    }

    /// The authority's public address.
    pub fn address(&self) -> Address {
        self.inner.address()
    }

    /// Sign a canonical payload with an EIP-191 personal-message prefix.
    pub fn sign(&self, payload: &[u8]) -> Result<Signature, CryptoError> {
        self.inner
            .sign_message_sync(payload)
            .map_err(|e| CryptoError::Signing(e.to_string()))
    }

    /// Borrow the underlying signer (for wiring into an RPC wallet).
    pub fn as_inner(&self) -> &PrivateKeySigner {
        &self.inner
    }
}

/// Recover the address that produced `signature` over `payload`.
///
/// Applies the same EIP-191 prefix as [`AnchorSigner::sign`]. A payload or
/// signature altered by even one bit recovers to a different address (or
/// fails outright), which is exactly what re-verification depends on.
pub fn recover_signer(payload: &[u8], signature: &Signature) -> Result<Address, CryptoError> {
    signature
        .recover_address_from_msg(payload)
        .map_err(|e| CryptoError::Recovery(e.to_string()))
}

/// Render a signature as 130 lowercase hex characters (r, s, v).
pub fn signature_to_hex(signature: &Signature) -> String {
    hex::encode(signature.as_bytes())
}

/// Parse a signature from its 65-byte hex form.
pub fn signature_from_hex(s: &str) -> Result<Signature, CryptoError> {
    let raw = hex::decode(s).map_err(|e| CryptoError::SignatureParse(e.to_string()))?;
    Signature::try_from(raw.as_slice())
        .map_err(|e| CryptoError::SignatureParse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_then_recover_yields_signer_address() {
        let signer = AnchorSigner::random();
        let payload = b"leaf=aa|email=bb";
        let sig = signer.sign(payload).unwrap();
        let recovered = recover_signer(payload, &sig).unwrap();
        assert_eq!(recovered, signer.address());
    }

    #[test]
    fn tampered_payload_recovers_different_address() {
        let signer = AnchorSigner::random();
        let sig = signer.sign(b"original payload").unwrap();
        // Recovery either fails or yields some other address; it never
        // reproduces the signer.
        if let Ok(addr) = recover_signer(b"original payloae", &sig) {
            assert_ne!(addr, signer.address());
        }
    }

    #[test]
    fn two_signers_never_collide() {
        let a = AnchorSigner::random();
        let b = AnchorSigner::random();
        assert_ne!(a.address(), b.address());

        let sig = a.sign(b"payload").unwrap();
        let recovered = recover_signer(b"payload", &sig).unwrap();
        assert_ne!(recovered, b.address());
    }

    #[test]
    fn signature_hex_roundtrip() {
        let signer = AnchorSigner::random();
        let sig = signer.sign(b"roundtrip").unwrap();
        let encoded = signature_to_hex(&sig);
        assert_eq!(encoded.len(), 130);
        assert_eq!(encoded, encoded.to_lowercase());
        let back = signature_from_hex(&encoded).unwrap();
        assert_eq!(
            recover_signer(b"roundtrip", &back).unwrap(),
            signer.address()
        );
    }

    #[test]
    fn signature_from_hex_rejects_garbage() {
        assert!(signature_from_hex("not-hex").is_err());
        assert!(signature_from_hex("deadbeef").is_err());
    }

    #[test]
    fn known_key_has_stable_address() {
        // First well-known anvil development key.
        let signer = AnchorSigner::from_hex_key(
            "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        )
        .unwrap();
        assert_eq!(
            format!("{:?}", signer.address()).to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn from_hex_key_rejects_garbage() {
        assert!(AnchorSigner::from_hex_key("zz").is_err());
    }
}
