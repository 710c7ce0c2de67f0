//! # Login orchestration
//!
//! A holder presents their package; the flow re-derives the canonical
//! payload, recovers the signer from the signature, checks the membership
//! proof against the ledger, and only then issues a session claim bound
//! to the verified identifier.
//!
//! Rejections are terminal and deliberately coarse: beyond naming a
//! missing or unparseable field, the only distinction disclosed is
//! signature-versus-proof. A forged signature and a wrong declared signer
//! read identically from the outside, as do an unanchored identifier, a
//! non-member leaf, and an unreachable ledger.

use alloy::primitives::Address;

use ida_core::{AnchorId, FieldElement, MembershipProof, Salt, SigningInput, Timestamp};
use ida_crypto::{recover_signer, signature_from_hex};
use ida_ledger::AnchorRegistry;

use crate::claims::{Claim, ClaimsKeeper};
use crate::error::{ClaimError, LoginError};
use crate::package::PresentedPackage;
use crate::register::EnrollConfig;

/// A successfully issued session.
#[derive(Debug, Clone)]
pub struct SessionGrant {
    /// The ledger identifier the session is bound to.
    pub anchor_id: AnchorId,
    /// The session claim token.
    pub token: String,
}

/// The login orchestrator.
pub struct LoginFlow<R> {
    registry: R,
    claims: ClaimsKeeper,
    config: EnrollConfig,
}

fn require<'a>(field: &'static str, value: &'a Option<String>) -> Result<&'a str, LoginError> {
    value
        .as_deref()
        .ok_or(LoginError::MissingField { field })
}

fn parse_element(field: &'static str, hex: &str) -> Result<FieldElement, LoginError> {
    FieldElement::from_hex(hex).map_err(|e| LoginError::MalformedField {
        field,
        reason: e.to_string(),
    })
}

impl<R: AnchorRegistry> LoginFlow<R> {
    /// Wire the orchestrator to the ledger and the claims keeper.
    pub fn new(registry: R, claims: ClaimsKeeper, config: EnrollConfig) -> Self {
        Self {
            registry,
            claims,
            config,
        }
    }

    /// Verify a presented package and issue a session claim.
    pub async fn login(&self, presented: &PresentedPackage) -> Result<SessionGrant, LoginError> {
        // Field presence and shape first; nothing cryptographic runs on
        // an incomplete package.
        let leaf = parse_element("leaf", require("leaf", &presented.leaf)?)?;
        let root = parse_element("root", require("root", &presented.root)?)?;
        let email_hash = parse_element("emailHash", require("emailHash", &presented.email_hash)?)?;
        let passphrase_hash = parse_element(
            "passphraseHash",
            require("passphraseHash", &presented.passphrase_hash)?,
        )?;
        let salt = Salt::from_hex(require("salt", &presented.salt)?).map_err(|e| {
            LoginError::MalformedField {
                field: "salt",
                reason: e.to_string(),
            }
        })?;
        let issued_at = Timestamp::parse_iso8601(require("issuedAt", &presented.issued_at)?)
            .map_err(|e| LoginError::MalformedField {
                field: "issuedAt",
                reason: e.to_string(),
            })?;

        let declared: Address = require("signerAddress", &presented.signer_address)?
            .parse()
            .map_err(|_| LoginError::MalformedField {
                field: "signerAddress",
                reason: "not an address".to_string(),
            })?;
        let signature = signature_from_hex(require("signature", &presented.signature)?)
            .map_err(|_| LoginError::MalformedField {
                field: "signature",
                reason: "not a 65-byte signature".to_string(),
            })?;

        let id_text = require("numericId", &presented.numeric_id)?;
        let anchor_id =
            AnchorId::parse_display(id_text).map_err(|e| LoginError::MalformedField {
                field: "numericId",
                reason: e.to_string(),
            })?;

        let siblings_hex = presented
            .proof
            .as_ref()
            .ok_or(LoginError::MissingField { field: "proof" })?;
        let mut siblings = Vec::with_capacity(siblings_hex.len());
        for sibling in siblings_hex {
            siblings.push(parse_element("proof", sibling)?);
        }
        let proof = MembershipProof {
            siblings,
            index: presented
                .proof_index
                .ok_or(LoginError::MissingField { field: "proofIndex" })?,
        };

        // Signature check: re-derive the canonical payload and recover
        // the signer.
        let payload = SigningInput {
            leaf,
            root: Some(root),
            email_hash,
            passphrase_hash,
            salt,
            issued_at,
        }
        .encode();
        let recovered =
            recover_signer(&payload, &signature).map_err(|_| LoginError::SignatureRejected)?;
        if recovered != declared {
            tracing::debug!("recovered signer does not match declared signer");
            return Err(LoginError::SignatureRejected);
        }

        // Proof check: the ledger decides; any ledger trouble reads as
        // not-verified out here.
        match self.registry.verify_leaf(anchor_id, leaf, &proof).await {
            Ok(true) => {}
            Ok(false) => return Err(LoginError::ProofRejected),
            Err(e) => {
                tracing::debug!(error = %e, "ledger verification unavailable");
                return Err(LoginError::ProofRejected);
            }
        }

        let token = self
            .claims
            .issue(Claim::Session { anchor_id }, self.config.session_ttl)
            .map_err(|_| LoginError::SessionIssuance)?;
        tracing::info!(%anchor_id, "session issued");
        Ok(SessionGrant { anchor_id, token })
    }

    /// Verify a session claim and return the identifier it is bound to.
    pub fn verify_session(&self, token: &str) -> Result<AnchorId, ClaimError> {
        match self.claims.verify(token)? {
            Claim::Session { anchor_id } => Ok(anchor_id),
            _ => Err(ClaimError::WrongKind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::mailer::RecordingMailer;
    use crate::package::{AnchorState, PresentedPackage};
    use crate::register::RegistrationFlow;
    use ida_crypto::AnchorSigner;
    use ida_ledger::MemoryLedger;

    const SECRET: &[u8] = b"login-test-secret";

    async fn registered_package(ledger: Arc<MemoryLedger>) -> PresentedPackage {
        let mailer = Arc::new(RecordingMailer::new());
        let flow = RegistrationFlow::new(
            ledger,
            mailer.clone(),
            AnchorSigner::random(),
            ClaimsKeeper::new(SECRET),
            EnrollConfig::default(),
        );
        flow.begin("user@example.com").await.unwrap();
        let token = mailer.last_token().unwrap();
        let email = flow.confirm(&token).unwrap();
        let pkg = flow.complete(email, "Str0ng!Pass").await.unwrap();
        assert_eq!(pkg.status, AnchorState::Anchored);
        pkg.into()
    }

    fn login_flow(ledger: Arc<MemoryLedger>) -> LoginFlow<Arc<MemoryLedger>> {
        LoginFlow::new(ledger, ClaimsKeeper::new(SECRET), EnrollConfig::default())
    }

    #[tokio::test]
    async fn fresh_package_logs_in_and_session_verifies() {
        let ledger = Arc::new(MemoryLedger::new());
        let presented = registered_package(ledger.clone()).await;
        let flow = login_flow(ledger);

        let grant = flow.login(&presented).await.unwrap();
        assert_eq!(grant.anchor_id.get(), 1);
        assert_eq!(flow.verify_session(&grant.token).unwrap(), grant.anchor_id);
    }

    #[tokio::test]
    async fn each_missing_field_is_named() {
        let ledger = Arc::new(MemoryLedger::new());
        let presented = registered_package(ledger.clone()).await;
        let flow = login_flow(ledger);

        let mut no_leaf = presented.clone();
        no_leaf.leaf = None;
        assert_eq!(
            flow.login(&no_leaf).await.unwrap_err(),
            LoginError::MissingField { field: "leaf" }
        );

        let mut no_sig = presented.clone();
        no_sig.signature = None;
        assert_eq!(
            flow.login(&no_sig).await.unwrap_err(),
            LoginError::MissingField { field: "signature" }
        );

        let mut no_proof = presented.clone();
        no_proof.proof = None;
        assert_eq!(
            flow.login(&no_proof).await.unwrap_err(),
            LoginError::MissingField { field: "proof" }
        );

        let mut no_id = presented;
        no_id.numeric_id = None;
        assert_eq!(
            flow.login(&no_id).await.unwrap_err(),
            LoginError::MissingField { field: "numericId" }
        );
    }

    #[tokio::test]
    async fn malformed_ids_are_rejected_before_any_ledger_call() {
        let ledger = Arc::new(MemoryLedger::new());
        let presented = registered_package(ledger.clone()).await;
        let flow = login_flow(ledger);

        for bad in ["000001", "ID-000000", "ID-12ab", ""] {
            let mut pkg = presented.clone();
            pkg.numeric_id = Some(bad.to_string());
            assert!(
                matches!(
                    flow.login(&pkg).await.unwrap_err(),
                    LoginError::MalformedField { field: "numericId", .. }
                ),
                "expected rejection for {bad:?}"
            );
        }
    }

    #[tokio::test]
    async fn tampered_leaf_fails_the_signature_check() {
        let ledger = Arc::new(MemoryLedger::new());
        let mut presented = registered_package(ledger.clone()).await;
        let flow = login_flow(ledger);

        // Flip one nibble of the leaf; the payload no longer matches the
        // signature.
        let mut leaf = presented.leaf.unwrap();
        let flipped = if leaf.ends_with('0') { '1' } else { '0' };
        leaf.pop();
        leaf.push(flipped);
        presented.leaf = Some(leaf);

        assert_eq!(
            flow.login(&presented).await.unwrap_err(),
            LoginError::SignatureRejected
        );
    }

    #[tokio::test]
    async fn foreign_declared_signer_is_rejected() {
        let ledger = Arc::new(MemoryLedger::new());
        let mut presented = registered_package(ledger.clone()).await;
        let flow = login_flow(ledger);

        presented.signer_address =
            Some(format!("{:#x}", AnchorSigner::random().address()));
        assert_eq!(
            flow.login(&presented).await.unwrap_err(),
            LoginError::SignatureRejected
        );
    }

    #[tokio::test]
    async fn unanchored_id_reads_as_proof_rejection() {
        let ledger = Arc::new(MemoryLedger::new());
        let mut presented = registered_package(ledger.clone()).await;
        let flow = login_flow(ledger);

        // Id 2 was never assigned; the ledger fails closed.
        presented.numeric_id = Some("ID-000002".to_string());
        assert_eq!(
            flow.login(&presented).await.unwrap_err(),
            LoginError::ProofRejected
        );
    }

    #[tokio::test]
    async fn signed_but_never_anchored_package_is_proof_rejected() {
        // Register against a ledger that rejects submissions, then try
        // to log in claiming id 1 on an empty ledger.
        let failing = Arc::new(MemoryLedger::new());
        failing.set_fail_submissions(true);
        let mut presented = {
            let mailer = Arc::new(RecordingMailer::new());
            let flow = RegistrationFlow::new(
                failing.clone(),
                mailer.clone(),
                AnchorSigner::random(),
                ClaimsKeeper::new(SECRET),
                EnrollConfig::default(),
            );
            flow.begin("user@example.com").await.unwrap();
            let token = mailer.last_token().unwrap();
            let email = flow.confirm(&token).unwrap();
            let pkg = flow.complete(email, "Str0ng!Pass").await.unwrap();
            assert_eq!(pkg.status, AnchorState::NotAnchored);
            PresentedPackage::from(pkg)
        };
        presented.numeric_id = Some("ID-000001".to_string());

        let flow = login_flow(failing);
        assert_eq!(
            flow.login(&presented).await.unwrap_err(),
            LoginError::ProofRejected
        );
    }

    #[tokio::test]
    async fn session_tokens_of_the_wrong_kind_are_rejected() {
        let ledger = Arc::new(MemoryLedger::new());
        let flow = login_flow(ledger);
        let confirmation = flow
            .claims
            .issue(
                Claim::EmailConfirmation {
                    email: "user@example.com".into(),
                },
                std::time::Duration::from_secs(60),
            )
            .unwrap();
        assert!(matches!(
            flow.verify_session(&confirmation),
            Err(ClaimError::WrongKind)
        ));
    }
}
