//! # Registration orchestration
//!
//! Three stateless entry points carry a holder from a bare email address
//! to a signed, anchored [`IdentityPackage`]:
//!
//! 1. [`begin`] validates the address, issues a confirmation claim, and
//!    hands delivery to the mailer collaborator.
//! 2. [`confirm`] redeems the claim and yields a [`ConfirmedEmail`].
//! 3. [`complete`] enforces the passphrase policy, derives the hashes,
//!    leaf, and root, signs the canonical payload, and anchors the root.
//!
//! Nothing is stored between steps; the claim carries the email. The
//! ledger is the only collaborator allowed to fail without failing the
//! flow: anchoring trouble degrades the outcome to an unanchored or
//! unconfirmed package, because the holder must never be left with
//! nothing after a valid registration.
//!
//! [`begin`]: RegistrationFlow::begin
//! [`confirm`]: RegistrationFlow::confirm
//! [`complete`]: RegistrationFlow::complete

use std::time::Duration;

use zeroize::Zeroizing;

use ida_core::{Salt, SigningInput, Timestamp};
use ida_crypto::{
    field_hash_text, leaf_commitment, signature_to_hex, AnchorSigner, CommitmentTree,
};
use ida_ledger::{AnchorOutcome, AnchorRegistry, LedgerError};

use crate::claims::{Claim, ClaimsKeeper};
use crate::error::{ClaimError, RegistrationError};
use crate::mailer::ConfirmationMailer;
use crate::package::{AnchorState, IdentityPackage};
use crate::policy::{check_passphrase, normalize_email};

/// Orchestrator tunables.
#[derive(Debug, Clone)]
pub struct EnrollConfig {
    /// Lifetime of an email-confirmation claim.
    pub confirmation_ttl: Duration,
    /// Lifetime of a session claim issued at login.
    pub session_ttl: Duration,
}

impl Default for EnrollConfig {
    fn default() -> Self {
        Self {
            confirmation_ttl: Duration::from_secs(15 * 60),
            session_ttl: Duration::from_secs(30 * 60),
        }
    }
}

/// Proof that an address was reachable: produced only by redeeming a
/// confirmation claim.
#[derive(Debug, Clone)]
pub struct ConfirmedEmail {
    email: String,
}

impl ConfirmedEmail {
    /// The normalized address.
    pub fn as_str(&self) -> &str {
        &self.email
    }
}

/// The registration orchestrator.
pub struct RegistrationFlow<R, M> {
    registry: R,
    mailer: M,
    signer: AnchorSigner,
    claims: ClaimsKeeper,
    config: EnrollConfig,
}

impl<R: AnchorRegistry, M: ConfirmationMailer> RegistrationFlow<R, M> {
    /// Wire the orchestrator to its collaborators.
    pub fn new(
        registry: R,
        mailer: M,
        signer: AnchorSigner,
        claims: ClaimsKeeper,
        config: EnrollConfig,
    ) -> Self {
        Self {
            registry,
            mailer,
            signer,
            claims,
            config,
        }
    }

    /// Step 1: validate the address and dispatch a confirmation link.
    ///
    /// No server-side record is created; the claim itself carries the
    /// email. Delivery failure fails this step only.
    pub async fn begin(&self, email: &str) -> Result<(), RegistrationError> {
        let normalized = normalize_email(email)?;
        let token = self.claims.issue(
            Claim::EmailConfirmation {
                email: normalized.clone(),
            },
            self.config.confirmation_ttl,
        )?;
        self.mailer.send(&normalized, &token).await?;
        tracing::info!("confirmation claim dispatched");
        Ok(())
    }

    /// Step 2: redeem a confirmation claim.
    ///
    /// Checks signature and expiry. Claims are invalidated by expiry
    /// only; redemption does not consume them.
    pub fn confirm(&self, token: &str) -> Result<ConfirmedEmail, RegistrationError> {
        match self.claims.verify(token)? {
            Claim::EmailConfirmation { email } => Ok(ConfirmedEmail { email }),
            _ => Err(RegistrationError::Claim(ClaimError::WrongKind)),
        }
    }

    /// Step 3: derive the commitment, sign, anchor, and assemble the
    /// holder's package.
    ///
    /// Policy violations are collected and reported together. Anchoring
    /// failure does not fail the call: the signed package comes back
    /// marked [`AnchorState::NotAnchored`] (or
    /// [`AnchorState::AnchorUnconfirmed`] when the outcome is ambiguous).
    pub async fn complete(
        &self,
        email: ConfirmedEmail,
        passphrase: &str,
    ) -> Result<IdentityPackage, RegistrationError> {
        check_passphrase(passphrase)
            .map_err(|violations| RegistrationError::WeakPassphrase { violations })?;

        // Hash, then drop the only copy we own.
        let passphrase = Zeroizing::new(passphrase.to_owned());
        let email_hash = field_hash_text(email.as_str())?;
        let passphrase_hash = field_hash_text(&passphrase)?;
        drop(passphrase);

        let leaf = leaf_commitment(email_hash, passphrase_hash)?;
        // The general tree path, exercised here with a single-leaf batch:
        // root equals leaf and the proof is empty.
        let tree = CommitmentTree::build(&[leaf])?;
        let root = tree.root();
        let proof = tree.proof(0)?;

        let salt = Salt::generate();
        let issued_at = Timestamp::now();
        let signing = SigningInput {
            leaf,
            root: Some(root),
            email_hash,
            passphrase_hash,
            salt,
            issued_at,
        };
        let signature = self.signer.sign(&signing.encode())?;

        let (status, numeric_id) = match self.registry.anchor_root(root).await {
            Ok(AnchorOutcome::Anchored { id, .. }) => {
                tracing::info!(%id, "root anchored");
                (AnchorState::Anchored, Some(id.display_form()))
            }
            Ok(AnchorOutcome::ConfirmedUnresolved { .. }) => {
                tracing::warn!("anchor confirmed but identifier unresolved");
                (AnchorState::AnchorUnconfirmed, None)
            }
            Err(LedgerError::ConfirmationTimeout { tx_hash }) => {
                tracing::warn!(?tx_hash, "anchor confirmation timed out");
                (AnchorState::AnchorUnconfirmed, None)
            }
            Err(e) => {
                tracing::warn!(error = %e, "anchoring failed, returning unanchored package");
                (AnchorState::NotAnchored, None)
            }
        };

        Ok(IdentityPackage {
            status,
            numeric_id,
            email_hash: email_hash.to_hex(),
            email_hash_decimal: email_hash.to_decimal_string(),
            passphrase_hash: passphrase_hash.to_hex(),
            passphrase_hash_decimal: passphrase_hash.to_decimal_string(),
            leaf: leaf.to_hex(),
            leaf_decimal: leaf.to_decimal_string(),
            root: root.to_hex(),
            root_decimal: root.to_decimal_string(),
            salt: salt.to_hex(),
            issued_at: issued_at.to_iso8601(),
            proof: proof.siblings.iter().map(|s| s.to_hex()).collect(),
            proof_index: proof.index,
            signer_address: format!("{:#x}", self.signer.address()),
            signature: signature_to_hex(&signature),
        })
    }
}
