//! # The anchor-registry contract
//!
//! [`AnchorRegistry`] is the collaborator interface the orchestrators
//! program against. Implementations must be `Send + Sync` so they can be
//! shared behind an `Arc` across async tasks.

use alloy::primitives::B256;
use core::future::Future;

use ida_core::{AnchorId, FieldElement, MembershipProof};

use crate::error::LedgerError;

/// Transaction receipt information surfaced to callers.
#[derive(Debug, Clone)]
pub struct TxReceipt {
    /// Transaction hash.
    pub tx_hash: B256,
    /// Block number the transaction landed in.
    pub block_number: u64,
    /// Gas used, where the ledger meters it (zero otherwise).
    pub gas_used: u64,
    /// Whether the transaction succeeded.
    pub success: bool,
}

/// What an anchoring call produced.
///
/// The two variants are both successes in the sense that the root is on
/// the ledger; they differ in whether the assigned identifier could be
/// recovered. Reporting `ConfirmedUnresolved` as a failure would
/// contradict ledger truth, so it is a distinct outcome, not an error.
#[derive(Debug, Clone)]
pub enum AnchorOutcome {
    /// The root was anchored and its identifier recovered.
    Anchored {
        /// The ledger-assigned identifier.
        id: AnchorId,
        /// Receipt of the anchoring transaction.
        receipt: TxReceipt,
    },
    /// The transaction confirmed but no identifier could be recovered
    /// from the return value, the reverse lookup, or the emitted events.
    ConfirmedUnresolved {
        /// Receipt of the anchoring transaction.
        receipt: TxReceipt,
    },
}

impl AnchorOutcome {
    /// The recovered identifier, when there is one.
    pub fn id(&self) -> Option<AnchorId> {
        match self {
            Self::Anchored { id, .. } => Some(*id),
            Self::ConfirmedUnresolved { .. } => None,
        }
    }

    /// The anchoring transaction's receipt.
    pub fn receipt(&self) -> &TxReceipt {
        match self {
            Self::Anchored { receipt, .. } => receipt,
            Self::ConfirmedUnresolved { receipt } => receipt,
        }
    }
}

/// Interface to the append-only anchor registry.
pub trait AnchorRegistry: Send + Sync {
    /// Anchor a root, appending a new record and assigning the next
    /// identifier. NOT idempotent: a repeated root gets a fresh record
    /// and a fresh identifier. The zero root is rejected before
    /// submission.
    fn anchor_root(
        &self,
        root: FieldElement,
    ) -> impl Future<Output = Result<AnchorOutcome, LedgerError>> + Send;

    /// The most recent identifier assigned to `root`, if any. Earlier
    /// anchors of the same root remain valid but are only reachable
    /// through their own identifiers.
    fn root_to_id(
        &self,
        root: FieldElement,
    ) -> impl Future<Output = Result<Option<AnchorId>, LedgerError>> + Send;

    /// The root recorded under `id`, if the identifier has been assigned.
    fn get_root(
        &self,
        id: AnchorId,
    ) -> impl Future<Output = Result<Option<FieldElement>, LedgerError>> + Send;

    /// Check a claimed leaf against the root recorded under `id` by
    /// folding the proof and comparing for exact equality. An identifier
    /// beyond the highest assigned one fails closed (`Ok(false)`).
    fn verify_leaf(
        &self,
        id: AnchorId,
        leaf: FieldElement,
        proof: &MembershipProof,
    ) -> impl Future<Output = Result<bool, LedgerError>> + Send;
}

impl<T: AnchorRegistry + ?Sized> AnchorRegistry for std::sync::Arc<T> {
    async fn anchor_root(&self, root: FieldElement) -> Result<AnchorOutcome, LedgerError> {
        (**self).anchor_root(root).await
    }

    async fn root_to_id(&self, root: FieldElement) -> Result<Option<AnchorId>, LedgerError> {
        (**self).root_to_id(root).await
    }

    async fn get_root(&self, id: AnchorId) -> Result<Option<FieldElement>, LedgerError> {
        (**self).get_root(id).await
    }

    async fn verify_leaf(
        &self,
        id: AnchorId,
        leaf: FieldElement,
        proof: &MembershipProof,
    ) -> Result<bool, LedgerError> {
        (**self).verify_leaf(id, leaf, proof).await
    }
}
