//! # In-memory anchor registry
//!
//! Models the on-chain registry's exact semantics in process memory: an
//! append-only forward log (index `i` holds the root for identifier
//! `i + 1`, records never deleted or mutated) plus a last-writer-wins
//! reverse index from root to its most recent identifier. Identifiers are
//! assigned under the write lock, so they are strictly increasing even
//! when the same root is anchored concurrently.
//!
//! Failure injection knobs simulate the three interesting ledger
//! failures for orchestrator tests: submission failure (nothing lands),
//! confirmation timeout (the record lands but the caller only sees the
//! timeout), and identifier withholding (confirmed, id unrecoverable).

use alloy::primitives::B256;
use parking_lot::RwLock;
use std::collections::HashMap;

use ida_core::{AnchorId, FieldElement, MembershipProof};
use ida_crypto::fold_proof;

use crate::error::LedgerError;
use crate::registry::{AnchorOutcome, AnchorRegistry, TxReceipt};

#[derive(Default)]
struct State {
    /// Forward log: `roots[i]` is the root anchored under id `i + 1`.
    roots: Vec<FieldElement>,
    /// Reverse index: latest id for each root.
    reverse: HashMap<[u8; 32], u64>,
    fail_submissions: bool,
    timeout_confirmations: bool,
    withhold_ids: bool,
}

/// In-process anchor registry for development and tests.
#[derive(Default)]
pub struct MemoryLedger {
    state: RwLock<State>,
}

impl MemoryLedger {
    /// A fresh, empty ledger. The first anchored root receives id 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in the forward log.
    pub fn anchored_count(&self) -> usize {
        self.state.read().roots.len()
    }

    /// Make subsequent anchoring calls fail at submission (no state
    /// change, retryable).
    pub fn set_fail_submissions(&self, on: bool) {
        self.state.write().fail_submissions = on;
    }

    /// Make subsequent anchoring calls time out at confirmation. The
    /// record still lands, modeling the ambiguous case where the
    /// transaction succeeded but the caller never saw the receipt.
    pub fn set_timeout_confirmations(&self, on: bool) {
        self.state.write().timeout_confirmations = on;
    }

    /// Make subsequent anchoring calls confirm without a recoverable
    /// identifier.
    pub fn set_withhold_ids(&self, on: bool) {
        self.state.write().withhold_ids = on;
    }

    fn synthetic_receipt(root: &FieldElement, id: u64) -> TxReceipt {
        // Deterministic hash: the root bytes with the id stamped into the
        // trailing eight bytes.
        let mut bytes = *root.as_bytes();
        bytes[24..].copy_from_slice(&id.to_be_bytes());
        TxReceipt {
            tx_hash: B256::from(bytes),
            block_number: id,
            gas_used: 0,
            success: true,
        }
    }
}

impl AnchorRegistry for MemoryLedger {
    async fn anchor_root(&self, root: FieldElement) -> Result<AnchorOutcome, LedgerError> {
        if root.is_zero() {
            return Err(LedgerError::ZeroRoot);
        }

        let mut state = self.state.write();
        if state.fail_submissions {
            return Err(LedgerError::Submission {
                reason: "injected submission failure".to_string(),
            });
        }

        state.roots.push(root);
        let id = state.roots.len() as u64;
        state.reverse.insert(*root.as_bytes(), id);

        let receipt = Self::synthetic_receipt(&root, id);
        if state.timeout_confirmations {
            return Err(LedgerError::ConfirmationTimeout {
                tx_hash: Some(receipt.tx_hash),
            });
        }
        if state.withhold_ids {
            return Ok(AnchorOutcome::ConfirmedUnresolved { receipt });
        }

        tracing::debug!(id, root = %root, "anchored root in memory ledger");
        Ok(AnchorOutcome::Anchored {
            id: AnchorId::new(id).map_err(|e| LedgerError::InvalidResponse(e.to_string()))?,
            receipt,
        })
    }

    async fn root_to_id(&self, root: FieldElement) -> Result<Option<AnchorId>, LedgerError> {
        let state = self.state.read();
        match state.reverse.get(root.as_bytes()) {
            Some(id) => Ok(Some(
                AnchorId::new(*id).map_err(|e| LedgerError::InvalidResponse(e.to_string()))?,
            )),
            None => Ok(None),
        }
    }

    async fn get_root(&self, id: AnchorId) -> Result<Option<FieldElement>, LedgerError> {
        let state = self.state.read();
        Ok(state.roots.get((id.get() - 1) as usize).copied())
    }

    async fn verify_leaf(
        &self,
        id: AnchorId,
        leaf: FieldElement,
        proof: &MembershipProof,
    ) -> Result<bool, LedgerError> {
        let stored = {
            let state = self.state.read();
            state.roots.get((id.get() - 1) as usize).copied()
        };
        // Unassigned identifiers fail closed.
        let Some(stored) = stored else {
            return Ok(false);
        };
        let candidate = fold_proof(leaf, proof)
            .map_err(|e| LedgerError::InvalidResponse(format!("proof folding failed: {e}")))?;
        Ok(candidate == stored)
    }
}
