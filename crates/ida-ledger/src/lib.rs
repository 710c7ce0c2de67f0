//! # ida-ledger: Anchor Registry Collaborator
//!
//! The ledger is the one stateful collaborator in the stack: an
//! append-only registry that stores anchored roots under strictly
//! increasing 1-based identifiers and answers membership queries about
//! them. This crate defines the collaborator contract and two
//! implementations:
//!
//! - [`MemoryLedger`]: in-process, for development, orchestrator tests,
//!   and failure injection. Models the registry's exact semantics:
//!   append-only forward log, last-writer-wins reverse index, no
//!   deduplication of repeated roots.
//! - [`EvmRegistry`]: JSON-RPC adapter for the on-chain registry
//!   contract, with confirmation timeouts and receipt-based identifier
//!   recovery.
//!
//! ## Anchoring semantics
//!
//! `anchor_root` is NOT idempotent: anchoring the same root twice creates
//! two records with two distinct identifiers, both independently
//! verifiable afterwards. The reverse lookup reflects only the most
//! recent identifier for a root. A confirmation timeout leaves the
//! operation in an unknown terminal state; callers must re-query before
//! retrying or they risk a duplicate anchor.

pub mod error;
pub mod evm;
pub mod memory;
pub mod registry;
mod retry;

pub use error::LedgerError;
pub use evm::{EvmRegistry, EvmRegistryConfig};
pub use memory::MemoryLedger;
pub use registry::{AnchorOutcome, AnchorRegistry, TxReceipt};
