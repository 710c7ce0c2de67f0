//! # EVM anchor-registry adapter
//!
//! JSON-RPC adapter for the on-chain registry contract. The contract
//! stores roots in an append-only array, assigns 1-based identifiers,
//! keeps a last-writer-wins reverse mapping, and emits `RootAnchored`
//! for every record.
//!
//! ## Identifier recovery
//!
//! A state-mutating call's return value is not observable from a
//! transaction receipt, so after confirmation the adapter recovers the
//! assigned identifier in order of preference: the `rootToId` reverse
//! lookup, then a scan of the receipt's `RootAnchored` events. When both
//! fail the anchor is reported as confirmed-but-unresolved rather than
//! failed, because the root IS on the ledger. Note that the reverse
//! lookup returns the latest identifier for a root; a concurrent anchor
//! of the same root can therefore surface the newer record's identifier,
//! which is still independently verifiable.
//!
//! ## Retry discipline
//!
//! Read-only calls go through bounded backoff retry. The anchoring
//! transaction is submitted exactly once per call: retrying a timed-out
//! submission without re-querying risks a duplicate anchor.

use std::time::Duration;

use alloy::{
    network::EthereumWallet,
    primitives::{Address, B256, U256},
    providers::{DynProvider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    sol,
};

use ida_core::{AnchorId, FieldElement, MembershipProof};

use crate::error::LedgerError;
use crate::registry::{AnchorOutcome, AnchorRegistry, TxReceipt};
use crate::retry::retry_read;

sol! {
    #[sol(rpc)]
    interface IAnchorRegistry {
        function anchorRoot(bytes32 root) external returns (uint256);
        function rootToId(bytes32 root) external view returns (uint256);
        function getRoot(uint256 id) external view returns (bytes32);
        function verifyUser(
            uint256 id,
            bytes32 leaf,
            bytes32[] calldata siblings,
            uint256 leafIndex
        ) external view returns (bool);

        event RootAnchored(uint256 indexed id, bytes32 indexed root, address submitter);
    }
}

/// Configuration for the EVM registry adapter.
#[derive(Debug, Clone)]
pub struct EvmRegistryConfig {
    /// HTTP JSON-RPC endpoint.
    pub rpc_url: String,
    /// Hex-encoded private key of the submitting authority.
    pub private_key: String,
    /// Address of the deployed registry contract.
    pub registry: Address,
    /// How long to await transaction confirmation before reporting the
    /// ambiguous timeout state (default: 90 seconds).
    pub confirmation_timeout: Duration,
}

impl EvmRegistryConfig {
    /// Create a configuration with the default confirmation timeout.
    pub fn new(
        rpc_url: impl Into<String>,
        private_key: impl Into<String>,
        registry: Address,
    ) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            private_key: private_key.into(),
            registry,
            confirmation_timeout: Duration::from_secs(90),
        }
    }
}

/// JSON-RPC adapter for the on-chain anchor registry.
pub struct EvmRegistry {
    provider: DynProvider,
    registry: Address,
    submitter: Address,
    confirmation_timeout: Duration,
}

impl EvmRegistry {
    /// Build the adapter from configuration.
    pub fn new(config: EvmRegistryConfig) -> Result<Self, LedgerError> {
        let signer: PrivateKeySigner = config
            .private_key
            .parse()
            .map_err(|e| LedgerError::Config(format!("invalid private key: {e}")))?;
        let submitter = signer.address();
        let wallet = EthereumWallet::from(signer);

        let url = config
            .rpc_url
            .parse()
            .map_err(|e| LedgerError::Config(format!("invalid RPC URL: {e}")))?;
        let provider = DynProvider::new(ProviderBuilder::new().wallet(wallet).connect_http(url));

        Ok(Self {
            provider,
            registry: config.registry,
            submitter,
            confirmation_timeout: config.confirmation_timeout,
        })
    }

    /// The submitting authority's address.
    pub fn submitter_address(&self) -> Address {
        self.submitter
    }

    async fn lookup_id(&self, root32: B256) -> Result<Option<AnchorId>, LedgerError> {
        let raw = retry_read("rootToId", || async {
            IAnchorRegistry::new(self.registry, &self.provider)
                .rootToId(root32)
                .call()
                .await
                .map_err(|e| LedgerError::Rpc(e.to_string()))
        })
        .await?;

        if raw.is_zero() {
            return Ok(None);
        }
        let value: u64 = raw
            .try_into()
            .map_err(|_| LedgerError::InvalidResponse("identifier exceeds 64 bits".into()))?;
        AnchorId::new(value)
            .map(Some)
            .map_err(|e| LedgerError::InvalidResponse(e.to_string()))
    }

    fn id_from_logs(
        receipt: &alloy::rpc::types::TransactionReceipt,
        root32: B256,
    ) -> Option<AnchorId> {
        receipt.inner.logs().iter().find_map(|log| {
            log.log_decode::<IAnchorRegistry::RootAnchored>()
                .ok()
                .and_then(|event| {
                    let inner = event.inner;
                    if inner.root != root32 {
                        return None;
                    }
                    let raw: u64 = inner.id.try_into().ok()?;
                    AnchorId::new(raw).ok()
                })
        })
    }
}

impl AnchorRegistry for EvmRegistry {
    async fn anchor_root(&self, root: FieldElement) -> Result<AnchorOutcome, LedgerError> {
        if root.is_zero() {
            return Err(LedgerError::ZeroRoot);
        }

        let registry = IAnchorRegistry::new(self.registry, &self.provider);
        let root32 = B256::from_slice(root.as_bytes());

        let pending = registry
            .anchorRoot(root32)
            .send()
            .await
            .map_err(|e| LedgerError::Submission {
                reason: e.to_string(),
            })?;
        let tx_hash = *pending.tx_hash();

        let receipt =
            match tokio::time::timeout(self.confirmation_timeout, pending.get_receipt()).await {
                Err(_) => {
                    return Err(LedgerError::ConfirmationTimeout {
                        tx_hash: Some(tx_hash),
                    })
                }
                Ok(Err(e)) => return Err(LedgerError::Rpc(e.to_string())),
                Ok(Ok(receipt)) => receipt,
            };

        if !receipt.status() {
            return Err(LedgerError::Reverted {
                reason: format!("anchorRoot reverted in tx {tx_hash}"),
            });
        }

        let tx_receipt = TxReceipt {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number.unwrap_or(0),
            gas_used: receipt.gas_used,
            success: true,
        };

        match self.lookup_id(root32).await {
            Ok(Some(id)) => {
                return Ok(AnchorOutcome::Anchored {
                    id,
                    receipt: tx_receipt,
                })
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("reverse lookup after anchoring failed: {e}"),
        }

        if let Some(id) = Self::id_from_logs(&receipt, root32) {
            return Ok(AnchorOutcome::Anchored {
                id,
                receipt: tx_receipt,
            });
        }

        tracing::warn!(%tx_hash, "anchor confirmed but identifier unresolved");
        Ok(AnchorOutcome::ConfirmedUnresolved {
            receipt: tx_receipt,
        })
    }

    async fn root_to_id(&self, root: FieldElement) -> Result<Option<AnchorId>, LedgerError> {
        self.lookup_id(B256::from_slice(root.as_bytes())).await
    }

    async fn get_root(&self, id: AnchorId) -> Result<Option<FieldElement>, LedgerError> {
        let value = retry_read("getRoot", || async {
            IAnchorRegistry::new(self.registry, &self.provider)
                .getRoot(U256::from(id.get()))
                .call()
                .await
                .map_err(|e| LedgerError::Rpc(e.to_string()))
        })
        .await?;

        if value == B256::ZERO {
            return Ok(None);
        }
        FieldElement::from_bytes(value.0)
            .map(Some)
            .map_err(|e| LedgerError::InvalidResponse(e.to_string()))
    }

    async fn verify_leaf(
        &self,
        id: AnchorId,
        leaf: FieldElement,
        proof: &MembershipProof,
    ) -> Result<bool, LedgerError> {
        let siblings: Vec<B256> = proof
            .siblings
            .iter()
            .map(|s| B256::from_slice(s.as_bytes()))
            .collect();
        let leaf32 = B256::from_slice(leaf.as_bytes());
        let index = U256::from(proof.index);

        retry_read("verifyUser", || {
            let siblings = siblings.clone();
            async move {
                IAnchorRegistry::new(self.registry, &self.provider)
                    .verifyUser(U256::from(id.get()), leaf32, siblings, index)
                    .call()
                    .await
                    .map_err(|e| LedgerError::Rpc(e.to_string()))
            }
        })
        .await
    }
}
