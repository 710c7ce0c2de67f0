//! # Leaf commitments and the commitment tree
//!
//! A holder's leaf is the width-2 Poseidon hash of the ordered pair
//! (email hash, passphrase hash); swapping the inputs produces a
//! different leaf. One or more leaves summarize into a root by repeated
//! pairwise hashing up a binary tree.
//!
//! ## Tree conventions
//!
//! The tree is an index-addressed arena of levels (flat vectors, no
//! pointer graph). At every level the node at the lower index is the left
//! operand; a lone trailing node is paired with itself (duplicate-last).
//! [`fold_proof`] applies the exact same conventions when recomputing a
//! candidate root from a leaf, which is what ledger-side verification
//! relies on: any divergence between construction and folding makes every
//! proof fail.
//!
//! A single-leaf batch is the degenerate case: the root equals the leaf
//! and the proof is empty.

use ida_core::{FieldElement, MembershipProof};

use crate::error::CryptoError;
use crate::poseidon::poseidon2;

/// The shared pairwise hash used for leaves and internal nodes.
pub fn hash_pair(left: FieldElement, right: FieldElement) -> Result<FieldElement, CryptoError> {
    Ok(FieldElement::from_fr(poseidon2(left.to_fr(), right.to_fr())?))
}

/// Combine the two field hashes of a registration into its leaf.
///
/// Order-sensitive: the email hash is always the left operand.
pub fn leaf_commitment(
    email_hash: FieldElement,
    passphrase_hash: FieldElement,
) -> Result<FieldElement, CryptoError> {
    hash_pair(email_hash, passphrase_hash)
}

/// An index-addressed binary hash tree over a batch of leaves.
///
/// `levels[0]` holds the leaves; each subsequent level halves (rounding
/// up) until the summit. The root is fixed at construction.
#[derive(Debug, Clone)]
pub struct CommitmentTree {
    levels: Vec<Vec<FieldElement>>,
    root: FieldElement,
}

impl CommitmentTree {
    /// Build the tree bottom-up from one or more leaves.
    pub fn build(leaves: &[FieldElement]) -> Result<Self, CryptoError> {
        if leaves.is_empty() {
            return Err(CryptoError::EmptyBatch);
        }

        let mut levels: Vec<Vec<FieldElement>> = vec![leaves.to_vec()];
        while levels[levels.len() - 1].len() > 1 {
            let prev = &levels[levels.len() - 1];
            let mut next = Vec::with_capacity(prev.len().div_ceil(2));
            for pair in 0..prev.len().div_ceil(2) {
                let left = prev[2 * pair];
                let right = if 2 * pair + 1 < prev.len() {
                    prev[2 * pair + 1]
                } else {
                    // Duplicate-last: a lone node pairs with itself.
                    left
                };
                next.push(hash_pair(left, right)?);
            }
            levels.push(next);
        }

        let root = levels[levels.len() - 1][0];
        Ok(Self { levels, root })
    }

    /// The summit of the tree. Equals the leaf for a single-leaf batch.
    pub fn root(&self) -> FieldElement {
        self.root
    }

    /// Number of leaves in the batch.
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Extract the membership proof for the leaf at `index`.
    ///
    /// The siblings are ordered leaf level first; the proof carries the
    /// index so folding can place the running node left or right.
    pub fn proof(&self, index: usize) -> Result<MembershipProof, CryptoError> {
        let leaves = self.leaf_count();
        if index >= leaves {
            return Err(CryptoError::LeafIndexOutOfRange { index, leaves });
        }

        let mut siblings = Vec::with_capacity(self.levels.len() - 1);
        let mut idx = index;
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling_idx = idx ^ 1;
            let sibling = if sibling_idx < level.len() {
                level[sibling_idx]
            } else {
                // The duplicated lone node is its own sibling.
                level[idx]
            };
            siblings.push(sibling);
            idx >>= 1;
        }

        Ok(MembershipProof {
            siblings,
            index: index as u64,
        })
    }
}

/// Recompute a candidate root by folding a proof into a leaf.
///
/// Uses the same pairwise hash and sibling-order conventions as
/// [`CommitmentTree::build`]; the proof's index bits decide, level by
/// level, whether the running node is the left or right operand.
pub fn fold_proof(
    leaf: FieldElement,
    proof: &MembershipProof,
) -> Result<FieldElement, CryptoError> {
    let mut node = leaf;
    let mut idx = proof.index;
    for sibling in &proof.siblings {
        node = if idx & 1 == 0 {
            hash_pair(node, *sibling)?
        } else {
            hash_pair(*sibling, node)?
        };
        idx >>= 1;
    }
    Ok(node)
}
