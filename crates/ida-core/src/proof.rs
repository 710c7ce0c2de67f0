//! # Membership proofs
//!
//! A [`MembershipProof`] carries the ordered sibling values met while
//! walking from a leaf to the root of a commitment tree, together with the
//! leaf's index. The index bits decide, level by level, whether the
//! running node sits left or right of its sibling during recomputation.
//!
//! An empty sibling list with index zero is a valid proof and means the
//! leaf is itself the root (depth zero), which is the shipped single-leaf
//! case.

use serde::{Deserialize, Serialize};

use crate::field::FieldElement;

/// Sibling path plus leaf position, sufficient to recompute a root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipProof {
    /// Sibling values, ordered leaf level first.
    pub siblings: Vec<FieldElement>,
    /// Index of the leaf within its level.
    pub index: u64,
}

impl MembershipProof {
    /// The depth-zero proof: the leaf is the root.
    pub fn empty() -> Self {
        Self {
            siblings: Vec::new(),
            index: 0,
        }
    }

    /// Number of tree levels the proof spans.
    pub fn depth(&self) -> usize {
        self.siblings.len()
    }

    /// Whether this is the depth-zero proof.
    pub fn is_depth_zero(&self) -> bool {
        self.siblings.is_empty()
    }
}

impl Default for MembershipProof {
    fn default() -> Self {
        Self::empty()
    }
}
