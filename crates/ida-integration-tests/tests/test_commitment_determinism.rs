//! Determinism and ordering properties of the commitment pipeline,
//! exercised across crate boundaries.

use ark_bn254::Fr;
use proptest::prelude::*;

use ida_core::FieldElement;
use ida_crypto::{field_hash_text, fold_proof, leaf_commitment, CommitmentTree};

fn fe(n: u64) -> FieldElement {
    FieldElement::from_fr(Fr::from(n))
}

#[test]
fn field_hash_is_stable_across_calls() {
    let first = field_hash_text("user@example.com").unwrap();
    for _ in 0..10 {
        assert_eq!(field_hash_text("user@example.com").unwrap(), first);
    }
}

#[test]
fn field_hash_handles_the_empty_string_and_long_inputs() {
    assert!(field_hash_text("").is_ok());
    let long = "x".repeat(64 * 1024);
    assert!(field_hash_text(&long).is_ok());
}

#[test]
fn leaf_is_order_sensitive_whenever_inputs_differ() {
    let a = field_hash_text("user@example.com").unwrap();
    let b = field_hash_text("Str0ng!Pass").unwrap();
    assert_ne!(a, b);
    assert_ne!(
        leaf_commitment(a, b).unwrap(),
        leaf_commitment(b, a).unwrap()
    );
}

#[test]
fn single_leaf_root_identity_holds() {
    let leaf = field_hash_text("anything").unwrap();
    let tree = CommitmentTree::build(&[leaf]).unwrap();
    assert_eq!(tree.root(), leaf);

    let proof = tree.proof(0).unwrap();
    assert!(proof.is_depth_zero());
    assert_eq!(fold_proof(leaf, &proof).unwrap(), leaf);
}

#[test]
fn batch_roots_are_reproducible() {
    let batch: Vec<FieldElement> = (1..=7u64).map(fe).collect();
    let first = CommitmentTree::build(&batch).unwrap().root();
    let second = CommitmentTree::build(&batch).unwrap().root();
    assert_eq!(first, second);

    // Reordering the batch changes the root.
    let mut reversed = batch.clone();
    reversed.reverse();
    assert_ne!(CommitmentTree::build(&reversed).unwrap().root(), first);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn hashes_are_deterministic_for_arbitrary_text(text in ".{0,64}") {
        prop_assert_eq!(
            field_hash_text(&text).unwrap(),
            field_hash_text(&text).unwrap()
        );
    }

    #[test]
    fn distinct_pairs_commit_differently(a in any::<u64>(), b in any::<u64>()) {
        prop_assume!(a != b);
        let x = fe(a);
        let y = fe(b);
        prop_assert_ne!(
            leaf_commitment(x, y).unwrap(),
            leaf_commitment(y, x).unwrap()
        );
    }

    #[test]
    fn every_member_of_an_arbitrary_batch_proves_membership(
        values in proptest::collection::vec(1u64..u64::MAX, 1..10)
    ) {
        let batch: Vec<FieldElement> = values.iter().map(|n| fe(*n)).collect();
        let tree = CommitmentTree::build(&batch).unwrap();
        for (i, leaf) in batch.iter().enumerate() {
            let proof = tree.proof(i).unwrap();
            prop_assert_eq!(fold_proof(*leaf, &proof).unwrap(), tree.root());
        }
    }
}
