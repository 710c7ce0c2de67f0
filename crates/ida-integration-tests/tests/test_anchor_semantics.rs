//! Ledger semantics the protocol depends on: strictly increasing
//! identifiers, no deduplication of repeated roots, and the
//! last-writer-wins reverse index over an untouched forward log.

use ark_bn254::Fr;

use ida_core::{AnchorId, FieldElement, MembershipProof};
use ida_crypto::CommitmentTree;
use ida_ledger::{AnchorRegistry, LedgerError, MemoryLedger};

fn fe(n: u64) -> FieldElement {
    FieldElement::from_fr(Fr::from(n))
}

fn id(n: u64) -> AnchorId {
    AnchorId::new(n).unwrap()
}

#[tokio::test]
async fn ids_increase_strictly_from_one_across_distinct_roots() {
    let ledger = MemoryLedger::new();
    for expected in 1u64..=10 {
        let outcome = ledger.anchor_root(fe(expected + 1000)).await.unwrap();
        assert_eq!(outcome.id().unwrap().get(), expected);
    }
}

#[tokio::test]
async fn anchoring_is_not_idempotent() {
    let ledger = MemoryLedger::new();
    let root = fe(77);

    let first = ledger.anchor_root(root).await.unwrap().id().unwrap();
    let second = ledger.anchor_root(root).await.unwrap().id().unwrap();
    assert_eq!(first.get(), 1);
    assert_eq!(second.get(), 2);

    // Both records verify independently.
    let proof = MembershipProof::empty();
    assert!(ledger.verify_leaf(first, root, &proof).await.unwrap());
    assert!(ledger.verify_leaf(second, root, &proof).await.unwrap());
}

#[tokio::test]
async fn reverse_lookup_is_last_writer_wins_forward_log_append_only() {
    let ledger = MemoryLedger::new();
    let repeated = fe(5);

    ledger.anchor_root(repeated).await.unwrap(); // id 1
    ledger.anchor_root(fe(6)).await.unwrap(); // id 2
    ledger.anchor_root(repeated).await.unwrap(); // id 3

    // Reverse lookup reflects only the most recent id.
    assert_eq!(ledger.root_to_id(repeated).await.unwrap(), Some(id(3)));

    // Earlier forward records are reachable by id and unchanged.
    assert_eq!(ledger.get_root(id(1)).await.unwrap(), Some(repeated));
    assert_eq!(ledger.get_root(id(2)).await.unwrap(), Some(fe(6)));
    assert_eq!(ledger.get_root(id(3)).await.unwrap(), Some(repeated));
}

#[tokio::test]
async fn zero_root_is_rejected_before_submission() {
    let ledger = MemoryLedger::new();
    assert!(matches!(
        ledger.anchor_root(FieldElement::zero()).await,
        Err(LedgerError::ZeroRoot)
    ));
    assert_eq!(ledger.anchored_count(), 0);
}

#[tokio::test]
async fn verification_requires_exact_root_equality() {
    let ledger = MemoryLedger::new();
    ledger.anchor_root(fe(123)).await.unwrap();

    let proof = MembershipProof::empty();
    assert!(ledger.verify_leaf(id(1), fe(123), &proof).await.unwrap());
    // Off by one in the leaf: no partial credit.
    assert!(!ledger.verify_leaf(id(1), fe(124), &proof).await.unwrap());
    // Unassigned id: fails closed, not an error.
    assert!(!ledger.verify_leaf(id(9), fe(123), &proof).await.unwrap());
}

#[tokio::test]
async fn deep_proofs_verify_against_an_anchored_batch_root() {
    // The ledger-side fold generalizes past the single-leaf case: anchor
    // the root of a five-leaf batch and verify every member through its
    // own proof.
    let batch: Vec<FieldElement> = (1..=5u64).map(|n| fe(n * 11)).collect();
    let tree = CommitmentTree::build(&batch).unwrap();

    let ledger = MemoryLedger::new();
    let outcome = ledger.anchor_root(tree.root()).await.unwrap();
    let root_id = outcome.id().unwrap();

    for (i, leaf) in batch.iter().enumerate() {
        let proof = tree.proof(i).unwrap();
        assert!(
            ledger.verify_leaf(root_id, *leaf, &proof).await.unwrap(),
            "leaf {i} did not verify"
        );
    }

    // A valid sibling path under the wrong index does not verify.
    let mut wrong = tree.proof(2).unwrap();
    wrong.index = 3;
    assert!(!ledger
        .verify_leaf(root_id, batch[2], &wrong)
        .await
        .unwrap());
}

#[tokio::test]
async fn timed_out_anchor_resolves_by_requery_not_retry() {
    let ledger = MemoryLedger::new();
    ledger.set_timeout_confirmations(true);

    let root = fe(42);
    let err = ledger.anchor_root(root).await.unwrap_err();
    assert!(matches!(err, LedgerError::ConfirmationTimeout { .. }));
    assert!(!err.is_retryable());

    // The prescribed recovery: query the reverse lookup first. Here the
    // transaction did land, so a blind retry would have duplicated it.
    ledger.set_timeout_confirmations(false);
    assert_eq!(ledger.root_to_id(root).await.unwrap(), Some(id(1)));
}
