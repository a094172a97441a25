//! Property-based tests for counting and overlap invariants

use keyset_core::prelude::*;
use keyset_core::{compute_overlap, reduce};
use proptest::prelude::*;
use std::collections::HashMap;

/// Small alphabet so generated streams share keys often
fn key_stream() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-f]{1,2}", 0..200)
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

async fn reduce_keys(keys: Vec<String>, capacity: usize) -> KeyFrequencies {
    let (tx, rx) = queue::bounded("prop", capacity).unwrap();
    tokio::spawn(async move {
        let mut result = Ok(());
        for key in keys {
            result = tx.send(key).await;
            if result.is_err() {
                break;
            }
        }
        tx.finish(result);
    });
    reduce(rx).await.unwrap()
}

proptest! {
    #[test]
    fn test_reduced_counts_match_stream(keys in key_stream(), capacity in 1usize..16) {
        let mut expected: HashMap<String, u64> = HashMap::new();
        for key in &keys {
            *expected.entry(key.clone()).or_default() += 1;
        }

        let frequencies = runtime().block_on(reduce_keys(keys.clone(), capacity));

        prop_assert_eq!(frequencies.record_count(), keys.len() as u64);
        prop_assert_eq!(frequencies.distinct_count(), expected.len() as u64);
        for (key, count) in &expected {
            prop_assert_eq!(frequencies.count(key), *count);
        }
    }

    #[test]
    fn test_overlap_symmetric(a in key_stream(), b in key_stream()) {
        let a: KeyFrequencies = a.into_iter().collect();
        let b: KeyFrequencies = b.into_iter().collect();

        prop_assert_eq!(compute_overlap(&a, &b), compute_overlap(&b, &a));
    }

    #[test]
    fn test_overlap_bounds(a in key_stream(), b in key_stream()) {
        let a: KeyFrequencies = a.into_iter().collect();
        let b: KeyFrequencies = b.into_iter().collect();
        let overlap = compute_overlap(&a, &b);

        prop_assert!(overlap.distinct <= a.distinct_count().min(b.distinct_count()));
        prop_assert!(overlap.distinct <= overlap.total);
        prop_assert!(overlap.total <= a.record_count().min(b.record_count()));
    }

    #[test]
    fn test_self_overlap_is_identity(a in key_stream()) {
        let a: KeyFrequencies = a.into_iter().collect();
        let overlap = compute_overlap(&a, &a);

        prop_assert_eq!(overlap.distinct, a.distinct_count());
        prop_assert_eq!(overlap.total, a.record_count());
    }

    #[test]
    fn test_orchestrator_matches_direct_computation(
        a in key_stream(),
        b in key_stream(),
        capacity in 1usize..8,
    ) {
        let expected_a: KeyFrequencies = a.iter().cloned().collect();
        let expected_b: KeyFrequencies = b.iter().cloned().collect();
        let expected = IntersectionResult::new(
            expected_a.statistics(),
            expected_b.statistics(),
            compute_overlap(&expected_a, &expected_b),
        );

        let result = runtime().block_on(async move {
            let (a_tx, a_rx) = queue::bounded("a", capacity).unwrap();
            let (b_tx, b_rx) = queue::bounded("b", capacity).unwrap();
            for (tx, keys) in [(a_tx, a), (b_tx, b)] {
                tokio::spawn(async move {
                    let mut result = Ok(());
                    for key in keys {
                        result = tx.send(key).await;
                        if result.is_err() {
                            break;
                        }
                    }
                    tx.finish(result);
                });
            }
            compute_intersection(Some(a_rx), Some(b_rx)).await
        });

        prop_assert_eq!(result.unwrap(), expected);
    }
}
