//! Property tests for classification and merge invariants over generated
//! network pairs.
//!
//! Pairs share a configurable number of labels; structure comes from
//! proptest-driven parent bitmasks (parents always precede children in
//! creation order, so each input is a DAG) and probabilities from a
//! deterministic LCG seeded by proptest, which keeps shrinking stable.

use std::collections::HashSet;

use bayfuse_core::{assignments, classify, merge, BayesNet};
use proptest::prelude::*;

fn lcg_unit(state: &mut u64) -> f64 {
    *state = state
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    ((*state >> 11) as f64) / ((u64::MAX >> 11) as f64)
}

/// Builds a finalized, validated network over `labels`, wiring each label's
/// parents from earlier labels according to its bitmask.
fn build_network(labels: &[String], masks: &[u8], seed: u64) -> BayesNet {
    let mut net = BayesNet::default();
    for label in labels {
        net.create_event(label.clone()).unwrap();
    }
    for (i, label) in labels.iter().enumerate() {
        for (j, parent) in labels.iter().enumerate().take(i.min(8)) {
            if masks[i] & (1u8 << j) != 0 {
                net.create_dependency(parent, label).unwrap();
            }
        }
    }
    net.finalize_structure().unwrap();

    let mut state = seed | 1;
    for label in labels {
        let arity = net.event(label).unwrap().parents().len();
        let rows: Vec<_> = assignments(arity).collect();
        let table = net.event_mut(label).unwrap().table_mut().unwrap();
        for row in rows {
            table.add_line(lcg_unit(&mut state), true, &row).unwrap();
        }
    }
    net.validate().unwrap();
    net
}

fn network_pair() -> impl Strategy<Value = (BayesNet, BayesNet)> {
    (
        0usize..=3,
        0usize..=3,
        0usize..=3,
        any::<u64>(),
        prop::collection::vec(any::<u8>(), 16),
    )
        .prop_map(|(shared, first_only, second_only, seed, masks)| {
            let shared_labels: Vec<String> = (0..shared).map(|i| format!("S{i}")).collect();
            let first_labels: Vec<String> = shared_labels
                .iter()
                .cloned()
                .chain((0..first_only).map(|i| format!("F{i}")))
                .collect();
            let second_labels: Vec<String> = (0..second_only)
                .map(|i| format!("G{i}"))
                .chain(shared_labels.iter().cloned())
                .collect();

            let first = build_network(&first_labels, &masks[..first_labels.len()], seed);
            let second = build_network(
                &second_labels,
                &masks[8..8 + second_labels.len()],
                seed ^ 0x9e37_79b9_7f4a_7c15,
            );
            (first, second)
        })
}

proptest! {
    #[test]
    fn classification_partitions_the_label_union((first, second) in network_pair()) {
        let sets = classify(&first, &second).unwrap();

        let union: HashSet<&str> = first.labels().chain(second.labels()).collect();
        let classified: HashSet<&str> = sets
            .internal
            .iter()
            .chain(sets.external.iter())
            .chain(sets.outside.iter())
            .map(String::as_str)
            .collect();

        prop_assert_eq!(&classified, &union);
        // Disjointness: no label is counted twice.
        prop_assert_eq!(
            sets.internal.len() + sets.external.len() + sets.outside.len(),
            union.len()
        );
        // Shared labels land in internal or external, never outside.
        for label in sets.outside.iter() {
            prop_assert!(first.contains(label) != second.contains(label));
        }
    }

    #[test]
    fn merged_network_validates_with_full_coverage((first, second) in network_pair()) {
        let merged = merge(&first, &second).unwrap();
        merged.validate().unwrap();

        for event in merged.events() {
            let table = event.table().unwrap();
            prop_assert_eq!(table.lines().len(), 1usize << event.parents().len());
            for line in table.lines() {
                let p = line.probability(true);
                prop_assert!((0.0..=1.0).contains(&p), "probability {} out of range", p);
                prop_assert_eq!(line.probability(true) + line.probability(false), 1.0);
            }
        }
    }

    #[test]
    fn merged_structure_obeys_the_per_class_rules((first, second) in network_pair()) {
        let sets = classify(&first, &second).unwrap();
        let merged = merge(&first, &second).unwrap();

        for label in sets.outside.iter() {
            let source = if first.contains(label) { &first } else { &second };
            prop_assert_eq!(
                merged.event(label).unwrap().parents(),
                source.event(label).unwrap().parents(),
                "outside '{}' must copy its sole source", label
            );
        }
        for label in sets.internal.iter() {
            let merged_parents = merged.event(label).unwrap().parents();
            let from_first = merged_parents == first.event(label).unwrap().parents();
            let from_second = merged_parents == second.event(label).unwrap().parents();
            prop_assert!(
                from_first || from_second,
                "internal '{}' must adopt exactly one source, got {:?}",
                label,
                merged_parents
            );
        }
        for label in sets.external.iter() {
            let union: HashSet<&str> = first
                .event(label)
                .unwrap()
                .parents()
                .iter()
                .chain(second.event(label).unwrap().parents().iter())
                .map(String::as_str)
                .collect();
            let merged_parents: HashSet<&str> = merged
                .event(label)
                .unwrap()
                .parents()
                .iter()
                .map(String::as_str)
                .collect();
            prop_assert_eq!(&merged_parents, &union, "external '{}' must union parents", label);
        }
    }

    #[test]
    fn merge_is_deterministic_and_pure((first, second) in network_pair()) {
        let first_before = first.clone();
        let second_before = second.clone();

        let once = merge(&first, &second).unwrap();
        let twice = merge(&first, &second).unwrap();

        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(&first, &first_before);
        prop_assert_eq!(&second, &second_before);
    }
}
