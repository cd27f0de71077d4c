use std::collections::{BTreeMap, BTreeSet};
use std::convert::Infallible;

use cfgbind_meta::{Accessibility, ConfigRecord, Namespace, QualifiedName};
use cfgbind_tree::NamespaceTree;
use proptest::prelude::*;

fn record_strategy() -> impl Strategy<Value = ConfigRecord> {
    (
        prop::collection::vec(prop::sample::select(vec!["a", "b", "c"]), 0..4),
        prop::sample::select(vec!["T", "U"]),
        "[a-z]{1,3}",
        prop::sample::select(vec![
            Accessibility::Private,
            Accessibility::PackageScoped,
            Accessibility::Public,
        ]),
    )
        .prop_map(|(segments, container, member, accessibility)| {
            let name = QualifiedName::new(Namespace::from_segments(segments), container, member);
            ConfigRecord::builder(name, accessibility, "String").build()
        })
}

/// Distinct records, plus the same records in a shuffled order.
fn records_strategy() -> impl Strategy<Value = (Vec<ConfigRecord>, Vec<ConfigRecord>)> {
    prop::collection::vec(record_strategy(), 0..24).prop_flat_map(|records| {
        let distinct: Vec<ConfigRecord> = records
            .into_iter()
            .map(|r| (r.name.origin(), r))
            .collect::<BTreeMap<_, _>>()
            .into_values()
            .collect();
        (Just(distinct.clone()), Just(distinct).prop_shuffle())
    })
}

fn compacted(records: &[ConfigRecord]) -> NamespaceTree {
    let mut tree = NamespaceTree::from_records(records.iter().cloned()).unwrap();
    tree.compact();
    tree
}

proptest! {
    #[test]
    fn test_every_record_held_exactly_once((records, _) in records_strategy()) {
        let tree = compacted(&records);

        let placements = tree.placements();
        prop_assert_eq!(placements.len(), records.len());

        let held: BTreeSet<String> = placements.iter().map(|(_, r)| r.name.origin()).collect();
        let inserted: BTreeSet<String> = records.iter().map(|r| r.name.origin()).collect();
        prop_assert_eq!(held, inserted);
    }

    #[test]
    fn test_records_land_where_accessibility_allows((records, _) in records_strategy()) {
        let tree = compacted(&records);
        let ancestor = tree.common_ancestor();

        for (namespace, record) in tree.placements() {
            if record.accessibility.is_relocatable() {
                prop_assert_eq!(&namespace, &ancestor);
            } else {
                prop_assert_eq!(&namespace, record.origin_namespace());
            }
        }
    }

    #[test]
    fn test_no_empty_branches_survive((records, _) in records_strategy()) {
        let tree = compacted(&records);
        let ancestor = tree.common_ancestor();
        let namespaces = tree.namespaces();

        for namespace in &namespaces {
            if namespace.is_root() || namespace == &ancestor {
                continue;
            }
            let prefix = format!("{}.", namespace.as_str());
            let has_children = namespaces.iter().any(|other| other.as_str().starts_with(&prefix));
            prop_assert!(
                has_children || !tree.records_at(namespace).is_empty(),
                "empty leaf {} left behind", namespace
            );
        }
    }

    #[test]
    fn test_compaction_is_idempotent((records, _) in records_strategy()) {
        let mut tree = compacted(&records);
        let once = tree.clone();

        let summary = tree.compact();
        prop_assert_eq!(summary.relocated, 0);
        prop_assert!(summary.pruned.is_empty());
        prop_assert_eq!(tree, once);
    }

    #[test]
    fn test_insertion_order_does_not_matter((records, shuffled) in records_strategy()) {
        let first = compacted(&records);
        let second = compacted(&shuffled);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.plan(), second.plan());
    }

    #[test]
    fn test_units_cover_records_without_pass_through((records, _) in records_strategy()) {
        let tree = compacted(&records);
        let plans = tree.plan();

        let mut emitted = 0;
        for plan in &plans {
            prop_assert!(!plan.records.is_empty() || plan.includes.len() >= 2);
            emitted += plan.records.len();
        }
        prop_assert_eq!(emitted, records.len());

        let traversal = tree.traverse(|_| Ok::<(), Infallible>(()));
        prop_assert!(traversal.outputs.len() <= 1);
        prop_assert_eq!(traversal.outputs.is_empty(), records.is_empty());
    }
}
