use proptest::prelude::*;
use std::collections::BTreeSet;
use worktrack_core::prelude::*;
use worktrack_core::ItemIndex;
use worktrack_test_utils::{arb_flat_items, arb_parent_graph, deep_tree_items};

fn id_set(items: &[WorkItem]) -> BTreeSet<String> {
    items.iter().map(|i| i.id.clone()).collect()
}

proptest! {
    #[test]
    fn prop_build_is_pure_and_idempotent(items in arb_flat_items(40)) {
        let before = items.clone();
        let first = build_forest(&items);
        let second = build_forest(&items);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&items, &before);
    }

    #[test]
    fn prop_flatten_round_trips_ids(items in arb_flat_items(40)) {
        let flat = flatten(&build_forest(&items));

        prop_assert_eq!(flat.len(), items.len());
        prop_assert_eq!(id_set(&flat), id_set(&items));
    }

    #[test]
    fn prop_order_of_input_is_irrelevant_to_structure(items in arb_flat_items(30)) {
        let mut reversed = items.clone();
        reversed.reverse();

        let forward = flatten_with_depth(&build_forest(&items));
        let backward = flatten_with_depth(&build_forest(&reversed));

        let depth_of = |rows: &[DepthRow]| -> BTreeSet<(String, usize)> {
            rows.iter().map(|r| (r.item.id.clone(), r.depth)).collect()
        };
        prop_assert_eq!(depth_of(&forward), depth_of(&backward));
    }

    #[test]
    fn prop_siblings_sorted(items in arb_flat_items(40)) {
        fn check(nodes: &[WorkItem]) -> bool {
            nodes.windows(2).all(|w| w[0].sort_key() <= w[1].sort_key())
                && nodes.iter().all(|n| check(n.children()))
        }
        prop_assert!(check(&build_forest(&items)));
    }

    #[test]
    fn prop_child_depth_is_parent_plus_one(items in arb_flat_items(40)) {
        let rows = flatten_with_depth(&build_forest(&items));
        for (pos, row) in rows.iter().enumerate() {
            match row.item.parent().filter(|p| items.iter().any(|i| i.id == *p)) {
                Some(parent) => {
                    let parent_row = rows[..pos].iter().rev().find(|r| r.item.id == parent);
                    prop_assert!(parent_row.is_some());
                    prop_assert_eq!(parent_row.map(|r| r.depth + 1), Some(row.depth));
                }
                None => prop_assert_eq!(row.depth, 0),
            }
        }
    }

    #[test]
    fn prop_repair_places_each_id_once(items in arb_parent_graph(30)) {
        let rows = flatten_with_depth(&build_forest(&items));
        let ids: Vec<String> = rows.iter().map(|r| r.item.id.clone()).collect();
        let unique = id_set(&items);

        prop_assert_eq!(ids.len(), unique.len());
        prop_assert_eq!(ids.into_iter().collect::<BTreeSet<_>>(), unique);
    }

    #[test]
    fn prop_repair_only_keeps_declared_links(items in arb_parent_graph(30)) {
        let rows = flatten_with_depth(&build_forest(&items));
        for (pos, row) in rows.iter().enumerate() {
            if row.depth == 0 {
                continue;
            }
            let parent = rows[..pos].iter().rev().find(|r| r.depth + 1 == row.depth);
            prop_assert_eq!(parent.map(|r| r.item.id.as_str()), row.item.parent());
        }
    }

    #[test]
    fn prop_validation_agrees_with_repair(items in arb_parent_graph(30)) {
        let index = ItemIndex::new(&items);
        match validate_hierarchy(&items) {
            Ok(()) => {
                prop_assert!(index.is_acyclic());
                prop_assert_eq!(index.live().len(), items.len());
            }
            Err(HierarchyError::CycleDetected { ids }) => {
                prop_assert!(!index.is_acyclic());
                for &pos in index.promoted() {
                    prop_assert!(ids.contains(&items[pos].id));
                }
            }
            Err(_) => {}
        }
        if !index.is_acyclic() {
            prop_assert!(validate_hierarchy(&items).is_err());
        }
    }

    #[test]
    fn prop_acyclic_input_validates(items in arb_flat_items(40)) {
        prop_assert!(validate_hierarchy(&items).is_ok());
        prop_assert_eq!(try_build_forest(&items).ok(), Some(build_forest(&items)));
    }
}

#[test]
fn deep_tree_shape() {
    let forest = build_forest(&deep_tree_items());
    assert_eq!(forest.len(), 1);

    let rows: Vec<(String, usize)> = flatten_with_depth(&forest)
        .into_iter()
        .map(|r| (r.item.id, r.depth))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("root".to_string(), 0),
            ("a".to_string(), 1),
            ("b".to_string(), 1),
            ("b1".to_string(), 2),
            ("b2".to_string(), 2),
        ]
    );
}

#[test]
fn longer_cycle_hanging_off_nothing_is_recovered() {
    let items = vec![
        WorkItem::new("ok"),
        WorkItem::new("x").with_parent("z"),
        WorkItem::new("y").with_parent("x"),
        WorkItem::new("z").with_parent("y"),
    ];
    let forest = build_forest(&items);
    let flat = flatten(&forest);
    assert_eq!(flat.len(), 4);
    assert_eq!(id_set(&flat), id_set(&items));

    match try_build_forest(&items) {
        Err(HierarchyError::CycleDetected { ids }) => assert_eq!(ids, vec!["x", "y", "z"]),
        other => panic!("expected cycle error, got {other:?}"),
    }
}
