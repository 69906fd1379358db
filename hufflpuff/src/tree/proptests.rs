use super::Tree;
use crate::bits_to_string;
use crate::Symbol;

use proptest::prelude::*;
use std::collections::HashMap;

fn assert_prefix_free(tree: &Tree) {
    let mut codes: Vec<String> = tree.code_table().into_iter().map(|(_, code)| code).collect();
    if !tree.is_empty() {
        codes.push(bits_to_string(&tree.path_to_nyt()));
    }
    codes.sort();
    for pair in codes.windows(2) {
        assert!(
            !pair[1].starts_with(pair[0].as_str()),
            "{} is a prefix of {}",
            pair[0],
            pair[1]
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn invariants_hold_after_every_update(symbols in prop::collection::vec(0u32..40, 0..400)) {
        let mut tree = Tree::new(40);
        let mut counts: HashMap<Symbol, u64> = HashMap::new();
        for (processed, &symbol) in symbols.iter().enumerate() {
            tree.encode_update(symbol).unwrap();
            *counts.entry(symbol).or_default() += 1;
            prop_assert_eq!(tree.check_invariants(), Ok(()));
            prop_assert_eq!(tree.total_weight(), processed as u64 + 1);
        }
        prop_assert_eq!(tree.num_symbols(), counts.len());
        prop_assert_eq!(tree.num_nodes(), 2 * counts.len() + 1);
        for (&symbol, &count) in &counts {
            let leaf = tree.leaf_for(symbol).unwrap();
            prop_assert_eq!(tree.get_node(leaf).weight(), count);
        }
        assert_prefix_free(&tree);
    }

    #[test]
    fn snapshot_is_pure(symbols in prop::collection::vec(any::<u8>(), 0..200)) {
        let mut tree = Tree::default();
        for &symbol in &symbols {
            tree.encode_update(symbol as Symbol).unwrap();
        }
        let first = tree.snapshot();
        let second = tree.snapshot();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.nodes.len(), tree.num_nodes());
        prop_assert_eq!(first.nodes.iter().filter(|record| record.is_nyt).count(), 1);
    }

    #[test]
    fn codes_walk_back_to_their_leaf(symbols in prop::collection::vec(0u32..1000, 1..300)) {
        let mut tree = Tree::new(1000);
        for &symbol in &symbols {
            tree.encode_update(symbol).unwrap();
        }
        for (symbol, code) in tree.codes() {
            let mut node = tree.root();
            for bit in code.iter().by_vals() {
                node = tree.get_node(node).child(bit).unwrap();
            }
            prop_assert_eq!(tree.get_node(node).symbol(), Some(symbol));
        }
        let mut node = tree.root();
        for bit in tree.path_to_nyt().iter().by_vals() {
            node = tree.get_node(node).child(bit).unwrap();
        }
        prop_assert!(tree.get_node(node).is_nyt());
    }
}
