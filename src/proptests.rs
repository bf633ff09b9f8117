use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::BTreeMap;

fn key_strategy() -> impl Strategy<Value = Vec<u8>> {
    // A tiny alphabet keeps collisions, shared prefixes and repeated keys frequent.
    prop_oneof![
        4 => prop::collection::vec(prop::sample::select(b"abc".to_vec()), 0..=6),
        1 => prop::collection::vec(any::<u8>(), 0..=4),
    ]
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 5)]
    Insert(#[proptest(strategy = "key_strategy()")] Vec<u8>, u16),
    #[proptest(weight = 3)]
    Remove(#[proptest(strategy = "key_strategy()")] Vec<u8>),
    #[proptest(weight = 2)]
    Get(#[proptest(strategy = "key_strategy()")] Vec<u8>),
}

fn validate_tree<V>(t: &TrieNode<V>, model_len: usize) {
    let issues = t.verify();
    assert!(issues.is_empty(), "structural issues: {issues:?}");
    assert_eq!(t.len(), model_len, "stored key count must match model");
    assert_eq!(
        t.is_empty(),
        model_len == 0,
        "root emptiness must follow the model"
    );
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in prop::collection::vec(any::<Op>(), 0..=500)) {
        let mut t: TrieNode<u16> = TrieNode::new();
        let mut m: BTreeMap<Vec<u8>, u16> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    t.insert(&key, Some(value));
                    m.insert(key.clone(), value);
                    prop_assert_eq!(t.get(&key), Some(&value));
                }
                Op::Remove(key) => {
                    t.remove(&key);
                    m.remove(&key);
                    prop_assert_eq!(t.get(&key), None);
                }
                Op::Get(key) => {
                    prop_assert_eq!(t.get(&key), m.get(&key));
                }
            }
        }

        validate_tree(&t, m.len());
        for (key, value) in &m {
            prop_assert_eq!(t.get(key), Some(value));
        }
    }

    #[test]
    fn prop_remove_everything_leaves_empty_root(
        keys in prop::collection::vec(key_strategy(), 0..=200),
    ) {
        let mut t: TrieNode<usize> = TrieNode::new();
        for (i, key) in keys.iter().enumerate() {
            t.insert(key, Some(i));
        }
        for key in &keys {
            t.remove(key);
        }
        prop_assert!(t.is_empty());
        validate_tree(&t, 0);
    }

    #[test]
    fn prop_remove_spares_other_keys(
        keys in prop::collection::btree_set(key_strategy(), 1..=100),
        victim in any::<prop::sample::Index>(),
    ) {
        let keys: Vec<Vec<u8>> = keys.into_iter().collect();
        let victim = victim.get(&keys).clone();

        let mut t: TrieNode<usize> = TrieNode::new();
        for (i, key) in keys.iter().enumerate() {
            t.insert(key, Some(i));
        }
        t.remove(&victim);

        prop_assert_eq!(t.get(&victim), None);
        for (i, key) in keys.iter().enumerate() {
            if *key != victim {
                prop_assert_eq!(t.get(key), Some(&i));
            }
        }
        validate_tree(&t, keys.len() - 1);
    }

    #[test]
    fn prop_diverging_pair_branch_depth(
        prefix in prop::collection::vec(any::<u8>(), 0..=16),
        left in any::<u8>(),
        right in any::<u8>(),
    ) {
        prop_assume!(left != right);
        let mut a = prefix.clone();
        a.push(left);
        let mut b = prefix.clone();
        b.push(right);

        let mut t: TrieNode<u8> = TrieNode::new();
        t.insert(&a, Some(1));
        t.insert(&b, Some(2));

        let stats = t.stats();
        prop_assert_eq!(stats.branches, prefix.len());
        prop_assert_eq!(stats.max_depth, prefix.len());
        prop_assert_eq!(stats.leaves, 2);
    }

    #[test]
    fn prop_registry_stores_are_isolated(
        ops in prop::collection::vec((any::<bool>(), any::<Op>()), 0..=200),
    ) {
        let mut r: StoreRegistry<u16> = StoreRegistry::new();
        r.create_store("left").unwrap();
        r.create_store("right").unwrap();
        let mut models: [BTreeMap<Vec<u8>, u16>; 2] = Default::default();

        for (right, op) in ops {
            let (store, model) = if right {
                ("right", &mut models[1])
            } else {
                ("left", &mut models[0])
            };
            match op {
                Op::Insert(key, value) => {
                    r.insert(store, &key, Some(value)).unwrap();
                    model.insert(key, value);
                }
                Op::Remove(key) => {
                    r.remove(store, &key).unwrap();
                    model.remove(&key);
                }
                Op::Get(key) => {
                    prop_assert_eq!(r.lookup(store, &key).unwrap(), model.get(&key));
                    prop_assert_eq!(r.exists(store, &key).unwrap(), model.contains_key(&key));
                }
            }
        }

        validate_tree(r.resolve("left").unwrap(), models[0].len());
        validate_tree(r.resolve("right").unwrap(), models[1].len());
    }
}
