//! Property-based tests for block storage.
//!
//! These check the store-level guarantees over random contents:
//! 1. Round-trip: every block reads back exactly as added
//! 2. Canonical identity: equal content shares one id, distinct content never does
//! 3. Accounting: only genuine canonical misses grow the store

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::collections::HashMap;

use bumpalo::Bump;
use ir_blocks::ext::BlockStoreExt;
use ir_blocks::{InstBlockId, InstId, TypeBlockId, TypeBlockStore, TypeId};
use ir_blocks::{BlockValueStore, InstBlockStore};
use proptest::prelude::*;

/// Short blocks over a small alphabet so duplicates are common.
fn content_strategy() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..4, 0..5)
}

fn to_types(raw: &[u32]) -> Vec<TypeId> {
    raw.iter().copied().map(TypeId::new).collect()
}

proptest! {
    #[test]
    fn add_round_trips(contents in prop::collection::vec(content_strategy(), 0..50)) {
        let arena = Bump::new();
        let mut store = TypeBlockStore::new(&arena);

        let ids: Vec<_> = contents.iter().map(|c| store.add(&to_types(c))).collect();

        prop_assert_eq!(store.len(), contents.len());
        for (id, content) in ids.iter().zip(&contents) {
            let expected = to_types(content);
            prop_assert_eq!(store.get(*id), expected.as_slice());
        }
    }

    #[test]
    fn canonical_ids_match_content_equality(
        contents in prop::collection::vec(content_strategy(), 0..80)
    ) {
        let arena = Bump::new();
        let mut store = TypeBlockStore::new(&arena);
        let mut expected: HashMap<Vec<u32>, TypeBlockId> = HashMap::new();

        for content in &contents {
            let before = store.len();
            let id = store.add_canonical(&to_types(content));
            match expected.get(content) {
                Some(&known) => {
                    prop_assert_eq!(id, known);
                    prop_assert_eq!(store.len(), before);
                }
                None => {
                    prop_assert!(expected.values().all(|&other| other != id));
                    prop_assert_eq!(store.len(), before + 1);
                    expected.insert(content.clone(), id);
                }
            }
        }
        prop_assert_eq!(store.canonical_len(), expected.len());
    }

    #[test]
    fn make_canonical_agrees_with_add_canonical(
        contents in prop::collection::vec(content_strategy(), 1..40)
    ) {
        let arena = Bump::new();
        let mut store = TypeBlockStore::new(&arena);

        for content in &contents {
            let types = to_types(content);
            let plain = store.add(&types);
            let before = store.len();
            let canonical = store.make_canonical(plain);
            prop_assert_eq!(store.len(), before);
            prop_assert_eq!(store.add_canonical(&types), canonical);
            prop_assert_eq!(store.get(canonical), types.as_slice());
        }
    }

    #[test]
    fn reserved_blocks_fill_once(lengths in prop::collection::vec(0usize..6, 1..20)) {
        let arena = Bump::new();
        let mut store = InstBlockStore::new(&arena);

        let reserved: Vec<_> = lengths.iter().map(|&len| (store.reserve(len), len)).collect();
        for &(id, len) in &reserved {
            let content: Vec<_> = (0..len).map(|n| InstId::new(n as u32)).collect();
            store.set(id, &content);
            prop_assert_eq!(store.get(id), content.as_slice());
            if len > 0 {
                prop_assert!(store.try_set(id, &content).is_err());
            }
        }
        prop_assert_eq!(store.len(), InstBlockId::RESERVED_COUNT + lengths.len());
    }
}

#[test]
fn extension_trait_is_usable_on_plain_stores() {
    let arena = Bump::new();
    let mut store: BlockValueStore<'_, TypeBlockId> = BlockValueStore::new(&arena);

    let id = store.add_uninitialized(1);
    store.set(id, &[TypeId::new(9)]);
    assert_eq!(store.get(id), &[TypeId::new(9)]);
}
