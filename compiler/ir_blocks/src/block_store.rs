//! Block-based value store with slab allocation and canonicalization.
//!
//! Block contents are copied into a caller-owned [`Bump`] arena, so a block
//! never moves once its content is established, no matter how many blocks are
//! added afterwards. The id store only records the arena slice for each id.
//!
//! # Canonical blocks
//!
//! [`BlockValueStore::add_canonical`] deduplicates by content: equal content
//! always yields the same id. The [`CanonicalIndex`] keys on block ids and
//! compares content through the store, so the probe runs against the
//! caller's buffer and a copy is made only on a genuine miss.
//!
//! # Extension operations
//!
//! Deferred-fill operations live on [`BlockStoreExt`], which is only
//! reachable through [`crate::ext`]. Specialized stores (see
//! [`InstBlockStore`](crate::InstBlockStore)) hold a `BlockValueStore` and
//! import the trait; plain users never need it.

use std::fmt;

use bumpalo::Bump;
use ir_base::{hash_content, OutputMapping, OutputScalar, OutputYaml, ValueStore, DEFAULT_SEED};
use tracing::trace;

use crate::canonical::{CanonicalIndex, Entry};
use crate::ext::BlockStoreExt;
use crate::{BlockId, BlockStoreError};

/// Storage state of one block.
enum Block<'arena, E> {
    /// Established content, or empty content awaiting a one-time `set`.
    Filled(&'arena mut [E]),
    /// Arena slots reserved by `add_uninitialized`; content not yet set.
    Reserved(&'arena mut [E]),
}

impl<E> Block<'_, E> {
    fn as_slice(&self) -> &[E] {
        match self {
            Block::Filled(data) | Block::Reserved(data) => &**data,
        }
    }

    fn as_mut_slice(&mut self) -> &mut [E] {
        match self {
            Block::Filled(data) | Block::Reserved(data) => &mut **data,
        }
    }
}

impl<E> Default for Block<'_, E> {
    fn default() -> Self {
        Block::Filled(Default::default())
    }
}

/// Block-based value store.
///
/// Lives exactly as long as its arena; dropping the arena releases every
/// block at once. All operations take `&mut self` or `&self`: the store is
/// meant to be owned by one compilation context.
pub struct BlockValueStore<'arena, I: BlockId> {
    arena: &'arena Bump,
    values: ValueStore<I, Block<'arena, I::Element>>,
    canonical: CanonicalIndex<I>,
}

impl<'arena, I: BlockId> BlockValueStore<'arena, I> {
    /// Create an empty store allocating from `arena`.
    pub fn new(arena: &'arena Bump) -> Self {
        Self {
            arena,
            values: ValueStore::new(),
            canonical: CanonicalIndex::new(),
        }
    }

    /// Create an empty store with room for `blocks` ids and canonical entries.
    pub fn with_capacity(arena: &'arena Bump, blocks: usize) -> Self {
        Self {
            arena,
            values: ValueStore::with_capacity(blocks),
            canonical: CanonicalIndex::with_capacity(blocks),
        }
    }

    /// Adds a block with the given content, returning an id to reference it.
    ///
    /// Always allocates; use [`add_canonical`](Self::add_canonical) to reuse
    /// an existing block with equal content.
    pub fn add(&mut self, content: &[I::Element]) -> I {
        let id = Self::allocate(self.arena, &mut self.values, content);
        trace!(block = %id, len = content.len(), "added block");
        id
    }

    /// Returns the requested block.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this store.
    #[inline]
    pub fn get(&self, id: I) -> &[I::Element] {
        self.values.get(id).as_slice()
    }

    /// Returns the requested block, mutably.
    ///
    /// Blocks that have been made canonical must not be modified: the index
    /// would keep them under their old content.
    #[inline]
    pub fn get_mut(&mut self, id: I) -> &mut [I::Element] {
        self.values.get_mut(id).as_mut_slice()
    }

    /// Adds a block or finds an existing canonical block with the given
    /// content, and returns an id to reference it.
    pub fn add_canonical(&mut self, content: &[I::Element]) -> I {
        let hash = hash_content(DEFAULT_SEED, content);
        let values = &self.values;
        match self
            .canonical
            .entry(hash, |id| values.get(id).as_slice() == content)
        {
            Entry::Occupied(id) => {
                trace!(block = %id, "reused canonical block");
                id
            }
            Entry::Vacant(vacant) => {
                let id = Self::allocate(self.arena, &mut self.values, content);
                vacant.insert(id);
                trace!(block = %id, len = content.len(), "added canonical block");
                id
            }
        }
    }

    /// Promotes an existing block to canonical, or returns the id of the
    /// canonical block that already has the same content.
    ///
    /// The returned id may differ from `id`. The content of `id` must not be
    /// modified after this call.
    pub fn make_canonical(&mut self, id: I) -> I {
        let block = self.values.get(id);
        debug_assert!(
            !matches!(block, Block::Reserved(_)),
            "{id} is reserved and has no content to canonicalize"
        );
        let content = block.as_slice();
        let hash = hash_content(DEFAULT_SEED, content);
        let values = &self.values;
        match self
            .canonical
            .entry(hash, |other| values.get(other).as_slice() == content)
        {
            Entry::Occupied(existing) => {
                trace!(block = %id, canonical = %existing, "block already canonical");
                existing
            }
            Entry::Vacant(vacant) => {
                vacant.insert(id);
                trace!(block = %id, "promoted block to canonical");
                id
            }
        }
    }

    /// Number of blocks issued, canonical or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of distinct canonical contents.
    pub fn canonical_len(&self) -> usize {
        self.canonical.len()
    }

    /// All block ids, in allocation order.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = I> + '_ {
        self.values.ids()
    }

    /// Whether `id` is the canonical block for empty content.
    fn is_canonical_empty(&self, id: I) -> bool {
        let empty: &[I::Element] = &[];
        self.get(id).is_empty()
            && self
                .canonical
                .find(hash_content(DEFAULT_SEED, empty), |other| other == id)
                .is_some()
    }

    fn allocate(
        arena: &'arena Bump,
        values: &mut ValueStore<I, Block<'arena, I::Element>>,
        content: &[I::Element],
    ) -> I {
        values.add(Block::Filled(arena.alloc_slice_copy(content)))
    }
}

impl<I: BlockId> BlockStoreExt<I> for BlockValueStore<'_, I> {
    fn add_default_value(&mut self) -> I {
        let id = self.values.add_default_value();
        trace!(block = %id, "reserved empty block");
        id
    }

    fn add_uninitialized(&mut self, len: usize) -> I {
        let data = self.arena.alloc_slice_fill_default(len);
        let id = self.values.add(Block::Reserved(data));
        trace!(block = %id, len, "reserved uninitialized block");
        id
    }

    fn try_set(&mut self, id: I, content: &[I::Element]) -> Result<(), BlockStoreError> {
        if self.is_canonical_empty(id) {
            return Err(BlockStoreError::Canonical {
                block: id.to_string(),
            });
        }
        let slot = self.values.get_mut(id);
        match std::mem::take(slot) {
            Block::Reserved(data) => {
                if data.len() != content.len() {
                    let expected = data.len();
                    *slot = Block::Reserved(data);
                    return Err(BlockStoreError::LengthMismatch {
                        block: id.to_string(),
                        expected,
                        found: content.len(),
                    });
                }
                // The arena slot was fixed at reservation; fill it in place.
                data.copy_from_slice(content);
                *slot = Block::Filled(data);
            }
            Block::Filled(data) if data.is_empty() => {
                *slot = Block::Filled(self.arena.alloc_slice_copy(content));
            }
            Block::Filled(data) => {
                *slot = Block::Filled(data);
                return Err(BlockStoreError::AlreadySet {
                    block: id.to_string(),
                });
            }
        }
        trace!(block = %id, len = content.len(), "set block content");
        Ok(())
    }
}

impl<I: BlockId> OutputYaml for BlockValueStore<'_, I> {
    fn output_yaml(&self) -> OutputMapping {
        OutputMapping::build(|map| {
            for (id, block) in self.values.iter() {
                map.add(
                    id.to_string(),
                    OutputMapping::build(|elements| {
                        for (position, element) in block.as_slice().iter().enumerate() {
                            elements.add(position.to_string(), OutputScalar::new(element));
                        }
                    }),
                );
            }
        })
    }
}

impl<I: BlockId> fmt::Debug for BlockValueStore<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockValueStore")
            .field("blocks", &self.values.len())
            .field("canonical", &self.canonical.len())
            .finish_non_exhaustive()
    }
}
