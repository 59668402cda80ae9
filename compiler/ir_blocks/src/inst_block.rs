//! Instruction block storage.
//!
//! [`InstBlockStore`] layers the well-known instruction blocks on top of a
//! [`BlockValueStore`]: every store starts with the canonical empty block
//! and placeholders for the exports, import references and global
//! initialization blocks, so those ids are fixed constants on
//! [`InstBlockId`].

use bumpalo::Bump;
use ir_base::{IdBase, OutputMapping, OutputYaml};

use crate::ext::BlockStoreExt;
use crate::{BlockStoreError, BlockValueStore, InstBlockId, InstId, TypeBlockId};

/// Canonical blocks of types, e.g. parameter type lists.
pub type TypeBlockStore<'arena> = BlockValueStore<'arena, TypeBlockId>;

/// Storage for instruction blocks.
pub struct InstBlockStore<'arena> {
    blocks: BlockValueStore<'arena, InstBlockId>,
}

impl<'arena> InstBlockStore<'arena> {
    /// Create a store with the reserved blocks in place.
    pub fn new(arena: &'arena Bump) -> Self {
        let mut blocks = BlockValueStore::new(arena);
        let empty = blocks.add_canonical(&[]);
        let exports = blocks.add_default_value();
        let import_refs = blocks.add_default_value();
        let global_init = blocks.add_default_value();
        debug_assert_eq!(
            [empty, exports, import_refs, global_init],
            [
                InstBlockId::EMPTY,
                InstBlockId::EXPORTS,
                InstBlockId::IMPORT_REFS,
                InstBlockId::GLOBAL_INIT,
            ],
            "reserved instruction blocks must occupy their fixed ids"
        );
        Self { blocks }
    }

    /// Adds a block with the given instructions.
    pub fn add(&mut self, content: &[InstId]) -> InstBlockId {
        self.blocks.add(content)
    }

    /// Adds or finds a canonical block with the given instructions.
    ///
    /// Empty content always yields [`InstBlockId::EMPTY`].
    pub fn add_canonical(&mut self, content: &[InstId]) -> InstBlockId {
        self.blocks.add_canonical(content)
    }

    /// Promotes an existing block to canonical.
    pub fn make_canonical(&mut self, id: InstBlockId) -> InstBlockId {
        self.blocks.make_canonical(id)
    }

    /// Reserves a block whose instructions are set later with [`set`](Self::set).
    pub fn add_placeholder(&mut self) -> InstBlockId {
        self.blocks.add_default_value()
    }

    /// Reserves a block of exactly `len` instructions, filled later with
    /// [`set`](Self::set).
    pub fn reserve(&mut self, len: usize) -> InstBlockId {
        self.blocks.add_uninitialized(len)
    }

    /// Sets the instructions of a placeholder or reserved block.
    ///
    /// Sentinels and [`InstBlockId::EMPTY`] are rejected.
    pub fn try_set(&mut self, id: InstBlockId, content: &[InstId]) -> Result<(), BlockStoreError> {
        if !id.is_valid() {
            let block = if id == InstBlockId::UNREACHABLE {
                "unreachable".to_string()
            } else {
                id.to_string()
            };
            return Err(BlockStoreError::Sentinel { block });
        }
        self.blocks.try_set(id, content)
    }

    /// Sets the instructions of a placeholder or reserved block.
    ///
    /// # Panics
    /// Panics on a sentinel id, on [`InstBlockId::EMPTY`], or if the block's
    /// content is already set.
    pub fn set(&mut self, id: InstBlockId, content: &[InstId]) {
        self.try_set(id, content).unwrap_or_else(|e| panic!("{e}"));
    }

    pub fn get(&self, id: InstBlockId) -> &[InstId] {
        self.blocks.get(id)
    }

    pub fn get_mut(&mut self, id: InstBlockId) -> &mut [InstId] {
        self.blocks.get_mut(id)
    }

    /// Returns the block, or an empty slice for `INVALID` and `UNREACHABLE`.
    pub fn get_or_empty(&self, id: InstBlockId) -> &[InstId] {
        if id.is_valid() {
            self.blocks.get(id)
        } else {
            &[]
        }
    }

    /// Number of blocks, including the reserved ones.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always `false`: the reserved blocks exist from construction.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl OutputYaml for InstBlockStore<'_> {
    fn output_yaml(&self) -> OutputMapping {
        self.blocks.output_yaml()
    }
}
