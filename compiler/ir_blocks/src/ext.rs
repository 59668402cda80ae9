//! Extension operations for stores layered on
//! [`BlockValueStore`](crate::BlockValueStore).
//!
//! Deferred fill lets a specialized store hand out a block id before the
//! block's content is known. It is kept out of the crate root: a wrapper
//! such as [`InstBlockStore`](crate::InstBlockStore) imports
//! `ir_blocks::ext::BlockStoreExt` on purpose and exposes only the pieces it
//! needs.

use crate::{BlockId, BlockStoreError};

/// Deferred-fill operations for specialized stores.
pub trait BlockStoreExt<I: BlockId> {
    /// Reserves an id bound to an empty block. Its content should be
    /// specified by calling [`set`](Self::set).
    fn add_default_value(&mut self) -> I;

    /// Reserves arena space for `len` elements without meaningful content.
    /// The block must be filled by [`set`](Self::set) before it is read.
    fn add_uninitialized(&mut self, len: usize) -> I;

    /// Sets the content of an empty or reserved block.
    ///
    /// The canonical empty block is rejected: once content is deduplicated
    /// under an id, that id's content is fixed.
    fn try_set(&mut self, id: I, content: &[I::Element]) -> Result<(), BlockStoreError>;

    /// Sets the content of an empty or reserved block.
    ///
    /// # Panics
    /// Panics if the block's content is already set, if the block is the
    /// canonical empty block, or if a reserved block is set with content of a
    /// different length.
    fn set(&mut self, id: I, content: &[I::Element]) {
        self.try_set(id, content).unwrap_or_else(|e| panic!("{e}"));
    }
}
