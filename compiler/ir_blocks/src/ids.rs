//! Block and element identifiers.
//!
//! A block id names one block; [`BlockId::Element`] is what the block holds.
//! Instruction blocks hold [`InstId`]s, type blocks hold [`TypeId`]s.

use std::fmt;
use std::hash::Hash;

use ir_base::{define_id, IdBase};

/// An id that names a block of elements.
///
/// Elements are `Copy`: blocks live in a bump arena that never runs
/// destructors, so an element must not own resources.
pub trait BlockId: IdBase {
    type Element: Copy + Eq + Hash + Default + fmt::Debug + fmt::Display;
}

define_id! {
    /// An instruction in the IR.
    pub struct InstId, "inst";
}

define_id! {
    /// A type in the IR.
    pub struct TypeId, "type";
}

define_id! {
    /// A block of instructions.
    pub struct InstBlockId, "inst_block";
}

define_id! {
    /// A block of types, typically canonical (parameter lists, tuple fields).
    pub struct TypeBlockId, "type_block";
}

impl InstBlockId {
    /// The canonical empty block.
    pub const EMPTY: Self = Self::new(0);
    /// Declarations exported from the file.
    pub const EXPORTS: Self = Self::new(1);
    /// Instructions referring to imported entities.
    pub const IMPORT_REFS: Self = Self::new(2);
    /// Global initialization code.
    pub const GLOBAL_INIT: Self = Self::new(3);
    /// Marks code that can never execute. Never backed by storage.
    pub const UNREACHABLE: Self = Self::new(u32::MAX - 1);

    /// Number of blocks reserved at store creation.
    pub const RESERVED_COUNT: usize = 4;
}

impl BlockId for InstBlockId {
    type Element = InstId;
}

impl BlockId for TypeBlockId {
    type Element = TypeId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_blocks_are_valid_and_dense() {
        let reserved = [
            InstBlockId::EMPTY,
            InstBlockId::EXPORTS,
            InstBlockId::IMPORT_REFS,
            InstBlockId::GLOBAL_INIT,
        ];
        for (index, id) in reserved.into_iter().enumerate() {
            assert!(IdBase::is_valid(id));
            assert_eq!(id.index(), index);
        }
        assert_eq!(reserved.len(), InstBlockId::RESERVED_COUNT);
    }

    #[test]
    fn unreachable_is_a_sentinel() {
        assert!(!IdBase::is_valid(InstBlockId::UNREACHABLE));
        assert_ne!(InstBlockId::UNREACHABLE, InstBlockId::INVALID);
    }

    #[test]
    fn display_labels() {
        assert_eq!(InstId::new(12).to_string(), "inst12");
        assert_eq!(InstBlockId::new(3).to_string(), "inst_block3");
        assert_eq!(TypeBlockId::new(0).to_string(), "type_block0");
    }
}
