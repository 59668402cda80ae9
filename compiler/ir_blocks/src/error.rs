//! Block store errors.

/// A violated block store precondition.
///
/// The panicking operations report these through their message; the `try_`
/// variants return them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlockStoreError {
    /// `set` on a block whose content is already established.
    #[error("block content set more than once: {block}")]
    AlreadySet { block: String },

    /// `set` on a reserved block with content of the wrong length.
    #[error("block {block} reserved for {expected} elements, set with {found}")]
    LengthMismatch {
        block: String,
        expected: usize,
        found: usize,
    },

    /// `set` on an empty block that is the canonical block for empty
    /// content; filling it would break content deduplication.
    #[error("cannot set content of canonical block {block}")]
    Canonical { block: String },

    /// `set` on a sentinel id that is never backed by storage.
    #[error("cannot set content of sentinel block {block}")]
    Sentinel { block: String },
}
