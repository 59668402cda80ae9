//! IR Blocks - block-based value storage for compiler IR
//!
//! A block is a fixed-length sequence of IR elements (instruction ids, type
//! ids, ...) stored in a bump arena and referenced by a `u32` block id.
//!
//! - `BlockValueStore` allocates blocks and canonicalizes them by content
//! - `CanonicalIndex` is the content-addressed table behind canonicalization
//! - `ext::BlockStoreExt` holds the deferred-fill operations for layered stores
//! - `InstBlockStore` is the instruction-block store built on top
//!
//! # Lifetimes
//!
//! Stores borrow their arena for `'arena`. Block ids stay valid for the life
//! of the store and block contents never move, so a compilation context can
//! keep ids in its own tables freely.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use ir_blocks::{InstBlockStore, InstId};
//!
//! let arena = Bump::new();
//! let mut blocks = InstBlockStore::new(&arena);
//!
//! let body = [InstId::new(0), InstId::new(1)];
//! let a = blocks.add_canonical(&body);
//! let b = blocks.add_canonical(&body.to_vec());
//! assert_eq!(a, b);
//! assert_eq!(blocks.get(a), &body);
//! ```

mod block_store;
pub mod canonical;
mod error;
pub mod ext;
mod ids;
mod inst_block;

#[cfg(test)]
mod test_helpers;

pub use block_store::BlockValueStore;
pub use canonical::CanonicalIndex;
pub use error::BlockStoreError;
pub use ids::{BlockId, InstBlockId, InstId, TypeBlockId, TypeId};
pub use inst_block::{InstBlockStore, TypeBlockStore};
