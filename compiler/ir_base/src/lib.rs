//! IR Base - storage collaborators for compiler IR stores
//!
//! This crate holds the pieces the block store builds on:
//! - `IdBase` and `define_id!` for dense `u32` identifiers
//! - `ValueStore` for sequential id allocation
//! - `hash_content` for content-addressed tables
//! - `OutputMapping` for structured debug dumps
//!
//! # Design Philosophy
//!
//! - **Ids, not references**: stores hand out `Copy` ids; borrows of stored
//!   data never outlive a call.
//! - **No per-value teardown**: stores are dropped in bulk.

mod hashing;
mod id;
mod value_store;
pub mod yaml;

pub use hashing::{hash_content, DEFAULT_SEED};
pub use id::IdBase;
pub use value_store::{ValueStore, ValueStoreError};
pub use yaml::{OutputMapping, OutputScalar, OutputYaml, YamlValue};
