// ============================================================================
// spark-collection - An Ordered Collection for Rust
// ============================================================================
//
// An insertion-ordered map extended with array-style bulk operations:
// find, find_key, filter, sweep, some, every, map, reduce/fold, duplicate,
// concat and sort_by.
// ============================================================================

#[macro_use]
mod macros;

pub mod collections;
pub mod core;

pub use collections::{Collection, CollectionOps};
pub use crate::core::error::CollectionError;

// Iterator types handed out by Collection
pub use indexmap::map::{Drain, IntoIter, Iter, Keys, Values};

// =============================================================================
// TESTS
// =============================================================================
