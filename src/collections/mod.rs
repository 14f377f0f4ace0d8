// ============================================================================
// spark-collection - Collections
// The ordered Collection and the bulk operations layered on top of it
// ============================================================================
//
// Collection is the storage: an insertion-ordered map with the usual
// get/set/delete/has/clear/len primitives.
//
// CollectionOps is the behaviour: find, filter, sweep, map, reduce, concat,
// sort and friends, all written against the primitives plus a species hook
// that decides what type derived collections are built as.
// ============================================================================

mod map;
mod ops;

pub use map::Collection;
pub use ops::CollectionOps;
