// ============================================================================
// spark-collection - Core Module
// Error types shared by the collection operations
// ============================================================================

pub mod error;

pub use error::CollectionError;
