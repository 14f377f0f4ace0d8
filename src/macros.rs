// ============================================================================
// spark-collection - Ergonomic Macros
// ============================================================================

/// Build a [`Collection`](crate::Collection) from `key => value` pairs.
///
/// Entries are set in the written order, so a repeated key keeps its first
/// position and takes its last value.
///
/// # Usage
///
/// ```rust
/// use spark_collection::{collection, Collection};
///
/// let empty: Collection<&str, i32> = collection! {};
/// assert!(empty.is_empty());
///
/// let c = collection! {
///     "a" => 3,
///     "b" => 1,
///     "a" => 4,
/// };
/// assert_eq!(c.keys().copied().collect::<Vec<_>>(), ["a", "b"]);
/// assert_eq!(c["a"], 4);
/// ```
#[macro_export]
macro_rules! collection {
    () => {
        $crate::Collection::new()
    };

    ($($key:expr => $value:expr),+ $(,)?) => {
        {
            let mut collection = $crate::Collection::new();
            $( collection.set($key, $value); )+
            collection
        }
    };
}
