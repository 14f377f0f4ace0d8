// ============================================================================
// spark-collection - Collection
// An insertion-ordered map backed by IndexMap
// ============================================================================

use std::borrow::Borrow;
use std::hash::Hash;
use std::ops::Index;

use indexmap::IndexMap;
use indexmap::map::{Drain, IntoIter, Iter, Keys, Values};

// =============================================================================
// COLLECTION
// =============================================================================

/// An insertion-ordered map with unique keys.
///
/// Ordering rules:
/// 1. Iteration follows insertion order
/// 2. Setting an existing key replaces its value in place
/// 3. Deleting a key and setting it again moves it to the end
///
/// The bulk operations (`find`, `filter`, `sweep`, `map`, `reduce`,
/// `concat`, `sort_by`, ...) come from [`CollectionOps`](crate::CollectionOps).
///
/// # Example
///
/// ```
/// use spark_collection::Collection;
///
/// let mut scores: Collection<&str, i32> = Collection::new();
///
/// scores.set("alice", 25);
/// scores.set("bob", 30);
/// scores.set("alice", 40);
///
/// assert_eq!(scores.get("alice"), Some(&40));
/// assert_eq!(scores.keys().copied().collect::<Vec<_>>(), ["alice", "bob"]);
///
/// scores.delete("alice");
/// scores.set("alice", 1);
/// assert_eq!(scores.keys().copied().collect::<Vec<_>>(), ["bob", "alice"]);
/// ```
#[derive(Clone)]
pub struct Collection<K, V> {
    data: IndexMap<K, V>,
}

impl<K, V> Collection<K, V> {
    /// Create a new empty collection.
    pub fn new() -> Self {
        Self {
            data: IndexMap::new(),
        }
    }

    /// Create an empty collection with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: IndexMap::with_capacity(capacity),
        }
    }

    // =========================================================================
    // SIZE
    // =========================================================================

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the collection holds no entries.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // =========================================================================
    // ITERATION (insertion order)
    // =========================================================================

    /// Returns an iterator over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.data.iter()
    }

    /// Returns an iterator over the keys in insertion order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        self.data.keys()
    }

    /// Returns an iterator over the values in insertion order.
    pub fn values(&self) -> Values<'_, K, V> {
        self.data.values()
    }

    // =========================================================================
    // CLEAR
    // =========================================================================

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl<K, V> Collection<K, V>
where
    K: Hash + Eq,
{
    // =========================================================================
    // HAS / GET
    // =========================================================================

    /// Returns true if the collection contains `key`.
    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.data.contains_key(key)
    }

    /// Returns a reference to the value stored for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.data.get(key)
    }

    /// Returns a mutable reference to the value stored for `key`.
    ///
    /// Mutating through the reference never changes the entry's position.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.data.get_mut(key)
    }

    // =========================================================================
    // SET / DELETE
    // =========================================================================

    /// Stores `value` under `key`.
    ///
    /// A new key is appended to the end of the iteration order. An existing
    /// key keeps its position and the old value is returned.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        self.data.insert(key, value)
    }

    /// Removes `key`, returning its value if it was present.
    ///
    /// The remaining entries keep their relative order.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.data.shift_remove(key)
    }

    // =========================================================================
    // BULK PRIMITIVES
    // =========================================================================

    /// Keeps only the entries for which `keep` returns true, preserving order.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.data.retain(keep);
    }

    /// Removes every entry and yields them in iteration order.
    ///
    /// The collection is empty once the iterator is dropped.
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        self.data.drain(..)
    }
}

// =============================================================================
// TRAIT IMPLS
// =============================================================================

impl<K, V> Default for Collection<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FromIterator<(K, V)> for Collection<K, V>
where
    K: Hash + Eq,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Collection<K, V>
where
    K: Hash + Eq,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K, V> Extend<(K, V)> for Collection<K, V>
where
    K: Hash + Eq,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K, V> IntoIterator for Collection<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a Collection<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<K, V, Q> Index<&Q> for Collection<K, V>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
{
    type Output = V;

    /// Panics if `key` is not present.
    fn index(&self, key: &Q) -> &V {
        &self.data[key]
    }
}

/// Order-sensitive: two collections are equal when they hold the same pairs
/// in the same iteration order.
impl<K, V> PartialEq for Collection<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.data.len() == other.data.len() && self.data.iter().eq(other.data.iter())
    }
}

impl<K: Eq, V: Eq> Eq for Collection<K, V> {}

impl<K, V> std::fmt::Debug for Collection<K, V>
where
    K: std::fmt::Debug,
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.data.iter()).finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
