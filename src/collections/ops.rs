// ============================================================================
// spark-collection - Bulk Operations
// Array-style operations over an ordered collection, with a species hook
// deciding what type derived collections are built as
// ============================================================================

use std::cmp::Ordering;
use std::hash::Hash;

use log::trace;

use crate::collections::map::Collection;
use crate::core::error::CollectionError;

// =============================================================================
// COLLECTION OPS
// =============================================================================

/// Bulk operations over anything that owns a [`Collection`].
///
/// Implementors provide access to their underlying collection and a
/// construction hook, [`species`](CollectionOps::species). Every operation
/// that produces a new collection (`filter`, `duplicate`, `concat`) builds
/// its result through that hook, so a wrapper type gets its own type back
/// without overriding anything else.
///
/// Callbacks receive `(value, key, collection)` where `collection` is the
/// receiver being iterated.
///
/// # Example
///
/// ```
/// use spark_collection::{Collection, CollectionOps};
///
/// let stock = Collection::from([("apples", 3), ("pears", 0), ("plums", 7)]);
///
/// assert_eq!(stock.find_key(|qty, _, _| *qty == 0), Some(&"pears"));
///
/// let in_stock = stock.filter(|qty, _, _| *qty > 0);
/// assert_eq!(in_stock.keys().copied().collect::<Vec<_>>(), ["apples", "plums"]);
///
/// let total = stock.fold(0, |acc, qty, _, _| acc + qty);
/// assert_eq!(total, 10);
/// ```
///
/// # Wrapper types
///
/// ```
/// use spark_collection::{Collection, CollectionOps};
///
/// struct Inventory {
///     warehouse: &'static str,
///     items: Collection<String, u32>,
/// }
///
/// impl CollectionOps<String, u32> for Inventory {
///     type Species = Inventory;
///
///     fn species(&self) -> Inventory {
///         Inventory { warehouse: self.warehouse, items: Collection::new() }
///     }
///
///     fn collection(&self) -> &Collection<String, u32> {
///         &self.items
///     }
///
///     fn collection_mut(&mut self) -> &mut Collection<String, u32> {
///         &mut self.items
///     }
/// }
///
/// let north = Inventory {
///     warehouse: "north",
///     items: Collection::from([("bolts".to_string(), 40), ("nuts".to_string(), 0)]),
/// };
///
/// let empty = north.filter(|qty, _, _| *qty == 0);
/// assert_eq!(empty.warehouse, "north");
/// assert!(empty.items.has("nuts"));
/// ```
pub trait CollectionOps<K, V> {
    /// The type derived collections are built as.
    ///
    /// Usually `Self`. A wrapper that wants plain results uses
    /// `Collection<K, V>` instead.
    type Species: CollectionOps<K, V>;

    /// Construct a new, empty instance of the species.
    fn species(&self) -> Self::Species;

    /// The underlying ordered storage.
    fn collection(&self) -> &Collection<K, V>;

    /// Mutable access to the underlying ordered storage.
    fn collection_mut(&mut self) -> &mut Collection<K, V>;

    // =========================================================================
    // CONSTRUCTION
    // =========================================================================

    /// Construct a species instance pre-seeded with `entries`.
    fn species_from<I>(&self, entries: I) -> Self::Species
    where
        K: Hash + Eq,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut out = self.species();
        out.collection_mut().extend(entries);
        out
    }

    // =========================================================================
    // SEARCH
    // =========================================================================

    /// Returns the first value for which `predicate` is true.
    fn find<'a, P>(&'a self, mut predicate: P) -> Option<&'a V>
    where
        K: 'a,
        V: 'a,
        P: FnMut(&V, &K, &Self) -> bool,
    {
        self.collection()
            .iter()
            .find(|&(key, value)| predicate(value, key, self))
            .map(|(_, value)| value)
    }

    /// Returns the first key for which `predicate` is true.
    fn find_key<'a, P>(&'a self, mut predicate: P) -> Option<&'a K>
    where
        K: 'a,
        V: 'a,
        P: FnMut(&V, &K, &Self) -> bool,
    {
        self.collection()
            .iter()
            .find(|&(key, value)| predicate(value, key, self))
            .map(|(key, _)| key)
    }

    /// Returns true if `predicate` holds for at least one entry.
    fn some<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&V, &K, &Self) -> bool,
    {
        self.collection()
            .iter()
            .any(|(key, value)| predicate(value, key, self))
    }

    /// Returns true if `predicate` holds for every entry.
    ///
    /// An empty collection always returns true.
    fn every<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&V, &K, &Self) -> bool,
    {
        self.collection()
            .iter()
            .all(|(key, value)| predicate(value, key, self))
    }

    // =========================================================================
    // FILTER / SWEEP
    // =========================================================================

    /// Returns a new species collection holding the entries for which
    /// `predicate` is true, in their current order.
    fn filter<P>(&self, mut predicate: P) -> Self::Species
    where
        K: Hash + Eq + Clone,
        V: Clone,
        P: FnMut(&V, &K, &Self) -> bool,
    {
        let mut out = self.species();
        for (key, value) in self.collection() {
            if predicate(value, key, self) {
                out.collection_mut().set(key.clone(), value.clone());
            }
        }
        out
    }

    /// Removes every entry for which `predicate` is true.
    ///
    /// All verdicts are taken against the collection as it was before the
    /// call, so each entry is evaluated exactly once and no removal can
    /// influence another entry's verdict. Nothing is removed until every
    /// entry has been evaluated.
    fn sweep<P>(&mut self, mut predicate: P)
    where
        K: Hash + Eq,
        P: FnMut(&V, &K, &Self) -> bool,
    {
        let this: &Self = self;
        let verdicts: Vec<bool> = this
            .collection()
            .iter()
            .map(|(key, value)| predicate(value, key, this))
            .collect();

        let doomed = verdicts.iter().filter(|&&remove| remove).count();
        if doomed == 0 {
            return;
        }

        let total = verdicts.len();
        let mut verdicts = verdicts.into_iter();
        self.collection_mut()
            .retain(|_, _| !verdicts.next().unwrap_or(false));

        trace!("sweep removed {} of {} entries", doomed, total);
    }

    // =========================================================================
    // TRANSFORM
    // =========================================================================

    /// Maps every entry through `f`, in iteration order.
    ///
    /// The result always has exactly `len()` elements.
    fn map<T, F>(&self, mut f: F) -> Vec<T>
    where
        F: FnMut(&V, &K, &Self) -> T,
    {
        let mut out = Vec::with_capacity(self.collection().len());
        for (key, value) in self.collection() {
            out.push(f(value, key, self));
        }
        out
    }

    /// Combines all entries into one value, seeded with the first value.
    ///
    /// The first value is cloned into the accumulator and is not passed to
    /// `f`. A single-entry collection therefore returns its value without
    /// calling `f`.
    ///
    /// # Errors
    ///
    /// [`CollectionError::EmptyReduce`] if the collection is empty. Use
    /// [`fold`](CollectionOps::fold) to supply a seed instead.
    fn reduce<F>(&self, mut f: F) -> Result<V, CollectionError>
    where
        V: Clone,
        F: FnMut(V, &V, &K, &Self) -> V,
    {
        let mut entries = self.collection().iter();
        let (_, first) = entries.next().ok_or(CollectionError::EmptyReduce)?;

        let mut acc = first.clone();
        for (key, value) in entries {
            acc = f(acc, value, key, self);
        }
        Ok(acc)
    }

    /// Combines all entries into one value, starting from `init`.
    ///
    /// An empty collection returns `init` unchanged.
    fn fold<T, F>(&self, init: T, mut f: F) -> T
    where
        F: FnMut(T, &V, &K, &Self) -> T,
    {
        let mut acc = init;
        for (key, value) in self.collection() {
            acc = f(acc, value, key, self);
        }
        acc
    }

    // =========================================================================
    // COPY / MERGE
    // =========================================================================

    /// Returns a shallow copy built through the species hook.
    ///
    /// Values are copied with `V::clone`; store `Rc`/`Arc` to share them.
    fn duplicate(&self) -> Self::Species
    where
        K: Hash + Eq + Clone,
        V: Clone,
    {
        self.species_from(
            self.collection()
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        )
    }

    /// Returns a duplicate of `self` with every entry of `others` applied in
    /// order.
    ///
    /// A key present in several inputs ends up with the last value seen, at
    /// the position where it first appeared. Neither `self` nor `others` is
    /// modified.
    fn concat<'a, I, O>(&self, others: I) -> Self::Species
    where
        K: Hash + Eq + Clone + 'a,
        V: Clone + 'a,
        I: IntoIterator<Item = &'a O>,
        O: CollectionOps<K, V> + 'a,
    {
        let mut out = self.duplicate();
        let mut merged = 0;
        for other in others {
            let entries = other.collection();
            merged += entries.len();
            out.collection_mut()
                .extend(entries.iter().map(|(key, value)| (key.clone(), value.clone())));
        }

        trace!(
            "concat merged {} entries into a copy of {}",
            merged,
            self.collection().len()
        );
        out
    }

    // =========================================================================
    // SORT
    // =========================================================================

    /// Reorders the entries in place according to `compare`.
    ///
    /// `compare` receives `(value_a, value_b, key_a, key_b)`. The sort is
    /// stable. The new order is computed first; only then are the entries
    /// drained and re-inserted, so iteration order afterwards is exactly the
    /// sorted order.
    ///
    /// If `compare` panics, the collection is left unchanged.
    fn sort_by<F>(&mut self, mut compare: F) -> &mut Self
    where
        K: Hash + Eq,
        F: FnMut(&V, &V, &K, &K) -> Ordering,
    {
        let order: Vec<usize> = {
            let entries: Vec<(&K, &V)> = self.collection().iter().collect();
            let mut order: Vec<usize> = (0..entries.len()).collect();
            order.sort_by(|&a, &b| {
                let (ka, va) = entries[a];
                let (kb, vb) = entries[b];
                compare(va, vb, ka, kb)
            });
            order
        };

        let mut slots: Vec<Option<(K, V)>> = self.collection_mut().drain().map(Some).collect();
        let sorted: Vec<(K, V)> = order.iter().filter_map(|&i| slots[i].take()).collect();

        trace!("sorted {} entries", sorted.len());
        self.collection_mut().extend(sorted);
        self
    }
}

impl<K, V> CollectionOps<K, V> for Collection<K, V> {
    type Species = Collection<K, V>;

    fn species(&self) -> Self {
        Collection::new()
    }

    fn collection(&self) -> &Collection<K, V> {
        self
    }

    fn collection_mut(&mut self) -> &mut Collection<K, V> {
        self
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn sample() -> Collection<&'static str, i32> {
        Collection::from([("a", 3), ("b", 1), ("c", 2)])
    }

    fn pairs(c: &Collection<&'static str, i32>) -> Vec<(&'static str, i32)> {
        c.iter().map(|(k, v)| (*k, *v)).collect()
    }

    #[test]
    fn find_returns_first_match() {
        let c = sample();
        assert_eq!(c.find(|v, _, _| *v < 3), Some(&1));
        assert_eq!(c.find(|v, _, _| *v > 10), None);
    }

    #[test]
    fn find_stops_at_first_match() {
        let c = sample();
        let calls = Cell::new(0);
        c.find(|_, k, _| {
            calls.set(calls.get() + 1);
            *k == "b"
        });
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn find_key_returns_first_match() {
        let c = sample();
        assert_eq!(c.find_key(|v, _, _| *v == 2), Some(&"c"));
        assert_eq!(c.find_key(|_, _, _| false), None);
    }

    #[test]
    fn callbacks_see_the_receiver() {
        let c = sample();
        assert!(c.every(|_, k, coll| coll.has(k) && coll.len() == 3));
    }

    #[test]
    fn filter_keeps_order_and_source() {
        let c = sample();
        let big = c.filter(|v, _, _| *v > 1);

        assert_eq!(pairs(&big), [("a", 3), ("c", 2)]);
        assert_eq!(pairs(&c), [("a", 3), ("b", 1), ("c", 2)]);
    }

    #[test]
    fn sweep_removes_matches_in_place() {
        let mut c = sample();
        c.sweep(|v, _, _| *v < 3);
        assert_eq!(pairs(&c), [("a", 3)]);
    }

    #[test]
    fn sweep_evaluates_against_intact_collection() {
        let mut c = Collection::from([("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
        let calls = Cell::new(0);

        // Every verdict sees all four entries, even after earlier hits.
        c.sweep(|v, _, coll| {
            calls.set(calls.get() + 1);
            assert_eq!(coll.len(), 4);
            *v % 2 == 1
        });

        assert_eq!(calls.get(), 4);
        assert_eq!(c.keys().copied().collect::<Vec<_>>(), ["b", "d"]);
    }

    #[test]
    fn sweep_with_no_matches_is_noop() {
        let mut c = sample();
        c.sweep(|_, _, _| false);
        assert_eq!(c, sample());
    }

    #[test]
    fn some_and_every_short_circuit() {
        let c = sample();
        let calls = Cell::new(0);

        assert!(c.some(|v, _, _| {
            calls.set(calls.get() + 1);
            *v == 3
        }));
        assert_eq!(calls.get(), 1);

        calls.set(0);
        assert!(!c.every(|v, _, _| {
            calls.set(calls.get() + 1);
            *v > 1
        }));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn map_has_one_result_per_entry() {
        let c = sample();
        let labels = c.map(|v, k, _| format!("{}={}", k, v));
        assert_eq!(labels, ["a=3", "b=1", "c=2"]);
        assert_eq!(labels.len(), c.len());
    }

    #[test]
    fn reduce_seeds_with_first_value() {
        let c = sample();
        let seen = Cell::new(0);
        let sum = c.reduce(|acc, v, _, _| {
            seen.set(seen.get() + 1);
            acc + v
        });
        assert_eq!(sum, Ok(6));
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn reduce_single_entry_skips_callback() {
        let c = Collection::from([("only", 7)]);
        let result = c.reduce(|_, _, _, _| panic!("callback must not run"));
        assert_eq!(result, Ok(7));
    }

    #[test]
    fn reduce_empty_fails() {
        let c: Collection<&str, i32> = Collection::new();
        assert_eq!(
            c.reduce(|acc, v, _, _| acc + v),
            Err(CollectionError::EmptyReduce)
        );
    }

    #[test]
    fn fold_with_different_accumulator_type() {
        let c = sample();
        let joined = c.fold(String::new(), |mut acc, _, k, _| {
            acc.push_str(k);
            acc
        });
        assert_eq!(joined, "abc");
    }

    #[test]
    fn duplicate_is_independent() {
        let c = sample();
        let mut copy = c.duplicate();
        assert_eq!(copy, c);

        copy.set("a", 100);
        copy.delete("b");
        assert_eq!(pairs(&c), [("a", 3), ("b", 1), ("c", 2)]);
    }

    #[test]
    fn concat_later_values_win() {
        let c = sample();
        let d = Collection::from([("b", 10), ("z", 26)]);
        let e = Collection::from([("z", 0)]);

        let merged = c.concat([&d, &e]);
        assert_eq!(pairs(&merged), [("a", 3), ("b", 10), ("c", 2), ("z", 0)]);

        assert_eq!(pairs(&c), [("a", 3), ("b", 1), ("c", 2)]);
        assert_eq!(pairs(&d), [("b", 10), ("z", 26)]);
    }

    #[test]
    fn concat_nothing_is_a_copy() {
        let c = sample();
        let merged = c.concat(std::iter::empty::<&Collection<&str, i32>>());
        assert_eq!(merged, c);
    }

    #[test]
    fn sort_by_value() {
        let mut c = sample();
        c.sort_by(|a, b, _, _| a.cmp(b));
        assert_eq!(pairs(&c), [("b", 1), ("c", 2), ("a", 3)]);
    }

    #[test]
    fn sort_by_key_descending_chains() {
        let mut c = sample();
        let first = c
            .sort_by(|_, _, ka, kb| kb.cmp(ka))
            .find_key(|_, _, _| true)
            .copied();
        assert_eq!(first, Some("c"));
    }

    #[test]
    fn find_result_outlives_predicate() {
        let c = sample();
        let found = {
            let limit = 2;
            c.find(|v, _, _| *v < limit)
        };
        assert_eq!(found, Some(&1));
    }

    #[test]
    fn sort_is_stable() {
        let mut c = Collection::from([("x", 1), ("y", 0), ("z", 1), ("w", 0)]);
        c.sort_by(|a, b, _, _| a.cmp(b));
        assert_eq!(c.keys().copied().collect::<Vec<_>>(), ["y", "w", "x", "z"]);
    }
}
