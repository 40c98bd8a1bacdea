//! An ordered map based on a red-black tree.

use compare::{Compare, Natural};
use std::cmp::Ordering::{self, *};
use std::collections::Bound;
use std::fmt::{self, Debug};
use std::hash::{self, Hash};
use std::iter::{self, FusedIterator};
use std::ops;
use super::tree::{Handle, Tree};

pub use super::tree::{Cursor, IntoIter, Iter, IterMut, Range, RevCursor};

/// An ordered map based on a red-black tree.
///
/// The comparator orders keys only. Every entry is addressable through a
/// [`Handle`](../tree/struct.Handle.html), which stays valid until that entry is removed.
///
/// The behavior of this map is unspecified if a key's ordering relative to any other key changes
/// while the key is in the map. This is normally only possible through `Cell`, `RefCell`, or
/// unsafe code.
pub struct Map<K, V, C = Natural<K>> where C: Compare<K> {
    tree: Tree<K, V, C>,
}

impl<K, V> Map<K, V> where K: Ord {
    /// Creates an empty map ordered according to the natural order of its keys.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn new() -> Self { Map { tree: Tree::new() } }
}

impl<K, V, C> Map<K, V, C> where C: Compare<K> {
    /// Creates an empty map ordered according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    ///
    /// let mut map = rbtree::Map::with_cmp(natural().rev());
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn with_cmp(cmp: C) -> Self { Map { tree: Tree::with_cmp(cmp) } }

    /// Checks if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    /// assert!(map.is_empty());
    ///
    /// map.insert(2, "b");
    /// assert!(!map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool { self.tree.is_empty() }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    /// assert_eq!(map.len(), 0);
    ///
    /// map.insert(2, "b");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize { self.tree.len() }

    /// Returns the maximum number of entries the map can hold.
    pub fn max_size(&self) -> usize { self.tree.max_size() }

    /// Returns a reference to the map's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    ///
    /// let map: rbtree::Map<i32, &str> = rbtree::Map::new();
    /// assert!(map.cmp().compares_lt(&1, &2));
    ///
    /// let map: rbtree::Map<i32, &str, _> = rbtree::Map::with_cmp(natural().rev());
    /// assert!(map.cmp().compares_gt(&1, &2));
    /// ```
    pub fn cmp(&self) -> &C { self.tree.cmp() }

    /// Removes all entries from the map.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.len(), 3);
    /// assert_eq!(map.iter().next(), Some((&1, &"a")));
    ///
    /// map.clear();
    ///
    /// assert_eq!(map.len(), 0);
    /// assert_eq!(map.iter().next(), None);
    /// ```
    pub fn clear(&mut self) { self.tree.clear(); }

    /// Swaps the contents of this map with another in constant time.
    pub fn swap(&mut self, other: &mut Self) { self.tree.swap(&mut other.tree); }

    /// Inserts an entry into the map, returning the previous value, if any, associated
    /// with the key.
    ///
    /// If the map already contains the key, its value is replaced and the stored key is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    /// assert_eq!(map.insert(1, "a"), None);
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.insert(1, "b"), Some("a"));
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.entry(key) {
            Entry::Occupied(mut e) => Some(e.insert(value)),
            Entry::Vacant(e) => { e.insert(value); None }
        }
    }

    /// Inserts an entry into the map using `hint` as a guess of the position before which the
    /// key belongs, with `None` meaning the end of the map.
    ///
    /// Returns a handle to the entry with the given key. Unlike [`insert`](#method.insert),
    /// this leaves an existing entry untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    ///
    /// for (i, c) in "abcde".chars().enumerate() {
    ///     map.insert_hint(None, i, c);
    /// }
    ///
    /// let handle = map.insert_hint(None, 2, 'z');
    /// assert_eq!(map.get_at(handle), Some((&2, &'c')));
    /// ```
    pub fn insert_hint(&mut self, hint: Option<Handle>, key: K, value: V) -> Handle {
        self.tree.insert_hint(hint, key, value)
    }

    /// Removes and returns the entry whose key is equal to the given key, returning
    /// `None` if the map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.len(), 3);
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.remove(&1), Some((1, "a")));
    ///
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.get(&1), None);
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<(K, V)> where C: Compare<Q, K> {
        self.tree.remove_key(key)
    }

    /// Removes and returns the entry the given handle refers to, returning `None` if the handle
    /// has been invalidated.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    /// map.insert(1, "a");
    /// let handle = map.find(&1).handle().unwrap();
    ///
    /// assert_eq!(map.remove_at(handle), Some((1, "a")));
    /// assert_eq!(map.remove_at(handle), None);
    /// ```
    pub fn remove_at(&mut self, handle: Handle) -> Option<(K, V)> { self.tree.remove(handle) }

    /// Returns the map's entry corresponding to the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut counts = rbtree::Map::new();
    ///
    /// for s in vec!["a", "b", "a", "c", "a", "b"] {
    ///     *counts.entry(s).or_insert(0) += 1;
    /// }
    ///
    /// assert_eq!(counts[&"a"], 3);
    /// assert_eq!(counts[&"b"], 2);
    /// assert_eq!(counts[&"c"], 1);
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<K, V, C> {
        let (hint, found) = {
            let cursor = self.tree.lower_bound(&key);
            let found = cursor.key().map_or(false, |k| self.tree.cmp().compares_eq(&key, k));
            (cursor.handle(), found)
        };

        match hint {
            Some(handle) if found => Entry::Occupied(OccupiedEntry { tree: &mut self.tree,
                                                                     handle: handle }),
            _ => Entry::Vacant(VacantEntry { tree: &mut self.tree, key: key, hint: hint }),
        }
    }

    /// Checks if the map contains the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    /// assert!(!map.contains_key(&1));
    /// map.insert(1, "a");
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool where C: Compare<Q, K> {
        self.tree.contains_key(key)
    }

    /// Returns a reference to the value associated with the given key, or `None` if the
    /// map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    /// assert_eq!(map.get(&1), None);
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// ```
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V> where C: Compare<Q, K> {
        self.tree.get(key)
    }

    /// Returns a mutable reference to the value associated with the given key, or `None`
    /// if the map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    /// assert_eq!(map.get(&1), None);
    /// map.insert(1, "a");
    ///
    /// {
    ///     let value = map.get_mut(&1).unwrap();
    ///     assert_eq!(*value, "a");
    ///     *value = "b";
    /// }
    ///
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// ```
    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V> where C: Compare<Q, K> {
        self.tree.get_mut(key)
    }

    /// Returns the key and value of the entry the given handle refers to, or `None` if the
    /// handle has been invalidated.
    pub fn get_at(&self, handle: Handle) -> Option<(&K, &V)> { self.tree.key_value(handle) }

    /// Returns the key and a mutable reference to the value of the entry the given handle refers
    /// to, or `None` if the handle has been invalidated.
    pub fn get_at_mut(&mut self, handle: Handle) -> Option<(&K, &mut V)> {
        self.tree.key_value_mut(handle)
    }

    /// Returns a cursor at the entry with the given key, or at the end of the map if there is
    /// no such entry.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    ///
    /// let mut cursor = map.find(&1);
    /// assert_eq!(cursor.get(), Some((&1, &"a")));
    /// cursor.move_next();
    /// assert_eq!(cursor.get(), Some((&2, &"b")));
    ///
    /// assert!(map.find(&3) == map.end());
    /// ```
    pub fn find<Q: ?Sized>(&self, key: &Q) -> Cursor<K, V, C> where C: Compare<Q, K> {
        self.tree.search(key)
    }

    /// Returns a cursor at the first entry whose key is not less than the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// let map: rbtree::Map<_, _> = vec![(10, "a"), (20, "b"), (30, "c")].into_iter().collect();
    ///
    /// assert_eq!(map.lower_bound(&15).get(), Some((&20, &"b")));
    /// assert_eq!(map.lower_bound(&20).get(), Some((&20, &"b")));
    /// assert!(map.lower_bound(&35).is_end());
    /// ```
    pub fn lower_bound<Q: ?Sized>(&self, key: &Q) -> Cursor<K, V, C> where C: Compare<Q, K> {
        self.tree.lower_bound(key)
    }

    /// Returns a cursor at the first entry whose key is greater than the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// let map: rbtree::Map<_, _> = vec![(10, "a"), (20, "b"), (30, "c")].into_iter().collect();
    ///
    /// assert_eq!(map.upper_bound(&15).get(), Some((&20, &"b")));
    /// assert_eq!(map.upper_bound(&20).get(), Some((&30, &"c")));
    /// assert!(map.upper_bound(&30).is_end());
    /// ```
    pub fn upper_bound<Q: ?Sized>(&self, key: &Q) -> Cursor<K, V, C> where C: Compare<Q, K> {
        self.tree.upper_bound(key)
    }

    /// Returns an iterator over the entries whose keys are equivalent to the given key.
    ///
    /// Keys are unique, so the iterator yields at most one entry.
    ///
    /// # Examples
    ///
    /// ```
    /// let map: rbtree::Map<_, _> = vec![(1, "a"), (2, "b")].into_iter().collect();
    ///
    /// assert_eq!(map.equal_range(&2).collect::<Vec<_>>(), [(&2, &"b")]);
    /// assert_eq!(map.equal_range(&3).count(), 0);
    /// ```
    pub fn equal_range<Q: ?Sized>(&self, key: &Q) -> Range<K, V> where C: Compare<Q, K> {
        self.tree.range(Bound::Included(key), Bound::Included(key))
    }

    /// Returns an iterator over the map's entries whose keys lie in the given range.
    ///
    /// The iterator yields the entries in ascending order according to the map's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::Bound::{Included, Excluded, Unbounded};
    ///
    /// let mut map = rbtree::Map::new();
    ///
    /// map.insert("b", 2);
    /// map.insert("a", 1);
    /// map.insert("c", 3);
    ///
    /// assert_eq!(map.range::<&str, &str>(Unbounded, Unbounded).collect::<Vec<_>>(),
    ///     [(&"a", &1), (&"b", &2), (&"c", &3)]);
    /// assert_eq!(map.range(Excluded(&"a"), Included(&"f")).collect::<Vec<_>>(),
    ///     [(&"b", &2), (&"c", &3)]);
    /// assert_eq!(map.range(Included(&"a"), Excluded(&"b")).collect::<Vec<_>>(),
    ///     [(&"a", &1)]);
    /// ```
    pub fn range<Min: ?Sized, Max: ?Sized>(&self, min: Bound<&Min>, max: Bound<&Max>)
        -> Range<K, V> where C: Compare<Min, K> + Compare<Max, K> {

        self.tree.range(min, max)
    }

    /// Removes every entry whose key lies in the given range and returns how many were
    /// removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::Bound::{Excluded, Included, Unbounded};
    ///
    /// let mut map: rbtree::Map<_, _> = (0..10).map(|k| (k, k * 10)).collect();
    ///
    /// assert_eq!(map.remove_range(Included(&3), Excluded(&6)), 3);
    /// assert_eq!(map.remove_range(Excluded(&7), Unbounded), 2);
    /// assert_eq!(map.keys().cloned().collect::<Vec<_>>(), [0, 1, 2, 6, 7]);
    /// ```
    pub fn remove_range<Min: ?Sized, Max: ?Sized>(&mut self, min: Bound<&Min>, max: Bound<&Max>)
        -> usize where C: Compare<Min, K> + Compare<Max, K> {

        self.tree.remove_range(min, max)
    }

    /// Returns a reference to the map's minimum key and a reference to its associated
    /// value, or `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    /// assert_eq!(map.first_key_value(), None);
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.first_key_value(), Some((&1, &"a")));
    /// ```
    pub fn first_key_value(&self) -> Option<(&K, &V)> { self.tree.min() }

    /// Returns a reference to the map's maximum key and a reference to its associated
    /// value, or `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    /// assert_eq!(map.last_key_value(), None);
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.last_key_value(), Some((&3, &"c")));
    /// ```
    pub fn last_key_value(&self) -> Option<(&K, &V)> { self.tree.max() }

    /// Removes the map's minimum key and returns it and its associated value, or `None` if the
    /// map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    /// assert_eq!(map.remove_min(), None);
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.remove_min(), Some((1, "a")));
    /// ```
    pub fn remove_min(&mut self) -> Option<(K, V)> { self.tree.remove_min() }

    /// Removes the map's maximum key and returns it and its associated value, or `None` if the
    /// map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    /// assert_eq!(map.remove_max(), None);
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.remove_max(), Some((3, "c")));
    /// ```
    pub fn remove_max(&mut self) -> Option<(K, V)> { self.tree.remove_max() }

    /// Returns a cursor at the map's first entry.
    pub fn begin(&self) -> Cursor<K, V, C> { self.tree.begin() }

    /// Returns a cursor at the end of the map.
    pub fn end(&self) -> Cursor<K, V, C> { self.tree.end() }

    /// Returns a reverse cursor at the map's last entry.
    ///
    /// # Examples
    ///
    /// ```
    /// let map: rbtree::Map<_, _> = vec![(1, "a"), (2, "b")].into_iter().collect();
    ///
    /// let mut cursor = map.rbegin();
    /// assert_eq!(cursor.get(), Some((&2, &"b")));
    /// cursor.move_next();
    /// assert_eq!(cursor.get(), Some((&1, &"a")));
    /// cursor.move_next();
    /// assert!(cursor == map.rend());
    /// ```
    pub fn rbegin(&self) -> RevCursor<K, V, C> { self.tree.rbegin() }

    /// Returns a reverse cursor at the position before the map's first entry.
    pub fn rend(&self) -> RevCursor<K, V, C> { self.tree.rend() }

    /// Returns an iterator that consumes the map.
    ///
    /// The iterator yields the entries in ascending order according to the map's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.into_iter();
    /// assert_eq!(it.next(), Some((1, "a")));
    /// assert_eq!(it.next(), Some((2, "b")));
    /// assert_eq!(it.next(), Some((3, "c")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn into_iter(self) -> IntoIter<K, V> { self.tree.into_iter() }

    /// Returns an iterator over the map's entries with immutable references to the values.
    ///
    /// The iterator yields the entries in ascending order according to the map's comparator.
    pub fn iter(&self) -> Iter<K, V> { self.tree.iter() }

    /// Returns an iterator over the map's entries with mutable references to the values.
    ///
    /// The iterator yields the entries in ascending order according to the map's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = rbtree::Map::new();
    ///
    /// map.insert("b", 2);
    /// map.insert("a", 1);
    /// map.insert("c", 3);
    ///
    /// let mut i = 1;
    ///
    /// for (_, value) in map.iter_mut() {
    ///     assert_eq!(i, *value);
    ///     *value *= 2;
    ///     i += 1;
    /// }
    ///
    /// assert_eq!(map[&"a"], 2);
    /// assert_eq!(map[&"b"], 4);
    /// assert_eq!(map[&"c"], 6);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<K, V> { self.tree.iter_mut() }

    /// Returns an iterator over the map's keys, in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// let map: rbtree::Map<_, _> = vec![(2, "b"), (1, "a")].into_iter().collect();
    /// assert_eq!(map.keys().collect::<Vec<_>>(), [&1, &2]);
    /// ```
    pub fn keys(&self) -> Keys<K, V> { Keys(self.iter()) }

    /// Returns an iterator over the map's values, in ascending order of their keys.
    ///
    /// # Examples
    ///
    /// ```
    /// let map: rbtree::Map<_, _> = vec![(2, "b"), (1, "a")].into_iter().collect();
    /// assert_eq!(map.values().collect::<Vec<_>>(), [&"a", &"b"]);
    /// ```
    pub fn values(&self) -> Values<K, V> { Values(self.iter()) }
}

impl<K, V, C> Clone for Map<K, V, C> where K: Clone, V: Clone, C: Compare<K> + Clone {
    fn clone(&self) -> Self { Map { tree: self.tree.clone() } }
    fn clone_from(&mut self, source: &Self) { self.tree.clone_from(&source.tree); }
}

impl<K, V, C> Debug for Map<K, V, C> where K: Debug, V: Debug, C: Compare<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { self.tree.fmt(f) }
}

impl<K, V, C> Default for Map<K, V, C> where C: Compare<K> + Default {
    fn default() -> Self { Map::with_cmp(Default::default()) }
}

impl<K, V, C> Extend<(K, V)> for Map<K, V, C> where C: Compare<K> {
    fn extend<I: IntoIterator<Item=(K, V)>>(&mut self, it: I) {
        for (k, v) in it { self.insert(k, v); }
    }
}

impl<K, V, C> iter::FromIterator<(K, V)> for Map<K, V, C> where C: Compare<K> + Default {
    fn from_iter<I: IntoIterator<Item=(K, V)>>(it: I) -> Self {
        let mut map: Self = Default::default();
        map.extend(it);
        map
    }
}

impl<K, V, C> Hash for Map<K, V, C> where K: Hash, V: Hash, C: Compare<K> {
    fn hash<H: hash::Hasher>(&self, h: &mut H) {
        for e in self.iter() { e.hash(h); }
    }
}

impl<'a, K, V, C, Q: ?Sized> ops::Index<&'a Q> for Map<K, V, C>
    where C: Compare<K> + Compare<Q, K> {

    type Output = V;
    fn index(&self, key: &Q) -> &V { self.get(key).expect("key not found") }
}

impl<'a, K, V, C> IntoIterator for &'a Map<K, V, C> where C: Compare<K> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Iter<'a, K, V> { self.iter() }
}

impl<'a, K, V, C> IntoIterator for &'a mut Map<K, V, C> where C: Compare<K> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;
    fn into_iter(self) -> IterMut<'a, K, V> { self.iter_mut() }
}

impl<K, V, C> IntoIterator for Map<K, V, C> where C: Compare<K> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;
    fn into_iter(self) -> IntoIter<K, V> { self.into_iter() }
}

impl<K, V, C> PartialEq for Map<K, V, C> where V: PartialEq, C: Compare<K> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(l, r)| {
            self.tree.cmp().compares_eq(l.0, r.0) && l.1 == r.1
        })
    }
}

impl<K, V, C> Eq for Map<K, V, C> where V: Eq, C: Compare<K> {}

impl<K, V, C> PartialOrd for Map<K, V, C> where V: PartialOrd, C: Compare<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let mut l = self.iter();
        let mut r = other.iter();

        loop {
            match (l.next(), r.next()) {
                (None, None) => return Some(Equal),
                (None, Some(_)) => return Some(Less),
                (Some(_), None) => return Some(Greater),
                (Some(l), Some(r)) => match self.tree.cmp().compare(l.0, r.0) {
                    Equal => match l.1.partial_cmp(r.1) {
                        Some(Equal) => {}
                        non_eq => return non_eq,
                    },
                    non_eq => return Some(non_eq),
                },
            }
        }
    }
}

impl<K, V, C> Ord for Map<K, V, C> where V: Ord, C: Compare<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut l = self.iter();
        let mut r = other.iter();

        loop {
            match (l.next(), r.next()) {
                (None, None) => return Equal,
                (None, Some(_)) => return Less,
                (Some(_), None) => return Greater,
                (Some(l), Some(r)) => match self.tree.cmp().compare(l.0, r.0) {
                    Equal => match l.1.cmp(r.1) {
                        Equal => {}
                        non_eq => return non_eq,
                    },
                    non_eq => return non_eq,
                },
            }
        }
    }
}

/// An iterator over the map's keys.
///
/// Acquire through [`Map::keys`](struct.Map.html#method.keys).
pub struct Keys<'a, K: 'a, V: 'a>(Iter<'a, K, V>);

impl<'a, K, V> Clone for Keys<'a, K, V> {
    fn clone(&self) -> Keys<'a, K, V> { Keys(self.0.clone()) }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;
    fn next(&mut self) -> Option<&'a K> { self.0.next().map(|e| e.0) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a K> { self.0.next_back().map(|e| e.0) }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {}

impl<'a, K, V> FusedIterator for Keys<'a, K, V> {}

/// An iterator over the map's values.
///
/// Acquire through [`Map::values`](struct.Map.html#method.values).
pub struct Values<'a, K: 'a, V: 'a>(Iter<'a, K, V>);

impl<'a, K, V> Clone for Values<'a, K, V> {
    fn clone(&self) -> Values<'a, K, V> { Values(self.0.clone()) }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;
    fn next(&mut self) -> Option<&'a V> { self.0.next().map(|e| e.1) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a V> { self.0.next_back().map(|e| e.1) }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {}

impl<'a, K, V> FusedIterator for Values<'a, K, V> {}

/// An entry in the map.
///
/// See [`Map::entry`](struct.Map.html#method.entry) for an example.
pub enum Entry<'a, K: 'a, V: 'a, C: 'a> where C: Compare<K> {
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V, C>),
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V, C>),
}

impl<'a, K, V, C> Entry<'a, K, V, C> where C: Compare<K> {
    /// Returns the entry's value, inserting the given default if the entry is vacant.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert(default),
        }
    }

    /// Returns the entry's value, inserting the given function's result if the entry is vacant.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V where F: FnOnce() -> V {
        match self {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert(default()),
        }
    }

    /// Returns the entry's value, inserting the value type's default if the entry is vacant.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map: rbtree::Map<&str, Vec<u32>> = rbtree::Map::new();
    ///
    /// map.entry("a").or_default().push(1);
    /// map.entry("a").or_default().push(2);
    ///
    /// assert_eq!(map[&"a"], [1, 2]);
    /// ```
    pub fn or_default(self) -> &'a mut V where V: Default {
        self.or_insert_with(Default::default)
    }

    /// Returns the entry's key.
    pub fn key(&self) -> &K {
        match *self {
            Entry::Occupied(ref e) => e.key(),
            Entry::Vacant(ref e) => e.key(),
        }
    }
}

/// An occupied entry.
///
/// See [`Map::entry`](struct.Map.html#method.entry) for an example.
pub struct OccupiedEntry<'a, K: 'a, V: 'a, C: 'a> where C: Compare<K> {
    tree: &'a mut Tree<K, V, C>,
    handle: Handle,
}

impl<'a, K, V, C> OccupiedEntry<'a, K, V, C> where C: Compare<K> {
    /// Returns a reference to the entry's key.
    pub fn key(&self) -> &K { self.tree.key_value_at(self.handle).0 }

    /// Returns a handle to the entry.
    pub fn handle(&self) -> Handle { self.handle }

    /// Returns a reference to the entry's value.
    pub fn get(&self) -> &V { self.tree.key_value_at(self.handle).1 }

    /// Returns a mutable reference to the entry's value.
    pub fn get_mut(&mut self) -> &mut V { self.tree.value_mut_at(self.handle) }

    /// Returns a mutable reference to the entry's value with the same lifetime as the map.
    pub fn into_mut(self) -> &'a mut V { self.tree.value_mut_at(self.handle) }

    /// Replaces the entry's value with the given value, returning the old one.
    pub fn insert(&mut self, value: V) -> V { std::mem::replace(self.get_mut(), value) }

    /// Removes the entry from the map and returns its key and value.
    pub fn remove(self) -> (K, V) {
        match self.tree.remove(self.handle) {
            Some(key_value) => key_value,
            None => unreachable!("occupied entry refers to a removed element"),
        }
    }
}

/// A vacant entry.
///
/// See [`Map::entry`](struct.Map.html#method.entry) for an example.
pub struct VacantEntry<'a, K: 'a, V: 'a, C: 'a> where C: Compare<K> {
    tree: &'a mut Tree<K, V, C>,
    key: K,
    hint: Option<Handle>,
}

impl<'a, K, V, C> VacantEntry<'a, K, V, C> where C: Compare<K> {
    /// Returns a reference to the key the entry would be inserted with.
    pub fn key(&self) -> &K { &self.key }

    /// Returns the key the entry would be inserted with.
    pub fn into_key(self) -> K { self.key }

    /// Inserts the entry into the map with the given value, returning a mutable reference to
    /// the value.
    ///
    /// The position found by [`Map::entry`](struct.Map.html#method.entry) is used as the
    /// insertion hint, so no second search is needed.
    pub fn insert(self, value: V) -> &'a mut V {
        let handle = self.tree.insert_hint(self.hint, self.key, value);
        self.tree.value_mut_at(handle)
    }
}
