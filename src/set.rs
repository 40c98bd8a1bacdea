//! An ordered set based on a red-black tree.

use compare::{Compare, Natural};
use std::cmp::Ordering;
use std::collections::Bound;
use std::fmt::{self, Debug};
use std::hash::{self, Hash};
use std::iter::{self, FusedIterator};
use super::map::{self, Map};
use super::tree::{Cursor, Handle, RevCursor};

/// An ordered set based on a red-black tree.
///
/// The behavior of this set is unspecified if an item's ordering relative to any other item
/// changes while the item is in the set. This is normally only possible through `Cell`,
/// `RefCell`, or unsafe code.
pub struct Set<T, C = Natural<T>> where C: Compare<T> {
    map: Map<T, (), C>,
}

impl<T> Set<T> where T: Ord {
    /// Creates an empty set ordered according to the natural order of its items.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = rbtree::Set::new();
    ///
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut it = set.iter();
    /// assert_eq!(it.next(), Some(&1));
    /// assert_eq!(it.next(), Some(&2));
    /// assert_eq!(it.next(), Some(&3));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn new() -> Self { Set { map: Map::new() } }
}

impl<T, C> Set<T, C> where C: Compare<T> {
    /// Creates an empty set ordered according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    ///
    /// let mut set = rbtree::Set::with_cmp(natural().rev());
    ///
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut it = set.iter();
    /// assert_eq!(it.next(), Some(&3));
    /// assert_eq!(it.next(), Some(&2));
    /// assert_eq!(it.next(), Some(&1));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn with_cmp(cmp: C) -> Self { Set { map: Map::with_cmp(cmp) } }

    /// Checks if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = rbtree::Set::new();
    /// assert!(set.is_empty());
    ///
    /// set.insert(2);
    /// assert!(!set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool { self.map.is_empty() }

    /// Returns the number of items in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = rbtree::Set::new();
    /// assert_eq!(set.len(), 0);
    ///
    /// set.insert(2);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize { self.map.len() }

    /// Returns the maximum number of items the set can hold.
    pub fn max_size(&self) -> usize { self.map.max_size() }

    /// Returns a reference to the set's comparator.
    pub fn cmp(&self) -> &C { self.map.cmp() }

    /// Removes all items from the set.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = rbtree::Set::new();
    ///
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// assert_eq!(set.len(), 3);
    ///
    /// set.clear();
    ///
    /// assert_eq!(set.len(), 0);
    /// assert_eq!(set.iter().next(), None);
    /// ```
    pub fn clear(&mut self) { self.map.clear(); }

    /// Swaps the contents of this set with another in constant time.
    pub fn swap(&mut self, other: &mut Self) { self.map.swap(&mut other.map); }

    /// Inserts an item into the set, returning `true` if the set did not already contain the
    /// item.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = rbtree::Set::new();
    /// assert!(set.insert(1));
    /// assert!(!set.insert(1));
    /// ```
    pub fn insert(&mut self, item: T) -> bool { self.map.insert(item, ()).is_none() }

    /// Inserts an item into the set using `hint` as a guess of the position before which the
    /// item belongs, with `None` meaning the end of the set.
    ///
    /// Returns a handle to the item equivalent to the given one.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = rbtree::Set::new();
    /// for item in 0..5 { set.insert_hint(None, item); }
    ///
    /// let three = set.find(&3).handle();
    /// set.remove(&2);
    /// set.insert_hint(three, 2);
    ///
    /// assert!(set.iter().cloned().eq(0..5));
    /// ```
    pub fn insert_hint(&mut self, hint: Option<Handle>, item: T) -> Handle {
        self.map.insert_hint(hint, item, ())
    }

    /// Removes the given item from the set, returning `true` if the set contained the item.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = rbtree::Set::new();
    ///
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// assert_eq!(set.len(), 3);
    /// assert!(set.contains(&1));
    /// assert!(set.remove(&1));
    ///
    /// assert_eq!(set.len(), 2);
    /// assert!(!set.contains(&1));
    /// assert!(!set.remove(&1));
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, item: &Q) -> bool where C: Compare<Q, T> {
        self.map.remove(item).is_some()
    }

    /// Removes and returns the set's item that is equivalent to the given item, or `None` if
    /// the set does not contain one.
    pub fn take<Q: ?Sized>(&mut self, item: &Q) -> Option<T> where C: Compare<Q, T> {
        self.map.remove(item).map(|e| e.0)
    }

    /// Removes and returns the item the given handle refers to, or `None` if the handle has
    /// been invalidated.
    pub fn remove_at(&mut self, handle: Handle) -> Option<T> {
        self.map.remove_at(handle).map(|e| e.0)
    }

    /// Checks if the set contains the given item.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = rbtree::Set::new();
    /// assert!(!set.contains(&1));
    /// set.insert(1);
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains<Q: ?Sized>(&self, item: &Q) -> bool where C: Compare<Q, T> {
        self.map.contains_key(item)
    }

    /// Returns a reference to the set's item that is equivalent to the given item, or `None`
    /// if the set does not contain one.
    pub fn get<Q: ?Sized>(&self, item: &Q) -> Option<&T> where C: Compare<Q, T> {
        self.map.find(item).key()
    }

    /// Returns the item the given handle refers to, or `None` if the handle has been
    /// invalidated.
    pub fn get_at(&self, handle: Handle) -> Option<&T> { self.map.get_at(handle).map(|e| e.0) }

    /// Returns a cursor at the given item, or at the end of the set if the set does not
    /// contain it.
    pub fn find<Q: ?Sized>(&self, item: &Q) -> Cursor<T, (), C> where C: Compare<Q, T> {
        self.map.find(item)
    }

    /// Returns a cursor at the first item that is not less than the given item.
    ///
    /// # Examples
    ///
    /// ```
    /// let set: rbtree::Set<_> = vec![10, 20, 30].into_iter().collect();
    ///
    /// assert_eq!(set.lower_bound(&15).key(), Some(&20));
    /// assert_eq!(set.lower_bound(&20).key(), Some(&20));
    /// assert!(set.lower_bound(&31).is_end());
    /// ```
    pub fn lower_bound<Q: ?Sized>(&self, item: &Q) -> Cursor<T, (), C> where C: Compare<Q, T> {
        self.map.lower_bound(item)
    }

    /// Returns a cursor at the first item that is greater than the given item.
    ///
    /// # Examples
    ///
    /// ```
    /// let set: rbtree::Set<_> = vec![10, 20, 30].into_iter().collect();
    ///
    /// assert_eq!(set.upper_bound(&20).key(), Some(&30));
    /// assert!(set.upper_bound(&30).is_end());
    /// ```
    pub fn upper_bound<Q: ?Sized>(&self, item: &Q) -> Cursor<T, (), C> where C: Compare<Q, T> {
        self.map.upper_bound(item)
    }

    /// Returns an iterator over the set's items that are equivalent to the given item.
    pub fn equal_range<Q: ?Sized>(&self, item: &Q) -> Range<T> where C: Compare<Q, T> {
        Range(self.map.equal_range(item))
    }

    /// Returns an iterator over the set's items that lie in the given range.
    ///
    /// The iterator yields the items in ascending order according to the set's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::Bound::{Included, Excluded, Unbounded};
    ///
    /// let mut set = rbtree::Set::new();
    ///
    /// set.insert("b");
    /// set.insert("a");
    /// set.insert("c");
    ///
    /// assert_eq!(set.range::<&str, &str>(Unbounded, Unbounded).collect::<Vec<_>>(),
    ///     [&"a", &"b", &"c"]);
    /// assert_eq!(set.range(Excluded(&"a"), Included(&"f")).collect::<Vec<_>>(),
    ///     [&"b", &"c"]);
    /// assert_eq!(set.range(Included(&"a"), Excluded(&"b")).collect::<Vec<_>>(), [&"a"]);
    /// ```
    pub fn range<Min: ?Sized, Max: ?Sized>(&self, min: Bound<&Min>, max: Bound<&Max>)
        -> Range<T> where C: Compare<Min, T> + Compare<Max, T> {

        Range(self.map.range(min, max))
    }

    /// Removes every item that lies in the given range and returns how many were removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::Bound::{Included, Unbounded};
    ///
    /// let mut set: rbtree::Set<_> = (0..6).collect();
    ///
    /// assert_eq!(set.remove_range(Unbounded, Included(&2)), 3);
    /// assert_eq!(set.iter().cloned().collect::<Vec<_>>(), [3, 4, 5]);
    /// ```
    pub fn remove_range<Min: ?Sized, Max: ?Sized>(&mut self, min: Bound<&Min>, max: Bound<&Max>)
        -> usize where C: Compare<Min, T> + Compare<Max, T> {

        self.map.remove_range(min, max)
    }

    /// Returns a reference to the set's minimum item, or `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = rbtree::Set::new();
    /// assert_eq!(set.first(), None);
    ///
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    pub fn first(&self) -> Option<&T> { self.map.first_key_value().map(|e| e.0) }

    /// Returns a reference to the set's maximum item, or `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = rbtree::Set::new();
    /// assert_eq!(set.last(), None);
    ///
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// assert_eq!(set.last(), Some(&3));
    /// ```
    pub fn last(&self) -> Option<&T> { self.map.last_key_value().map(|e| e.0) }

    /// Removes and returns the set's minimum item, or `None` if the set is empty.
    pub fn remove_min(&mut self) -> Option<T> { self.map.remove_min().map(|e| e.0) }

    /// Removes and returns the set's maximum item, or `None` if the set is empty.
    pub fn remove_max(&mut self) -> Option<T> { self.map.remove_max().map(|e| e.0) }

    pub fn begin(&self) -> Cursor<T, (), C> { self.map.begin() }

    pub fn end(&self) -> Cursor<T, (), C> { self.map.end() }

    pub fn rbegin(&self) -> RevCursor<T, (), C> { self.map.rbegin() }

    pub fn rend(&self) -> RevCursor<T, (), C> { self.map.rend() }

    /// Returns an iterator that consumes the set.
    ///
    /// The iterator yields the items in ascending order according to the set's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = rbtree::Set::new();
    ///
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut it = set.into_iter();
    /// assert_eq!(it.next(), Some(1));
    /// assert_eq!(it.next(), Some(2));
    /// assert_eq!(it.next(), Some(3));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn into_iter(self) -> IntoIter<T> { IntoIter(self.map.into_iter()) }

    /// Returns an iterator over the set.
    ///
    /// The iterator yields the items in ascending order according to the set's comparator.
    pub fn iter(&self) -> Iter<T> { Iter(self.map.iter()) }
}

impl<T, C> Clone for Set<T, C> where T: Clone, C: Compare<T> + Clone {
    fn clone(&self) -> Self { Set { map: self.map.clone() } }
    fn clone_from(&mut self, source: &Self) { self.map.clone_from(&source.map); }
}

impl<T, C> Debug for Set<T, C> where T: Debug, C: Compare<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C> Default for Set<T, C> where C: Compare<T> + Default {
    fn default() -> Self { Set { map: Default::default() } }
}

impl<T, C> Extend<T> for Set<T, C> where C: Compare<T> {
    fn extend<I: IntoIterator<Item=T>>(&mut self, it: I) {
        for item in it { self.insert(item); }
    }
}

impl<T, C> iter::FromIterator<T> for Set<T, C> where C: Compare<T> + Default {
    fn from_iter<I: IntoIterator<Item=T>>(it: I) -> Self {
        let mut set: Self = Default::default();
        set.extend(it);
        set
    }
}

impl<T, C> Hash for Set<T, C> where T: Hash, C: Compare<T> {
    fn hash<H: hash::Hasher>(&self, h: &mut H) { self.map.hash(h); }
}

impl<'a, T, C> IntoIterator for &'a Set<T, C> where C: Compare<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Iter<'a, T> { self.iter() }
}

impl<T, C> IntoIterator for Set<T, C> where C: Compare<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> IntoIter<T> { self.into_iter() }
}

impl<T, C> PartialEq for Set<T, C> where C: Compare<T> {
    fn eq(&self, other: &Self) -> bool { self.map == other.map }
}

impl<T, C> Eq for Set<T, C> where C: Compare<T> {}

impl<T, C> PartialOrd for Set<T, C> where C: Compare<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.map.partial_cmp(&other.map)
    }
}

impl<T, C> Ord for Set<T, C> where C: Compare<T> {
    fn cmp(&self, other: &Self) -> Ordering { Ord::cmp(&self.map, &other.map) }
}

/// An iterator that consumes the set.
///
/// The iterator yields the items in ascending order according to the set's comparator.
///
/// # Examples
///
/// Acquire through [`Set::into_iter`](struct.Set.html#method.into_iter) or the
/// `IntoIterator` trait:
///
/// ```
/// let mut set = rbtree::Set::new();
///
/// set.insert(2);
/// set.insert(1);
/// set.insert(3);
///
/// for item in set {
///     println!("{:?}", item);
/// }
/// ```
pub struct IntoIter<T>(map::IntoIter<T, ()>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<T> { self.0.next().map(|e| e.0) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> { self.0.next_back().map(|e| e.0) }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

/// An iterator over the set.
///
/// The iterator yields the items in ascending order according to the set's comparator.
///
/// # Examples
///
/// Acquire through [`Set::iter`](struct.Set.html#method.iter) or the `IntoIterator` trait:
///
/// ```
/// let mut set = rbtree::Set::new();
///
/// set.insert(2);
/// set.insert(1);
/// set.insert(3);
///
/// for item in &set {
///     println!("{:?}", item);
/// }
/// ```
pub struct Iter<'a, T: 'a>(map::Iter<'a, T, ()>);

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Iter<'a, T> { Iter(self.0.clone()) }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<&'a T> { self.0.next().map(|e| e.0) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> { self.0.next_back().map(|e| e.0) }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

/// An iterator over the set's items that lie in a given range.
///
/// Acquire through [`Set::range`](struct.Set.html#method.range).
pub struct Range<'a, T: 'a>(map::Range<'a, T, ()>);

impl<'a, T> Clone for Range<'a, T> {
    fn clone(&self) -> Range<'a, T> { Range(self.0.clone()) }
}

impl<'a, T> Iterator for Range<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<&'a T> { self.0.next().map(|e| e.0) }
}

impl<'a, T> DoubleEndedIterator for Range<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> { self.0.next_back().map(|e| e.0) }
}

impl<'a, T> FusedIterator for Range<'a, T> {}
