use compare::Compare;
use std::cmp::Ordering::*;
use std::collections::Bound;
use super::{Cursor, Handle, Range, Tree};
use super::node::{Left, NIL, NodeIndex};

impl<K, V, C> Tree<K, V, C> where C: Compare<K> {
    /// Returns a cursor at the element with the given key, or at the end of the tree if there
    /// is no such element.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = rbtree::Tree::new();
    /// tree.insert(1, "a");
    ///
    /// assert_eq!(tree.search(&1).get(), Some((&1, &"a")));
    /// assert!(tree.search(&2) == tree.end());
    /// ```
    pub fn search<Q: ?Sized>(&self, key: &Q) -> Cursor<K, V, C> where C: Compare<Q, K> {
        self.cursor_at(self.find_index(key))
    }

    /// Returns a handle to the element with the given key, or `None` if the tree does not
    /// contain the key.
    pub fn find<Q: ?Sized>(&self, key: &Q) -> Option<Handle> where C: Compare<Q, K> {
        match self.find_index(key) {
            NIL => None,
            node => Some(self.handle(node)),
        }
    }

    /// Checks if the tree contains the given key.
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool where C: Compare<Q, K> {
        self.find_index(key) != NIL
    }

    /// Returns a reference to the value associated with the given key, or `None` if the tree
    /// does not contain the key.
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V> where C: Compare<Q, K> {
        match self.find_index(key) {
            NIL => None,
            node => Some(self.store.key_value(node).1),
        }
    }

    /// Returns a mutable reference to the value associated with the given key, or `None` if the
    /// tree does not contain the key.
    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V> where C: Compare<Q, K> {
        match self.find_index(key) {
            NIL => None,
            node => Some(self.store.key_value_mut(node).1),
        }
    }

    /// Returns a cursor at the first element whose key is not less than the given key, or at
    /// the end of the tree if there is no such element.
    ///
    /// # Examples
    ///
    /// ```
    /// let tree: rbtree::Tree<_, _> = vec![(10, ()), (20, ()), (30, ())].into_iter().collect();
    ///
    /// assert_eq!(tree.lower_bound(&15).key(), Some(&20));
    /// assert_eq!(tree.lower_bound(&10).key(), Some(&10));
    /// assert!(tree.lower_bound(&31).is_end());
    /// ```
    pub fn lower_bound<Q: ?Sized>(&self, key: &Q) -> Cursor<K, V, C> where C: Compare<Q, K> {
        self.cursor_at(self.lower_bound_index(key))
    }

    /// Returns a cursor at the first element whose key is greater than the given key, or at the
    /// end of the tree if there is no such element.
    ///
    /// # Examples
    ///
    /// ```
    /// let tree: rbtree::Tree<_, _> = vec![(10, ()), (20, ()), (30, ())].into_iter().collect();
    ///
    /// assert_eq!(tree.upper_bound(&20).key(), Some(&30));
    /// assert_eq!(tree.upper_bound(&5).key(), Some(&10));
    /// assert!(tree.upper_bound(&30).is_end());
    /// ```
    pub fn upper_bound<Q: ?Sized>(&self, key: &Q) -> Cursor<K, V, C> where C: Compare<Q, K> {
        self.cursor_at(self.upper_bound_index(key))
    }

    /// Returns an iterator over the elements whose keys lie in the given range.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::Bound::{Excluded, Included, Unbounded};
    ///
    /// let tree: rbtree::Tree<_, _> = vec![(1, "a"), (2, "b"), (3, "c")].into_iter().collect();
    ///
    /// assert_eq!(tree.range::<i32, i32>(Unbounded, Unbounded).count(), 3);
    /// assert_eq!(tree.range(Excluded(&1), Included(&5)).collect::<Vec<_>>(),
    ///     [(&2, &"b"), (&3, &"c")]);
    /// assert_eq!(tree.range(Included(&1), Excluded(&2)).collect::<Vec<_>>(), [(&1, &"a")]);
    /// assert_eq!(tree.range(Excluded(&2), Excluded(&3)).count(), 0);
    /// ```
    pub fn range<Min: ?Sized, Max: ?Sized>(&self, min: Bound<&Min>, max: Bound<&Max>)
        -> Range<K, V> where C: Compare<Min, K> + Compare<Max, K> {

        match self.range_indices(min, max) {
            Some((front, back)) => Range::new(&self.store, front, back, false),
            None => Range::new(&self.store, NIL, NIL, true),
        }
    }

    /// Returns the first and last nodes whose keys lie in the given range, or `None` if the
    /// range holds no element.
    pub(super) fn range_indices<Min: ?Sized, Max: ?Sized>(&self, min: Bound<&Min>,
                                                          max: Bound<&Max>)
        -> Option<(NodeIndex, NodeIndex)> where C: Compare<Min, K> + Compare<Max, K> {

        let front = match min {
            Bound::Unbounded => self.min,
            Bound::Included(key) => self.lower_bound_index(key),
            Bound::Excluded(key) => self.upper_bound_index(key),
        };

        // The sentinel's predecessor is the maximum, so an exhausted bound clamps to it.
        let back = match max {
            Bound::Unbounded => self.max,
            Bound::Included(key) => self.step::<Left>(self.upper_bound_index(key)),
            Bound::Excluded(key) => self.step::<Left>(self.lower_bound_index(key)),
        };

        if front == NIL || back == NIL ||
           self.cmp.compares_gt(self.store.key(front), self.store.key(back)) {
            None
        } else {
            Some((front, back))
        }
    }

    pub(super) fn find_index<Q: ?Sized>(&self, key: &Q) -> NodeIndex where C: Compare<Q, K> {
        let mut node = self.root;

        while node != NIL {
            node = match self.cmp.compare(key, self.store.key(node)) {
                Equal => return node,
                Less => self.store.left(node),
                Greater => self.store.right(node),
            };
        }

        NIL
    }

    // Both bounds keep the best candidate seen so far and keep looking left of it for a
    // tighter one.
    fn lower_bound_index<Q: ?Sized>(&self, key: &Q) -> NodeIndex where C: Compare<Q, K> {
        let mut node = self.root;
        let mut best = NIL;

        while node != NIL {
            if self.cmp.compares_gt(key, self.store.key(node)) {
                node = self.store.right(node);
            } else {
                best = node;
                node = self.store.left(node);
            }
        }

        best
    }

    fn upper_bound_index<Q: ?Sized>(&self, key: &Q) -> NodeIndex where C: Compare<Q, K> {
        let mut node = self.root;
        let mut best = NIL;

        while node != NIL {
            if self.cmp.compares_lt(key, self.store.key(node)) {
                best = node;
                node = self.store.left(node);
            } else {
                node = self.store.right(node);
            }
        }

        best
    }
}
