//! A red-black tree whose nodes live in an arena.
//!
//! This is the structure behind [`Map`](../map/struct.Map.html) and
//! [`Set`](../set/struct.Set.html). It is exposed for callers that want to work with node
//! handles and cursors directly.

mod insert;
mod iter;
mod node;
mod remove;
mod rotate;
mod search;


use compare::{Compare, Natural};
use std::fmt::{self, Debug};
use std::mem;
use self::node::{NIL, NodeIndex, Store};

pub use self::iter::{Cursor, IntoIter, Iter, IterMut, Range, RevCursor};

/// A handle to an element of a [`Tree`](struct.Tree.html).
///
/// Handles are returned by insertion and lookup and accepted by the operations that act on a
/// specific element. A handle is invalidated when its element is removed; operations given an
/// invalidated handle do nothing and return `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Handle {
    index: NodeIndex,
    generation: u32,
}

/// A red-black tree ordered by a comparator over its keys.
///
/// Every node is stored in an arena owned by the tree. Empty leaf positions all refer to one
/// permanently black sentinel slot. The tree caches its minimum and maximum nodes, so
/// [`begin`](#method.begin), [`min`](#method.min) and [`max`](#method.max) take constant time.
///
/// The behavior of this tree is unspecified if a key's ordering relative to any other key
/// changes while the key is in the tree. This is normally only possible through `Cell`,
/// `RefCell`, or unsafe code.
pub struct Tree<K, V, C = Natural<K>> where C: Compare<K> {
    store: Store<K, V>,
    root: NodeIndex,
    min: NodeIndex,
    max: NodeIndex,
    cmp: C,
}

impl<K, V> Tree<K, V> where K: Ord {
    /// Creates an empty tree ordered according to the natural order of its keys.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = rbtree::Tree::new();
    ///
    /// tree.insert(2, "b");
    /// tree.insert(1, "a");
    /// tree.insert(3, "c");
    ///
    /// let mut it = tree.iter();
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn new() -> Self { Tree::with_cmp(compare::natural()) }
}

impl<K, V, C> Tree<K, V, C> where C: Compare<K> {
    /// Creates an empty tree ordered according to the given comparator.
    pub fn with_cmp(cmp: C) -> Self {
        Tree { store: Store::new(), root: NIL, min: NIL, max: NIL, cmp: cmp }
    }

    /// Checks if the tree is empty.
    pub fn is_empty(&self) -> bool { self.root == NIL }

    /// Returns the number of elements in the tree.
    pub fn len(&self) -> usize { self.store.len() }

    /// Returns the maximum number of elements a tree with this key and value type can hold.
    pub fn max_size(&self) -> usize { self.store.limit() }

    /// Returns a reference to the tree's comparator.
    pub fn cmp(&self) -> &C { &self.cmp }

    /// Removes all elements from the tree.
    ///
    /// Every handle into the tree is invalidated. The node store keeps its capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = rbtree::Tree::new();
    /// let (handle, _) = tree.insert(1, "a");
    /// tree.insert(2, "b");
    ///
    /// tree.clear();
    ///
    /// assert!(tree.is_empty());
    /// assert!(tree.begin() == tree.end());
    /// assert_eq!(tree.key_value(handle), None);
    /// ```
    pub fn clear(&mut self) {
        log::trace!("clearing tree of {} nodes", self.len());

        let mut stack = vec![];
        if self.root != NIL { stack.push(self.root); }

        // Children are read before their parent's slot is released.
        while let Some(node) = stack.pop() {
            let (left, right) = (self.store.left(node), self.store.right(node));
            if left != NIL { stack.push(left); }
            if right != NIL { stack.push(right); }
            self.store.free(node);
        }

        self.root = NIL;
        self.min = NIL;
        self.max = NIL;
        self.store.reset_sentinel();
    }

    /// Swaps the contents of this tree with another in constant time.
    ///
    /// Handles move with their elements.
    pub fn swap(&mut self, other: &mut Self) { mem::swap(self, other); }

    /// Returns a reference to the given handle's key and value, or `None` if the handle has
    /// been invalidated.
    pub fn key_value(&self, handle: Handle) -> Option<(&K, &V)> {
        if self.is_live(handle) { Some(self.store.key_value(handle.index)) } else { None }
    }

    /// Returns a reference to the given handle's key and a mutable reference to its value, or
    /// `None` if the handle has been invalidated.
    pub fn key_value_mut(&mut self, handle: Handle) -> Option<(&K, &mut V)> {
        if self.is_live(handle) { Some(self.store.key_value_mut(handle.index)) } else { None }
    }

    /// Checks if the given handle still refers to an element of this tree.
    pub fn is_live(&self, handle: Handle) -> bool {
        handle.index != NIL && self.store.is_live(handle.index, handle.generation)
    }

    /// Returns a reference to the tree's minimum key and its value, or `None` if the tree is
    /// empty.
    pub fn min(&self) -> Option<(&K, &V)> { self.begin().get() }

    /// Returns a reference to the tree's maximum key and its value, or `None` if the tree is
    /// empty.
    pub fn max(&self) -> Option<(&K, &V)> { self.rbegin().get() }

    fn handle(&self, index: NodeIndex) -> Handle {
        Handle { index: index, generation: self.store[index].generation }
    }

    pub(crate) fn value_mut_at(&mut self, handle: Handle) -> &mut V {
        self.store.key_value_mut(handle.index).1
    }

    pub(crate) fn key_value_at(&self, handle: Handle) -> (&K, &V) {
        self.store.key_value(handle.index)
    }
}

impl<K, V, C> Clone for Tree<K, V, C> where K: Clone, V: Clone, C: Compare<K> + Clone {
    /// Builds a new tree by reinserting this tree's elements in order.
    ///
    /// The result holds the same sorted contents, but its shape may differ from this tree's.
    fn clone(&self) -> Self {
        let mut tree = Tree::with_cmp(self.cmp.clone());
        tree.extend_sorted(self);
        tree
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.cmp = source.cmp.clone();
        log::trace!("reinserting {} entries", source.len());
        self.extend_sorted(source);
    }
}

impl<K, V, C> Tree<K, V, C> where C: Compare<K> {
    fn extend_sorted(&mut self, source: &Self) where K: Clone, V: Clone {
        for (key, value) in source.iter() {
            self.insert_hint(None, key.clone(), value.clone());
        }
    }
}

impl<K, V, C> Debug for Tree<K, V, C> where K: Debug, V: Debug, C: Compare<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> Default for Tree<K, V, C> where C: Compare<K> + Default {
    fn default() -> Self { Tree::with_cmp(Default::default()) }
}

impl<K, V, C> Extend<(K, V)> for Tree<K, V, C> where C: Compare<K> {
    fn extend<I: IntoIterator<Item=(K, V)>>(&mut self, it: I) {
        for (k, v) in it { self.insert(k, v); }
    }
}

impl<K, V> FromIterator<(K, V)> for Tree<K, V> where K: Ord {
    fn from_iter<I: IntoIterator<Item=(K, V)>>(it: I) -> Self {
        let mut tree = Tree::new();
        tree.extend(it);
        tree
    }
}

impl<'a, K, V, C> IntoIterator for &'a Tree<K, V, C> where C: Compare<K> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Iter<'a, K, V> { self.iter() }
}

impl<'a, K, V, C> IntoIterator for &'a mut Tree<K, V, C> where C: Compare<K> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;
    fn into_iter(self) -> IterMut<'a, K, V> { self.iter_mut() }
}

impl<K, V, C> IntoIterator for Tree<K, V, C> where C: Compare<K> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;
    fn into_iter(self) -> IntoIter<K, V> { self.into_iter() }
}
