use compare::Compare;
use std::fmt::{self, Debug};
use std::iter::FusedIterator;
use std::ptr;
use std::vec;
use super::{Handle, Tree};
use super::node::{Dir, Left, NIL, NodeIndex, Right, Store};

impl<K, V> Store<K, V> {
    /// Returns the last node reached by following `D` links from `node`.
    ///
    /// `node` must hold an element.
    pub fn extremum<D: Dir>(&self, mut node: NodeIndex) -> NodeIndex {
        loop {
            match D::child(&self[node]) {
                NIL => return node,
                child => node = child,
            }
        }
    }

    /// Returns the in-order neighbor of `node` in direction `D`, or the sentinel if `node` is
    /// the extremum in that direction.
    ///
    /// Only links are read, so this also works from a freed slot whose links are intact.
    pub fn step<D: Dir>(&self, mut node: NodeIndex) -> NodeIndex {
        let child = D::child(&self[node]);
        if child != NIL { return self.extremum::<D::Opposite>(child); }

        let mut parent = self.parent(node);

        while parent != NIL && D::child(&self[parent]) == node {
            node = parent;
            parent = self.parent(node);
        }

        parent
    }
}

impl<K, V, C> Tree<K, V, C> where C: Compare<K> {
    /// Steps from `node` in direction `D`.
    ///
    /// The sentinel sits on a ring with the elements: stepping right from it yields the
    /// minimum, and stepping left from it yields the maximum.
    pub(super) fn step<D: Dir>(&self, node: NodeIndex) -> NodeIndex {
        if node != NIL { return self.store.step::<D>(node); }
        if D::left() { self.max } else { self.min }
    }

    pub(super) fn cursor_at(&self, index: NodeIndex) -> Cursor<K, V, C> {
        Cursor { tree: self, index: index }
    }

    /// Returns a cursor at the tree's minimum element, or at the end if the tree is empty.
    pub fn begin(&self) -> Cursor<K, V, C> { self.cursor_at(self.min) }

    /// Returns a cursor at the end of the tree, the position after the maximum element.
    pub fn end(&self) -> Cursor<K, V, C> { self.cursor_at(NIL) }

    /// Returns a reverse cursor at the tree's maximum element.
    pub fn rbegin(&self) -> RevCursor<K, V, C> { RevCursor { base: self.end() } }

    /// Returns a reverse cursor at the position before the tree's minimum element.
    pub fn rend(&self) -> RevCursor<K, V, C> { RevCursor { base: self.begin() } }

    /// Returns a cursor at the element the given handle refers to, or `None` if the handle has
    /// been invalidated.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = rbtree::Tree::new();
    /// for key in 1..4 { tree.insert(key, ()); }
    /// let two = tree.find(&2).unwrap();
    ///
    /// let mut cursor = tree.cursor(two).unwrap();
    /// cursor.move_next();
    /// assert_eq!(cursor.key(), Some(&3));
    /// ```
    pub fn cursor(&self, handle: Handle) -> Option<Cursor<K, V, C>> {
        if self.is_live(handle) { Some(self.cursor_at(handle.index)) } else { None }
    }

    /// Returns an iterator over the tree's elements, in ascending order.
    pub fn iter(&self) -> Iter<K, V> {
        Iter { store: &self.store, front: self.min, back: self.max, len: self.len() }
    }

    /// Returns an iterator over the tree's elements with mutable references to their values,
    /// in ascending order.
    pub fn iter_mut(&mut self) -> IterMut<K, V> {
        let mut order = Vec::with_capacity(self.len());
        let mut node = self.min;

        while node != NIL {
            order.push(node);
            node = self.store.step::<Right>(node);
        }

        IterMut { entries: self.store.entries_mut(&order).into_iter() }
    }

    /// Returns a consuming iterator over the tree's elements, in ascending order.
    pub fn into_iter(self) -> IntoIter<K, V> {
        let len = self.len();
        IntoIter { store: self.store, front: self.min, back: self.max, len: len }
    }
}

/// A position in a [`Tree`](struct.Tree.html): either an element or the end.
///
/// The end position lies both after the maximum and before the minimum, so moving a cursor
/// forward and then back always returns it to where it started. A cursor borrows its tree and
/// therefore cannot outlive a mutation.
pub struct Cursor<'a, K: 'a, V: 'a, C: 'a> where C: Compare<K> {
    tree: &'a Tree<K, V, C>,
    index: NodeIndex,
}

impl<'a, K, V, C> Cursor<'a, K, V, C> where C: Compare<K> {
    /// Checks if the cursor is at the end of the tree.
    pub fn is_end(&self) -> bool { self.index == NIL }

    /// Returns the key and value at the cursor, or `None` at the end.
    pub fn get(&self) -> Option<(&'a K, &'a V)> {
        if self.is_end() { None } else { Some(self.tree.store.key_value(self.index)) }
    }

    pub fn key(&self) -> Option<&'a K> { self.get().map(|e| e.0) }

    pub fn value(&self) -> Option<&'a V> { self.get().map(|e| e.1) }

    /// Returns a handle to the element at the cursor, or `None` at the end.
    pub fn handle(&self) -> Option<Handle> {
        if self.is_end() { None } else { Some(self.tree.handle(self.index)) }
    }

    /// Moves the cursor to the next element.
    ///
    /// From the maximum the cursor moves to the end, and from the end it moves to the minimum.
    pub fn move_next(&mut self) { self.index = self.tree.step::<Right>(self.index); }

    /// Moves the cursor to the previous element.
    ///
    /// From the minimum the cursor moves to the end, and from the end it moves to the maximum.
    pub fn move_prev(&mut self) { self.index = self.tree.step::<Left>(self.index); }

    /// Returns the element the cursor would reach with `move_next`.
    pub fn peek_next(&self) -> Option<(&'a K, &'a V)> {
        let mut next = *self;
        next.move_next();
        next.get()
    }

    /// Returns the element the cursor would reach with `move_prev`.
    pub fn peek_prev(&self) -> Option<(&'a K, &'a V)> {
        let mut prev = *self;
        prev.move_prev();
        prev.get()
    }
}

impl<'a, K, V, C> Clone for Cursor<'a, K, V, C> where C: Compare<K> {
    fn clone(&self) -> Self { *self }
}

impl<'a, K, V, C> Copy for Cursor<'a, K, V, C> where C: Compare<K> {}

impl<'a, K, V, C> PartialEq for Cursor<'a, K, V, C> where C: Compare<K> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl<'a, K, V, C> Eq for Cursor<'a, K, V, C> where C: Compare<K> {}

impl<'a, K, V, C> Debug for Cursor<'a, K, V, C> where K: Debug, V: Debug, C: Compare<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}

/// A cursor that walks a [`Tree`](struct.Tree.html) in descending order.
///
/// It wraps a forward cursor and refers to the element before it, so `rbegin` wraps `end`
/// and `rend` wraps `begin`.
pub struct RevCursor<'a, K: 'a, V: 'a, C: 'a> where C: Compare<K> {
    base: Cursor<'a, K, V, C>,
}

impl<'a, K, V, C> RevCursor<'a, K, V, C> where C: Compare<K> {
    /// Returns the forward cursor this cursor wraps.
    pub fn base(&self) -> Cursor<'a, K, V, C> { self.base }

    /// Checks if the cursor has passed the tree's minimum element.
    pub fn is_end(&self) -> bool { self.base.index == self.base.tree.min }

    pub fn get(&self) -> Option<(&'a K, &'a V)> {
        if self.is_end() { None } else { self.base.peek_prev() }
    }

    pub fn key(&self) -> Option<&'a K> { self.get().map(|e| e.0) }

    pub fn value(&self) -> Option<&'a V> { self.get().map(|e| e.1) }

    pub fn handle(&self) -> Option<Handle> {
        if self.is_end() {
            None
        } else {
            let mut prev = self.base;
            prev.move_prev();
            prev.handle()
        }
    }

    /// Moves the cursor to the next smaller element.
    pub fn move_next(&mut self) { self.base.move_prev(); }

    /// Moves the cursor to the next larger element.
    pub fn move_prev(&mut self) { self.base.move_next(); }
}

impl<'a, K, V, C> Clone for RevCursor<'a, K, V, C> where C: Compare<K> {
    fn clone(&self) -> Self { *self }
}

impl<'a, K, V, C> Copy for RevCursor<'a, K, V, C> where C: Compare<K> {}

impl<'a, K, V, C> PartialEq for RevCursor<'a, K, V, C> where C: Compare<K> {
    fn eq(&self, other: &Self) -> bool { self.base == other.base }
}

impl<'a, K, V, C> Eq for RevCursor<'a, K, V, C> where C: Compare<K> {}

/// An iterator over a tree's elements.
pub struct Iter<'a, K: 'a, V: 'a> {
    store: &'a Store<K, V>,
    front: NodeIndex,
    back: NodeIndex,
    len: usize,
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Iter { store: self.store, front: self.front, back: self.back, len: self.len }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        if self.len == 0 { return None; }
        let node = self.front;
        self.front = self.store.step::<Right>(node);
        self.len -= 1;
        Some(self.store.key_value(node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.len, Some(self.len)) }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        if self.len == 0 { return None; }
        let node = self.back;
        self.back = self.store.step::<Left>(node);
        self.len -= 1;
        Some(self.store.key_value(node))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

/// An iterator over a tree's elements with mutable references to their values.
pub struct IterMut<'a, K: 'a, V: 'a> {
    entries: vec::IntoIter<(&'a K, &'a mut V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    fn next(&mut self) -> Option<(&'a K, &'a mut V)> { self.entries.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.entries.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a mut V)> { self.entries.next_back() }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}

impl<'a, K, V> FusedIterator for IterMut<'a, K, V> {}

/// A consuming iterator over a tree's elements.
pub struct IntoIter<K, V> {
    store: Store<K, V>,
    front: NodeIndex,
    back: NodeIndex,
    len: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    // Freeing a slot keeps its links, so the walk can continue through already-yielded nodes.
    fn next(&mut self) -> Option<(K, V)> {
        if self.len == 0 { return None; }
        let node = self.front;
        self.front = self.store.step::<Right>(node);
        self.len -= 1;
        Some(self.store.free(node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.len, Some(self.len)) }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        if self.len == 0 { return None; }
        let node = self.back;
        self.back = self.store.step::<Left>(node);
        self.len -= 1;
        Some(self.store.free(node))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

/// An iterator over the elements of a tree whose keys lie in a range.
pub struct Range<'a, K: 'a, V: 'a> {
    store: &'a Store<K, V>,
    front: NodeIndex,
    back: NodeIndex,
    done: bool,
}

impl<'a, K, V> Range<'a, K, V> {
    pub(super) fn new(store: &'a Store<K, V>, front: NodeIndex, back: NodeIndex, done: bool)
        -> Self {
        Range { store: store, front: front, back: back, done: done }
    }
}

impl<'a, K, V> Clone for Range<'a, K, V> {
    fn clone(&self) -> Self {
        Range { store: self.store, front: self.front, back: self.back, done: self.done }
    }
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        if self.done { return None; }
        let node = self.front;
        if node == self.back {
            self.done = true;
        } else {
            self.front = self.store.step::<Right>(node);
        }
        Some(self.store.key_value(node))
    }
}

impl<'a, K, V> DoubleEndedIterator for Range<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        if self.done { return None; }
        let node = self.back;
        if node == self.front {
            self.done = true;
        } else {
            self.back = self.store.step::<Left>(node);
        }
        Some(self.store.key_value(node))
    }
}

impl<'a, K, V> FusedIterator for Range<'a, K, V> {}
