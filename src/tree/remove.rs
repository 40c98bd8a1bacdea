use compare::Compare;
use std::collections::Bound;
use super::{Handle, Tree};
use super::node::{Color, Dir, Left, NIL, NodeIndex, Right};

impl<K, V, C> Tree<K, V, C> where C: Compare<K> {
    /// Removes the element the given handle refers to and returns its key and value, or `None`
    /// if the handle has been invalidated.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = rbtree::Tree::new();
    /// let (handle, _) = tree.insert(1, "a");
    ///
    /// assert_eq!(tree.remove(handle), Some((1, "a")));
    /// assert_eq!(tree.remove(handle), None);
    /// assert!(tree.is_empty());
    /// ```
    pub fn remove(&mut self, handle: Handle) -> Option<(K, V)> {
        if self.is_live(handle) { Some(self.unlink(handle.index)) } else { None }
    }

    /// Removes the element with the given key and returns its key and value, or `None` if the
    /// tree does not contain the key.
    pub fn remove_key<Q: ?Sized>(&mut self, key: &Q) -> Option<(K, V)> where C: Compare<Q, K> {
        match self.find_index(key) {
            NIL => None,
            node => Some(self.unlink(node)),
        }
    }

    /// Removes the tree's minimum element and returns its key and value.
    pub fn remove_min(&mut self) -> Option<(K, V)> {
        match self.min {
            NIL => None,
            node => Some(self.unlink(node)),
        }
    }

    /// Removes the tree's maximum element and returns its key and value.
    pub fn remove_max(&mut self) -> Option<(K, V)> {
        match self.max {
            NIL => None,
            node => Some(self.unlink(node)),
        }
    }

    /// Removes every element whose key lies in the given range and returns how many were
    /// removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::Bound::{Excluded, Included};
    ///
    /// let mut tree: rbtree::Tree<_, _> = (0..10).map(|k| (k, ())).collect();
    ///
    /// assert_eq!(tree.remove_range(Included(&2), Excluded(&7)), 5);
    /// assert!(tree.iter().map(|e| *e.0).eq(vec![0, 1, 7, 8, 9]));
    /// assert_eq!(tree.remove_range(Included(&3), Included(&6)), 0);
    /// ```
    pub fn remove_range<Min: ?Sized, Max: ?Sized>(&mut self, min: Bound<&Min>, max: Bound<&Max>)
        -> usize where C: Compare<Min, K> + Compare<Max, K> {

        let (mut node, back) = match self.range_indices(min, max) {
            Some(ends) => ends,
            None => return 0,
        };

        let mut removed = 0;

        // Unlinking relinks nodes without moving them, so `next` stays valid.
        loop {
            let next = self.store.step::<Right>(node);
            self.unlink(node);
            removed += 1;
            if node == back { break; }
            node = next;
        }

        log::trace!("removed {} nodes in range", removed);
        removed
    }

    fn unlink(&mut self, node: NodeIndex) -> (K, V) {
        // A removed extremum is replaced by its in-order neighbor, found before any relinking.
        if node == self.min { self.min = self.step::<Right>(node); }
        if node == self.max { self.max = self.step::<Left>(node); }

        let mut removed_color = self.store.color(node);
        let replacement;

        if self.store.left(node) == NIL {
            replacement = self.store.right(node);
            self.transplant(node, replacement);
        } else if self.store.right(node) == NIL {
            replacement = self.store.left(node);
            self.transplant(node, replacement);
        } else {
            let successor = self.store.extremum::<Left>(self.store.right(node));
            removed_color = self.store.color(successor);
            replacement = self.store.right(successor);

            if self.store.parent(successor) == node {
                // `replacement` may be the sentinel; the fixup climbs from its parent link.
                self.store[replacement].parent = successor;
            } else {
                self.transplant(successor, replacement);
                let right = self.store.right(node);
                self.store[successor].right = right;
                self.store[right].parent = successor;
            }

            self.transplant(node, successor);
            let left = self.store.left(node);
            self.store[successor].left = left;
            self.store[left].parent = successor;
            let color = self.store.color(node);
            self.store.set_color(successor, color);
        }

        if removed_color == Color::Black { self.remove_fixup(replacement); }

        self.store.reset_sentinel();
        self.store.free(node)
    }

    /// Replaces the subtree rooted at `old` with the one rooted at `new` in `old`'s parent.
    fn transplant(&mut self, old: NodeIndex, new: NodeIndex) {
        let parent = self.store.parent(old);
        self.replace_child(parent, old, new);
        self.store[new].parent = parent;
    }

    fn remove_fixup(&mut self, mut node: NodeIndex) {
        while node != self.root && self.store.is_black(node) {
            let parent = self.store.parent(node);

            node = if self.store.left(parent) == node {
                self.remove_step::<Left>(node)
            } else {
                self.remove_step::<Right>(node)
            };
        }

        self.store.set_color(node, Color::Black);
    }

    /// Restores one unit of black height below `node`, the `D` child of its parent. Returns the
    /// node from which the fixup must continue.
    fn remove_step<D: Dir>(&mut self, node: NodeIndex) -> NodeIndex {
        let mut parent = self.store.parent(node);
        let mut sibling = D::Opposite::child(&self.store[parent]);

        if self.store.is_red(sibling) {
            self.store.set_color(sibling, Color::Black);
            self.store.set_color(parent, Color::Red);
            self.rotate::<D>(parent);
            parent = self.store.parent(node);
            sibling = D::Opposite::child(&self.store[parent]);
        }

        let near = D::child(&self.store[sibling]);
        let far = D::Opposite::child(&self.store[sibling]);

        if self.store.is_black(near) && self.store.is_black(far) {
            self.store.set_color(sibling, Color::Red);
            return parent;
        }

        if self.store.is_black(far) {
            self.store.set_color(near, Color::Black);
            self.store.set_color(sibling, Color::Red);
            self.rotate::<D::Opposite>(sibling);
            sibling = D::Opposite::child(&self.store[parent]);
        }

        let color = self.store.color(parent);
        self.store.set_color(sibling, color);
        self.store.set_color(parent, Color::Black);
        let far = D::Opposite::child(&self.store[sibling]);
        self.store.set_color(far, Color::Black);
        self.rotate::<D>(parent);
        self.root
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
    use std::collections::Bound::{self, Excluded, Included, Unbounded};
    use super::super::Tree;
    use super::super::node::NIL;
    use super::super::test::assert_red_black_tree;

    #[test]
    fn removing_extremes_recomputes_them() {
        let mut tree = Tree::new();
        for key in &[5, 1, 9, 3] { tree.insert(*key, ()); }

        tree.remove_key(&9);
        assert_eq!(tree.max().map(|e| *e.0), Some(5));

        tree.remove_key(&1);
        assert_eq!(tree.min().map(|e| *e.0), Some(3));
        assert_red_black_tree(&tree);
    }

    #[test]
    fn removing_the_last_element_resets_the_tree() {
        let mut tree = Tree::new();
        tree.insert(1, "a");

        assert_eq!(tree.remove_key(&1), Some((1, "a")));
        assert_eq!(tree.root, NIL);
        assert_eq!(tree.min, NIL);
        assert_eq!(tree.max, NIL);
        assert_eq!(tree.len(), 0);
        assert!(tree.begin() == tree.end());
        assert_red_black_tree(&tree);
    }

    #[test]
    fn missing_key_is_a_no_op() {
        let mut tree = Tree::new();
        for key in 0..10 { tree.insert(key * 2, ()); }

        assert_eq!(tree.remove_key(&5), None);
        assert_eq!(tree.len(), 10);
        assert_red_black_tree(&tree);
    }

    #[test]
    fn removing_a_node_with_two_children_keeps_other_handles() {
        let mut tree = Tree::new();
        let handles: Vec<_> = (0..15).map(|key| tree.insert(key, key * 10).0).collect();

        let root = tree.root;
        assert!(tree.store.left(root) != NIL && tree.store.right(root) != NIL);
        let (root_key, _) = tree.store.key_value(root);
        let root_key = *root_key;

        tree.remove_key(&root_key);
        assert_red_black_tree(&tree);

        for (key, handle) in handles.into_iter().enumerate() {
            if key == root_key {
                assert_eq!(tree.key_value(handle), None);
            } else {
                assert_eq!(tree.key_value(handle), Some((&key, &(key * 10))));
            }
        }
    }

    #[test]
    fn any_removal_order_empties_the_tree() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut keys: Vec<u32> = (0..500).collect();

        for _ in 0..8 {
            let mut tree = Tree::new();
            keys.shuffle(&mut rng);
            for key in &keys { tree.insert(*key, ()); }

            keys.shuffle(&mut rng);
            for (removed, key) in keys.iter().enumerate() {
                assert_eq!(tree.remove_key(key), Some((*key, ())));
                if removed % 50 == 0 { assert_red_black_tree(&tree); }
            }

            assert_eq!(tree.len(), 0);
            assert!(tree.begin() == tree.end());
            assert_red_black_tree(&tree);
        }
    }

    #[test]
    fn remove_min_and_max_drain_in_order() {
        let mut tree = Tree::new();
        for key in &[4, 8, 2, 6, 0, 10] { tree.insert(*key, ()); }

        assert_eq!(tree.remove_min(), Some((0, ())));
        assert_eq!(tree.remove_max(), Some((10, ())));
        assert_eq!(tree.remove_min(), Some((2, ())));
        assert_eq!(tree.remove_max(), Some((8, ())));
        assert_red_black_tree(&tree);
        assert_eq!(tree.iter().map(|e| *e.0).collect::<Vec<_>>(), [4, 6]);

        tree.clear();
        assert_eq!(tree.remove_min(), None);
        assert_eq!(tree.remove_max(), None);
    }

    #[test]
    fn remove_range_keeps_everything_outside_the_bounds() {
        fn bound(rng: &mut StdRng) -> Bound<u32> {
            match rng.gen_range(0..3) {
                0 => Included(rng.gen_range(0..120)),
                1 => Excluded(rng.gen_range(0..120)),
                _ => Unbounded,
            }
        }

        fn inside(key: u32, min: &Bound<u32>, max: &Bound<u32>) -> bool {
            let above = match *min {
                Included(m) => key >= m,
                Excluded(m) => key > m,
                Unbounded => true,
            };
            let below = match *max {
                Included(m) => key <= m,
                Excluded(m) => key < m,
                Unbounded => true,
            };
            above && below
        }

        let mut rng = StdRng::seed_from_u64(0x7a9e);
        let mut keys: Vec<u32> = (0..100).map(|k| k + k / 3).collect();

        for _ in 0..64 {
            keys.shuffle(&mut rng);
            let mut tree = Tree::new();
            for key in &keys { tree.insert(*key, ()); }

            let (min, max) = (bound(&mut rng), bound(&mut rng));
            let mut expected: Vec<u32> = keys.clone();
            expected.sort();
            let before = expected.len();
            expected.retain(|key| !inside(*key, &min, &max));

            let removed = tree.remove_range(min.as_ref(), max.as_ref());

            assert_eq!(removed, before - expected.len());
            assert_eq!(tree.iter().map(|e| *e.0).collect::<Vec<_>>(), expected);
            assert_red_black_tree(&tree);
        }
    }

    #[test]
    fn remove_range_on_an_empty_tree() {
        let mut tree: Tree<u32, ()> = Tree::new();
        assert_eq!(tree.remove_range::<u32, u32>(Unbounded, Unbounded), 0);

        tree.extend((0..5).map(|k| (k, ())));
        assert_eq!(tree.remove_range::<u32, u32>(Unbounded, Unbounded), 5);
        assert!(tree.is_empty());
        assert_red_black_tree(&tree);
    }
}
