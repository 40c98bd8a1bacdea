use compare::Compare;
use super::Tree;
use super::node::{Dir, NIL, NodeIndex};

impl<K, V, C> Tree<K, V, C> where C: Compare<K> {
    /// Rotates `node` toward `D`, lifting its opposite child into its place.
    ///
    /// `rotate::<Left>` is the classic left rotation. The in-order sequence is unchanged and no
    /// colors are touched.
    pub(super) fn rotate<D: Dir>(&mut self, node: NodeIndex) {
        let pivot = D::Opposite::child(&self.store[node]);
        let inner = D::child(&self.store[pivot]);

        *D::Opposite::child_mut(&mut self.store[node]) = inner;
        if inner != NIL { self.store[inner].parent = node; }

        let parent = self.store[node].parent;
        self.store[pivot].parent = parent;
        self.replace_child(parent, node, pivot);

        *D::child_mut(&mut self.store[pivot]) = node;
        self.store[node].parent = pivot;
    }

    /// Points `parent`'s link to `old` at `new` instead, or makes `new` the root if `parent` is
    /// the sentinel.
    pub(super) fn replace_child(&mut self, parent: NodeIndex, old: NodeIndex, new: NodeIndex) {
        if parent == NIL {
            self.root = new;
        } else if self.store[parent].left == old {
            self.store[parent].left = new;
        } else {
            self.store[parent].right = new;
        }
    }
}
