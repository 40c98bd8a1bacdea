use compare::Compare;
use std::cmp::Ordering::{self, *};
use super::{Handle, Tree};
use super::super::AllocError;
use super::node::{Color, Dir, Left, NIL, NodeIndex, Right};

impl<K, V, C> Tree<K, V, C> where C: Compare<K> {
    /// Inserts a key and value into the tree.
    ///
    /// Returns a handle to the element with the given key, and `true` if it was inserted. If
    /// the tree already contains an equivalent key, the tree is left unchanged, the given key
    /// and value are dropped, and the returned flag is `false`.
    ///
    /// # Panics
    ///
    /// Panics if the node store cannot grow. See [`try_insert`](#method.try_insert).
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = rbtree::Tree::new();
    ///
    /// let (handle, inserted) = tree.insert(1, "a");
    /// assert!(inserted);
    ///
    /// let (existing, inserted) = tree.insert(1, "b");
    /// assert!(!inserted);
    /// assert_eq!(existing, handle);
    /// assert_eq!(tree.key_value(handle), Some((&1, &"a")));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (Handle, bool) {
        match self.try_insert(key, value) {
            Ok(result) => result,
            Err(err) => panic!("{}", err),
        }
    }

    /// Inserts a key and value into the tree, returning an error instead of panicking if the
    /// node store cannot grow.
    ///
    /// On error the tree is unchanged.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<(Handle, bool), AllocError> {
        let mut parent = NIL;
        let mut order = Less;
        let mut node = self.root;

        while node != NIL {
            parent = node;
            order = self.cmp.compare(&key, self.store.key(node));

            node = match order {
                Equal => return Ok((self.handle(node), false)),
                Less => self.store.left(node),
                Greater => self.store.right(node),
            };
        }

        self.store.reserve()?;
        let node = self.link(parent, order, key, value);
        Ok((self.handle(node), true))
    }

    /// Inserts a key and value into the tree, using `hint` as a guess of where the key belongs.
    ///
    /// The hint names the element before which the key would be placed, with `None` meaning the
    /// end of the tree. If the key belongs immediately before the hint, it is linked in without
    /// searching from the root. Otherwise this behaves like [`insert`](#method.insert).
    ///
    /// Returns a handle to the element with the given key. If the tree already contains an
    /// equivalent key, the tree is left unchanged.
    ///
    /// # Panics
    ///
    /// Panics if the node store cannot grow. See
    /// [`try_insert_hint`](#method.try_insert_hint).
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = rbtree::Tree::new();
    ///
    /// // Appending sorted input at the end never searches.
    /// for key in 0..10 { tree.insert_hint(None, key, ()); }
    ///
    /// let five = tree.find(&5);
    /// tree.remove_key(&4);
    /// tree.insert_hint(five, 4, ());
    ///
    /// assert!(tree.iter().map(|e| *e.0).eq(0..10));
    /// ```
    pub fn insert_hint(&mut self, hint: Option<Handle>, key: K, value: V) -> Handle {
        match self.try_insert_hint(hint, key, value) {
            Ok(handle) => handle,
            Err(err) => panic!("{}", err),
        }
    }

    /// Inserts a key and value into the tree using a position hint, returning an error instead
    /// of panicking if the node store cannot grow.
    ///
    /// On error the tree is unchanged.
    pub fn try_insert_hint(&mut self, hint: Option<Handle>, key: K, value: V)
        -> Result<Handle, AllocError> {

        let next = match hint {
            None => NIL,
            Some(handle) if self.is_live(handle) => handle.index,
            Some(_) => return self.try_insert(key, value).map(|e| e.0),
        };

        let prev = self.step::<Left>(next);

        if next != NIL {
            match self.cmp.compare(&key, self.store.key(next)) {
                Less => {}
                Equal => return Ok(self.handle(next)),
                Greater => return self.try_insert(key, value).map(|e| e.0),
            }
        }

        if prev != NIL {
            match self.cmp.compare(&key, self.store.key(prev)) {
                Greater => {}
                Equal => return Ok(self.handle(prev)),
                Less => return self.try_insert(key, value).map(|e| e.0),
            }
        }

        self.store.reserve()?;

        // `prev` is the maximum of `next`'s left subtree whenever that subtree is non-empty, so
        // one of the two slots below is always free.
        let node = if next != NIL && self.store.left(next) == NIL {
            self.link(next, Less, key, value)
        } else {
            self.link(prev, Greater, key, value)
        };

        Ok(self.handle(node))
    }

    /// Links a new node as the `order` child of `parent` and restores the red-black invariants.
    ///
    /// The caller must have reserved a slot.
    fn link(&mut self, parent: NodeIndex, order: Ordering, key: K, value: V) -> NodeIndex {
        let node = self.store.alloc(parent, key, value);

        if parent == NIL {
            self.root = node;
            self.min = node;
            self.max = node;
        } else if order == Less {
            self.store[parent].left = node;
            // Only a left child of the minimum can precede it.
            if parent == self.min { self.min = node; }
        } else {
            self.store[parent].right = node;
            if parent == self.max { self.max = node; }
        }

        self.insert_fixup(node);
        node
    }

    fn insert_fixup(&mut self, mut node: NodeIndex) {
        while self.store.is_red(self.store.parent(node)) {
            let parent = self.store.parent(node);
            let grandparent = self.store.parent(parent);

            node = if self.store.left(grandparent) == parent {
                self.insert_step::<Left>(node)
            } else {
                self.insert_step::<Right>(node)
            };
        }

        let root = self.root;
        self.store.set_color(root, Color::Black);
    }

    /// Resolves a red-red violation between `node` and its parent, where the parent is the `D`
    /// child of the grandparent. Returns the node from which the fixup must continue.
    fn insert_step<D: Dir>(&mut self, mut node: NodeIndex) -> NodeIndex {
        let parent = self.store.parent(node);
        let grandparent = self.store.parent(parent);
        let uncle = D::Opposite::child(&self.store[grandparent]);

        if self.store.is_red(uncle) {
            self.store.set_color(parent, Color::Black);
            self.store.set_color(uncle, Color::Black);
            self.store.set_color(grandparent, Color::Red);
            return grandparent;
        }

        if node == D::Opposite::child(&self.store[parent]) {
            node = parent;
            self.rotate::<D>(node);
        }

        let parent = self.store.parent(node);
        let grandparent = self.store.parent(parent);
        self.store.set_color(parent, Color::Black);
        self.store.set_color(grandparent, Color::Red);
        self.rotate::<D::Opposite>(grandparent);
        node
    }
}
