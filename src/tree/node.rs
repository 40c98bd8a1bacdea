use std::mem;
use std::ops;
use super::super::AllocError;

/// The index of a slot in a tree's node store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeIndex(u32);

impl NodeIndex {
    fn get(self) -> usize { self.0 as usize }
}

/// The slot shared by every empty leaf position.
///
/// Slot 0 never holds an element. Its color is always black, and its links are reset to point at
/// itself after every structural change that may have written to them.
pub const NIL: NodeIndex = NodeIndex(0);

// Indices are `u32`, and slot 0 is reserved for the sentinel.
const MAX_SLOTS: usize = u32::MAX as usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

pub enum Payload<K, V> {
    Sentinel,
    Vacant { next: NodeIndex },
    Occupied { key: K, value: V },
}

pub struct Slot<K, V> {
    pub color: Color,
    pub parent: NodeIndex,
    pub left: NodeIndex,
    pub right: NodeIndex,
    pub generation: u32,
    pub payload: Payload<K, V>,
}

impl<K, V> Slot<K, V> {
    fn sentinel() -> Self {
        Slot {
            color: Color::Black,
            parent: NIL,
            left: NIL,
            right: NIL,
            generation: 0,
            payload: Payload::Sentinel,
        }
    }
}

/// The arena that owns every node of a tree.
///
/// Freed slots are threaded onto a free list and reused by later allocations. A slot's
/// generation is bumped every time it is freed, so a `(index, generation)` pair names at most
/// one element over the lifetime of the store.
pub struct Store<K, V> {
    slots: Vec<Slot<K, V>>,
    free: NodeIndex,
    len: usize,
    limit: usize,
}

impl<K, V> Store<K, V> {
    pub fn new() -> Self {
        Store { slots: vec![Slot::sentinel()], free: NIL, len: 0, limit: Self::max_len() }
    }

    /// Returns the number of occupied slots.
    pub fn len(&self) -> usize { self.len }

    pub fn max_len() -> usize {
        let slot_size = mem::size_of::<Slot<K, V>>().max(1);
        MAX_SLOTS.min(isize::MAX as usize / slot_size) - 1
    }

    /// Returns the number of elements this store can hold.
    pub fn limit(&self) -> usize { self.limit }

    #[cfg(test)]
    pub fn set_limit(&mut self, limit: usize) { self.limit = limit.min(Self::max_len()); }

    /// Ensures that the next call to `alloc` will not need to allocate memory.
    pub fn reserve(&mut self) -> Result<(), AllocError> {
        if self.free != NIL { return Ok(()); }

        // Slot 0 is the sentinel, so `slots.len()` counts one more than the elements held.
        if self.slots.len() > self.limit {
            log::debug!("node store exhausted at {} slots", self.slots.len());
            return Err(AllocError::CapacityOverflow { max: self.limit });
        }

        self.slots.try_reserve(1).map_err(|err| {
            log::debug!("node store failed to grow past {} slots: {}", self.slots.len(), err);
            AllocError::from(err)
        })
    }

    /// Places a new red leaf under `parent`, reusing a freed slot if one exists.
    ///
    /// The caller links the returned node into its parent.
    pub fn alloc(&mut self, parent: NodeIndex, key: K, value: V) -> NodeIndex {
        let payload = Payload::Occupied { key: key, value: value };

        let index = if self.free != NIL {
            let index = self.free;
            let slot = &mut self.slots[index.get()];

            self.free = match slot.payload {
                Payload::Vacant { next } => next,
                _ => unreachable!("free list points at a live slot"),
            };

            slot.color = Color::Red;
            slot.parent = parent;
            slot.left = NIL;
            slot.right = NIL;
            slot.payload = payload;
            index
        } else {
            let index = NodeIndex(self.slots.len() as u32);

            self.slots.push(Slot {
                color: Color::Red,
                parent: parent,
                left: NIL,
                right: NIL,
                generation: 0,
                payload: payload,
            });

            index
        };

        self.len += 1;
        index
    }

    /// Releases the given node's slot and returns its key and value.
    ///
    /// The slot's links are left untouched, so a traversal that is already past the node can
    /// still climb through it.
    pub fn free(&mut self, index: NodeIndex) -> (K, V) {
        let slot = &mut self.slots[index.get()];
        let payload = mem::replace(&mut slot.payload, Payload::Vacant { next: self.free });
        slot.generation = slot.generation.wrapping_add(1);
        self.free = index;
        self.len -= 1;

        match payload {
            Payload::Occupied { key, value } => (key, value),
            _ => unreachable!("freed a slot that holds no element"),
        }
    }

    /// Checks if `index` currently holds the element it held at `generation`.
    pub fn is_live(&self, index: NodeIndex, generation: u32) -> bool {
        match self.slots.get(index.get()) {
            Some(slot) => slot.generation == generation &&
                          matches!(slot.payload, Payload::Occupied { .. }),
            None => false,
        }
    }

    pub fn reset_sentinel(&mut self) {
        let nil = &mut self.slots[NIL.get()];
        nil.color = Color::Black;
        nil.parent = NIL;
        nil.left = NIL;
        nil.right = NIL;
    }

    pub fn key(&self, index: NodeIndex) -> &K { self.key_value(index).0 }

    pub fn key_value(&self, index: NodeIndex) -> (&K, &V) {
        match self.slots[index.get()].payload {
            Payload::Occupied { ref key, ref value } => (key, value),
            _ => unreachable!("slot {} holds no element", index.get()),
        }
    }

    pub fn key_value_mut(&mut self, index: NodeIndex) -> (&K, &mut V) {
        match self.slots[index.get()].payload {
            Payload::Occupied { ref key, ref mut value } => (key, value),
            _ => unreachable!("slot {} holds no element", index.get()),
        }
    }

    /// Returns the elements of the given nodes, in the order given, with mutable values.
    ///
    /// Each node is yielded at most once. Indices that hold no element are skipped. Only
    /// `order` is allocated over, never the whole arena.
    pub fn entries_mut(&mut self, order: &[NodeIndex]) -> Vec<(&K, &mut V)> {
        let mut by_slot: Vec<(usize, usize)> =
            order.iter().enumerate().map(|(position, index)| (index.get(), position)).collect();
        by_slot.sort_unstable();
        by_slot.dedup_by_key(|e| e.0);

        let mut entries: Vec<Option<(&K, &mut V)>> = order.iter().map(|_| None).collect();
        let mut rest = &mut self.slots[..];
        let mut offset = 0;

        // Visiting slots in ascending index order splits off one disjoint `&mut` at a time.
        for (slot, position) in by_slot {
            let tail = mem::take(&mut rest);
            let (slot_ref, tail) = match tail.get_mut(slot - offset..) {
                Some(tail) => match tail.split_first_mut() {
                    Some(split) => split,
                    None => break,
                },
                None => break,
            };

            rest = tail;
            offset = slot + 1;

            if let Payload::Occupied { ref key, ref mut value } = slot_ref.payload {
                entries[position] = Some((key, value));
            }
        }

        entries.into_iter().flatten().collect()
    }

    pub fn color(&self, index: NodeIndex) -> Color { self[index].color }

    pub fn is_red(&self, index: NodeIndex) -> bool { self[index].color == Color::Red }

    pub fn is_black(&self, index: NodeIndex) -> bool { self[index].color == Color::Black }

    pub fn set_color(&mut self, index: NodeIndex, color: Color) { self[index].color = color; }

    pub fn parent(&self, index: NodeIndex) -> NodeIndex { self[index].parent }

    pub fn left(&self, index: NodeIndex) -> NodeIndex { self[index].left }

    pub fn right(&self, index: NodeIndex) -> NodeIndex { self[index].right }

    #[cfg(test)]
    pub fn slot_count(&self) -> usize { self.slots.len() }
}

impl<K, V> ops::Index<NodeIndex> for Store<K, V> {
    type Output = Slot<K, V>;
    fn index(&self, index: NodeIndex) -> &Slot<K, V> { &self.slots[index.get()] }
}

impl<K, V> ops::IndexMut<NodeIndex> for Store<K, V> {
    fn index_mut(&mut self, index: NodeIndex) -> &mut Slot<K, V> { &mut self.slots[index.get()] }
}

/// A direction in the tree.
///
/// Every algorithm with mirror-image cases is written once against `D: Dir` and instantiated
/// with `Left` and `Right`.
pub trait Dir: Sized {
    type Opposite: Dir<Opposite=Self>;

    fn left() -> bool;

    fn child<K, V>(slot: &Slot<K, V>) -> NodeIndex;
    fn child_mut<K, V>(slot: &mut Slot<K, V>) -> &mut NodeIndex;
}

pub enum Left {}

impl Dir for Left {
    type Opposite = Right;

    fn left() -> bool { true }

    fn child<K, V>(slot: &Slot<K, V>) -> NodeIndex { slot.left }
    fn child_mut<K, V>(slot: &mut Slot<K, V>) -> &mut NodeIndex { &mut slot.left }
}

pub enum Right {}

impl Dir for Right {
    type Opposite = Left;

    fn left() -> bool { false }

    fn child<K, V>(slot: &Slot<K, V>) -> NodeIndex { slot.right }
    fn child_mut<K, V>(slot: &mut Slot<K, V>) -> &mut NodeIndex { &mut slot.right }
}
