use compare::Compare;
use quickcheck::{Arbitrary, Gen};
use rbtree::map::{self, Map};

use simplelog::{Config, LevelFilter, TestLogger};

fn init_logger() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

pub trait OccupiedEntry<K, C> where C: Compare<K> {
    fn entry<'a, V>(&self, map: &'a mut Map<K, V, C>) -> Option<map::OccupiedEntry<'a, K, V, C>>;
}

#[derive(Clone, Debug)]
pub struct RemoveEntry<R>(R);

impl<R> Arbitrary for RemoveEntry<R> where R: Arbitrary {
    fn arbitrary(gen: &mut Gen) -> Self { RemoveEntry(R::arbitrary(gen)) }
    fn shrink(&self) -> Box<dyn Iterator<Item=Self>> { Box::new(self.0.shrink().map(RemoveEntry)) }
}

impl<R, K, C> Remove<K, C> for RemoveEntry<R> where R: OccupiedEntry<K, C>, C: Compare<K> {
    fn remove<V>(&self, map: &mut Map<K, V, C>) -> Option<(K, V)> {
        self.0.entry(map).map(map::OccupiedEntry::remove)
    }
}

macro_rules! occupied_entry {
    ($K:ty, $V:ty, $R:ty) => {
        mod occupied_entry {
            remove!{$K, $V, crate::RemoveEntry<$R>}
        }
    }
}

pub trait Remove<K, C> where C: Compare<K> {
    fn remove<V>(&self, map: &mut Map<K, V, C>) -> Option<(K, V)>;
}

macro_rules! remove {
    ($K:ty, $V:ty, $R:ty) => {
        mod remove {
            use crate::Remove;
            use quickcheck::{TestResult, quickcheck};
            use rbtree::Map;

            #[test]
            fn removes_key() {
                fn test(mut map: Map<$K, $V>, removal: $R) -> TestResult {
                    match removal.remove(&mut map) {
                        None => TestResult::discard(),
                        Some((ref key, _)) => TestResult::from_bool(
                            !map.contains_key(key) &&
                            map.get(key).is_none() &&
                            map.get_mut(key).is_none() &&
                            map.find(key).is_end() &&
                            map.iter().find(|e| e.0 == key).is_none()
                        ),
                    }
                }

                quickcheck(test as fn(Map<$K, $V>, $R) -> TestResult);
            }

            #[test]
            fn affects_no_others() {
                fn test(mut map: Map<$K, $V>, removal: $R) -> bool {
                    let old_map = map.clone();

                    match removal.remove(&mut map) {
                        None => map == old_map,
                        Some((ref key, _)) =>
                            map.iter().collect::<Vec<_>>() ==
                               old_map.iter().filter(|e| e.0 != key).collect::<Vec<_>>()
                    }
                }

                quickcheck(test as fn(Map<$K, $V>, $R) -> bool);
            }

            #[test]
            fn sets_len() {
                fn test(mut map: Map<$K, $V>, removal: $R) -> bool {
                    let old_len = map.len();

                    match removal.remove(&mut map) {
                        None => map.len() == old_len,
                        Some(_) => map.len() == old_len - 1,
                    }
                }

                quickcheck(test as fn(Map<$K, $V>, $R) -> bool);
            }
        }
    }
}

#[derive(Clone, Debug)]
struct Find<Q>(Q);

impl<Q> Arbitrary for Find<Q> where Q: Arbitrary {
    fn arbitrary(gen: &mut Gen) -> Self { Find(Q::arbitrary(gen)) }
    fn shrink(&self) -> Box<dyn Iterator<Item=Self>> { Box::new(self.0.shrink().map(Find)) }
}

impl<Q, K, C> Remove<K, C> for Find<Q> where C: Compare<K> + Compare<Q, K> {
    fn remove<V>(&self, map: &mut Map<K, V, C>) -> Option<(K, V)> { map.remove(&self.0) }
}

impl<K, C> OccupiedEntry<K, C> for Find<K> where K: Clone, C: Compare<K> {
    fn entry<'a, V>(&self, map: &'a mut Map<K, V, C>) -> Option<map::OccupiedEntry<'a, K, V, C>> {
        match map.entry(self.0.clone()) {
            map::Entry::Occupied(e) => Some(e),
            map::Entry::Vacant(_) => None,
        }
    }
}

pub trait Insert<K> {
    fn key(&self) -> K;
    fn insert<V, C>(self, map: &mut Map<K, V, C>, value: V) -> Option<V> where C: Compare<K>;
}

impl<K> Insert<K> for Find<K> where K: Clone {
    fn key(&self) -> K { self.0.clone() }

    fn insert<V, C>(self, map: &mut Map<K, V, C>, value: V) -> Option<V> where C: Compare<K> {
        map.insert(self.0, value)
    }
}

#[derive(Clone, Debug)]
pub struct FindEntry<K>(K);

impl<K> Arbitrary for FindEntry<K> where K: Arbitrary {
    fn arbitrary(gen: &mut Gen) -> Self { FindEntry(K::arbitrary(gen)) }
    fn shrink(&self) -> Box<dyn Iterator<Item=Self>> { Box::new(self.0.shrink().map(FindEntry)) }
}

impl<K> Insert<K> for FindEntry<K> where K: Clone {
    fn key(&self) -> K { self.0.clone() }

    fn insert<V, C>(self, map: &mut Map<K, V, C>, value: V) -> Option<V> where C: Compare<K> {
        use rbtree::map::Entry;

        match map.entry(self.0) {
            Entry::Occupied(mut e) => Some(e.insert(value)),
            Entry::Vacant(e) => { e.insert(value); None }
        }
    }
}

/// Inserts through `insert_hint`, with the hint taken from the entry at `n % (len + 1)`.
#[derive(Clone, Debug)]
pub struct Hinted<K>(K, usize);

impl<K> Arbitrary for Hinted<K> where K: Arbitrary {
    fn arbitrary(gen: &mut Gen) -> Self { Hinted(K::arbitrary(gen), usize::arbitrary(gen)) }

    fn shrink(&self) -> Box<dyn Iterator<Item=Self>> {
        Box::new((self.0.clone(), self.1).shrink().map(|(key, n)| Hinted(key, n)))
    }
}

impl<K> Insert<K> for Hinted<K> where K: Clone {
    fn key(&self) -> K { self.0.clone() }

    fn insert<V, C>(self, map: &mut Map<K, V, C>, value: V) -> Option<V> where C: Compare<K> {
        // Hinted insertion never replaces, so an existing value is swapped the way `insert` does.
        if let Some(handle) = map.find(&self.0).handle() {
            let slot = map.get_at_mut(handle)?.1;
            return Some(std::mem::replace(slot, value));
        }

        let hint = {
            let mut cursor = map.begin();
            for _ in 0..self.1 % (map.len() + 1) { cursor.move_next(); }
            cursor.handle()
        };

        map.insert_hint(hint, self.0, value);
        None
    }
}

macro_rules! insert {
    ($K:ty, $V:ty, $R:ty) => {
        mod insert {
            use crate::Insert;
            use quickcheck::quickcheck;
            use rbtree::Map;

            #[test]
            fn sets_len() {
                fn test(mut map: Map<$K, $V>, r: $R, value: $V) -> bool {
                    let old_len = map.len();

                    if r.insert(&mut map, value).is_some() {
                        map.len() == old_len
                    } else {
                        map.len() == old_len + 1
                    }
                }

                quickcheck(test as fn(Map<$K, $V>, $R, $V) -> bool);
            }

            #[test]
            fn inserts_key() {
                fn test(mut map: Map<$K, $V>, r: $R, mut value: $V) -> bool {
                    let key = r.key();
                    r.insert(&mut map, value);

                    map.contains_key(&key) &&
                    map.get(&key) == Some(&value) &&
                    map.get_mut(&key) == Some(&mut value) &&
                    map.iter().filter(|e| *e.0 == key).collect::<Vec<_>>() == [(&key, &value)]
                }

                quickcheck(test as fn(Map<$K, $V>, $R, $V) -> bool);
            }

            #[test]
            fn affects_no_others() {
                fn test(mut map: Map<$K, $V>, r: $R, value: $V) -> bool {
                    let old_map = map.clone();
                    let key = r.key();
                    r.insert(&mut map, value);

                    map.iter().filter(|e| *e.0 != key).collect::<Vec<_>>() ==
                        old_map.iter().filter(|e| *e.0 != key).collect::<Vec<_>>()
                }

                quickcheck(test as fn(Map<$K, $V>, $R, $V) -> bool);
            }

            #[test]
            fn returns_old_value() {
                fn test(mut map: Map<$K, $V>, r: $R, value: $V) -> bool {
                    let key = r.key();
                    map.get(&key).cloned() == r.insert(&mut map, value)
                }

                quickcheck(test as fn(Map<$K, $V>, $R, $V) -> bool);
            }
        }
    }
}

mod find {
    mod entry {
        use quickcheck::quickcheck;
        use rbtree::map::{Entry, Map};

        #[test]
        fn agrees_with_get() {
            fn test(mut map: Map<u32, u16>, key: u32) -> bool {
                let value = map.get(&key).cloned();

                match map.entry(key) {
                    Entry::Occupied(e) => value == Some(*e.get()),
                    Entry::Vacant(_) => value.is_none(),
                }
            }

            quickcheck(test as fn(Map<u32, u16>, u32) -> bool);
        }

        insert!{u32, u16, crate::FindEntry<u32>}
    }

    insert!{u32, u16, crate::Find<u32>}

    mod hinted {
        insert!{u32, u16, crate::Hinted<u32>}
    }

    occupied_entry!{u32, u16, crate::Find<u32>}
    remove!{u32, u16, crate::Find<u32>}
}

#[derive(Clone, Debug)]
struct Max;

impl Arbitrary for Max { fn arbitrary(_gen: &mut Gen) -> Self { Max } }

impl<K, C> Remove<K, C> for Max where C: Compare<K> {
    fn remove<V>(&self, map: &mut Map<K, V, C>) -> Option<(K, V)> { map.remove_max() }
}

mod max {
    use quickcheck_macros::quickcheck;
    use rbtree::Map;

    #[quickcheck]
    fn agrees_with_iter(map: Map<u32, u16>) -> bool {
        map.last_key_value() == map.iter().rev().next()
    }

    #[quickcheck]
    fn agrees_with_rbegin(map: Map<u32, u16>) -> bool {
        map.last_key_value() == map.rbegin().get()
    }

    remove!{u32, u16, crate::Max}
}

#[derive(Clone, Debug)]
struct Min;

impl Arbitrary for Min { fn arbitrary(_gen: &mut Gen) -> Self { Min } }

impl<K, C> Remove<K, C> for Min where C: Compare<K> {
    fn remove<V>(&self, map: &mut Map<K, V, C>) -> Option<(K, V)> { map.remove_min() }
}

mod min {
    use quickcheck_macros::quickcheck;
    use rbtree::Map;

    #[quickcheck]
    fn agrees_with_iter(map: Map<u32, u16>) -> bool {
        map.first_key_value() == map.iter().next()
    }

    #[quickcheck]
    fn agrees_with_begin(map: Map<u32, u16>) -> bool {
        map.first_key_value() == map.begin().get()
    }

    remove!{u32, u16, crate::Min}
}

#[derive(Clone, Debug)]
struct LowerBound<Q>(Q);

impl<Q> Arbitrary for LowerBound<Q> where Q: Arbitrary {
    fn arbitrary(gen: &mut Gen) -> Self { LowerBound(Q::arbitrary(gen)) }
    fn shrink(&self) -> Box<dyn Iterator<Item=Self>> { Box::new(self.0.shrink().map(LowerBound)) }
}

impl<Q, K, C> Remove<K, C> for LowerBound<Q> where C: Compare<K> + Compare<Q, K> {
    fn remove<V>(&self, map: &mut Map<K, V, C>) -> Option<(K, V)> {
        let handle = map.lower_bound(&self.0).handle()?;
        map.remove_at(handle)
    }
}

mod lower_bound {
    use quickcheck_macros::quickcheck;
    use rbtree::Map;

    #[quickcheck]
    fn agrees_with_iter(map: Map<u32, u16>, key: u32) -> bool {
        map.lower_bound(&key).get() == map.iter().find(|e| *e.0 >= key)
    }

    remove!{u32, u16, crate::LowerBound<u32>}
}

#[derive(Clone, Debug)]
struct UpperBound<Q>(Q);

impl<Q> Arbitrary for UpperBound<Q> where Q: Arbitrary {
    fn arbitrary(gen: &mut Gen) -> Self { UpperBound(Q::arbitrary(gen)) }
    fn shrink(&self) -> Box<dyn Iterator<Item=Self>> { Box::new(self.0.shrink().map(UpperBound)) }
}

impl<Q, K, C> Remove<K, C> for UpperBound<Q> where C: Compare<K> + Compare<Q, K> {
    fn remove<V>(&self, map: &mut Map<K, V, C>) -> Option<(K, V)> {
        let handle = map.upper_bound(&self.0).handle()?;
        map.remove_at(handle)
    }
}

mod upper_bound {
    use quickcheck_macros::quickcheck;
    use rbtree::Map;

    #[quickcheck]
    fn agrees_with_iter(map: Map<u32, u16>, key: u32) -> bool {
        map.upper_bound(&key).get() == map.iter().find(|e| *e.0 > key)
    }

    #[quickcheck]
    fn bounds_enclose_equal_range(map: Map<u32, u16>, key: u32) -> bool {
        let mut lower = map.lower_bound(&key);
        let mut count = 0;

        while lower != map.upper_bound(&key) {
            lower.move_next();
            count += 1;
        }

        count == map.equal_range(&key).count() && count == map.contains_key(&key) as usize
    }

    remove!{u32, u16, crate::UpperBound<u32>}
}

mod iter {
    use quickcheck_macros::quickcheck;
    use rbtree::Map;

    #[quickcheck]
    fn ascends(map: Map<u32, u16>) -> bool {
        map.iter().zip(map.iter().skip(1)).all(|(e1, e2)| e1.0 < e2.0)
    }

    #[quickcheck]
    fn descends_when_reversed(map: Map<u32, u16>) -> bool {
        map.iter().rev().zip(map.iter().rev().skip(1)).all(|(e2, e1)| e2.0 > e1.0)
    }

    #[quickcheck]
    fn size_hint_is_exact(map: Map<u32, u16>) -> bool {
        let mut len = map.len();
        let mut it = map.iter();

        loop {
            if it.size_hint() != (len, Some(len)) { return false; }
            if it.next().is_none() { break; }
            len -= 1;
        }

        len == 0 && it.size_hint() == (0, Some(0))
    }

    #[quickcheck]
    fn into_iter_agrees_with_iter(map: Map<u32, u16>) -> bool {
        let borrowed: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
        map.into_iter().collect::<Vec<_>>() == borrowed
    }

    #[quickcheck]
    fn cursors_count_len_both_ways(map: Map<u32, u16>) -> bool {
        let mut forward = 0;
        let mut cursor = map.begin();
        while cursor != map.end() { forward += 1; cursor.move_next(); }

        let mut reverse = 0;
        let mut cursor = map.rbegin();
        while cursor != map.rend() { reverse += 1; cursor.move_next(); }

        forward == map.len() && reverse == map.len()
    }

    #[quickcheck]
    fn next_then_prev_returns_home(map: Map<u32, u16>, steps: usize) -> bool {
        let mut cursor = map.begin();
        for _ in 0..steps % (map.len() + 1) { cursor.move_next(); }

        let mut moved = cursor;
        moved.move_next();
        moved.move_prev();
        moved == cursor
    }
}

mod hint {
    use quickcheck_macros::quickcheck;
    use rbtree::Map;

    #[quickcheck]
    fn any_hint_yields_sorted_contents(keys: Vec<(u16, usize)>) -> bool {
        let mut map = Map::new();
        let mut expected: Vec<u16> = keys.iter().map(|e| e.0).collect();
        expected.sort();
        expected.dedup();

        for (key, n) in keys {
            let hint = {
                let mut cursor = map.begin();
                for _ in 0..n % (map.len() + 1) { cursor.move_next(); }
                cursor.handle()
            };
            map.insert_hint(hint, key, ());
        }

        map.keys().cloned().collect::<Vec<_>>() == expected
    }
}

mod range {
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;
    use std::collections::BTreeMap;
    use std::collections::Bound::*;
    use rbtree::Map;

    #[derive(Clone, Debug)]
    struct Bound<T>(std::collections::Bound<T>);

    impl<T> Bound<T> {
        fn as_ref(&self) -> Bound<&T> {
            Bound(match self.0 {
                Included(ref t) => Included(t),
                Excluded(ref t) => Excluded(t),
                Unbounded => Unbounded,
            })
        }
    }

    impl<T> Arbitrary for Bound<T> where T: Arbitrary {
        fn arbitrary(gen: &mut Gen) -> Self {
            Bound(match u8::arbitrary(gen) % 3 {
                0 => Included(T::arbitrary(gen)),
                1 => Excluded(T::arbitrary(gen)),
                _ => Unbounded,
            })
        }

        fn shrink(&self) -> Box<dyn Iterator<Item=Self>> {
            match self.0 {
                Included(ref t) => Box::new(t.shrink().map(|t| Bound(Included(t)))),
                Excluded(ref t) => Box::new(t.shrink().map(|t| Bound(Excluded(t)))),
                Unbounded => Box::new(None.into_iter()),
            }
        }
    }

    #[quickcheck]
    fn range(map: Map<u32, u16>, min: Bound<u32>, max: Bound<u32>) -> bool {
        let r = map.range(min.as_ref().0, max.as_ref().0);

        let i = map.iter()
            .skip_while(|e| match min.0 {
                Included(ref t) => e.0 < t,
                Excluded(ref t) => e.0 <= t,
                Unbounded => false,
            })
            .take_while(|e| match max.0 {
                Included(ref t) => e.0 <= t,
                Excluded(ref t) => e.0 < t,
                Unbounded => true,
            });

        r.collect::<Vec<_>>() == i.collect::<Vec<_>>()
    }

    #[quickcheck]
    fn range_rev(map: Map<u32, u16>, min: Bound<u32>, max: Bound<u32>) -> bool {
        let r = map.range(min.as_ref().0, max.as_ref().0).rev();

        let i = map.iter().rev()
            .skip_while(|e| match max.0 {
                Included(ref t) => e.0 > t,
                Excluded(ref t) => e.0 >= t,
                Unbounded => false,
            })
            .take_while(|e| match min.0 {
                Included(ref t) => e.0 >= t,
                Excluded(ref t) => e.0 > t,
                Unbounded => true,
            });

        r.collect::<Vec<_>>() == i.collect::<Vec<_>>()
    }

    #[quickcheck]
    fn remove_range(mut map: Map<u32, u16>, min: Bound<u32>, max: Bound<u32>) -> bool {
        let mut model: BTreeMap<u32, u16> = map.iter().map(|e| (*e.0, *e.1)).collect();

        model.retain(|k, _| {
            let above = match min.0 {
                Included(ref t) => k >= t,
                Excluded(ref t) => k > t,
                Unbounded => true,
            };
            let below = match max.0 {
                Included(ref t) => k <= t,
                Excluded(ref t) => k < t,
                Unbounded => true,
            };
            !(above && below)
        });

        let before = map.len();
        let removed = map.remove_range(min.as_ref().0, max.as_ref().0);

        removed == before - model.len() && map.iter().eq(model.iter())
    }
}

mod set {
    use quickcheck_macros::quickcheck;
    use rbtree::Set;
    use std::collections::BTreeSet;

    #[quickcheck]
    fn agrees_with_btree_set(items: Vec<u8>, removals: Vec<u8>) -> bool {
        let mut set = Set::new();
        let mut model = BTreeSet::new();

        for item in items { assert_eq!(set.insert(item), model.insert(item)); }
        for item in removals { assert_eq!(set.remove(&item), model.remove(&item)); }

        set.len() == model.len() && set.iter().eq(model.iter())
    }

    #[quickcheck]
    fn clone_equals_source(set: Set<u16>) -> bool {
        let clone = set.clone();
        clone == set && clone.iter().eq(set.iter())
    }
}

mod assign {
    use quickcheck_macros::quickcheck;
    use rbtree::Map;

    #[quickcheck]
    fn clone_from_copies_the_source(mut target: Map<u16, u8>, source: Map<u16, u8>) -> bool {
        crate::init_logger();
        target.clone_from(&source);
        target == source
    }

    #[quickcheck]
    fn clear_empties(mut map: Map<u16, u8>) -> bool {
        crate::init_logger();
        map.clear();
        map.is_empty() && map.begin() == map.end() && map.iter().next().is_none()
    }

    #[quickcheck]
    fn swap_exchanges(a: Map<u16, u8>, b: Map<u16, u8>) -> bool {
        let (mut x, mut y) = (a.clone(), b.clone());
        x.swap(&mut y);
        x == b && y == a
    }
}
