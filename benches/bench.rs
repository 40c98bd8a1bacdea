use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use rbtree::Map;
use std::collections::BTreeMap;
use std::hint::black_box;

const SIZES: [usize; 2] = [100, 10_000];

fn rng() -> StdRng { StdRng::seed_from_u64(0x7265_6462) }

fn insert_rand(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert_rand");

    for n in SIZES {
        group.bench_with_input(BenchmarkId::new("Map", n), &n, |bencher, &n| {
            let mut rng = rng();
            let mut map = Map::new();
            for _ in 0..n { let i = rng.gen_range(0..n); map.insert(i, i); }

            bencher.iter(|| {
                let k = rng.gen_range(0..n);
                map.insert(k, k);
                map.remove(&k);
            });
            black_box(map);
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", n), &n, |bencher, &n| {
            let mut rng = rng();
            let mut map = BTreeMap::new();
            for _ in 0..n { let i = rng.gen_range(0..n); map.insert(i, i); }

            bencher.iter(|| {
                let k = rng.gen_range(0..n);
                map.insert(k, k);
                map.remove(&k);
            });
            black_box(map);
        });
    }

    group.finish();
}

fn insert_seq(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert_seq");

    for n in SIZES {
        group.bench_with_input(BenchmarkId::new("insert", n), &n, |bencher, &n| {
            bencher.iter(|| {
                let mut map = Map::new();
                for i in 0..n { map.insert(black_box(i), i); }
                black_box(map)
            });
        });

        group.bench_with_input(BenchmarkId::new("insert_hint_end", n), &n, |bencher, &n| {
            bencher.iter(|| {
                let mut map = Map::new();
                for i in 0..n { map.insert_hint(None, black_box(i), i); }
                black_box(map)
            });
        });
    }

    group.finish();
}

fn find_rand(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("find_rand");

    for n in SIZES {
        group.bench_with_input(BenchmarkId::new("Map", n), &n, |bencher, &n| {
            let mut rng = rng();
            let mut keys: Vec<_> = (0..n).map(|_| rng.gen_range(0..n)).collect();
            let map: Map<_, _> = keys.iter().map(|&k| (k, k)).collect();
            keys.shuffle(&mut rng);

            let mut i = 0;
            bencher.iter(|| {
                let t = map.get(&keys[i]);
                i = (i + 1) % n;
                black_box(t);
            });
        });
    }

    group.finish();
}

fn find_seq(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("find_seq");

    for n in SIZES {
        group.bench_with_input(BenchmarkId::new("Map", n), &n, |bencher, &n| {
            let map: Map<_, _> = (0..n).map(|i| (i, i)).collect();

            let mut i = 0;
            bencher.iter(|| {
                let x = map.get(&i);
                i = (i + 1) % n;
                black_box(x);
            });
        });
    }

    group.finish();
}

fn iter(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("iter");

    for n in [100, 1000, 100_000] {
        let mut rng = rng();
        let map: Map<u32, u32> = (0..n).map(|_| (rng.gen(), rng.gen())).collect();

        group.bench_with_input(BenchmarkId::new("iter", n), &map, |bencher, map| {
            bencher.iter(|| for entry in map.iter() { black_box(entry); });
        });

        group.bench_with_input(BenchmarkId::new("cursor", n), &map, |bencher, map| {
            bencher.iter(|| {
                let mut cursor = map.begin();
                while let Some(entry) = cursor.get() {
                    black_box(entry);
                    cursor.move_next();
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, insert_rand, insert_seq, find_rand, find_seq, iter);
criterion_main!(benches);
