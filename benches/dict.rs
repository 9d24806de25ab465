use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap as StdHashMap;
use std::hash::{Hash, Hasher};
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use hashdict::{FrozenDict, HashDict};

fn pairs(n: usize) -> Vec<(usize, usize)> {
    (0..n).map(|i| (i, i * 2)).collect()
}

fn hash_one<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");
    for n in [16, 256, 4096] {
        let input = pairs(n);
        group.bench_with_input(BenchmarkId::new("hashdict", n), &input, |b, input| {
            b.iter(|| HashDict::from(black_box(input.clone())))
        });
        group.bench_with_input(BenchmarkId::new("frozendict", n), &input, |b, input| {
            b.iter(|| FrozenDict::from(black_box(input.clone())))
        });
        // Baseline: what a plain mutable map costs to build.
        group.bench_with_input(BenchmarkId::new("std", n), &input, |b, input| {
            b.iter(|| black_box(input.clone()).into_iter().collect::<StdHashMap<_, _>>())
        });
    }
    group.finish();
}

fn lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    for n in [16, 256] {
        let dict = HashDict::from(pairs(n));
        group.bench_with_input(BenchmarkId::new("get_hit", n), &dict, |b, dict| {
            b.iter(|| black_box(dict.get(&(n / 2))))
        });
        group.bench_with_input(BenchmarkId::new("get_miss", n), &dict, |b, dict| {
            b.iter(|| black_box(dict.get(&(n + 1))))
        });
        group.bench_with_input(BenchmarkId::new("contains_key", n), &dict, |b, dict| {
            b.iter(|| black_box(dict.contains_key(&(n / 2))))
        });
    }
    group.finish();
}

fn hashing(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash");
    for n in [16, 256, 4096] {
        let dict = HashDict::from(pairs(n));
        group.bench_with_input(BenchmarkId::new("hashdict", n), &dict, |b, dict| {
            b.iter(|| hash_one(black_box(dict)))
        });
        let frozen = FrozenDict::from(pairs(n));
        group.bench_with_input(BenchmarkId::new("frozendict", n), &frozen, |b, frozen| {
            b.iter(|| hash_one(black_box(frozen)))
        });
    }
    group.finish();
}

fn equality(c: &mut Criterion) {
    let mut group = c.benchmark_group("eq");
    for n in [16, 256] {
        let left = HashDict::from(pairs(n));
        let right = HashDict::from(pairs(n));
        group.bench_function(BenchmarkId::new("hashdict", n), |b| {
            b.iter(|| black_box(&left) == black_box(&right))
        });
    }
    group.finish();
}

criterion_group!(benches, construction, lookup, hashing, equality);
criterion_main!(benches);
