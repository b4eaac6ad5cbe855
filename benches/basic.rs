//! Compares `Vector` with `Vec` and `SmallVec` on common operations.
//!
//! All sizes are drawn at random once per run, so the optimizer cannot
//! specialize the loops for a known element count.

use advanced_vector::{Vector, relocate_by_copy};
use core::hint;
use criterion::{Bencher, Criterion, criterion_group, criterion_main};
use smallvec::SmallVec;
use std::sync::OnceLock;

use rand::Rng;

const INLINE: usize = 16;
const LARGE_SIZE: usize = 40000;

/// Draws one number from `start..end`.
#[inline(never)]
fn gen_one(start: usize, end: usize) -> usize {
    rand::rng().random_range(start..end)
}

/// Draws `len` numbers from `start..end`.
#[inline(never)]
fn gen_rand(len: usize, start: u64, end: u64) -> Box<[u64]> {
    let mut rng = rand::rng();
    (0..len).map(|_| rng.random_range(start..end)).collect()
}

/// Element count of the small workloads, 12 to 15.
static SMALL_BOUND: OnceLock<usize> = OnceLock::new();

/// Element count of the large workloads, 36000 to 36002.
static LARGE_BOUND: OnceLock<usize> = OnceLock::new();

fn small_bound() -> usize {
    *SMALL_BOUND.get_or_init(|| gen_one(12, 16))
}

fn large_bound() -> usize {
    *LARGE_BOUND.get_or_init(|| gen_one(36000, 36003))
}

/// The operations every benchmarked container provides, under one set of names.
trait VecLike: Default {
    fn with_capacity(capacity: usize) -> Self;
    fn push(&mut self, value: u64);
    fn pop(&mut self) -> Option<u64>;
    fn insert(&mut self, index: usize, value: u64);
    fn remove(&mut self, index: usize) -> u64;
    fn slot(&mut self, index: usize) -> &mut u64;
    fn clear(&mut self);
}

macro_rules! impl_vec_like {
    ($name:ty, push = $push:ident, pop = $pop:ident) => {
        impl VecLike for $name {
            #[inline(always)]
            fn with_capacity(capacity: usize) -> Self {
                <$name>::with_capacity(capacity)
            }
            #[inline(always)]
            fn push(&mut self, value: u64) {
                self.$push(value);
            }
            #[inline(always)]
            fn pop(&mut self) -> Option<u64> {
                self.$pop()
            }
            #[inline(always)]
            fn insert(&mut self, index: usize, value: u64) {
                <$name>::insert(self, index, value);
            }
            #[inline(always)]
            fn remove(&mut self, index: usize) -> u64 {
                <$name>::remove(self, index)
            }
            #[inline(always)]
            fn slot(&mut self, index: usize) -> &mut u64 {
                &mut self[index]
            }
            #[inline(always)]
            fn clear(&mut self) {
                <$name>::clear(self);
            }
        }
    };
}

impl_vec_like!(Vec<u64>, push = push, pop = pop);
impl_vec_like!(Vector<u64>, push = push_back, pop = pop_back);
impl_vec_like!(SmallVec<[u64; INLINE]>, push = push, pop = pop);

macro_rules! gen_bench_group {
    ($c:ident => $fn_name:ident) => {{
        let mut group = $c.benchmark_group(stringify!($fn_name));
        group.bench_function("Vec", |b| $fn_name::<Vec<u64>>(b));
        group.bench_function("Vector", |b| $fn_name::<Vector<u64>>(b));
        group.bench_function("SmallVec", |b| $fn_name::<SmallVec<[u64; INLINE]>>(b));
    }};
}

fn bench_vec(c: &mut Criterion) {
    gen_bench_group!(c => new_empty);
    gen_bench_group!(c => push_small_from_empty);
    gen_bench_group!(c => push_large_reserved);
    gen_bench_group!(c => push_large_from_empty);
    gen_bench_group!(c => pop_large);
    gen_bench_group!(c => insert_small);
    gen_bench_group!(c => remove_small);
    gen_bench_group!(c => index_large);
}

/// Creating an empty container allocates nothing.
#[inline(never)]
fn new_empty<T: VecLike>(b: &mut Bencher) {
    b.iter(|| hint::black_box(T::default()));
}

/// Growth through reallocation for `Vec` and `Vector`; `SmallVec` stays inline.
#[inline(never)]
fn push_small_from_empty<T: VecLike>(b: &mut Bencher) {
    let data = gen_rand(small_bound(), 0, 9999);
    let index = gen_one(0, small_bound());

    b.iter(|| {
        let mut vec = T::default();
        for item in &data {
            vec.push(*item);
        }
        hint::black_box(*vec.slot(index))
    });
}

/// Pushes into a block reserved up front; no reallocation happens.
#[inline(never)]
fn push_large_reserved<T: VecLike>(b: &mut Bencher) {
    let mut vec = T::with_capacity(LARGE_SIZE);
    let data = gen_rand(large_bound(), 0, 9999);
    let index = gen_rand(10, 0, large_bound() as _);

    b.iter(|| {
        let mut counter = 0u64;
        vec.clear();
        for item in &data {
            vec.push(*item);
        }
        for item in &index {
            counter += *vec.slot(*item as usize);
        }
        hint::black_box(counter)
    });
}

/// Every container grows from empty to about 36000 elements.
#[inline(never)]
fn push_large_from_empty<T: VecLike>(b: &mut Bencher) {
    let data = gen_rand(large_bound(), 0, 9999);
    let index = gen_rand(10, 0, large_bound() as _);

    b.iter(|| {
        let mut vec = T::default();
        let mut counter = 0u64;
        for item in &data {
            vec.push(*item);
        }
        for item in &index {
            counter += *vec.slot(*item as usize);
        }
        hint::black_box(counter)
    });
}

/// Pops every element of a filled container.
#[inline(never)]
fn pop_large<T: VecLike>(b: &mut Bencher) {
    let data = gen_rand(large_bound(), 0, 9999);
    let mut vec = T::with_capacity(LARGE_SIZE);

    b.iter(|| {
        for item in &data {
            vec.push(*item);
        }
        let mut counter = 0u64;
        while let Some(value) = vec.pop() {
            counter += value;
        }
        hint::black_box(counter)
    });
}

/// Inserts at scattered positions within reserved capacity.
#[inline(never)]
fn insert_small<T: VecLike>(b: &mut Bencher) {
    let num = small_bound();
    let mut vec = T::with_capacity(INLINE);
    let index = gen_one(0, 12);

    b.iter(|| {
        vec.clear();
        for value in 0..8 {
            vec.push(value);
        }
        vec.insert((num + 4) % 8, 6);
        vec.insert((num + 7) % 9, 7);
        vec.insert((num + 9) % 10, 8);
        vec.insert((num + 14) % 11, 11);
        hint::black_box(*vec.slot(index))
    });
}

/// Removes from scattered positions.
#[inline(never)]
fn remove_small<T: VecLike>(b: &mut Bencher) {
    let num = small_bound();
    let mut vec = T::with_capacity(INLINE);
    let index = gen_one(0, 8);

    b.iter(|| {
        vec.clear();
        for value in 0..12 {
            vec.push(value);
        }
        let mut counter = 0u64;
        counter += vec.remove((num + 14) % 12);
        counter += vec.remove((num + 9) % 11);
        counter += vec.remove((num + 7) % 10);
        counter += vec.remove((num + 4) % 9);
        counter += *vec.slot(index);
        hint::black_box(counter)
    });
}

/// Random reads and writes through indexing.
#[inline(never)]
fn index_large<T: VecLike>(b: &mut Bencher) {
    let mut vec = T::with_capacity(LARGE_SIZE);
    for item in gen_rand(large_bound(), 0, 9999).iter() {
        vec.push(*item);
    }
    let range = gen_rand(2000, 0, 36000);

    b.iter(|| {
        let mut counter = 0u64;
        for item in &range {
            *vec.slot(*item as usize) += *item;
            counter += *vec.slot(*item as usize);
        }
        hint::black_box(counter)
    });
}

/// A type that does not trust bitwise relocation; every reallocation clones it.
#[derive(Clone, Default)]
struct Pinned(String);

relocate_by_copy!(Pinned);

/// Growth cost under each relocation policy, with owned heap elements.
fn bench_relocation(c: &mut Criterion) {
    let len = small_bound() * 64;
    let mut group = c.benchmark_group("grow_strings");

    group.bench_function("Vec<String>", |b| {
        b.iter(|| {
            let mut vec = Vec::new();
            for i in 0..len {
                vec.push(i.to_string());
            }
            hint::black_box(vec.len())
        })
    });
    group.bench_function("Vector<String>", |b| {
        b.iter(|| {
            let mut vec = Vector::new();
            for i in 0..len {
                vec.push_back(i.to_string());
            }
            hint::black_box(vec.len())
        })
    });
    group.bench_function("Vector<Pinned>", |b| {
        b.iter(|| {
            let mut vec = Vector::new();
            for i in 0..len {
                vec.push_back(Pinned(i.to_string()));
            }
            hint::black_box(vec.len())
        })
    });
    group.finish();

    let mut group = c.benchmark_group("reserve_then_fill");
    group.bench_function("Vector<String>", |b| {
        b.iter(|| {
            let mut vec: Vector<String> = Vector::new();
            vec.reserve(len);
            vec.resize_with(len, String::new);
            hint::black_box(vec.capacity())
        })
    });
    group.bench_function("Vector<Pinned>", |b| {
        b.iter(|| {
            let mut vec: Vector<Pinned> = Vector::new();
            vec.resize(len);
            hint::black_box(vec.capacity())
        })
    });
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(200)
        .warm_up_time(core::time::Duration::from_secs(3))
        .measurement_time(core::time::Duration::from_secs(8))
        .confidence_level(0.96)
        .noise_threshold(0.04);
    targets = bench_vec, bench_relocation,
}
criterion_main!(benches);
