use std::{hint::black_box};

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

use growarr::DynArr;
use smallvec::SmallVec;
use arrayvec::ArrayVec;


pub fn benchmark(c: &mut Criterion) {

    let mut group = c.benchmark_group("DynArr Perf");
    group.sample_size(1000);
    group.bench_function(
        BenchmarkId::new("DynArr", "add"),
        |b| b.iter_batched_ref(
            || DynArr::<u8>::new(),
            |arr| { black_box({ arr.add(black_box(128)); }) },
            BatchSize::SmallInput
        )
    );
    group.bench_function(
        BenchmarkId::new("Vec", "push"),
        |b| b.iter_batched_ref(
            || Vec::<u8>::with_capacity(16),
            |vec| { black_box({ vec.push(black_box(128)); }) },
            BatchSize::SmallInput
        )
    );
    group.bench_function(
        BenchmarkId::new("SmallVec", "push"),
        |b| b.iter_batched_ref(
            || SmallVec::<[u8; 16]>::new(),
            |vec| { black_box({ vec.push(black_box(128)); }) },
            BatchSize::SmallInput
        )
    );
    group.bench_function(
        BenchmarkId::new("ArrayVec", "push"),
        |b| b.iter_batched_ref(
            || ArrayVec::<u8, 16>::new(),
            |vec| { black_box({ vec.push(black_box(128)); }) },
            BatchSize::SmallInput
        )
    );


    group.bench_function(
        BenchmarkId::new("DynArr", "add-overflow"),
        |b| b.iter_batched_ref(
            || DynArr::<u8>::from([1; 16]),
            |arr| { black_box({ arr.add(black_box(128)); }) },
            BatchSize::SmallInput
        )
    );
    group.bench_function(
        BenchmarkId::new("Vec", "push-overflow"),
        |b| b.iter_batched_ref(
            || { let mut vec = Vec::<u8>::with_capacity(16); vec.extend([1; 16]); vec },
            |vec| { black_box({ vec.push(black_box(128)); }) },
            BatchSize::SmallInput
        )
    );


    group.bench_function(
        BenchmarkId::new("DynArr", "insert_at"),
        |b| b.iter_batched_ref(
            || DynArr::<u8>::from([0, 1, 2, 3]),
            |arr| black_box({ let _ = arr.insert_at(black_box(1), 9); }),
            BatchSize::SmallInput
        )
    );
    group.bench_function(
        BenchmarkId::new("Vec", "insert"),
        |b| b.iter_batched_ref(
            || { let mut vec: Vec<u8> = vec![0, 1, 2, 3]; vec.reserve_exact(12); vec },
            |vec| black_box({ vec.insert(black_box(1), 9); }),
            BatchSize::SmallInput
        )
    );


    group.bench_function(
        BenchmarkId::new("DynArr", "remove_at"),
        |b| b.iter_batched_ref(
            || DynArr::<u8>::from([0, 1, 2, 3]),
            |arr| black_box({ let _ = arr.remove_at(1); }),
            BatchSize::SmallInput
        )
    );
    group.bench_function(
        BenchmarkId::new("Vec", "remove"),
        |b| b.iter_batched_ref(
            || { let mut vec: Vec<u8> = vec![0, 1, 2, 3]; vec.reserve_exact(12); vec },
            |vec| black_box({ let _ = vec.remove(1); }),
            BatchSize::SmallInput
        )
    );
    group.bench_function(
        BenchmarkId::new("SmallVec", "remove"),
        |b| b.iter_batched_ref(
            || SmallVec::<[u8; 16]>::from_vec(vec![0, 1, 2, 3]),
            |vec| black_box({ let _ = vec.remove(1); }),
            BatchSize::SmallInput
        )
    );
    group.bench_function(
        BenchmarkId::new("ArrayVec", "remove"),
        |b| b.iter_batched_ref(
            || { let mut vec = ArrayVec::<u8, 16>::new(); (0..4).for_each(|v| vec.push(v)); vec },
            |vec| black_box({ let _ = vec.remove(1); }),
            BatchSize::SmallInput
        )
    );


    group.bench_function(
        BenchmarkId::new("DynArr", "get"),
        |b| b.iter_batched_ref(
            || DynArr::<u32>::from(black_box([32; 8])),
            |arr| black_box({ let _ = arr.get(black_box(3)); }),
            BatchSize::SmallInput
        )
    );

    group.finish();
}

pub fn growth(c: &mut Criterion) {
    let mut group = c.benchmark_group("DynArr Growth");
    group.sample_size(20);

    for items in [1_000u32, 100_000, 1_000_000] {
        group.bench_with_input(
            BenchmarkId::new("DynArr", items),
            &items,
            |b, &items| b.iter(|| {
                let mut arr = DynArr::new();
                arr.add_range(0..items);
                while arr.pop().is_some() {}
                black_box(arr.capacity())
            })
        );
        group.bench_with_input(
            BenchmarkId::new("Vec", items),
            &items,
            |b, &items| b.iter(|| {
                let mut vec = Vec::with_capacity(16);
                vec.extend(0..items);
                while vec.pop().is_some() {}
                black_box(vec.capacity())
            })
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark, growth);
criterion_main!(benches);
