// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_aabb_tree::{Aabb, Tree};

fn rect(x0: f64, y0: f64, w: f64, h: f64) -> Aabb<f64> {
    Aabb::new([(x0, x0 + w), (y0, y0 + h)]).expect("non-negative extents")
}

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Aabb<f64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(rect(x as f64 * cell, y as f64 * cell, cell, cell));
        }
    }
    out
}

fn gen_grid_rects_i64(n: usize, cell: i64) -> Vec<Aabb<i64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n as i64 {
        for x in 0..n as i64 {
            let b = Aabb::new([(x * cell, x * cell + cell), (y * cell, y * cell + cell)]);
            out.push(b.expect("non-negative extents"));
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_random_rects(count: usize, extent: f64, size: f64) -> Vec<Aabb<f64>> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let x0 = rng.next_f64() * (extent - size).max(1.0);
        let y0 = rng.next_f64() * (extent - size).max(1.0);
        out.push(rect(x0, y0, size, size));
    }
    out
}

fn gen_clustered_rects(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Aabb<f64>> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((rng.next_f64() * 2000.0, rng.next_f64() * 2000.0));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(rect(cx + dx, cy + dy, 12.0, 12.0));
        }
    }
    out
}

fn gen_random_cubes(count: usize) -> Vec<Aabb<f64>> {
    let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
    (0..count)
        .map(|_| {
            let b = Aabb::new((0..3).map(|_| {
                let lo = rng.next_f64() * 1000.0;
                (lo, lo + 8.0)
            }));
            b.expect("non-negative extents")
        })
        .collect()
}

fn build<T: understory_aabb_tree::Scalar>(rects: &[Aabb<T>]) -> Tree<T, u32> {
    let mut tree = Tree::with_capacity(rects.len());
    for (i, r) in rects.iter().enumerate() {
        tree.insert(r.clone(), i as u32).expect("uniform dimensionality");
    }
    tree
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_f64");
    for &n in &[32usize, 64, 128] {
        let rects = gen_grid_rects(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_n{}", n), |b| {
            b.iter(|| black_box(build(&rects)));
        });
    }
    let rects = gen_random_rects(4096, 2000.0, 12.0);
    group.throughput(Throughput::Elements(rects.len() as u64));
    group.bench_function("random_4096", |b| b.iter(|| black_box(build(&rects))));
    let rects = gen_clustered_rects(32, 128, 200.0);
    group.bench_function("clustered_4096", |b| b.iter(|| black_box(build(&rects))));
    group.finish();
}

fn bench_insert_i64(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_i64");
    for &n in &[32usize, 64] {
        let rects = gen_grid_rects_i64(n, 10);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_n{}", n), |b| {
            b.iter(|| black_box(build(&rects)));
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_f64");
    let rects = gen_random_rects(4096, 2000.0, 12.0);
    let tree = build(&rects);
    let window = rect(800.0, 800.0, 400.0, 400.0);
    group.bench_function("overlap_values_window", |b| {
        b.iter(|| black_box(tree.overlap_values(&window).expect("2-D query").len()));
    });
    group.bench_function("does_overlap_window", |b| {
        b.iter(|| black_box(tree.does_overlap(&window).expect("2-D query")));
    });
    group.bench_function("many_small_queries", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for q in 0..256 {
                let x = (q % 16) as f64 * 120.0;
                let y = (q / 16) as f64 * 120.0;
                let probe = rect(x, y, 16.0, 16.0);
                total += tree.overlap_values(&probe).expect("2-D query").len();
            }
            black_box(total)
        });
    });
    group.finish();
}

fn bench_build_then_query_3d(c: &mut Criterion) {
    let mut group = c.benchmark_group("cubes_f64");
    let cubes = gen_random_cubes(4096);
    let probe = Aabb::new([(400.0, 600.0), (400.0, 600.0), (400.0, 600.0)]).expect("valid probe");
    group.bench_function("build_then_query", |b| {
        b.iter_batched(
            || cubes.clone(),
            |cubes| {
                let tree = build(&cubes);
                black_box(tree.overlap_values(&probe).expect("3-D query").len());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_insert_i64,
    bench_query,
    bench_build_then_query_3d
);
criterion_main!(benches);
