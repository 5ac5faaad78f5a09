// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_aabb_tree::{Aabb, Tree};

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Aabb<f64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            let b = Aabb::new([(x0, x0 + cell), (y0, y0 + cell)]);
            out.push(b.expect("non-negative extents"));
        }
    }
    out
}

fn to_rstar_rects(v: &[Aabb<f64>]) -> Vec<Rectangle<[f64; 2]>> {
    v.iter()
        .map(|r| Rectangle::from_corners([r[0].0, r[1].0], [r[0].1, r[1].1]))
        .collect()
}

fn bench_rtree_external_compare_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_external_compare_f64");
    for &n in &[64usize, 128] {
        let rects = gen_grid_rects(n, 10.0);
        let query = Aabb::new([(100.0, 500.0), (100.0, 500.0)]).expect("valid query");
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("understory_insert_query_n{}", n), |b| {
            b.iter_batched(
                Tree::<f64, u32>::new,
                |mut tree| {
                    for (i, r) in rects.iter().enumerate() {
                        tree.insert(r.clone(), i as u32).expect("2-D item");
                    }
                    let hits = tree.overlap_values(&query).expect("2-D query").len();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_insert_query_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_rects(&rects),
                |rectangles| {
                    let mut tree = RTree::new();
                    for r in rectangles {
                        tree.insert(r);
                    }
                    let envelope = AABB::from_corners([100.0, 100.0], [500.0, 500.0]);
                    let hits: usize = tree.locate_in_envelope_intersecting(&envelope).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rtree_external_compare_f64);
criterion_main!(benches);
