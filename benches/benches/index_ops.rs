// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use widget_index::{PageRequest, Rect, Timestamp, Widget, WidgetIndex};

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
    fn below(&mut self, n: u64) -> i32 {
        (self.next_u64() % n) as i32
    }
}

fn grid_index(n: usize, cell: i32) -> WidgetIndex {
    let mut idx = WidgetIndex::new();
    for y in 0..n {
        for x in 0..n {
            let z = (y * n + x) as i32;
            let w = Widget::new(
                format!("g{z}").into(),
                x as i32 * cell,
                y as i32 * cell,
                z,
                cell,
                cell,
                Timestamp::ZERO,
            );
            idx.save(w);
        }
    }
    idx
}

fn random_index(count: usize, extent: u64) -> WidgetIndex {
    let mut idx = WidgetIndex::new();
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for z in 0..count as i32 {
        let w = Widget::new(
            format!("r{z}").into(),
            rng.below(extent),
            rng.below(extent),
            z * 2,
            1 + rng.below(40),
            1 + rng.below(40),
            Timestamp::ZERO,
        );
        idx.save(w);
    }
    idx
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    for &n in &[32usize, 64, 128] {
        let idx = grid_index(n, 10);
        let query = Rect::new(100, 100, 500, 500);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_n{}", n), |b| {
            b.iter(|| {
                let page = idx.filter(PageRequest::new(0, 50), black_box(&query));
                black_box(page.total);
            })
        });
    }
    let idx = random_index(10_000, 2000);
    group.bench_function("random_10k_small_query", |b| {
        let query = Rect::new(500, 500, 600, 600);
        b.iter(|| black_box(idx.filter(PageRequest::new(0, 50), &query).total))
    });
    group.finish();
}

fn bench_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("page");
    let idx = grid_index(100, 10);
    for &page in &[0usize, 50, 999] {
        group.bench_function(format!("size10_page{}", page), |b| {
            b.iter(|| black_box(idx.page(PageRequest::new(page, 10)).items.len()))
        });
    }
    group.finish();
}

fn bench_shift(c: &mut Criterion) {
    let mut group = c.benchmark_group("shift");
    for &n in &[16usize, 64] {
        // Contiguous keys, so shifting at 0 moves everything.
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("full_run_n{}", n), |b| {
            b.iter_batched(
                || grid_index(n, 10),
                |mut idx| black_box(idx.shift_upwards(0, Timestamp(1)).map(|s| s.len())),
                BatchSize::SmallInput,
            )
        });
    }
    // Even keys only: every run has length one.
    group.bench_function("gapped_10k", |b| {
        b.iter_batched(
            || random_index(10_000, 2000),
            |mut idx| black_box(idx.shift_upwards(5000, Timestamp(1)).map(|s| s.len())),
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_filter, bench_page, bench_shift);
criterion_main!(benches);
