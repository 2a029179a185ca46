// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::thread;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use widget_store::{PageRequest, Rect, WidgetParams, WidgetService};

fn bench_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("create");
    for &n in &[256usize, 1024] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("on_top_n{}", n), |b| {
            b.iter_batched(
                WidgetService::new,
                |svc| {
                    for i in 0..n as i32 {
                        let _ = svc.create(WidgetParams::new(i, i, 10, 10));
                    }
                    black_box(svc.store().count());
                },
                BatchSize::SmallInput,
            )
        });
        // Every insert lands on key 0 and pushes the whole stack.
        group.bench_function(format!("at_bottom_n{}", n), |b| {
            b.iter_batched(
                WidgetService::new,
                |svc| {
                    for i in 0..n as i32 {
                        let _ = svc.create(WidgetParams::new(i, i, 10, 10).at_z(0));
                    }
                    black_box(svc.store().count());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn populated(n: i32) -> WidgetService {
    let svc = WidgetService::new();
    for i in 0..n {
        let _ = svc.create(WidgetParams::new((i * 37) % 1000, (i * 53) % 1000, 20, 20));
    }
    svc
}

fn bench_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("reads");
    let svc = populated(5000);
    let query = Rect::new(0, 0, 300, 300);
    group.bench_function("list_page_5k", |b| {
        b.iter(|| black_box(svc.list_page(PageRequest::new(10, 50)).map(|p| p.items.len())))
    });
    group.bench_function("filter_5k", |b| {
        b.iter(|| black_box(svc.filter(PageRequest::new(0, 50), &query).map(|p| p.total)))
    });
    group.bench_function("filter_5k_with_writer", |b| {
        b.iter(|| {
            thread::scope(|s| {
                s.spawn(|| {
                    for i in 0..20 {
                        let _ = svc.create(WidgetParams::new(i, i, 5, 5).at_z(i));
                    }
                });
                for _ in 0..20 {
                    let _ = black_box(svc.filter(PageRequest::new(0, 50), &query));
                }
            });
        })
    });
    group.finish();
}

criterion_group!(benches, bench_create, bench_reads);
criterion_main!(benches);
