// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Concurrent readers.
//!
//! One thread keeps inserting at the bottom of the stack while several
//! readers filter the store. Prints how many reads stayed optimistic.
//!
//! Run:
//! - `cargo run -p widget_demos --example concurrent_readers`

use std::thread;

use tracing_subscriber::EnvFilter;
use widget_store::{PageRequest, Rect, StoreConfig, WidgetParams, WidgetService, WidgetStore};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match StoreConfig::from_toml_str("optimistic_reads = true\nmax_page_size = 100") {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };
    let svc = WidgetService::with_store(WidgetStore::with_config(config));
    let query = Rect::new(0, 0, 500, 500);

    thread::scope(|s| {
        s.spawn(|| {
            for i in 0..2000 {
                let params = WidgetParams::new(i % 600, i % 400, 10, 10).at_z(0);
                if let Err(err) = svc.create(params) {
                    eprintln!("create failed: {err}");
                    return;
                }
            }
        });
        for _ in 0..4 {
            s.spawn(|| {
                let mut seen = 0;
                for _ in 0..500 {
                    if let Ok(page) = svc.filter(PageRequest::new(0, 100), &query) {
                        seen = seen.max(page.total);
                    }
                }
                println!("reader saw up to {seen} matches");
            });
        }
    });

    let stats = svc.store().lock_stats();
    println!(
        "{} widgets, {} optimistic reads, {} locked reads, {} writes",
        svc.store().count(),
        stats.optimistic_reads,
        stats.locked_reads,
        stats.writes
    );
}
