// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget service basics.
//!
//! Create widgets with and without a z-index, update one into an occupied
//! key, page and filter, and print the JSON views.
//!
//! Run:
//! - `RUST_LOG=widget_store=trace cargo run -p widget_demos --example service_basics`

use tracing_subscriber::EnvFilter;
use widget_store::{PageRequest, Rect, StoreError, WidgetId, WidgetParams, WidgetService};

fn main() -> Result<(), StoreError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let svc = WidgetService::new();
    for z in [100, 101, 110, 120] {
        svc.create(WidgetParams::new(z, z, 50, 50).at_z(z))?;
    }
    // Lands on 100; 100 and 101 move up, 110 and 120 stay.
    let fresh = svc.create(WidgetParams::new(0, 0, 20, 20).at_z(100))?;
    // No z-index: goes on top.
    let top = svc.create(WidgetParams::new(10, 10, 300, 300))?;
    println!("new at {}, top at {}", fresh.z_index, top.z_index);

    let id = WidgetId::new(top.id.clone());
    svc.update(&id, WidgetParams::new(10, 10, 30, 30).at_z(110))?;

    for w in svc.list() {
        println!("{:>4}  {}", w.z_index, w.id);
    }

    let page = svc.list_page(svc.default_page(0))?;
    println!("page 0 of {}: {} items", page.total_pages(), page.items.len());

    let inside = svc.filter(PageRequest::new(0, 10), &Rect::new(0, 0, 200, 200))?;
    match serde_json::to_string_pretty(&inside.items) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("could not render widgets: {err}"),
    }

    println!("{:?}", svc.store().lock_stats());
    Ok(())
}
