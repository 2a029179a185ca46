// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget Index basics.
//!
//! Save a few widgets, shift to make room, filter by rectangle, and delete.
//!
//! Run:
//! - `cargo run -p widget_demos --example index_basics`

use widget_index::{PageRequest, Rect, Timestamp, Widget, WidgetIndex};

fn main() {
    let mut idx = WidgetIndex::new();
    idx.save(Widget::new("a".into(), 0, 0, 1, 10, 10, Timestamp(0)));
    idx.save(Widget::new("b".into(), 5, 5, 2, 10, 10, Timestamp(0)));

    // Insert at an occupied key.
    let shift = idx
        .shift_upwards(1, Timestamp(1))
        .expect("run does not reach i32::MAX");
    println!("moved: {:?}", shift.moved);
    idx.save(Widget::new("c".into(), 20, 0, 1, 10, 10, Timestamp(1)));

    // Query a rectangle
    let hits = idx.filter(PageRequest::new(0, 10), &Rect::new(0, 0, 15, 15));
    println!("inside (0,0)-(15,15): {:?}", hits.items);

    idx.delete_by_id(&"a".into());
    println!("left: {:?}", idx.iter().map(|w| w.id()).collect::<Vec<_>>());
}
