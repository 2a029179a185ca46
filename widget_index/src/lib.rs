// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget Index: a z-ordered rectangle multi-index.
//!
//! Widget Index stores rectangular widgets that each hold a unique integer
//! stacking key (z-index) and answers two kinds of queries quickly:
//!
//! - By identity, through an id → z-index map.
//! - By rectangle containment, through four ordered edge maps (left, top, right, bottom).
//!
//! All five structures live in one [`WidgetIndex`] so that every mutation updates them together.
//!
//! Keys never collide. Inserting at an occupied key first shifts the contiguous run of occupied
//! keys starting there up by one (see [`shift`]); gaps stop the cascade.
//!
//! This crate does no locking, reads no clock and generates no ids. Higher layers (like a
//! concurrent store) supply timestamps and identifiers and guard access.
//!
//! # Example
//!
//! ```rust
//! use widget_index::{PageRequest, Rect, Timestamp, Widget, WidgetIndex};
//!
//! let mut idx = WidgetIndex::new();
//! for (id, z) in [("a", 100), ("b", 101), ("c", 110)] {
//!     idx.save(Widget::new(id.into(), 0, 0, z, 10, 10, Timestamp::ZERO));
//! }
//!
//! // Make room at 100: `a` and `b` move up, `c` is past the gap and stays.
//! let shift = idx.shift_upwards(100, Timestamp(1)).unwrap();
//! assert_eq!(shift.len(), 2);
//! idx.save(Widget::new("d".into(), 0, 0, 100, 10, 10, Timestamp(1)));
//!
//! let order: Vec<i32> = idx.iter().map(|w| w.z_index).collect();
//! assert_eq!(order, [100, 101, 102, 110]);
//!
//! // Everything fits in this rectangle.
//! let page = idx.filter(PageRequest::new(0, 10), &Rect::new(0, 0, 10, 10));
//! assert_eq!(page.total, 4);
//! ```
//!
//! ## Ordering
//!
//! [`PrimaryIndex`] iterates highest z-index first (its "descending" map order), so
//! [`PrimaryIndex::first_key`] is the maximum. Listing and filtering walk the reverse of that
//! order and yield widgets bottom-most first.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod error;
pub mod identity;
pub mod index;
pub mod page;
pub mod primary;
pub mod range;
pub mod shift;
pub mod types;
pub mod widget;

pub use error::IndexError;
pub use identity::IdentityIndex;
pub use index::WidgetIndex;
pub use page::{Page, PageRequest};
pub use primary::PrimaryIndex;
pub use range::{Edge, EdgeMap, RangeIndexSet};
pub use shift::{Moved, Shift};
pub use types::{Rect, Timestamp, WidgetId};
pub use widget::Widget;
