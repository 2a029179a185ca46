// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget Store: a concurrent z-ordered widget store.
//!
//! This crate wraps a [`widget_index::WidgetIndex`] for use from many threads:
//!
//! - [`OptimisticLock`] guards the index. Readers try a non-blocking, stamp-validated path first
//!   and fall back to a shared lock. Writers take it exclusively.
//! - [`WidgetStore`] exposes the index operations (find, list, filter, save, shift, delete) as
//!   single calls, and [`WriteTxn`] for compound writes that must be seen atomically.
//! - [`WidgetService`] validates input and decides z-indexes: new widgets without one go on top,
//!   and inserts at an occupied key shift the contiguous run above it.
//!
//! Logging goes through `tracing`; no subscriber is installed here.
//!
//! # Example
//!
//! ```rust
//! use widget_store::{PageRequest, Rect, WidgetParams, WidgetService};
//!
//! let svc = WidgetService::new();
//! let a = svc.create(WidgetParams::new(0, 0, 10, 10).at_z(5)).unwrap();
//! let b = svc.create(WidgetParams::new(20, 20, 10, 10).at_z(5)).unwrap();
//! let top = svc.create(WidgetParams::new(0, 0, 50, 50)).unwrap();
//!
//! // `b` took key 5 and pushed `a` up; `top` landed above everything.
//! let order: Vec<i32> = svc.list().iter().map(|w| w.z_index).collect();
//! assert_eq!(order, [5, 6, 7]);
//! assert_eq!(svc.get(&a.id.as_str().into()).unwrap().z_index, 6);
//! assert_eq!(top.z_index, 7);
//!
//! let inside = svc.filter(PageRequest::new(0, 10), &Rect::new(0, 0, 30, 30)).unwrap();
//! assert_eq!(inside.total, 2);
//! assert_eq!(inside.items[0].id, b.id);
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod guard;
pub mod params;
pub mod service;
pub mod store;
pub mod view;

pub use clock::{Clock, SystemClock};
pub use config::StoreConfig;
pub use error::StoreError;
pub use guard::{LockStats, OptimisticLock, WriteSection};
pub use params::WidgetParams;
pub use service::WidgetService;
pub use store::{WidgetStore, WriteTxn};
pub use view::WidgetView;

pub use widget_index::{Page, PageRequest, Rect, Shift, Timestamp, Widget, WidgetId};
