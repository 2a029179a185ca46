// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shift engine: making room at an occupied stacking key.
//!
//! Inserting at an occupied key `z` pushes the widget at `z` up by one. That
//! only cascades through the *contiguous* run of occupied keys starting at `z`:
//! with keys `1, 2, 3, 4, 5, 10, 11` and an insert at `3`, the widgets at
//! `3, 4, 5` move to `4, 5, 6` and `10, 11` stay put.
//!
//! The end of the run is found by bisection. Let `L` be the ascending list of
//! occupied keys `>= z`. Keys are unique integers, so `L[i] >= z + i` for every
//! `i`, and `L[i] == z + i` holds for a prefix of `L` and fails for the rest.
//! The run end is the last element of that prefix.

use alloc::vec::Vec;

use crate::error::IndexError;
use crate::index::WidgetIndex;
use crate::primary::PrimaryIndex;
use crate::types::{Timestamp, WidgetId};

/// A single widget moved by a shift.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Moved {
    /// The moved widget.
    pub id: WidgetId,
    /// Key before the shift.
    pub from: i32,
    /// Key after the shift.
    pub to: i32,
}

/// Summary of a shift, listing moved widgets from the highest key down.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Shift {
    /// Widgets moved up by one.
    pub moved: Vec<Moved>,
}

impl Shift {
    /// True if nothing moved.
    pub fn is_empty(&self) -> bool {
        self.moved.is_empty()
    }

    /// Number of widgets moved.
    pub fn len(&self) -> usize {
        self.moved.len()
    }
}

/// Highest key of the contiguous occupied run starting at `z`, or `None` if
/// `z` itself is free.
pub fn run_end(primary: &PrimaryIndex, z: i32) -> Option<i32> {
    if !primary.contains(z) {
        return None;
    }
    // Map order is descending, so the head of `z` reversed is ascending from `z`.
    let keys: Vec<i32> = primary.head_range(z, true).rev().map(|(k, _)| k).collect();
    let contiguous =
        |i: usize| usize::try_from(i64::from(keys[i]) - i64::from(z)).is_ok_and(|d| d == i);

    // Invariant: `keys[lo]` is in the run, `keys[hi]` (if any) is not.
    let (mut lo, mut hi) = (0, keys.len());
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if contiguous(mid) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Some(keys[lo])
}

impl WidgetIndex {
    /// Highest z-index in use, or `0` when empty.
    pub fn max_index(&self) -> i32 {
        self.primary.first_key().unwrap_or(0)
    }

    /// Whether inserting a new widget at `z` requires a shift.
    pub fn needs_shift(&self, z: i32) -> bool {
        self.primary.contains(z)
    }

    /// Whether moving widget `id` to `z` requires a shift.
    ///
    /// A widget never shifts itself: if `id` already holds `z` this is false.
    pub fn needs_shift_for(&self, z: i32, id: &WidgetId) -> bool {
        self.primary.get(z).is_some_and(|w| w.id() != id)
    }

    /// Move every widget in the contiguous run starting at `z` up by one,
    /// leaving `z` free.
    ///
    /// Each moved widget is re-registered in all lookup structures and touched
    /// with `now`. Nothing is modified if the run would overflow `i32::MAX`.
    pub fn shift_upwards(&mut self, z: i32, now: Timestamp) -> Result<Shift, IndexError> {
        let Some(end) = run_end(&self.primary, z) else {
            return Ok(Shift::default());
        };
        if end == i32::MAX {
            return Err(IndexError::ZIndexOverflow(end));
        }

        let mut shift = Shift::default();
        // Highest first, so each `key + 1` is already free when we write it.
        for key in (z..=end).rev() {
            let mut widget = self
                .primary
                .remove(key)
                .ok_or(IndexError::KeyNotFound(key))?;
            let rect = widget.rect();
            self.ranges.remove(&rect, key);
            widget.z_index = key + 1;
            widget.touch(now);
            self.ranges.add(&rect, key + 1);
            self.identity.insert(widget.id().clone(), key + 1);
            shift.moved.push(Moved {
                id: widget.id().clone(),
                from: key,
                to: key + 1,
            });
            self.primary.put(key + 1, widget);
        }
        Ok(shift)
    }
}
