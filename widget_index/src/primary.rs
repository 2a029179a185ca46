// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primary store: widgets keyed by stacking order.

use alloc::collections::BTreeMap;
use core::cmp::Reverse;

use crate::error::IndexError;
use crate::widget::Widget;

/// Ordered map from z-index to widget, iterated highest key first.
///
/// This is the single source of truth for which widgets exist. "Head" and
/// "tail" ranges follow the map's own (descending) order: the head of `k` holds
/// the keys above `k`, the tail holds the keys below it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrimaryIndex {
    map: BTreeMap<Reverse<i32>, Widget>,
}

impl PrimaryIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Widget stored at `key`.
    pub fn get(&self, key: i32) -> Option<&Widget> {
        self.map.get(&Reverse(key))
    }

    /// Whether a widget occupies `key`.
    pub fn contains(&self, key: i32) -> bool {
        self.map.contains_key(&Reverse(key))
    }

    /// Store `widget` at `key`, returning the previous occupant.
    pub fn put(&mut self, key: i32, widget: Widget) -> Option<Widget> {
        self.map.insert(Reverse(key), widget)
    }

    /// Remove and return the widget at `key`.
    pub fn remove(&mut self, key: i32) -> Option<Widget> {
        self.map.remove(&Reverse(key))
    }

    /// Entries ordered before `key`, i.e. keys greater than (or equal to, if
    /// `inclusive`) `key`, highest first.
    pub fn head_range(
        &self,
        key: i32,
        inclusive: bool,
    ) -> impl DoubleEndedIterator<Item = (i32, &Widget)> + '_ {
        let upper = if inclusive {
            core::ops::Bound::Included(Reverse(key))
        } else {
            core::ops::Bound::Excluded(Reverse(key))
        };
        self.map
            .range((core::ops::Bound::Unbounded, upper))
            .map(|(k, w)| (k.0, w))
    }

    /// Entries ordered after `key`, i.e. keys less than (or equal to, if
    /// `inclusive`) `key`, highest first.
    pub fn tail_range(
        &self,
        key: i32,
        inclusive: bool,
    ) -> impl DoubleEndedIterator<Item = (i32, &Widget)> + '_ {
        let lower = if inclusive {
            core::ops::Bound::Included(Reverse(key))
        } else {
            core::ops::Bound::Excluded(Reverse(key))
        };
        self.map
            .range((lower, core::ops::Bound::Unbounded))
            .map(|(k, w)| (k.0, w))
    }

    /// The first key in map order, which is the highest z-index.
    pub fn first_key(&self) -> Result<i32, IndexError> {
        self.map
            .first_key_value()
            .map(|(k, _)| k.0)
            .ok_or(IndexError::Empty)
    }

    /// All entries, highest key first.
    pub fn iter(
        &self,
    ) -> impl DoubleEndedIterator<Item = (i32, &Widget)> + ExactSizeIterator + '_ {
        self.map.iter().map(|(k, w)| (k.0, w))
    }

    /// Number of stored widgets.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}
