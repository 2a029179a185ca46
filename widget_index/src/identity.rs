// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Id → stacking key lookup.

use alloc::collections::BTreeMap;

use crate::error::IndexError;
use crate::types::WidgetId;

/// Unique map from widget id to its current z-index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdentityIndex {
    map: BTreeMap<WidgetId, i32>,
}

impl IdentityIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current z-index of `id`.
    pub fn lookup(&self, id: &WidgetId) -> Result<i32, IndexError> {
        self.map
            .get(id)
            .copied()
            .ok_or_else(|| IndexError::IdNotFound(id.clone()))
    }

    /// Record `id` at `key`, returning the key it had before.
    pub fn insert(&mut self, id: WidgetId, key: i32) -> Option<i32> {
        self.map.insert(id, key)
    }

    /// Forget `id`, returning the key it had.
    pub fn remove(&mut self, id: &WidgetId) -> Option<i32> {
        self.map.remove(id)
    }

    /// All `(id, key)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&WidgetId, i32)> + '_ {
        self.map.iter().map(|(id, k)| (id, *k))
    }

    /// Number of tracked ids.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether no ids are tracked.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}
