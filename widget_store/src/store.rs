// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `WidgetStore`: a [`WidgetIndex`] shared between threads.

use std::sync::Arc;

use widget_index::{
    IndexError, Page, PageRequest, Rect, Shift, Timestamp, Widget, WidgetId, WidgetIndex,
};

use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::guard::{LockStats, OptimisticLock, WriteSection};
use crate::params::WidgetParams;

/// Thread-safe widget storage.
///
/// Reads go through the optimistic path of an [`OptimisticLock`] and return
/// owned copies. Each single-call write opens its own write section; compound
/// operations (shift then save) use [`WidgetStore::write`] to keep every step
/// inside one section.
#[derive(Debug)]
pub struct WidgetStore {
    index: OptimisticLock<WidgetIndex>,
    clock: Arc<dyn Clock>,
    config: StoreConfig,
}

impl Default for WidgetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetStore {
    /// An empty store with default configuration and the system clock.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// An empty store with `config` and the system clock.
    pub fn with_config(config: StoreConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// An empty store reading time from `clock`.
    pub fn with_clock(config: StoreConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            index: OptimisticLock::with_optimistic_reads(
                WidgetIndex::new(),
                config.optimistic_reads,
            ),
            clock,
            config,
        }
    }

    /// The configuration this store was built with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Build a widget with a fresh random id. Nothing is stored.
    ///
    /// An absent z-index becomes `0`; callers that care pick one first.
    pub fn create_entity(&self, params: &WidgetParams) -> Widget {
        Widget::new(
            WidgetId::new(uuid::Uuid::new_v4().to_string()),
            params.x,
            params.y,
            params.z_index.unwrap_or_default(),
            params.width,
            params.height,
            self.clock.now(),
        )
    }

    /// Run `f` against a consistent snapshot of the index.
    pub fn read<R>(&self, f: impl FnOnce(&WidgetIndex) -> R) -> R {
        self.index.read(f)
    }

    /// Open a write transaction. Other writers and lock-holding readers wait
    /// until it is dropped; optimistic readers keep seeing the last published
    /// state.
    pub fn write(&self) -> WriteTxn<'_> {
        WriteTxn {
            index: self.index.write(),
            now: self.clock.now(),
        }
    }

    /// The widget with this id, if stored.
    pub fn find_by_id(&self, id: &WidgetId) -> Option<Widget> {
        self.read(|idx| idx.find_by_id(id).cloned())
    }

    /// Every widget, bottom-most first.
    pub fn find_all(&self) -> Vec<Widget> {
        self.read(|idx| idx.iter().cloned().collect())
    }

    /// One page of [`WidgetStore::find_all`].
    pub fn find_all_paged(&self, request: PageRequest) -> Page<Widget> {
        self.read(|idx| idx.page(request))
    }

    /// Widgets lying fully inside `query`, bottom-most first, paginated.
    pub fn filter(&self, request: PageRequest, query: &Rect) -> Page<Widget> {
        self.read(|idx| idx.filter(request, query))
    }

    /// Number of stored widgets.
    pub fn count(&self) -> usize {
        self.read(WidgetIndex::len)
    }

    /// Highest z-index in use, or `0` when empty.
    pub fn max_index(&self) -> i32 {
        self.read(WidgetIndex::max_index)
    }

    /// Whether a new widget at `z` would need a shift first.
    pub fn needs_shift(&self, z: i32) -> bool {
        self.read(|idx| idx.needs_shift(z))
    }

    /// Whether moving `id` to `z` would need a shift first.
    pub fn needs_shift_for(&self, z: i32, id: &WidgetId) -> bool {
        self.read(|idx| idx.needs_shift_for(z, id))
    }

    /// Insert or replace `widget`. Returns a different widget evicted from the
    /// same key, which only happens if no shift preceded the save.
    pub fn save(&self, widget: Widget) -> Option<Widget> {
        self.write().save(widget)
    }

    /// Free key `z` by moving its contiguous run up by one.
    pub fn shift_upwards(&self, z: i32) -> Result<Shift, IndexError> {
        self.write().shift_upwards(z)
    }

    /// Remove a widget. Returns false, changing nothing, if the id is unknown.
    pub fn delete_by_id(&self, id: &WidgetId) -> bool {
        self.write().delete_by_id(id).is_some()
    }

    /// Remove every widget.
    pub fn purge(&self) {
        self.write().purge();
    }

    /// Check that all lookup structures agree.
    pub fn verify(&self) -> Result<(), IndexError> {
        self.read(WidgetIndex::verify)
    }

    /// How reads and writes have been served so far.
    pub fn lock_stats(&self) -> LockStats {
        self.index.stats()
    }
}

/// An open write section over a [`WidgetStore`], stamped with one `now`.
///
/// Dropping the transaction publishes its changes.
#[derive(Debug)]
pub struct WriteTxn<'a> {
    index: WriteSection<'a, WidgetIndex>,
    now: Timestamp,
}

impl WriteTxn<'_> {
    /// Time recorded when the transaction opened.
    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// Read access to the index inside the transaction.
    pub fn index(&self) -> &WidgetIndex {
        &self.index
    }

    /// The widget with this id, if stored.
    pub fn find_by_id(&self, id: &WidgetId) -> Option<&Widget> {
        self.index.find_by_id(id)
    }

    /// Highest z-index in use, or `0` when empty.
    pub fn max_index(&self) -> i32 {
        self.index.max_index()
    }

    /// Whether a new widget at `z` needs a shift first.
    pub fn needs_shift(&self, z: i32) -> bool {
        self.index.needs_shift(z)
    }

    /// Whether moving `id` to `z` needs a shift first.
    pub fn needs_shift_for(&self, z: i32, id: &WidgetId) -> bool {
        self.index.needs_shift_for(z, id)
    }

    /// Free key `z`, touching every moved widget with this transaction's time.
    pub fn shift_upwards(&mut self, z: i32) -> Result<Shift, IndexError> {
        let shift = self.index.shift_upwards(z, self.now)?;
        if !shift.is_empty() {
            tracing::trace!(z, moved = shift.len(), "shifted run upwards");
        }
        Ok(shift)
    }

    /// Insert or replace `widget`.
    pub fn save(&mut self, widget: Widget) -> Option<Widget> {
        let (id, z) = (widget.id().clone(), widget.z_index);
        let displaced = self.index.save(widget);
        if let Some(old) = &displaced {
            tracing::warn!(%id, z, displaced = %old.id(), "save displaced another widget");
        }
        displaced
    }

    /// Remove a widget, returning it.
    pub fn delete_by_id(&mut self, id: &WidgetId) -> Option<Widget> {
        let removed = self.index.delete_by_id(id);
        if let Some(w) = &removed {
            tracing::debug!(%id, z = w.z_index, "deleted widget");
        }
        removed
    }

    /// Remove every widget.
    pub fn purge(&mut self) {
        let count = self.index.len();
        self.index.purge();
        tracing::debug!(count, "purged store");
    }
}
