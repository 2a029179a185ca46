// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `WidgetIndex`: the primary store and its lookup structures as one unit.

use crate::error::IndexError;
use crate::identity::IdentityIndex;
use crate::page::{Page, PageRequest};
use crate::primary::PrimaryIndex;
use crate::range::{Edge, RangeIndexSet};
use crate::types::{Rect, WidgetId};
use crate::widget::Widget;

/// Widgets keyed by stacking order, with id lookup and edge range filters.
///
/// Every mutating method updates the primary map, the id map and all four
/// edge maps together, so for every stored widget:
///
/// - `primary[w.z_index] == w`
/// - `identity[w.id] == w.z_index`
/// - each edge of `w.rect()` is registered under `w.z_index`
///
/// [`WidgetIndex::verify`] checks exactly this.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WidgetIndex {
    pub(crate) primary: PrimaryIndex,
    pub(crate) identity: IdentityIndex,
    pub(crate) ranges: RangeIndexSet,
}

impl WidgetIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the primary map.
    pub fn primary(&self) -> &PrimaryIndex {
        &self.primary
    }

    /// Read-only view of the id map.
    pub fn identity(&self) -> &IdentityIndex {
        &self.identity
    }

    /// Read-only view of the edge maps.
    pub fn ranges(&self) -> &RangeIndexSet {
        &self.ranges
    }

    /// Look a widget up by id.
    pub fn find_by_id(&self, id: &WidgetId) -> Option<&Widget> {
        let key = self.identity.lookup(id).ok()?;
        self.primary.get(key)
    }

    /// All widgets, bottom-most (lowest z-index) first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Widget> + ExactSizeIterator + '_ {
        self.primary.iter().rev().map(|(_, w)| w)
    }

    /// One page of [`WidgetIndex::iter`], with the total widget count.
    pub fn page(&self, request: PageRequest) -> Page<Widget> {
        Page::from_iter_with_total(self.iter().cloned(), self.len(), request)
    }

    /// Widgets lying fully inside `query`, ordered by z-index, paginated.
    ///
    /// `total` is the number of matches across all pages.
    pub fn filter(&self, request: PageRequest, query: &Rect) -> Page<Widget> {
        let keys = self.ranges.contained_in(query);
        let total = keys.len();
        Page::from_iter_with_total(
            keys.into_iter().filter_map(|key| self.primary.get(key).cloned()),
            total,
            request,
        )
    }

    /// Insert or replace `widget` at its own z-index.
    ///
    /// If this id was stored under another key, that entry is dropped first. If
    /// a *different* widget occupies the target key it is evicted from every
    /// structure and returned; callers avoid this by shifting first.
    pub fn save(&mut self, widget: Widget) -> Option<Widget> {
        let key = widget.z_index;
        let rect = widget.rect();

        if let Ok(old_key) = self.identity.lookup(widget.id())
            && old_key != key
            && let Some(old) = self.primary.remove(old_key)
        {
            self.ranges.remove(&old.rect(), old_key);
        }

        let displaced = match self.primary.remove(key) {
            Some(previous) => {
                self.ranges
                    .reindex(Some((&previous.rect(), previous.z_index)), (&rect, key));
                if previous.id() == widget.id() {
                    None
                } else {
                    self.identity.remove(previous.id());
                    Some(previous)
                }
            }
            None => {
                self.ranges.reindex(None, (&rect, key));
                None
            }
        };

        self.identity.insert(widget.id().clone(), key);
        self.primary.put(key, widget);
        displaced
    }

    /// Remove the widget with this id from every structure.
    ///
    /// Returns `None`, touching nothing, if the id is unknown.
    pub fn delete_by_id(&mut self, id: &WidgetId) -> Option<Widget> {
        let key = self.identity.remove(id)?;
        let widget = self.primary.remove(key)?;
        self.ranges.remove(&widget.rect(), key);
        Some(widget)
    }

    /// Remove every widget.
    pub fn purge(&mut self) {
        self.primary.clear();
        self.identity.clear();
        self.ranges.clear();
    }

    /// Number of stored widgets.
    pub fn len(&self) -> usize {
        self.primary.len()
    }

    /// Whether no widgets are stored.
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty()
    }

    /// Check that the primary map, id map and edge maps agree.
    pub fn verify(&self) -> Result<(), IndexError> {
        if self.identity.len() != self.primary.len() {
            return Err(IndexError::Inconsistent("id map size differs from primary"));
        }
        for (key, widget) in self.primary.iter() {
            if widget.z_index != key {
                return Err(IndexError::Inconsistent("z-index field differs from its key"));
            }
            if self.identity.lookup(widget.id())? != key {
                return Err(IndexError::Inconsistent("id map points at another key"));
            }
            if !self.ranges.contains(&widget.rect(), key) {
                return Err(IndexError::Inconsistent("edge registration missing"));
            }
        }
        for edge in Edge::ALL {
            if self.ranges.edge(edge).entries() != self.primary.len() {
                return Err(IndexError::Inconsistent("stale edge registration"));
            }
        }
        Ok(())
    }
}
