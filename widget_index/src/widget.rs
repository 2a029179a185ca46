// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stored entity.

use crate::types::{Rect, Timestamp, WidgetId};

/// A rectangular widget on the stacking plane.
///
/// `id` never changes once assigned. Everything else is mutable through the
/// owning [`WidgetIndex`](crate::WidgetIndex), which keeps its lookup
/// structures in sync with these fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Widget {
    id: WidgetId,
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Stacking key. Higher is drawn on top; unique across a live index.
    pub z_index: i32,
    /// Width, expected to be positive.
    pub width: i32,
    /// Height, expected to be positive.
    pub height: i32,
    /// Last time any field changed, including being shifted.
    pub updated_at: Timestamp,
}

impl Widget {
    /// Construct a widget. Dimensions are not validated here; callers reject
    /// non-positive sizes before construction.
    pub fn new(
        id: WidgetId,
        x: i32,
        y: i32,
        z_index: i32,
        width: i32,
        height: i32,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            x,
            y,
            z_index,
            width,
            height,
            updated_at,
        }
    }

    /// The widget's identifier.
    pub fn id(&self) -> &WidgetId {
        &self.id
    }

    /// The occupied rectangle: `(x, y, x + width, y + height)`.
    pub fn rect(&self) -> Rect {
        Rect::from_xywh(self.x, self.y, self.width, self.height)
    }

    /// Refresh `updated_at`, never moving it backwards.
    pub fn touch(&mut self, now: Timestamp) {
        self.updated_at = self.updated_at.max(now);
    }
}
