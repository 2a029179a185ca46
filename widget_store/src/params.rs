// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction and update parameters.

use serde::Deserialize;

use crate::error::StoreError;

/// Geometry and optional stacking key for creating or updating a widget.
///
/// Field names on the wire follow the public API (`xCoordinate`,
/// `yCoordinate`, `zIndex`, `width`, `height`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetParams {
    /// Left edge.
    #[serde(rename = "xCoordinate")]
    pub x: i32,
    /// Top edge.
    #[serde(rename = "yCoordinate")]
    pub y: i32,
    /// Requested stacking key. `None` puts a new widget on top and leaves an
    /// updated widget where it is.
    #[serde(default)]
    pub z_index: Option<i32>,
    /// Width, must be positive.
    pub width: i32,
    /// Height, must be positive.
    pub height: i32,
}

impl WidgetParams {
    /// Parameters with no requested z-index.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            z_index: None,
            width,
            height,
        }
    }

    /// The same parameters targeting z-index `z`.
    #[must_use]
    pub const fn at_z(self, z: i32) -> Self {
        Self {
            z_index: Some(z),
            ..self
        }
    }

    /// Reject zero or negative dimensions.
    pub fn validate(&self) -> Result<(), StoreError> {
        for (field, value) in [("width", self.width), ("height", self.height)] {
            if value <= 0 {
                return Err(StoreError::NonPositiveDimension { field, value });
            }
        }
        Ok(())
    }
}
