// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for store and service operations.

use widget_index::IndexError;

/// Errors surfaced by [`WidgetService`](crate::WidgetService) and
/// [`WidgetStore`](crate::WidgetStore).
///
/// A missing widget is not an error: lookups return `Option` instead.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Width or height was zero or negative.
    #[error("widget {field} must be positive, got {value}")]
    NonPositiveDimension {
        /// `"width"` or `"height"`.
        field: &'static str,
        /// The rejected value.
        value: i32,
    },

    /// Requested page size is outside `1..=max`.
    #[error("page size {size} is outside 1..={max}")]
    PageSize {
        /// The rejected size.
        size: usize,
        /// Configured upper bound.
        max: usize,
    },

    /// The index refused an operation.
    #[error(transparent)]
    Index(#[from] IndexError),

    /// Configuration text could not be parsed.
    #[error("invalid store configuration: {0}")]
    Config(#[from] toml::de::Error),
}
