// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by the index structures.

use crate::types::WidgetId;

/// Failures reported by index lookups and mutations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// The index holds no widgets.
    #[error("index is empty")]
    Empty,
    /// No widget is stored under this stacking key.
    #[error("no widget at z-index {0}")]
    KeyNotFound(i32),
    /// No widget with this id is stored.
    #[error("no widget with id {0}")]
    IdNotFound(WidgetId),
    /// Moving a widget up from this key would exceed `i32::MAX`.
    #[error("z-index {0} cannot be incremented without overflow")]
    ZIndexOverflow(i32),
    /// The lookup structures disagree with each other.
    #[error("index inconsistency: {0}")]
    Inconsistent(&'static str),
}
