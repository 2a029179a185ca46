// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Store configuration.

use serde::Deserialize;

use crate::error::StoreError;

/// Tunables for [`WidgetStore`](crate::WidgetStore) and
/// [`WidgetService`](crate::WidgetService).
///
/// Every field has a default, so an empty TOML document is valid:
///
/// ```
/// use widget_store::StoreConfig;
///
/// let config = StoreConfig::from_toml_str("max_page_size = 100").unwrap();
/// assert_eq!(config.max_page_size, 100);
/// assert_eq!(config.default_page_size, 10);
/// assert!(config.optimistic_reads);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Try reads without blocking first. When false every read takes the
    /// shared lock directly.
    pub optimistic_reads: bool,
    /// Page size used when a caller does not pick one.
    pub default_page_size: usize,
    /// Largest page size a caller may request.
    pub max_page_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            optimistic_reads: true,
            default_page_size: 10,
            max_page_size: 500,
        }
    }
}

impl StoreConfig {
    /// Parse a TOML document, filling missing keys with defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, StoreError> {
        Ok(toml::from_str(text)?)
    }
}
