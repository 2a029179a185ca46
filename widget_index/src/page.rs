// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Offset pagination.

use alloc::vec::Vec;

/// A zero-based page number and a page size.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PageRequest {
    /// Zero-based page number.
    pub page: usize,
    /// Maximum number of items per page.
    pub size: usize,
}

impl PageRequest {
    /// Create a page request.
    pub const fn new(page: usize, size: usize) -> Self {
        Self { page, size }
    }

    /// Number of items skipped before this page starts.
    pub const fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

/// One page of results plus the size of the full result set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Number of items across all pages.
    pub total: usize,
    /// The request that produced this page.
    pub request: PageRequest,
}

impl<T> Page<T> {
    /// Collect a page out of an ordered sequence of `total` items.
    pub fn from_iter_with_total(
        iter: impl IntoIterator<Item = T>,
        total: usize,
        request: PageRequest,
    ) -> Self {
        let items = iter
            .into_iter()
            .skip(request.offset())
            .take(request.size)
            .collect();
        Self {
            items,
            total,
            request,
        }
    }

    /// Number of pages needed to hold `total` items.
    pub fn total_pages(&self) -> usize {
        if self.request.size == 0 {
            0
        } else {
            self.total.div_ceil(self.request.size)
        }
    }

    /// Whether a page follows this one.
    pub fn has_next(&self) -> bool {
        self.request.page.saturating_add(1) < self.total_pages()
    }

    /// Convert every item, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            request: self.request,
        }
    }
}
