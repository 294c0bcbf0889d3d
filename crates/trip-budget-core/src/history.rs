//! Paged view over the trip history.
//!
//! The pager holds a snapshot of every record, newest first, and hands it out
//! one fixed-size page at a time. Reloading replaces the snapshot and starts
//! again from the first page.

use serde::{Deserialize, Serialize};

use crate::trip::TripRecord;

/// Records per page.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Distance from the bottom of the content at which the next page is loaded.
pub const DEFAULT_SCROLL_THRESHOLD: f64 = 200.0;

/// A slice of the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Zero-based page number.
    pub number: usize,
    /// Records on this page, newest first. Empty once history is exhausted.
    pub items: Vec<TripRecord>,
    /// Number of records in the loaded history.
    pub total: usize,
    /// Whether another call would return more records.
    pub has_more: bool,
}

/// Where the viewer currently is in the rendered list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollPosition {
    /// Height of the visible area.
    pub viewport_height: f64,
    /// How far the content is scrolled.
    pub scroll_y: f64,
    /// Full height of the rendered content.
    pub content_height: f64,
}

impl ScrollPosition {
    /// Whether the bottom of the viewport is within `threshold` of the end.
    #[must_use]
    pub fn near_bottom(&self, threshold: f64) -> bool {
        self.viewport_height + self.scroll_y >= self.content_height - threshold
    }
}

/// Cursor over a loaded history snapshot.
#[derive(Debug, Clone)]
pub struct HistoryPager {
    records: Vec<TripRecord>,
    pages_served: usize,
    page_size: usize,
}

impl HistoryPager {
    /// Create an empty pager. A page size of zero is treated as one.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            pages_served: 0,
            page_size: page_size.max(1),
        }
    }

    /// Replace the snapshot and rewind to the first page.
    pub fn reload(&mut self, records: Vec<TripRecord>) {
        self.records = records;
        self.pages_served = 0;
    }

    /// Records per page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of records in the snapshot.
    #[must_use]
    pub fn total(&self) -> usize {
        self.records.len()
    }

    /// Whether unserved records remain.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.offset() < self.records.len()
    }

    fn offset(&self) -> usize {
        self.pages_served.saturating_mul(self.page_size)
    }

    /// Serve the next page and advance the cursor.
    ///
    /// Once everything has been served this keeps returning an empty page with
    /// the same page number.
    pub fn next_page(&mut self) -> Page {
        let start = self.offset().min(self.records.len());
        let end = start.saturating_add(self.page_size).min(self.records.len());
        let items = self.records[start..end].to_vec();
        let number = self.pages_served;

        if !items.is_empty() {
            self.pages_served += 1;
        }

        Page {
            number,
            items,
            total: self.records.len(),
            has_more: self.has_more(),
        }
    }

    /// Serve the next page if the viewer scrolled close enough to the end and
    /// there is anything left to show.
    pub fn on_scroll(&mut self, position: ScrollPosition, threshold: f64) -> Option<Page> {
        (position.near_bottom(threshold) && self.has_more()).then(|| self.next_page())
    }
}

impl Default for HistoryPager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
