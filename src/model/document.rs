//! Document-level types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Region;
use crate::error::{Error, Result};

/// All annotated regions of a PDF, grouped by zero-based page index.
///
/// This is also the export record: serialized as
/// `{"file": "...", "pages": {"0": [{id, rect, text, tag}, ...]}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionDocument {
    /// Source PDF file name
    #[serde(default)]
    pub file: String,

    /// Regions per page, in reading order
    #[serde(default)]
    pub pages: BTreeMap<usize, Vec<Region>>,
}

impl RegionDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document for a named source file.
    pub fn for_file(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            pages: BTreeMap::new(),
        }
    }

    /// Regions of a page (empty slice when the page has none).
    pub fn regions(&self, page_index: usize) -> &[Region] {
        self.pages
            .get(&page_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Mutable regions of a page, creating the page entry when missing.
    pub fn regions_mut(&mut self, page_index: usize) -> &mut Vec<Region> {
        self.pages.entry(page_index).or_default()
    }

    /// Replace the regions of a page.
    pub fn set_regions(&mut self, page_index: usize, regions: Vec<Region>) {
        self.pages.insert(page_index, regions);
    }

    /// Check if no page has regions.
    pub fn is_empty(&self) -> bool {
        self.pages.values().all(Vec::is_empty)
    }

    /// Total number of regions.
    pub fn region_count(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }

    /// Find a region by id on a page, returning its index.
    pub fn position(&self, page_index: usize, id: &str) -> Result<usize> {
        self.regions(page_index)
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| Error::RegionNotFound(id.to_string()))
    }

    /// Count regions per tag on a page.
    pub fn tag_counts(&self, page_index: usize) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for tag in self.regions(page_index).iter().map(|r| r.tag) {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
        counts
    }
}
