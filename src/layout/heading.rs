//! Heading inference from average font size.

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{Region, RegionTag};

/// Size-ratio thresholds for heading levels.
///
/// A region whose average font size divided by the page maximum is strictly
/// greater than `h1` becomes `h1`, else greater than `h2` becomes `h2`, else
/// greater than `h3` becomes `h3`; anything else is a paragraph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingThresholds {
    /// Minimum ratio (exclusive) for level 1
    pub h1: f32,
    /// Minimum ratio (exclusive) for level 2
    pub h2: f32,
    /// Minimum ratio (exclusive) for level 3
    pub h3: f32,
}

impl HeadingThresholds {
    /// Create thresholds, sorted so that `h1 >= h2 >= h3` and clamped to `0..=1`.
    pub fn new(h1: f32, h2: f32, h3: f32) -> Self {
        let mut levels = [h1, h2, h3].map(|t| t.clamp(0.0, 1.0));
        levels.sort_by(|a, b| b.total_cmp(a));
        Self {
            h1: levels[0],
            h2: levels[1],
            h3: levels[2],
        }
    }

    /// Tag for a size ratio.
    pub fn tag_for_ratio(&self, ratio: f32) -> RegionTag {
        if ratio > self.h1 {
            RegionTag::H1
        } else if ratio > self.h2 {
            RegionTag::H2
        } else if ratio > self.h3 {
            RegionTag::H3
        } else {
            RegionTag::P
        }
    }
}

impl Default for HeadingThresholds {
    fn default() -> Self {
        Self {
            h1: 0.9,
            h2: 0.75,
            h3: 0.6,
        }
    }
}

/// Buckets regions into heading levels by font size relative to the page maximum.
#[derive(Debug, Clone, Default)]
pub struct HeadingClassifier {
    thresholds: HeadingThresholds,
}

impl HeadingClassifier {
    /// Create a classifier with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with custom thresholds.
    pub fn with_thresholds(thresholds: HeadingThresholds) -> Self {
        Self { thresholds }
    }

    /// Thresholds in use.
    pub fn thresholds(&self) -> &HeadingThresholds {
        &self.thresholds
    }

    /// Classify per-region average font sizes.
    ///
    /// Returns [`Error::NoFontData`] when the list is empty or no size is
    /// positive.
    pub fn classify(&self, sizes: &[f32]) -> Result<Vec<RegionTag>> {
        let max = sizes.iter().copied().fold(0.0_f32, f32::max);
        if max <= 0.0 {
            warn!("heading inference skipped: no positive font size");
            return Err(Error::NoFontData);
        }

        let tags: Vec<RegionTag> = sizes
            .iter()
            .map(|&size| self.thresholds.tag_for_ratio(size / max))
            .collect();
        debug!("classified {} regions against max size {:.2}", tags.len(), max);
        Ok(tags)
    }

    /// Return retagged copies of `regions`, one size per region.
    ///
    /// Each copy carries a tag-prefixed id. The input is not modified.
    pub fn classify_regions(&self, regions: &[Region], sizes: &[f32]) -> Result<Vec<Region>> {
        if regions.len() != sizes.len() {
            return Err(Error::SizeCountMismatch {
                regions: regions.len(),
                sizes: sizes.len(),
            });
        }
        if regions.is_empty() {
            return Err(Error::NoFontData);
        }

        let tags = self.classify(sizes)?;
        Ok(regions
            .iter()
            .zip(tags)
            .map(|(region, tag)| region.retagged(tag))
            .collect())
    }
}
