//! Editing session over a region document.
//!
//! A [`Session`] owns the document being annotated, the text provider it
//! was captured from, and undo/redo history. Every successful edit stores a
//! snapshot of the previous document on the undo stack and clears redo; a
//! failed edit changes nothing. At most [`MAX_UNDO`] snapshots are kept.

use std::collections::VecDeque;
use std::path::Path;

use log::{info, warn};

use crate::error::{Error, Result};
use crate::layout::{self, HeadingClassifier};
use crate::model::{region_id, Rect, Region, RegionDocument, RegionTag, WordSpan};
use crate::provider::{self, TextProvider};
use crate::render::{self, entity, MarkupOptions, RenderOptions};

/// Smallest width or height, in points, of a user-drawn region.
pub const MIN_REGION_SIDE: f32 = 2.0;

/// Undo snapshots kept before the oldest is dropped.
pub const MAX_UNDO: usize = 100;

/// An annotation session with undo/redo.
#[derive(Debug)]
pub struct Session<P: TextProvider> {
    provider: P,
    document: RegionDocument,
    options: MarkupOptions,
    classifier: HeadingClassifier,
    undo_stack: VecDeque<RegionDocument>,
    redo_stack: Vec<RegionDocument>,
}

impl<P: TextProvider> Session<P> {
    /// Start an empty session for a source file.
    pub fn new(provider: P, file: impl Into<String>) -> Self {
        Self {
            provider,
            document: RegionDocument::for_file(file),
            options: MarkupOptions::default(),
            classifier: HeadingClassifier::default(),
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Set the markup options.
    pub fn with_options(mut self, options: MarkupOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the heading classifier.
    pub fn with_classifier(mut self, classifier: HeadingClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// The current document.
    pub fn document(&self) -> &RegionDocument {
        &self.document
    }

    /// The text provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Current markup options.
    pub fn options(&self) -> &MarkupOptions {
        &self.options
    }

    /// Mutable markup options, e.g. for toggles. Changes apply to later
    /// captures and renders only.
    pub fn options_mut(&mut self) -> &mut MarkupOptions {
        &mut self.options
    }

    /// Regions of a page.
    pub fn regions(&self, page_index: usize) -> &[Region] {
        self.document.regions(page_index)
    }

    /// Find a region by id, returning its index and the region.
    pub fn find_region(&self, page_index: usize, id: &str) -> Option<(usize, &Region)> {
        self.regions(page_index)
            .iter()
            .enumerate()
            .find(|(_, r)| r.id == id)
    }

    /// Whether there is anything to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether there is anything to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Capture a new paragraph region from a rectangle.
    ///
    /// The rectangle is normalized; one narrower or shorter than
    /// [`MIN_REGION_SIDE`] is rejected. Text is extracted with span styling
    /// and prepared with the session's options. Returns the new id.
    pub fn add_region(&mut self, page_index: usize, rect: Rect) -> Result<String> {
        self.check_page(page_index)?;
        if rect.width() < MIN_REGION_SIDE || rect.height() < MIN_REGION_SIDE {
            warn!("rejected {:.1} x {:.1} region", rect.width(), rect.height());
            return Err(Error::RectTooSmall(rect.width(), rect.height()));
        }

        let page_words = self.provider.words(page_index)?;
        let index = self.regions(page_index).len();
        let region = self.capture(page_index, index, rect, &page_words)?;
        let id = region.id.clone();

        let mut regions = self.regions(page_index).to_vec();
        regions.push(region);
        self.commit(page_index, regions);
        info!("page {}: added region {}", page_index + 1, id);
        Ok(id)
    }

    /// Detect regions from the provider's text blocks and append them.
    ///
    /// Returns the number of regions added. Nothing is recorded when no
    /// block is found.
    pub fn auto_detect(&mut self, page_index: usize) -> Result<usize> {
        self.check_page(page_index)?;
        let rects = layout::detect_regions(&self.provider.blocks(page_index)?);
        if rects.is_empty() {
            warn!("page {}: no text blocks to detect", page_index + 1);
            return Ok(0);
        }

        let page_words = self.provider.words(page_index)?;
        let mut regions = self.regions(page_index).to_vec();
        for rect in &rects {
            let region = self.capture(page_index, regions.len(), *rect, &page_words)?;
            regions.push(region);
        }
        self.commit(page_index, regions);
        info!("page {}: detected {} regions", page_index + 1, rects.len());
        Ok(rects.len())
    }

    /// Retag one region; its id gains the tag as prefix.
    pub fn retag(&mut self, page_index: usize, index: usize, tag: RegionTag) -> Result<()> {
        self.check_index(page_index, index)?;
        let mut regions = self.regions(page_index).to_vec();
        regions[index] = regions[index].retagged(tag);
        self.commit(page_index, regions);
        Ok(())
    }

    /// Remove one region and return it.
    pub fn delete(&mut self, page_index: usize, index: usize) -> Result<Region> {
        self.check_index(page_index, index)?;
        let mut regions = self.regions(page_index).to_vec();
        let removed = regions.remove(index);
        self.commit(page_index, regions);
        info!("page {}: deleted region {}", page_index + 1, removed.id);
        Ok(removed)
    }

    /// Split a region after the word nearest to `point`.
    pub fn split_at_point(
        &mut self,
        page_index: usize,
        index: usize,
        point: (f32, f32),
    ) -> Result<()> {
        let region = self.region_with_words(page_index, index)?;
        let halves = layout::split_at_point(&region, point)?;
        self.replace_with_halves(page_index, index, halves);
        Ok(())
    }

    /// Split a region along a vertical line (default: its midpoint).
    pub fn split_vertical(
        &mut self,
        page_index: usize,
        index: usize,
        x: Option<f32>,
    ) -> Result<()> {
        let region = self.region_with_words(page_index, index)?;
        let halves = layout::split_vertical(&region, x)?;
        self.replace_with_halves(page_index, index, halves);
        Ok(())
    }

    /// Split a region at a character offset into its plain text.
    ///
    /// The rectangle is cut horizontally at the same fraction of its height.
    pub fn split_at_text_offset(
        &mut self,
        page_index: usize,
        index: usize,
        offset: usize,
    ) -> Result<()> {
        let region = self.region_with_words(page_index, index)?;
        let halves = layout::split_at_text_offset(&region, offset)?;
        self.replace_with_halves(page_index, index, halves);
        Ok(())
    }

    /// Swap a region with its neighbour above (`up`) or below in reading
    /// order, returning its new index.
    ///
    /// Moving the first region up or the last one down is rejected.
    pub fn move_region(&mut self, page_index: usize, index: usize, up: bool) -> Result<usize> {
        self.check_index(page_index, index)?;
        let len = self.regions(page_index).len();
        let target = if up {
            index.checked_sub(1).ok_or(Error::RegionIndexOutOfRange(index, len))?
        } else {
            self.check_index(page_index, index + 1)?;
            index + 1
        };

        let mut regions = self.regions(page_index).to_vec();
        regions.swap(index, target);
        self.commit(page_index, regions);
        info!("page {}: moved region {} to {}", page_index + 1, index, target);
        Ok(target)
    }

    /// Merge adjacent regions into the first of them.
    pub fn merge(&mut self, page_index: usize, indices: &[usize]) -> Result<()> {
        let merged = layout::merge(self.regions(page_index), indices)?;
        let first = indices.iter().copied().min().unwrap_or(0);
        let last = indices.iter().copied().max().unwrap_or(first);

        let mut regions = self.regions(page_index).to_vec();
        regions.splice(first..=last, [merged]);
        self.commit(page_index, regions);
        info!("page {}: merged regions {}..={}", page_index + 1, first, last);
        Ok(())
    }

    /// Infer heading tags from average font size.
    ///
    /// Every region of the page is retagged, so ids gain a tag prefix.
    pub fn infer_headings(&mut self, page_index: usize) -> Result<()> {
        self.check_page(page_index)?;
        let regions = self.regions(page_index);
        if regions.is_empty() {
            warn!("page {}: no regions for heading inference", page_index + 1);
            return Err(Error::NoRegions(page_index));
        }

        let sizes = regions
            .iter()
            .map(|r| provider::average_font_size(&self.provider, page_index, &r.rect))
            .collect::<Result<Vec<f32>>>()?;
        let retagged = self.classifier.classify_regions(regions, &sizes)?;
        self.commit(page_index, retagged);
        info!("page {}: inferred headings", page_index + 1);
        Ok(())
    }

    /// Restore the state before the last change.
    pub fn undo(&mut self) -> Result<()> {
        let previous = self.undo_stack.pop_back().ok_or(Error::NothingToUndo)?;
        self.redo_stack
            .push(std::mem::replace(&mut self.document, previous));
        Ok(())
    }

    /// Re-apply the last undone change.
    pub fn redo(&mut self) -> Result<()> {
        let next = self.redo_stack.pop().ok_or(Error::NothingToRedo)?;
        let current = std::mem::replace(&mut self.document, next);
        self.push_undo(current);
        Ok(())
    }

    /// Replace the document with one read from a JSON export.
    pub fn import_json(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let doc = render::read_json_file(path, &self.options)?;
        self.replace_document(doc);
        Ok(())
    }

    /// Replace the document with one parsed from a JSON string.
    pub fn import_json_str(&mut self, json: &str) -> Result<()> {
        let doc = render::from_json(json, &self.options)?;
        self.replace_document(doc);
        Ok(())
    }

    /// Write the document as a JSON export.
    pub fn export_json(&self, path: impl AsRef<Path>) -> Result<()> {
        render::write_json_file(&self.document, path)
    }

    /// Render one page as a section fragment.
    pub fn render_page(&self, page_index: usize) -> Result<String> {
        render::render_page(page_index, self.regions(page_index), &self.options)
    }

    /// Render the whole document, falling back to page text where enabled.
    ///
    /// The session's markup options replace those in `options`.
    pub fn render_document(&self, options: &RenderOptions) -> Result<String> {
        let options = options.clone().with_markup(self.options.clone());
        render::render_document(&self.document, Some(&self.provider), &options)
    }

    fn replace_document(&mut self, doc: RegionDocument) {
        let previous = std::mem::replace(&mut self.document, doc);
        self.push_undo(previous);
        self.redo_stack.clear();
    }

    fn commit(&mut self, page_index: usize, regions: Vec<Region>) {
        self.push_undo(self.document.clone());
        self.redo_stack.clear();
        self.document.set_regions(page_index, regions);
    }

    fn push_undo(&mut self, snapshot: RegionDocument) {
        if self.undo_stack.len() == MAX_UNDO {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(snapshot);
    }

    fn capture(
        &self,
        page_index: usize,
        index: usize,
        rect: Rect,
        page_words: &[WordSpan],
    ) -> Result<Region> {
        let text =
            provider::extract_text(&self.provider, page_index, &rect, self.options.nesting)?;
        let text = entity::prepare_text(&text, &self.options);
        Ok(Region::new(region_id(page_index, index), rect, text)
            .with_words(provider::words_in_rect(page_words, &rect)))
    }

    /// Clone of a region with its words loaded from the provider when missing.
    fn region_with_words(&self, page_index: usize, index: usize) -> Result<Region> {
        self.check_index(page_index, index)?;
        let mut region = self.regions(page_index)[index].clone();
        if region.words.is_empty() && page_index < self.provider.page_count() {
            let page_words = self.provider.words(page_index)?;
            region.words = provider::words_in_rect(&page_words, &region.rect);
        }
        Ok(region)
    }

    fn replace_with_halves(&mut self, page_index: usize, index: usize, halves: (Region, Region)) {
        let (mut left, mut right) = halves;
        left.text = entity::prepare_text(&left.text, &self.options);
        right.text = entity::prepare_text(&right.text, &self.options);

        let mut regions = self.regions(page_index).to_vec();
        info!(
            "page {}: split {} into {} and {}",
            page_index + 1,
            regions[index].id,
            left.id,
            right.id
        );
        regions.splice(index..=index, [left, right]);
        self.commit(page_index, regions);
    }

    fn check_page(&self, page_index: usize) -> Result<()> {
        let count = self.provider.page_count();
        if page_index >= count {
            return Err(Error::PageOutOfRange(page_index, count));
        }
        Ok(())
    }

    fn check_index(&self, page_index: usize, index: usize) -> Result<()> {
        let len = self.regions(page_index).len();
        if index >= len {
            return Err(Error::RegionIndexOutOfRange(index, len));
        }
        Ok(())
    }
}
