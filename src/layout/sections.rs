//! Heading-driven section tree construction.

use log::debug;

use crate::error::{Error, Result};
use crate::model::{LeafElement, Region, SectionChild, SectionNode};
use crate::render::{entity, escape, MarkupOptions};

/// Deepest heading level that opens a section.
pub const MAX_SECTION_LEVEL: u8 = 4;

/// Builds the nested section tree of one page from regions in reading order.
///
/// Regions are never reordered. The page root (id = page number, level 0)
/// opens on the first region. A heading at level `L` bumps the level-`L`
/// counter, zeroes deeper counters, closes every open section at level `L`
/// or deeper and opens a new section inside whatever remains open. Heading
/// levels may be skipped; no implicit intermediate sections are created.
#[derive(Debug, Clone)]
pub struct SectionTreeBuilder {
    page_number: usize,
    counters: [usize; MAX_SECTION_LEVEL as usize + 1],
    stack: Vec<SectionNode>,
}

impl SectionTreeBuilder {
    /// Create a builder for a zero-based page index.
    pub fn new(page_index: usize) -> Self {
        Self {
            page_number: page_index + 1,
            counters: [0; MAX_SECTION_LEVEL as usize + 1],
            stack: Vec::new(),
        }
    }

    /// Build the tree for `regions`.
    ///
    /// Each leaf's text is prepared with `options` (normalization, entities)
    /// and escaped. Returns [`Error::NoRegions`] for an empty list.
    pub fn build(mut self, regions: &[Region], options: &MarkupOptions) -> Result<SectionNode> {
        if regions.is_empty() {
            return Err(Error::NoRegions(self.page_number - 1));
        }

        for region in regions {
            self.push_region(region, options);
        }

        let root = self.finish();
        debug!(
            "page {}: built {} sections from {} regions",
            root.id,
            root.section_count(),
            regions.len()
        );
        Ok(root)
    }

    fn push_region(&mut self, region: &Region, options: &MarkupOptions) {
        if self.stack.is_empty() {
            self.stack
                .push(SectionNode::new(self.page_number.to_string(), 0));
        }

        if let Some(level) = region.tag.heading_level() {
            self.open_heading_section(level);
        }

        let leaf = LeafElement {
            tag: region.tag,
            id: region.id.clone(),
            escaped_text: escape::escape(&entity::prepare_text(&region.text, options)),
        };
        if let Some(innermost) = self.stack.last_mut() {
            innermost.children.push(SectionChild::Element(leaf));
        }
    }

    fn open_heading_section(&mut self, level: u8) {
        let lvl = level as usize;
        self.counters[lvl] += 1;
        for deeper in &mut self.counters[lvl + 1..] {
            *deeper = 0;
        }

        self.close_to_level(level);

        let mut id = self.page_number.to_string();
        for counter in &self.counters[1..=lvl] {
            id.push('.');
            id.push_str(&counter.to_string());
        }
        self.stack.push(SectionNode::new(id, level));
    }

    /// Close open sections at `level` or deeper. The root (level 0) stays open.
    fn close_to_level(&mut self, level: u8) {
        while self.stack.len() > 1 && self.stack.last().is_some_and(|s| s.level >= level) {
            self.close_innermost();
        }
    }

    fn close_innermost(&mut self) {
        if let Some(done) = self.stack.pop() {
            if let Some(parent) = self.stack.last_mut() {
                parent.children.push(SectionChild::Section(done));
            } else {
                self.stack.push(done);
            }
        }
    }

    fn finish(mut self) -> SectionNode {
        while self.stack.len() > 1 {
            self.close_innermost();
        }
        self.stack
            .pop()
            .unwrap_or_else(|| SectionNode::new(self.page_number.to_string(), 0))
    }
}

/// Build the section tree of one page.
pub fn build_sections(
    page_index: usize,
    regions: &[Region],
    options: &MarkupOptions,
) -> Result<SectionNode> {
    SectionTreeBuilder::new(page_index).build(regions, options)
}
