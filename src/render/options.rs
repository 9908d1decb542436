//! Rendering options and configuration.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Order in which bold and italic tags nest when a span is both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NestingOrder {
    /// `<b><i>text</i></b>`
    #[default]
    BoldOutsideItalic,
    /// `<i><b>text</b></i>`
    ItalicOutsideBold,
}

impl NestingOrder {
    /// The other order.
    pub fn toggled(self) -> Self {
        match self {
            NestingOrder::BoldOutsideItalic => NestingOrder::ItalicOutsideBold,
            NestingOrder::ItalicOutsideBold => NestingOrder::BoldOutsideItalic,
        }
    }
}

/// Text-level options read by span styling, entity transcoding and escaping.
///
/// Passed by reference into every call; nothing reads process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupOptions {
    /// Replace non-ASCII symbols with HTML entities
    pub auto_entities: bool,

    /// Bold/italic nesting order for newly styled spans
    pub nesting: NestingOrder,

    /// Apply Unicode NFC normalization before transcoding
    pub normalize_unicode: bool,
}

impl MarkupOptions {
    /// Create new markup options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable automatic entity conversion.
    pub fn with_auto_entities(mut self, enabled: bool) -> Self {
        self.auto_entities = enabled;
        self
    }

    /// Set the bold/italic nesting order.
    pub fn with_nesting(mut self, nesting: NestingOrder) -> Self {
        self.nesting = nesting;
        self
    }

    /// Enable or disable NFC normalization.
    pub fn with_unicode_normalization(mut self, enabled: bool) -> Self {
        self.normalize_unicode = enabled;
        self
    }

    /// Flip automatic entity conversion, returning the new value.
    pub fn toggle_auto_entities(&mut self) -> bool {
        self.auto_entities = !self.auto_entities;
        self.auto_entities
    }

    /// Flip the nesting order, returning the new value.
    pub fn toggle_nesting(&mut self) -> NestingOrder {
        self.nesting = self.nesting.toggled();
        self.nesting
    }
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            auto_entities: true,
            nesting: NestingOrder::BoldOutsideItalic,
            normalize_unicode: false,
        }
    }
}

/// Options for rendering regions to HTML.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Text-level options
    pub markup: MarkupOptions,

    /// Page selection (1-indexed page numbers)
    pub page_selection: PageSelection,

    /// Wrap output in a minimal HTML document
    pub include_shell: bool,

    /// Render provider text for pages without regions
    pub fallback_to_page_text: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set markup options.
    pub fn with_markup(mut self, markup: MarkupOptions) -> Self {
        self.markup = markup;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, selection: PageSelection) -> Self {
        self.page_selection = selection;
        self
    }

    /// Set specific page range.
    pub fn with_page_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.page_selection = PageSelection::Range(range);
        self
    }

    /// Enable or disable the HTML document shell.
    pub fn with_shell(mut self, include: bool) -> Self {
        self.include_shell = include;
        self
    }

    /// Enable or disable the page-text fallback.
    pub fn with_page_text_fallback(mut self, enabled: bool) -> Self {
        self.fallback_to_page_text = enabled;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            markup: MarkupOptions::default(),
            page_selection: PageSelection::All,
            include_shell: true,
            fallback_to_page_text: true,
        }
    }
}

/// Page selection for rendering.
#[derive(Debug, Clone, Default)]
pub enum PageSelection {
    /// Render all pages
    #[default]
    All,
    /// Render a range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Render specific pages (1-indexed)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Check if a zero-based page index should be included.
    pub fn includes_index(&self, page_index: usize) -> bool {
        u32::try_from(page_index + 1).is_ok_and(|n| self.includes(n))
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        let invalid = || Error::InvalidPageRange(s.to_string());

        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let start: u32 = start.trim().parse().map_err(|_| invalid())?;
                let end: u32 = end.trim().parse().map_err(|_| invalid())?;
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let start: u32 = start.trim().parse().map_err(|_| invalid())?;
                let end: u32 = end.trim().parse().map_err(|_| invalid())?;
                for p in start..=end {
                    if !pages.contains(&p) {
                        pages.push(p);
                    }
                }
            } else {
                let p: u32 = part.parse().map_err(|_| invalid())?;
                if !pages.contains(&p) {
                    pages.push(p);
                }
            }
        }

        pages.sort();
        Ok(PageSelection::Pages(pages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_options_defaults() {
        let options = MarkupOptions::default();
        assert!(options.auto_entities);
        assert_eq!(options.nesting, NestingOrder::BoldOutsideItalic);
        assert!(!options.normalize_unicode);
    }

    #[test]
    fn test_markup_toggles() {
        let mut options = MarkupOptions::new().with_auto_entities(false);
        assert!(options.toggle_auto_entities());
        assert!(!options.toggle_auto_entities());
        assert_eq!(options.toggle_nesting(), NestingOrder::ItalicOutsideBold);
        assert_eq!(options.toggle_nesting(), NestingOrder::BoldOutsideItalic);
    }

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_shell(false)
            .with_page_range(2..=3)
            .with_markup(MarkupOptions::new().with_nesting(NestingOrder::ItalicOutsideBold));

        assert!(!options.include_shell);
        assert!(options.page_selection.includes_index(1));
        assert!(!options.page_selection.includes_index(0));
        assert_eq!(options.markup.nesting, NestingOrder::ItalicOutsideBold);
    }

    #[test]
    fn test_page_selection_parse() {
        let all = PageSelection::parse("all").unwrap();
        assert!(matches!(all, PageSelection::All));

        let range = PageSelection::parse("1-10").unwrap();
        assert!(matches!(range, PageSelection::Range(_)));

        let mixed = PageSelection::parse("1,3,5-7,10").unwrap();
        if let PageSelection::Pages(pages) = mixed {
            assert_eq!(pages, vec![1, 3, 5, 6, 7, 10]);
        } else {
            panic!("Expected Pages variant");
        }

        assert!(matches!(
            PageSelection::parse("1,x"),
            Err(Error::InvalidPageRange(_))
        ));
    }
}
