//! # paratag
//!
//! Tag rectangular regions of PDF pages and render them as nested,
//! ASCII-safe HTML.
//!
//! Regions carry a structural tag (`h1`..`h4`, `p`, `fig`, `table`, `fn`,
//! `li`, `lm`) and span-styled text. Headings open `<section>` elements
//! with dotted ids (`"2.1.3"`), everything else lands in the innermost
//! open section.
//!
//! ## Quick Start
//!
//! ```no_run
//! use paratag::Paratag;
//!
//! fn main() -> paratag::Result<()> {
//!     let html = Paratag::new()
//!         .load_file("regions.json")?
//!         .to_html_page(0)?;
//!     println!("{}", html);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Entity transcoding**: non-ASCII symbols become named entities
//! - **Safe escaping**: only well-formed `<b>`/`<i>` pairs and valid
//!   entities survive
//! - **Section nesting**: heading-driven `<section>` trees per page
//! - **Heading inference**: tags from average font size
//! - **Region editing**: auto-detection, split, merge, undo/redo
//! - **Parallel rendering**: pages render with Rayon

pub mod error;
pub mod layout;
pub mod model;
pub mod provider;
pub mod render;
pub mod session;

// Re-export commonly used types
pub use error::{Error, ErrorKind, Result};
pub use layout::{
    build_sections, detect_regions, merge, split_at_point, split_at_text_offset, split_vertical,
    HeadingClassifier, HeadingThresholds, SectionTreeBuilder,
};
pub use model::{
    region_id, LeafElement, Rect, Region, RegionDocument, RegionTag, SectionChild, SectionNode,
    StyledSpan, TextBlock, WordSpan,
};
pub use provider::{MemoryProvider, TextProvider};
pub use render::{JsonFormat, MarkupOptions, NestingOrder, PageSelection, RenderOptions};
pub use session::Session;

use std::path::Path;

/// Transcode non-ASCII characters to HTML entities.
///
/// # Example
///
/// ```
/// assert_eq!(paratag::transcode("café → x"), "caf&eacute; &rarr; x");
/// ```
pub fn transcode(text: &str) -> String {
    render::entity::transcode(text)
}

/// Escape text for HTML, keeping `<b>`/`<i>` pairs and valid entities.
///
/// # Example
///
/// ```
/// assert_eq!(
///     paratag::escape("<b>A & B</b> <br>"),
///     "<b>A &amp; B</b> &lt;br&gt;"
/// );
/// ```
pub fn escape(text: &str) -> String {
    render::escape::escape(text)
}

/// Builder for loading region exports and rendering them.
///
/// # Example
///
/// ```no_run
/// use paratag::{NestingOrder, PageSelection, Paratag};
///
/// let html = Paratag::new()
///     .with_auto_entities(true)
///     .with_nesting(NestingOrder::ItalicOutsideBold)
///     .with_pages(PageSelection::parse("1-3")?)
///     .load_file("regions.json")?
///     .to_html_document()?;
/// # Ok::<(), paratag::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Paratag {
    render_options: RenderOptions,
}

impl Paratag {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable automatic entity transcoding.
    pub fn with_auto_entities(mut self, enabled: bool) -> Self {
        self.render_options.markup = self.render_options.markup.with_auto_entities(enabled);
        self
    }

    /// Set bold/italic nesting order.
    pub fn with_nesting(mut self, nesting: NestingOrder) -> Self {
        self.render_options.markup = self.render_options.markup.with_nesting(nesting);
        self
    }

    /// Enable NFC normalization before transcoding.
    pub fn with_unicode_normalization(mut self, enabled: bool) -> Self {
        self.render_options.markup = self
            .render_options
            .markup
            .with_unicode_normalization(enabled);
        self
    }

    /// Set page selection for document rendering.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.render_options = self.render_options.with_pages(pages);
        self
    }

    /// Include or omit the HTML document shell.
    pub fn with_shell(mut self, include: bool) -> Self {
        self.render_options = self.render_options.with_shell(include);
        self
    }

    /// Load a region export from a file.
    pub fn load_file<P: AsRef<Path>>(self, path: P) -> Result<ParatagResult> {
        let document = render::read_json_file(path, &self.render_options.markup)?;
        Ok(ParatagResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Load a region export from a JSON string.
    pub fn load_str(self, json: &str) -> Result<ParatagResult> {
        let document = render::from_json(json, &self.render_options.markup)?;
        Ok(ParatagResult {
            document,
            render_options: self.render_options,
        })
    }
}

/// A loaded region document ready for rendering.
#[derive(Debug, Clone)]
pub struct ParatagResult {
    /// The loaded document
    pub document: RegionDocument,
    render_options: RenderOptions,
}

impl ParatagResult {
    /// Render one page (zero-based) as a section fragment.
    pub fn to_html_page(&self, page_index: usize) -> Result<String> {
        render::render_page(
            page_index,
            self.document.regions(page_index),
            &self.render_options.markup,
        )
    }

    /// Render all selected pages, separated by `<hr/>`.
    ///
    /// Without a provider, pages lacking regions are left out.
    pub fn to_html_document(&self) -> Result<String> {
        render::render_document::<MemoryProvider>(&self.document, None, &self.render_options)
    }

    /// Render all selected pages, using `provider` text for pages without regions.
    pub fn to_html_document_with<P: TextProvider + ?Sized>(&self, provider: &P) -> Result<String> {
        render::render_document(&self.document, Some(provider), &self.render_options)
    }

    /// Serialize the document back to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get the document.
    pub fn document(&self) -> &RegionDocument {
        &self.document
    }
}
