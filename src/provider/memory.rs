//! In-memory provider backed by a JSON page dump.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Rect, StyledSpan, TextBlock, WordSpan};

use super::TextProvider;

/// A styled span with its position on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedSpan {
    /// Span bounding box
    pub rect: Rect,
    /// Span text and style
    #[serde(flatten)]
    pub span: StyledSpan,
}

impl PositionedSpan {
    /// Create a positioned span.
    pub fn new(rect: Rect, span: StyledSpan) -> Self {
        Self { rect, span }
    }
}

/// Text content of one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryPage {
    /// Styled spans in reading order
    #[serde(default)]
    pub spans: Vec<PositionedSpan>,
    /// Layout blocks
    #[serde(default)]
    pub blocks: Vec<TextBlock>,
    /// Words
    #[serde(default)]
    pub words: Vec<WordSpan>,
}

#[derive(Debug, Deserialize)]
struct PageDump {
    pages: Vec<MemoryPage>,
}

/// A [`TextProvider`] holding every page in memory.
///
/// Loaded from a dump shaped like
/// `{"pages": [{"spans": [...], "blocks": [...], "words": [...]}]}`
/// where every entry carries a `rect` array. A span counts as inside a
/// rectangle when its centre is.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    pages: Vec<MemoryPage>,
}

impl MemoryProvider {
    /// Create a provider from pages.
    pub fn new(pages: Vec<MemoryPage>) -> Self {
        Self { pages }
    }

    /// Parse a page dump.
    pub fn from_json(json: &str) -> Result<Self> {
        let dump: PageDump = serde_json::from_str(json)?;
        Ok(Self::new(dump.pages))
    }

    /// Read a page dump from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Page content, or [`Error::PageOutOfRange`].
    pub fn page(&self, page_index: usize) -> Result<&MemoryPage> {
        self.pages
            .get(page_index)
            .ok_or(Error::PageOutOfRange(page_index, self.pages.len()))
    }
}

impl TextProvider for MemoryProvider {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn spans_in_rect(&self, page_index: usize, rect: &Rect) -> Result<Vec<StyledSpan>> {
        Ok(self
            .page(page_index)?
            .spans
            .iter()
            .filter(|s| {
                let (cx, cy) = s.rect.center();
                rect.contains_point(cx, cy)
            })
            .map(|s| s.span.clone())
            .collect())
    }

    fn blocks(&self, page_index: usize) -> Result<Vec<TextBlock>> {
        Ok(self.page(page_index)?.blocks.clone())
    }

    fn words(&self, page_index: usize) -> Result<Vec<WordSpan>> {
        Ok(self.page(page_index)?.words.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = r#"{
        "pages": [
            {
                "spans": [
                    {"rect": [10, 10, 90, 30], "text": "Heading", "size": 18, "bold": true},
                    {"rect": [10, 40, 90, 50], "text": "Body", "size": 10, "line": 1}
                ],
                "blocks": [{"rect": [10, 10, 90, 50], "text": "Heading Body"}],
                "words": [{"rect": [10, 40, 40, 50], "text": "Body"}]
            },
            {}
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let provider = MemoryProvider::from_json(DUMP).unwrap();
        assert_eq!(provider.page_count(), 2);
        assert_eq!(provider.blocks(0).unwrap().len(), 1);
        assert_eq!(provider.words(0).unwrap()[0].text, "Body");
        assert!(provider.words(1).unwrap().is_empty());
    }

    #[test]
    fn test_spans_by_centre() {
        let provider = MemoryProvider::from_json(DUMP).unwrap();
        let spans = provider
            .spans_in_rect(0, &Rect::new(0.0, 0.0, 100.0, 25.0))
            .unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "Heading");
        assert!(spans[0].bold);
        assert_eq!(spans[0].size, 18.0);
    }

    #[test]
    fn test_page_out_of_range() {
        let provider = MemoryProvider::from_json(DUMP).unwrap();
        assert!(matches!(
            provider.blocks(5),
            Err(Error::PageOutOfRange(5, 2))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, DUMP.as_bytes()).unwrap();
        let provider = MemoryProvider::from_file(file.path()).unwrap();
        assert_eq!(provider.page_count(), 2);
    }
}
