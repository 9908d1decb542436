//! Region-level types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Rect;
use crate::error::Error;

/// Structural tag attached to a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionTag {
    /// Heading level 1
    H1,
    /// Heading level 2
    H2,
    /// Heading level 3
    H3,
    /// Heading level 4
    H4,
    /// Body paragraph
    #[default]
    P,
    /// Figure
    Fig,
    /// Table
    Table,
    /// Footnote
    Fn,
    /// List item
    Li,
    /// Margin note
    Lm,
}

impl RegionTag {
    /// All tags, in display order.
    pub const ALL: [RegionTag; 10] = [
        RegionTag::H1,
        RegionTag::H2,
        RegionTag::H3,
        RegionTag::H4,
        RegionTag::P,
        RegionTag::Fig,
        RegionTag::Table,
        RegionTag::Fn,
        RegionTag::Li,
        RegionTag::Lm,
    ];

    /// Element name used in markup and in the export record.
    pub fn as_str(&self) -> &'static str {
        match self {
            RegionTag::H1 => "h1",
            RegionTag::H2 => "h2",
            RegionTag::H3 => "h3",
            RegionTag::H4 => "h4",
            RegionTag::P => "p",
            RegionTag::Fig => "fig",
            RegionTag::Table => "table",
            RegionTag::Fn => "fn",
            RegionTag::Li => "li",
            RegionTag::Lm => "lm",
        }
    }

    /// Heading level (1-4), or `None` for non-heading tags.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            RegionTag::H1 => Some(1),
            RegionTag::H2 => Some(2),
            RegionTag::H3 => Some(3),
            RegionTag::H4 => Some(4),
            _ => None,
        }
    }

    /// Heading tag for a level, `None` outside 1-4.
    pub fn heading(level: u8) -> Option<Self> {
        match level {
            1 => Some(RegionTag::H1),
            2 => Some(RegionTag::H2),
            3 => Some(RegionTag::H3),
            4 => Some(RegionTag::H4),
            _ => None,
        }
    }

    /// Check if this tag is a heading.
    pub fn is_heading(&self) -> bool {
        self.heading_level().is_some()
    }
}

impl fmt::Display for RegionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegionTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        RegionTag::ALL
            .into_iter()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| Error::UnknownTag(s.to_string()))
    }
}

/// A word reported by the text provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordSpan {
    /// Word bounding box
    pub rect: Rect,
    /// Word text
    pub text: String,
}

impl WordSpan {
    /// Create a new word span.
    pub fn new(rect: Rect, text: impl Into<String>) -> Self {
        Self {
            rect,
            text: text.into(),
        }
    }
}

/// A tagged rectangle on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Identifier, unique within a page
    pub id: String,

    /// Bounding box in page coordinates
    pub rect: Rect,

    /// Span-styled text (may contain `<b>`/`<i>` and entities)
    #[serde(default)]
    pub text: String,

    /// Structural tag
    #[serde(default)]
    pub tag: RegionTag,

    /// Words inside the region, used by split and merge
    #[serde(default, skip_serializing)]
    pub words: Vec<WordSpan>,
}

impl Region {
    /// Create a paragraph region.
    pub fn new(id: impl Into<String>, rect: Rect, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rect,
            text: text.into(),
            tag: RegionTag::P,
            words: Vec::new(),
        }
    }

    /// Set the tag, keeping the id.
    pub fn with_tag(mut self, tag: RegionTag) -> Self {
        self.tag = tag;
        self
    }

    /// Attach word spans.
    pub fn with_words(mut self, words: Vec<WordSpan>) -> Self {
        self.words = words;
        self
    }

    /// Build a region whose rectangle and text are derived from its words.
    ///
    /// Returns `None` for an empty word list.
    pub fn from_words(id: impl Into<String>, tag: RegionTag, words: Vec<WordSpan>) -> Option<Self> {
        let rect = Rect::bounding(words.iter().map(|w| &w.rect))?;
        let text = words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Some(Self {
            id: id.into(),
            rect,
            text,
            tag,
            words,
        })
    }

    /// Return a copy carrying `tag` and a tag-prefixed id (`<tag>_<id>`).
    pub fn retagged(&self, tag: RegionTag) -> Self {
        Self {
            id: format!("{}_{}", tag, self.id),
            tag,
            ..self.clone()
        }
    }
}

/// Fresh region id for the `index`-th region (zero-based) on a zero-based page.
pub fn region_id(page_index: usize, index: usize) -> String {
    format!("p{}_r{}", page_index + 1, index + 1)
}
