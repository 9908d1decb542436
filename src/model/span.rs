//! Provider-level text types.

use serde::{Deserialize, Serialize};

use super::Rect;

/// A run of text sharing one font and style, as reported inside a rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledSpan {
    /// The text content
    pub text: String,

    /// Font size in points
    #[serde(default)]
    pub size: f32,

    /// Bold flag
    #[serde(default)]
    pub bold: bool,

    /// Italic flag
    #[serde(default)]
    pub italic: bool,

    /// Line index within the queried rectangle
    #[serde(default)]
    pub line: usize,
}

impl StyledSpan {
    /// Create a plain span on line 0.
    pub fn new(text: impl Into<String>, size: f32) -> Self {
        Self {
            text: text.into(),
            size,
            bold: false,
            italic: false,
            line: 0,
        }
    }

    /// Set the bold flag.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set the italic flag.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Set the line index.
    pub fn on_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }
}

/// A block of text as laid out by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Block bounding box
    pub rect: Rect,
    /// Block text
    pub text: String,
}

impl TextBlock {
    /// Create a new block.
    pub fn new(rect: Rect, text: impl Into<String>) -> Self {
        Self {
            rect,
            text: text.into(),
        }
    }
}
