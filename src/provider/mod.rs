//! Text provider abstraction.
//!
//! The library never opens PDF files itself. A [`TextProvider`] reports
//! styled spans, layout blocks and words per page; everything downstream
//! (region text, heading inference, auto-detection, fallback rendering)
//! works from those.

mod memory;

pub use memory::{MemoryPage, MemoryProvider, PositionedSpan};

use crate::error::Result;
use crate::model::{Rect, StyledSpan, TextBlock, WordSpan};
use crate::render::{style, NestingOrder};

/// Tolerance in points when testing whether a word lies inside a rectangle.
pub const WORD_TOLERANCE: f32 = 0.1;

/// Source of positioned text for a paged document.
pub trait TextProvider: Send + Sync {
    /// Number of pages.
    fn page_count(&self) -> usize;

    /// Styled spans inside `rect` on a page, in reading order.
    ///
    /// Each span carries a line index that increases as lines are left.
    fn spans_in_rect(&self, page_index: usize, rect: &Rect) -> Result<Vec<StyledSpan>>;

    /// Layout blocks of a page in provider order.
    fn blocks(&self, page_index: usize) -> Result<Vec<TextBlock>>;

    /// Words of a page in provider order.
    fn words(&self, page_index: usize) -> Result<Vec<WordSpan>>;
}

/// Styled text inside a rectangle.
///
/// Span text has inner newlines replaced by spaces and is trimmed; empty
/// spans are dropped. Spans are wrapped in `<b>`/`<i>` per their flags,
/// joined with a space within a line and with `\n` between lines.
pub fn extract_text<P>(
    provider: &P,
    page_index: usize,
    rect: &Rect,
    nesting: NestingOrder,
) -> Result<String>
where
    P: TextProvider + ?Sized,
{
    let spans = provider.spans_in_rect(page_index, rect)?;

    let mut lines: Vec<String> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_line = None;

    for span in &spans {
        let text = span.text.replace('\n', " ");
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        if current_line.is_some_and(|l| l != span.line) && !current.is_empty() {
            lines.push(current.join(" "));
            current.clear();
        }
        current_line = Some(span.line);
        current.push(style::style_span(text, span.bold, span.italic, nesting));
    }
    if !current.is_empty() {
        lines.push(current.join(" "));
    }

    Ok(lines.join("\n").trim().to_string())
}

/// Mean of the non-zero span sizes inside a rectangle, or 0 without spans.
pub fn average_font_size<P>(provider: &P, page_index: usize, rect: &Rect) -> Result<f32>
where
    P: TextProvider + ?Sized,
{
    let sizes: Vec<f32> = provider
        .spans_in_rect(page_index, rect)?
        .iter()
        .map(|s| s.size)
        .filter(|&s| s != 0.0)
        .collect();

    if sizes.is_empty() {
        return Ok(0.0);
    }
    Ok(sizes.iter().sum::<f32>() / sizes.len() as f32)
}

/// Words lying inside `rect` (with [`WORD_TOLERANCE`]), top to bottom then
/// left to right.
pub fn words_in_rect(words: &[WordSpan], rect: &Rect) -> Vec<WordSpan> {
    let mut inside: Vec<WordSpan> = words
        .iter()
        .filter(|w| rect.contains_rect(&w.rect, WORD_TOLERANCE))
        .cloned()
        .collect();
    inside.sort_by(|a, b| {
        a.rect
            .y0
            .total_cmp(&b.rect.y0)
            .then(a.rect.x0.total_cmp(&b.rect.x0))
    });
    inside
}
