//! Split and merge operations over regions and their words.
//!
//! Every operation is pure: inputs are untouched and new regions are
//! returned, so a caller can undo by keeping the previous list. A failed
//! operation returns an error and produces nothing.

use crate::error::{Error, Result};
use crate::model::{Rect, Region, WordSpan};
use crate::render::escape::{self, Segment};

/// Index of the word whose centre is nearest to `(x, y)`.
///
/// Ties go to the first word in provider order.
pub fn nearest_word_index(words: &[WordSpan], x: f32, y: f32) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, word) in words.iter().enumerate() {
        let (cx, cy) = word.rect.center();
        let d = (cx - x).hypot(cy - y);
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Split a region after the word nearest to `point`.
///
/// The left part holds every word up to and including the nearest one, the
/// right part the remaining words. Both get the tight bounding box of their
/// words and the space-joined word text.
pub fn split_at_point(region: &Region, point: (f32, f32)) -> Result<(Region, Region)> {
    let idx = nearest_word_index(&region.words, point.0, point.1).ok_or(Error::EmptySplitSide)?;
    let (left, right) = region.words.split_at(idx + 1);
    build_halves(region, left.to_vec(), right.to_vec())
}

/// Split a region into words left and right of a vertical line.
///
/// Words whose horizontal centre is `<= x` go left. The default line is the
/// region's horizontal midpoint.
pub fn split_vertical(region: &Region, x_threshold: Option<f32>) -> Result<(Region, Region)> {
    let x = x_threshold.unwrap_or_else(|| region.rect.center().0);
    let (left, right): (Vec<WordSpan>, Vec<WordSpan>) = region
        .words
        .iter()
        .cloned()
        .partition(|w| w.rect.center().0 <= x);
    build_halves(region, left, right)
}

/// Split a region horizontally at a character offset into its text.
///
/// The offset counts characters of the text with `<b>`/`<i>` markup
/// removed and is clamped to its length; an offset inside an entity moves
/// past it. The rectangle is cut at the same fraction of its height. Words
/// whose vertical centre lies above the cut go to the upper half. Both
/// halves keep the tag and carry the trimmed plain text of their side.
pub fn split_at_text_offset(region: &Region, offset: usize) -> Result<(Region, Region)> {
    let plain = plain_text(&region.text);
    let chars: Vec<(usize, char)> = plain.char_indices().collect();
    let at = entity_boundary(&plain, &chars, offset.min(chars.len()));

    let byte = chars.get(at).map_or(plain.len(), |&(b, _)| b);
    let (head, tail) = (plain[..byte].trim(), plain[byte..].trim());
    if head.is_empty() || tail.is_empty() {
        return Err(Error::EmptySplitSide);
    }

    let r = region.rect;
    let split_y = r.y0 + (r.y1 - r.y0) * (at as f32 / chars.len() as f32);
    let (upper, lower): (Vec<WordSpan>, Vec<WordSpan>) = region
        .words
        .iter()
        .cloned()
        .partition(|w| w.rect.center().1 <= split_y);

    let half = |suffix: &str, rect: Rect, text: &str, words: Vec<WordSpan>| Region {
        id: format!("{}_{}", region.id, suffix),
        rect,
        text: text.to_string(),
        tag: region.tag,
        words,
    };
    Ok((
        half("a", Rect::new(r.x0, r.y0, r.x1, split_y), head, upper),
        half("b", Rect::new(r.x0, split_y, r.x1, r.y1), tail, lower),
    ))
}

/// Region text without its inline markup.
pub fn plain_text(text: &str) -> String {
    escape::segments(text)
        .into_iter()
        .map(|seg| match seg {
            Segment::Raw(s) => s,
            Segment::Protected { payload, .. } => payload,
        })
        .collect()
}

/// Move a char position that falls inside an `&..;` entity to its end.
fn entity_boundary(plain: &str, chars: &[(usize, char)], at: usize) -> usize {
    for (i, &(byte, ch)) in chars.iter().enumerate().take(at) {
        if ch != '&' || !escape::starts_entity(&plain[byte + 1..]) {
            continue;
        }
        let end = chars[i..]
            .iter()
            .position(|&(_, c)| c == ';')
            .map_or(chars.len(), |p| i + p + 1);
        if at < end {
            return end;
        }
    }
    at
}

fn build_halves(
    region: &Region,
    left: Vec<WordSpan>,
    right: Vec<WordSpan>,
) -> Result<(Region, Region)> {
    let left = Region::from_words(format!("{}_a", region.id), region.tag, left);
    let right = Region::from_words(format!("{}_b", region.id), region.tag, right);
    match (left, right) {
        (Some(l), Some(r)) => Ok((l, r)),
        _ => Err(Error::EmptySplitSide),
    }
}

/// Merge the regions at `indices` into one.
///
/// The indices may come in any order but must name at least two regions
/// that sit next to each other. The result keeps the first region's id and
/// tag, joins texts with a line break, covers all rectangles and keeps
/// every word in order.
pub fn merge(regions: &[Region], indices: &[usize]) -> Result<Region> {
    let mut sel = indices.to_vec();
    sel.sort_unstable();
    sel.dedup();

    if let Some(&bad) = sel.iter().find(|&&i| i >= regions.len()) {
        return Err(Error::RegionIndexOutOfRange(bad, regions.len()));
    }
    if sel.len() < 2 {
        return Err(Error::SelectionTooSmall(sel.len()));
    }
    if sel.windows(2).any(|w| w[1] != w[0] + 1) {
        return Err(Error::NonAdjacentSelection(sel));
    }

    let picked = &regions[sel[0]..=sel[sel.len() - 1]];
    let first = &picked[0];
    let rect = Rect::bounding(picked.iter().map(|r| &r.rect)).unwrap_or(first.rect);
    let text = picked
        .iter()
        .map(|r| r.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let words = picked.iter().flat_map(|r| r.words.iter().cloned()).collect();

    Ok(Region {
        id: first.id.clone(),
        rect,
        text,
        tag: first.tag,
        words,
    })
}
