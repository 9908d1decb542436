//! Vertical-gap clustering of text blocks into candidate regions.

use log::debug;

use crate::model::{Rect, TextBlock};

/// Smallest gap that ever separates two regions.
pub const MIN_GAP_THRESHOLD: f32 = 5.0;

/// Multiplier applied to the median inter-block gap.
pub const GAP_FACTOR: f32 = 1.5;

/// Group text blocks into region rectangles.
///
/// Blocks are sorted top to bottom. A block joins the current group unless
/// the vertical gap between the group's bottom and the block's top exceeds
/// `max(5, 1.5 * median gap)`, where the median is taken over non-negative
/// gaps between consecutive blocks plus a zero.
pub fn detect_regions(blocks: &[TextBlock]) -> Vec<Rect> {
    let mut rects: Vec<Rect> = blocks.iter().map(|b| b.rect).collect();
    rects.sort_by(|a, b| a.y0.total_cmp(&b.y0));

    let threshold = gap_threshold(&rects);
    let mut groups = Vec::new();
    let mut current: Option<Rect> = None;

    for rect in rects {
        current = Some(match current {
            None => rect,
            Some(cur) if rect.y0 - cur.y1 > threshold => {
                groups.push(cur);
                rect
            }
            Some(cur) => Rect {
                x0: cur.x0.min(rect.x0),
                y0: cur.y0,
                x1: cur.x1.max(rect.x1),
                y1: cur.y1.max(rect.y1),
            },
        });
    }
    groups.extend(current);

    debug!(
        "grouped {} blocks into {} regions (gap threshold {:.2})",
        blocks.len(),
        groups.len(),
        threshold
    );
    groups
}

/// Gap threshold for blocks already sorted by top edge.
pub fn gap_threshold(sorted: &[Rect]) -> f32 {
    let gaps: Vec<f32> = sorted.windows(2).map(|w| w[1].y0 - w[0].y1).collect();
    if gaps.is_empty() {
        return MIN_GAP_THRESHOLD;
    }

    let mut candidates: Vec<f32> = gaps.iter().copied().filter(|g| *g >= 0.0).collect();
    candidates.push(0.0);
    candidates.sort_by(f32::total_cmp);
    let median = candidates
        .get(gaps.len() / 2)
        .or(candidates.last())
        .copied()
        .unwrap_or(0.0);

    MIN_GAP_THRESHOLD.max(median * GAP_FACTOR)
}
