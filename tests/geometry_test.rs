//! Integration tests for region detection, splitting and merging.

use paratag::layout::detect::gap_threshold;
use paratag::{
    detect_regions, merge, split_at_point, split_vertical, Error, Rect, Region, RegionTag,
    TextBlock, WordSpan,
};

fn words_grid(rows: usize, cols: usize) -> Vec<WordSpan> {
    let mut words = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            let x0 = c as f32 * 30.0;
            let y0 = r as f32 * 14.0;
            words.push(WordSpan::new(
                Rect::new(x0, y0, x0 + 25.0, y0 + 10.0),
                format!("w{r}{c}"),
            ));
        }
    }
    words
}

fn sorted_texts(words: &[WordSpan]) -> Vec<String> {
    let mut texts: Vec<String> = words.iter().map(|w| w.text.clone()).collect();
    texts.sort();
    texts
}

#[test]
fn test_split_then_merge_restores_box_and_words() {
    let region = Region::from_words("p1_r1", RegionTag::P, words_grid(3, 4)).unwrap();
    let (left, right) = split_at_point(&region, (40.0, 18.0)).unwrap();
    assert_eq!(left.words.len() + right.words.len(), 12);

    let merged = merge(&[left, right], &[0, 1]).unwrap();
    assert_eq!(merged.rect, region.rect);
    assert_eq!(sorted_texts(&merged.words), sorted_texts(&region.words));
}

#[test]
fn test_vertical_split_then_merge_restores_box() {
    let region = Region::from_words("p1_r1", RegionTag::Li, words_grid(2, 4)).unwrap();
    let (left, right) = split_vertical(&region, None).unwrap();
    assert_eq!(left.words.len(), 4);
    assert_eq!(right.words.len(), 4);
    assert_eq!(left.tag, RegionTag::Li);

    let merged = merge(&[left, right], &[1, 0]).unwrap();
    assert_eq!(merged.rect, region.rect);
    assert_eq!(sorted_texts(&merged.words), sorted_texts(&region.words));
}

#[test]
fn test_split_halves_get_tight_boxes() {
    let region = Region::from_words("r", RegionTag::P, words_grid(2, 2)).unwrap();
    let (top, bottom) = split_at_point(&region, (40.0, 4.0)).unwrap();
    assert_eq!(top.rect, Rect::new(0.0, 0.0, 55.0, 10.0));
    assert_eq!(bottom.rect, Rect::new(0.0, 14.0, 55.0, 24.0));
    assert_eq!(top.text, "w00 w01");
}

#[test]
fn test_split_single_word_region_rejected() {
    let region = Region::from_words("r", RegionTag::P, words_grid(1, 1)).unwrap();
    assert!(matches!(
        split_at_point(&region, (0.0, 0.0)),
        Err(Error::EmptySplitSide)
    ));
    assert!(matches!(
        split_vertical(&region, None),
        Err(Error::EmptySplitSide)
    ));
}

#[test]
fn test_merge_three_in_shuffled_order() {
    let rect = |y: f32| Rect::new(0.0, y, 10.0, y + 5.0);
    let regions = vec![
        Region::new("a", rect(0.0), "a"),
        Region::new("b", rect(10.0), "b"),
        Region::new("c", rect(20.0), "c"),
        Region::new("d", rect(30.0), "d"),
    ];
    let merged = merge(&regions, &[3, 1, 2]).unwrap();
    assert_eq!(merged.id, "b");
    assert_eq!(merged.text, "b\nc\nd");
    assert_eq!(merged.rect, Rect::new(0.0, 10.0, 10.0, 35.0));
}

#[test]
fn test_detect_paragraphs() {
    let line = |y: f32| TextBlock::new(Rect::new(50.0, y, 400.0, y + 12.0), "line");
    let blocks = vec![
        line(100.0),
        line(114.0),
        line(128.0),
        line(170.0),
        line(184.0),
        line(240.0),
    ];
    let rects = detect_regions(&blocks);
    assert_eq!(
        rects,
        vec![
            Rect::new(50.0, 100.0, 400.0, 140.0),
            Rect::new(50.0, 170.0, 400.0, 196.0),
            Rect::new(50.0, 240.0, 400.0, 252.0),
        ]
    );
}

#[test]
fn test_gap_threshold_scales_with_median() {
    let rects: Vec<Rect> = (0..5)
        .map(|i| Rect::new(0.0, i as f32 * 30.0, 1.0, i as f32 * 30.0 + 10.0))
        .collect();
    // gaps of 20 everywhere
    assert_eq!(gap_threshold(&rects), 30.0);
}
