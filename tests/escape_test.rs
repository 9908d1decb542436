//! Integration tests for entity transcoding and markup escaping.

use paratag::render::entity::{decode, prepare_text, transcode, ENTITIES};
use paratag::render::escape::escape;
use paratag::render::style::style_span;
use paratag::{MarkupOptions, NestingOrder};

#[test]
fn test_every_table_symbol_round_trips() {
    for &(ch, entity) in ENTITIES {
        let text = ch.to_string();
        assert_eq!(transcode(&text), entity);
        assert_eq!(decode(&transcode(&text)), text, "symbol {ch}");
    }
}

#[test]
fn test_transcoded_text_is_ascii_for_table_symbols() {
    let text: String = ENTITIES.iter().map(|(c, _)| *c).collect();
    assert!(transcode(&text).is_ascii());
}

#[test]
fn test_unknown_characters_pass_through() {
    assert_eq!(transcode("日本"), "日本");
    assert_eq!(transcode("plain ascii"), "plain ascii");
}

#[test]
fn test_prepare_then_escape_keeps_entities() {
    let options = MarkupOptions::default();
    let text = prepare_text("x ≤ y & “quoted” <tag>", &options);
    assert_eq!(
        escape(&text),
        "x &le; y &amp; &ldquo;quoted&rdquo; &lt;tag&gt;"
    );
}

#[test]
fn test_styled_spans_survive_escaping() {
    for nesting in [NestingOrder::BoldOutsideItalic, NestingOrder::ItalicOutsideBold] {
        for (bold, italic) in [(true, false), (false, true), (true, true)] {
            let styled = style_span("a < b & c", bold, italic, nesting);
            let escaped = escape(&styled);
            assert!(escaped.contains("a &lt; b &amp; c"), "{escaped}");
            assert_eq!(escaped.matches('<').count(), if bold && italic { 4 } else { 2 });
        }
    }
}

#[test]
fn test_whitespace_between_nested_tags_is_dropped() {
    assert_eq!(escape("<i>\n<b>x</b> </i>"), "<i><b>x</b></i>");
}

#[test]
fn test_mixed_case_tags_canonicalized() {
    assert_eq!(escape("<B><I>x</i></b>"), "<b><i>x</i></b>");
    assert_eq!(escape("<I>y</I>"), "<i>y</i>");
}

#[test]
fn test_multiple_pairs_in_one_text() {
    assert_eq!(
        escape("<b>a</b> & <i>b</i> <b>c</b>"),
        "<b>a</b> &amp; <i>b</i> <b>c</b>"
    );
}

#[test]
fn test_entity_forms() {
    assert_eq!(escape("&#8377;"), "&#8377;");
    assert_eq!(escape("&#x20B9;"), "&#x20B9;");
    assert_eq!(escape("& ;"), "&amp; ;");
    assert_eq!(escape("&&amp;"), "&amp;&amp;");
}
