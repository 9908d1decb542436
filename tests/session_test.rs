//! Integration tests for editing sessions backed by an in-memory provider.

use paratag::provider::{MemoryPage, MemoryProvider, PositionedSpan};
use paratag::{
    Error, MarkupOptions, NestingOrder, Rect, RegionTag, RenderOptions, Session, StyledSpan,
    TextBlock, WordSpan,
};

const DUMP: &str = r#"{
    "pages": [
        {
            "spans": [
                {"rect": [50, 50, 300, 74], "text": "Results", "size": 24, "bold": true, "line": 0},
                {"rect": [50, 110, 200, 122], "text": "Mean error", "size": 11, "line": 1},
                {"rect": [205, 110, 260, 122], "text": "± 0.2", "size": 11, "italic": true, "line": 1},
                {"rect": [50, 126, 300, 138], "text": "across runs", "size": 11, "line": 2}
            ],
            "blocks": [
                {"rect": [50, 50, 300, 74], "text": "Results"},
                {"rect": [50, 110, 260, 122], "text": "Mean error ± 0.2"},
                {"rect": [50, 126, 300, 138], "text": "across runs"}
            ],
            "words": [
                {"rect": [50, 50, 300, 74], "text": "Results"},
                {"rect": [50, 110, 90, 122], "text": "Mean"},
                {"rect": [95, 110, 200, 122], "text": "error"},
                {"rect": [205, 110, 260, 122], "text": "±"},
                {"rect": [50, 126, 120, 138], "text": "across"},
                {"rect": [125, 126, 300, 138], "text": "runs"}
            ]
        },
        {
            "blocks": [
                {"rect": [50, 50, 300, 62], "text": "Appendix — notes"},
                {"rect": [50, 66, 300, 78], "text": "   "}
            ]
        }
    ]
}"#;

fn session() -> Session<MemoryProvider> {
    Session::new(MemoryProvider::from_json(DUMP).unwrap(), "paper.pdf")
}

#[test]
fn test_detect_infer_render() {
    let mut s = session();
    assert_eq!(s.auto_detect(0).unwrap(), 2);
    s.infer_headings(0).unwrap();

    let regions = s.regions(0);
    assert_eq!(regions[0].tag, RegionTag::H1);
    assert_eq!(regions[0].text, "<b>Results</b>");
    assert_eq!(regions[1].tag, RegionTag::P);
    assert_eq!(regions[1].text, "Mean error <i>&plusmn; 0.2</i>\nacross runs");

    let html = s.render_page(0).unwrap();
    assert!(html.contains("<h1 id=\"h1_p1_r1\"><b>Results</b></h1>"));
    assert!(html.contains("<p id=\"p_p1_r2\">Mean error <i>&plusmn; 0.2</i>\nacross runs</p>"));
}

#[test]
fn test_document_with_page_text_fallback() {
    let mut s = session();
    s.auto_detect(0).unwrap();
    let html = s.render_document(&RenderOptions::default()).unwrap();

    let parts: Vec<_> = html.split("\n<hr/>\n").collect();
    assert_eq!(parts.len(), 2);
    assert!(parts[0].contains("<section id=\"1\">"));
    assert!(parts[1].starts_with("<section id=\"2\">\n<h2>Page 2</h2>\n<p>Appendix &mdash; notes</p>"));
    assert!(parts[1].ends_with("</section>\n</body>\n</html>"));
    assert!(html.is_ascii());

    let only_regions = s
        .render_document(&RenderOptions::new().with_page_text_fallback(false).with_shell(false))
        .unwrap();
    assert!(!only_regions.contains("<hr/>"));
    assert!(!only_regions.contains("Appendix"));
}

#[test]
fn test_nesting_toggle_applies_to_new_captures() {
    let mut s = session();
    s.options_mut().toggle_nesting();
    assert_eq!(s.options().nesting, NestingOrder::ItalicOutsideBold);

    let provider = MemoryProvider::new(vec![MemoryPage {
        spans: vec![PositionedSpan::new(
            Rect::new(0.0, 0.0, 50.0, 10.0),
            StyledSpan::new("both", 10.0).bold().italic(),
        )],
        words: vec![WordSpan::new(Rect::new(0.0, 0.0, 50.0, 10.0), "both")],
        blocks: vec![TextBlock::new(Rect::new(0.0, 0.0, 50.0, 10.0), "both")],
    }]);
    let mut s = Session::new(provider, "x.pdf")
        .with_options(MarkupOptions::new().with_nesting(NestingOrder::ItalicOutsideBold));
    s.add_region(0, Rect::new(-1.0, -1.0, 60.0, 20.0)).unwrap();
    assert_eq!(s.regions(0)[0].text, "<i><b>both</b></i>");
}

#[test]
fn test_split_imported_region_loads_words() {
    let mut s = session();
    s.import_json_str(
        r#"{"file":"paper.pdf","pages":{"0":[{"id":"p1_r1","rect":[40,100,310,140],"text":"x"}]}}"#,
    )
    .unwrap();
    assert!(s.regions(0)[0].words.is_empty());

    s.split_at_point(0, 0, (150.0, 116.0)).unwrap();
    let regions = s.regions(0);
    assert_eq!(regions[0].text, "Mean error");
    assert_eq!(regions[1].text, "&plusmn; across runs");
}

#[test]
fn test_export_import_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regions.json");

    let mut s = session();
    s.auto_detect(0).unwrap();
    s.retag(0, 1, RegionTag::Fn).unwrap();
    s.export_json(&path).unwrap();

    let mut other = session();
    other.import_json(&path).unwrap();
    assert_eq!(other.document().file, "paper.pdf");
    let ids: Vec<_> = other.regions(0).iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["p1_r1", "fn_p1_r2"]);
    assert_eq!(other.regions(0)[1].tag, RegionTag::Fn);

    other.undo().unwrap();
    assert!(other.document().is_empty());
}

#[test]
fn test_failures_keep_history() {
    let mut s = session();
    s.auto_detect(0).unwrap();

    assert!(matches!(s.merge(0, &[0, 5]), Err(Error::RegionIndexOutOfRange(5, 2))));
    assert!(matches!(s.delete(0, 9), Err(Error::RegionIndexOutOfRange(9, 2))));
    assert!(matches!(s.infer_headings(1), Err(Error::NoRegions(1))));
    assert!(matches!(s.auto_detect(7), Err(Error::PageOutOfRange(7, 2))));

    s.undo().unwrap();
    assert!(!s.can_undo());
    assert!(s.document().is_empty());
}
