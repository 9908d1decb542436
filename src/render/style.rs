//! Inline emphasis for styled spans.

use super::NestingOrder;

/// Wrap span text in `<b>`/`<i>` according to its style flags.
///
/// This is the only place inline tags are introduced, so every pair the
/// escaper later meets from this source is well-formed and nested in
/// `nesting` order.
pub fn style_span(text: &str, bold: bool, italic: bool, nesting: NestingOrder) -> String {
    match (bold, italic) {
        (true, true) => match nesting {
            NestingOrder::BoldOutsideItalic => format!("<b><i>{}</i></b>", text),
            NestingOrder::ItalicOutsideBold => format!("<i><b>{}</b></i>", text),
        },
        (true, false) => format!("<b>{}</b>", text),
        (false, true) => format!("<i>{}</i>", text),
        (false, false) => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_span() {
        let order = NestingOrder::BoldOutsideItalic;
        assert_eq!(style_span("x", false, false, order), "x");
        assert_eq!(style_span("x", true, false, order), "<b>x</b>");
        assert_eq!(style_span("x", false, true, order), "<i>x</i>");
        assert_eq!(style_span("x", true, true, order), "<b><i>x</i></b>");
        assert_eq!(
            style_span("x", true, true, NestingOrder::ItalicOutsideBold),
            "<i><b>x</b></i>"
        );
    }
}
