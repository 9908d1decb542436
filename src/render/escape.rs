//! HTML escaping that keeps well-formed `<b>`/`<i>` markup and valid entities.
//!
//! Text is split into raw and protected segments. Protected segments are
//! recognized inline pairs, found in this order, each pass only looking at
//! what earlier passes left raw:
//!
//! 1. `<b><i>..</i></b>` then `<i><b>..</b></i>`
//! 2. `<b>..</b>` then `<i>..</i>`
//!
//! Matching is ASCII case-insensitive and non-greedy, and nested forms allow
//! whitespace between their two tags. Everything else that looks like a tag
//! is escaped as literal text.

use std::ops::Range;

/// Characters examined after `&` when deciding whether it starts an entity.
pub const ENTITY_LOOKAHEAD: usize = 30;

/// A recognized inline markup pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineForm {
    /// `<b><i>..</i></b>`
    BoldItalic,
    /// `<i><b>..</b></i>`
    ItalicBold,
    /// `<b>..</b>`
    Bold,
    /// `<i>..</i>`
    Italic,
}

impl InlineForm {
    const SCAN_ORDER: [InlineForm; 4] = [
        InlineForm::BoldItalic,
        InlineForm::ItalicBold,
        InlineForm::Bold,
        InlineForm::Italic,
    ];

    fn open_tags(self) -> &'static [&'static str] {
        match self {
            InlineForm::BoldItalic => &["<b>", "<i>"],
            InlineForm::ItalicBold => &["<i>", "<b>"],
            InlineForm::Bold => &["<b>"],
            InlineForm::Italic => &["<i>"],
        }
    }

    fn close_tags(self) -> &'static [&'static str] {
        match self {
            InlineForm::BoldItalic => &["</i>", "</b>"],
            InlineForm::ItalicBold => &["</b>", "</i>"],
            InlineForm::Bold => &["</b>"],
            InlineForm::Italic => &["</i>"],
        }
    }

    /// Canonical opening markup.
    pub fn open(self) -> &'static str {
        match self {
            InlineForm::BoldItalic => "<b><i>",
            InlineForm::ItalicBold => "<i><b>",
            InlineForm::Bold => "<b>",
            InlineForm::Italic => "<i>",
        }
    }

    /// Canonical closing markup.
    pub fn close(self) -> &'static str {
        match self {
            InlineForm::BoldItalic => "</i></b>",
            InlineForm::ItalicBold => "</b></i>",
            InlineForm::Bold => "</b>",
            InlineForm::Italic => "</i>",
        }
    }
}

/// A piece of text as seen by the escaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text outside any recognized pair
    Raw(&'a str),
    /// A recognized pair and the text between its tags
    Protected {
        /// Which pair
        form: InlineForm,
        /// Text between the opening and closing tags
        payload: &'a str,
    },
}

struct PairMatch {
    start: usize,
    payload: Range<usize>,
    end: usize,
}

/// Split `text` into raw and protected segments.
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut segs = if text.is_empty() {
        Vec::new()
    } else {
        vec![Segment::Raw(text)]
    };
    for form in InlineForm::SCAN_ORDER {
        segs = protect(segs, form);
    }
    segs
}

/// Check whether `text` contains at least one recognized inline pair.
pub fn has_inline_markup(text: &str) -> bool {
    segments(text)
        .iter()
        .any(|s| matches!(s, Segment::Protected { .. }))
}

/// Escape `text` for embedding in HTML, keeping recognized inline pairs.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for seg in segments(text) {
        match seg {
            Segment::Raw(s) => escape_literal(s, &mut out),
            Segment::Protected { form, payload } => {
                out.push_str(form.open());
                escape_literal(payload, &mut out);
                out.push_str(form.close());
            }
        }
    }
    out
}

/// Check whether the text right after an `&` forms a valid entity
/// (`name;`, `#digits;` or `#xhex;`) within [`ENTITY_LOOKAHEAD`] characters.
pub fn starts_entity(after: &str) -> bool {
    let window: Vec<char> = after.chars().take(ENTITY_LOOKAHEAD).collect();
    match window.first() {
        Some('#') => match window.get(1) {
            Some('x') => terminated_run(&window[2..], |c| c.is_ascii_hexdigit()),
            _ => terminated_run(&window[1..], |c| c.is_ascii_digit()),
        },
        Some(c) if c.is_ascii_alphabetic() => {
            terminated_run(&window[1..], |c| c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

/// At least one accepted char, then `;`.
fn terminated_run(chars: &[char], accept: impl Fn(char) -> bool) -> bool {
    let run = chars.iter().take_while(|c| accept(**c)).count();
    run >= 1 && chars.get(run) == Some(&';')
}

fn escape_literal(s: &str, out: &mut String) {
    for (i, ch) in s.char_indices() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' if starts_entity(&s[i + 1..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            _ => out.push(ch),
        }
    }
}

fn protect(segs: Vec<Segment<'_>>, form: InlineForm) -> Vec<Segment<'_>> {
    let mut out = Vec::with_capacity(segs.len());
    for seg in segs {
        match seg {
            Segment::Raw(s) => split_pairs(s, form, &mut out),
            protected => out.push(protected),
        }
    }
    out
}

fn split_pairs<'a>(mut rest: &'a str, form: InlineForm, out: &mut Vec<Segment<'a>>) {
    while let Some(pair) = find_pair(rest, form) {
        if pair.start > 0 {
            out.push(Segment::Raw(&rest[..pair.start]));
        }
        out.push(Segment::Protected {
            form,
            payload: &rest[pair.payload],
        });
        rest = &rest[pair.end..];
    }
    if !rest.is_empty() {
        out.push(Segment::Raw(rest));
    }
}

/// Leftmost opener with the nearest closer after it.
///
/// If the leftmost opener has no closer, no later opener can have one.
fn find_pair(s: &str, form: InlineForm) -> Option<PairMatch> {
    let (start, open_len) = find_tags(s, form.open_tags())?;
    let body_start = start + open_len;
    let (close_at, close_len) = find_tags(&s[body_start..], form.close_tags())?;
    Some(PairMatch {
        start,
        payload: body_start..body_start + close_at,
        end: body_start + close_at + close_len,
    })
}

fn find_tags(s: &str, tags: &[&str]) -> Option<(usize, usize)> {
    s.match_indices('<')
        .find_map(|(i, _)| match_tags(&s[i..], tags).map(|len| (i, len)))
}

/// Length of `tags` matched at the start of `s`, whitespace allowed between tags.
fn match_tags(s: &str, tags: &[&str]) -> Option<usize> {
    let mut pos = 0;
    for (n, tag) in tags.iter().enumerate() {
        if n > 0 {
            let tail = &s[pos..];
            pos += tail.len() - tail.trim_start().len();
        }
        let candidate = s.get(pos..pos + tag.len())?;
        if !candidate.eq_ignore_ascii_case(tag) {
            return None;
        }
        pos += tag.len();
    }
    Some(pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_escaped() {
        assert_eq!(escape(""), "");
        assert_eq!(escape("Hello & <world>"), "Hello &amp; &lt;world&gt;");
        assert_eq!(escape("a > b"), "a &gt; b");
    }

    #[test]
    fn test_entities_kept() {
        assert_eq!(escape("&eacute; &#233; &#xE9;"), "&eacute; &#233; &#xE9;");
        assert_eq!(escape("AT&T"), "AT&amp;T");
        assert_eq!(escape("&a;"), "&amp;a;");
        assert_eq!(escape("&#X41;"), "&amp;#X41;");
        assert_eq!(escape("&#;"), "&amp;#;");
    }

    #[test]
    fn test_entity_lookahead_bounded() {
        let long = format!("&{};", "a".repeat(40));
        assert!(escape(&long).starts_with("&amp;"));
        let fits = format!("&{};", "a".repeat(28));
        assert!(escape(&fits).starts_with(&format!("&{}", "a")));
        assert!(!escape(&fits).starts_with("&amp;"));
    }

    #[test]
    fn test_single_pairs_kept() {
        assert_eq!(escape("<b>bold</b> and <i>it</i>"), "<b>bold</b> and <i>it</i>");
        assert_eq!(escape("<B>x</B>"), "<b>x</b>");
    }

    #[test]
    fn test_nested_pairs_kept() {
        assert_eq!(escape("<b><i>x</i></b>"), "<b><i>x</i></b>");
        assert_eq!(escape("<i><b>x</b></i>"), "<i><b>x</b></i>");
        assert_eq!(escape("<b> <i>x</i>\n</b>"), "<b><i>x</i></b>");
    }

    #[test]
    fn test_payload_brackets_escaped() {
        assert_eq!(escape("<b>a<c</b>"), "<b>a&lt;c</b>");
        assert_eq!(escape("<b><i>1 < 2 & 3</i></b>"), "<b><i>1 &lt; 2 &amp; 3</i></b>");
    }

    #[test]
    fn test_unbalanced_tags_escaped() {
        assert_eq!(escape("<b>open"), "&lt;b&gt;open");
        assert_eq!(escape("close</i>"), "close&lt;/i&gt;");
        assert_eq!(escape("<u>x</u>"), "&lt;u&gt;x&lt;/u&gt;");
    }

    #[test]
    fn test_nested_followed_by_stray_bold() {
        assert_eq!(
            escape("<b><i>x</i></b><b>y"),
            "<b><i>x</i></b>&lt;b&gt;y"
        );
        assert_eq!(
            escape("<b><i><b>x</i></b>"),
            "<b><i>&lt;b&gt;x</i></b>"
        );
    }

    #[test]
    fn test_bold_containing_italic_is_one_pair() {
        assert_eq!(
            escape("<b>a <i>c</i></b>"),
            "<b>a &lt;i&gt;c&lt;/i&gt;</b>"
        );
    }

    #[test]
    fn test_segments() {
        let segs = segments("x<b>y</b>z");
        assert_eq!(
            segs,
            vec![
                Segment::Raw("x"),
                Segment::Protected {
                    form: InlineForm::Bold,
                    payload: "y"
                },
                Segment::Raw("z"),
            ]
        );
        assert!(has_inline_markup("<i>a</i>"));
        assert!(!has_inline_markup("<i>a"));
    }

    #[test]
    fn test_idempotent_on_own_output() {
        for input in ["a & b <c>", "&amp;lt;", "<b>x & y</b>", "<i><b>1<2</b></i>"] {
            let once = escape(input);
            assert_eq!(escape(&once), once, "input: {input}");
        }
    }
}
