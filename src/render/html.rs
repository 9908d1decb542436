//! HTML rendering of section trees and whole documents.

use std::ops::Range;

use log::{debug, info};
use rayon::prelude::*;
use regex::Regex;

use crate::error::{Error, Result};
use crate::layout::build_sections;
use crate::model::{Region, RegionDocument, SectionChild, SectionNode};
use crate::provider::TextProvider;

use super::{entity, escape, MarkupOptions, RenderOptions};

/// Separator placed between page fragments in a document.
pub const PAGE_SEPARATOR: &str = "\n<hr/>\n";

/// Render a section tree as a newline-separated HTML fragment.
pub fn render_section(node: &SectionNode) -> String {
    let mut lines = Vec::new();
    push_section(node, &mut lines);
    lines.join("\n")
}

fn push_section(node: &SectionNode, lines: &mut Vec<String>) {
    lines.push(format!("<section id=\"{}\">", escape_attr(&node.id)));
    for child in &node.children {
        match child {
            SectionChild::Section(s) => push_section(s, lines),
            SectionChild::Element(leaf) => {
                let tag = leaf.tag.as_str();
                lines.push(format!(
                    "<{tag} id=\"{}\">{}</{tag}>",
                    escape_attr(&leaf.id),
                    leaf.escaped_text
                ));
            }
        }
    }
    lines.push("</section>".to_string());
}

/// Render one page's regions as a nested section fragment.
pub fn render_page(page_index: usize, regions: &[Region], options: &MarkupOptions) -> Result<String> {
    let root = build_sections(page_index, regions, options)?;
    Ok(render_section(&root))
}

/// Fragment for a page without regions, built from the provider's text blocks.
pub fn render_page_text<P>(provider: &P, page_index: usize, options: &MarkupOptions) -> Result<String>
where
    P: TextProvider + ?Sized,
{
    let number = page_index + 1;
    let mut lines = vec![
        format!("<section id=\"{}\">", number),
        format!("<h2>Page {}</h2>", number),
    ];

    let paragraphs: Vec<String> = provider
        .blocks(page_index)?
        .iter()
        .map(|b| escape::escape(&entity::prepare_text(&b.text, options)))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    if paragraphs.is_empty() {
        lines.push("<p></p>".to_string());
    }
    lines.extend(paragraphs.into_iter().map(|p| format!("<p>{}</p>", p)));
    lines.push("</section>".to_string());
    Ok(lines.join("\n"))
}

/// Render the selected pages of a document.
///
/// Pages with regions get their section tree, whether or not the provider
/// knows the page. Pages without regions fall back to provider text when a
/// provider covering them is given and the fallback is enabled; otherwise
/// they are left out. Pages render in parallel and are
/// joined in page order.
pub fn render_document<P>(
    doc: &RegionDocument,
    provider: Option<&P>,
    options: &RenderOptions,
) -> Result<String>
where
    P: TextProvider + ?Sized,
{
    let region_pages = doc.pages.keys().next_back().map_or(0, |last| last + 1);
    let page_count = match provider {
        Some(p) => p.page_count().max(region_pages),
        None => region_pages,
    };

    let pages: Vec<Option<String>> = (0..page_count)
        .into_par_iter()
        .filter(|&i| options.page_selection.includes_index(i))
        .map(|i| render_document_page(doc, provider, options, i))
        .collect::<Result<_>>()?;

    let parts: Vec<String> = pages.into_iter().flatten().collect();
    info!("rendered {} of {} pages", parts.len(), page_count);

    let body = parts.join(PAGE_SEPARATOR);
    Ok(if options.include_shell {
        wrap_document(&body)
    } else {
        body
    })
}

fn render_document_page<P>(
    doc: &RegionDocument,
    provider: Option<&P>,
    options: &RenderOptions,
    page_index: usize,
) -> Result<Option<String>>
where
    P: TextProvider + ?Sized,
{
    let regions = doc.regions(page_index);
    if !regions.is_empty() {
        return render_page(page_index, regions, &options.markup).map(Some);
    }
    match provider {
        Some(p) if options.fallback_to_page_text && page_index < p.page_count() => {
            debug!("page {}: no regions, using page text", page_index + 1);
            render_page_text(p, page_index, &options.markup).map(Some)
        }
        _ => Ok(None),
    }
}

/// Wrap a fragment in a minimal standalone HTML document.
pub fn wrap_document(body: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n</head>\n<body>\n{}\n</body>\n</html>",
        body
    )
}

/// Byte range of the element whose `id` attribute equals `id`, from its
/// opening tag through the matching closing tag.
///
/// Quotes may be single or double. Nested elements of the same name are
/// counted so the range ends at the right closing tag.
pub fn find_element(html: &str, id: &str) -> Result<Option<Range<usize>>> {
    let open = Regex::new(&format!(
        r#"(?is)<([a-z][a-z0-9]*)\b[^>]*\bid\s*=\s*['"]{}['"][^>]*>"#,
        regex::escape(id)
    ))
    .map_err(|e| Error::Render(format!("element pattern: {}", e)))?;

    let Some(caps) = open.captures(html) else {
        return Ok(None);
    };
    let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
        return Ok(None);
    };

    let tags = Regex::new(&format!(r"(?i)<(/?){}\b[^>]*>", regex::escape(name.as_str())))
        .map_err(|e| Error::Render(format!("tag pattern: {}", e)))?;

    let mut depth = 1usize;
    for m in tags.captures_iter(&html[whole.end()..]) {
        let Some(tag) = m.get(0) else { continue };
        let closing = m.get(1).is_some_and(|s| !s.as_str().is_empty());
        if closing {
            depth -= 1;
            if depth == 0 {
                return Ok(Some(whole.start()..whole.end() + tag.end()));
            }
        } else if !tag.as_str().ends_with("/>") {
            depth += 1;
        }
    }
    Ok(None)
}

/// All `id` attribute values in document order.
pub fn element_ids(html: &str) -> Result<Vec<String>> {
    let re = Regex::new(r#"(?i)<[a-z][a-z0-9]*\b[^>]*?\bid\s*=\s*['"]([^'"]*)['"]"#)
        .map_err(|e| Error::Render(format!("id pattern: {}", e)))?;
    Ok(re
        .captures_iter(html)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect())
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
