//! Nested section tree produced from an ordered region list.

use serde::{Deserialize, Serialize};

use super::RegionTag;

/// A section of a page, opened by a heading or by the page itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionNode {
    /// Dot-separated path: page number, then one counter per level
    pub id: String,

    /// 0 for the page root, 1-4 for heading sections
    pub level: u8,

    /// Child sections and leaf elements, in reading order
    pub children: Vec<SectionChild>,
}

/// A child of a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionChild {
    /// A nested section
    Section(SectionNode),
    /// A rendered region
    Element(LeafElement),
}

/// A region ready for output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafElement {
    /// Element tag
    pub tag: RegionTag,
    /// Region id
    pub id: String,
    /// Escaped, ASCII-safe text with inline `<b>`/`<i>` markup
    pub escaped_text: String,
}

impl SectionNode {
    /// Create an empty section.
    pub fn new(id: impl Into<String>, level: u8) -> Self {
        Self {
            id: id.into(),
            level,
            children: Vec::new(),
        }
    }

    /// Nested sections directly below this one.
    pub fn sections(&self) -> impl Iterator<Item = &SectionNode> {
        self.children.iter().filter_map(|c| match c {
            SectionChild::Section(s) => Some(s),
            SectionChild::Element(_) => None,
        })
    }

    /// Leaf elements directly inside this section.
    pub fn elements(&self) -> impl Iterator<Item = &LeafElement> {
        self.children.iter().filter_map(|c| match c {
            SectionChild::Element(e) => Some(e),
            SectionChild::Section(_) => None,
        })
    }

    /// Number of sections in this subtree, this one included.
    pub fn section_count(&self) -> usize {
        1 + self.sections().map(|s| s.section_count()).sum::<usize>()
    }

    /// Deepest section level in this subtree.
    pub fn max_level(&self) -> u8 {
        self.sections()
            .map(|s| s.max_level())
            .fold(self.level, u8::max)
    }

    /// All leaf elements of the subtree in document order.
    pub fn leaves(&self) -> Vec<&LeafElement> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a LeafElement>) {
        for child in &self.children {
            match child {
                SectionChild::Section(s) => s.collect_leaves(out),
                SectionChild::Element(e) => out.push(e),
            }
        }
    }

    /// Find a section by id anywhere in the subtree.
    pub fn find_section(&self, id: &str) -> Option<&SectionNode> {
        if self.id == id {
            return Some(self);
        }
        self.sections().find_map(|s| s.find_section(id))
    }
}
