//! Document model types for tagged page regions.
//!
//! Regions are what the user annotates on a page; the section tree is what
//! gets rendered. Both are plain data and independent of any PDF library.

mod document;
mod geometry;
mod region;
mod section;
mod span;

pub use document::RegionDocument;
pub use geometry::Rect;
pub use region::{region_id, Region, RegionTag, WordSpan};
pub use section::{LeafElement, SectionChild, SectionNode};
pub use span::{StyledSpan, TextBlock};
