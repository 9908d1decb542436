//! Page layout operations: heading inference, section nesting, region
//! detection and split/merge editing.

pub mod detect;
pub mod geometry;
mod heading;
mod sections;

pub use detect::detect_regions;
pub use geometry::{merge, split_at_point, split_at_text_offset, split_vertical};
pub use heading::{HeadingClassifier, HeadingThresholds};
pub use sections::{build_sections, SectionTreeBuilder, MAX_SECTION_LEVEL};
