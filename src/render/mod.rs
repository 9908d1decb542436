//! Rendering of tagged regions to HTML and JSON.
//!
//! Text passes through two stages before it reaches markup: [`entity`]
//! makes it ASCII-safe and [`escape`] neutralizes everything except inline
//! `<b>`/`<i>` pairs and valid entities.

pub mod entity;
pub mod escape;
pub mod html;
mod json;
mod options;
pub mod style;

pub use html::{render_document, render_page, render_section, wrap_document};
pub use json::{from_json, read_json_file, to_json, write_json_file, JsonFormat};
pub use options::{MarkupOptions, NestingOrder, PageSelection, RenderOptions};
