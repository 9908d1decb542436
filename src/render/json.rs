//! JSON export and import of region documents.

use std::fs;
use std::path::Path;

use log::info;

use crate::error::{Error, Result};
use crate::model::RegionDocument;

use super::{entity, MarkupOptions};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a region document.
pub fn to_json(doc: &RegionDocument, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Parse a region document.
///
/// When automatic entities are enabled every region text is run through
/// [`entity::prepare_text`], so imported text is ASCII-safe like text
/// captured from a provider.
pub fn from_json(json: &str, options: &MarkupOptions) -> Result<RegionDocument> {
    let mut doc: RegionDocument = serde_json::from_str(json)?;
    if options.auto_entities {
        for region in doc.pages.values_mut().flatten() {
            region.text = entity::prepare_text(&region.text, options);
        }
    }
    info!(
        "imported {} regions on {} pages",
        doc.region_count(),
        doc.pages.len()
    );
    Ok(doc)
}

/// Read a region document from a file.
pub fn read_json_file(path: impl AsRef<Path>, options: &MarkupOptions) -> Result<RegionDocument> {
    let data = fs::read_to_string(path)?;
    from_json(&data, options)
}

/// Write a region document to a file as pretty JSON.
pub fn write_json_file(doc: &RegionDocument, path: impl AsRef<Path>) -> Result<()> {
    fs::write(path, to_json(doc, JsonFormat::Pretty)?)?;
    Ok(())
}
