//! Error types for paratag library.

use std::io;
use thiserror::Error;

/// Result type alias for paratag operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`].
///
/// Callers use this to decide whether a failed operation is worth
/// reporting: no-data conditions and rejected operations leave all
/// prior state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Nothing to work on (empty region list, no font sizes, empty undo stack).
    NoData,
    /// A structural precondition failed; no partial change was applied.
    Rejected,
    /// Reading or writing failed.
    Io,
    /// Input or output could not be (de)serialized or produced.
    Format,
}

/// Error types that can occur while tagging regions and producing markup.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The page has no regions to build sections from.
    #[error("No regions on page {0}")]
    NoRegions(usize),

    /// No positive font size was found, so headings cannot be inferred.
    #[error("Could not detect font sizes")]
    NoFontData,

    /// Undo stack is empty.
    #[error("Nothing to undo")]
    NothingToUndo,

    /// Redo stack is empty.
    #[error("Nothing to redo")]
    NothingToRedo,

    /// A split would leave one side without words.
    #[error("Split would leave an empty side")]
    EmptySplitSide,

    /// Regions selected for merging are not contiguous.
    #[error("Cannot merge non-adjacent selection: {0:?}")]
    NonAdjacentSelection(Vec<usize>),

    /// Fewer than two regions selected for merging.
    #[error("Merge needs at least two regions, got {0}")]
    SelectionTooSmall(usize),

    /// Region index is out of range.
    #[error("Region {0} is out of range (page has {1} regions)")]
    RegionIndexOutOfRange(usize, usize),

    /// Font size list does not line up with the region list.
    #[error("Got {sizes} font sizes for {regions} regions")]
    SizeCountMismatch {
        /// Number of regions
        regions: usize,
        /// Number of sizes
        sizes: usize,
    },

    /// Page index is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(usize, usize),

    /// No region carries the requested id.
    #[error("Region not found: {0}")]
    RegionNotFound(String),

    /// Unknown structural tag name.
    #[error("Unknown region tag: {0}")]
    UnknownTag(String),

    /// The rectangle is too small to become a region.
    #[error("Rectangle is too small: {0:.1} x {1:.1}")]
    RectTooSmall(f32, f32),

    /// Malformed page range string.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// The text provider failed.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Error during rendering.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NoRegions(_) | Error::NoFontData | Error::NothingToUndo | Error::NothingToRedo => {
                ErrorKind::NoData
            }
            Error::EmptySplitSide
            | Error::NonAdjacentSelection(_)
            | Error::SelectionTooSmall(_)
            | Error::RegionIndexOutOfRange(..)
            | Error::SizeCountMismatch { .. }
            | Error::PageOutOfRange(..)
            | Error::RegionNotFound(_)
            | Error::UnknownTag(_)
            | Error::RectTooSmall(..)
            | Error::InvalidPageRange(_) => ErrorKind::Rejected,
            Error::Io(_) => ErrorKind::Io,
            Error::Json(_) | Error::Provider(_) | Error::Render(_) => ErrorKind::Format,
        }
    }

    /// Check whether this is a no-data condition.
    pub fn is_no_data(&self) -> bool {
        self.kind() == ErrorKind::NoData
    }

    /// Check whether the operation was rejected by a precondition.
    pub fn is_rejected(&self) -> bool {
        self.kind() == ErrorKind::Rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoFontData;
        assert_eq!(err.to_string(), "Could not detect font sizes");

        let err = Error::PageOutOfRange(10, 5);
        assert_eq!(
            err.to_string(),
            "Page 10 is out of range (document has 5 pages)"
        );

        let err = Error::SizeCountMismatch {
            regions: 3,
            sizes: 2,
        };
        assert_eq!(err.to_string(), "Got 2 font sizes for 3 regions");
    }

    #[test]
    fn test_error_kind() {
        assert!(Error::NoRegions(0).is_no_data());
        assert!(Error::NothingToUndo.is_no_data());
        assert!(Error::EmptySplitSide.is_rejected());
        assert!(Error::NonAdjacentSelection(vec![0, 2]).is_rejected());
        assert_eq!(Error::Render("x".into()).kind(), ErrorKind::Format);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
