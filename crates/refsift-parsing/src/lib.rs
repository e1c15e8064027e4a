use std::path::Path;

use thiserror::Error;

pub mod anchors;
pub mod citation;
pub mod config;
pub mod extractor;

pub use citation::{BoundaryStrategy, ParsedCitation, parse_citation};
pub use config::{CitationParsingConfig, CitationParsingConfigBuilder, ListOverride};
pub use extractor::CitationExtractor;
// Re-export domain types from core (canonical definitions live there)
pub use refsift_core::{CitationRecord, ExtractionResult, RejectReason, Rejection, SkipStats};

#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Extract records from a plain-text citation list (one citation per line).
///
/// Pipeline, per non-empty line:
/// 1. Reject provisional ("Just Accepted") entries
/// 2. Anchor on the DOI URL, then on the first 19xx/20xx year
/// 3. Author = text before the year
/// 4. Title and publication = best-effort segmentation of the text after the year
pub fn extract_references_from_txt(path: &Path) -> Result<ExtractionResult, ParsingError> {
    CitationExtractor::new().extract_from_path(path)
}

/// Parse citation lines from a string (useful for testing).
pub fn extract_references_from_txt_str(text: &str) -> ExtractionResult {
    CitationExtractor::new().extract_from_str(text)
}
