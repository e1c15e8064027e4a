use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use refsift_parsing::CitationExtractor;

// Re-export domain types for convenience
pub use refsift_core::{CitationRecord, ExtractionResult, Rejection, SkipStats};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("citation list error: {0}")]
    Parsing(#[from] refsift_parsing::ParsingError),
    #[error("CSV export error: {0}")]
    Tabular(#[from] refsift_tabular::TabularError),
    #[error("BibTeX error: {0}")]
    Bib(#[from] refsift_bib::BibError),
    #[error("unsupported input format: {0} (expected txt, csv or bib)")]
    UnsupportedFormat(String),
}

/// Kind of input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Plain-text citation list, one citation per line.
    Txt,
    /// CSV export with named columns.
    Csv,
    /// NASA ADS BibTeX export.
    Bib,
}

impl InputFormat {
    /// Infer the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        ext.parse()
    }
}

impl FromStr for InputFormat {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" => Ok(InputFormat::Txt),
            "csv" => Ok(InputFormat::Csv),
            "bib" => Ok(InputFormat::Bib),
            other => Err(IngestError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputFormat::Txt => "txt",
            InputFormat::Csv => "csv",
            InputFormat::Bib => "bib",
        })
    }
}

/// Extract records from a citation list, CSV export or ADS BibTeX file,
/// dispatching on `format`.
///
/// `extractor` is used for citation lists only.
pub fn extract_records(
    path: &Path,
    format: InputFormat,
    extractor: &CitationExtractor,
) -> Result<ExtractionResult, IngestError> {
    tracing::info!(path = %path.display(), %format, "extracting records");
    let result = match format {
        InputFormat::Txt => extractor.extract_from_path(path)?,
        InputFormat::Csv => refsift_tabular::extract_records_from_csv(path)?,
        InputFormat::Bib => refsift_bib::extract_records_from_ads_bib(path)?,
    };
    Ok(result)
}
