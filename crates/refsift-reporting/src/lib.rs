use std::path::PathBuf;

use thiserror::Error;

pub mod merge;
pub mod records;
pub mod screen;

pub use merge::{MergeResult, duplicate_dois, merge_csv_dir};
pub use records::{HEADERS, read_records, read_records_from_path, write_records, write_records_to_path};
pub use screen::{DEFAULT_KEYWORDS, KeywordScreen};

pub use refsift_core::CitationRecord;

#[derive(Error, Debug)]
pub enum ReportingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("no CSV files found in {}", .0.display())]
    NoCsvFiles(PathBuf),
}
