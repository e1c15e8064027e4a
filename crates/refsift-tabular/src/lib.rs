use std::path::Path;

use thiserror::Error;

pub mod columns;

pub use columns::ColumnMap;
pub use refsift_core::{CitationRecord, ExtractionResult, SkipStats};

#[derive(Error, Debug)]
pub enum TabularError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV file is empty or has no header row")]
    EmptyHeader,
}

/// Extract records from a CSV export (Scopus, IEEE Xplore, ...).
///
/// Columns are located by header name (see [`ColumnMap::detect`]); bytes that
/// are not valid UTF-8 are replaced rather than failing the file.
pub fn extract_records_from_csv(path: &Path) -> Result<ExtractionResult, TabularError> {
    let bytes = std::fs::read(path)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read CSV export");
    extract_records_from_csv_str(&String::from_utf8_lossy(&bytes))
}

/// Parse CSV export content from a string.
pub fn extract_records_from_csv_str(content: &str) -> Result<ExtractionResult, TabularError> {
    let content = content.trim_start_matches('\u{feff}');
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = reader.records();
    let headers = match rows.next() {
        Some(row) => row?,
        None => return Err(TabularError::EmptyHeader),
    };
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(TabularError::EmptyHeader);
    }

    let columns = ColumnMap::detect(headers.iter());
    tracing::debug!(?columns, "resolved CSV columns");

    let mut stats = SkipStats::default();
    let mut records = Vec::new();

    for (idx, row) in rows.enumerate() {
        let row = row?;
        // Row 1 is the header.
        let row_no = idx + 2;
        stats.total_raw += 1;

        match columns.record_from_row(&row) {
            Some(record) => records.push(record),
            None => {
                stats.short_row += 1;
                tracing::warn!(row = row_no, columns = row.len(), "too few columns, skipping row");
            }
        }
    }

    tracing::info!(
        rows = stats.total_raw,
        records = records.len(),
        short_rows = stats.short_row,
        "CSV export processed"
    );

    Ok(ExtractionResult {
        records,
        rejections: Vec::new(),
        skip_stats: stats,
    })
}
