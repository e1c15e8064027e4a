use std::collections::HashMap;
use std::path::{Path, PathBuf};

use refsift_core::CitationRecord;

use crate::{ReportingError, records};

/// All records of a directory of record CSVs, in file-name order.
#[derive(Debug, Clone, Default)]
pub struct MergeResult {
    pub records: Vec<CitationRecord>,
    /// The files that were read, sorted.
    pub files: Vec<PathBuf>,
}

/// Concatenate every `*.csv` file in `dir` (not recursive).
pub fn merge_csv_dir(dir: &Path) -> Result<MergeResult, ReportingError> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .map(|e| e.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
        })
        .collect();

    if files.is_empty() {
        return Err(ReportingError::NoCsvFiles(dir.to_path_buf()));
    }
    files.sort();

    let mut merged = Vec::new();
    for file in &files {
        let records = records::read_records_from_path(file)?;
        tracing::info!(path = %file.display(), records = records.len(), "merging file");
        merged.extend(records);
    }

    Ok(MergeResult {
        records: merged,
        files,
    })
}

/// Every record whose DOI occurs more than once, all occurrences kept, in
/// input order. Records with an empty DOI are never duplicates.
pub fn duplicate_dois(records: &[CitationRecord]) -> Vec<CitationRecord> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records.iter().filter(|r| !r.doi.is_empty()) {
        *counts.entry(record.doi.as_str()).or_default() += 1;
    }

    records
        .iter()
        .filter(|r| counts.get(r.doi.as_str()).is_some_and(|&n| n > 1))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, doi: &str) -> CitationRecord {
        CitationRecord {
            title: title.into(),
            doi: doi.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_duplicate_dois_keeps_all_occurrences() {
        let records = vec![
            record("a", "https://doi.org/10.1/x"),
            record("b", "https://doi.org/10.1/y"),
            record("c", "https://doi.org/10.1/x"),
            record("d", ""),
            record("e", ""),
        ];
        let dups = duplicate_dois(&records);
        let titles: Vec<_> = dups.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c"]);
    }

    #[test]
    fn test_duplicate_dois_none() {
        let records = vec![record("a", "1"), record("b", "2")];
        assert!(duplicate_dois(&records).is_empty());
    }

    #[test]
    fn test_merge_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        records::write_records_to_path(&dir.path().join("b.csv"), &[record("from b", "2")])
            .unwrap();
        records::write_records_to_path(&dir.path().join("a.CSV"), &[record("from a", "1")])
            .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let merged = merge_csv_dir(dir.path()).unwrap();
        assert_eq!(merged.files.len(), 2);
        let titles: Vec<_> = merged.records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["from a", "from b"]);
    }

    #[test]
    fn test_merge_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            merge_csv_dir(dir.path()),
            Err(ReportingError::NoCsvFiles(_))
        ));
    }
}
