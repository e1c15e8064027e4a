use std::fmt;

use serde::{Deserialize, Serialize};

pub mod config_file;

/// One bibliographic record in the uniform output format.
///
/// Field order matches the CSV column order `Author, Title, Year, Publication, DOI`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationRecord {
    #[serde(rename = "Author")]
    pub author: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Publication")]
    pub publication: String,
    #[serde(rename = "DOI")]
    pub doi: String,
}

impl CitationRecord {
    /// True when the title or publication segment could not be delimited.
    pub fn is_partial(&self) -> bool {
        self.title.is_empty() || self.publication.is_empty()
    }
}

/// Why a citation line produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// The line is a provisional ("Just Accepted") entry.
    ProvisionalEntry,
    /// No `doi.org` URL in the line.
    MissingDoi,
    /// No 19xx/20xx year token in the line.
    MissingYear,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::ProvisionalEntry => "provisional-entry",
            RejectReason::MissingDoi => "missing-doi",
            RejectReason::MissingYear => "missing-year",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected input line, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// 1-based line number in the source.
    pub line: usize,
    pub reason: RejectReason,
    /// Leading characters of the line.
    pub excerpt: String,
}

/// Statistics about entries that were skipped or degraded during extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipStats {
    pub total_raw: usize,
    pub provisional: usize,
    pub missing_doi: usize,
    pub missing_year: usize,
    /// Records emitted with an empty title and/or publication.
    pub partial: usize,
    /// Tabular rows with too few columns.
    pub short_row: usize,
}

impl SkipStats {
    /// Count one rejection.
    pub fn record_rejection(&mut self, reason: RejectReason) {
        match reason {
            RejectReason::ProvisionalEntry => self.provisional += 1,
            RejectReason::MissingDoi => self.missing_doi += 1,
            RejectReason::MissingYear => self.missing_year += 1,
        }
    }

    pub fn rejected(&self) -> usize {
        self.provisional + self.missing_doi + self.missing_year + self.short_row
    }
}

/// Result of extracting records from one input.
#[derive(Debug, Clone, Default)]
pub struct ExtractionResult {
    pub records: Vec<CitationRecord>,
    pub rejections: Vec<Rejection>,
    pub skip_stats: SkipStats,
}

/// Truncate `text` to at most `max_chars` characters, on a char boundary.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_reason_wire_names() {
        assert_eq!(RejectReason::ProvisionalEntry.to_string(), "provisional-entry");
        assert_eq!(RejectReason::MissingDoi.as_str(), "missing-doi");
        assert_eq!(RejectReason::MissingYear.as_str(), "missing-year");
    }

    #[test]
    fn test_skip_stats_counts_rejections() {
        let mut stats = SkipStats::default();
        stats.record_rejection(RejectReason::MissingDoi);
        stats.record_rejection(RejectReason::MissingDoi);
        stats.record_rejection(RejectReason::ProvisionalEntry);
        assert_eq!(stats.missing_doi, 2);
        assert_eq!(stats.provisional, 1);
        assert_eq!(stats.rejected(), 3);
    }

    #[test]
    fn test_partial_record() {
        let record = CitationRecord {
            author: "A".into(),
            year: "2021".into(),
            doi: "https://doi.org/10.1/z".into(),
            ..Default::default()
        };
        assert!(record.is_partial());
    }

    #[test]
    fn test_excerpt_multibyte() {
        assert_eq!(excerpt("Müller é", 3), "Mül...");
        assert_eq!(excerpt("short", 50), "short");
    }
}
