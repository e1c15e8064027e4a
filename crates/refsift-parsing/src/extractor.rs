use std::path::Path;

use crate::citation::{self, ParsedCitation};
use crate::config::CitationParsingConfig;
use crate::{ExtractionResult, ParsingError, Rejection, SkipStats};

const EXCERPT_CHARS: usize = 50;

/// A configurable citation-list extraction pipeline.
///
/// Holds a [`CitationParsingConfig`] and drives the line parser over a text,
/// one citation per line. The parser itself is pure; diagnostics about
/// rejected and partial lines are emitted here.
#[derive(Debug, Clone, Default)]
pub struct CitationExtractor {
    config: CitationParsingConfig,
}

impl CitationExtractor {
    /// Create an extractor with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with a custom configuration.
    pub fn with_config(config: CitationParsingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CitationParsingConfig {
        &self.config
    }

    /// Parse a single trimmed citation line.
    pub fn parse_line(&self, line: &str) -> ParsedCitation {
        citation::parse_citation_with_config(line, &self.config)
    }

    /// Read a citation list from disk. Undecodable bytes are replaced rather
    /// than failing the whole file.
    pub fn extract_from_path(&self, path: &Path) -> Result<ExtractionResult, ParsingError> {
        let bytes = std::fs::read(path)?;
        let text = String::from_utf8_lossy(&bytes);
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "read citation list");
        Ok(self.extract_from_str(&text))
    }

    /// Run the parser over every non-empty line of `text`.
    pub fn extract_from_str(&self, text: &str) -> ExtractionResult {
        let text = text.trim_start_matches('\u{feff}');
        // Lone `\r` (classic Mac) ends a line too.
        let text = text.replace("\r\n", "\n").replace('\r', "\n");

        let mut stats = SkipStats::default();
        let mut records = Vec::new();
        let mut rejections = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let line_no = idx + 1;
            stats.total_raw += 1;

            match self.parse_line(line) {
                ParsedCitation::Record(record) => {
                    if record.is_partial() {
                        stats.partial += 1;
                        tracing::debug!(
                            line = line_no,
                            excerpt = %refsift_core::excerpt(line, EXCERPT_CHARS),
                            "title or publication not delimited"
                        );
                    }
                    records.push(record);
                }
                ParsedCitation::Rejected(reason) => {
                    stats.record_rejection(reason);
                    let excerpt = refsift_core::excerpt(line, EXCERPT_CHARS);
                    tracing::debug!(line = line_no, %reason, %excerpt, "skipping citation");
                    rejections.push(Rejection {
                        line: line_no,
                        reason,
                        excerpt,
                    });
                }
            }
        }

        tracing::info!(
            lines = stats.total_raw,
            records = records.len(),
            partial = stats.partial,
            rejected = rejections.len(),
            "citation list processed"
        );

        ExtractionResult {
            records,
            rejections,
            skip_stats: stats,
        }
    }
}
