use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use thiserror::Error;

use refsift_core::{CitationRecord, ExtractionResult, SkipStats};

const UNKNOWN: &str = "Unknown";

#[derive(Error, Debug)]
pub enum BibError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no BibTeX entries found")]
    NoEntries,
}

/// AASTeX journal macros as exported by NASA ADS.
static JOURNAL_MACROS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("\\mnras", "Monthly Notices of the Royal Astronomical Society"),
        ("\\apj", "The Astrophysical Journal"),
        ("\\aap", "Astronomy and Astrophysics"),
        ("\\aj", "The Astronomical Journal"),
    ])
});

/// Extract records from a NASA ADS BibTeX export.
///
/// ADS writes one `field = {value},` per line, which is all this reader
/// understands: entries open on a line starting with `@` and close on a
/// line that is exactly `}`.
pub fn extract_records_from_ads_bib(path: &Path) -> Result<ExtractionResult, BibError> {
    let bytes = std::fs::read(path)?;
    extract_records_from_ads_bib_str(&String::from_utf8_lossy(&bytes))
}

/// Parse ADS BibTeX content from a string (useful for testing).
pub fn extract_records_from_ads_bib_str(content: &str) -> Result<ExtractionResult, BibError> {
    let entries = scan_entries(content);
    if entries.is_empty() {
        return Err(BibError::NoEntries);
    }

    let records: Vec<CitationRecord> = entries.iter().map(record_from_fields).collect();
    tracing::info!(entries = records.len(), "BibTeX conversion complete");

    Ok(ExtractionResult {
        skip_stats: SkipStats {
            total_raw: records.len(),
            ..Default::default()
        },
        records,
        rejections: Vec::new(),
    })
}

/// Collect the `field = value` pairs of every entry.
fn scan_entries(content: &str) -> Vec<HashMap<String, String>> {
    let mut entries = Vec::new();
    let mut current: HashMap<String, String> = HashMap::new();
    let mut in_entry = false;

    for line in content.lines() {
        let line = line.trim();

        if line.starts_with('@') {
            if in_entry && !current.is_empty() {
                entries.push(std::mem::take(&mut current));
            }
            current.clear();
            in_entry = true;
            continue;
        }

        if line == "}" && in_entry {
            if !current.is_empty() {
                entries.push(std::mem::take(&mut current));
            }
            in_entry = false;
            continue;
        }

        if in_entry && let Some((field, value)) = line.split_once('=') {
            current.insert(field.trim().to_string(), clean_value(value.trim()).to_string());
        }
    }

    // An entry left open at EOF is dropped.
    if in_entry && !current.is_empty() {
        tracing::debug!(fields = current.len(), "unterminated entry at end of input");
    }

    entries
}

/// Drop a trailing comma and one layer of `{}` or `""`.
fn clean_value(value: &str) -> &str {
    let value = value.strip_suffix(',').unwrap_or(value);
    if let Some(inner) = value.strip_prefix('{').and_then(|v| v.strip_suffix('}')) {
        inner
    } else if let Some(inner) = value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        inner
    } else {
        value
    }
}

fn strip_braces(text: &str) -> String {
    text.replace(['{', '}'], "")
}

fn record_from_fields(fields: &HashMap<String, String>) -> CitationRecord {
    let author = fields
        .get("author")
        .map(|a| strip_braces(a))
        .unwrap_or_else(|| UNKNOWN.to_string());

    let title = fields
        .get("title")
        .map(|t| {
            let t = strip_braces(t);
            let t = t.strip_prefix('"').unwrap_or(&t);
            t.strip_suffix('"').unwrap_or(t).to_string()
        })
        .unwrap_or_else(|| UNKNOWN.to_string());

    let year = fields
        .get("year")
        .cloned()
        .unwrap_or_else(|| UNKNOWN.to_string());

    let publication = fields
        .get("journal")
        .map(|j| expand_journal(j))
        .unwrap_or_else(|| UNKNOWN.to_string());

    let doi = fields
        .get("doi")
        .map(|d| d.trim())
        .filter(|d| !d.is_empty())
        .map(|d| format!("https://doi.org/{d}"))
        .unwrap_or_default();

    CitationRecord {
        author,
        title,
        year,
        publication,
        doi,
    }
}

/// Expand known journal macros; unknown macros just lose the backslash.
fn expand_journal(journal: &str) -> String {
    let expanded = if journal.starts_with('\\') {
        match JOURNAL_MACROS.get(journal) {
            Some(name) => name.to_string(),
            None => journal.replace('\\', ""),
        }
    } else {
        journal.to_string()
    };
    strip_braces(&expanded)
}
