//! High-precision anchors inside a citation line: the DOI URL, the
//! publication year, and page ranges.

use once_cell::sync::Lazy;
use regex::{Match, Regex};

/// Default page-range pattern: `12-20` or `101–110` (en dash).
pub const DEFAULT_PAGE_RANGE_PATTERN: &str = r"\d+[-–]\d+";

pub(crate) static PAGE_RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_PAGE_RANGE_PATTERN).unwrap());

/// Find the first `http(s)://doi.org/...` URL, matched verbatim up to the
/// next whitespace.
pub fn find_doi_url(line: &str) -> Option<Match<'_>> {
    static DOI_URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://doi\.org/\S+").unwrap());
    DOI_URL_RE.find(line)
}

/// Find the first standalone 4-digit year in 1900..=2099.
///
/// Word boundaries keep digit runs inside DOIs and page numbers
/// (`10.1145/3442381`, `20201-20210`) from matching.
pub fn find_year(line: &str) -> Option<Match<'_>> {
    static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());
    YEAR_RE.find(line)
}

/// Byte offset of the first page range in `text`.
pub fn find_page_range(text: &str, page_range_re: &Regex) -> Option<usize> {
    page_range_re.find(text).map(|m| m.start())
}
