//! Citation line parser for ACM/IEEE-style references.
//!
//! The targeted skeleton is
//! `Author. Year. Title. Venue. Publisher. Pages. DOI`. The DOI URL and the
//! year are treated as reliable anchors; title and publication are cut out
//! between periods on a best-effort basis and left empty when the periods
//! are not there.
//!
//! Known fragility: the publication starts after the *third* period following
//! the year, which assumes a single venue sentence between title and
//! publisher. Abbreviated venue names ("Proc. Conf.") shift that boundary.

use regex::Regex;

use crate::anchors;
use crate::config::CitationParsingConfig;
use refsift_core::{CitationRecord, RejectReason};

/// Outcome of parsing one citation line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCitation {
    Record(CitationRecord),
    Rejected(RejectReason),
}

impl ParsedCitation {
    pub fn record(&self) -> Option<&CitationRecord> {
        match self {
            ParsedCitation::Record(r) => Some(r),
            ParsedCitation::Rejected(_) => None,
        }
    }
}

/// A way of finding where the publication segment ends, given the window
/// after the year and the offset just past the third period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryStrategy {
    /// Publisher name found after the start: end at the first page range from
    /// the marker on, else at the DOI, else at the end of the window.
    PublisherMarker(String),
    /// End at the first page range between the start and the DOI, else at
    /// the DOI, else at the end of the window.
    PageRangeBeforeDoi,
}

impl BoundaryStrategy {
    fn boundary(&self, window: &str, start: usize, doi: &str, page_re: &Regex) -> Option<usize> {
        match self {
            BoundaryStrategy::PublisherMarker(marker) => {
                let marker_pos = start + window[start..].find(marker.as_str())?;
                let end = anchors::find_page_range(&window[marker_pos..], page_re)
                    .map(|p| marker_pos + p)
                    .or_else(|| window.find(doi))
                    .unwrap_or(window.len());
                Some(end)
            }
            BoundaryStrategy::PageRangeBeforeDoi => {
                let end = match window.find(doi) {
                    Some(doi_pos) if doi_pos >= start => {
                        anchors::find_page_range(&window[start..doi_pos], page_re)
                            .map(|p| start + p)
                            .unwrap_or(doi_pos)
                    }
                    _ => window.len(),
                };
                Some(end)
            }
        }
    }
}

/// Parse a single trimmed, non-empty citation line with the default config.
pub fn parse_citation(line: &str) -> ParsedCitation {
    parse_citation_with_config(line, &CitationParsingConfig::default())
}

/// Config-aware version of [`parse_citation`].
pub(crate) fn parse_citation_with_config(
    line: &str,
    config: &CitationParsingConfig,
) -> ParsedCitation {
    if config
        .provisional_markers()
        .iter()
        .any(|m| line.contains(m.as_str()))
    {
        return ParsedCitation::Rejected(RejectReason::ProvisionalEntry);
    }

    let Some(doi) = anchors::find_doi_url(line) else {
        return ParsedCitation::Rejected(RejectReason::MissingDoi);
    };
    let Some(year) = anchors::find_year(line) else {
        return ParsedCitation::Rejected(RejectReason::MissingYear);
    };

    let author = clean_author(&line[..year.start()]);
    let after_year = line[year.end()..].trim();
    let (title, publication) =
        split_title_and_publication(after_year, doi.as_str(), config).unwrap_or_default();

    ParsedCitation::Record(CitationRecord {
        author,
        title,
        year: year.as_str().to_string(),
        publication,
        doi: doi.as_str().to_string(),
    })
}

fn clean_author(text: &str) -> String {
    text.trim()
        .trim_end_matches(|c: char| c == '.' || c == ',' || c.is_whitespace())
        .to_string()
}

/// Title and publication from the text after the year.
///
/// Periods inside the DOI URL never count as delimiters. Returns `None` when
/// fewer than two periods precede the DOI.
fn split_title_and_publication(
    window: &str,
    doi: &str,
    config: &CitationParsingConfig,
) -> Option<(String, String)> {
    let delimited = match window.find(doi) {
        Some(doi_pos) => &window[..doi_pos],
        None => window,
    };
    let mut periods = delimited.match_indices('.').map(|(i, _)| i);
    let first = periods.next()?;
    let second = periods.next()?;

    let title = window[first + 1..second].trim().to_string();

    let publication = match periods.next() {
        None => publication_after_title(&window[second + 1..], doi, config.page_range_re()),
        Some(third) => {
            let start = third + 1;
            let end = config
                .boundary_strategies()
                .iter()
                .find_map(|s| s.boundary(window, start, doi, config.page_range_re()))
                .unwrap_or(window.len());
            &window[start..end]
        }
    };

    Some((title, trim_publication(publication)))
}

/// Publication when no venue sentence follows the title: everything up to
/// the page range or DOI.
fn publication_after_title<'a>(remaining: &'a str, doi: &str, page_re: &Regex) -> &'a str {
    match remaining.find(doi) {
        Some(doi_pos) => {
            let before = &remaining[..doi_pos];
            match anchors::find_page_range(before, page_re) {
                Some(p) => &before[..p],
                None => before,
            }
        }
        None => remaining,
    }
}

fn trim_publication(text: &str) -> String {
    text.trim_matches(|c: char| c == '.' || c == ',' || c.is_whitespace())
        .to_string()
}
