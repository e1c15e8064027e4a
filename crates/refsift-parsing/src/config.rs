use regex::Regex;

use crate::citation::BoundaryStrategy;

/// Publisher markers tried, in order, when delimiting the publication segment.
pub const DEFAULT_PUBLISHER_MARKERS: &[&str] = &["Association for Computing Machinery", "IEEE"];

/// Substrings that mark a citation as provisional (not yet published).
pub const DEFAULT_PROVISIONAL_MARKERS: &[&str] = &["Just Accepted"];

/// Controls how a list of values is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }
}

fn owned(defaults: &[&str]) -> Vec<String> {
    defaults.iter().map(|s| s.to_string()).collect()
}

/// Empty markers would match every line.
fn non_empty(markers: Vec<String>) -> Vec<String> {
    markers.into_iter().filter(|m| !m.is_empty()).collect()
}

/// Configuration for the citation line parser.
///
/// `page_range_re` is `None` for the built-in `\d+[-–]\d+`.
/// Use [`CitationParsingConfigBuilder`] to construct with string patterns.
#[derive(Debug, Clone, Default)]
pub struct CitationParsingConfig {
    pub(crate) publisher_markers: ListOverride<String>,
    pub(crate) provisional_markers: ListOverride<String>,
    pub(crate) page_range_re: Option<Regex>,
}

impl CitationParsingConfig {
    /// Resolved publisher markers, in the order they are tried.
    pub fn publisher_markers(&self) -> Vec<String> {
        non_empty(
            self.publisher_markers
                .resolve(&owned(DEFAULT_PUBLISHER_MARKERS)),
        )
    }

    pub fn provisional_markers(&self) -> Vec<String> {
        non_empty(
            self.provisional_markers
                .resolve(&owned(DEFAULT_PROVISIONAL_MARKERS)),
        )
    }

    /// Publication boundary strategies: one per publisher marker, then the
    /// page-range/DOI fallback, which always yields a boundary.
    pub fn boundary_strategies(&self) -> Vec<BoundaryStrategy> {
        self.publisher_markers()
            .into_iter()
            .map(BoundaryStrategy::PublisherMarker)
            .chain(std::iter::once(BoundaryStrategy::PageRangeBeforeDoi))
            .collect()
    }

    pub(crate) fn page_range_re(&self) -> &Regex {
        self.page_range_re
            .as_ref()
            .unwrap_or(&crate::anchors::PAGE_RANGE_RE)
    }
}

/// Builder for [`CitationParsingConfig`].
///
/// Accepts string patterns that are compiled to `Regex` in [`build()`](Self::build).
/// Fails fast with `regex::Error` if any pattern is invalid.
#[derive(Debug, Clone, Default)]
pub struct CitationParsingConfigBuilder {
    publisher_markers: ListOverride<String>,
    provisional_markers: ListOverride<String>,
    page_range_re: Option<String>,
}

impl CitationParsingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Publisher markers ──

    pub fn set_publisher_markers(mut self, markers: Vec<String>) -> Self {
        self.publisher_markers = ListOverride::Replace(markers);
        self
    }

    pub fn add_publisher_marker(mut self, marker: String) -> Self {
        match &mut self.publisher_markers {
            ListOverride::Extend(v) => v.push(marker),
            _ => self.publisher_markers = ListOverride::Extend(vec![marker]),
        }
        self
    }

    // ── Provisional markers ──

    pub fn set_provisional_markers(mut self, markers: Vec<String>) -> Self {
        self.provisional_markers = ListOverride::Replace(markers);
        self
    }

    pub fn add_provisional_marker(mut self, marker: String) -> Self {
        match &mut self.provisional_markers {
            ListOverride::Extend(v) => v.push(marker),
            _ => self.provisional_markers = ListOverride::Extend(vec![marker]),
        }
        self
    }

    // ── Page range ──

    pub fn page_range_regex(mut self, pattern: &str) -> Self {
        self.page_range_re = Some(pattern.to_string());
        self
    }

    /// Compile all string patterns into regexes and produce a [`CitationParsingConfig`].
    pub fn build(self) -> Result<CitationParsingConfig, regex::Error> {
        Ok(CitationParsingConfig {
            publisher_markers: self.publisher_markers,
            provisional_markers: self.provisional_markers,
            page_range_re: self.page_range_re.map(|p| Regex::new(&p)).transpose()?,
        })
    }
}
