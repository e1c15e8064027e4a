use csv::StringRecord;

use refsift_core::CitationRecord;

const DEFAULT_TITLE_IDX: usize = 0;
const DEFAULT_AUTHOR_IDX: usize = 1;
const DEFAULT_PUBLICATION_IDX: usize = 3;

/// Column positions of the record fields in a CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub title: usize,
    pub author: usize,
    pub publication: usize,
    pub doi: Option<usize>,
    pub year: Option<usize>,
}

impl ColumnMap {
    /// Locate columns by header name. Per header, the first matching rule wins:
    ///
    /// 1. "title" and "document" → title
    /// 2. "authors" but not "affiliation" → author
    /// 3. "publication" and "title" → publication
    /// 4. "doi" → DOI
    /// 5. "year" → year
    ///
    /// When a field matches several headers the last one wins. Title, author
    /// and publication fall back to columns 0, 1 and 3.
    pub fn detect<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        let mut title = None;
        let mut author = None;
        let mut publication = None;
        let mut doi = None;
        let mut year = None;

        for (i, header) in headers.into_iter().enumerate() {
            let h = header.trim().to_lowercase();
            if h.contains("title") && h.contains("document") {
                title = Some(i);
            } else if h.contains("authors") && !h.contains("affiliation") {
                author = Some(i);
            } else if h.contains("publication") && h.contains("title") {
                publication = Some(i);
            } else if h.contains("doi") {
                doi = Some(i);
            } else if h.contains("year") {
                year = Some(i);
            }
        }

        let title = title.unwrap_or_else(|| {
            tracing::debug!(column = DEFAULT_TITLE_IDX, "no title header, using default");
            DEFAULT_TITLE_IDX
        });
        let author = author.unwrap_or_else(|| {
            tracing::debug!(column = DEFAULT_AUTHOR_IDX, "no authors header, using default");
            DEFAULT_AUTHOR_IDX
        });
        let publication = publication.unwrap_or_else(|| {
            tracing::debug!(
                column = DEFAULT_PUBLICATION_IDX,
                "no publication header, using default"
            );
            DEFAULT_PUBLICATION_IDX
        });

        Self {
            title,
            author,
            publication,
            doi,
            year,
        }
    }

    /// Minimum number of fields a row needs to carry title, author and publication.
    pub fn min_row_len(&self) -> usize {
        self.title.max(self.author).max(self.publication) + 1
    }

    /// Build a record from one data row, or `None` if the row is too short.
    pub fn record_from_row(&self, row: &StringRecord) -> Option<CitationRecord> {
        if row.len() < self.min_row_len() {
            return None;
        }
        let field = |idx: usize| row.get(idx).map(str::trim).unwrap_or_default().to_string();
        let optional = |idx: Option<usize>| idx.map(field).unwrap_or_default();

        Some(CitationRecord {
            author: field(self.author),
            title: field(self.title),
            year: optional(self.year),
            publication: field(self.publication),
            doi: normalize_doi(&optional(self.doi)),
        })
    }
}

/// Prefix bare DOIs with `https://doi.org/`; leave DOI URLs and empty values alone.
pub fn normalize_doi(doi: &str) -> String {
    if doi.is_empty() || doi.starts_with("http://doi.org/") || doi.starts_with("https://doi.org/")
    {
        doi.to_string()
    } else {
        format!("https://doi.org/{doi}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_ieee_xplore_headers() {
        let headers = [
            "Document Title",
            "Authors",
            "Author Affiliations",
            "Publication Title",
            "Date Added To Xplore",
            "Publication Year",
            "DOI",
        ];
        let map = ColumnMap::detect(headers);
        assert_eq!(map.title, 0);
        assert_eq!(map.author, 1);
        assert_eq!(map.publication, 3);
        assert_eq!(map.year, Some(5));
        assert_eq!(map.doi, Some(6));
    }

    #[test]
    fn test_detect_defaults() {
        let map = ColumnMap::detect(["a", "b", "c", "d"]);
        assert_eq!(map.title, 0);
        assert_eq!(map.author, 1);
        assert_eq!(map.publication, 3);
        assert_eq!(map.doi, None);
        assert_eq!(map.year, None);
        assert_eq!(map.min_row_len(), 4);
    }

    #[test]
    fn test_detect_last_match_wins() {
        let map = ColumnMap::detect(["DOI", "Document Title", "DOI Link"]);
        assert_eq!(map.doi, Some(2));
    }

    #[test]
    fn test_record_from_row_trims_and_prefixes() {
        let map = ColumnMap::detect(["Document Title", "Authors", "Publication Title", "DOI"]);
        let row = StringRecord::from(vec![" T ", " A ", " P ", " 10.1/x "]);
        let record = map.record_from_row(&row).unwrap();
        assert_eq!(record.title, "T");
        assert_eq!(record.author, "A");
        assert_eq!(record.publication, "P");
        assert_eq!(record.doi, "https://doi.org/10.1/x");
    }

    #[test]
    fn test_record_from_short_row() {
        let map = ColumnMap::detect(["Document Title", "Authors", "Publication Title"]);
        assert!(map.record_from_row(&StringRecord::from(vec!["T", "A"])).is_none());
    }

    #[test]
    fn test_normalize_doi() {
        assert_eq!(normalize_doi(""), "");
        assert_eq!(normalize_doi("http://doi.org/10.1/x"), "http://doi.org/10.1/x");
        assert_eq!(normalize_doi("https://doi.org/10.1/x"), "https://doi.org/10.1/x");
        assert_eq!(normalize_doi("10.1/x"), "https://doi.org/10.1/x");
    }
}
