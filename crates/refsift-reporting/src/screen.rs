use refsift_core::CitationRecord;

/// Topics of the spectral super-resolution literature survey.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "deep learning super-resolution",
    "deep learning super resolution",
    "signal reconstruction",
    "super-resolution",
    "super resolution",
    "spectral resolution",
    "low-resolution spectra",
    "low resolution",
    "resolution enhancement",
    "astronomical spectra",
    "high resolution reconstruction",
    "stellar classification",
    "feature extraction",
    "stellar spectroscopy",
    "information recovery",
    "spectral line detection",
    "astronomical data processing",
    "spectral analysis",
    "astronomical parameter prediction",
];

/// Case-insensitive title screening against a keyword list.
#[derive(Debug, Clone)]
pub struct KeywordScreen {
    keywords: Vec<String>,
}

impl Default for KeywordScreen {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS.iter().copied())
    }
}

impl KeywordScreen {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// True if `title` contains any keyword.
    pub fn matches(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        self.keywords.iter().any(|k| title.contains(k.as_str()))
    }

    /// Records whose title matches, in input order.
    pub fn screen(&self, records: &[CitationRecord]) -> Vec<CitationRecord> {
        let kept: Vec<CitationRecord> = records
            .iter()
            .filter(|r| self.matches(&r.title))
            .cloned()
            .collect();
        tracing::info!(
            total = records.len(),
            kept = kept.len(),
            keywords = self.keywords.len(),
            "screened titles"
        );
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keywords() {
        let screen = KeywordScreen::default();
        assert_eq!(screen.keywords().len(), 19);
        assert!(screen.matches("Deep Learning Super-Resolution of LAMOST Spectra"));
        assert!(screen.matches("A survey of SPECTRAL ANALYSIS methods"));
        assert!(!screen.matches("Graph neural networks for recommendation"));
    }

    #[test]
    fn test_custom_keywords() {
        let screen = KeywordScreen::new(["Transformer", ""]);
        assert_eq!(screen.keywords(), &["transformer".to_string()]);
        assert!(screen.matches("Vision transformers at scale"));
    }

    #[test]
    fn test_screen_records() {
        let records = vec![
            CitationRecord {
                title: "Stellar classification with CNNs".into(),
                ..Default::default()
            },
            CitationRecord {
                title: "Unrelated".into(),
                ..Default::default()
            },
        ];
        let kept = KeywordScreen::default().screen(&records);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title, "Stellar classification with CNNs");
    }
}
