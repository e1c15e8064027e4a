use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub parsing: Option<ParsingConfig>,
    pub merge: Option<MergeConfig>,
    pub screening: Option<ScreeningConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsingConfig {
    /// Publisher markers tried in order when delimiting the publication.
    pub publisher_markers: Option<Vec<String>>,
    /// Substrings that mark a line as a provisional entry.
    pub provisional_markers: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeConfig {
    pub input_dir: Option<String>,
    pub combined_output: Option<String>,
    pub duplicate_output: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreeningConfig {
    pub keywords: Option<Vec<String>>,
}

/// Platform config directory path: `<config_dir>/refsift/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("refsift").join("config.toml"))
}

/// Load config by cascading CWD `.refsift.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".refsift.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        parsing: Some(ParsingConfig {
            publisher_markers: overlay
                .parsing
                .as_ref()
                .and_then(|p| p.publisher_markers.clone())
                .or_else(|| base.parsing.as_ref().and_then(|p| p.publisher_markers.clone())),
            provisional_markers: overlay
                .parsing
                .as_ref()
                .and_then(|p| p.provisional_markers.clone())
                .or_else(|| {
                    base.parsing
                        .as_ref()
                        .and_then(|p| p.provisional_markers.clone())
                }),
        }),
        merge: Some(MergeConfig {
            input_dir: overlay
                .merge
                .as_ref()
                .and_then(|m| m.input_dir.clone())
                .or_else(|| base.merge.as_ref().and_then(|m| m.input_dir.clone())),
            combined_output: overlay
                .merge
                .as_ref()
                .and_then(|m| m.combined_output.clone())
                .or_else(|| base.merge.as_ref().and_then(|m| m.combined_output.clone())),
            duplicate_output: overlay
                .merge
                .as_ref()
                .and_then(|m| m.duplicate_output.clone())
                .or_else(|| base.merge.as_ref().and_then(|m| m.duplicate_output.clone())),
        }),
        screening: Some(ScreeningConfig {
            keywords: overlay
                .screening
                .as_ref()
                .and_then(|s| s.keywords.clone())
                .or_else(|| base.screening.as_ref().and_then(|s| s.keywords.clone())),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_round_trip_toml() {
        let config = ConfigFile {
            screening: Some(ScreeningConfig {
                keywords: Some(vec!["spectral analysis".to_string()]),
            }),
            ..Default::default()
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: ConfigFile = toml::from_str(&toml_str).unwrap();
        assert_eq!(
            parsed.screening.unwrap().keywords.unwrap(),
            vec!["spectral analysis".to_string()]
        );
    }

    #[test]
    fn partial_section_deserializes() {
        let toml_str = "[merge]\ninput_dir = \"exports\"\n";
        let parsed: ConfigFile = toml::from_str(toml_str).unwrap();
        let merge = parsed.merge.unwrap();
        assert_eq!(merge.input_dir.as_deref(), Some("exports"));
        assert!(merge.combined_output.is_none());
        assert!(parsed.parsing.is_none());
    }

    #[test]
    fn merge_overlay_wins() {
        let base = ConfigFile {
            parsing: Some(ParsingConfig {
                publisher_markers: Some(vec!["IEEE".to_string()]),
                ..Default::default()
            }),
            ..Default::default()
        };
        let overlay = ConfigFile {
            parsing: Some(ParsingConfig {
                publisher_markers: Some(vec!["Springer".to_string()]),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge(base, overlay);
        assert_eq!(
            merged.parsing.unwrap().publisher_markers.unwrap(),
            vec!["Springer".to_string()]
        );
    }

    #[test]
    fn merge_base_preserved_when_overlay_absent() {
        let base = ConfigFile {
            merge: Some(MergeConfig {
                combined_output: Some("out/all.csv".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge(base, ConfigFile::default());
        assert_eq!(
            merged.merge.unwrap().combined_output.as_deref(),
            Some("out/all.csv")
        );
    }

    #[test]
    fn load_from_missing_path_is_none() {
        assert!(load_from_path(Path::new("/nonexistent/refsift.toml")).is_none());
    }
}
