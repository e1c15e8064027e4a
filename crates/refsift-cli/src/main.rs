use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use refsift_core::config_file::{self, ConfigFile};
use refsift_ingest::InputFormat;
use refsift_parsing::{CitationExtractor, CitationParsingConfig, CitationParsingConfigBuilder};
use refsift_reporting::KeywordScreen;

mod output;

use output::ColorMode;

const DEFAULT_MERGE_DIR: &str = "spec-csv";
const DEFAULT_COMBINED_OUTPUT: &str = "result/combined_paper.csv";
const DEFAULT_DUPLICATE_OUTPUT: &str = "result/duplicate_dois.csv";
const DEFAULT_SCREENING_OUTPUT: &str = "result/Screening.csv";

/// Reference sifter - extract, merge and screen bibliographic records
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to a TOML config file (replaces .refsift.toml and the platform config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract records from a citation list (.txt), CSV export (.csv) or ADS BibTeX file (.bib)
    Extract {
        /// Path to the input file
        input: PathBuf,

        /// Path to the output CSV (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Input format: txt, csv or bib (default: from the file extension)
        #[arg(long)]
        format: Option<String>,

        /// Print extracted records and rejections instead of writing CSV
        #[arg(long)]
        dry_run: bool,
    },

    /// Merge every record CSV in a directory and report duplicate DOIs
    Merge {
        /// Directory containing record CSVs
        dir: Option<PathBuf>,

        /// Path for the combined table
        #[arg(long)]
        combined: Option<PathBuf>,

        /// Path for the rows whose DOI occurs more than once
        #[arg(long)]
        duplicates: Option<PathBuf>,
    },

    /// Keep only records whose title contains one of the keywords
    Screen {
        /// Record CSV to screen
        input: Option<PathBuf>,

        /// Path for the screened table
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keyword to match (repeatable; replaces the configured list)
        #[arg(short = 'k', long = "keyword")]
        keywords: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let config = match cli.config {
        Some(ref path) => config_file::load_from_path(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?,
        None => config_file::load_config(),
    };
    tracing::debug!(?config, "configuration loaded");

    let color = ColorMode(!cli.no_color && std::io::stderr().is_terminal());

    match cli.command {
        Command::Extract {
            input,
            output,
            format,
            dry_run,
        } => extract(&input, output.as_deref(), format.as_deref(), dry_run, &config, color),
        Command::Merge {
            dir,
            combined,
            duplicates,
        } => merge(dir, combined, duplicates, &config, color),
        Command::Screen {
            input,
            output,
            keywords,
        } => screen(input, output, keywords, &config, color),
    }
}

/// Log level priority: `RUST_LOG` > `--quiet` > `--verbose` > warn.
fn default_log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_log_level(verbose, quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parsing_config(config: &ConfigFile) -> anyhow::Result<CitationParsingConfig> {
    let mut builder = CitationParsingConfigBuilder::new();
    if let Some(parsing) = &config.parsing {
        if let Some(markers) = &parsing.publisher_markers {
            builder = builder.set_publisher_markers(markers.clone());
        }
        if let Some(markers) = &parsing.provisional_markers {
            builder = builder.set_provisional_markers(markers.clone());
        }
    }
    Ok(builder.build()?)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn extract(
    input: &Path,
    output: Option<&Path>,
    format: Option<&str>,
    dry_run: bool,
    config: &ConfigFile,
    color: ColorMode,
) -> anyhow::Result<()> {
    if !input.exists() {
        anyhow::bail!("File not found: {}", input.display());
    }

    let format = match format {
        Some(f) => f.parse::<InputFormat>()?,
        None => InputFormat::from_path(input)?,
    };
    let extractor = CitationExtractor::with_config(parsing_config(config)?);
    let extraction = refsift_ingest::extract_records(input, format, &extractor)
        .with_context(|| format!("Failed to extract records from {}", input.display()))?;

    let file_name = display_name(input);

    if dry_run {
        let stdout = std::io::stdout();
        let dry_color = ColorMode(color.enabled() && stdout.is_terminal());
        return Ok(output::print_dry_run(
            &mut stdout.lock(),
            &file_name,
            &extraction,
            dry_color,
        )?);
    }

    if extraction.records.is_empty() {
        anyhow::bail!(
            "No valid entries found in {}; no output written",
            input.display()
        );
    }

    match output {
        Some(path) => refsift_reporting::write_records_to_path(path, &extraction.records)?,
        None => refsift_reporting::write_records(std::io::stdout().lock(), &extraction.records)?,
    }

    let mut stderr = std::io::stderr();
    output::print_extraction_summary(&mut stderr, &file_name, format, &extraction, color)?;
    if let Some(path) = output {
        writeln!(stderr, "Wrote {}", path.display())?;
    }
    Ok(())
}

fn merge(
    dir: Option<PathBuf>,
    combined: Option<PathBuf>,
    duplicates: Option<PathBuf>,
    config: &ConfigFile,
    color: ColorMode,
) -> anyhow::Result<()> {
    let merge_config = config.merge.clone().unwrap_or_default();
    let dir = dir
        .or_else(|| merge_config.input_dir.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MERGE_DIR));
    let combined = combined
        .or_else(|| merge_config.combined_output.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_COMBINED_OUTPUT));
    let duplicates = duplicates
        .or_else(|| merge_config.duplicate_output.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DUPLICATE_OUTPUT));

    if !dir.is_dir() {
        anyhow::bail!("Directory not found: {}", dir.display());
    }

    let merged = refsift_reporting::merge_csv_dir(&dir)?;
    refsift_reporting::write_records_to_path(&combined, &merged.records)?;

    let dups = refsift_reporting::duplicate_dois(&merged.records);
    if !dups.is_empty() {
        refsift_reporting::write_records_to_path(&duplicates, &dups)?;
    }

    output::print_merge_summary(
        &mut std::io::stderr(),
        &merged,
        &combined,
        dups.len(),
        &duplicates,
        color,
    )?;
    Ok(())
}

fn screen(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    keywords: Vec<String>,
    config: &ConfigFile,
    color: ColorMode,
) -> anyhow::Result<()> {
    let input = input.unwrap_or_else(|| PathBuf::from(DEFAULT_COMBINED_OUTPUT));
    let output = output.unwrap_or_else(|| PathBuf::from(DEFAULT_SCREENING_OUTPUT));

    let configured = config.screening.as_ref().and_then(|s| s.keywords.as_ref());
    let screen = if !keywords.is_empty() {
        KeywordScreen::new(&keywords)
    } else if let Some(keywords) = configured {
        KeywordScreen::new(keywords)
    } else {
        KeywordScreen::default()
    };

    let records = refsift_reporting::read_records_from_path(&input)
        .with_context(|| format!("Failed to read records from {}", input.display()))?;
    let kept = screen.screen(&records);
    refsift_reporting::write_records_to_path(&output, &kept)?;

    output::print_screen_summary(&mut std::io::stderr(), records.len(), kept.len(), &output, color)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use refsift_core::config_file::ParsingConfig;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_extract_arguments() {
        let cli = Cli::parse_from(["refsift", "-vv", "extract", "refs.txt", "-o", "out.csv"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Extract { input, output, .. } => {
                assert_eq!(input, PathBuf::from("refs.txt"));
                assert_eq!(output, Some(PathBuf::from("out.csv")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_repeated_keywords() {
        let cli = Cli::parse_from(["refsift", "screen", "-k", "lensing", "--keyword", "quasar"]);
        match cli.command {
            Command::Screen { keywords, .. } => assert_eq!(keywords, vec!["lensing", "quasar"]),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn log_level_selection() {
        assert_eq!(default_log_level(0, false), "warn");
        assert_eq!(default_log_level(1, false), "info");
        assert_eq!(default_log_level(5, false), "trace");
        assert_eq!(default_log_level(0, true), "error");
    }

    #[test]
    fn parsing_config_from_file() {
        let config = ConfigFile {
            parsing: Some(ParsingConfig {
                publisher_markers: Some(vec!["Springer".to_string()]),
                provisional_markers: None,
            }),
            ..Default::default()
        };
        let parsing = parsing_config(&config).unwrap();
        assert_eq!(parsing.publisher_markers(), vec!["Springer"]);
        assert_eq!(parsing.provisional_markers(), vec!["Just Accepted"]);
    }
}
