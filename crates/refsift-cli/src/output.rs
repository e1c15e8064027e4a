use std::io::Write;
use std::path::Path;

use owo_colors::OwoColorize;
use refsift_core::{CitationRecord, ExtractionResult};
use refsift_ingest::InputFormat;
use refsift_reporting::MergeResult;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the extraction summary after a file has been converted.
pub fn print_extraction_summary(
    w: &mut dyn Write,
    file_name: &str,
    format: InputFormat,
    extraction: &ExtractionResult,
    color: ColorMode,
) -> std::io::Result<()> {
    let stats = &extraction.skip_stats;
    writeln!(w, "Extracted records from {} ({})", file_name, format)?;

    if color.enabled() {
        writeln!(
            w,
            "{} records from {} entries",
            extraction.records.len().to_string().green(),
            stats.total_raw
        )?;
    } else {
        writeln!(
            w,
            "{} records from {} entries",
            extraction.records.len(),
            stats.total_raw
        )?;
    }

    if stats.rejected() > 0 {
        let line = format!(
            "(Skipped {} provisional, {} without DOI, {} without year, {} short rows)",
            stats.provisional, stats.missing_doi, stats.missing_year, stats.short_row
        );
        if color.enabled() {
            writeln!(w, "{}", line.dimmed())?;
        } else {
            writeln!(w, "{}", line)?;
        }
    }

    if stats.partial > 0 {
        let line = format!(
            "{} records without a delimited title or publication",
            stats.partial
        );
        if color.enabled() {
            writeln!(w, "{}", line.yellow())?;
        } else {
            writeln!(w, "{}", line)?;
        }
    }
    Ok(())
}

/// Print every extracted record and rejection in human-readable form.
pub fn print_dry_run(
    w: &mut dyn Write,
    file_name: &str,
    extraction: &ExtractionResult,
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(
            w,
            "{} {} ({} entries, {} records)\n",
            "DRY RUN:".bold().cyan(),
            file_name.bold(),
            extraction.skip_stats.total_raw,
            extraction.records.len()
        )?;
    } else {
        writeln!(
            w,
            "DRY RUN: {} ({} entries, {} records)\n",
            file_name,
            extraction.skip_stats.total_raw,
            extraction.records.len()
        )?;
    }

    for (i, record) in extraction.records.iter().enumerate() {
        if color.enabled() {
            writeln!(w, "{}", format!("[{}]", i + 1).bold().yellow())?;
        } else {
            writeln!(w, "[{}]", i + 1)?;
        }
        print_record(w, record)?;
        if record.is_partial() {
            if color.enabled() {
                writeln!(w, "  {}", "PARTIAL".yellow())?;
            } else {
                writeln!(w, "  PARTIAL")?;
            }
        }
        writeln!(w)?;
    }

    for rejection in &extraction.rejections {
        let line = format!(
            "line {}: {} ({})",
            rejection.line, rejection.reason, rejection.excerpt
        );
        if color.enabled() {
            writeln!(w, "{} {}", "REJECTED".red(), line.dimmed())?;
        } else {
            writeln!(w, "REJECTED {}", line)?;
        }
    }

    if !extraction.rejections.is_empty() {
        writeln!(w)?;
    }
    writeln!(w, "Total: {} records", extraction.records.len())?;
    Ok(())
}

fn print_record(w: &mut dyn Write, record: &CitationRecord) -> std::io::Result<()> {
    let or_none = |s: &str| {
        if s.is_empty() {
            "(none)".to_string()
        } else {
            s.to_string()
        }
    };
    writeln!(w, "  Author:      {}", or_none(&record.author))?;
    writeln!(w, "  Title:       {}", or_none(&record.title))?;
    writeln!(w, "  Year:        {}", record.year)?;
    writeln!(w, "  Publication: {}", or_none(&record.publication))?;
    writeln!(w, "  DOI:         {}", or_none(&record.doi))?;
    Ok(())
}

pub fn print_merge_summary(
    w: &mut dyn Write,
    merged: &MergeResult,
    combined: &Path,
    duplicate_count: usize,
    duplicates: &Path,
    color: ColorMode,
) -> std::io::Result<()> {
    for file in &merged.files {
        writeln!(w, "Merged {}", file.display())?;
    }
    writeln!(
        w,
        "{} records written to {}",
        merged.records.len(),
        combined.display()
    )?;

    if duplicate_count == 0 {
        writeln!(w, "No duplicate DOIs found")?;
    } else {
        let line = format!(
            "{} rows with duplicate DOIs written to {}",
            duplicate_count,
            duplicates.display()
        );
        if color.enabled() {
            writeln!(w, "{}", line.yellow())?;
        } else {
            writeln!(w, "{}", line)?;
        }
    }
    Ok(())
}

pub fn print_screen_summary(
    w: &mut dyn Write,
    total: usize,
    kept: usize,
    output: &Path,
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(
            w,
            "Screening complete: {} of {} titles match",
            kept.to_string().green(),
            total
        )?;
    } else {
        writeln!(w, "Screening complete: {} of {} titles match", kept, total)?;
    }
    writeln!(w, "Results written to {}", output.display())?;
    Ok(())
}
