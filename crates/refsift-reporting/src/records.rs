//! The record CSV format: header `Author,Title,Year,Publication,DOI`, every
//! field quoted.

use std::io::{Read, Write};
use std::path::Path;

use refsift_core::CitationRecord;

use crate::ReportingError;

/// Column order of the record CSV.
pub const HEADERS: [&str; 5] = ["Author", "Title", "Year", "Publication", "DOI"];

/// Write `records` as quoted CSV, header first.
pub fn write_records<W: Write>(writer: W, records: &[CitationRecord]) -> Result<(), ReportingError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .has_headers(false)
        .from_writer(writer);

    // Written explicitly so an empty table still gets its header row.
    csv_writer.write_record(HEADERS)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write `records` to `path`, creating parent directories as needed.
pub fn write_records_to_path(path: &Path, records: &[CitationRecord]) -> Result<(), ReportingError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_records(std::io::BufWriter::new(file), records)?;
    tracing::info!(path = %path.display(), records = records.len(), "wrote records");
    Ok(())
}

/// Read a record CSV. Columns are matched by header name, so column order
/// does not matter; a missing column is an error.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<CitationRecord>, ReportingError> {
    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);
    let records = csv_reader
        .deserialize::<CitationRecord>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

pub fn read_records_from_path(path: &Path) -> Result<Vec<CitationRecord>, ReportingError> {
    let file = std::fs::File::open(path)?;
    read_records(std::io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str) -> CitationRecord {
        CitationRecord {
            author: "Smith, J".into(),
            title: title.into(),
            year: "2020".into(),
            publication: "Venue".into(),
            doi: "https://doi.org/10.1/x".into(),
        }
    }

    #[test]
    fn test_write_quotes_every_field() {
        let mut out = Vec::new();
        write_records(&mut out, &[record("A Study")]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "\"Author\",\"Title\",\"Year\",\"Publication\",\"DOI\"\n\
             \"Smith, J\",\"A Study\",\"2020\",\"Venue\",\"https://doi.org/10.1/x\"\n"
        );
    }

    #[test]
    fn test_write_empty_table_has_header() {
        let mut out = Vec::new();
        write_records(&mut out, &[]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\"Author\",\"Title\",\"Year\",\"Publication\",\"DOI\"\n"
        );
    }

    #[test]
    fn test_embedded_quotes_escaped() {
        let mut out = Vec::new();
        write_records(&mut out, &[record(r#"The "Best" Study"#)]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(r#""The ""Best"" Study""#));
    }

    #[test]
    fn test_read_reordered_columns() {
        let text = "DOI,Title,Author,Year,Publication\nd,t,a,y,p\n";
        let records = read_records(text.as_bytes()).unwrap();
        assert_eq!(records[0].author, "a");
        assert_eq!(records[0].doi, "d");
    }

    #[test]
    fn test_read_missing_column_is_error() {
        let text = "Author,Title\na,t\n";
        assert!(read_records(text.as_bytes()).is_err());
    }

    #[test]
    fn test_write_to_nested_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result").join("out.csv");
        write_records_to_path(&path, &[record("T")]).unwrap();
        let back = read_records_from_path(&path).unwrap();
        assert_eq!(back, vec![record("T")]);
    }
}
