//! Labeled training corpus in CSV form.
//!
//! The first row is a header and is skipped. Each record is
//! `title,genre,summary`; a quoted summary may span several physical lines.
//! Unquoted commas after the genre belong to the summary.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use shelf_core::LabeledText;
use tracing::{debug, info};

use crate::error::IngestError;

/// Read and parse a corpus file.
pub fn parse_labeled_corpus(path: &Path) -> Result<Vec<LabeledText>, IngestError> {
    let file = File::open(path).map_err(|e| IngestError::io(path, e))?;
    let records = parse_labeled_reader(file)?;
    info!(path = %path.display(), records = records.len(), "Corpus parsed");
    Ok(records)
}

/// Parse corpus text. Records missing a genre or a summary are skipped.
pub fn parse_labeled_csv(raw: &str) -> Result<Vec<LabeledText>, IngestError> {
    parse_labeled_reader(raw.as_bytes())
}

/// Parse corpus records from any byte stream.
pub fn parse_labeled_reader<R: Read>(input: R) -> Result<Vec<LabeledText>, IngestError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let mut out = Vec::new();
    for result in reader.records() {
        let record = result.map_err(corpus_error)?;
        match labeled(&record) {
            Some(text) => out.push(text),
            None => debug!(
                line = record.position().map(|p| p.line()),
                "skipping record without genre or summary"
            ),
        }
    }
    Ok(out)
}

/// `title,genre,summary...`: fields after the genre belong to the summary.
fn labeled(record: &StringRecord) -> Option<LabeledText> {
    let genre = record.get(1)?.trim();
    let summary = record.iter().skip(2).collect::<Vec<_>>().join(",");
    let summary = summary.trim();
    if genre.is_empty() || summary.is_empty() {
        return None;
    }
    Some(LabeledText::new(genre, summary))
}

fn corpus_error(err: csv::Error) -> IngestError {
    let line = err.position().map(|p| p.line() as usize).unwrap_or(0);
    IngestError::Corpus {
        line,
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_header_and_reads_records() {
        let raw = "title,genre,summary\nDune,science,Spice and sand\nIt,horror,A clown\n";
        let records = parse_labeled_csv(raw).unwrap();
        assert_eq!(
            records,
            vec![
                LabeledText::new("science", "Spice and sand"),
                LabeledText::new("horror", "A clown"),
            ]
        );
    }

    #[test]
    fn quoted_summary_spans_lines() {
        let raw = "title,genre,summary\r\n\"Emma\",romance,\"Matchmaking, \"\"misunderstandings\"\"\nand love\"\r\nIt,horror,clown\n";
        let records = parse_labeled_csv(raw).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].genre, "romance");
        assert_eq!(records[0].text, "Matchmaking, \"misunderstandings\"\nand love");
        assert_eq!(records[1].text, "clown");
    }

    #[test]
    fn unquoted_commas_stay_in_summary() {
        let raw = "title,genre,summary\nOdyssey,travel,Sea, ships, and home\n";
        let records = parse_labeled_csv(raw).unwrap();
        assert_eq!(records[0].text, "Sea, ships, and home");
    }

    #[test]
    fn skips_incomplete_records() {
        let raw = "title,genre,summary\nNo Genre,,text\nNo Summary,crime,\nJust a title\n\nOk,crime,gun\n";
        let records = parse_labeled_csv(raw).unwrap();
        assert_eq!(records, vec![LabeledText::new("crime", "gun")]);
    }

    #[test]
    fn invalid_utf8_reports_line() {
        let raw: &[u8] = b"title,genre,summary\nA,crime,gun\nB,crime,caf\xe9\n";
        match parse_labeled_reader(raw) {
            Err(IngestError::Corpus { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected corpus error, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = parse_labeled_corpus(&tmp.path().join("book.csv")).unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }

    #[test]
    fn reads_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("book.csv");
        std::fs::write(&path, "title,genre,summary\nX,thriller,dark killer knife\n").unwrap();
        let records = parse_labeled_corpus(&path).unwrap();
        assert_eq!(records, vec![LabeledText::new("thriller", "dark killer knife")]);
    }
}
