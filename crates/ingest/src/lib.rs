//! File-system collaborators of the classification run: enumerating and
//! reading documents, parsing the labeled training corpus, and appending
//! report lines.

pub mod corpus;
pub mod error;
pub mod report;
pub mod source;

pub use corpus::{parse_labeled_corpus, parse_labeled_csv, parse_labeled_reader};
pub use error::IngestError;
pub use report::{FileReportSink, MemoryReportSink, ReportSink};
pub use source::{DocumentSource, FsDocumentSource, MemoryDocumentSource};
