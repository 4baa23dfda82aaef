use thiserror::Error;

pub mod authors;
pub mod classify;
pub mod extractor;
pub mod segment;
pub mod text_processing;
pub mod title;

pub use classify::{CitationDialect, DashDialect, GuillemetDialect, RawFields, rules_for};
pub use extractor::{CitationExtractor, Extraction, ExtractionResult, ExtractionStats};
// Re-export domain types from core (canonical definitions live there)
pub use laurels_core::{Author, Citation, Dialect, Record};

/// A problem found while extracting one citation.
///
/// None of these stop a run: the affected record is kept in degraded form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    /// The parts match no layout of the dialect; the record is left empty.
    #[error("unexpected part count {part_count}: {parts:?}")]
    Segmentation {
        part_count: usize,
        parts: Vec<String>,
    },
    /// No `«…»` pair where the title should be; the title is left empty.
    #[error("no quoted title found")]
    MissingQuotePair,
    /// The author field yields no authors; the record scores nothing.
    #[error("no authors found")]
    EmptyAuthorList,
}

impl Anomaly {
    pub fn kind(&self) -> &'static str {
        match self {
            Anomaly::Segmentation { .. } => "segmentation",
            Anomaly::MissingQuotePair => "missing_quote_pair",
            Anomaly::EmptyAuthorList => "empty_author_list",
        }
    }
}

/// Extract authors, title and details from a single citation string.
///
/// Pipeline:
/// 1. Segment the text with the dialect's delimiter rules
/// 2. Assign parts to author/title/details
/// 3. Pull the quoted title out, folding surrounding text into details
/// 4. Split the author field and normalize names
/// 5. Clean title and details
pub fn extract_citation(text: &str, dialect: Dialect) -> Extraction {
    CitationExtractor::new(dialect).extract(text)
}
