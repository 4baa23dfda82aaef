use laurels_core::{Author, Citation, Dialect, Record};

use crate::authors::parse_authors;
use crate::classify::{CitationDialect, RawFields, rules_for};
use crate::text_processing::{clean, normalize_name, normalize_whitespace};
use crate::title::split_title;
use crate::Anomaly;

/// Authors, title and details extracted from one citation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub authors: Vec<Author>,
    pub title: String,
    pub details: String,
    pub anomalies: Vec<Anomaly>,
}

impl Extraction {
    /// Attach the citation's provenance.
    pub fn into_record(self, citation: &Citation) -> Record {
        Record {
            award: citation.award.clone(),
            year: citation.year,
            category: citation.category.clone(),
            source_text: citation.text.clone(),
            authors: self.authors,
            title: self.title,
            details: self.details,
        }
    }
}

/// Counts of anomalies seen over a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub total: usize,
    pub segmentation: usize,
    pub missing_quote_pair: usize,
    pub empty_author_list: usize,
}

impl ExtractionStats {
    pub fn add(&mut self, anomalies: &[Anomaly]) {
        self.total += 1;
        for anomaly in anomalies {
            match anomaly {
                Anomaly::Segmentation { .. } => self.segmentation += 1,
                Anomaly::MissingQuotePair => self.missing_quote_pair += 1,
                Anomaly::EmptyAuthorList => self.empty_author_list += 1,
            }
        }
    }

    pub fn merge(&mut self, other: &ExtractionStats) {
        self.total += other.total;
        self.segmentation += other.segmentation;
        self.missing_quote_pair += other.missing_quote_pair;
        self.empty_author_list += other.empty_author_list;
    }

    pub fn anomalies(&self) -> usize {
        self.segmentation + self.missing_quote_pair + self.empty_author_list
    }
}

/// Records built from a batch of citations.
#[derive(Debug, Clone, Default)]
pub struct ExtractionResult {
    pub records: Vec<Record>,
    pub stats: ExtractionStats,
}

/// The citation pipeline for one dialect.
///
/// Stateless apart from the dialect rules, so one extractor can be shared
/// across threads and citations classified in any order.
#[derive(Clone, Copy)]
pub struct CitationExtractor {
    rules: &'static dyn CitationDialect,
}

impl CitationExtractor {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            rules: rules_for(dialect),
        }
    }

    /// Use a custom rule set.
    pub fn with_rules(rules: &'static dyn CitationDialect) -> Self {
        Self { rules }
    }

    pub fn dialect(&self) -> Dialect {
        self.rules.dialect()
    }

    /// Split a citation into parts (step 1).
    pub fn segment(&self, text: &str) -> Vec<String> {
        self.rules.segment(text)
    }

    /// Assign parts to fields (step 2).
    pub fn classify(&self, parts: &[String]) -> Result<RawFields, Anomaly> {
        self.rules.classify(parts)
    }

    /// Run the full pipeline on one citation string.
    pub fn extract(&self, text: &str) -> Extraction {
        let parts = self.segment(text);

        let fields = match self.classify(&parts) {
            Ok(fields) => fields,
            Err(anomaly) => {
                tracing::warn!(
                    dialect = %self.dialect(),
                    part_count = parts.len(),
                    parts = ?parts,
                    text,
                    "{anomaly}"
                );
                return Extraction {
                    anomalies: vec![anomaly],
                    ..Default::default()
                };
            }
        };

        let mut anomalies = Vec::new();

        let (title, details, from_quotes) = split_title(&fields.title, &fields.details);
        if !from_quotes {
            tracing::warn!(title_part = %fields.title, text, "{}", Anomaly::MissingQuotePair);
            anomalies.push(Anomaly::MissingQuotePair);
        }

        let authors: Vec<Author> = parse_authors(&fields.author)
            .into_iter()
            .map(|a| Author::new(normalize_name(&a.name), normalize_whitespace(&a.details)))
            .filter(|a| !a.name.is_empty())
            .collect();
        if authors.is_empty() {
            tracing::warn!(author_part = %fields.author, text, "{}", Anomaly::EmptyAuthorList);
            anomalies.push(Anomaly::EmptyAuthorList);
        }

        Extraction {
            authors,
            title: clean(&title),
            details: clean(&details),
            anomalies,
        }
    }

    /// Build the record for one citation.
    pub fn record(&self, citation: &Citation) -> (Record, Vec<Anomaly>) {
        let _span = tracing::debug_span!(
            "citation",
            award = %citation.award,
            year = citation.year,
            category = %citation.category
        )
        .entered();

        let mut extraction = self.extract(&citation.text);
        let anomalies = std::mem::take(&mut extraction.anomalies);
        (extraction.into_record(citation), anomalies)
    }

    /// Build records for a batch of citations, in order.
    pub fn extract_all(&self, citations: &[Citation]) -> ExtractionResult {
        let mut result = ExtractionResult::default();
        for citation in citations {
            let (record, anomalies) = self.record(citation);
            result.stats.add(&anomalies);
            result.records.push(record);
        }
        result
    }
}
