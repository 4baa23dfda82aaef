//! Mapping of segmenter parts to author, title and details fields.
//!
//! Each dialect provides the same two capabilities, [`segment`] and
//! [`classify`], through [`CitationDialect`]; the rest of the pipeline is
//! shared (see [`CitationExtractor`](crate::CitationExtractor)).
//!
//! [`segment`]: CitationDialect::segment
//! [`classify`]: CitationDialect::classify

use laurels_core::Dialect;

use crate::Anomaly;
use crate::segment::{QUOTE_CLOSE, QUOTE_OPEN, segment_dash, segment_guillemet};
use crate::text_processing::clean;

/// Leading word of dash-dialect entries nominated as unpublished manuscripts.
/// Such entries put the marker first: `Рукопись — Автор — «Название»`.
pub const MANUSCRIPT_MARKER: &str = "Рукопись";

/// Unparsed author, title and details fields of one citation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFields {
    pub author: String,
    /// Still carries its guillemets and any text around them.
    pub title: String,
    pub details: String,
}

/// Dialect-specific segmentation and field assignment.
pub trait CitationDialect: Send + Sync {
    fn dialect(&self) -> Dialect;

    /// Split a citation into ordered parts.
    fn segment(&self, text: &str) -> Vec<String>;

    /// Assign parts to fields. Fails when the parts fit no known layout.
    fn classify(&self, parts: &[String]) -> Result<RawFields, Anomaly>;
}

/// `Author — «Title» — details`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DashDialect;

/// `Author1, Author2, «Title», publisher (note)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuillemetDialect;

/// The rule set for `dialect`.
pub fn rules_for(dialect: Dialect) -> &'static dyn CitationDialect {
    match dialect {
        Dialect::Dash => &DashDialect,
        Dialect::Guillemet => &GuillemetDialect,
    }
}

impl CitationDialect for DashDialect {
    fn dialect(&self) -> Dialect {
        Dialect::Dash
    }

    fn segment(&self, text: &str) -> Vec<String> {
        segment_dash(text)
    }

    fn classify(&self, parts: &[String]) -> Result<RawFields, Anomaly> {
        let parts: Vec<String> = parts.iter().map(|p| clean(p)).collect();

        match parts.as_slice() {
            [first, second, third] if is_manuscript(first) => Ok(RawFields {
                details: first.clone(),
                author: second.clone(),
                title: third.clone(),
            }),
            [first, second, third] => Ok(RawFields {
                author: first.clone(),
                title: second.clone(),
                details: third.clone(),
            }),
            [first, second] if is_manuscript(first) => Ok(RawFields {
                details: first.clone(),
                title: second.clone(),
                author: String::new(),
            }),
            [first, second] => Ok(RawFields {
                author: first.clone(),
                title: second.clone(),
                details: String::new(),
            }),
            [only] => Ok(split_single_part(only)),
            _ => Err(Anomaly::Segmentation {
                part_count: parts.len(),
                parts: parts.clone(),
            }),
        }
    }
}

impl CitationDialect for GuillemetDialect {
    fn dialect(&self) -> Dialect {
        Dialect::Guillemet
    }

    fn segment(&self, text: &str) -> Vec<String> {
        segment_guillemet(text)
    }

    /// The first part that is a complete `«…»` is the title; everything
    /// before it is the author field and everything after it the details.
    fn classify(&self, parts: &[String]) -> Result<RawFields, Anomaly> {
        let title_idx = parts
            .iter()
            .position(|p| p.starts_with(QUOTE_OPEN) && p.ends_with(QUOTE_CLOSE));

        let Some(i) = title_idx else {
            return Err(Anomaly::Segmentation {
                part_count: parts.len(),
                parts: parts.to_vec(),
            });
        };

        Ok(RawFields {
            author: parts[..i].join(", "),
            title: parts[i].clone(),
            details: parts[i + 1..].join(", "),
        })
    }
}

fn is_manuscript(part: &str) -> bool {
    part.starts_with(MANUSCRIPT_MARKER)
}

/// `Автор «Название» подробности` with no em-dash: split around the quotes.
/// Without a quote pair the whole text is taken as the author field.
fn split_single_part(text: &str) -> RawFields {
    match (text.find(QUOTE_OPEN), text.find(QUOTE_CLOSE)) {
        (Some(open), Some(close)) if open < close => {
            let end = close + QUOTE_CLOSE.len_utf8();
            RawFields {
                author: text[..open].trim().to_string(),
                title: text[open..end].to_string(),
                details: text[end..].trim().to_string(),
            }
        }
        _ => RawFields {
            author: text.to_string(),
            ..Default::default()
        },
    }
}
