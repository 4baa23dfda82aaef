use std::io::Write;
use std::ops::RangeInclusive;
use std::path::PathBuf;

use laurels_core::RankedRow;
use laurels_parsing::{Extraction, ExtractionStats};
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Outcome of one award run, as printed after it completes.
#[derive(Debug)]
pub struct AwardSummary {
    pub prefix: String,
    pub years: RangeInclusive<i32>,
    pub records: usize,
    pub stats: ExtractionStats,
    pub failed_years: Vec<i32>,
    pub top: Vec<RankedRow>,
    pub records_file: PathBuf,
    pub table_file: PathBuf,
}

/// Print one parsed citation (used by `laurels parse`).
pub fn print_extraction(
    w: &mut dyn Write,
    text: &str,
    extraction: &Extraction,
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{}", text.bold())?;
    } else {
        writeln!(w, "{}", text)?;
    }

    if extraction.authors.is_empty() {
        writeln!(w, "  authors: -")?;
    }
    for author in &extraction.authors {
        if author.details.is_empty() {
            writeln!(w, "  author:  {}", author.name)?;
        } else {
            writeln!(w, "  author:  {} ({})", author.name, author.details)?;
        }
    }
    writeln!(w, "  title:   {}", extraction.title)?;
    writeln!(w, "  details: {}", extraction.details)?;

    for anomaly in &extraction.anomalies {
        let line = format!("  {}: {}", anomaly.kind(), anomaly);
        if color.enabled() {
            writeln!(w, "{}", line.yellow())?;
        } else {
            writeln!(w, "{}", line)?;
        }
    }
    writeln!(w)?;
    Ok(())
}

/// Print the scores each author would receive (used by `laurels parse --score`).
pub fn print_scores(
    w: &mut dyn Write,
    category: &str,
    scores: &[(String, u32)],
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w, "Scores for category {}:", category)?;
    for (name, score) in scores {
        if color.enabled() {
            writeln!(w, "  {:>3}  {}", score.cyan(), name)?;
        } else {
            writeln!(w, "  {:>3}  {}", score, name)?;
        }
    }
    Ok(())
}

/// Print the summary after an award has been collected and tabulated.
pub fn print_award_summary(
    w: &mut dyn Write,
    summary: &AwardSummary,
    color: ColorMode,
) -> std::io::Result<()> {
    let heading = format!(
        "{} ({}–{})",
        summary.prefix,
        summary.years.start(),
        summary.years.end()
    );
    if color.enabled() {
        writeln!(w, "{}", heading.bold())?;
    } else {
        writeln!(w, "{}", heading)?;
    }

    writeln!(w, "  {} records", summary.records)?;

    let stats = &summary.stats;
    if stats.anomalies() > 0 {
        let line = format!(
            "  anomalies: {} segmentation, {} missing quotes, {} without authors",
            stats.segmentation, stats.missing_quote_pair, stats.empty_author_list
        );
        if color.enabled() {
            writeln!(w, "{}", line.yellow())?;
        } else {
            writeln!(w, "{}", line)?;
        }
    }

    if !summary.failed_years.is_empty() {
        let years: Vec<String> = summary.failed_years.iter().map(|y| y.to_string()).collect();
        let line = format!("  no page for: {}", years.join(", "));
        if color.enabled() {
            writeln!(w, "{}", line.red())?;
        } else {
            writeln!(w, "{}", line)?;
        }
    }

    if !summary.top.is_empty() {
        writeln!(w, "  top authors:")?;
        for (i, row) in summary.top.iter().enumerate() {
            let total = row.total();
            if color.enabled() {
                writeln!(
                    w,
                    "  {:>3}. {:>4}  {} {}",
                    i + 1,
                    total.green(),
                    row.name,
                    format!("({}/{}/{})", row.stats.prize, row.stats.short, row.stats.long)
                        .dimmed()
                )?;
            } else {
                writeln!(
                    w,
                    "  {:>3}. {:>4}  {} ({}/{}/{})",
                    i + 1,
                    total,
                    row.name,
                    row.stats.prize,
                    row.stats.short,
                    row.stats.long
                )?;
            }
        }
    }

    writeln!(w, "  records: {}", summary.records_file.display())?;
    writeln!(w, "  table:   {}", summary.table_file.display())?;
    writeln!(w)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use laurels_core::{Author, Stats};
    use laurels_parsing::Anomaly;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> std::io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn extraction_lists_fields_and_anomalies() {
        let extraction = Extraction {
            authors: vec![Author::new("Лев Данилкин", "биограф")],
            title: String::new(),
            details: "эссе".to_string(),
            anomalies: vec![Anomaly::MissingQuotePair],
        };
        let out = render(|w| print_extraction(w, "src", &extraction, ColorMode(false)));
        assert!(out.contains("author:  Лев Данилкин (биограф)"));
        assert!(out.contains("details: эссе"));
        assert!(out.contains("missing_quote_pair: no quoted title found"));
    }

    #[test]
    fn summary_without_color() {
        let summary = AwardSummary {
            prefix: "bigbook".to_string(),
            years: 2006..=2007,
            records: 12,
            stats: ExtractionStats {
                total: 12,
                segmentation: 1,
                missing_quote_pair: 0,
                empty_author_list: 2,
            },
            failed_years: vec![2007],
            top: vec![RankedRow {
                name: "Иванов".to_string(),
                stats: Stats {
                    prize: 1,
                    short: 0,
                    long: 0,
                },
                scores: vec![10, 0],
                cumulative: vec![10, 10],
            }],
            records_file: PathBuf::from("results/bigbook_awards.json"),
            table_file: PathBuf::from("results/bigbook_table.csv"),
        };
        let out = render(|w| print_award_summary(w, &summary, ColorMode(false)));
        assert!(out.starts_with("bigbook (2006–2007)\n"));
        assert!(out.contains("1 segmentation, 0 missing quotes, 2 without authors"));
        assert!(out.contains("no page for: 2007"));
        assert!(out.contains("    1.   10  Иванов (1/0/0)"));
        assert!(out.contains("table:   results/bigbook_table.csv"));
    }
}
