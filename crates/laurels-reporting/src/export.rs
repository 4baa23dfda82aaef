use std::io::Write;
use std::ops::RangeInclusive;
use std::path::Path;

use laurels_core::{Record, ScoreTable, TierColumns};

use crate::{ExportFormat, ReportError};

/// Write `records` to `path` as a JSON array.
pub fn export_records(records: &[Record], path: &Path) -> Result<(), ReportError> {
    create_parent(path)?;
    let json = serde_json::to_string(records)?;
    write_file(path, &json)?;
    tracing::debug!(path = %path.display(), records = records.len(), "wrote record dump");
    Ok(())
}

/// Read a record dump written by [`export_records`].
pub fn load_records(path: &Path) -> Result<Vec<Record>, ReportError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write the ranked table for `years` to `path` in `format`.
pub fn export_table(
    table: &ScoreTable,
    years: RangeInclusive<i32>,
    tiers: &TierColumns,
    format: ExportFormat,
    path: &Path,
) -> Result<(), ReportError> {
    let content = match format {
        ExportFormat::Csv => table_csv(table, years, tiers),
        ExportFormat::Markdown => table_markdown(table, years, tiers),
    };
    create_parent(path)?;
    write_file(path, &content)?;
    tracing::debug!(path = %path.display(), %format, authors = table.len(), "wrote table");
    Ok(())
}

/// Semicolon-separated ranked table.
///
/// Columns: author, the three tier counts, a spacer, one score per year, a
/// spacer, then the running total per year. Data rows end with `;`.
pub fn table_csv(table: &ScoreTable, years: RangeInclusive<i32>, tiers: &TierColumns) -> String {
    let year_list = years
        .clone()
        .map(|y| y.to_string())
        .collect::<Vec<_>>()
        .join(";");

    let mut out = format!("author;prize;short;long;;{year_list};;{year_list}\n");
    for row in table.ranked(years, tiers) {
        out.push_str(&row.name);
        out.push_str(&format!(
            ";{};{};{};;",
            row.stats.prize, row.stats.short, row.stats.long
        ));
        for score in &row.scores {
            out.push_str(&format!("{score};"));
        }
        out.push(';');
        for total in &row.cumulative {
            out.push_str(&format!("{total};"));
        }
        out.push('\n');
    }
    out
}

/// Ranked table as Markdown: author, tier counts and total.
pub fn table_markdown(
    table: &ScoreTable,
    years: RangeInclusive<i32>,
    tiers: &TierColumns,
) -> String {
    let mut out = format!("# {}–{}\n\n", years.start(), years.end());
    out.push_str(&format!(
        "| # | Author | Prize ({}) | Short ({}) | Long ({}) | Total |\n",
        tiers.prize, tiers.short, tiers.long
    ));
    out.push_str("|---|---|---|---|---|---|\n");
    for (i, row) in table.ranked(years, tiers).iter().enumerate() {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            i + 1,
            md_escape(&row.name),
            row.stats.prize,
            row.stats.short,
            row.stats.long,
            row.total()
        ));
    }
    out
}

fn md_escape(s: &str) -> String {
    s.replace('|', "\\|")
}

fn create_parent(path: &Path) -> Result<(), ReportError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<(), ReportError> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use laurels_core::Author;

    fn table() -> ScoreTable {
        let mut table = ScoreTable::new();
        table.record_score("B", 2021, 10);
        table.record_score("A", 2020, 10);
        table.record_score("A", 2021, 5);
        table
    }

    #[test]
    fn csv_layout() {
        let csv = table_csv(&table(), 2020..=2021, &TierColumns::default());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "author;prize;short;long;;2020;2021;;2020;2021");
        assert_eq!(lines[1], "A;1;1;0;;10;5;;10;15;");
        assert_eq!(lines[2], "B;1;0;0;;0;10;;0;10;");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn csv_empty_table_has_header_only() {
        let csv = table_csv(&ScoreTable::new(), 2006..=2006, &TierColumns::default());
        assert_eq!(csv, "author;prize;short;long;;2006;;2006\n");
    }

    #[test]
    fn markdown_ranks_and_escapes() {
        let mut t = table();
        t.record_score("C|D", 2020, 3);
        let md = table_markdown(&t, 2020..=2021, &TierColumns::default());
        assert!(md.contains("| 1 | A | 1 | 1 | 0 | 15 |"));
        assert!(md.contains("| 2 | B | 1 | 0 | 0 | 10 |"));
        assert!(md.contains("| 3 | C\\|D | 0 | 0 | 1 | 3 |"));
    }

    #[test]
    fn records_dump_uses_src_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results").join("bigbook_awards.json");
        let records = vec![Record {
            award: "bigbook".to_string(),
            year: 2013,
            category: "Победители".to_string(),
            source_text: "Евгений Водолазкин — «Лавр»".to_string(),
            authors: vec![Author::new("Евгений Водолазкин", "")],
            title: "Лавр".to_string(),
            details: String::new(),
        }];

        export_records(&records, &path).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"src\":\"Евгений Водолазкин — «Лавр»\""));
        assert_eq!(load_records(&path).unwrap(), records);
    }
}
