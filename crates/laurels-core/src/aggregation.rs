//! Per-author, per-year score table.
//!
//! Records are folded into a [`ScoreTable`] by an [`Aggregator`]: every author
//! of a record receives the score of the record's category for the record's
//! year, keeping the maximum when the same author already scored that year.
//! Names are reconciled against their word-reversed form, so "Иванов Петр" and
//! "Петр Иванов" land on the same row (whichever spelling was seen first).
//!
//! The table is then summarised into tier counts ([`Stats`]) and a ranked
//! listing ([`RankedRow`]) ordered by cumulative score over a year range.

use std::collections::{BTreeMap, HashMap};
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::Record;

/// Category label → score.
pub type CategoryScores = BTreeMap<String, u32>;

/// The three report columns and the score value each one counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierColumns {
    pub prize: u32,
    pub short: u32,
    pub long: u32,
}

impl Default for TierColumns {
    fn default() -> Self {
        Self {
            prize: 10,
            short: 5,
            long: 3,
        }
    }
}

/// Number of years an author scored each tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub prize: usize,
    pub short: usize,
    pub long: usize,
}

/// Canonical author name → (year → best score), in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct ScoreTable {
    rows: Vec<(String, BTreeMap<i32, u32>)>,
    index: HashMap<String, usize>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Scores by year for a canonical name.
    pub fn get(&self, name: &str) -> Option<&BTreeMap<i32, u32>> {
        self.index.get(name).map(|&i| &self.rows[i].1)
    }

    /// Iterate rows in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<i32, u32>)> {
        self.rows.iter().map(|(name, years)| (name.as_str(), years))
    }

    /// Record `score` for `name` in `year`.
    ///
    /// The row is looked up under the name as given, then under its
    /// word-reversed form; if neither exists a new row is created under the
    /// name as given. An existing score for the year is only ever raised.
    pub fn record_score(&mut self, name: &str, year: i32, score: u32) {
        let idx = match self.index.get(name) {
            Some(&i) => i,
            None => match self.index.get(&reversed_name(name)) {
                Some(&i) => i,
                None => {
                    self.rows.push((name.to_string(), BTreeMap::new()));
                    let i = self.rows.len() - 1;
                    self.index.insert(name.to_string(), i);
                    i
                }
            },
        };

        let slot = self.rows[idx].1.entry(year).or_insert(0);
        *slot = (*slot).max(score);
    }

    /// Tier counts for one author.
    pub fn stats_for(&self, name: &str, tiers: &TierColumns) -> Option<Stats> {
        self.get(name).map(|years| count_tiers(years, tiers))
    }

    /// Tier counts for every author.
    pub fn stats(&self, tiers: &TierColumns) -> HashMap<String, Stats> {
        self.rows
            .iter()
            .map(|(name, years)| (name.clone(), count_tiers(years, tiers)))
            .collect()
    }

    /// Score per year over `years`, 0 where the author has none.
    pub fn scores(&self, name: &str, years: RangeInclusive<i32>) -> Vec<u32> {
        let Some(row) = self.get(name) else {
            return years.map(|_| 0).collect();
        };
        years.map(|y| row.get(&y).copied().unwrap_or(0)).collect()
    }

    /// Running sum of [`scores`](Self::scores) over `years`.
    pub fn cumulative(&self, name: &str, years: RangeInclusive<i32>) -> Vec<u32> {
        running_sum(&self.scores(name, years))
    }

    /// Authors sorted by final cumulative score, highest first. Ties keep
    /// insertion order.
    pub fn ranked(&self, years: RangeInclusive<i32>, tiers: &TierColumns) -> Vec<RankedRow> {
        let mut rows: Vec<RankedRow> = self
            .rows
            .iter()
            .map(|(name, by_year)| {
                let scores: Vec<u32> = years
                    .clone()
                    .map(|y| by_year.get(&y).copied().unwrap_or(0))
                    .collect();
                let cumulative = running_sum(&scores);
                RankedRow {
                    name: name.clone(),
                    stats: count_tiers(by_year, tiers),
                    scores,
                    cumulative,
                }
            })
            .collect();

        // `sort_by` is stable.
        rows.sort_by(|a, b| b.total().cmp(&a.total()));
        rows
    }
}

/// One line of the ranked listing, as handed to report writers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedRow {
    pub name: String,
    pub stats: Stats,
    /// Score for each year of the range.
    pub scores: Vec<u32>,
    /// Running total for each year of the range.
    pub cumulative: Vec<u32>,
}

impl RankedRow {
    /// Final cumulative score.
    pub fn total(&self) -> u32 {
        self.cumulative.last().copied().unwrap_or(0)
    }
}

/// Accumulates records into a [`ScoreTable`].
pub struct Aggregator<'a> {
    scores: &'a CategoryScores,
    table: ScoreTable,
}

impl<'a> Aggregator<'a> {
    pub fn new(scores: &'a CategoryScores) -> Self {
        Self {
            scores,
            table: ScoreTable::new(),
        }
    }

    pub fn add(&mut self, record: &Record) {
        let Some(&score) = self.scores.get(&record.category) else {
            tracing::debug!(
                award = %record.award,
                year = record.year,
                category = %record.category,
                "category has no score, record skipped"
            );
            return;
        };

        for author in &record.authors {
            if author.name.is_empty() {
                continue;
            }
            self.table.record_score(&author.name, record.year, score);
        }
    }

    pub fn table(&self) -> &ScoreTable {
        &self.table
    }

    pub fn finish(self) -> ScoreTable {
        self.table
    }
}

/// Fold `records` into a score table.
pub fn aggregate<'r>(
    records: impl IntoIterator<Item = &'r Record>,
    scores: &CategoryScores,
) -> ScoreTable {
    let mut agg = Aggregator::new(scores);
    for record in records {
        agg.add(record);
    }
    agg.finish()
}

/// `"Петр Иванов"` → `"Иванов Петр"`.
pub fn reversed_name(name: &str) -> String {
    name.split(' ').rev().collect::<Vec<_>>().join(" ")
}

fn count_tiers(years: &BTreeMap<i32, u32>, tiers: &TierColumns) -> Stats {
    let count = |tier: u32| years.values().filter(|&&s| s == tier).count();
    Stats {
        prize: count(tiers.prize),
        short: count(tiers.short),
        long: count(tiers.long),
    }
}

fn running_sum(values: &[u32]) -> Vec<u32> {
    values
        .iter()
        .scan(0u32, |acc, &v| {
            *acc += v;
            Some(*acc)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Author;

    fn scores() -> CategoryScores {
        [("win", 10), ("short", 5), ("long", 3)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    fn record(year: i32, category: &str, names: &[&str]) -> Record {
        Record {
            award: "test".to_string(),
            year,
            category: category.to_string(),
            source_text: String::new(),
            authors: names.iter().map(|n| Author::new(*n, "")).collect(),
            title: String::new(),
            details: String::new(),
        }
    }

    #[test]
    fn test_reversed_name() {
        assert_eq!(reversed_name("Петр Иванов"), "Иванов Петр");
        assert_eq!(reversed_name("Пелевин"), "Пелевин");
        assert_eq!(reversed_name("A B C"), "C B A");
    }

    #[test]
    fn test_max_merge_same_year_either_order() {
        let s = scores();
        let a = record(2010, "long", &["Иванов"]);
        let b = record(2010, "win", &["Иванов"]);

        let forward = aggregate([&a, &b], &s);
        let backward = aggregate([&b, &a], &s);

        assert_eq!(forward.get("Иванов").unwrap()[&2010], 10);
        assert_eq!(backward.get("Иванов").unwrap()[&2010], 10);
    }

    #[test]
    fn test_score_never_lowered() {
        let mut table = ScoreTable::new();
        table.record_score("X", 2001, 5);
        table.record_score("X", 2001, 3);
        assert_eq!(table.get("X").unwrap()[&2001], 5);
    }

    #[test]
    fn test_reversed_names_reconcile() {
        let s = scores();
        let records = [
            record(2005, "win", &["Иванов Петр"]),
            record(2007, "short", &["Петр Иванов"]),
        ];
        let table = aggregate(&records, &s);

        assert_eq!(table.len(), 1);
        let row = table.get("Иванов Петр").unwrap();
        assert_eq!(row[&2005], 10);
        assert_eq!(row[&2007], 5);
        assert!(!table.contains("Петр Иванов"));
    }

    #[test]
    fn test_unknown_category_contributes_nothing() {
        let s = scores();
        let table = aggregate(&[record(2005, "honorable", &["A"])], &s);
        assert!(table.is_empty());
    }

    #[test]
    fn test_empty_author_names_skipped() {
        let s = scores();
        let table = aggregate(&[record(2005, "win", &["", "B"])], &s);
        assert_eq!(table.len(), 1);
        assert!(table.contains("B"));
    }

    #[test]
    fn test_stats_follow_tier_configuration() {
        let s = scores();
        let records = [
            record(2001, "win", &["A"]),
            record(2002, "win", &["A"]),
            record(2003, "short", &["A"]),
            record(2004, "long", &["A"]),
        ];
        let table = aggregate(&records, &s);

        let st = table.stats_for("A", &TierColumns::default()).unwrap();
        assert_eq!(
            st,
            Stats {
                prize: 2,
                short: 1,
                long: 1
            }
        );

        // A tier set that counts 1 as "long" sees no longlist years here.
        let other = TierColumns {
            prize: 10,
            short: 5,
            long: 1,
        };
        assert_eq!(table.stats_for("A", &other).unwrap().long, 0);
    }

    #[test]
    fn test_cumulative_fills_gaps() {
        let mut table = ScoreTable::new();
        table.record_score("A", 2001, 10);
        table.record_score("A", 2003, 5);
        assert_eq!(table.scores("A", 2000..=2003), vec![0, 10, 0, 5]);
        assert_eq!(table.cumulative("A", 2000..=2003), vec![0, 10, 10, 15]);
        assert_eq!(table.cumulative("nobody", 2000..=2001), vec![0, 0]);
    }

    #[test]
    fn test_ranking_by_final_cumulative() {
        let mut table = ScoreTable::new();
        table.record_score("B", 2001, 10);
        table.record_score("A", 2001, 10);
        table.record_score("A", 2002, 5);

        let ranked = table.ranked(2001..=2002, &TierColumns::default());
        let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(ranked[0].total(), 15);
        assert_eq!(ranked[1].total(), 10);
    }

    #[test]
    fn test_ranking_ties_keep_insertion_order() {
        let mut table = ScoreTable::new();
        table.record_score("First", 2001, 5);
        table.record_score("Second", 2002, 5);
        table.record_score("Third", 2002, 10);

        let ranked = table.ranked(2001..=2002, &TierColumns::default());
        let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Third", "First", "Second"]);
    }

    #[test]
    fn test_ranking_ignores_years_outside_range() {
        let mut table = ScoreTable::new();
        table.record_score("Early", 1999, 10);
        table.record_score("Late", 2001, 5);

        let ranked = table.ranked(2000..=2001, &TierColumns::default());
        assert_eq!(ranked[0].name, "Late");
        assert_eq!(ranked[1].total(), 0);
        // Tier counts cover every scored year, not just the range.
        assert_eq!(ranked[1].stats.prize, 1);
    }
}
