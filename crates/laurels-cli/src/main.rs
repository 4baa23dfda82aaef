use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use laurels_core::config_file::{self, ConfigFile, PathsConfig};
use laurels_core::{AwardConfig, Citation, Dialect, aggregate};
use laurels_ingest::{PageCache, PageFetcher, extract_citations, load_year_page};
use laurels_parsing::{CitationExtractor, ExtractionStats};
use laurels_reporting::{ExportFormat, export_records, export_table, load_records};

mod output;

use output::{AwardSummary, ColorMode};

/// Number of authors listed in the run summary.
const TOP_AUTHORS: usize = 10;

/// Collect literary award lists and rank authors by cumulative score
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log debug events (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch award pages, extract records and write ranked tables
    Run {
        /// Extra config file layered over the platform and working-directory configs
        #[arg(long, env = "LAURELS_CONFIG")]
        config: Option<PathBuf>,

        /// Award prefix to process (repeatable; default: all configured awards)
        #[arg(long = "award")]
        awards: Vec<String>,

        /// Use cached pages only; years without a cached page are skipped
        #[arg(long)]
        offline: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Classify citation strings and print the extracted fields
    Parse {
        /// List dialect: dash or guillemet
        #[arg(long)]
        dialect: Dialect,

        /// Category label the citations belong to
        #[arg(long, requires = "score")]
        category: Option<String>,

        /// Score of the category, to show what each author would receive
        #[arg(long, requires = "category")]
        score: Option<u32>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Citation strings
        #[arg(required = true)]
        texts: Vec<String>,
    },

    /// Rebuild the ranked table from a saved record dump
    Table {
        /// Record dump written by `laurels run`
        records: PathBuf,

        /// Award prefix whose categories and tiers apply
        #[arg(long)]
        award: String,

        /// Table format: csv or markdown
        #[arg(long, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        /// Write the table here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Extra config file layered over the platform and working-directory configs
        #[arg(long, env = "LAURELS_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Write the effective configuration to the platform config file
    InitConfig {
        /// Extra config file layered over the platform and working-directory configs
        #[arg(long, env = "LAURELS_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Run {
            config,
            awards,
            offline,
            no_color,
        } => {
            let config = resolve_config(config.as_deref())?;
            run(&config, &awards, offline, ColorMode(!no_color)).await
        }
        Command::Parse {
            dialect,
            category,
            score,
            no_color,
            texts,
        } => parse(dialect, category.zip(score), &texts, ColorMode(!no_color)),
        Command::Table {
            records,
            award,
            format,
            output,
            config,
        } => {
            let config = resolve_config(config.as_deref())?;
            table(&config, &records, &award, format, output.as_deref())
        }
        Command::InitConfig { config } => {
            let config = resolve_config(config.as_deref())?;
            init_config(&config)
        }
    }
}

/// Logs go to stderr so table output on stdout stays clean.
fn init_tracing(verbose: bool) {
    let default = if verbose { "laurels=debug" } else { "laurels=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Platform config, then `./.laurels.toml`, then the explicit file if any.
fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<ConfigFile> {
    let config = config_file::load_config();
    let Some(path) = explicit else {
        return Ok(config);
    };
    let overlay = config_file::read_config(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    Ok(config_file::merge(config, overlay))
}

/// Awards named on the command line, or every configured award.
fn select_awards(config: &ConfigFile, prefixes: &[String]) -> anyhow::Result<Vec<AwardConfig>> {
    let all = config.awards();
    if prefixes.is_empty() {
        return Ok(all);
    }
    prefixes
        .iter()
        .map(|prefix| {
            all.iter()
                .find(|a| &a.prefix == prefix)
                .cloned()
                .with_context(|| {
                    let known: Vec<&str> = all.iter().map(|a| a.prefix.as_str()).collect();
                    format!("Unknown award '{}' (configured: {})", prefix, known.join(", "))
                })
        })
        .collect()
}

async fn run(
    config: &ConfigFile,
    prefixes: &[String],
    offline: bool,
    color: ColorMode,
) -> anyhow::Result<()> {
    let awards = select_awards(config, prefixes)?;
    let fetcher = PageFetcher::new()?;
    let cache_dir = config.cache_dir();
    let result_dir = config.result_dir();

    let mut stdout = std::io::stdout();
    for award in &awards {
        let summary = run_award(award, &fetcher, &cache_dir, &result_dir, offline).await?;
        output::print_award_summary(&mut stdout, &summary, color)?;
    }
    stdout.flush()?;
    Ok(())
}

async fn run_award(
    award: &AwardConfig,
    fetcher: &PageFetcher,
    cache_dir: &Path,
    result_dir: &Path,
    offline: bool,
) -> anyhow::Result<AwardSummary> {
    use indicatif::{ProgressBar, ProgressStyle};

    let mut cache = PageCache::open(award.cache_file(cache_dir))?;
    let extractor = CitationExtractor::new(award.dialect);
    let years = award.years();

    let bar = ProgressBar::new(years.clone().count() as u64);
    bar.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg} [{bar:40.green/dim}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let mut records = Vec::new();
    let mut stats = ExtractionStats::default();
    let mut failed_years = Vec::new();

    for year in years.clone() {
        bar.set_message(format!("{} {}", award.prefix, year));
        match load_year_page(&mut cache, fetcher, &award.url_template, year, offline).await {
            Ok(page) => {
                let citations = extract_citations(&page, &award.prefix, year, &award.categories);
                let result = extractor.extract_all(&citations);
                stats.merge(&result.stats);
                records.extend(result.records);
            }
            Err(e) => {
                bar.suspend(|| {
                    tracing::warn!(award = %award.prefix, year, error = %e, "can't get page");
                });
                failed_years.push(year);
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    cache.save()?;

    let records_file = award.records_file(result_dir);
    export_records(&records, &records_file)?;

    let tiers = award.tiers();
    let table = aggregate(&records, &award.categories);
    let table_file = award.table_file(result_dir);
    export_table(&table, years.clone(), &tiers, ExportFormat::Csv, &table_file)?;

    tracing::info!(
        award = %award.prefix,
        records = records.len(),
        authors = table.len(),
        anomalies = stats.anomalies(),
        "award processed"
    );

    let mut top = table.ranked(years.clone(), &tiers);
    top.truncate(TOP_AUTHORS);

    Ok(AwardSummary {
        prefix: award.prefix.clone(),
        years,
        records: records.len(),
        stats,
        failed_years,
        top,
        records_file,
        table_file,
    })
}

fn parse(
    dialect: Dialect,
    scoring: Option<(String, u32)>,
    texts: &[String],
    color: ColorMode,
) -> anyhow::Result<()> {
    let extractor = CitationExtractor::new(dialect);
    let mut stdout = std::io::stdout();
    let mut records = Vec::new();

    for text in texts {
        let extraction = extractor.extract(text);
        output::print_extraction(&mut stdout, text, &extraction, color)?;

        if let Some((category, _)) = &scoring {
            let citation = Citation {
                award: "cli".to_string(),
                year: 0,
                category: category.clone(),
                text: text.clone(),
            };
            records.push(extraction.into_record(&citation));
        }
    }

    if let Some((category, score)) = scoring {
        let scores = [(category.clone(), score)].into_iter().collect();
        let table = aggregate(&records, &scores);
        let rows: Vec<(String, u32)> = table
            .iter()
            .map(|(name, by_year)| (name.to_string(), by_year.values().copied().sum()))
            .collect();
        output::print_scores(&mut stdout, &category, &rows, color)?;
    }
    Ok(())
}

fn table(
    config: &ConfigFile,
    records_path: &Path,
    prefix: &str,
    format: ExportFormat,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let award = config
        .award(prefix)
        .with_context(|| format!("Unknown award '{}'", prefix))?;
    let records = load_records(records_path)
        .with_context(|| format!("Failed to read records from {}", records_path.display()))?;

    let tiers = award.tiers();
    let table = aggregate(&records, &award.categories);

    match output {
        Some(path) => {
            export_table(&table, award.years(), &tiers, format, path)?;
            eprintln!("Wrote {} authors to {}", table.len(), path.display());
        }
        None => {
            let content = match format {
                ExportFormat::Csv => laurels_reporting::table_csv(&table, award.years(), &tiers),
                ExportFormat::Markdown => {
                    laurels_reporting::table_markdown(&table, award.years(), &tiers)
                }
            };
            let mut stdout = std::io::stdout();
            stdout.write_all(content.as_bytes())?;
        }
    }
    Ok(())
}

fn init_config(config: &ConfigFile) -> anyhow::Result<()> {
    let effective = ConfigFile {
        paths: Some(PathsConfig {
            cache_dir: Some(config.cache_dir().display().to_string()),
            result_dir: Some(config.result_dir().display().to_string()),
        }),
        awards: Some(config.awards()),
    };
    let path = config_file::save_config(&effective)?;
    println!("Wrote config to {}", path.display());
    Ok(())
}
