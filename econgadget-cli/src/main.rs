//! Econgadget CLI: fetch, show, export and cache management commands.
//!
//! Commands:
//! - `terms`: list recent office-holder terms
//! - `fetch`: populate the payload cache for a dataset
//! - `show`: print summary rows, overlay intervals and legend for a dataset
//! - `export`: write the windowed observations as CSV
//! - `cache status`: list cached payloads with size and age
//! - `cache clear`: remove cached payloads

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use econgadget_core::data::{PayloadCache, PayloadSource};
use econgadget_core::overlay::MarkStyle;
use econgadget_core::{export, AppConfig, ChartOutcome, Dataset, LiveServices};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "econgadget",
    about = "Econgadget CLI: labor statistics charted against presidential terms"
)]
struct Cli {
    /// Config file. Defaults to the platform config dir.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Cache directory. Overrides the config.
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List recent office-holder terms.
    Terms,
    /// Fetch a dataset into the cache.
    Fetch {
        /// Dataset: unemployment or cpi.
        dataset: Dataset,

        /// Re-fetch even if cached.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Print summary, overlays and legend for a dataset.
    Show {
        /// Dataset: unemployment or cpi.
        dataset: Dataset,

        /// Trailing years to show. Defaults to the config value.
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=10))]
        years: Option<u32>,
    },
    /// Export windowed observations as CSV.
    Export {
        /// Dataset: unemployment or cpi.
        dataset: Dataset,

        /// Output CSV path.
        #[arg(long)]
        out: PathBuf,
    },
    /// Cache management commands.
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// List cached payloads with size and modification time.
    Status,
    /// Remove all cached payloads.
    Clear {
        /// Actually delete (without this flag, only previews what would be removed).
        #[arg(long, default_value_t = false)]
        confirm: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.cache_dir)?;
    let today = Local::now().date_naive();
    log::debug!(
        "window {} years, terms from {}, api {}",
        config.window_years,
        config.terms_url,
        config.api_url
    );

    match cli.command {
        Commands::Terms => run_terms(&config, today),
        Commands::Fetch { dataset, force } => run_fetch(&config, dataset, force, today),
        Commands::Show { dataset, years } => {
            let mut config = config;
            if let Some(years) = years {
                config.window_years = years;
            }
            run_show(&config, dataset, today)
        }
        Commands::Export { dataset, out } => run_export(&config, dataset, &out, today),
        Commands::Cache { action } => {
            let cache = PayloadCache::new(config.resolved_cache_dir()?);
            match action {
                CacheAction::Status => run_cache_status(&cache),
                CacheAction::Clear { confirm } => run_cache_clear(&cache, confirm),
            }
        }
    }
}

fn load_config(path: Option<&Path>, cache_dir: Option<PathBuf>) -> Result<AppConfig> {
    let mut config = match path {
        Some(p) => {
            if !p.exists() {
                bail!("config file not found: {}", p.display());
            }
            let mut c = AppConfig::from_file(p)?;
            c.apply_env(|k| std::env::var(k).ok());
            c
        }
        None => AppConfig::load_default()?,
    };
    if cache_dir.is_some() {
        config.cache_dir = cache_dir;
    }
    Ok(config)
}

fn run_terms(config: &AppConfig, today: NaiveDate) -> Result<()> {
    let services = LiveServices::from_config(config)?;
    let pipeline = services.pipeline(config);
    let extraction = pipeline.extract_terms(today)?;
    let recent = extraction.recent(
        chrono::Datelike::year(&today),
        config.recent_years as i32,
    );

    println!("Presidential Terms (Last {} Years)", config.recent_years);
    println!();
    println!("{:<32} {:>6} {:>6}", "Name", "Start", "End");
    println!("{}", "-".repeat(46));
    for t in &recent {
        println!("{:<32} {:>6} {:>6}", t.name, t.start_year, t.end_year);
    }
    if !extraction.skipped.is_empty() {
        println!();
        println!("{} table row(s) skipped", extraction.skipped.len());
    }
    Ok(())
}

fn run_fetch(config: &AppConfig, dataset: Dataset, force: bool, today: NaiveDate) -> Result<()> {
    let services = LiveServices::from_config(config)?;
    let pipeline = services.pipeline(config);
    let loaded = pipeline.load_dataset(dataset, today, force)?;

    let verb = match loaded.source {
        PayloadSource::Cache => "Already cached",
        PayloadSource::Network => "Fetched",
    };
    println!(
        "{verb}: {} ({}-{}, {} series)",
        loaded.path.display(),
        loaded.key.start_year,
        loaded.key.end_year,
        loaded.key.series_ids.len()
    );
    println!(
        "Observations: {} ({} points skipped)",
        loaded.normalized.observations.len(),
        loaded.normalized.skipped.len()
    );
    Ok(())
}

fn chart(config: &AppConfig, dataset: Dataset, today: NaiveDate) -> Result<ChartOutcome> {
    let services = LiveServices::from_config(config)?;
    let pipeline = services.pipeline(config);
    let outcome = pipeline
        .chart(dataset, today, false)
        .with_context(|| format!("failed to load {dataset}"))?;
    if let Some(warning) = &outcome.terms_warning {
        eprintln!("WARNING: terms unavailable, no overlays: {warning}");
    }
    Ok(outcome)
}

fn run_show(config: &AppConfig, dataset: Dataset, today: NaiveDate) -> Result<()> {
    let outcome = chart(config, dataset, today)?;
    let chart = &outcome.chart;

    println!();
    println!("=== {} ===", chart.title);
    println!("Window:         {} to {}", chart.window.start, chart.window.end);
    println!("Y axis:         {}", chart.y_label);
    println!("Observations:   {}", chart.observations.len());
    if outcome.skipped_points > 0 {
        println!("Skipped points: {}", outcome.skipped_points);
    }

    println!();
    println!("--- Series ---");
    println!(
        "{:<30} {:<8} {:<8} {:>4} {:>9} {:>9} {:>9} {:>9} {:>9}",
        "Series", "From", "To", "N", "Latest", "Min", "Max", "6-Mo", "12-Mo"
    );
    println!("{}", "-".repeat(102));
    for s in &chart.summaries {
        println!(
            "{:<30} {:<8} {:<8} {:>4} {:>9.2} {:>9.2} {:>9.2} {:>9} {:>9}",
            s.label,
            s.first.format("%Y-%m").to_string(),
            s.last.format("%Y-%m").to_string(),
            s.count,
            s.latest,
            s.min,
            s.max,
            format_avg(s.latest_avg_6),
            format_avg(s.latest_avg_12),
        );
    }

    println!();
    println!("--- Overlays ---");
    for o in &chart.overlays {
        println!(
            "{:<32} {} to {}  {}",
            o.term.name, o.start, o.end, o.color
        );
    }

    println!();
    println!("--- Legend ---");
    for entry in chart.legend.entries() {
        let style = match entry.style {
            MarkStyle::Line { color, dash } => format!("line {color} {dash:?}"),
            MarkStyle::Shade { color, alpha } => format!("shade {color} alpha {alpha}"),
        };
        println!("{:<32} {}", entry.label, style);
    }
    println!();
    Ok(())
}

fn run_export(config: &AppConfig, dataset: Dataset, out: &Path, today: NaiveDate) -> Result<()> {
    let outcome = chart(config, dataset, today)?;
    let rows = export::write_csv(dataset, &outcome.chart, out)?;
    println!("Wrote {rows} rows to {}", out.display());
    Ok(())
}

fn run_cache_status(cache: &PayloadCache) -> Result<()> {
    let entries = cache.entries()?;
    let total: u64 = entries.iter().map(|e| e.size).sum();

    println!("Cache: {}", cache.cache_dir().display());
    println!("Payloads: {}", entries.len());
    println!("Total size: {}", format_size(total));
    if entries.is_empty() {
        return Ok(());
    }
    println!();
    println!("{:<44} {:>10}  {}", "File", "Size", "Modified");
    println!("{}", "-".repeat(74));
    for e in &entries {
        let modified = e
            .modified
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<44} {:>10}  {}", e.file_name, format_size(e.size), modified);
    }
    Ok(())
}

fn run_cache_clear(cache: &PayloadCache, confirm: bool) -> Result<()> {
    let entries = cache.entries()?;
    if entries.is_empty() {
        println!("Cache is empty: {}", cache.cache_dir().display());
        return Ok(());
    }

    println!("Found {} cached payload(s):", entries.len());
    for e in &entries {
        println!("  {} ({})", e.file_name, format_size(e.size));
    }

    if !confirm {
        println!();
        println!("Dry run: pass --confirm to actually delete.");
        return Ok(());
    }

    let removed = cache.clear()?;
    println!("Done. Removed {} payload(s).", removed.len());
    Ok(())
}

fn format_avg(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".to_string())
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["econgadget", "show", "cpi", "--years", "5"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Show {
                dataset: Dataset::Cpi,
                years: Some(5)
            }
        ));
        assert!(Cli::try_parse_from(["econgadget", "show", "gdp"]).is_err());
        assert!(Cli::try_parse_from(["econgadget", "show", "cpi", "--years", "0"]).is_err());
        let cli = Cli::try_parse_from(["econgadget", "cache", "clear", "--confirm"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Cache {
                action: CacheAction::Clear { confirm: true }
            }
        ));
    }

    #[test]
    fn sizes() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
