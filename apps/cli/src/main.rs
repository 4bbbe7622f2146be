//! FundInsight CLI - fetch, score, and rank a cohort of funds.

mod config;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use config::Config;
use fundinsight_core::{RankedCohort, RankingService};
use fundinsight_fund_data::{
    FetchOrchestrator, FundFetcher, MorningstarProvider, RateLimitedTransport, TransportConfig,
};

/// Rank a cohort of funds by fetching their data from the provider and
/// scoring each one relative to the batch.
#[derive(Parser)]
#[command(name = "fundinsight", version, about)]
struct Args {
    /// Fund codes to rank.
    codes: Vec<String>,

    /// File with one fund code per line, appended to the positional codes.
    #[arg(long)]
    input: Option<PathBuf>,

    /// JSON file mapping fund codes to preferred display names.
    #[arg(long)]
    names: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let config = Config::from_env();

    let codes = collect_codes(&args)?;
    if codes.is_empty() {
        anyhow::bail!("no fund codes given; pass codes as arguments or via --input");
    }

    let name_overrides = load_name_overrides(args.names.as_deref())?;

    let transport = Arc::new(RateLimitedTransport::new(TransportConfig {
        max_concurrent: config.max_concurrent,
        min_delay: config.request_delay,
        timeout: config.timeout,
        ..TransportConfig::default()
    }));
    let provider = Arc::new(MorningstarProvider::new(transport));
    let fetcher = FundFetcher::with_name_overrides(provider, name_overrides);
    let orchestrator = FetchOrchestrator::new(fetcher, config.max_concurrent);
    let service = RankingService::new(orchestrator);

    tracing::info!("Ranking {} candidate codes", codes.len());
    let cohort = service.rank_funds(&codes).await?;

    print_results(&cohort);
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Positional codes plus the optional `--input` file, one code per line.
fn collect_codes(args: &Args) -> anyhow::Result<Vec<String>> {
    let mut codes = args.codes.clone();

    if let Some(path) = &args.input {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading code list {}", path.display()))?;
        codes.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string),
        );
    }

    Ok(codes)
}

fn load_name_overrides(path: Option<&std::path::Path>) -> anyhow::Result<HashMap<String, String>> {
    let Some(path) = path else {
        return Ok(HashMap::new());
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading name mapping {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("parsing name mapping {}", path.display()))
}

fn print_results(cohort: &RankedCohort) {
    println!(
        "Requested {}, fetched {}, failed {}",
        cohort.summary.requested, cohort.summary.fetched, cohort.summary.failed
    );

    if cohort.ranked.is_empty() {
        println!("Nothing to rank.");
    } else {
        println!(
            "{:>4}  {:<8} {:<28} {:>6}  {:>5} {:>5} {:>5} {:>5} {:>5} {:>5}",
            "Rank", "Code", "Name", "Total", "Fee", "Scale", "YTD", "5Y", "Exc", "Age"
        );
        for entry in &cohort.ranked {
            let s = entry.factor_scores;
            println!(
                "{:>4}  {:<8} {:<28} {:>6.1}  {:>5.1} {:>5.1} {:>5.1} {:>5.1} {:>5.1} {:>5.1}",
                entry.rank,
                entry.fund.code,
                entry.fund.name,
                entry.composite_score,
                s.fee_reasonableness,
                s.scale_fitness,
                s.short_term_performance,
                s.long_term_performance,
                s.excess_return_quality,
                s.stability,
            );
        }
    }

    for failure in &cohort.failures {
        println!(
            "FAILED  {} ({}): {}",
            failure.code,
            failure.kind.as_str(),
            failure.message
        );
    }
}
