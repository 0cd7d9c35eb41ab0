//! ReguloSCAN: variant prioritisation from VEP, CADD and GTEx evidence.
//! Entry point for the `reguloscan` binary.

mod config;
mod export;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use reguloscan_common::VariantQuery;
use reguloscan_ranker::cadd_provider::CaddClientAdapter;
use reguloscan_ranker::gtex_provider::GtexClientAdapter;
use reguloscan_ranker::vep_provider::VepClientAdapter;
use reguloscan_ranker::{BatchSummary, EvidenceScorer};
use reguloscan_sources::{CaddClient, GtexClient, VepClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "reguloscan", version, about = "Score and prioritise genetic variants")]
struct Cli {
    /// Path to reguloscan.toml
    #[arg(long, global = true, env = "REGULOSCAN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score one or more variant identifiers
    Score {
        #[arg(required = true)]
        variants: Vec<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Score every variant listed in a CSV file
    Batch {
        #[arg(short, long)]
        input: PathBuf,

        /// Column holding the variant identifiers
        #[arg(long, default_value = "Variant")]
        column: String,

        /// Output CSV (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn build_scorer(config: &config::Config) -> anyhow::Result<EvidenceScorer> {
    let sources = &config.sources;
    let client = sources.build_client()?;

    Ok(EvidenceScorer::new(
        Arc::new(VepClientAdapter::new(VepClient::new(client.clone(), sources))),
        Arc::new(CaddClientAdapter::new(CaddClient::new(client.clone(), sources))),
        Arc::new(GtexClientAdapter::new(GtexClient::new(client, sources))),
        sources.tissue.clone(),
        &config.scoring,
    ))
}

async fn run_score(scorer: &EvidenceScorer, ids: &[String], format: OutputFormat) -> anyhow::Result<()> {
    let variants = ids
        .iter()
        .map(VariantQuery::new)
        .collect::<Result<Vec<_>, _>>()?;

    let results = scorer.score_batch(&variants).await;

    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Table => write!(stdout, "{}", export::render_table(&results))?,
        OutputFormat::Json => writeln!(stdout, "{}", serde_json::to_string_pretty(&results)?)?,
    }
    Ok(())
}

async fn run_batch(
    scorer: &EvidenceScorer,
    input: &Path,
    column: &str,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let file = File::open(input)
        .with_context(|| format!("Failed to open {}", input.display()))?;
    let variants = export::read_variants(file, column)?;
    info!("Scoring {} variants from {}", variants.len(), input.display());

    let start = Instant::now();
    let results = scorer.score_batch(&variants).await;
    let summary = BatchSummary::from_results(&results, start.elapsed());

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            export::write_results(BufWriter::new(file), &results)?;
            info!("Results written to {}", path.display());
        }
        None => export::write_results(io::stdout().lock(), &results)?,
    }

    info!(
        total = summary.total,
        high = summary.high,
        medium = summary.medium,
        low = summary.low,
        degraded = summary.degraded,
        runtime_secs = summary.runtime_secs,
        "Batch complete"
    );
    let m = &summary.mean_evidence;
    info!(
        regulatory = m.regulatory,
        functional = m.functional,
        expression = m.expression,
        conservation = m.conservation,
        "Mean evidence contribution"
    );
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries results
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("reguloscan=info,warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    info!("ReguloSCAN {}", env!("CARGO_PKG_VERSION"));

    let config = config::Config::load(cli.config.as_deref())?;
    info!(
        "Configuration loaded. Tissue: {}, thresholds: high >= {}, medium >= {}",
        config.sources.tissue, config.scoring.thresholds.high, config.scoring.thresholds.medium
    );

    let scorer = build_scorer(&config)?;

    match &cli.command {
        Command::Score { variants, format } => run_score(&scorer, variants, *format).await,
        Command::Batch { input, column, output } => {
            run_batch(&scorer, input, column, output.as_deref()).await
        }
    }
}
