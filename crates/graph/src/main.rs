//! citenet CLI
//!
//! Reads an analysis request (seed papers, references, citing papers) and
//! prints the citation network as JSON:
//! 1. Loads configuration
//! 2. Reads the request from a file or stdin
//! 3. Builds and ranks the network
//! 4. Writes nodes, edges and stats to stdout

use anyhow::Context;
use citenet_common::{config::AppConfig, errors::ErrorResponse, metrics, AppError, VERSION};
use citenet_graph::{read_request, GraphBuilder, InclusionOption, InputSource};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "citenet", version, about = "Build a ranked citation network around seed papers")]
struct Cli {
    /// Request document; stdin when omitted or "-"
    #[arg(short, long, env = "CITENET_INPUT")]
    input: Option<PathBuf>,

    /// Override the request's cited-paper inclusion (none, top, all)
    #[arg(long)]
    cited: Option<InclusionOption>,

    /// Override the request's citing-paper inclusion (none, top, all)
    #[arg(long)]
    citing: Option<InclusionOption>,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,

    /// Print an empty network instead of failing when no seed resolves
    #[arg(long)]
    allow_empty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;

    // Initialize tracing; stdout carries the result, so logs go to stderr
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    if config.observability.json_logging {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    metrics::register_metrics();

    info!(
        service = %config.observability.service_name,
        "Starting citenet v{}", VERSION
    );

    let source = InputSource::from_arg(cli.input);
    let request = match read_request(&source).await {
        Ok(request) => request.with_options(cli.cited, cli.citing),
        Err(err) => return fail(&err, cli.pretty),
    };

    let supplied = request.seed_papers.len();
    let analysis = config.analysis.clone();
    let result = tokio::task::spawn_blocking(move || {
        let builder = GraphBuilder::new(&analysis);
        request.run(&builder)
    })
    .await
    .context("analysis task failed")?;

    if !result.has_seeds() && !cli.allow_empty {
        let err = AppError::NoSeedPapers { supplied };
        return fail(&err, cli.pretty);
    }

    println!("{}", to_json(&result, cli.pretty)?);
    Ok(())
}

/// Log an error, print its structured body and exit non-zero
fn fail(err: &AppError, pretty: bool) -> anyhow::Result<()> {
    err.log();
    println!("{}", to_json(&ErrorResponse::from(err), pretty)?);
    std::process::exit(if err.is_client_error() { 2 } else { 1 });
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
