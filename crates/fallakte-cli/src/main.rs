//! Fallakte CLI - runs a batch analysis over local files and prints the
//! investigator report or the full result as JSON.

use anyhow::Context;
use clap::Parser;
use fallakte_analysis::AnalysisConfig;
use fallakte_batch::{BatchConfig, BatchPipeline};
use fallakte_domain::Document;
use fallakte_extract::FormatExtractor;
use fallakte_llm::OllamaClient;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "fallakte", version, about = "Batch analysis of evidence documents")]
struct Cli {
    /// Files to analyze
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Completion service endpoint
    #[arg(long, default_value = "http://localhost:11434")]
    endpoint: String,

    /// Model name
    #[arg(long, default_value = "llama3.2:3b")]
    model: String,

    /// Concurrent analysis tasks
    #[arg(long, default_value_t = 3)]
    concurrency: usize,

    /// Print the full batch result as JSON instead of the report
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries only the report or JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut batch_config = BatchConfig::default();
    batch_config.concurrency = cli.concurrency;
    batch_config.validate().map_err(anyhow::Error::msg)?;

    let mut documents = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        let content = std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .with_context(|| format!("invalid filename: {}", path.display()))?;
        documents.push(Document::from_filename(filename, content));
    }

    let analysis_config = AnalysisConfig::default();
    let client_timeout = analysis_config.completion_timeout() + Duration::from_secs(10);
    let completion =
        Arc::new(OllamaClient::with_timeout(&cli.endpoint, &cli.model, client_timeout)?);

    let pipeline = BatchPipeline::new(
        Arc::new(FormatExtractor),
        completion,
        analysis_config,
        batch_config,
    );

    let result = pipeline.run(documents).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.report);
        eprintln!(
            "{} verarbeitet, {} fehlgeschlagen ({:.1}s)",
            result.processed, result.failed, result.elapsed_secs
        );
    }

    Ok(())
}
