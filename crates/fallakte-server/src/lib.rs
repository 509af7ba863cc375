//! Fallakte Server
//!
//! HTTP layer over the analysis pipeline: multipart batch upload,
//! single-document analyze and summarize, and a health endpoint. The
//! server keeps no state between requests; uploaded bytes never touch
//! disk.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use fallakte_extract::FormatExtractor;
use fallakte_llm::OllamaClient;
use handlers::{create_router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Completion client construction error
    #[error("Completion client error: {0}")]
    Completion(String),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the HTTP server
///
/// Initializes tracing, wires the extraction and completion boundaries
/// into the batch pipeline, and serves until interrupted.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    tracing_subscriber::fmt::init();

    info!("Starting Fallakte server");
    info!("Bind address: {}", config.bind_addr());
    info!("Completion endpoint: {}", config.ollama_endpoint);
    info!("Model: {}", config.model);
    info!(
        "Batch limits: {} documents, {} concurrent tasks",
        config.batch.max_documents, config.batch.concurrency
    );

    // The HTTP client's own timeout sits above the pipeline's completion
    // deadline so the pipeline is the one that fires.
    let client_timeout = config.analysis.completion_timeout() + std::time::Duration::from_secs(10);
    let completion = Arc::new(
        OllamaClient::with_timeout(&config.ollama_endpoint, &config.model, client_timeout)
            .map_err(|e| ServerError::Completion(e.to_string()))?,
    );

    // The batch pipeline and the single-document routes share one task
    // runner, so both surfaces see the same configuration.
    let task = Arc::new(fallakte_analysis::DocumentAnalysisTask::new(
        Arc::new(FormatExtractor),
        Arc::clone(&completion),
        config.analysis.clone(),
    ));
    let pipeline = Arc::new(fallakte_batch::BatchPipeline::from_task(
        Arc::clone(&task),
        config.batch.clone(),
    ));

    let state = AppState {
        pipeline,
        task,
        completion,
        model: config.model.clone(),
    };
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
