//! HTTP request handlers
//!
//! Implements the multipart batch upload, the single-document analyze and
//! summarize operations, and the health check using axum. Uploaded file
//! bytes live only for the duration of their request.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use fallakte_analysis::DocumentAnalysisTask;
use fallakte_batch::{BatchError, BatchPipeline};
use fallakte_domain::{
    AnalysisOutcome, BatchResult, Document, DocumentFormat, SummaryOutcome, TextCompletion,
    TextExtractor,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Upload size limit for one batch request
pub const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Shared application state
pub struct AppState<E, C> {
    /// Batch execution pipeline
    pub pipeline: Arc<BatchPipeline<E, C>>,
    /// Per-document task runner, shared with the pipeline
    pub task: Arc<DocumentAnalysisTask<E, C>>,
    /// Completion service handle, for health probing
    pub completion: Arc<C>,
    /// Configured model name, surfaced in the health response
    pub model: String,
}

impl<E, C> Clone for AppState<E, C> {
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
            task: Arc::clone(&self.task),
            completion: Arc::clone(&self.completion),
            model: self.model.clone(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok" when the completion service answers, "degraded" otherwise
    pub status: String,
    /// Configured model name
    pub model: String,
    /// Accepted file format tags
    pub accepted_formats: &'static [&'static str],
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Batch rejected wholesale
    Batch(BatchError),
    /// Malformed multipart request
    BadRequest(String),
}

impl From<BatchError> for AppError {
    fn from(e: BatchError) -> Self {
        AppError::Batch(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Batch(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };
        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

/// POST /api/batch - Analyze an uploaded batch of documents
///
/// Every multipart field carrying a filename becomes one document; field
/// names are ignored. Validation errors reject the whole batch with 400.
async fn run_batch<E, C>(
    State(state): State<AppState<E, C>>,
    mut multipart: Multipart,
) -> Result<Json<BatchResult>, AppError>
where
    E: TextExtractor + 'static,
    C: TextCompletion + 'static,
{
    let mut documents = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        documents.push(Document::from_filename(filename, bytes.to_vec()));
    }

    info!(documents = documents.len(), "batch request received");
    let result = state.pipeline.run(documents).await?;
    Ok(Json(result))
}

/// Read exactly one uploaded file from a multipart request
///
/// The first field carrying a filename wins; a request without one is
/// rejected.
async fn single_document(multipart: &mut Multipart) -> Result<Document, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        return Ok(Document::from_filename(filename, bytes.to_vec()));
    }
    Err(AppError::BadRequest("Keine Datei im Request".to_string()))
}

/// POST /api/analyze - Full analysis of one uploaded document
///
/// Same per-document pipeline as the batch path, without cross-referencing
/// or report building. Per-document failures are part of the outcome body,
/// not HTTP errors.
async fn analyze_document<E, C>(
    State(state): State<AppState<E, C>>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisOutcome>, AppError>
where
    E: TextExtractor + 'static,
    C: TextCompletion + 'static,
{
    let document = single_document(&mut multipart).await?;
    info!(filename = %document.filename, "analyze request received");
    Ok(Json(state.task.run(document).await))
}

/// POST /api/summarize - Free-text summary of one uploaded document
async fn summarize_document<E, C>(
    State(state): State<AppState<E, C>>,
    mut multipart: Multipart,
) -> Result<Json<SummaryOutcome>, AppError>
where
    E: TextExtractor + 'static,
    C: TextCompletion + 'static,
{
    let document = single_document(&mut multipart).await?;
    info!(filename = %document.filename, "summarize request received");
    Ok(Json(state.task.summarize(document).await))
}

/// GET /api/health - Service health and capability description
async fn health_check<E, C>(State(state): State<AppState<E, C>>) -> Json<HealthResponse>
where
    E: TextExtractor + 'static,
    C: TextCompletion + 'static,
{
    let status = if state.completion.healthy().await {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        model: state.model.clone(),
        accepted_formats: DocumentFormat::accepted_tags(),
    })
}

/// Create the axum router with all routes
pub fn create_router<E, C>(state: AppState<E, C>) -> AxumRouter
where
    E: TextExtractor + 'static,
    C: TextCompletion + 'static,
{
    AxumRouter::new()
        .route("/api/batch", post(run_batch::<E, C>))
        .route("/api/analyze", post(analyze_document::<E, C>))
        .route("/api/summarize", post(summarize_document::<E, C>))
        .route("/api/health", get(health_check::<E, C>))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
