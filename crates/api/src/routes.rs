//! API routes
//!
//! One intake operation - submit a batch of links - plus a liveness check.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use linkd_service::Processed;
use linkd_store::Record;

use crate::error::{ApiError, Result};
use crate::state::AppState;

// =============================================================================
// Request / response types
// =============================================================================

/// Body of `POST /links`
#[derive(Debug, Deserialize)]
pub struct ProcessLinksRequest {
    /// Links to check, probed in this order
    pub links: Vec<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Server status
    pub status: &'static str,
}

// =============================================================================
// Routes
// =============================================================================

/// Build the API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/links", post(process_links))
        .route("/health", get(health))
        .with_state(state)
}

// =============================================================================
// Handlers
// =============================================================================

/// Submit a batch of links
///
/// POST /links
///
/// Returns `201 Created` with the finished record. A batch accepted while
/// the service is shutting down is parked for replay and still answered
/// `201`, with every status `unknown`.
async fn process_links(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ProcessLinksRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Record>)> {
    let Json(request) = payload.map_err(|err| ApiError::BadRequest(err.body_text()))?;

    // The batch-lifetime scope: cancelled when the request deadline
    // elapses, checked cooperatively by the pipeline before each probe.
    let request_scope = CancellationToken::new();
    let deadline = tokio::spawn({
        let scope = request_scope.clone();
        let timeout = state.request_timeout;
        async move {
            tokio::time::sleep(timeout).await;
            scope.cancel();
        }
    });

    let outcome = state
        .processor
        .process(&state.shutdown, &request_scope, &request.links)
        .await;
    deadline.abort();

    match outcome {
        Ok(Processed::Complete(record)) | Ok(Processed::Stopping(record)) => {
            Ok((StatusCode::CREATED, Json(record)))
        }
        Err(err) => Err(err.into()),
    }
}

/// Liveness check
///
/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
