use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};

use redline_engine::{ApplyOutcome, AssessmentView, RevisionEngine};
use redline_types::{ChangeBlock, ChangeDescriptor, UpdateMetadata};

use crate::error::ApiError;

/// Health check response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Response body for the mutating endpoints.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApplyResponse {
    pub message: String,
    pub converged: bool,
}

impl ApplyResponse {
    fn new(message: &str, outcome: ApplyOutcome) -> Self {
        Self {
            message: message.to_string(),
            converged: outcome.converged,
        }
    }
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// GET /api/assessment/:service
pub async fn assessment(
    State(engine): State<Arc<RevisionEngine>>,
    Path(service): Path<String>,
) -> Result<Json<AssessmentView>, ApiError> {
    Ok(Json(engine.assessment(&service)?))
}

/// GET /api/metadata/:service
pub async fn metadata(
    State(engine): State<Arc<RevisionEngine>>,
    Path(service): Path<String>,
) -> Result<Json<UpdateMetadata>, ApiError> {
    Ok(Json(engine.metadata(&service)?))
}

/// POST /api/accept_change/:service
pub async fn accept_change(
    State(engine): State<Arc<RevisionEngine>>,
    Path(service): Path<String>,
    Json(descriptor): Json<ChangeDescriptor>,
) -> Result<Json<ApplyResponse>, ApiError> {
    let outcome = engine.accept_change(&service, descriptor)?;
    Ok(Json(ApplyResponse::new(
        "Change accepted and files updated",
        outcome,
    )))
}

/// POST /api/reject_change/:service
pub async fn reject_change(
    State(engine): State<Arc<RevisionEngine>>,
    Path(service): Path<String>,
    Json(descriptor): Json<ChangeDescriptor>,
) -> Result<Json<ApplyResponse>, ApiError> {
    let outcome = engine.reject_change(&service, descriptor)?;
    Ok(Json(ApplyResponse::new(
        "Change rejected and files updated",
        outcome,
    )))
}

/// POST /api/accept_block_change/:service
///
/// The body is a bare JSON array of descriptors, resolved as one block.
pub async fn accept_block_change(
    State(engine): State<Arc<RevisionEngine>>,
    Path(service): Path<String>,
    Json(block): Json<ChangeBlock>,
) -> Result<Json<ApplyResponse>, ApiError> {
    let outcome = engine.accept_block(&service, &block)?;
    Ok(Json(ApplyResponse::new(
        "Block change accepted and files updated",
        outcome,
    )))
}
