//! Axum route handlers for the Generation API.
//!
//! Bodies that fail JSON extraction are reported as `AppError::Validation` so
//! every error keeps the `{ "error": ... }` shape.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::errors::AppError;
use crate::generation::gateway::{generate, GenerationRequest};
use crate::generation::models::{
    GenerationResult, MinimalRequest, ProfessionalRequest, TeamRequest,
};
use crate::state::AppState;

/// POST /generate-minimal
///
/// Tailored resume and cover letter.
pub async fn handle_generate_minimal(
    State(state): State<AppState>,
    payload: Result<Json<MinimalRequest>, JsonRejection>,
) -> Result<Json<GenerationResult>, AppError> {
    let Json(request) = payload?;
    run(&state, GenerationRequest::Minimal(request)).await
}

/// POST /generate-professional
///
/// Tailored documents plus a scored fit analysis.
pub async fn handle_generate_professional(
    State(state): State<AppState>,
    payload: Result<Json<ProfessionalRequest>, JsonRejection>,
) -> Result<Json<GenerationResult>, AppError> {
    let Json(request) = payload?;
    run(&state, GenerationRequest::Professional(request)).await
}

/// POST /generate-team
///
/// Industry-template driven generation with extended analysis and metadata.
/// Requires `industry` and the `template` object.
pub async fn handle_generate_team(
    State(state): State<AppState>,
    payload: Result<Json<TeamRequest>, JsonRejection>,
) -> Result<Json<GenerationResult>, AppError> {
    let Json(request) = payload?;
    run(&state, GenerationRequest::Team(request)).await
}

async fn run(
    state: &AppState,
    request: GenerationRequest,
) -> Result<Json<GenerationResult>, AppError> {
    let result = generate(state.generator.as_ref(), &state.templates, request).await?;
    Ok(Json(result))
}
