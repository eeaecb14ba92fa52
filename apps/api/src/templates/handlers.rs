//! Read-only Axum handlers for the industry template catalog.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::AppError;
use crate::state::AppState;
use crate::templates::IndustryTemplate;

/// GET /templates
pub async fn handle_list_templates(State(state): State<AppState>) -> Json<Vec<IndustryTemplate>> {
    Json(state.templates.list().to_vec())
}

/// GET /templates/:id
pub async fn handle_get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<IndustryTemplate>, AppError> {
    state
        .templates
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Template '{id}' not found")))
}
