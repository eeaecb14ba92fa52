pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;
use crate::templates::handlers as template_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation API
        .route(
            "/generate-minimal",
            post(handlers::handle_generate_minimal),
        )
        .route(
            "/generate-professional",
            post(handlers::handle_generate_professional),
        )
        .route("/generate-team", post(handlers::handle_generate_team))
        // Paths the original web client calls
        .route("/api/generate", post(handlers::handle_generate_minimal))
        .route(
            "/api/generate-professional",
            post(handlers::handle_generate_professional),
        )
        .route("/api/generate-team", post(handlers::handle_generate_team))
        // Template catalog (read-only)
        .route("/templates", get(template_handlers::handle_list_templates))
        .route("/templates/:id", get(template_handlers::handle_get_template))
        .with_state(state)
}
