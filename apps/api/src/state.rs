use std::sync::Arc;

use crate::llm_client::StructuredGenerator;
use crate::templates::TemplateCatalog;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Structured-generation backend. Default: GeminiClient. Tests swap in a stub.
    pub generator: Arc<dyn StructuredGenerator>,
    pub templates: Arc<TemplateCatalog>,
}
