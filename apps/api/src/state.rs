use std::sync::Arc;

use crate::collector::store::SessionStore;
use crate::llm_client::GenerativeModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// In-memory form sessions. Dropped with the process.
    pub sessions: Arc<SessionStore>,
    /// Hosted model backend. Default: GeminiClient; tests inject a scripted fake.
    pub model: Arc<dyn GenerativeModel>,
}
