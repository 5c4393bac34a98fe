use std::sync::Arc;

use crate::config::Config;
use crate::layout::DocStyle;
use crate::optimize::OptimizeBackend;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable optimization backend. Production: LlmOptimizer over the Anthropic API.
    pub optimizer: Arc<dyn OptimizeBackend>,
    /// Transient in-memory editor sessions — nothing persists beyond the process.
    pub sessions: SessionStore,
    /// Retained for handlers that need deployment settings; currently only
    /// startup reads it.
    #[allow(dead_code)]
    pub config: Config,
    /// Page geometry and typography shared by every export.
    pub doc_style: DocStyle,
}
