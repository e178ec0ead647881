use std::sync::Arc;

use crate::providers::CompletionBackend;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum
/// extractors. The two backends sit behind the `CompletionBackend` trait,
/// so swapping a provider means swapping the implementation, not the handlers.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub openai: Arc<dyn CompletionBackend>,
    pub claude: Arc<dyn CompletionBackend>,
}
