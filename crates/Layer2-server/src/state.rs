//! Shared application state

use std::sync::Arc;
use tokmeter_core::{ApiCredentials, TokenCalculator};

/// State shared by all handlers.
///
/// Normalization mode is fixed per calculator instance, so the server keeps
/// one calculator per mode and picks the right one per request. Both share
/// the same injected credentials, and each keeps its per-model backend
/// cache warm across requests.
#[derive(Clone)]
pub struct AppState {
    markdown: Arc<TokenCalculator>,
    raw: Arc<TokenCalculator>,
}

impl AppState {
    pub fn new(credentials: ApiCredentials) -> Self {
        Self {
            markdown: Arc::new(TokenCalculator::with_credentials(true, credentials.clone())),
            raw: Arc::new(TokenCalculator::with_credentials(false, credentials)),
        }
    }

    /// The calculator matching the request's preprocessing flag.
    pub fn calculator(&self, preprocess_markdown: bool) -> Arc<TokenCalculator> {
        if preprocess_markdown {
            Arc::clone(&self.markdown)
        } else {
            Arc::clone(&self.raw)
        }
    }
}
