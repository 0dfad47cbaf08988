use std::sync::Arc;

use shortest_core::Shortener;

#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<dyn Shortener>,
    pub fallback_url: String,
}

impl AppState {
    pub fn new(shortener: Arc<dyn Shortener>, fallback_url: impl Into<String>) -> Self {
        Self {
            shortener,
            fallback_url: fallback_url.into(),
        }
    }

    /// Public base URL short codes are joined with.
    pub fn base_url(&self) -> &str {
        self.shortener.base_url()
    }
}
