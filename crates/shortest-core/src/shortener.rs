use crate::repository::UrlRecord;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

type Result<T> = std::result::Result<T, crate::error::ShortenerError>;

/// Usage statistics of one short code, as exposed to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlStatistics {
    pub long_url: String,
    pub short_code: ShortCode,
    /// The code joined with the public base URL.
    pub short_url: String,
    pub visits: u64,
    pub last_visited: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl UrlStatistics {
    pub fn from_record(record: UrlRecord, base_url: &str) -> Self {
        Self {
            short_url: record.short_code.to_url(base_url),
            long_url: record.long_url,
            short_code: record.short_code,
            visits: record.visits,
            last_visited: record.last_visited,
            created_at: record.created_at,
        }
    }
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Returns the short code for a long URL, creating the mapping on first use.
    async fn encode(&self, long_url: &str) -> Result<ShortCode>;

    /// Resolves a short code to its long URL.
    /// Returns `Err(NotFound)` if the code was never issued.
    async fn decode(&self, code: &ShortCode) -> Result<String>;

    /// Returns the usage statistics of a short code.
    async fn statistics(&self, code: &ShortCode) -> Result<UrlStatistics>;

    /// Returns statistics for every mapping, sorted by short code.
    async fn list(&self) -> Result<Vec<UrlStatistics>>;

    /// Counts a visit. Returns `false` for unknown codes.
    async fn record_visit(&self, code: &ShortCode) -> Result<bool>;

    /// Resolves a code for a redirect and counts exactly one visit.
    async fn visit(&self, code: &ShortCode) -> Result<String>;

    /// The public base URL short codes are joined with.
    fn base_url(&self) -> &str;

    /// Number of stored mappings.
    async fn count(&self) -> Result<usize>;
}
