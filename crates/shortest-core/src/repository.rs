use crate::error::Result;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A stored URL record in the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// The original URL that was shortened.
    pub long_url: String,
    /// The code the URL is reachable under.
    pub short_code: ShortCode,
    /// Number of resolved redirects.
    pub visits: u64,
    /// Time of the most recent visit, `None` until the first one.
    pub last_visited: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl UrlRecord {
    /// Creates a record that has never been visited.
    pub fn new(long_url: impl Into<String>, short_code: ShortCode, created_at: Timestamp) -> Self {
        Self {
            long_url: long_url.into(),
            short_code,
            visits: 0,
            last_visited: None,
            created_at,
        }
    }
}

/// A read-only view of a repository.
///
/// This trait provides only the read operations from [`Repository`],
/// so request paths that never mutate can be handed a narrower type.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Checks whether a long URL already has a short code.
    async fn has_long_url(&self, long_url: &str) -> Result<bool>;

    /// Returns the short code a long URL is mapped to.
    async fn get_short_code(&self, long_url: &str) -> Result<Option<ShortCode>>;

    /// Checks whether a short code already exists in the repository.
    async fn has_short_code(&self, code: &ShortCode) -> Result<bool>;

    /// Returns the long URL for a short code.
    async fn get_long_url(&self, code: &ShortCode) -> Result<Option<String>>;

    /// Retrieves the full record for a given short code.
    /// Returns `None` if the code does not exist.
    async fn get_record(&self, code: &ShortCode) -> Result<Option<UrlRecord>>;

    /// Returns every record, sorted ascending by short code.
    async fn list_all(&self) -> Result<Vec<UrlRecord>>;

    /// Number of stored mappings.
    async fn count(&self) -> Result<usize>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new mapping with zero visits.
    ///
    /// Callers check [`ReadRepository::has_short_code`] first. Implementations
    /// must still refuse to overwrite: `Err(CodeConflict)` if the code is
    /// taken, `Err(UrlConflict)` if the long URL got mapped in the meantime.
    async fn insert(&self, long_url: &str, code: &ShortCode, created_at: Timestamp) -> Result<()>;

    /// Counts one visit and stamps `last_visited`.
    /// Returns `false` without touching anything if the code is unknown.
    async fn record_visit(&self, code: &ShortCode, visited_at: Timestamp) -> Result<bool>;
}
