use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use jiff::Timestamp;
use shortest_core::error::{Result, StorageError};
use shortest_core::repository::{ReadRepository, Repository, UrlRecord};
use shortest_core::shortcode::ShortCode;
use tracing::trace;

/// In-memory implementation of the Repository trait using DashMap.
///
/// Two maps make up the index: `forward` maps a long URL to its code,
/// `reverse` maps a code to its record. Inserts lock the forward entry
/// before the reverse one and write the record before the forward link,
/// so a long URL is never visible without its record.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    forward: DashMap<String, ShortCode>,
    reverse: DashMap<ShortCode, UrlRecord>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            forward: DashMap::with_capacity(capacity),
            reverse: DashMap::with_capacity(capacity),
        }
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn has_long_url(&self, long_url: &str) -> Result<bool> {
        Ok(self.forward.contains_key(long_url))
    }

    async fn get_short_code(&self, long_url: &str) -> Result<Option<ShortCode>> {
        Ok(self.forward.get(long_url).map(|code| code.value().clone()))
    }

    async fn has_short_code(&self, code: &ShortCode) -> Result<bool> {
        Ok(self.reverse.contains_key(code))
    }

    async fn get_long_url(&self, code: &ShortCode) -> Result<Option<String>> {
        Ok(self
            .reverse
            .get(code)
            .map(|record| record.long_url.clone()))
    }

    async fn get_record(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        Ok(self.reverse.get(code).map(|record| record.value().clone()))
    }

    async fn list_all(&self) -> Result<Vec<UrlRecord>> {
        let mut records: Vec<UrlRecord> = self
            .reverse
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_unstable_by(|a, b| a.short_code.cmp(&b.short_code));
        Ok(records)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.reverse.len())
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, long_url: &str, code: &ShortCode, created_at: Timestamp) -> Result<()> {
        let forward = match self.forward.entry(long_url.to_owned()) {
            Entry::Occupied(existing) => {
                return Err(StorageError::UrlConflict {
                    long_url: long_url.to_owned(),
                    code: existing.get().to_string(),
                });
            }
            Entry::Vacant(vacant) => vacant,
        };

        match self.reverse.entry(code.clone()) {
            Entry::Occupied(_) => return Err(StorageError::CodeConflict(code.to_string())),
            Entry::Vacant(vacant) => {
                vacant.insert(UrlRecord::new(long_url, code.clone(), created_at));
            }
        }

        forward.insert(code.clone());
        trace!(code = %code, long_url, "stored mapping");
        Ok(())
    }

    async fn record_visit(&self, code: &ShortCode, visited_at: Timestamp) -> Result<bool> {
        let Some(mut record) = self.reverse.get_mut(code) else {
            return Ok(false);
        };

        record.visits = record.visits.saturating_add(1);
        record.last_visited = Some(visited_at);
        Ok(true)
    }
}
