use crate::clock::{Clock, SystemClock};
use async_trait::async_trait;
use shortest_core::{
    Repository, ShortCode, Shortener, ShortenerError, StorageError, UrlStatistics,
};
use shortest_generator::Generator;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};
use typed_builder::TypedBuilder;

type Result<T> = std::result::Result<T, ShortenerError>;

/// Draws per encode before giving up with `GenerationExhausted`.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 16;

/// Configures a [`ShortenerService`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct ShortenerSettings {
    /// Public base URL that codes are appended to.
    #[builder(setter(into))]
    pub base_url: String,
    /// Upper limit on generator draws for a single encode.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
}

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Repository` and a `Generator` to handle:
/// - Idempotent encoding (one code per long URL)
/// - Collision retry against the repository, bounded by `max_attempts`
/// - Visit bookkeeping for the redirect path
#[derive(Debug, Clone)]
pub struct ShortenerService<R, G, C = SystemClock> {
    repository: Arc<R>,
    generator: Arc<G>,
    clock: Arc<C>,
    settings: ShortenerSettings,
}

impl<R: Repository, G: Generator> ShortenerService<R, G, SystemClock> {
    /// Creates a new `ShortenerService` backed by the system clock.
    pub fn new(repository: R, generator: G, settings: ShortenerSettings) -> Self {
        Self::with_clock(repository, generator, SystemClock, settings)
    }
}

impl<R: Repository, G: Generator, C: Clock> ShortenerService<R, G, C> {
    pub fn with_clock(repository: R, generator: G, clock: C, settings: ShortenerSettings) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
            clock: Arc::new(clock),
            settings,
        }
    }

    pub fn settings(&self) -> &ShortenerSettings {
        &self.settings
    }

    fn statistics_of(&self, record: shortest_core::UrlRecord) -> UrlStatistics {
        UrlStatistics::from_record(record, &self.settings.base_url)
    }
}

#[async_trait]
impl<R: Repository, G: Generator, C: Clock> Shortener for ShortenerService<R, G, C> {
    async fn encode(&self, long_url: &str) -> Result<ShortCode> {
        if let Some(code) = self.repository.get_short_code(long_url).await? {
            trace!(code = %code, long_url, "long url already mapped");
            return Ok(code);
        }

        let attempts = self.settings.max_attempts;
        for attempt in 1..=attempts {
            let candidate: ShortCode = self.generator.generate().into();

            if self.repository.has_short_code(&candidate).await? {
                debug!(code = %candidate, attempt, "short code collision, drawing again");
                continue;
            }

            match self
                .repository
                .insert(long_url, &candidate, self.clock.now())
                .await
            {
                Ok(()) => {
                    info!(code = %candidate, long_url, "created short code");
                    return Ok(candidate);
                }
                Err(StorageError::CodeConflict(_)) => {
                    debug!(code = %candidate, attempt, "short code taken concurrently, drawing again");
                }
                Err(StorageError::UrlConflict { code, .. }) => {
                    debug!(code = %code, long_url, "long url mapped concurrently");
                    return Ok(ShortCode::new_unchecked(code));
                }
                Err(other) => return Err(other.into()),
            }
        }

        // a concurrent encode may have mapped this URL while every draw collided
        if let Some(code) = self.repository.get_short_code(long_url).await? {
            debug!(code = %code, long_url, "long url mapped concurrently");
            return Ok(code);
        }

        warn!(attempts, long_url, "no free short code left");
        Err(ShortenerError::GenerationExhausted { attempts })
    }

    async fn decode(&self, code: &ShortCode) -> Result<String> {
        trace!(code = %code, "decoding short code");

        self.repository
            .get_long_url(code)
            .await?
            .ok_or_else(|| ShortenerError::NotFound(code.to_string()))
    }

    async fn statistics(&self, code: &ShortCode) -> Result<UrlStatistics> {
        let record = self
            .repository
            .get_record(code)
            .await?
            .ok_or_else(|| ShortenerError::NotFound(code.to_string()))?;

        Ok(self.statistics_of(record))
    }

    async fn list(&self) -> Result<Vec<UrlStatistics>> {
        let records = self.repository.list_all().await?;
        Ok(records
            .into_iter()
            .map(|record| self.statistics_of(record))
            .collect())
    }

    async fn record_visit(&self, code: &ShortCode) -> Result<bool> {
        let counted = self.repository.record_visit(code, self.clock.now()).await?;
        if !counted {
            trace!(code = %code, "visit for unknown short code ignored");
        }
        Ok(counted)
    }

    async fn visit(&self, code: &ShortCode) -> Result<String> {
        let long_url = self.decode(code).await?;
        self.record_visit(code).await?;
        debug!(code = %code, long_url = %long_url, "resolved redirect");
        Ok(long_url)
    }

    fn base_url(&self) -> &str {
        &self.settings.base_url
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.repository.count().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::test_clock::TestClock;
    use jiff::{SignedDuration, Timestamp};
    use shortest_core::{ReadRepository, UrlRecord};
    use shortest_generator::{RandomGenerator, RandomGeneratorSettings, SeqGenerator};
    use shortest_storage::InMemoryRepository;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    const BASE_URL: &str = "http://short.est";

    /// Hands out a fixed list of codes, then repeats the last one.
    struct ScriptedGenerator {
        codes: Mutex<VecDeque<&'static str>>,
        last: Mutex<&'static str>,
    }

    impl ScriptedGenerator {
        fn new(codes: &[&'static str]) -> Self {
            Self {
                codes: Mutex::new(codes.iter().copied().collect()),
                last: Mutex::new(codes.last().copied().unwrap_or_default()),
            }
        }
    }

    impl Generator for ScriptedGenerator {
        type Output = ShortCode;

        fn generate(&self) -> Self::Output {
            let next = self.codes.lock().unwrap().pop_front();
            let code = next.unwrap_or_else(|| *self.last.lock().unwrap());
            ShortCode::new_unchecked(code)
        }
    }

    fn settings() -> ShortenerSettings {
        ShortenerSettings::builder().base_url(BASE_URL).build()
    }

    fn epoch() -> Timestamp {
        Timestamp::from_second(1_700_000_000).unwrap()
    }

    fn test_service() -> ShortenerService<InMemoryRepository, SeqGenerator> {
        ShortenerService::new(InMemoryRepository::new(), SeqGenerator::new(), settings())
    }

    fn scripted_service(
        codes: &[&'static str],
        max_attempts: u32,
    ) -> ShortenerService<InMemoryRepository, ScriptedGenerator, TestClock> {
        let settings = ShortenerSettings::builder()
            .base_url(BASE_URL)
            .max_attempts(max_attempts)
            .build();
        ShortenerService::with_clock(
            InMemoryRepository::new(),
            ScriptedGenerator::new(codes),
            TestClock::new(epoch()),
            settings,
        )
    }

    type StorageResult<T> = std::result::Result<T, StorageError>;

    /// Maps `long_url` under `code` behind the caller's back on the first
    /// collision check, and reports every candidate as taken.
    struct RacingRepository {
        inner: InMemoryRepository,
        long_url: &'static str,
        code: &'static str,
        raced: Mutex<bool>,
    }

    #[async_trait]
    impl ReadRepository for RacingRepository {
        async fn has_long_url(&self, long_url: &str) -> StorageResult<bool> {
            self.inner.has_long_url(long_url).await
        }

        async fn get_short_code(&self, long_url: &str) -> StorageResult<Option<ShortCode>> {
            self.inner.get_short_code(long_url).await
        }

        async fn has_short_code(&self, _code: &ShortCode) -> StorageResult<bool> {
            let first = !std::mem::replace(&mut *self.raced.lock().unwrap(), true);
            if first {
                self.inner
                    .insert(self.long_url, &code(self.code), epoch())
                    .await?;
            }
            Ok(true)
        }

        async fn get_long_url(&self, code: &ShortCode) -> StorageResult<Option<String>> {
            self.inner.get_long_url(code).await
        }

        async fn get_record(&self, code: &ShortCode) -> StorageResult<Option<UrlRecord>> {
            self.inner.get_record(code).await
        }

        async fn list_all(&self) -> StorageResult<Vec<UrlRecord>> {
            self.inner.list_all().await
        }

        async fn count(&self) -> StorageResult<usize> {
            self.inner.count().await
        }
    }

    #[async_trait]
    impl Repository for RacingRepository {
        async fn insert(
            &self,
            long_url: &str,
            code: &ShortCode,
            created_at: Timestamp,
        ) -> StorageResult<()> {
            self.inner.insert(long_url, code, created_at).await
        }

        async fn record_visit(
            &self,
            code: &ShortCode,
            visited_at: Timestamp,
        ) -> StorageResult<bool> {
            self.inner.record_visit(code, visited_at).await
        }
    }

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    #[tokio::test]
    async fn encode_is_idempotent() {
        let service = test_service();

        let first = service.encode("https://example.com/a").await.unwrap();
        let second = service.encode("https://example.com/a").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(service.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn distinct_urls_get_distinct_codes() {
        let service = test_service();

        let a = service.encode("https://example.com/a").await.unwrap();
        let b = service.encode("https://example.com/b").await.unwrap();

        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn decode_round_trips() {
        let service = test_service();

        let code = service.encode("https://example.com/a").await.unwrap();
        let long_url = service.decode(&code).await.unwrap();

        assert_eq!(long_url, "https://example.com/a");
    }

    #[tokio::test]
    async fn decode_unknown_code_is_not_found() {
        let service = test_service();

        let err = service.decode(&code("nope")).await.unwrap_err();
        assert_eq!(err, ShortenerError::NotFound("nope".to_string()));
    }

    #[tokio::test]
    async fn decode_does_not_conflate_sentinel_text() {
        let service = test_service();

        let code = service.encode("URL not found").await.unwrap();
        assert_eq!(service.decode(&code).await.unwrap(), "URL not found");
    }

    #[tokio::test]
    async fn encode_redraws_on_collision() {
        let service = scripted_service(&["X1", "X1", "Y2"], 4);

        let a = service.encode("https://example.com/a").await.unwrap();
        let b = service.encode("https://example.com/b").await.unwrap();

        assert_eq!(a, code("X1"));
        assert_eq!(b, code("Y2"));
    }

    #[tokio::test]
    async fn encode_accepts_the_empty_code() {
        let service = scripted_service(&[""], 1);

        let empty = service.encode("https://example.com/zero").await.unwrap();

        assert_eq!(empty.as_str(), "");
        assert_eq!(
            service.decode(&empty).await.unwrap(),
            "https://example.com/zero"
        );
    }

    #[tokio::test]
    async fn encode_gives_up_after_max_attempts() {
        let service = scripted_service(&["X1"], 3);
        service.encode("https://example.com/a").await.unwrap();

        let err = service.encode("https://example.com/b").await.unwrap_err();

        assert_eq!(err, ShortenerError::GenerationExhausted { attempts: 3 });
        assert_eq!(service.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn exhaustion_returns_code_mapped_concurrently() {
        let repository = RacingRepository {
            inner: InMemoryRepository::new(),
            long_url: "https://example.com/raced",
            code: "W1",
            raced: Mutex::new(false),
        };
        let settings = ShortenerSettings::builder()
            .base_url(BASE_URL)
            .max_attempts(3)
            .build();
        let service = ShortenerService::with_clock(
            repository,
            ScriptedGenerator::new(&["a", "b", "c"]),
            TestClock::new(epoch()),
            settings,
        );

        let encoded = service.encode("https://example.com/raced").await;

        assert_eq!(encoded.unwrap(), code("W1"));
        assert_eq!(service.count().await.unwrap(), 1);

        let err = service.encode("https://example.com/other").await.unwrap_err();
        assert!(matches!(err, ShortenerError::GenerationExhausted { attempts: 3 }));
    }

    #[tokio::test]
    async fn exhausted_code_space_still_serves_known_urls() {
        let generator =
            RandomGenerator::new(RandomGeneratorSettings::builder().upper_bound(1).build())
                .unwrap();
        let service = ShortenerService::new(InMemoryRepository::new(), generator, settings());

        let only = service.encode("https://example.com/a").await.unwrap();
        assert_eq!(only.as_str(), "");

        let err = service.encode("https://example.com/b").await.unwrap_err();
        assert!(matches!(err, ShortenerError::GenerationExhausted { .. }));

        assert_eq!(service.encode("https://example.com/a").await.unwrap(), only);
    }

    #[tokio::test]
    async fn statistics_of_new_code() {
        let service = scripted_service(&["X1"], 1);
        service.encode("https://example.com/a").await.unwrap();

        let stats = service.statistics(&code("X1")).await.unwrap();

        assert_eq!(stats.long_url, "https://example.com/a");
        assert_eq!(stats.short_code, code("X1"));
        assert_eq!(stats.short_url, "http://short.est/X1");
        assert_eq!(stats.visits, 0);
        assert_eq!(stats.last_visited, None);
        assert_eq!(stats.created_at, epoch());
    }

    #[tokio::test]
    async fn statistics_of_unknown_code_is_not_found() {
        let service = test_service();

        let err = service.statistics(&code("nope")).await.unwrap_err();
        assert!(matches!(err, ShortenerError::NotFound(_)));
    }

    #[tokio::test]
    async fn visits_are_counted_and_stamped() {
        let settings = settings();
        let clock = TestClock::new(epoch());
        let service = ShortenerService::with_clock(
            InMemoryRepository::new(),
            SeqGenerator::new(),
            clock.clone(),
            settings,
        );
        let code = service.encode("https://example.com/a").await.unwrap();

        for _ in 0..3 {
            clock.advance(SignedDuration::from_secs(60));
            assert!(service.record_visit(&code).await.unwrap());
        }

        let stats = service.statistics(&code).await.unwrap();
        assert_eq!(stats.visits, 3);
        assert_eq!(
            stats.last_visited,
            Some(epoch() + SignedDuration::from_secs(180))
        );
        assert_eq!(stats.created_at, epoch());
    }

    #[tokio::test]
    async fn visit_on_unknown_code_changes_nothing() {
        let service = test_service();
        let known = service.encode("https://example.com/a").await.unwrap();

        assert!(!service.record_visit(&code("nope")).await.unwrap());
        let err = service.visit(&code("nope")).await.unwrap_err();
        assert!(matches!(err, ShortenerError::NotFound(_)));

        assert_eq!(service.count().await.unwrap(), 1);
        assert_eq!(service.statistics(&known).await.unwrap().visits, 0);
    }

    #[tokio::test]
    async fn visit_resolves_and_counts_once() {
        let service = test_service();
        let code = service.encode("https://example.com/a").await.unwrap();

        assert_eq!(service.visit(&code).await.unwrap(), "https://example.com/a");

        let stats = service.statistics(&code).await.unwrap();
        assert_eq!(stats.visits, 1);
        assert!(stats.last_visited.is_some());
    }

    #[tokio::test]
    async fn list_is_sorted_by_code() {
        let service = scripted_service(&["b", "a1", "B", "a"], 1);
        for url in ["https://c.com", "https://a.com", "https://b.com", "https://d.com"] {
            service.encode(url).await.unwrap();
        }

        let listed = service.list().await.unwrap();
        let codes: Vec<&str> = listed.iter().map(|s| s.short_code.as_str()).collect();

        assert_eq!(codes, vec!["B", "a", "a1", "b"]);
        assert_eq!(listed[0].short_url, "http://short.est/B");
    }

    #[tokio::test]
    async fn list_of_empty_store_is_empty() {
        let service = test_service();
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn encode_and_visit_scenario() {
        let service = scripted_service(&["X1", "Y2"], 4);

        let x1 = service.encode("https://example.com/a").await.unwrap();
        assert_eq!(x1, code("X1"));
        assert_eq!(service.encode("https://example.com/a").await.unwrap(), x1);

        let y2 = service.encode("https://example.com/b").await.unwrap();
        assert_eq!(y2, code("Y2"));

        assert_eq!(service.decode(&x1).await.unwrap(), "https://example.com/a");

        for _ in 0..3 {
            service.record_visit(&x1).await.unwrap();
        }
        assert_eq!(service.statistics(&x1).await.unwrap().visits, 3);
        assert_eq!(service.statistics(&y2).await.unwrap().visits, 0);
    }

    #[tokio::test]
    async fn forward_and_reverse_stay_consistent() {
        let service = test_service();
        for i in 0..50 {
            service
                .encode(&format!("https://example.com/{i}"))
                .await
                .unwrap();
        }

        for stats in service.list().await.unwrap() {
            let mapped = service
                .repository
                .get_short_code(&stats.long_url)
                .await
                .unwrap();
            assert_eq!(mapped, Some(stats.short_code));
        }
    }

    #[test]
    fn service_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ShortenerService<InMemoryRepository, RandomGenerator>>();
    }
}
