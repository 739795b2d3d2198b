//! TTL-bounded cache around the monday.com job fetcher.
//!
//! One logical slot: the system caches exactly one board's result set at a
//! time. Population is lazy — the first call after expiry (or after an
//! explicit [`JobCache::invalidate`]) pays for the outbound fetch, everyone
//! else gets the cached clone. Errors are never cached, so a failed fetch is
//! retried on the very next call.
//!
//! There is deliberately no single-flight deduplication: concurrent cold
//! misses may each fetch independently and the last writer wins. Request
//! volume on a careers page makes that an acceptable inefficiency.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use monday_client::{BoardConfig, JobRecord, MondayClient, Result};

/// Where job records come from. The real implementation is
/// [`MondayClient`]; tests substitute their own.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch_jobs(&self, config: &BoardConfig) -> Result<Vec<JobRecord>>;
}

#[async_trait]
impl JobSource for MondayClient {
    async fn fetch_jobs(&self, config: &BoardConfig) -> Result<Vec<JobRecord>> {
        MondayClient::fetch_jobs(self, config).await
    }
}

#[async_trait]
impl<S: JobSource + ?Sized> JobSource for Arc<S> {
    async fn fetch_jobs(&self, config: &BoardConfig) -> Result<Vec<JobRecord>> {
        (**self).fetch_jobs(config).await
    }
}

/// Injectable time source so expiry is deterministic under test.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

struct CacheEntry {
    jobs: Vec<JobRecord>,
    expires_at: DateTime<Utc>,
}

/// Summary of the current cache slot, for health reporting.
#[derive(Debug, Clone)]
pub struct CacheSnapshot {
    pub jobs: usize,
    pub expires_at: DateTime<Utc>,
}

pub struct JobCache<S, C = SystemClock> {
    source: S,
    clock: C,
    slot: RwLock<Option<CacheEntry>>,
}

impl<S: JobSource> JobCache<S> {
    pub fn new(source: S) -> Self {
        Self::with_clock(source, SystemClock)
    }
}

impl<S: JobSource, C: Clock> JobCache<S, C> {
    pub fn with_clock(source: S, clock: C) -> Self {
        Self {
            source,
            clock,
            slot: RwLock::new(None),
        }
    }

    /// Return the cached records, fetching on a cold or stale slot.
    ///
    /// An entry is live strictly while `now < expires_at`; a call landing
    /// exactly on `expires_at` refetches. A successful fetch (including an
    /// empty list) is stored with `expires_at = now + cache_minutes`;
    /// an `Err` propagates unchanged and leaves the slot untouched.
    pub async fn get_jobs(&self, config: &BoardConfig) -> Result<Vec<JobRecord>> {
        {
            let slot = self.slot.read().await;
            if let Some(entry) = slot.as_ref() {
                if self.clock.now() < entry.expires_at {
                    tracing::debug!(count = entry.jobs.len(), "Serving jobs from cache");
                    return Ok(entry.jobs.clone());
                }
            }
        }
        // Lock released before the outbound call; slow fetches must not
        // block cache readers.

        let jobs = self.source.fetch_jobs(config).await?;

        let expires_at = self.clock.now() + Duration::minutes(i64::from(config.cache_minutes));
        let mut slot = self.slot.write().await;
        *slot = Some(CacheEntry {
            jobs: jobs.clone(),
            expires_at,
        });
        tracing::debug!(
            count = jobs.len(),
            expires_at = %expires_at,
            "Job cache refreshed"
        );

        Ok(jobs)
    }

    /// Drop any stored entry. The next [`Self::get_jobs`] call is guaranteed
    /// to hit the source.
    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
        tracing::info!("Job cache flushed");
    }

    pub async fn snapshot(&self) -> Option<CacheSnapshot> {
        self.slot.read().await.as_ref().map(|e| CacheSnapshot {
            jobs: e.jobs.len(),
            expires_at: e.expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use chrono::TimeZone;
    use monday_client::MondayError;

    struct MockSource {
        calls: AtomicUsize,
        responses: Mutex<VecDeque<Result<Vec<JobRecord>>>>,
    }

    impl MockSource {
        fn new(responses: Vec<Result<Vec<JobRecord>>>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                responses: Mutex::new(responses.into()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl JobSource for MockSource {
        async fn fetch_jobs(&self, _config: &BoardConfig) -> Result<Vec<JobRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected fetch")
        }
    }

    struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        fn at_epoch() -> Arc<Self> {
            Arc::new(Self {
                now: Mutex::new(Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()),
            })
        }

        fn advance(&self, seconds: i64) {
            let mut now = self.now.lock().unwrap();
            *now += Duration::seconds(seconds);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    fn job(id: &str, name: &str) -> JobRecord {
        JobRecord {
            id: id.to_string(),
            name: name.to_string(),
            location: String::new(),
            date: String::new(),
            description: String::new(),
            apply_url: String::new(),
        }
    }

    fn config() -> BoardConfig {
        BoardConfig {
            token: "t".into(),
            board_id: "1".into(),
            cache_minutes: 30,
            ..BoardConfig::default()
        }
    }

    #[tokio::test]
    async fn warm_cache_serves_identical_payload_without_refetch() {
        let source = MockSource::new(vec![Ok(vec![job("1", "Engineer")])]);
        let cache = JobCache::with_clock(source.clone(), ManualClock::at_epoch());

        let first = cache.get_jobs(&config()).await.unwrap();
        let second = cache.get_jobs(&config()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn entry_expires_exactly_at_ttl() {
        let source = MockSource::new(vec![Ok(vec![job("1", "A")]), Ok(vec![job("2", "B")])]);
        let clock = ManualClock::at_epoch();
        let cache = JobCache::with_clock(source.clone(), clock.clone());

        cache.get_jobs(&config()).await.unwrap();

        // One second shy of the TTL: still warm.
        clock.advance(30 * 60 - 1);
        cache.get_jobs(&config()).await.unwrap();
        assert_eq!(source.calls(), 1);

        // Landing exactly on expires_at counts as expired.
        clock.advance(1);
        let refreshed = cache.get_jobs(&config()).await.unwrap();
        assert_eq!(source.calls(), 2);
        assert_eq!(refreshed[0].name, "B");
    }

    #[tokio::test]
    async fn invalidate_forces_refetch_inside_ttl() {
        let source = MockSource::new(vec![Ok(vec![job("1", "A")]), Ok(vec![job("1", "A")])]);
        let cache = JobCache::with_clock(source.clone(), ManualClock::at_epoch());

        cache.get_jobs(&config()).await.unwrap();
        cache.invalidate().await;
        cache.get_jobs(&config()).await.unwrap();

        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn empty_result_is_a_cacheable_value() {
        let source = MockSource::new(vec![Ok(vec![])]);
        let cache = JobCache::with_clock(source.clone(), ManualClock::at_epoch());

        assert!(cache.get_jobs(&config()).await.unwrap().is_empty());
        assert!(cache.get_jobs(&config()).await.unwrap().is_empty());
        assert_eq!(source.calls(), 1);
        assert_eq!(cache.snapshot().await.unwrap().jobs, 0);
    }

    #[tokio::test]
    async fn errors_propagate_and_are_never_cached() {
        let source = MockSource::new(vec![
            Err(MondayError::HttpStatus {
                status: 500,
                body: "upstream down".into(),
            }),
            Ok(vec![job("1", "A")]),
        ]);
        let cache = JobCache::with_clock(source.clone(), ManualClock::at_epoch());

        let err = cache.get_jobs(&config()).await.unwrap_err();
        assert!(matches!(err, MondayError::HttpStatus { status: 500, .. }));
        assert!(cache.snapshot().await.is_none());

        // Next call retries immediately and warms the cache.
        let jobs = cache.get_jobs(&config()).await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn config_missing_passes_through_uncached() {
        let source = MockSource::new(vec![Err(MondayError::ConfigMissing)]);
        let cache = JobCache::with_clock(source.clone(), ManualClock::at_epoch());

        let err = cache.get_jobs(&config()).await.unwrap_err();
        assert!(matches!(err, MondayError::ConfigMissing));
        assert!(cache.snapshot().await.is_none());
    }
}
