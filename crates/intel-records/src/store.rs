//! The legal records store: cache freshness, minimal re-fetch, merge

use crate::config::Config;
use crate::error::Result;
use crate::source::RecordSource;
use crate::summary;
use crate::window::EntityWindow;
use game_time::GameTime;
use lru_ttl_cache::LruTtlCache;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Per-commander legal records with staleness-driven refresh
///
/// The sole query surface is [`summarize`](Self::summarize). The cache sits
/// behind a mutex held across the whole stale-check / fetch / merge sequence,
/// so concurrent callers cannot both observe staleness and issue duplicate
/// fetches for the same commander.
pub struct LegalRecords<S> {
    source: S,
    cache: Mutex<LruTtlCache<String, EntityWindow>>,
    cache_path: PathBuf,
    timespan_secs: u64,
    check_interval_secs: i64,
}

impl<S: RecordSource> LegalRecords<S> {
    /// Open the store, loading the persisted cache blob
    ///
    /// Any load failure (missing file, unreadable, corrupt blob) falls back
    /// to a fresh cache with the configured capacity and max age.
    pub async fn open(config: &Config, source: S) -> Self {
        let cache = match Self::load_cache(&config.cache_path).await {
            Ok(cache) => {
                info!(
                    entries = cache.len(),
                    path = ?config.cache_path,
                    "loaded legal records cache"
                );
                cache
            }
            Err(e) => {
                warn!(
                    error = %e,
                    path = ?config.cache_path,
                    "could not load legal records cache, starting fresh"
                );
                LruTtlCache::new(config.cache_capacity, config.cache_max_age_secs)
            }
        };

        Self {
            source,
            cache: Mutex::new(cache),
            cache_path: config.cache_path.clone(),
            timespan_secs: config.timespan_secs,
            check_interval_secs: config.check_interval_secs,
        }
    }

    /// Summarize a commander's recent legal history, refreshing the cached
    /// window first if it has gone stale
    ///
    /// `Ok(None)` when no records are known for the commander; remote fetch
    /// failures propagate untouched.
    pub async fn summarize(&self, cmdr_id: &str) -> Result<Option<String>> {
        let mut cache = self.cache.lock().await;
        self.refresh_entry_if_stale(&mut cache, cmdr_id).await?;

        let window = match cache.get(&cmdr_id.to_string()) {
            Some(window) if !window.records.is_empty() => window,
            _ => {
                info!(cmdr_id, "no recent legal records");
                return Ok(None);
            }
        };

        debug!(
            cmdr_id,
            records = window.records.len(),
            "summarizing legal records"
        );
        let summary = summary::aggregate(&window.records);
        Ok(Some(summary::render(&summary, self.timespan_secs)))
    }

    /// Refresh a commander's window if it is stale, returning whether a
    /// refresh occurred
    pub async fn refresh_if_stale(&self, cmdr_id: &str) -> Result<bool> {
        let mut cache = self.cache.lock().await;
        self.refresh_entry_if_stale(&mut cache, cmdr_id).await
    }

    /// Persist the cache as an opaque blob at `cache_path`
    pub async fn persist(&self) -> Result<()> {
        let blob = {
            let cache = self.cache.lock().await;
            serde_json::to_vec(&*cache)?
        };

        if let Some(parent) = self.cache_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&self.cache_path, blob).await?;

        debug!(path = ?self.cache_path, "persisted legal records cache");
        Ok(())
    }

    async fn refresh_entry_if_stale(
        &self,
        cache: &mut LruTtlCache<String, EntityWindow>,
        cmdr_id: &str,
    ) -> Result<bool> {
        let key = cmdr_id.to_string();
        let existing = cache.get(&key).cloned();

        let stale = match &existing {
            None => true,
            Some(window) => window.last_updated.elapsed_secs() > self.check_interval_secs,
        };
        if !stale {
            return Ok(false);
        }

        // Never ask for more than the configured window, nor for more than
        // has actually elapsed since the last refresh; a backwards clock
        // step clamps the elapsed time to zero
        let missing_secs = match &existing {
            None => self.timespan_secs,
            Some(window) => self
                .timespan_secs
                .min(window.last_updated.elapsed_secs().max(0) as u64),
        };

        debug!(cmdr_id, missing_secs, "refreshing stale legal records");
        let fetched = self.source.legal_records(cmdr_id, missing_secs).await?;

        let now = GameTime::now();
        let mut window = existing.unwrap_or_else(|| EntityWindow::new(now));
        window.merge(fetched, now);
        cache.insert(key, window);

        Ok(true)
    }

    async fn load_cache(path: &Path) -> Result<LruTtlCache<String, EntityWindow>> {
        let blob = fs::read(path).await?;
        Ok(serde_json::from_slice(&blob)?)
    }

    /// Shift a commander's refresh marker into the past, as if the window
    /// had last been refreshed `secs` seconds ago
    #[cfg(test)]
    async fn backdate_entry(&self, cmdr_id: &str, secs: i64) {
        let mut cache = self.cache.lock().await;
        let key = cmdr_id.to_string();
        if let Some(mut window) = cache.get(&key).cloned() {
            window.last_updated = GameTime::from_datetime(
                window.last_updated.as_datetime() - chrono::Duration::seconds(secs),
            );
            cache.insert(key, window);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intel_api::{BountyFigures, LastBounty, LegalRecord, ScanCounters};
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::tempdir;

    fn record(
        timestamp: i64,
        clean: u64,
        wanted: u64,
        max: Option<u64>,
        last_value: Option<u64>,
        last_ts: Option<i64>,
    ) -> LegalRecord {
        LegalRecord {
            timestamp,
            counters: ScanCounters { clean, wanted },
            bounties: BountyFigures {
                max,
                last: LastBounty {
                    value: last_value,
                    star_system: last_value.map(|_| "Lave".to_string()),
                    timestamp: last_ts,
                },
            },
        }
    }

    #[derive(Clone)]
    struct MockSource {
        records: Vec<LegalRecord>,
        calls: Arc<AtomicUsize>,
        last_window: Arc<AtomicU64>,
    }

    impl MockSource {
        fn with_records(records: Vec<LegalRecord>) -> Self {
            Self {
                records,
                calls: Arc::new(AtomicUsize::new(0)),
                last_window: Arc::new(AtomicU64::new(0)),
            }
        }

        fn empty() -> Self {
            Self::with_records(vec![])
        }
    }

    impl RecordSource for MockSource {
        async fn legal_records(
            &self,
            _cmdr_id: &str,
            window_seconds: u64,
        ) -> intel_api::Result<Vec<LegalRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.last_window.store(window_seconds, Ordering::SeqCst);
            Ok(self.records.clone())
        }
    }

    struct FailingSource;

    impl RecordSource for FailingSource {
        async fn legal_records(
            &self,
            _cmdr_id: &str,
            _window_seconds: u64,
        ) -> intel_api::Result<Vec<LegalRecord>> {
            Err(intel_api::IntelError::Api("intel server unreachable".to_string()))
        }
    }

    fn test_config(cache_path: PathBuf) -> Config {
        Config {
            timespan_secs: 86_400,
            check_interval_secs: 3_600,
            cache_capacity: 16,
            cache_max_age_secs: 86_400,
            intel_base_url: "http://localhost:0".to_string(),
            cache_path,
        }
    }

    #[tokio::test]
    async fn test_unknown_commander_with_no_data_yields_no_summary() {
        let dir = tempdir().unwrap();
        let source = MockSource::empty();
        let store = LegalRecords::open(&test_config(dir.path().join("cache.json")), source).await;

        let summary = store.summarize("cmdr nobody").await.unwrap();
        assert!(summary.is_none());
    }

    #[tokio::test]
    async fn test_summarize_within_check_interval_fetches_once() {
        let dir = tempdir().unwrap();
        let source = MockSource::with_records(vec![record(1_000, 1, 0, None, None, None)]);
        let calls = source.calls.clone();
        let store = LegalRecords::open(&test_config(dir.path().join("cache.json")), source).await;

        assert!(store.summarize("cmdr Jameson").await.unwrap().is_some());
        assert!(store.summarize("cmdr Jameson").await.unwrap().is_some());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_fetch_still_marks_entry_fresh() {
        let dir = tempdir().unwrap();
        let source = MockSource::empty();
        let calls = source.calls.clone();
        let store = LegalRecords::open(&test_config(dir.path().join("cache.json")), source).await;

        assert!(store.summarize("cmdr quiet").await.unwrap().is_none());
        assert!(store.summarize("cmdr quiet").await.unwrap().is_none());

        // No repeat remote call for a commander with no recent activity
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_refresh_requests_only_the_missing_span() {
        let dir = tempdir().unwrap();
        let source = MockSource::empty();
        let calls = source.calls.clone();
        let last_window = source.last_window.clone();

        let mut config = test_config(dir.path().join("cache.json"));
        config.check_interval_secs = 2;
        let store = LegalRecords::open(&config, source).await;

        // First refresh has nothing cached: asks for the full timespan
        store.refresh_if_stale("cmdr Jameson").await.unwrap();
        assert_eq!(last_window.load(Ordering::SeqCst), 86_400);

        // Last refreshed 5 seconds ago: ask for those ~5 seconds, not a day
        store.backdate_entry("cmdr Jameson", 5).await;
        assert!(store.refresh_if_stale("cmdr Jameson").await.unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(last_window.load(Ordering::SeqCst) <= 6);
    }

    #[tokio::test]
    async fn test_fresh_entry_is_not_refreshed() {
        let dir = tempdir().unwrap();
        let source = MockSource::empty();
        let store = LegalRecords::open(&test_config(dir.path().join("cache.json")), source).await;

        assert!(store.refresh_if_stale("cmdr Jameson").await.unwrap());
        assert!(!store.refresh_if_stale("cmdr Jameson").await.unwrap());
    }

    #[tokio::test]
    async fn test_backwards_clock_step_clamps_missing_span_to_zero() {
        let dir = tempdir().unwrap();
        let source = MockSource::empty();
        let last_window = source.last_window.clone();

        let mut config = test_config(dir.path().join("cache.json"));
        // Interval low enough that even a future-dated marker counts as stale
        config.check_interval_secs = -7_200;
        let store = LegalRecords::open(&config, source).await;

        store.refresh_if_stale("cmdr Jameson").await.unwrap();
        // A refresh marker in the future must not underflow the span
        store.backdate_entry("cmdr Jameson", -3_600).await;
        store.refresh_if_stale("cmdr Jameson").await.unwrap();

        assert_eq!(last_window.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_summary_aggregates_window() {
        let dir = tempdir().unwrap();
        let now_ms = GameTime::epoch_millis_now();
        let t1 = now_ms - 7_200_000;
        let t2 = now_ms - 3_600_000;
        let source = MockSource::with_records(vec![
            record(t1, 2, 1, Some(500), Some(500), Some(t1)),
            record(t2, 0, 3, Some(900), Some(300), Some(t2)),
        ]);
        let store = LegalRecords::open(&test_config(dir.path().join("cache.json")), source).await;

        let summary = store.summarize("cmdr Jameson").await.unwrap().unwrap();
        assert!(summary.starts_with("[Last 1 day] clean:2 / wanted:4"));
        assert!(summary.contains("max=900 cr"));
        // The later sighting's value wins, not the larger one
        assert!(summary.contains("300 cr in Lave"));
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let dir = tempdir().unwrap();
        let store =
            LegalRecords::open(&test_config(dir.path().join("cache.json")), FailingSource).await;

        assert!(store.summarize("cmdr Jameson").await.is_err());
    }

    #[tokio::test]
    async fn test_persist_and_reload_round_trip() {
        let dir = tempdir().unwrap();
        let cache_path = dir.path().join("cache/legal_records.json");
        let config = test_config(cache_path);
        let now_ms = GameTime::epoch_millis_now();

        let source = MockSource::with_records(vec![record(now_ms, 2, 1, None, None, None)]);
        let store = LegalRecords::open(&config, source).await;
        assert!(store.summarize("cmdr Jameson").await.unwrap().is_some());
        store.persist().await.unwrap();

        // A reopened store serves the entry without going back to the source
        let reopened_source = MockSource::empty();
        let calls = reopened_source.calls.clone();
        let reopened = LegalRecords::open(&config, reopened_source).await;

        let summary = reopened.summarize("cmdr Jameson").await.unwrap();
        assert!(summary.unwrap().contains("clean:2 / wanted:1"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_corrupt_cache_blob_falls_back_to_fresh_cache() {
        let dir = tempdir().unwrap();
        let cache_path = dir.path().join("cache.json");
        std::fs::write(&cache_path, b"not json at all").unwrap();

        let source = MockSource::with_records(vec![record(1_000, 1, 0, None, None, None)]);
        let calls = source.calls.clone();
        let store = LegalRecords::open(&test_config(cache_path), source).await;

        // Fresh cache: the summarize goes to the source
        assert!(store.summarize("cmdr Jameson").await.unwrap().is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
