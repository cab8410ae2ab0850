use intel_api::IntelClient;
use std::env;
use std::path::PathBuf;

/// Store configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// How far back a fetched window of records reaches, seconds
    pub timespan_secs: u64,
    /// Below this age since the last refresh an entry is considered fresh
    pub check_interval_secs: i64,
    /// Maximum number of commanders kept in the cache
    pub cache_capacity: usize,
    /// Cache entries older than this are evictable, seconds
    pub cache_max_age_secs: i64,
    /// Intel server endpoint
    pub intel_base_url: String,
    /// Where the cache blob is persisted
    pub cache_path: PathBuf,
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Self {
        let timespan_secs = env::var("INTEL_TIMESPAN_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(2_592_000); // 30 days

        let check_interval_secs = env::var("INTEL_CHECK_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3_600);

        let cache_capacity = env::var("INTEL_CACHE_CAPACITY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1_000);

        let cache_max_age_secs = env::var("INTEL_CACHE_MAX_AGE_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(2_592_000);

        let intel_base_url = env::var("INTEL_BASE_URL")
            .unwrap_or_else(|_| IntelClient::DEFAULT_BASE_URL.to_string());

        let cache_path = env::var("INTEL_CACHE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("cache/legal_records.json"));

        Self {
            timespan_secs,
            check_interval_secs,
            cache_capacity,
            cache_max_age_secs,
            intel_base_url,
            cache_path,
        }
    }
}
