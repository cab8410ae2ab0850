//! In-memory LRU cache with capacity bounds and max-age expiry
//!
//! Provides a bounded associative store that evicts the least recently used
//! entry when full and expires entries older than a configured max age, with
//! per-entry and whole-cache last-updated markers.

mod cache;

pub use cache::LruTtlCache;
