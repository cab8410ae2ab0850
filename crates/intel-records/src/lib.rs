//! Cached legal-record summaries for commanders
//!
//! Keeps a locally persisted, size-bounded cache of per-commander legal
//! records fetched from the intel server, refreshing each entry only when it
//! has gone stale and only for the time range not already covered, and
//! serves rolling textual summaries of the most recent records.

mod config;
mod error;
mod source;
mod store;
mod summary;
mod window;

pub use config::Config;
pub use error::{RecordsError, Result};
pub use source::RecordSource;
pub use store::LegalRecords;
pub use window::{EntityWindow, WINDOW_CAPACITY};
