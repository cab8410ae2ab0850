//! Rust client for the intel server legal-records API
//!
//! The intel server aggregates legal-status observations ("scanned clean",
//! "scanned wanted", bounty sightings) reported for commanders, and serves
//! them back per commander for a bounded trailing window.
//!
//! # Example
//!
//! ```no_run
//! use intel_api::IntelClient;
//!
//! # async fn example() -> Result<(), intel_api::IntelError> {
//! let client = IntelClient::new();
//!
//! // Records covering the last day for a commander
//! let records = client.legal_records("cmdr Jameson", 86_400).await?;
//! for record in records {
//!     println!("{} clean / {} wanted", record.counters.clean, record.counters.wanted);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - `GET /v1/cmdrs/{id}/legal-records?window={secs}` - Legal records for a
//!   commander over the trailing `window` seconds

mod client;
mod error;
mod types;

pub use client::IntelClient;
pub use error::{IntelError, Result};
pub use types::{BountyFigures, LastBounty, LegalRecord, ScanCounters};
