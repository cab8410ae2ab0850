//! Wire types for intel server responses
//!
//! These structs mirror the legal-records payloads. Timestamps are epoch
//! milliseconds, amounts are credits.

use serde::{Deserialize, Serialize};

/// One legal-status observation reported for a commander
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegalRecord {
    /// When the observation was made, epoch milliseconds
    pub timestamp: i64,
    pub counters: ScanCounters,
    pub bounties: BountyFigures,
}

/// Clean/wanted scan tallies within one record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanCounters {
    pub clean: u64,
    pub wanted: u64,
}

/// Bounty figures within one record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BountyFigures {
    /// Largest bounty observed, credits; absent when none was seen
    pub max: Option<u64>,
    pub last: LastBounty,
}

/// The most recent individual bounty sighting within one record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastBounty {
    pub value: Option<u64>,
    pub star_system: Option<String>,
    /// When the bounty was sighted, epoch milliseconds
    pub timestamp: Option<i64>,
}
