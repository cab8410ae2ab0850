//! The remote record source seam

use intel_api::{IntelClient, LegalRecord};
use std::future::Future;

/// Supplies raw legal records for a commander covering a trailing window
///
/// Implementations make no ordering promise for the returned records; an
/// unknown commander yields an empty vec, not an error. Transport failures
/// are surfaced as errors and left to the caller's retry policy.
pub trait RecordSource {
    fn legal_records(
        &self,
        cmdr_id: &str,
        window_seconds: u64,
    ) -> impl Future<Output = intel_api::Result<Vec<LegalRecord>>> + Send;
}

impl RecordSource for IntelClient {
    async fn legal_records(
        &self,
        cmdr_id: &str,
        window_seconds: u64,
    ) -> intel_api::Result<Vec<LegalRecord>> {
        IntelClient::legal_records(self, cmdr_id, window_seconds).await
    }
}
