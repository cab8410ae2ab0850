//! Legal records summary tool
//!
//! Prints a recent legal-history summary for each commander id given on the
//! command line, keeping the on-disk cache warm between runs.

use intel_api::IntelClient;
use intel_records::{Config, LegalRecords, Result};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive("intel_records=info".parse()?);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cmdr_ids: Vec<String> = std::env::args().skip(1).collect();
    if cmdr_ids.is_empty() {
        eprintln!("usage: intel-records <cmdr-id>...");
        return Ok(());
    }

    // Load configuration from environment
    let config = Config::from_env();
    info!(
        timespan_secs = config.timespan_secs,
        check_interval_secs = config.check_interval_secs,
        cache_path = ?config.cache_path,
        "starting legal records lookup"
    );

    let client = IntelClient::with_base_url(&config.intel_base_url);
    let store = LegalRecords::open(&config, client).await;

    for cmdr_id in &cmdr_ids {
        match store.summarize(cmdr_id).await? {
            Some(summary) => println!("{}: {}", cmdr_id, summary),
            None => println!("{}: no recent legal records", cmdr_id),
        }
    }

    store.persist().await?;

    Ok(())
}
