//! Aggregation of a record window into a one-line summary

use game_time::{format_timespan, GameTime};
use intel_api::{LastBounty, LegalRecord};
use std::collections::VecDeque;

/// Totals and extremes over one window of records
#[derive(Debug, Default)]
pub(crate) struct WindowSummary {
    pub clean: u64,
    pub wanted: u64,
    pub max_bounty: Option<u64>,
    pub last_bounty: LastBounty,
}

/// Fold a window into counter totals, the maximum bounty, and the most
/// recently timestamped bounty sighting
///
/// The last-bounty comparison is non-strict, so of two sightings sharing a
/// timestamp the later-scanned one wins.
pub(crate) fn aggregate(records: &VecDeque<LegalRecord>) -> WindowSummary {
    let mut summary = WindowSummary::default();
    for record in records {
        summary.clean += record.counters.clean;
        summary.wanted += record.counters.wanted;
        summary.max_bounty = summary.max_bounty.max(record.bounties.max);
        if record.bounties.last.timestamp >= summary.last_bounty.timestamp {
            summary.last_bounty = record.bounties.last.clone();
        }
    }
    summary
}

/// Render a summary, e.g.
/// `[Last 30 days] clean:4 / wanted:2 max=900 cr, 300 cr in Lave -2h`
///
/// Bounty clauses only appear for the figures that are present.
pub(crate) fn render(summary: &WindowSummary, timespan_secs: u64) -> String {
    let span = format_timespan(timespan_secs, true, true);
    let base = format!(
        "[Last {}] clean:{} / wanted:{}",
        span, summary.clean, summary.wanted
    );

    let last_clause = match (summary.last_bounty.value, summary.last_bounty.timestamp) {
        (Some(value), Some(sighted_at)) => Some(format!(
            "{} cr in {} {}",
            format_credits(value),
            summary
                .last_bounty
                .star_system
                .as_deref()
                .unwrap_or("unknown system"),
            GameTime::t_minus(sighted_at, true)
        )),
        _ => None,
    };

    match (summary.max_bounty, last_clause) {
        (Some(max), Some(last)) => format!("{} max={} cr, {}", base, format_credits(max), last),
        (Some(max), None) => format!("{} max={} cr", base, format_credits(max)),
        (None, Some(last)) => format!("{} {}", base, last),
        (None, None) => base,
    }
}

/// Humanize a credits amount: `900`, `7.5k`, `52k`, `1.2m`, `15m`
pub(crate) fn format_credits(amount: u64) -> String {
    if amount >= 10_000_000 {
        format!("{}m", amount / 1_000_000)
    } else if amount >= 1_000_000 {
        format!("{:.1}m", amount as f64 / 1_000_000.0)
    } else if amount >= 10_000 {
        format!("{}k", amount / 1_000)
    } else if amount >= 1_000 {
        format!("{:.1}k", amount as f64 / 1_000.0)
    } else {
        amount.to_string()
    }
}
