//! Timestamp conversions and duration formatting for the in-game clock
//!
//! Absolute instants at second precision with exact round-trips to epoch
//! milliseconds and the journal wire format, plus human-readable rendering
//! of durations and relative times ("T-…" / "T+…").

mod duration;
mod instant;

pub use duration::format_timespan;
pub use instant::{GameTime, GAME_YEAR_OFFSET, JOURNAL_TIMESTAMP_FORMAT};
