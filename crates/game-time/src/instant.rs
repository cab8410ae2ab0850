//! Second-precision absolute instants

use crate::duration::format_timespan;
use chrono::{DateTime, Datelike, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire format used by game journal timestamps
pub const JOURNAL_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// The in-game calendar runs this many years ahead of the wall clock
pub const GAME_YEAR_OFFSET: i32 = 1286;

/// An absolute UTC instant at second precision
///
/// Instants are totally ordered and round-trip exactly through epoch
/// milliseconds and the journal timestamp text format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameTime(DateTime<Utc>);

impl GameTime {
    /// The current instant, truncated to the second
    pub fn now() -> Self {
        Self(Utc::now().trunc_subsecs(0))
    }

    /// The current instant as epoch milliseconds
    pub fn epoch_millis_now() -> i64 {
        Utc::now().timestamp_millis()
    }

    /// Build an instant from epoch milliseconds; sub-second precision is
    /// dropped. `None` for values outside the representable date range.
    pub fn from_epoch_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp(millis.div_euclid(1000), 0).map(Self)
    }

    /// Parse the journal wire format, e.g. `2024-05-01T13:37:00Z`
    pub fn from_journal_timestamp(text: &str) -> Result<Self, chrono::ParseError> {
        let parsed = chrono::NaiveDateTime::parse_from_str(text, JOURNAL_TIMESTAMP_FORMAT)?;
        Ok(Self(parsed.and_utc()))
    }

    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self(instant.trunc_subsecs(0))
    }

    pub fn as_epoch_millis(&self) -> i64 {
        self.0.timestamp() * 1000
    }

    pub fn as_epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn as_journal_timestamp(&self) -> String {
        self.0.format(JOURNAL_TIMESTAMP_FORMAT).to_string()
    }

    /// The instant's date on the in-game calendar, `YYYY-MM-DD`
    ///
    /// A Feb 29 with no counterpart in the shifted year lands on Mar 1.
    pub fn as_game_date(&self) -> String {
        match self.0.with_year(self.0.year() + GAME_YEAR_OFFSET) {
            Some(shifted) => shifted.format("%Y-%m-%d").to_string(),
            None => format!("{}-03-01", self.0.year() + GAME_YEAR_OFFSET),
        }
    }

    /// Seconds elapsed since this instant; negative when it lies in the future
    pub fn elapsed_secs(&self) -> i64 {
        Utc::now().timestamp() - self.0.timestamp()
    }

    /// Render how long ago a past epoch-millisecond instant was, e.g.
    /// `"-2h"` (short) or `"T-2h:10m"`. Clock drift into the future clamps
    /// to zero.
    pub fn t_minus(past_epoch_millis: i64, short: bool) -> String {
        let ago = (Self::epoch_millis_now() - past_epoch_millis)
            .div_euclid(1000)
            .max(0) as u64;
        if short {
            format!("-{}", format_timespan(ago, true, false))
        } else {
            format!("T-{}", format_timespan(ago, false, false))
        }
    }

    /// Signed relative rendering: `"T-…"`/`"-…"` for past instants,
    /// `"T+…"`/`"+…"` for future ones
    pub fn t_notation(&self, short: bool) -> String {
        let delta = (Self::epoch_millis_now() - self.as_epoch_millis()).div_euclid(1000);
        let prefix = if delta < 0 { "+" } else { "-" };
        let magnitude = delta.unsigned_abs();
        if short {
            format!("{}{}", prefix, format_timespan(magnitude, true, false))
        } else {
            format!("T{}{}", prefix, format_timespan(magnitude, false, false))
        }
    }

    pub fn is_past(&self) -> bool {
        self.0 < Utc::now()
    }

    pub fn is_future(&self) -> bool {
        self.0 > Utc::now()
    }

    /// Whether this instant lies within `horizon_days` days from now,
    /// inclusive; false when it is already past
    pub fn is_upcoming(&self, horizon_days: i64) -> bool {
        if self.is_past() {
            return false;
        }
        self.0 - Utc::now() <= Duration::days(horizon_days)
    }

    /// Whether `journal_timestamp` lies at least `threshold` after this
    /// instant; false when it predates it
    pub fn elapsed_threshold(
        &self,
        journal_timestamp: &str,
        threshold: Duration,
    ) -> Result<bool, chrono::ParseError> {
        let other = Self::from_journal_timestamp(journal_timestamp)?;
        if other < *self {
            return Ok(false);
        }
        Ok(other.0 - self.0 >= threshold)
    }
}

impl fmt::Display for GameTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_journal_timestamp())
    }
}
