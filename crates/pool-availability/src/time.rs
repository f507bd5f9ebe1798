//! Wall-clock parsing and interval predicates.
//!
//! Times travel as "HH:mm" strings with no timezone and dates as "YYYY-MM-DD".
//! Every comparison happens on a `NaiveDateTime` built from both, so buffer
//! arithmetic never wraps around midnight.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{EngineError, Result};

/// Parse an "HH:mm" (or "HH:mm:ss") wall-clock time.
pub fn parse_time(s: &str) -> Result<NaiveTime> {
    let trimmed = s.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| EngineError::InvalidTime(s.to_string()))
}

/// Parse a "YYYY-MM-DD" calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| EngineError::InvalidDate(s.to_string()))
}

/// Format a time back to "HH:mm".
pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// An interval compared on full date-times.
///
/// Which edges count as inside depends on the predicate; see
/// [`TimeRange::overlaps_or_touches`] and [`TimeRange::hits_buffered`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Combine a date with a pair of wall-clock times.
    pub fn on(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Self::new(date.and_time(start), date.and_time(end))
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Grow the range by `minutes` on both sides. `None` if the padding does
    /// not fit in chrono's range.
    pub fn expand(&self, minutes: i64) -> Option<Self> {
        let pad = Duration::try_minutes(minutes)?;
        Some(Self::new(
            self.start.checked_sub_signed(pad)?,
            self.end.checked_add_signed(pad)?,
        ))
    }

    /// Presence test used when the other range sits at the requester's home
    /// resource: true if `self` starts in `[other.start, other.end)`, ends in
    /// `(other.start, other.end]`, or fully contains `other`.
    pub fn overlaps_or_touches(&self, other: &TimeRange) -> bool {
        let starts_inside = self.start >= other.start && self.start < other.end;
        let ends_inside = self.end > other.start && self.end <= other.end;
        let contains = self.start <= other.start && self.end >= other.end;
        starts_inside || ends_inside || contains
    }

    /// Travel-buffer test: `other` is padded by `buffer_minutes` on both sides
    /// and `self` conflicts if either of its edges lands in the padded range
    /// (edges inclusive) or it spans the padded range entirely.
    ///
    /// A negative buffer counts as zero. A buffer too wide to represent
    /// covers everything.
    pub fn hits_buffered(&self, other: &TimeRange, buffer_minutes: i64) -> bool {
        let Some(padded) = other.expand(buffer_minutes.max(0)) else {
            return true;
        };
        let start_inside = self.start >= padded.start && self.start <= padded.end;
        let end_inside = self.end >= padded.start && self.end <= padded.end;
        let spans = self.start <= padded.start && self.end >= padded.end;
        start_inside || end_inside || spans
    }
}

/// Serde adapter that writes `NaiveTime` as "HH:mm" and reads "HH:mm" or
/// "HH:mm:ss".
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_time(*t))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).map_err(serde::de::Error::custom)
    }
}
