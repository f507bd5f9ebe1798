//! Resources, reservations and slots.
//!
//! Two layers live here. The `*Record` types mirror whatever the reservation
//! store hands back (string times, optional fields, legacy field names). The
//! canonical types ([`Resource`], [`Reservation`], [`Slot`]) are what the
//! engine works on; the only bridge between the two is `from_record`.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::time::{self, TimeRange};

// ---------------------------------------------------------------------------
// Store records
// ---------------------------------------------------------------------------

/// A pool as stored by the administration side.
///
/// Every field is optional and every scalar is read as text, so a row with a
/// missing id or a number where a time belongs is rejected on its own in
/// [`Resource::from_record`] instead of failing the whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRecord {
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        alias = "slot_duration_minutes",
        alias = "slotDuration"
    )]
    pub slot_duration_minutes: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        alias = "window_start",
        alias = "openTime"
    )]
    pub window_start: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        alias = "window_end",
        alias = "closeTime"
    )]
    pub window_end: Option<String>,
}

/// A reservation row as returned by the store. Read as loosely as
/// [`ResourceRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRecord {
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub id: String,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        alias = "resource_id",
        alias = "poolId",
        alias = "pool_id"
    )]
    pub resource_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub date: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        alias = "start_time",
        alias = "start"
    )]
    pub start_time: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        alias = "end_time",
        alias = "end"
    )]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub status: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        alias = "owner_id",
        alias = "userId",
        alias = "user_id"
    )]
    pub owner_id: Option<String>,
}

/// Field readers that accept any JSON value. Scalars become their text form;
/// arrays and objects become a marker that no later parse accepts.
mod lenient {
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        Float(f64),
        Bool(bool),
        Other(IgnoredAny),
    }

    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Scalar>::deserialize(deserializer)?;
        Ok(value.map(|scalar| match scalar {
            Scalar::Text(s) => s,
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Other(_) => "<non-scalar>".to_string(),
        }))
    }

    pub fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(text(deserializer)?.unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// Resource
// ---------------------------------------------------------------------------

/// A bookable pool with a fixed slot length and a same-day operating window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub slot_duration_minutes: i64,
    #[serde(with = "time::hhmm")]
    pub window_start: NaiveTime,
    #[serde(with = "time::hhmm")]
    pub window_end: NaiveTime,
}

impl Resource {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        slot_duration_minutes: i64,
        window_start: NaiveTime,
        window_end: NaiveTime,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slot_duration_minutes,
            window_start,
            window_end,
        }
    }

    /// Normalize a store record, filling absent fields from `config`.
    ///
    /// Only a blank id, an unparsable duration or unparsable times fail here. A non-positive duration or an inverted
    /// window is carried through so the caller can report it; see
    /// [`Resource::validate`].
    pub fn from_record(record: &ResourceRecord, config: &EngineConfig) -> Result<Self> {
        if record.id.trim().is_empty() {
            return Err(EngineError::MissingField {
                record_id: record.id.clone(),
                field: "id",
            });
        }
        let slot_duration_minutes = match record.slot_duration_minutes.as_deref() {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| EngineError::InvalidDuration(raw.to_string()))?,
            None => config.default_slot_duration_minutes,
        };
        let window_start = record
            .window_start
            .as_deref()
            .unwrap_or(config.default_window_start.as_str());
        let window_end = record
            .window_end
            .as_deref()
            .unwrap_or(config.default_window_end.as_str());

        Ok(Self {
            id: record.id.clone(),
            name: record.name.clone(),
            slot_duration_minutes,
            window_start: time::parse_time(window_start)?,
            window_end: time::parse_time(window_end)?,
        })
    }

    /// Check that the resource can produce slots at all.
    pub fn validate(&self) -> Result<()> {
        if self.slot_duration_minutes <= 0 {
            return Err(EngineError::MisconfiguredResource {
                resource_id: self.id.clone(),
                reason: format!(
                    "slot duration must be positive, got {} minutes",
                    self.slot_duration_minutes
                ),
            });
        }
        if self.window_start >= self.window_end {
            return Err(EngineError::MisconfiguredResource {
                resource_id: self.id.clone(),
                reason: format!(
                    "window start {} is not before window end {}",
                    time::format_time(self.window_start),
                    time::format_time(self.window_end)
                ),
            });
        }
        Ok(())
    }

    pub fn is_well_formed(&self) -> bool {
        self.validate().is_ok()
    }
}

// ---------------------------------------------------------------------------
// Reservation
// ---------------------------------------------------------------------------

/// Both statuses block the slot for others; they differ only in how a
/// front end labels them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Booked,
    Unavailable,
}

impl std::str::FromStr for ReservationStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "booked" => Ok(Self::Booked),
            "unavailable" => Ok(Self::Unavailable),
            _ => Err(EngineError::InvalidStatus(s.to_string())),
        }
    }
}

/// A claim on one pool for an exact range on an exact date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub resource_id: String,
    pub date: NaiveDate,
    #[serde(with = "time::hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "time::hhmm")]
    pub end_time: NaiveTime,
    pub status: ReservationStatus,
    pub owner_id: Option<String>,
}

impl Reservation {
    /// Normalize a store row. Fails on a blank id, a missing or unparsable
    /// field, an unknown status, or `end <= start`.
    pub fn from_record(record: &ReservationRecord) -> Result<Self> {
        if record.id.trim().is_empty() {
            return Err(EngineError::MissingField {
                record_id: record.id.clone(),
                field: "id",
            });
        }
        let require = |value: &Option<String>, field: &'static str| -> Result<String> {
            value
                .as_ref()
                .filter(|v| !v.trim().is_empty())
                .cloned()
                .ok_or_else(|| EngineError::MissingField {
                    record_id: record.id.clone(),
                    field,
                })
        };

        let resource_id = require(&record.resource_id, "resourceId")?;
        let date = time::parse_date(&require(&record.date, "date")?)?;
        let raw_start = require(&record.start_time, "startTime")?;
        let raw_end = require(&record.end_time, "endTime")?;
        let start_time = time::parse_time(&raw_start)?;
        let end_time = time::parse_time(&raw_end)?;
        let status: ReservationStatus = require(&record.status, "status")?.parse()?;

        if end_time <= start_time {
            return Err(EngineError::InvertedReservation {
                reservation_id: record.id.clone(),
                start: raw_start,
                end: raw_end,
            });
        }

        Ok(Self {
            id: record.id.clone(),
            resource_id,
            date,
            start_time,
            end_time,
            status,
            owner_id: record.owner_id.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Slot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlotStatus {
    Available,
    Booked,
    Unavailable,
    TravelRestricted,
}

impl SlotStatus {
    /// Booked and unavailable slots block travel to other pools.
    pub fn is_occupied(self) -> bool {
        matches!(self, Self::Booked | Self::Unavailable)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Booked => "booked",
            Self::Unavailable => "unavailable",
            Self::TravelRestricted => "travel-restricted",
        }
    }
}

/// The status a slot takes when a reservation sits exactly on it.
impl From<ReservationStatus> for SlotStatus {
    fn from(status: ReservationStatus) -> Self {
        match status {
            ReservationStatus::Booked => Self::Booked,
            ReservationStatus::Unavailable => Self::Unavailable,
        }
    }
}

impl std::fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fixed-length unit of a pool's day. Derived on every pass, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub resource_id: String,
    pub date: NaiveDate,
    #[serde(with = "time::hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "time::hhmm")]
    pub end_time: NaiveTime,
    pub status: SlotStatus,
    /// Id of the reservation behind a non-available status, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_ref: Option<String>,
}

impl Slot {
    pub fn range(&self) -> TimeRange {
        TimeRange::on(self.date, self.start_time, self.end_time)
    }

    /// Copy of this slot with a new status and cause.
    pub fn with_status(&self, status: SlotStatus, reservation_ref: Option<String>) -> Self {
        Self {
            status,
            reservation_ref,
            ..self.clone()
        }
    }
}
