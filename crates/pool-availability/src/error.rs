//! Error types for store-boundary normalization and configuration checks.

use thiserror::Error;

/// Errors raised while turning raw store records and configuration into
/// engine values.
///
/// The engine itself never returns these: slot generation and travel
/// resolution degrade per resource instead of failing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid time '{0}': expected HH:mm")]
    InvalidTime(String),

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A store record lacked a field the engine needs.
    #[error("Record '{record_id}' is missing '{field}'")]
    MissingField {
        record_id: String,
        field: &'static str,
    },

    #[error("Invalid slot duration '{0}': expected whole minutes")]
    InvalidDuration(String),

    #[error("Invalid reservation status '{0}': expected 'booked' or 'unavailable'")]
    InvalidStatus(String),

    /// A reservation whose end does not come after its start.
    #[error("Reservation {reservation_id} ends at {end}, not after its start {start}")]
    InvertedReservation {
        reservation_id: String,
        start: String,
        end: String,
    },

    /// A resource with a non-positive slot duration or an inverted window.
    #[error("Resource {resource_id} is misconfigured: {reason}")]
    MisconfiguredResource { resource_id: String, reason: String },

    /// An [`EngineConfig`](crate::config::EngineConfig) value out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
