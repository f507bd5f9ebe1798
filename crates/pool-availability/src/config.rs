//! Per-pass engine configuration.
//!
//! Callers build one [`EngineConfig`] per resolution pass and hand it to the
//! store-boundary normalization and the resolver. Nothing in the engine reads
//! global state.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Travel time assumed between two different pools, in minutes.
pub const DEFAULT_TRAVEL_BUFFER_MINUTES: i64 = 30;

/// Largest accepted travel buffer: one day. Anything wider already blocks
/// every slot of a same-day window.
pub const MAX_TRAVEL_BUFFER_MINUTES: i64 = 24 * 60;

/// Slot length used when a resource record carries none.
pub const DEFAULT_SLOT_DURATION_MINUTES: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Padding added on both sides of a reservation at a pool other than the
    /// requester's home.
    pub travel_buffer_minutes: i64,
    /// Fallback slot duration for resources that do not specify one.
    pub default_slot_duration_minutes: i64,
    /// Fallback opening time ("HH:mm").
    pub default_window_start: String,
    /// Fallback closing time ("HH:mm").
    pub default_window_end: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            travel_buffer_minutes: DEFAULT_TRAVEL_BUFFER_MINUTES,
            default_slot_duration_minutes: DEFAULT_SLOT_DURATION_MINUTES,
            default_window_start: "08:00".to_string(),
            default_window_end: "20:00".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn with_travel_buffer(mut self, minutes: i64) -> Self {
        self.travel_buffer_minutes = minutes;
        self
    }

    pub fn with_default_slot_duration(mut self, minutes: i64) -> Self {
        self.default_slot_duration_minutes = minutes;
        self
    }

    /// Reject a travel buffer outside `0..=MAX_TRAVEL_BUFFER_MINUTES`.
    pub fn validate(&self) -> Result<()> {
        if !(0..=MAX_TRAVEL_BUFFER_MINUTES).contains(&self.travel_buffer_minutes) {
            return Err(EngineError::InvalidConfig(format!(
                "travel buffer must be between 0 and {} minutes, got {}",
                MAX_TRAVEL_BUFFER_MINUTES, self.travel_buffer_minutes
            )));
        }
        Ok(())
    }

    /// The travel buffer clamped into `0..=MAX_TRAVEL_BUFFER_MINUTES`.
    pub fn effective_travel_buffer(&self) -> i64 {
        self.travel_buffer_minutes.clamp(0, MAX_TRAVEL_BUFFER_MINUTES)
    }
}
