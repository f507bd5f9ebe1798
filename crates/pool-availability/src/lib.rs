//! # pool-availability
//!
//! Slot availability for a set of shared pools, including the travel time a
//! requester needs to get from one pool to another.
//!
//! Each pool's operating window is cut into fixed-length slots, reservations
//! that line up with a slot mark it booked or unavailable, and then every
//! remaining slot is checked against the occupied slots of the *other* pools.
//! A booking at the requester's home pool blocks only overlapping time
//! elsewhere; a booking at any other pool also blocks a travel buffer (30
//! minutes by default) on both sides of it.
//!
//! Everything here is a pure function over plain data. Fetching resources and
//! reservations, and deciding what to do with the result, is up to the caller.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::{NaiveDate, NaiveTime};
//! use pool_availability::{apply_travel_restriction, generate_slots, Resource, SlotStatus};
//!
//! let hm = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
//! let date = NaiveDate::from_ymd_opt(2026, 7, 4).unwrap();
//! let tamarind = Resource::new("tamarind", "Tamarind", 60, hm(8), hm(20));
//!
//! let slots = generate_slots(&tamarind, date, &[]);
//! assert_eq!(slots.len(), 12);
//!
//! let resolved = apply_travel_restriction(&slots, Some("tamarind"));
//! assert!(resolved.iter().all(|s| s.status == SlotStatus::Available));
//! ```
//!
//! ## Modules
//!
//! - [`slots`]: Operating window → ordered slots, with exact-match bookings
//! - [`travel`]: Cross-pool travel-buffer resolution
//! - [`schedule`]: Full pass from raw store records to per-pool schedules
//! - [`model`]: Resources, reservations, slots, and their store records
//! - [`config`]: Per-pass configuration (buffer, fallbacks)
//! - [`time`]: "HH:mm" parsing and interval predicates
//! - [`error`]: Error types

pub mod config;
pub mod error;
pub mod model;
pub mod schedule;
pub mod slots;
pub mod time;
pub mod travel;

pub use config::{EngineConfig, MAX_TRAVEL_BUFFER_MINUTES};
pub use error::EngineError;
pub use model::{
    Reservation, ReservationRecord, ReservationStatus, Resource, ResourceRecord, Slot, SlotStatus,
};
pub use schedule::{resolve_day, DayAvailability, Diagnostic, ResourceSchedule, StatusSummary};
pub use slots::{generate_slots, unattached_reservations};
pub use travel::{apply_travel_restriction, apply_travel_restriction_with};
