//! One full resolution pass for a single day.
//!
//! [`resolve_day`] is what a request handler calls: it takes the raw records
//! from the store, normalizes them, generates each pool's slots, applies the
//! travel buffer across pools, and regroups the result per pool. Bad records
//! never abort the pass; each becomes a [`Diagnostic`] and the rest resolve.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::model::{Reservation, ReservationRecord, Resource, ResourceRecord, Slot, SlotStatus};
use crate::slots::{generate_slots, unattached_reservations};
use crate::travel::apply_travel_restriction_with;

/// The resolved day for one pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSchedule {
    pub resource_id: String,
    pub name: String,
    pub slot_duration_minutes: i64,
    /// Ordered by start time. Empty for a misconfigured pool.
    pub slots: Vec<Slot>,
}

impl ResourceSchedule {
    /// Slots a requester could still book.
    pub fn bookable(&self) -> impl Iterator<Item = &Slot> {
        self.slots
            .iter()
            .filter(|s| s.status == SlotStatus::Available)
    }
}

/// A record the pass skipped or could not place, reported instead of raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Diagnostic {
    /// The configuration was out of range; the pass ran with clamped values.
    InvalidConfig { message: String },
    /// The resource record could not be parsed; it has no schedule.
    #[serde(rename_all = "camelCase")]
    InvalidResource { resource_id: String, message: String },
    /// The resource parsed but cannot produce slots; its schedule is empty.
    #[serde(rename_all = "camelCase")]
    MisconfiguredResource { resource_id: String, message: String },
    /// The reservation record could not be parsed and was ignored.
    #[serde(rename_all = "camelCase")]
    InvalidReservation {
        reservation_id: String,
        message: String,
    },
    /// The reservation names a pool that is not part of this pass.
    #[serde(rename_all = "camelCase")]
    UnknownResource {
        reservation_id: String,
        resource_id: String,
    },
    /// The reservation is off the slot grid, so it blocks nothing.
    #[serde(rename_all = "camelCase")]
    UnattachedReservation {
        reservation_id: String,
        resource_id: String,
    },
}

/// Slot counts per status across every pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub available: usize,
    pub booked: usize,
    pub unavailable: usize,
    pub travel_restricted: usize,
}

impl StatusSummary {
    pub fn from_slots<'a>(slots: impl IntoIterator<Item = &'a Slot>) -> Self {
        let mut summary = Self::default();
        for slot in slots {
            match slot.status {
                SlotStatus::Available => summary.available += 1,
                SlotStatus::Booked => summary.booked += 1,
                SlotStatus::Unavailable => summary.unavailable += 1,
                SlotStatus::TravelRestricted => summary.travel_restricted += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.available + self.booked + self.unavailable + self.travel_restricted
    }
}

/// Result of one resolution pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub home_resource_id: Option<String>,
    /// One entry per usable pool, in input order.
    pub resources: Vec<ResourceSchedule>,
    pub summary: StatusSummary,
    pub diagnostics: Vec<Diagnostic>,
}

impl DayAvailability {
    pub fn schedule(&self, resource_id: &str) -> Option<&ResourceSchedule> {
        self.resources.iter().find(|r| r.resource_id == resource_id)
    }

    /// Every slot of every pool, pool by pool.
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.resources.iter().flat_map(|r| r.slots.iter())
    }
}

/// Resolve availability for every pool on `date`, as seen by a requester whose
/// home pool is `home_resource_id`.
///
/// Reservations dated other than `date` are ignored. Pure apart from
/// `tracing` events; identical inputs give identical output.
pub fn resolve_day(
    resource_records: &[ResourceRecord],
    reservation_records: &[ReservationRecord],
    date: NaiveDate,
    home_resource_id: Option<&str>,
    config: &EngineConfig,
) -> DayAvailability {
    let mut diagnostics = Vec::new();

    if let Err(e) = config.validate() {
        warn!(error = %e, travel_buffer = config.effective_travel_buffer(), "clamping travel buffer");
        diagnostics.push(Diagnostic::InvalidConfig {
            message: e.to_string(),
        });
    }

    let mut resources: Vec<Resource> = Vec::with_capacity(resource_records.len());
    for record in resource_records {
        match Resource::from_record(record, config) {
            Ok(resource) => {
                if let Err(e) = resource.validate() {
                    warn!(resource_id = %resource.id, error = %e, "resource cannot produce slots");
                    diagnostics.push(Diagnostic::MisconfiguredResource {
                        resource_id: resource.id.clone(),
                        message: e.to_string(),
                    });
                }
                resources.push(resource);
            }
            Err(e) => {
                warn!(resource_id = %record.id, error = %e, "skipping unparsable resource");
                diagnostics.push(Diagnostic::InvalidResource {
                    resource_id: record.id.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    let mut reservations: Vec<Reservation> = Vec::new();
    for record in reservation_records {
        match Reservation::from_record(record) {
            Ok(r) if r.date != date => {}
            Ok(r) => {
                if resources.iter().any(|res| res.id == r.resource_id) {
                    reservations.push(r);
                } else {
                    debug!(reservation_id = %r.id, resource_id = %r.resource_id, "reservation for unknown resource");
                    diagnostics.push(Diagnostic::UnknownResource {
                        reservation_id: r.id,
                        resource_id: r.resource_id,
                    });
                }
            }
            Err(e) => {
                warn!(reservation_id = %record.id, error = %e, "skipping malformed reservation");
                diagnostics.push(Diagnostic::InvalidReservation {
                    reservation_id: record.id.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    // Generate per pool, remembering how many slots each contributed so the
    // resolved sequence can be split back apart.
    let mut all_slots: Vec<Slot> = Vec::new();
    let mut counts: Vec<usize> = Vec::with_capacity(resources.len());
    for resource in &resources {
        let own: Vec<Reservation> = reservations
            .iter()
            .filter(|r| r.resource_id == resource.id)
            .cloned()
            .collect();

        let slots = generate_slots(resource, date, &own);

        if resource.is_well_formed() {
            for r in unattached_reservations(&slots, resource, &own) {
                debug!(reservation_id = %r.id, resource_id = %r.resource_id, "reservation is off the slot grid");
                diagnostics.push(Diagnostic::UnattachedReservation {
                    reservation_id: r.id.clone(),
                    resource_id: r.resource_id.clone(),
                });
            }
        }

        counts.push(slots.len());
        all_slots.extend(slots);
    }

    let resolved = apply_travel_restriction_with(&all_slots, home_resource_id, config);

    let mut remaining = resolved.into_iter();
    let schedules: Vec<ResourceSchedule> = resources
        .iter()
        .zip(counts)
        .map(|(resource, count)| ResourceSchedule {
            resource_id: resource.id.clone(),
            name: resource.name.clone(),
            slot_duration_minutes: resource.slot_duration_minutes,
            slots: remaining.by_ref().take(count).collect(),
        })
        .collect();

    let summary = StatusSummary::from_slots(schedules.iter().flat_map(|s| s.slots.iter()));
    debug!(
        %date,
        resources = schedules.len(),
        slots = summary.total(),
        available = summary.available,
        travel_restricted = summary.travel_restricted,
        diagnostics = diagnostics.len(),
        "resolved day"
    );

    DayAvailability {
        date,
        home_resource_id: home_resource_id.map(str::to_string),
        resources: schedules,
        summary,
        diagnostics,
    }
}
