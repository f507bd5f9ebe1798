//! Slot generation: tile a pool's operating window and mark exact-match
//! reservations as booked or unavailable, following the reservation's status.
//!
//! The window is cut into back-to-back slots of the resource's duration,
//! starting at the opening time. A trailing piece shorter than one slot is
//! dropped rather than truncated. A reservation attaches to a slot only when
//! its resource, start, and end all equal the slot's; anything off the grid
//! stays unattached (see [`unattached_reservations`]).

use chrono::{Duration, NaiveDate};

use crate::model::{Reservation, Resource, Slot, SlotStatus};

/// Generate the ordered slots for `resource` on `date`.
///
/// `reservations` should already be narrowed to this resource and date. A
/// misconfigured resource (non-positive duration, or start not before end)
/// yields an empty sequence.
pub fn generate_slots(
    resource: &Resource,
    date: NaiveDate,
    reservations: &[Reservation],
) -> Vec<Slot> {
    if !resource.is_well_formed() {
        return Vec::new();
    }

    let window_end = date.and_time(resource.window_end);
    let mut cursor = date.and_time(resource.window_start);

    // Nothing fits. Also keeps `Duration::minutes` clear of its overflow panic.
    if resource.slot_duration_minutes > (window_end - cursor).num_minutes() {
        return Vec::new();
    }
    let step = Duration::minutes(resource.slot_duration_minutes);

    let mut slots = Vec::new();

    while cursor + step <= window_end {
        let start_time = cursor.time();
        let end_time = (cursor + step).time();

        let matched = reservations.iter().find(|r| {
            r.resource_id == resource.id && r.start_time == start_time && r.end_time == end_time
        });

        let (status, reservation_ref) = match matched {
            Some(r) => (SlotStatus::from(r.status), Some(r.id.clone())),
            None => (SlotStatus::Available, None),
        };

        slots.push(Slot {
            resource_id: resource.id.clone(),
            date,
            start_time,
            end_time,
            status,
            reservation_ref,
        });

        cursor += step;
    }

    slots
}

/// Reservations for `resource` that no generated slot picked up.
///
/// These are off the slot grid and take no part in conflict detection; the
/// caller decides whether to report them.
pub fn unattached_reservations<'a>(
    slots: &[Slot],
    resource: &Resource,
    reservations: &'a [Reservation],
) -> Vec<&'a Reservation> {
    reservations
        .iter()
        .filter(|r| r.resource_id == resource.id)
        .filter(|r| {
            !slots
                .iter()
                .any(|s| s.reservation_ref.as_deref() == Some(r.id.as_str()))
        })
        .collect()
}
