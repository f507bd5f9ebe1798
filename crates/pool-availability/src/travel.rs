//! Cross-pool availability: apply the travel buffer around occupied slots.
//!
//! A requester cannot be at two pools at once, and getting between pools
//! takes time. Every still-available slot is checked against the occupied
//! slots of every *other* pool:
//!
//! - If the occupied slot is at the requester's home pool, no buffer applies
//!   and the candidate is marked `unavailable` only when the two ranges
//!   actually overlap.
//! - Otherwise the occupied range is padded by the travel buffer on both
//!   sides (edges inclusive) and a hit marks the candidate
//!   `travel-restricted`.
//!
//! The first occupied slot that conflicts decides the outcome. Slots that were
//! already booked or unavailable are never touched, and two slots of the same
//! pool never restrict each other.

use crate::config::EngineConfig;
use crate::model::{Slot, SlotStatus};

/// Decide what `occupied` does to `candidate`, if anything.
///
/// Returns the downgraded status, or `None` when there is no conflict (which
/// includes every pair at the same resource).
pub fn classify_conflict(
    candidate: &Slot,
    occupied: &Slot,
    home_resource_id: Option<&str>,
    travel_buffer_minutes: i64,
) -> Option<SlotStatus> {
    if candidate.resource_id == occupied.resource_id {
        return None;
    }

    let candidate_range = candidate.range();
    let occupied_range = occupied.range();

    if home_resource_id == Some(occupied.resource_id.as_str()) {
        candidate_range
            .overlaps_or_touches(&occupied_range)
            .then_some(SlotStatus::Unavailable)
    } else {
        candidate_range
            .hits_buffered(&occupied_range, travel_buffer_minutes)
            .then_some(SlotStatus::TravelRestricted)
    }
}

/// Resolve travel restrictions with the default 30-minute buffer.
///
/// `all_slots` is the concatenation of every pool's generated slots for one
/// day. The result has the same length and order.
pub fn apply_travel_restriction(all_slots: &[Slot], home_resource_id: Option<&str>) -> Vec<Slot> {
    apply_travel_restriction_with(all_slots, home_resource_id, &EngineConfig::default())
}

/// Resolve travel restrictions using the buffer from `config`, clamped into
/// `0..=MAX_TRAVEL_BUFFER_MINUTES` (see [`EngineConfig::validate`]).
pub fn apply_travel_restriction_with(
    all_slots: &[Slot],
    home_resource_id: Option<&str>,
    config: &EngineConfig,
) -> Vec<Slot> {
    // Partition once, from the input snapshot. Downgrades made during this
    // pass do not feed back into the occupied set.
    let travel_buffer = config.effective_travel_buffer();
    let occupied: Vec<&Slot> = all_slots.iter().filter(|s| s.status.is_occupied()).collect();

    all_slots
        .iter()
        .map(|slot| {
            if slot.status != SlotStatus::Available {
                return slot.clone();
            }

            occupied
                .iter()
                .find_map(|busy| {
                    classify_conflict(
                        slot,
                        busy,
                        home_resource_id,
                        travel_buffer,
                    )
                    .map(|status| slot.with_status(status, busy.reservation_ref.clone()))
                })
                .unwrap_or_else(|| slot.clone())
        })
        .collect()
}
