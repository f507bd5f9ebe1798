//! Tests for a full day pass from raw store records.

use chrono::{NaiveDate, NaiveTime, Timelike};
use pool_availability::config::EngineConfig;
use pool_availability::model::{ReservationRecord, ResourceRecord, SlotStatus};
use pool_availability::schedule::{resolve_day, DayAvailability, Diagnostic};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 7, 4).unwrap()
}

fn pool(id: &str, name: &str) -> ResourceRecord {
    ResourceRecord {
        id: id.to_string(),
        name: name.to_string(),
        slot_duration_minutes: Some("60".to_string()),
        window_start: Some("08:00".to_string()),
        window_end: Some("20:00".to_string()),
    }
}

fn reservation(id: &str, resource: &str, date: &str, start: &str, end: &str) -> ReservationRecord {
    ReservationRecord {
        id: id.to_string(),
        resource_id: Some(resource.to_string()),
        date: Some(date.to_string()),
        start_time: Some(start.to_string()),
        end_time: Some(end.to_string()),
        status: Some("booked".to_string()),
        owner_id: Some("resident-7".to_string()),
    }
}

fn hours_with(day: &DayAvailability, resource: &str, status: SlotStatus) -> Vec<u32> {
    day.schedule(resource)
        .expect("resource should be scheduled")
        .slots
        .iter()
        .filter(|s| s.status == status)
        .map(|s| s.start_time.hour())
        .collect()
}

fn standard_pools() -> Vec<ResourceRecord> {
    vec![pool("tamarind", "Tamarind"), pool("quayside", "Quayside")]
}

// ── Scenario ────────────────────────────────────────────────────────────────

#[test]
fn end_to_end_day_for_quayside_resident() {
    let reservations = vec![reservation("r1", "tamarind", "2026-07-04", "15:00", "16:00")];

    let result = resolve_day(
        &standard_pools(),
        &reservations,
        day(),
        Some("quayside"),
        &EngineConfig::default(),
    );

    assert_eq!(result.date, day());
    assert_eq!(result.home_resource_id.as_deref(), Some("quayside"));
    assert_eq!(result.resources.len(), 2);
    assert_eq!(result.resources[0].resource_id, "tamarind");
    assert_eq!(result.resources[0].name, "Tamarind");
    assert_eq!(result.resources[1].resource_id, "quayside");

    assert_eq!(hours_with(&result, "tamarind", SlotStatus::Booked), vec![15]);
    assert_eq!(
        hours_with(&result, "quayside", SlotStatus::TravelRestricted),
        vec![14, 15, 16]
    );

    assert_eq!(result.summary.booked, 1);
    assert_eq!(result.summary.travel_restricted, 3);
    assert_eq!(result.summary.available, 20);
    assert_eq!(result.summary.total(), 24);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn bookable_lists_only_available_slots() {
    let reservations = vec![reservation("r1", "tamarind", "2026-07-04", "15:00", "16:00")];

    let result = resolve_day(
        &standard_pools(),
        &reservations,
        day(),
        Some("quayside"),
        &EngineConfig::default(),
    );

    let quayside = result.schedule("quayside").unwrap();
    assert_eq!(quayside.bookable().count(), 9);
    assert!(quayside.bookable().all(|s| s.status == SlotStatus::Available));
}

#[test]
fn reservations_on_other_dates_are_ignored() {
    let reservations = vec![reservation("r1", "tamarind", "2026-07-05", "15:00", "16:00")];

    let result = resolve_day(
        &standard_pools(),
        &reservations,
        day(),
        None,
        &EngineConfig::default(),
    );

    assert_eq!(result.summary.available, 24);
    assert!(result.diagnostics.is_empty());
}

// ── Degradation ─────────────────────────────────────────────────────────────

#[test]
fn unparsable_resource_is_skipped_and_others_resolve() {
    let mut pools = standard_pools();
    pools.push(ResourceRecord {
        id: "lagoon".to_string(),
        name: "Lagoon".to_string(),
        slot_duration_minutes: Some("60".to_string()),
        window_start: Some("late".to_string()),
        window_end: Some("20:00".to_string()),
    });

    let result = resolve_day(&pools, &[], day(), None, &EngineConfig::default());

    assert_eq!(result.resources.len(), 2);
    assert!(result.schedule("lagoon").is_none());
    assert!(matches!(
        &result.diagnostics[..],
        [Diagnostic::InvalidResource { resource_id, .. }] if resource_id == "lagoon"
    ));
}

#[test]
fn misconfigured_resource_keeps_an_empty_schedule() {
    let mut pools = standard_pools();
    pools.push(ResourceRecord {
        id: "lagoon".to_string(),
        name: "Lagoon".to_string(),
        slot_duration_minutes: Some("-30".to_string()),
        window_start: None,
        window_end: None,
    });

    let result = resolve_day(&pools, &[], day(), None, &EngineConfig::default());

    let lagoon = result.schedule("lagoon").unwrap();
    assert!(lagoon.slots.is_empty());
    assert_eq!(result.summary.total(), 24);
    assert!(matches!(
        &result.diagnostics[..],
        [Diagnostic::MisconfiguredResource { resource_id, .. }] if resource_id == "lagoon"
    ));
}

#[test]
fn malformed_reservation_is_reported_and_excluded() {
    let reservations = vec![
        reservation("bad", "tamarind", "2026-07-04", "25:00", "26:00"),
        reservation("good", "tamarind", "2026-07-04", "10:00", "11:00"),
    ];

    let result = resolve_day(
        &standard_pools(),
        &reservations,
        day(),
        None,
        &EngineConfig::default(),
    );

    assert_eq!(hours_with(&result, "tamarind", SlotStatus::Booked), vec![10]);
    assert_eq!(
        hours_with(&result, "quayside", SlotStatus::TravelRestricted),
        vec![9, 10, 11]
    );
    assert!(matches!(
        &result.diagnostics[..],
        [Diagnostic::InvalidReservation { reservation_id, .. }] if reservation_id == "bad"
    ));
}

#[test]
fn misaligned_reservation_is_reported_and_blocks_nothing() {
    let reservations = vec![reservation("r1", "tamarind", "2026-07-04", "15:15", "16:15")];

    let result = resolve_day(
        &standard_pools(),
        &reservations,
        day(),
        Some("quayside"),
        &EngineConfig::default(),
    );

    assert_eq!(result.summary.available, 24);
    assert_eq!(
        result.diagnostics,
        vec![Diagnostic::UnattachedReservation {
            reservation_id: "r1".to_string(),
            resource_id: "tamarind".to_string(),
        }]
    );
}

#[test]
fn reservation_for_unknown_pool_is_reported() {
    let reservations = vec![reservation("r1", "atlantis", "2026-07-04", "15:00", "16:00")];

    let result = resolve_day(
        &standard_pools(),
        &reservations,
        day(),
        None,
        &EngineConfig::default(),
    );

    assert_eq!(result.summary.available, 24);
    assert_eq!(
        result.diagnostics,
        vec![Diagnostic::UnknownResource {
            reservation_id: "r1".to_string(),
            resource_id: "atlantis".to_string(),
        }]
    );
}

// ── Configuration ───────────────────────────────────────────────────────────

#[test]
fn config_fallbacks_and_buffer_flow_through() {
    let pools = vec![
        ResourceRecord {
            id: "a".to_string(),
            name: "A".to_string(),
            ..Default::default()
        },
        ResourceRecord {
            id: "b".to_string(),
            name: "B".to_string(),
            ..Default::default()
        },
    ];
    let reservations = vec![reservation("r1", "a", "2026-07-04", "12:00", "14:00")];
    let config = EngineConfig {
        travel_buffer_minutes: 60,
        default_slot_duration_minutes: 120,
        default_window_start: "08:00".to_string(),
        default_window_end: "20:00".to_string(),
    };

    let result = resolve_day(&pools, &reservations, day(), None, &config);

    // Two-hour slots: 08, 10, 12, 14, 16, 18. Buffered range 11:00-15:00.
    assert_eq!(result.schedule("a").unwrap().slots.len(), 6);
    assert_eq!(result.schedule("a").unwrap().slot_duration_minutes, 120);
    assert_eq!(
        hours_with(&result, "b", SlotStatus::TravelRestricted),
        vec![10, 12, 14]
    );
}

// ── Determinism & serialization ─────────────────────────────────────────────

#[test]
fn out_of_range_buffer_is_reported_and_clamped() {
    let reservations = vec![reservation("r1", "tamarind", "2026-07-04", "15:00", "16:00")];
    let config = EngineConfig::default().with_travel_buffer(-120);

    let result = resolve_day(&standard_pools(), &reservations, day(), None, &config);

    assert!(matches!(
        result.diagnostics.as_slice(),
        [Diagnostic::InvalidConfig { message }] if message.contains("-120")
    ));
    assert_eq!(
        hours_with(&result, "quayside", SlotStatus::TravelRestricted),
        vec![14, 15, 16]
    );
}

#[test]
fn unavailable_reservation_shows_as_unavailable() {
    let mut blocked = reservation("maint", "tamarind", "2026-07-04", "08:00", "09:00");
    blocked.status = Some("unavailable".to_string());

    let result = resolve_day(&standard_pools(), &[blocked], day(), None, &EngineConfig::default());

    assert_eq!(hours_with(&result, "tamarind", SlotStatus::Unavailable), vec![8]);
    assert!(hours_with(&result, "tamarind", SlotStatus::Booked).is_empty());
    assert_eq!(
        hours_with(&result, "quayside", SlotStatus::TravelRestricted),
        vec![8, 9]
    );
    assert_eq!(result.summary.unavailable, 1);
}

#[test]
fn same_input_gives_same_day() {
    let reservations = vec![reservation("r1", "tamarind", "2026-07-04", "15:00", "16:00")];
    let run = || {
        resolve_day(
            &standard_pools(),
            &reservations,
            day(),
            Some("quayside"),
            &EngineConfig::default(),
        )
    };

    assert_eq!(run(), run());
}

#[test]
fn day_serializes_to_camel_case_json() {
    let reservations = vec![reservation("r1", "tamarind", "2026-07-04", "15:15", "16:15")];

    let result = resolve_day(
        &standard_pools(),
        &reservations,
        day(),
        Some("quayside"),
        &EngineConfig::default(),
    );
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["date"], "2026-07-04");
    assert_eq!(value["homeResourceId"], "quayside");
    assert_eq!(value["resources"][0]["slotDurationMinutes"], 60);
    assert_eq!(value["resources"][0]["slots"][0]["startTime"], "08:00");
    assert_eq!(value["summary"]["travelRestricted"], 0);
    assert_eq!(value["diagnostics"][0]["kind"], "unattached-reservation");
    assert_eq!(value["diagnostics"][0]["reservationId"], "r1");
}

#[test]
fn slots_iterates_every_pool_in_order() {
    let result = resolve_day(&standard_pools(), &[], day(), None, &EngineConfig::default());

    let first_quayside = result
        .slots()
        .position(|s| s.resource_id == "quayside")
        .unwrap();
    assert_eq!(first_quayside, 12);
    assert_eq!(
        result.slots().next().unwrap().start_time,
        NaiveTime::from_hms_opt(8, 0, 0).unwrap()
    );
}
