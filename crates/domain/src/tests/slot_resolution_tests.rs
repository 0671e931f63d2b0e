// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{appointment, date, istanbul, monday_only_rules, unavailability};
use crate::{
    AppointmentStatus, DaySchedule, RawSlot, SlotListing, generate_raw_slots, resolve_slots,
    rule_for_date,
};

fn istanbul_monday_hourly() -> Vec<RawSlot> {
    let rules = monday_only_rules();
    let schedule = DaySchedule {
        date: date("2025-09-01"),
        timezone: istanbul(),
        slot_minutes: 60,
        duration_minutes: Some(60),
        rule: rule_for_date(&rules, date("2025-09-01")),
    };
    generate_raw_slots(&schedule).unwrap()
}

fn assert_availability_implication(listing: &SlotListing) {
    for slot in &listing.slots {
        if slot.is_available {
            assert!(!slot.is_booked && !slot.is_outside_hours, "{slot:?}");
        }
    }
}

#[test]
fn test_istanbul_monday_without_bookings() {
    let listing = resolve_slots(istanbul_monday_hourly(), &[], &[], istanbul());

    assert_eq!(listing.total_slots, 24);
    assert_eq!(listing.available_slots, 8);
    assert_eq!(listing.outside_hours_slots, 16);
    assert_eq!(listing.booked_slots, 0);
    assert_eq!(listing.existing_appointments, 0);
    assert_eq!(listing.unavailabilities, 0);
    assert!(listing.slots.iter().all(|s| s.timezone == "Europe/Istanbul"));
    assert_availability_implication(&listing);
}

#[test]
fn test_istanbul_monday_with_one_booking() {
    // 10:00-11:00 local
    let booked = appointment(
        "2025-09-01T07:00:00Z",
        "2025-09-01T08:00:00Z",
        AppointmentStatus::Confirmed,
    );
    let listing = resolve_slots(istanbul_monday_hourly(), &[], &[booked], istanbul());

    assert_eq!(listing.total_slots, 24);
    assert_eq!(listing.available_slots, 7);
    assert_eq!(listing.outside_hours_slots, 16);
    assert_eq!(listing.booked_slots, 1);
    assert_eq!(listing.existing_appointments, 1);

    let ten = listing
        .slots
        .iter()
        .find(|s| s.hour.to_string() == "10:00:00")
        .unwrap();
    assert!(ten.is_booked);
    assert!(!ten.is_available);
    assert_availability_implication(&listing);
}

#[test]
fn test_back_to_back_appointment_does_not_touch_neighbours() {
    let booked = appointment(
        "2025-09-01T07:00:00Z",
        "2025-09-01T08:00:00Z",
        AppointmentStatus::Pending,
    );
    let listing = resolve_slots(istanbul_monday_hourly(), &[], &[booked], istanbul());

    let nine = listing.slots.iter().find(|s| s.hour.to_string() == "09:00:00").unwrap();
    let eleven = listing.slots.iter().find(|s| s.hour.to_string() == "11:00:00").unwrap();
    assert!(nine.is_available);
    assert!(eleven.is_available);
}

#[test]
fn test_cancelled_appointments_are_ignored() {
    let cancelled = appointment(
        "2025-09-01T07:00:00Z",
        "2025-09-01T08:00:00Z",
        AppointmentStatus::Cancelled,
    );
    let listing = resolve_slots(istanbul_monday_hourly(), &[], &[cancelled], istanbul());

    assert_eq!(listing.available_slots, 8);
    assert_eq!(listing.booked_slots, 0);
    assert_eq!(listing.existing_appointments, 0);
}

#[test]
fn test_unavailability_blocks_without_marking_booked() {
    // 13:00-15:00 local
    let blocked = unavailability("2025-09-01T10:00:00Z", "2025-09-01T12:00:00Z");
    let listing = resolve_slots(istanbul_monday_hourly(), &[blocked], &[], istanbul());

    assert_eq!(listing.available_slots, 6);
    assert_eq!(listing.booked_slots, 0);
    assert_eq!(listing.unavailabilities, 1);
    assert_availability_implication(&listing);
}

#[test]
fn test_booking_outside_hours_counts_as_booked_only() {
    // 20:00-21:00 local, outside the rule window
    let late = appointment(
        "2025-09-01T17:00:00Z",
        "2025-09-01T18:00:00Z",
        AppointmentStatus::Confirmed,
    );
    let listing = resolve_slots(istanbul_monday_hourly(), &[], &[late], istanbul());

    assert_eq!(listing.available_slots, 8);
    assert_eq!(listing.booked_slots, 1);
    assert_eq!(listing.outside_hours_slots, 16);
}

#[test]
fn test_resolution_is_idempotent() {
    let booked = appointment(
        "2025-09-01T07:00:00Z",
        "2025-09-01T08:00:00Z",
        AppointmentStatus::Confirmed,
    );
    let first = resolve_slots(istanbul_monday_hourly(), &[], &[booked.clone()], istanbul());
    let second = resolve_slots(istanbul_monday_hourly(), &[], &[booked], istanbul());
    assert_eq!(first, second);
}
