// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{PACKAGE_ID, SELLER_ID, booked, interval, istanbul_seller};
use crate::{CoreError, RepositoryError, SlotQuery, list_slots};
use slotbook_domain::{AppointmentStatus, DomainError, UnavailabilityWindow};

fn query(date: &str, slot_minutes: Option<i64>) -> SlotQuery {
    SlotQuery {
        seller_id: SELLER_ID,
        package_id: PACKAGE_ID,
        date: date.to_string(),
        slot_minutes,
    }
}

#[test]
fn test_list_slots_istanbul_monday() {
    let mut repo = istanbul_seller();
    let listing = list_slots(&mut repo, &query("2025-09-01", Some(60))).unwrap();

    assert_eq!(listing.total_slots, 24);
    assert_eq!(listing.available_slots, 8);
    assert_eq!(listing.outside_hours_slots, 16);
    assert_eq!(listing.booked_slots, 0);
}

#[test]
fn test_list_slots_with_existing_booking() {
    let mut repo = istanbul_seller();
    repo.appointments.push(booked(
        "2025-09-01T07:00:00Z",
        "2025-09-01T08:00:00Z",
        AppointmentStatus::Confirmed,
    ));
    repo.appointments.push(booked(
        "2025-09-01T09:00:00Z",
        "2025-09-01T10:00:00Z",
        AppointmentStatus::Cancelled,
    ));

    let listing = list_slots(&mut repo, &query("2025-09-01", Some(60))).unwrap();
    assert_eq!(listing.available_slots, 7);
    assert_eq!(listing.booked_slots, 1);
    assert_eq!(listing.existing_appointments, 1);
}

#[test]
fn test_list_slots_applies_unavailability() {
    let mut repo = istanbul_seller();
    repo.unavailability.push(UnavailabilityWindow {
        unavailability_id: Some(1),
        seller_id: SELLER_ID,
        interval: interval("2025-09-01T06:00:00Z", "2025-09-01T09:00:00Z"),
        reason: None,
    });

    let listing = list_slots(&mut repo, &query("2025-09-01", Some(60))).unwrap();
    assert_eq!(listing.available_slots, 5);
    assert_eq!(listing.unavailabilities, 1);
}

#[test]
fn test_list_slots_defaults_to_fifteen_minutes() {
    let mut repo = istanbul_seller();
    let listing = list_slots(&mut repo, &query("2025-09-01", None)).unwrap();
    assert_eq!(listing.total_slots, 96);
}

#[test]
fn test_list_slots_rejects_bad_date_before_reading() {
    let mut repo = istanbul_seller();
    let result = list_slots(&mut repo, &query("2025-9-1", Some(60)));
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidDateFormat { .. }))
    ));
    assert_eq!(repo.calls, 0);
}

#[test]
fn test_list_slots_rejects_out_of_range_cadence() {
    let mut repo = istanbul_seller();
    for minutes in [0, 1441, -5] {
        let result = list_slots(&mut repo, &query("2025-09-01", Some(minutes)));
        assert!(matches!(
            result,
            Err(CoreError::DomainViolation(DomainError::InvalidSlotMinutes { .. }))
        ));
    }
    assert_eq!(repo.calls, 0);
}

#[test]
fn test_list_slots_unknown_seller() {
    let mut repo = istanbul_seller();
    let mut q = query("2025-09-01", None);
    q.seller_id = 99;
    assert!(matches!(
        list_slots(&mut repo, &q),
        Err(CoreError::DomainViolation(DomainError::SellerNotFound(99)))
    ));
}

#[test]
fn test_list_slots_package_of_other_seller_is_not_found() {
    let mut repo = istanbul_seller();
    repo.sellers.insert(2, repo.sellers[&SELLER_ID]);
    let mut q = query("2025-09-01", None);
    q.seller_id = 2;
    assert!(matches!(
        list_slots(&mut repo, &q),
        Err(CoreError::DomainViolation(DomainError::PackageNotFound(
            PACKAGE_ID
        )))
    ));
}

#[test]
fn test_list_slots_surfaces_repository_failure() {
    let mut repo = istanbul_seller();
    repo.failure = Some(RepositoryError::Unavailable(String::from("disk gone")));
    let result = list_slots(&mut repo, &query("2025-09-01", None));
    assert!(matches!(
        result,
        Err(CoreError::RepositoryUnavailable {
            operation: "seller_timezone",
            ..
        })
    ));
}

#[test]
fn test_list_slots_is_idempotent() {
    let mut repo = istanbul_seller();
    let first = list_slots(&mut repo, &query("2025-09-01", Some(30))).unwrap();
    let second = list_slots(&mut repo, &query("2025-09-01", Some(30))).unwrap();
    assert_eq!(first, second);
}
