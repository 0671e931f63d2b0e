// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{SELLER_ID, clock, date, interval, rule, utc};
use crate::{
    AppointmentStatus, ClockTime, DomainError, Package, Seller, UnavailabilityWindow, UtcInterval,
};
use std::str::FromStr;

#[test]
fn test_clock_time_display_and_parse() {
    assert_eq!(clock("07:05").to_string(), "07:05:00");
    assert_eq!(ClockTime::END_OF_DAY.to_string(), "24:00:00");
    assert_eq!(ClockTime::from_str("23:59:59").unwrap().seconds_from_midnight(), 86_399);
    assert!(ClockTime::from_hms(24, 0, 0).is_none());
}

#[test]
fn test_clock_time_end_of_day_anchors_to_next_midnight() {
    let anchored = ClockTime::END_OF_DAY.on(date("2025-09-01")).unwrap();
    assert_eq!(anchored.to_string(), "2025-09-02 00:00:00");
}

#[test]
fn test_interval_requires_start_before_end() {
    assert!(matches!(
        UtcInterval::new(utc("2025-09-01T08:00:00Z"), utc("2025-09-01T08:00:00Z")),
        Err(DomainError::InvalidInterval { .. })
    ));
    assert!(UtcInterval::new(utc("2025-09-01T09:00:00Z"), utc("2025-09-01T08:00:00Z")).is_err());
}

#[test]
fn test_interval_overlap_is_half_open() {
    let a = interval("2025-09-01T07:00:00Z", "2025-09-01T08:00:00Z");
    let touching = interval("2025-09-01T08:00:00Z", "2025-09-01T09:00:00Z");
    let crossing = interval("2025-09-01T07:59:00Z", "2025-09-01T09:00:00Z");
    assert!(!a.overlaps(&touching));
    assert!(!touching.overlaps(&a));
    assert!(a.overlaps(&crossing));
    assert!(a.widened(1).overlaps(&touching));
}

#[test]
fn test_rule_covers_only_available_window() {
    let open = rule(1, "09:00", "17:00", true);
    assert!(open.covers(clock("09:00")));
    assert!(open.covers(clock("16:59")));
    assert!(!open.covers(clock("17:00")));
    assert!(!rule(1, "09:00", "17:00", false).covers(clock("10:00")));
}

#[test]
fn test_unavailability_window_rejects_inverted_interval() {
    let result = UnavailabilityWindow::new(
        SELLER_ID,
        utc("2025-09-02T00:00:00Z"),
        utc("2025-09-01T00:00:00Z"),
        None,
    );
    assert!(matches!(result, Err(DomainError::InvalidInterval { .. })));
}

#[test]
fn test_appointment_status_round_trip_and_occupancy() {
    for status in [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ] {
        assert_eq!(AppointmentStatus::from_str(status.as_str()).unwrap(), status);
    }
    assert!(AppointmentStatus::Confirmed.occupies_slot());
    assert!(!AppointmentStatus::Cancelled.occupies_slot());
    assert!(matches!(
        AppointmentStatus::from_str("no-show"),
        Err(DomainError::InvalidAppointmentStatus(_))
    ));
}

#[test]
fn test_seller_validates_name_and_timezone() {
    let seller = Seller::new("  Ayse  ", "Europe/Istanbul").unwrap();
    assert_eq!(seller.name, "Ayse");
    assert!(matches!(
        Seller::new("", "Europe/Istanbul"),
        Err(DomainError::InvalidName(_))
    ));
    assert!(matches!(
        Seller::new("Ayse", "Europe/Atlantis"),
        Err(DomainError::UnknownTimezone(_))
    ));
}

#[test]
fn test_package_validates_duration() {
    assert_eq!(Package::new(SELLER_ID, "Consult", 60).unwrap().duration_minutes, 60);
    assert!(matches!(
        Package::new(SELLER_ID, "Consult", 0),
        Err(DomainError::InvalidDuration { minutes: 0 })
    ));
    assert!(Package::new(SELLER_ID, "Consult", 1441).is_err());
    assert!(Package::new(SELLER_ID, " ", 30).is_err());
}
