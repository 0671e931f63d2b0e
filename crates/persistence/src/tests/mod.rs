// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;

use crate::SqlitePersistence;
use slotbook_domain::{
    Appointment, AppointmentSettingsInput, AppointmentStatus, AvailabilitySubmission, Package,
    Seller, UtcInterval, ValidatedAvailability, WeeklyAvailabilityInput, civil_time,
    validate_availability_settings,
};

pub fn create_test_seller(persistence: &mut SqlitePersistence) -> i64 {
    let seller = Seller::new("Ayse Yilmaz", "Europe/Istanbul").unwrap();
    persistence.create_seller(&seller).unwrap()
}

pub fn create_test_package(persistence: &mut SqlitePersistence, seller_id: i64) -> i64 {
    let package = Package::new(seller_id, "Consultation", 60).unwrap();
    persistence.create_package(&package).unwrap()
}

pub fn interval(start: &str, end: &str) -> UtcInterval {
    UtcInterval::new(
        civil_time::parse_utc(start).unwrap(),
        civil_time::parse_utc(end).unwrap(),
    )
    .unwrap()
}

pub fn create_test_appointment(
    seller_id: i64,
    package_id: i64,
    start: &str,
    end: &str,
) -> Appointment {
    Appointment {
        appointment_id: None,
        seller_id,
        package_id,
        interval: interval(start, end),
        status: AppointmentStatus::Pending,
    }
}

/// Monday-Friday 09:00-17:00, weekend closed.
pub fn create_test_availability(seller_id: i64, max_daily: i64) -> ValidatedAvailability {
    let submission = AvailabilitySubmission {
        availability: (0..7)
            .map(|day| WeeklyAvailabilityInput {
                day_of_week: day,
                start_time: String::from("09:00"),
                end_time: String::from("17:00"),
                is_available: (1..=5).contains(&day),
            })
            .collect(),
        settings: AppointmentSettingsInput {
            is_active: true,
            max_daily_appointments: max_daily,
            duration_between_appointments: 10,
        },
    };
    validate_availability_settings(seller_id, &submission).unwrap()
}
