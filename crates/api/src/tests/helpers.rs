// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use slotbook_persistence::SqlitePersistence;

use crate::{
    AppointmentSettingsBody, CreatePackageRequest, CreateSellerRequest, ReplaceAvailabilityRequest,
    WeeklyAvailabilityEntry, create_package, create_seller, replace_availability_settings,
};

pub struct TestSeller {
    pub persistence: SqlitePersistence,
    pub seller_id: i64,
    pub package_id: i64,
}

pub fn create_test_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// Monday 09:00-17:00 only, 60 minute package, no buffer, cap of five.
pub fn create_istanbul_seller() -> TestSeller {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let seller_id: i64 = create_seller(
        &mut persistence,
        &CreateSellerRequest {
            name: String::from("Ayse Yilmaz"),
            timezone: String::from("Europe/Istanbul"),
        },
    )
    .unwrap()
    .seller_id;
    let package_id: i64 = create_package(
        &mut persistence,
        &CreatePackageRequest {
            seller_id,
            name: String::from("Consultation"),
            duration_minutes: 60,
        },
    )
    .unwrap()
    .package_id;

    replace_availability_settings(
        &mut persistence,
        &create_availability_request(seller_id, &[1], 5, 0),
    )
    .unwrap();

    TestSeller {
        persistence,
        seller_id,
        package_id,
    }
}

/// 09:00-17:00 on `open_days`, closed otherwise.
pub fn create_availability_request(
    seller_id: i64,
    open_days: &[i64],
    max_daily: i64,
    buffer: i64,
) -> ReplaceAvailabilityRequest {
    ReplaceAvailabilityRequest {
        seller_id,
        availability: (0..7)
            .map(|day| WeeklyAvailabilityEntry {
                day_of_week: day,
                start_time: String::from("09:00"),
                end_time: String::from("17:00"),
                is_available: open_days.contains(&day),
            })
            .collect(),
        settings: AppointmentSettingsBody {
            is_active: true,
            max_daily_appointments: max_daily,
            duration_between_appointments: buffer,
        },
    }
}
