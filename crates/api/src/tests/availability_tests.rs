// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    TestSeller, create_availability_request, create_istanbul_seller, create_test_persistence,
};
use crate::{
    ApiError, AvailabilitySettingsResponse, ReplaceAvailabilityRequest, ViolationInfo,
    get_availability_settings, replace_availability_settings,
};

#[test]
fn test_replace_then_read_back() {
    let mut seller: TestSeller = create_istanbul_seller();
    let request: ReplaceAvailabilityRequest =
        create_availability_request(seller.seller_id, &[1, 2, 3, 4, 5], 8, 15);

    let written: AvailabilitySettingsResponse =
        replace_availability_settings(&mut seller.persistence, &request).unwrap();
    let read: AvailabilitySettingsResponse =
        get_availability_settings(&mut seller.persistence, seller.seller_id).unwrap();

    assert_eq!(written, read);
    assert_eq!(read.availability.len(), 7);
    assert_eq!(read.availability[0].day_of_week, 0);
    assert!(!read.availability[0].is_available);
    assert_eq!(read.availability[3].start_time, "09:00:00");
    assert_eq!(read.settings.max_daily_appointments, 8);
    assert_eq!(read.settings.duration_between_appointments, 15);
}

#[test]
fn test_duplicate_weekday_keeps_prior_settings() {
    let mut seller: TestSeller = create_istanbul_seller();
    let before: AvailabilitySettingsResponse =
        get_availability_settings(&mut seller.persistence, seller.seller_id).unwrap();

    let mut request: ReplaceAvailabilityRequest =
        create_availability_request(seller.seller_id, &[1, 2], 8, 15);
    request.availability[6].day_of_week = 2;

    let result = replace_availability_settings(&mut seller.persistence, &request);
    let Err(ApiError::ValidationFailed { violations }) = result else {
        panic!("expected validation failure, got {result:?}");
    };
    let constraints: Vec<&str> = violations.iter().map(|v| v.constraint.as_str()).collect();
    assert!(constraints.contains(&"duplicate_day_of_week"));
    assert!(constraints.contains(&"missing_day_of_week"));

    let after: AvailabilitySettingsResponse =
        get_availability_settings(&mut seller.persistence, seller.seller_id).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_violations_carry_field_paths() {
    let mut seller: TestSeller = create_istanbul_seller();
    let mut request: ReplaceAvailabilityRequest =
        create_availability_request(seller.seller_id, &[1], 0, 500);
    request.availability[1].end_time = String::from("08:00");

    let Err(ApiError::ValidationFailed { violations }) =
        replace_availability_settings(&mut seller.persistence, &request)
    else {
        panic!("expected validation failure");
    };

    let find =
        |field: &str| -> Option<&ViolationInfo> { violations.iter().find(|v| v.field == field) };
    assert_eq!(
        find("availability[1].startTime").unwrap().constraint,
        "start_not_before_end"
    );
    assert_eq!(
        find("settings.maxDailyAppointments").unwrap().constraint,
        "out_of_range"
    );
    assert_eq!(
        find("settings.durationBetweenAppointments")
            .unwrap()
            .constraint,
        "out_of_range"
    );
}

#[test]
fn test_unconfigured_seller_read_back_is_not_found() {
    let mut persistence = create_test_persistence();
    let seller = crate::create_seller(
        &mut persistence,
        &crate::CreateSellerRequest {
            name: String::from("New Seller"),
            timezone: String::from("America/New_York"),
        },
    )
    .unwrap();

    let result = get_availability_settings(&mut persistence, seller.seller_id);
    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Availability settings"
    ));
}

#[test]
fn test_replace_for_unknown_seller_is_not_found() {
    let mut persistence = create_test_persistence();
    let request: ReplaceAvailabilityRequest = create_availability_request(77, &[1], 5, 0);

    let result = replace_availability_settings(&mut persistence, &request);
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}
