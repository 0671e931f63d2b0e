// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{TestSeller, create_istanbul_seller};
use crate::{
    ApiError, CreateAppointmentRequest, ListSlotsRequest, ListSlotsResponse, book_appointment,
    list_slots,
};

fn monday_request(seller: &TestSeller, slot_minutes: Option<i64>) -> ListSlotsRequest {
    ListSlotsRequest {
        seller_id: seller.seller_id,
        package_id: seller.package_id,
        date: String::from("2025-09-01"),
        slot_minutes,
    }
}

#[test]
fn test_list_slots_hourly_monday() {
    let mut seller: TestSeller = create_istanbul_seller();
    let request: ListSlotsRequest = monday_request(&seller, Some(60));

    let response: ListSlotsResponse = list_slots(&mut seller.persistence, &request, 15).unwrap();

    assert_eq!(response.total_slots, 24);
    assert_eq!(response.available_slots, 8);
    assert_eq!(response.outside_hours_slots, 16);
    assert_eq!(response.booked_slots, 0);

    let nine: &crate::SlotInfo = &response.slots[9];
    assert_eq!(nine.hour, "09:00:00");
    assert_eq!(nine.start_time, "2025-09-01T06:00:00Z");
    assert_eq!(nine.end_time, "2025-09-01T07:00:00Z");
    assert_eq!(nine.tz, "Europe/Istanbul");
    assert_eq!(nine.day_date, "2025-09-01");
}

#[test]
fn test_list_slots_reflects_booking() {
    let mut seller: TestSeller = create_istanbul_seller();
    book_appointment(
        &mut seller.persistence,
        &CreateAppointmentRequest {
            seller_id: seller.seller_id,
            package_id: seller.package_id,
            start_time: String::from("2025-09-01T07:00:00Z"),
        },
    )
    .unwrap();

    let request: ListSlotsRequest = monday_request(&seller, Some(60));
    let response: ListSlotsResponse = list_slots(&mut seller.persistence, &request, 15).unwrap();

    assert_eq!(response.available_slots, 7);
    assert_eq!(response.booked_slots, 1);
    assert_eq!(response.existing_appointments, 1);
    assert!(response.slots[10].is_booked);
    assert!(!response.slots[10].is_available);
}

#[test]
fn test_default_cadence_applies_when_absent() {
    let mut seller: TestSeller = create_istanbul_seller();
    let request: ListSlotsRequest = monday_request(&seller, None);

    let response: ListSlotsResponse = list_slots(&mut seller.persistence, &request, 30).unwrap();
    assert_eq!(response.total_slots, 48);
}

#[test]
fn test_out_of_range_cadence_is_invalid_input() {
    let mut seller: TestSeller = create_istanbul_seller();
    let request: ListSlotsRequest = monday_request(&seller, Some(0));

    let result = list_slots(&mut seller.persistence, &request, 15);
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "slotMinutes"
    ));
}

#[test]
fn test_malformed_date_is_invalid_input() {
    let mut seller: TestSeller = create_istanbul_seller();
    let mut request: ListSlotsRequest = monday_request(&seller, Some(60));
    request.date = String::from("2025-13-01");

    let result = list_slots(&mut seller.persistence, &request, 15);
    assert!(matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "date"));
}

#[test]
fn test_unknown_package_is_not_found() {
    let mut seller: TestSeller = create_istanbul_seller();
    let mut request: ListSlotsRequest = monday_request(&seller, Some(60));
    request.package_id = 9999;

    let result = list_slots(&mut seller.persistence, &request, 15);
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}
