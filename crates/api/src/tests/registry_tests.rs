// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{TestSeller, create_istanbul_seller, create_test_persistence};
use crate::{
    ApiError, CreatePackageRequest, CreateSellerRequest, CreateUnavailabilityRequest,
    ListUnavailabilityRequest, SellerInfo, create_package, create_seller, create_unavailability,
    delete_unavailability, get_seller, list_unavailability,
};

#[test]
fn test_create_and_get_seller_with_packages() {
    let mut seller: TestSeller = create_istanbul_seller();

    let info: SellerInfo = get_seller(&mut seller.persistence, seller.seller_id).unwrap();
    assert_eq!(info.name, "Ayse Yilmaz");
    assert_eq!(info.timezone, "Europe/Istanbul");
    assert_eq!(info.packages.len(), 1);
    assert_eq!(info.packages[0].package_id, seller.package_id);
    assert_eq!(info.packages[0].duration_minutes, 60);
}

#[test]
fn test_unknown_timezone_is_rejected() {
    let mut persistence = create_test_persistence();
    let result = create_seller(
        &mut persistence,
        &CreateSellerRequest {
            name: String::from("Somebody"),
            timezone: String::from("Mars/Olympus_Mons"),
        },
    );
    assert!(matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "timezone"));
}

#[test]
fn test_package_duration_bounds() {
    let mut seller: TestSeller = create_istanbul_seller();
    for minutes in [0, 1441] {
        let result = create_package(
            &mut seller.persistence,
            &CreatePackageRequest {
                seller_id: seller.seller_id,
                name: String::from("Too odd"),
                duration_minutes: minutes,
            },
        );
        assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
    }
}

#[test]
fn test_package_for_unknown_seller_is_not_found() {
    let mut persistence = create_test_persistence();
    let result = create_package(
        &mut persistence,
        &CreatePackageRequest {
            seller_id: 42,
            name: String::from("Orphan"),
            duration_minutes: 30,
        },
    );
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_unavailability_lifecycle() {
    let mut seller: TestSeller = create_istanbul_seller();
    let created = create_unavailability(
        &mut seller.persistence,
        &CreateUnavailabilityRequest {
            seller_id: seller.seller_id,
            start_time: String::from("2025-09-01T07:00:00Z"),
            end_time: String::from("2025-09-01T09:00:00Z"),
            reason: Some(String::from("  Doctor  ")),
        },
    )
    .unwrap();
    assert_eq!(created.reason.as_deref(), Some("Doctor"));

    let listed = list_unavailability(
        &mut seller.persistence,
        &ListUnavailabilityRequest {
            seller_id: seller.seller_id,
            from: String::from("2025-09-01T00:00:00Z"),
            to: String::from("2025-09-02T00:00:00Z"),
        },
    )
    .unwrap();
    assert_eq!(listed.windows, vec![created.clone()]);

    delete_unavailability(&mut seller.persistence, created.unavailability_id).unwrap();
    let again = delete_unavailability(&mut seller.persistence, created.unavailability_id);
    assert!(matches!(again, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_inverted_unavailability_is_rejected() {
    let mut seller: TestSeller = create_istanbul_seller();
    let result = create_unavailability(
        &mut seller.persistence,
        &CreateUnavailabilityRequest {
            seller_id: seller.seller_id,
            start_time: String::from("2025-09-01T09:00:00Z"),
            end_time: String::from("2025-09-01T09:00:00Z"),
            reason: None,
        },
    );
    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_fractional_second_unavailability_is_rejected() {
    let mut seller: TestSeller = create_istanbul_seller();
    let result = create_unavailability(
        &mut seller.persistence,
        &CreateUnavailabilityRequest {
            seller_id: seller.seller_id,
            start_time: String::from("2025-09-01T06:59:59.500Z"),
            end_time: String::from("2025-09-01T07:00:00.900Z"),
            reason: None,
        },
    );
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "startTime"
    ));

    let listed = list_unavailability(
        &mut seller.persistence,
        &ListUnavailabilityRequest {
            seller_id: seller.seller_id,
            from: String::from("2025-09-01T00:00:00Z"),
            to: String::from("2025-09-02T00:00:00Z"),
        },
    )
    .unwrap();
    assert!(listed.windows.is_empty());
}
