// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for the slot engine and its registry.
//!
//! Engine operations go through `slotbook` against the persistence
//! adapter; registry and unavailability maintenance call persistence
//! directly.

use chrono::{DateTime, Utc};
use slotbook::{BookingRequest, SlotQuery};
use slotbook_domain::{
    Appointment, AppointmentSettingsInput, AvailabilitySubmission, DomainError, Package, Seller,
    SlotListing, UnavailabilityWindow, UtcInterval, ValidatedAvailability,
    WeeklyAvailabilityInput, civil_time,
};
use slotbook_persistence::SqlitePersistence;
use tracing::{debug, info};

use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AppointmentInfo, AvailabilitySettingsResponse, CreateAppointmentRequest, CreatePackageRequest,
    CreateSellerRequest, CreateUnavailabilityRequest, ListSlotsRequest, ListSlotsResponse,
    ListUnavailabilityRequest, ListUnavailabilityResponse, PackageInfo, ReplaceAvailabilityRequest,
    SellerInfo, UnavailabilityInfo,
};

fn require_seller(persistence: &mut SqlitePersistence, seller_id: i64) -> Result<Seller, ApiError> {
    persistence
        .get_seller(seller_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| translate_domain_error(DomainError::SellerNotFound(seller_id)))
}

fn parse_instant(field: &str, value: &str) -> Result<DateTime<Utc>, ApiError> {
    civil_time::parse_utc(value).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: e.to_string(),
    })
}

/// Lists the slots of one seller-local day.
///
/// `default_slot_minutes` applies when the request carries no cadence.
///
/// # Errors
///
/// Returns `InvalidInput` for a malformed date or cadence, `ResourceNotFound`
/// for an unknown seller or package, and `ServiceUnavailable` if storage
/// cannot be read.
pub fn list_slots(
    persistence: &mut SqlitePersistence,
    request: &ListSlotsRequest,
    default_slot_minutes: u32,
) -> Result<ListSlotsResponse, ApiError> {
    let query: SlotQuery = SlotQuery {
        seller_id: request.seller_id,
        package_id: request.package_id,
        date: request.date.clone(),
        slot_minutes: Some(
            request
                .slot_minutes
                .unwrap_or_else(|| i64::from(default_slot_minutes)),
        ),
    };

    let listing: SlotListing =
        slotbook::list_slots(persistence, &query).map_err(translate_core_error)?;
    Ok(ListSlotsResponse::from(&listing))
}

/// Replaces a seller's weekly availability and appointment settings.
///
/// # Errors
///
/// Returns `ValidationFailed` with every violation if the submission is
/// rejected; nothing is written in that case.
pub fn replace_availability_settings(
    persistence: &mut SqlitePersistence,
    request: &ReplaceAvailabilityRequest,
) -> Result<AvailabilitySettingsResponse, ApiError> {
    let submission: AvailabilitySubmission = AvailabilitySubmission {
        availability: request
            .availability
            .iter()
            .map(|entry| WeeklyAvailabilityInput {
                day_of_week: entry.day_of_week,
                start_time: entry.start_time.clone(),
                end_time: entry.end_time.clone(),
                is_available: entry.is_available,
            })
            .collect(),
        settings: AppointmentSettingsInput {
            is_active: request.settings.is_active,
            max_daily_appointments: request.settings.max_daily_appointments,
            duration_between_appointments: request.settings.duration_between_appointments,
        },
    };

    let validated: ValidatedAvailability =
        slotbook::replace_availability_settings(persistence, request.seller_id, &submission)
            .map_err(translate_core_error)?;
    Ok(AvailabilitySettingsResponse::from(&validated))
}

/// Returns a seller's current availability settings.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the seller is unknown or has never
/// submitted settings.
pub fn get_availability_settings(
    persistence: &mut SqlitePersistence,
    seller_id: i64,
) -> Result<AvailabilitySettingsResponse, ApiError> {
    let current: ValidatedAvailability =
        slotbook::get_availability_settings(persistence, seller_id)
            .map_err(translate_core_error)?;
    Ok(AvailabilitySettingsResponse::from(&current))
}

/// Registers a seller.
///
/// # Errors
///
/// Returns `InvalidInput` for a blank name or an unknown timezone.
pub fn create_seller(
    persistence: &mut SqlitePersistence,
    request: &CreateSellerRequest,
) -> Result<SellerInfo, ApiError> {
    let seller: Seller =
        Seller::new(&request.name, &request.timezone).map_err(translate_domain_error)?;
    let seller_id: i64 = persistence
        .create_seller(&seller)
        .map_err(translate_persistence_error)?;

    info!(seller_id, timezone = %seller.timezone, "Registered seller");
    Ok(SellerInfo::from_seller(seller_id, &seller, Vec::new()))
}

/// Returns a seller with their packages.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the seller is unknown.
pub fn get_seller(
    persistence: &mut SqlitePersistence,
    seller_id: i64,
) -> Result<SellerInfo, ApiError> {
    let seller: Seller = require_seller(persistence, seller_id)?;
    let packages: Vec<PackageInfo> = persistence
        .list_packages(seller_id)
        .map_err(translate_persistence_error)?
        .iter()
        .filter_map(|p| p.package_id.map(|id| PackageInfo::from_package(id, p)))
        .collect();
    Ok(SellerInfo::from_seller(seller_id, &seller, packages))
}

/// Registers a package for an existing seller.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown seller and `InvalidInput` for
/// a blank name or a duration outside `[1, 1440]`.
pub fn create_package(
    persistence: &mut SqlitePersistence,
    request: &CreatePackageRequest,
) -> Result<PackageInfo, ApiError> {
    let package: Package = Package::new(request.seller_id, &request.name, request.duration_minutes)
        .map_err(translate_domain_error)?;
    require_seller(persistence, request.seller_id)?;

    let package_id: i64 = persistence
        .create_package(&package)
        .map_err(translate_persistence_error)?;

    info!(
        package_id,
        seller_id = request.seller_id,
        duration_minutes = package.duration_minutes,
        "Registered package"
    );
    Ok(PackageInfo::from_package(package_id, &package))
}

/// Blocks out an interval on a seller's calendar.
///
/// Overlapping windows are allowed.
///
/// # Errors
///
/// Returns `InvalidInput` for malformed instants or `start >= end`, and
/// `ResourceNotFound` for an unknown seller.
pub fn create_unavailability(
    persistence: &mut SqlitePersistence,
    request: &CreateUnavailabilityRequest,
) -> Result<UnavailabilityInfo, ApiError> {
    let start: DateTime<Utc> = parse_instant("startTime", &request.start_time)?;
    let end: DateTime<Utc> = parse_instant("endTime", &request.end_time)?;
    let reason: Option<String> = request
        .reason
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string);
    let window: UnavailabilityWindow =
        UnavailabilityWindow::new(request.seller_id, start, end, reason)
            .map_err(translate_domain_error)?;
    require_seller(persistence, request.seller_id)?;

    let unavailability_id: i64 = persistence
        .create_unavailability(&window)
        .map_err(translate_persistence_error)?;

    info!(
        unavailability_id,
        seller_id = request.seller_id,
        start = %request.start_time,
        end = %request.end_time,
        "Recorded unavailability"
    );
    Ok(UnavailabilityInfo::from_window(unavailability_id, &window))
}

/// Lists a seller's unavailability windows that overlap `[from, to)`.
///
/// # Errors
///
/// Returns `InvalidInput` for malformed bounds or `from >= to`, and
/// `ResourceNotFound` for an unknown seller.
pub fn list_unavailability(
    persistence: &mut SqlitePersistence,
    request: &ListUnavailabilityRequest,
) -> Result<ListUnavailabilityResponse, ApiError> {
    let from: DateTime<Utc> = parse_instant("from", &request.from)?;
    let to: DateTime<Utc> = parse_instant("to", &request.to)?;
    let span: UtcInterval = UtcInterval::new(from, to).map_err(|e| ApiError::InvalidInput {
        field: String::from("to"),
        message: e.to_string(),
    })?;
    require_seller(persistence, request.seller_id)?;

    let windows: Vec<UnavailabilityInfo> = persistence
        .get_unavailability_in_span(request.seller_id, &span)
        .map_err(translate_persistence_error)?
        .iter()
        .filter_map(|w| {
            w.unavailability_id
                .map(|id| UnavailabilityInfo::from_window(id, w))
        })
        .collect();

    debug!(
        seller_id = request.seller_id,
        count = windows.len(),
        "Listed unavailability"
    );
    Ok(ListUnavailabilityResponse {
        seller_id: request.seller_id,
        windows,
    })
}

/// Removes an unavailability window.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the window does not exist.
pub fn delete_unavailability(
    persistence: &mut SqlitePersistence,
    unavailability_id: i64,
) -> Result<(), ApiError> {
    let removed: bool = persistence
        .delete_unavailability(unavailability_id)
        .map_err(translate_persistence_error)?;
    if !removed {
        return Err(translate_domain_error(
            DomainError::UnavailabilityNotFound(unavailability_id),
        ));
    }
    info!(unavailability_id, "Removed unavailability");
    Ok(())
}

/// Books an appointment after re-checking the seller's availability.
///
/// # Errors
///
/// Returns `DomainRuleViolation` when the seller is inactive, closed,
/// unavailable or at their daily cap, and `Conflict` when the slot is taken.
pub fn book_appointment(
    persistence: &mut SqlitePersistence,
    request: &CreateAppointmentRequest,
) -> Result<AppointmentInfo, ApiError> {
    let booking: BookingRequest = BookingRequest {
        seller_id: request.seller_id,
        package_id: request.package_id,
        start_time: request.start_time.clone(),
    };
    let appointment: Appointment =
        slotbook::book_appointment(persistence, &booking).map_err(translate_core_error)?;
    let appointment_id: i64 = appointment.appointment_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Stored appointment has no ID"),
    })?;
    Ok(AppointmentInfo::from_appointment(appointment_id, &appointment))
}

/// Cancels an appointment, freeing its slot.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the appointment does not exist.
pub fn cancel_appointment(
    persistence: &mut SqlitePersistence,
    appointment_id: i64,
) -> Result<AppointmentInfo, ApiError> {
    let cancelled: Appointment =
        slotbook::cancel_appointment(persistence, appointment_id).map_err(translate_core_error)?;
    Ok(AppointmentInfo::from_appointment(appointment_id, &cancelled))
}
