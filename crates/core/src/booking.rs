// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{CoreError, RepositoryError};
use crate::repository::AvailabilityRepository;
use crate::slots::{seller_package, seller_timezone};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use slotbook_domain::{
    Appointment, AppointmentStatus, BookingContext, DomainError, Package,
    SellerAppointmentSettings, UtcInterval, civil_time, local_day_span, validate_booking,
};
use tracing::info;

/// A request to book one package with a seller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    /// Seller being booked.
    pub seller_id: i64,
    /// Package being booked.
    pub package_id: i64,
    /// Start instant, RFC 3339.
    pub start_time: String,
}

/// Books an appointment after re-checking availability.
///
/// The end is the start plus the package duration in seller-local wall-clock
/// minutes. The overlap check is repeated atomically by the repository at
/// insert time.
///
/// # Errors
///
/// Returns an error if:
/// - The start time is not RFC 3339
/// - The seller or package does not exist
/// - The seller has no settings or is inactive
/// - Any booking rule fails (working hours, unavailability, overlap, daily cap)
/// - The repository cannot be read or written
pub fn book_appointment<R: AvailabilityRepository>(
    repo: &mut R,
    request: &BookingRequest,
) -> Result<Appointment, CoreError> {
    let start: DateTime<Utc> = civil_time::parse_utc(&request.start_time)?;
    let timezone: Tz = seller_timezone(repo, request.seller_id)?;
    let package: Package = seller_package(repo, request.seller_id, request.package_id)?;

    let end: DateTime<Utc> = civil_time::add_minutes_utc(
        civil_time::to_local(start, timezone),
        timezone,
        i64::from(package.duration_minutes),
    )?;
    let candidate: UtcInterval = UtcInterval::new(start, end)?;

    let settings: SellerAppointmentSettings = repo
        .appointment_settings(request.seller_id)
        .map_err(|e| CoreError::from_repository("appointment_settings", e))?
        .ok_or(CoreError::DomainViolation(
            DomainError::AvailabilityNotConfigured(request.seller_id),
        ))?;
    let rules = repo
        .weekly_rules(request.seller_id)
        .map_err(|e| CoreError::from_repository("weekly_rules", e))?;

    let nearby: UtcInterval =
        local_day_span(start, timezone)?.widened(settings.duration_between_appointments);
    let unavailability = repo
        .unavailability(request.seller_id, &candidate)
        .map_err(|e| CoreError::from_repository("unavailability", e))?;
    let appointments = repo
        .appointments(request.seller_id, &nearby, &[AppointmentStatus::Cancelled])
        .map_err(|e| CoreError::from_repository("appointments", e))?;

    validate_booking(
        &candidate,
        &BookingContext {
            timezone,
            settings: &settings,
            rules: &rules,
            unavailability: &unavailability,
            appointments: &appointments,
        },
    )?;

    let appointment = Appointment {
        appointment_id: None,
        seller_id: request.seller_id,
        package_id: request.package_id,
        interval: candidate,
        status: AppointmentStatus::Pending,
    };

    let stored: Appointment = repo
        .insert_appointment(&appointment, settings.duration_between_appointments)
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => {
                CoreError::DomainViolation(DomainError::SlotAlreadyBooked {
                    start: civil_time::format_utc(start),
                })
            }
            other => CoreError::from_repository("insert_appointment", other),
        })?;

    info!(
        seller_id = request.seller_id,
        appointment_id = ?stored.appointment_id,
        start = %civil_time::format_utc(start),
        "Booked appointment"
    );
    Ok(stored)
}

/// Cancels an appointment, freeing its slot.
///
/// # Errors
///
/// Returns `DomainError::AppointmentNotFound` if the appointment does not exist.
pub fn cancel_appointment<R: AvailabilityRepository>(
    repo: &mut R,
    appointment_id: i64,
) -> Result<Appointment, CoreError> {
    let cancelled: Appointment = repo
        .cancel_appointment(appointment_id)
        .map_err(|e| CoreError::from_repository("cancel_appointment", e))?
        .ok_or(CoreError::DomainViolation(DomainError::AppointmentNotFound(
            appointment_id,
        )))?;
    info!(appointment_id, "Cancelled appointment");
    Ok(cancelled)
}
