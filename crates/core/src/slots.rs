// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::repository::AvailabilityRepository;
use chrono::NaiveDate;
use chrono_tz::Tz;
use slotbook_domain::{
    AppointmentStatus, DEFAULT_SLOT_MINUTES, DaySchedule, DomainError, Package, RawSlot,
    SlotListing, UtcInterval, civil_time, day_span, generate_raw_slots, resolve_slots,
    rule_for_date, validate_slot_minutes,
};
use tracing::debug;

/// Parameters of a slot listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotQuery {
    /// Seller whose calendar is listed.
    pub seller_id: i64,
    /// Package whose duration sets the slot length.
    pub package_id: i64,
    /// Seller-local date, `YYYY-MM-DD`.
    pub date: String,
    /// Slot cadence; defaults to 15 minutes.
    pub slot_minutes: Option<i64>,
}

/// Looks up a package and checks that it belongs to the seller.
///
/// # Errors
///
/// Returns `DomainError::PackageNotFound` if the package is missing or owned
/// by another seller.
pub(crate) fn seller_package<R: AvailabilityRepository>(
    repo: &mut R,
    seller_id: i64,
    package_id: i64,
) -> Result<Package, CoreError> {
    repo.package(package_id)
        .map_err(|e| CoreError::from_repository("package", e))?
        .filter(|p| p.seller_id == seller_id)
        .ok_or(CoreError::DomainViolation(DomainError::PackageNotFound(
            package_id,
        )))
}

/// Resolves a seller's timezone.
///
/// # Errors
///
/// Returns `DomainError::SellerNotFound` if the seller does not exist.
pub(crate) fn seller_timezone<R: AvailabilityRepository>(
    repo: &mut R,
    seller_id: i64,
) -> Result<Tz, CoreError> {
    repo.seller_timezone(seller_id)
        .map_err(|e| CoreError::from_repository("seller_timezone", e))?
        .ok_or(CoreError::DomainViolation(DomainError::SellerNotFound(
            seller_id,
        )))
}

/// Lists the resolved slots of one seller-local day.
///
/// Input is validated before any repository access. Repository failures
/// are returned as errors, never as an empty listing.
///
/// # Errors
///
/// Returns an error if:
/// - The date is not a valid `YYYY-MM-DD` date
/// - The slot cadence is outside `[1, 1440]`
/// - The seller or package does not exist
/// - The repository cannot be read
pub fn list_slots<R: AvailabilityRepository>(
    repo: &mut R,
    query: &SlotQuery,
) -> Result<SlotListing, CoreError> {
    let date: NaiveDate = civil_time::parse_date(&query.date)?;
    let slot_minutes: u32 = match query.slot_minutes {
        Some(minutes) => validate_slot_minutes(minutes)?,
        None => DEFAULT_SLOT_MINUTES,
    };

    let timezone: Tz = seller_timezone(repo, query.seller_id)?;
    let package: Package = seller_package(repo, query.seller_id, query.package_id)?;

    let rules = repo
        .weekly_rules(query.seller_id)
        .map_err(|e| CoreError::from_repository("weekly_rules", e))?;

    let schedule = DaySchedule {
        date,
        timezone,
        slot_minutes,
        duration_minutes: Some(package.duration_minutes),
        rule: rule_for_date(&rules, date),
    };
    let span: UtcInterval = day_span(&schedule)?;

    let unavailability = repo
        .unavailability(query.seller_id, &span)
        .map_err(|e| CoreError::from_repository("unavailability", e))?;
    let appointments = repo
        .appointments(query.seller_id, &span, &[AppointmentStatus::Cancelled])
        .map_err(|e| CoreError::from_repository("appointments", e))?;

    let raw: Vec<RawSlot> = generate_raw_slots(&schedule)?;
    let listing: SlotListing = resolve_slots(raw, &unavailability, &appointments, timezone);

    debug!(
        seller_id = query.seller_id,
        date = %date,
        slot_minutes,
        total = listing.total_slots,
        available = listing.available_slots,
        "Resolved slots"
    );

    Ok(listing)
}
