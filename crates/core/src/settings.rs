// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::repository::AvailabilityRepository;
use crate::slots::seller_timezone;
use slotbook_domain::{
    AvailabilitySubmission, DomainError, SellerAppointmentSettings, ValidatedAvailability,
    validate_availability_settings,
};
use tracing::{info, warn};

/// Validates a submission and atomically replaces the seller's weekly rules
/// and appointment settings.
///
/// Nothing is written unless every check passes.
///
/// # Errors
///
/// Returns an error if:
/// - The seller does not exist
/// - The submission fails validation (`DomainError::ValidationFailed`)
/// - The replacement transaction is rolled back
pub fn replace_availability_settings<R: AvailabilityRepository>(
    repo: &mut R,
    seller_id: i64,
    submission: &AvailabilitySubmission,
) -> Result<ValidatedAvailability, CoreError> {
    seller_timezone(repo, seller_id)?;

    let validated: ValidatedAvailability = validate_availability_settings(seller_id, submission)
        .map_err(|violations| {
            warn!(
                seller_id,
                violations = violations.len(),
                "Rejected availability settings"
            );
            DomainError::ValidationFailed(violations)
        })?;

    repo.replace_availability(seller_id, &validated)
        .map_err(|e| CoreError::from_repository("replace_availability", e))?;

    info!(seller_id, "Replaced availability settings");
    Ok(validated)
}

/// Reads back a seller's current weekly rules and settings.
///
/// # Errors
///
/// Returns `DomainError::SellerNotFound` for an unknown seller and
/// `DomainError::AvailabilityNotConfigured` if no settings were ever stored.
pub fn get_availability_settings<R: AvailabilityRepository>(
    repo: &mut R,
    seller_id: i64,
) -> Result<ValidatedAvailability, CoreError> {
    seller_timezone(repo, seller_id)?;

    let settings: SellerAppointmentSettings = repo
        .appointment_settings(seller_id)
        .map_err(|e| CoreError::from_repository("appointment_settings", e))?
        .ok_or(CoreError::DomainViolation(
            DomainError::AvailabilityNotConfigured(seller_id),
        ))?;
    let rules = repo
        .weekly_rules(seller_id)
        .map_err(|e| CoreError::from_repository("weekly_rules", e))?;

    Ok(ValidatedAvailability { rules, settings })
}
