// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use slotbook_domain::{SellerAppointmentSettings, WeeklyAvailabilityRule};

use crate::data_models::{AppointmentSettingsRow, WeeklyAvailabilityRow, rows_into_domain};
use crate::diesel_schema::{appointment_settings, weekly_availability};
use crate::error::PersistenceError;

/// Lists a seller's weekly rules ordered by weekday.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn get_weekly_rules(
    conn: &mut SqliteConnection,
    seller_id: i64,
) -> Result<Vec<WeeklyAvailabilityRule>, PersistenceError> {
    let rows: Vec<WeeklyAvailabilityRow> = weekly_availability::table
        .filter(weekly_availability::seller_id.eq(seller_id))
        .order(weekly_availability::day_of_week.asc())
        .select(WeeklyAvailabilityRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("get_weekly_rules: {e}")))?;
    rows_into_domain(rows, WeeklyAvailabilityRow::into_domain)
}

/// Retrieves a seller's appointment settings. `Ok(None)` if never stored.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn get_appointment_settings(
    conn: &mut SqliteConnection,
    seller_id: i64,
) -> Result<Option<SellerAppointmentSettings>, PersistenceError> {
    appointment_settings::table
        .filter(appointment_settings::seller_id.eq(seller_id))
        .select(AppointmentSettingsRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_appointment_settings: {e}")))?
        .map(AppointmentSettingsRow::into_domain)
        .transpose()
}
