// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use slotbook_domain::{Appointment, AppointmentStatus, UtcInterval, civil_time};

use crate::data_models::{AppointmentRow, rows_into_domain};
use crate::diesel_schema::appointments;
use crate::error::PersistenceError;

/// Lists appointments intersecting `span`, skipping statuses in `exclude`.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn get_appointments_in_span(
    conn: &mut SqliteConnection,
    seller_id: i64,
    span: &UtcInterval,
    exclude: &[AppointmentStatus],
) -> Result<Vec<Appointment>, PersistenceError> {
    let span_start: String = civil_time::format_utc(span.start());
    let span_end: String = civil_time::format_utc(span.end());
    let excluded: Vec<&str> = exclude.iter().map(AppointmentStatus::as_str).collect();

    let rows: Vec<AppointmentRow> = appointments::table
        .filter(appointments::seller_id.eq(seller_id))
        .filter(appointments::start_time.lt(&span_end))
        .filter(appointments::end_time.gt(&span_start))
        .filter(appointments::status.ne_all(excluded))
        .order((
            appointments::start_time.asc(),
            appointments::appointment_id.asc(),
        ))
        .select(AppointmentRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("get_appointments_in_span: {e}")))?;
    rows_into_domain(rows, AppointmentRow::into_domain)
}

/// Retrieves an appointment by ID. `Ok(None)` if it does not exist.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn get_appointment(
    conn: &mut SqliteConnection,
    appointment_id: i64,
) -> Result<Option<Appointment>, PersistenceError> {
    appointments::table
        .filter(appointments::appointment_id.eq(appointment_id))
        .select(AppointmentRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_appointment: {e}")))?
        .map(AppointmentRow::into_domain)
        .transpose()
}
