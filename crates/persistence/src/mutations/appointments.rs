// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use slotbook_domain::{Appointment, AppointmentStatus, UtcInterval, civil_time};
use tracing::{info, warn};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::appointments;
use crate::error::PersistenceError;
use crate::queries::appointments::{get_appointment, get_appointments_in_span};

/// Inserts an appointment if no non-cancelled appointment of the same seller
/// intersects its interval widened by `buffer_minutes`.
///
/// The check and the insert share an immediate (write-locking) transaction.
///
/// # Errors
///
/// Returns `PersistenceError::ConstraintViolation` if the interval is taken,
/// either by the overlap check or by the active-slot unique index.
pub fn insert_appointment_checked(
    conn: &mut SqliteConnection,
    appointment: &Appointment,
    buffer_minutes: u32,
) -> Result<Appointment, PersistenceError> {
    let padded: UtcInterval = appointment.interval.widened(buffer_minutes);

    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let clashes: Vec<Appointment> = get_appointments_in_span(
            conn,
            appointment.seller_id,
            &padded,
            &[AppointmentStatus::Cancelled],
        )?;
        if let Some(existing) = clashes.first() {
            warn!(
                seller_id = appointment.seller_id,
                existing = ?existing.appointment_id,
                "Rejected overlapping appointment"
            );
            return Err(PersistenceError::ConstraintViolation(format!(
                "overlaps appointment {:?}",
                existing.appointment_id
            )));
        }

        diesel::insert_into(appointments::table)
            .values((
                appointments::seller_id.eq(appointment.seller_id),
                appointments::package_id.eq(appointment.package_id),
                appointments::start_time.eq(civil_time::format_utc(appointment.interval.start())),
                appointments::end_time.eq(civil_time::format_utc(appointment.interval.end())),
                appointments::status.eq(appointment.status.as_str()),
            ))
            .execute(conn)?;

        let appointment_id: i64 = conn.get_last_insert_rowid()?;
        info!(appointment_id, seller_id = appointment.seller_id, "Inserted appointment");

        Ok(Appointment {
            appointment_id: Some(appointment_id),
            ..appointment.clone()
        })
    })
}

/// Marks an appointment cancelled. `Ok(None)` if it does not exist.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn cancel_appointment(
    conn: &mut SqliteConnection,
    appointment_id: i64,
) -> Result<Option<Appointment>, PersistenceError> {
    let updated: usize = diesel::update(
        appointments::table.filter(appointments::appointment_id.eq(appointment_id)),
    )
    .set(appointments::status.eq(AppointmentStatus::Cancelled.as_str()))
    .execute(conn)?;

    if updated == 0 {
        return Ok(None);
    }
    get_appointment(conn, appointment_id)
}
