// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Text;
use num_traits::ToPrimitive;
use slotbook_domain::{SellerAppointmentSettings, ValidatedAvailability, WeeklyAvailabilityRule};
use tracing::{debug, warn};

use crate::diesel_schema::{appointment_settings, weekly_availability};
use crate::error::PersistenceError;

fn setting_to_i32(value: u32, field: &str) -> Result<i32, PersistenceError> {
    value
        .to_i32()
        .ok_or_else(|| PersistenceError::Other(format!("{field} out of range: {value}")))
}

fn insert_rule(
    conn: &mut SqliteConnection,
    rule: &WeeklyAvailabilityRule,
) -> Result<(), PersistenceError> {
    diesel::insert_into(weekly_availability::table)
        .values((
            weekly_availability::seller_id.eq(rule.seller_id),
            weekly_availability::day_of_week.eq(i32::from(rule.day_of_week)),
            weekly_availability::start_time.eq(rule.start_time.to_string()),
            weekly_availability::end_time.eq(rule.end_time.to_string()),
            weekly_availability::is_available.eq(i32::from(rule.is_available)),
        ))
        .execute(conn)?;
    Ok(())
}

fn upsert_settings(
    conn: &mut SqliteConnection,
    settings: &SellerAppointmentSettings,
) -> Result<(), PersistenceError> {
    let is_active: i32 = i32::from(settings.is_active);
    let max_daily: i32 =
        setting_to_i32(settings.max_daily_appointments, "max_daily_appointments")?;
    let buffer: i32 = setting_to_i32(
        settings.duration_between_appointments,
        "duration_between_appointments",
    )?;

    diesel::insert_into(appointment_settings::table)
        .values((
            appointment_settings::seller_id.eq(settings.seller_id),
            appointment_settings::is_active.eq(is_active),
            appointment_settings::max_daily_appointments.eq(max_daily),
            appointment_settings::duration_between_appointments.eq(buffer),
        ))
        .on_conflict(appointment_settings::seller_id)
        .do_update()
        .set((
            appointment_settings::is_active.eq(is_active),
            appointment_settings::max_daily_appointments.eq(max_daily),
            appointment_settings::duration_between_appointments.eq(buffer),
            appointment_settings::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;
    Ok(())
}

/// Replaces all weekly rules and the settings row of a seller in one transaction.
///
/// # Errors
///
/// Returns `PersistenceError::TransactionFailed` if any statement fails; the
/// previous rules and settings are left untouched.
pub fn replace_availability(
    conn: &mut SqliteConnection,
    seller_id: i64,
    availability: &ValidatedAvailability,
) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let removed: usize = diesel::delete(
            weekly_availability::table.filter(weekly_availability::seller_id.eq(seller_id)),
        )
        .execute(conn)?;
        debug!(seller_id, removed, "Cleared weekly availability");

        for rule in &availability.rules {
            insert_rule(conn, rule)?;
        }
        upsert_settings(conn, &availability.settings)?;
        Ok(())
    })
    .map_err(|e| {
        warn!(seller_id, error = %e, "Availability replacement rolled back");
        PersistenceError::TransactionFailed(format!("replace_availability: {e}"))
    })
}
