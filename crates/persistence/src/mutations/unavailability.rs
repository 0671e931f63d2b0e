// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use slotbook_domain::{UnavailabilityWindow, civil_time};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::unavailability_windows;
use crate::error::PersistenceError;

/// Inserts an unavailability window and returns its ID.
///
/// # Errors
///
/// Returns an error if the seller does not exist or the insert fails.
pub fn create_unavailability(
    conn: &mut SqliteConnection,
    window: &UnavailabilityWindow,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(unavailability_windows::table)
        .values((
            unavailability_windows::seller_id.eq(window.seller_id),
            unavailability_windows::start_time.eq(civil_time::format_utc(window.interval.start())),
            unavailability_windows::end_time.eq(civil_time::format_utc(window.interval.end())),
            unavailability_windows::reason.eq(window.reason.as_deref()),
        ))
        .execute(conn)?;

    let unavailability_id: i64 = conn.get_last_insert_rowid()?;
    info!(
        unavailability_id,
        seller_id = window.seller_id,
        "Created unavailability window"
    );
    Ok(unavailability_id)
}

/// Deletes an unavailability window. Returns `false` if it did not exist.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_unavailability(
    conn: &mut SqliteConnection,
    unavailability_id: i64,
) -> Result<bool, PersistenceError> {
    let deleted: usize = diesel::delete(
        unavailability_windows::table
            .filter(unavailability_windows::unavailability_id.eq(unavailability_id)),
    )
    .execute(conn)?;
    Ok(deleted > 0)
}
