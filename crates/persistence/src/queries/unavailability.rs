// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use slotbook_domain::{UnavailabilityWindow, UtcInterval, civil_time};

use crate::data_models::{UnavailabilityRow, rows_into_domain};
use crate::diesel_schema::unavailability_windows;
use crate::error::PersistenceError;

/// Lists unavailability windows intersecting `span`, ordered by start.
///
/// Intersection is half-open: `start < span.end AND end > span.start`.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn get_unavailability_in_span(
    conn: &mut SqliteConnection,
    seller_id: i64,
    span: &UtcInterval,
) -> Result<Vec<UnavailabilityWindow>, PersistenceError> {
    let span_start: String = civil_time::format_utc(span.start());
    let span_end: String = civil_time::format_utc(span.end());

    let rows: Vec<UnavailabilityRow> = unavailability_windows::table
        .filter(unavailability_windows::seller_id.eq(seller_id))
        .filter(unavailability_windows::start_time.lt(&span_end))
        .filter(unavailability_windows::end_time.gt(&span_start))
        .order((
            unavailability_windows::start_time.asc(),
            unavailability_windows::unavailability_id.asc(),
        ))
        .select(UnavailabilityRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("get_unavailability_in_span: {e}")))?;
    rows_into_domain(rows, UnavailabilityRow::into_domain)
}
