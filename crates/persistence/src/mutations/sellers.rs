// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use slotbook_domain::{Package, Seller};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{packages, sellers};
use crate::error::PersistenceError;

/// Inserts a seller and returns its ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_seller(
    conn: &mut SqliteConnection,
    seller: &Seller,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(sellers::table)
        .values((
            sellers::name.eq(&seller.name),
            sellers::timezone.eq(seller.timezone.name()),
        ))
        .execute(conn)?;

    let seller_id: i64 = conn.get_last_insert_rowid()?;
    info!(seller_id, timezone = seller.timezone.name(), "Created seller");
    Ok(seller_id)
}

/// Inserts a package and returns its ID.
///
/// # Errors
///
/// Returns an error if the owning seller does not exist or the insert fails.
pub fn create_package(
    conn: &mut SqliteConnection,
    package: &Package,
) -> Result<i64, PersistenceError> {
    let duration: i32 = package
        .duration_minutes
        .to_i32()
        .ok_or_else(|| PersistenceError::Other("Package duration out of range".to_string()))?;

    diesel::insert_into(packages::table)
        .values((
            packages::seller_id.eq(package.seller_id),
            packages::name.eq(&package.name),
            packages::duration_minutes.eq(duration),
        ))
        .execute(conn)?;

    let package_id: i64 = conn.get_last_insert_rowid()?;
    info!(package_id, seller_id = package.seller_id, "Created package");
    Ok(package_id)
}
