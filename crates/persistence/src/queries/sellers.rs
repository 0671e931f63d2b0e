// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Seller and package lookups.

use diesel::SqliteConnection;
use diesel::prelude::*;
use slotbook_domain::{Package, Seller};
use tracing::debug;

use crate::data_models::{PackageRow, SellerRow, rows_into_domain};
use crate::diesel_schema::{packages, sellers};
use crate::error::PersistenceError;

/// Retrieves a seller by ID. `Ok(None)` if it does not exist.
///
/// # Errors
///
/// Returns an error if the query fails or the stored timezone is invalid.
pub fn get_seller(
    conn: &mut SqliteConnection,
    seller_id: i64,
) -> Result<Option<Seller>, PersistenceError> {
    debug!(seller_id, "Looking up seller");

    sellers::table
        .filter(sellers::seller_id.eq(seller_id))
        .select(SellerRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_seller: {e}")))?
        .map(SellerRow::into_domain)
        .transpose()
}

/// Retrieves a package by ID. `Ok(None)` if it does not exist.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_package(
    conn: &mut SqliteConnection,
    package_id: i64,
) -> Result<Option<Package>, PersistenceError> {
    packages::table
        .filter(packages::package_id.eq(package_id))
        .select(PackageRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_package: {e}")))?
        .map(PackageRow::into_domain)
        .transpose()
}

/// Lists a seller's packages ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_packages(
    conn: &mut SqliteConnection,
    seller_id: i64,
) -> Result<Vec<Package>, PersistenceError> {
    let rows: Vec<PackageRow> = packages::table
        .filter(packages::seller_id.eq(seller_id))
        .order(packages::package_id.asc())
        .select(PackageRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_packages: {e}")))?;
    rows_into_domain(rows, PackageRow::into_domain)
}
