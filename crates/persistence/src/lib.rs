// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` persistence for the slotbook appointment engine.
//!
//! Built on Diesel with embedded migrations. The adapter owns a single
//! connection; callers serialize access (the server wraps it in a mutex).
//!
//! ## Storage conventions
//!
//! - Instants are RFC 3339 UTC text with second precision
//!   (`YYYY-MM-DDTHH:MM:SSZ`), so range filters compare lexicographically.
//! - Weekly rule times are seller-local `HH:MM:SS`.
//! - Flags are `0`/`1` integers.
//!
//! ## Testing
//!
//! [`Persistence::new_in_memory`] hands out an isolated shared-cache
//! in-memory database per call.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use chrono_tz::Tz;
use diesel::SqliteConnection;
use slotbook::{AvailabilityRepository, RepositoryError};
use slotbook_domain::{
    Appointment, AppointmentStatus, Package, Seller, SellerAppointmentSettings,
    UnavailabilityWindow, UtcInterval, ValidatedAvailability, WeeklyAvailabilityRule,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::error;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use backend::sqlite::MIGRATIONS;
pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Type alias kept for call sites that name the backend explicitly.
pub type SqlitePersistence = Persistence;

/// Persistence adapter for sellers, availability, unavailability and appointments.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

/// Maps a persistence failure onto the repository contract of the engine.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> RepositoryError {
    match err {
        PersistenceError::TransactionFailed(msg) => RepositoryError::TransactionAborted(msg),
        PersistenceError::ConstraintViolation(msg) => RepositoryError::Conflict(msg),
        other => {
            error!(error = %other, "Repository operation failed");
            RepositoryError::Unavailable(other.to_string())
        }
    }
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:slotbook_memdb_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Sellers & Packages
    // ========================================================================

    /// Persists a seller and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_seller(&mut self, seller: &Seller) -> Result<i64, PersistenceError> {
        mutations::sellers::create_seller(&mut self.conn, seller)
    }

    /// Retrieves a seller by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_seller(&mut self, seller_id: i64) -> Result<Option<Seller>, PersistenceError> {
        queries::sellers::get_seller(&mut self.conn, seller_id)
    }

    /// Persists a package and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the seller does not exist or the insert fails.
    pub fn create_package(&mut self, package: &Package) -> Result<i64, PersistenceError> {
        mutations::sellers::create_package(&mut self.conn, package)
    }

    /// Retrieves a package by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_package(&mut self, package_id: i64) -> Result<Option<Package>, PersistenceError> {
        queries::sellers::get_package(&mut self.conn, package_id)
    }

    /// Lists a seller's packages.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_packages(&mut self, seller_id: i64) -> Result<Vec<Package>, PersistenceError> {
        queries::sellers::list_packages(&mut self.conn, seller_id)
    }

    // ========================================================================
    // Weekly Availability & Settings
    // ========================================================================

    /// Lists a seller's weekly rules ordered by weekday.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_weekly_rules(
        &mut self,
        seller_id: i64,
    ) -> Result<Vec<WeeklyAvailabilityRule>, PersistenceError> {
        queries::availability::get_weekly_rules(&mut self.conn, seller_id)
    }

    /// Retrieves a seller's appointment settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_appointment_settings(
        &mut self,
        seller_id: i64,
    ) -> Result<Option<SellerAppointmentSettings>, PersistenceError> {
        queries::availability::get_appointment_settings(&mut self.conn, seller_id)
    }

    /// Atomically replaces a seller's weekly rules and settings.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::TransactionFailed` if the transaction rolls back.
    pub fn replace_availability(
        &mut self,
        seller_id: i64,
        availability: &ValidatedAvailability,
    ) -> Result<(), PersistenceError> {
        mutations::availability::replace_availability(&mut self.conn, seller_id, availability)
    }

    // ========================================================================
    // Unavailability
    // ========================================================================

    /// Persists an unavailability window and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the seller does not exist or the insert fails.
    pub fn create_unavailability(
        &mut self,
        window: &UnavailabilityWindow,
    ) -> Result<i64, PersistenceError> {
        mutations::unavailability::create_unavailability(&mut self.conn, window)
    }

    /// Lists unavailability windows intersecting `span`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_unavailability_in_span(
        &mut self,
        seller_id: i64,
        span: &UtcInterval,
    ) -> Result<Vec<UnavailabilityWindow>, PersistenceError> {
        queries::unavailability::get_unavailability_in_span(&mut self.conn, seller_id, span)
    }

    /// Deletes an unavailability window. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_unavailability(
        &mut self,
        unavailability_id: i64,
    ) -> Result<bool, PersistenceError> {
        mutations::unavailability::delete_unavailability(&mut self.conn, unavailability_id)
    }

    // ========================================================================
    // Appointments
    // ========================================================================

    /// Lists appointments intersecting `span`, skipping the given statuses.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_appointments_in_span(
        &mut self,
        seller_id: i64,
        span: &UtcInterval,
        exclude: &[AppointmentStatus],
    ) -> Result<Vec<Appointment>, PersistenceError> {
        queries::appointments::get_appointments_in_span(&mut self.conn, seller_id, span, exclude)
    }

    /// Retrieves an appointment by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_appointment(
        &mut self,
        appointment_id: i64,
    ) -> Result<Option<Appointment>, PersistenceError> {
        queries::appointments::get_appointment(&mut self.conn, appointment_id)
    }

    /// Inserts an appointment after an atomic overlap check.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ConstraintViolation` if the interval is taken.
    pub fn insert_appointment_checked(
        &mut self,
        appointment: &Appointment,
        buffer_minutes: u32,
    ) -> Result<Appointment, PersistenceError> {
        mutations::appointments::insert_appointment_checked(
            &mut self.conn,
            appointment,
            buffer_minutes,
        )
    }

    /// Marks an appointment cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn cancel_appointment(
        &mut self,
        appointment_id: i64,
    ) -> Result<Option<Appointment>, PersistenceError> {
        mutations::appointments::cancel_appointment(&mut self.conn, appointment_id)
    }
}

impl AvailabilityRepository for Persistence {
    fn seller_timezone(&mut self, seller_id: i64) -> Result<Option<Tz>, RepositoryError> {
        self.get_seller(seller_id)
            .map(|seller| seller.map(|s| s.timezone))
            .map_err(translate_persistence_error)
    }

    fn package(&mut self, package_id: i64) -> Result<Option<Package>, RepositoryError> {
        self.get_package(package_id)
            .map_err(translate_persistence_error)
    }

    fn weekly_rules(
        &mut self,
        seller_id: i64,
    ) -> Result<Vec<WeeklyAvailabilityRule>, RepositoryError> {
        self.get_weekly_rules(seller_id)
            .map_err(translate_persistence_error)
    }

    fn unavailability(
        &mut self,
        seller_id: i64,
        span: &UtcInterval,
    ) -> Result<Vec<UnavailabilityWindow>, RepositoryError> {
        self.get_unavailability_in_span(seller_id, span)
            .map_err(translate_persistence_error)
    }

    fn appointments(
        &mut self,
        seller_id: i64,
        span: &UtcInterval,
        exclude: &[AppointmentStatus],
    ) -> Result<Vec<Appointment>, RepositoryError> {
        self.get_appointments_in_span(seller_id, span, exclude)
            .map_err(translate_persistence_error)
    }

    fn appointment_settings(
        &mut self,
        seller_id: i64,
    ) -> Result<Option<SellerAppointmentSettings>, RepositoryError> {
        self.get_appointment_settings(seller_id)
            .map_err(translate_persistence_error)
    }

    fn replace_availability(
        &mut self,
        seller_id: i64,
        availability: &ValidatedAvailability,
    ) -> Result<(), RepositoryError> {
        Self::replace_availability(self, seller_id, availability)
            .map_err(translate_persistence_error)
    }

    fn insert_appointment(
        &mut self,
        appointment: &Appointment,
        buffer_minutes: u32,
    ) -> Result<Appointment, RepositoryError> {
        self.insert_appointment_checked(appointment, buffer_minutes)
            .map_err(translate_persistence_error)
    }

    fn cancel_appointment(
        &mut self,
        appointment_id: i64,
    ) -> Result<Option<Appointment>, RepositoryError> {
        Self::cancel_appointment(self, appointment_id).map_err(translate_persistence_error)
    }
}
