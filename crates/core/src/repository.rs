// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::RepositoryError;
use chrono_tz::Tz;
use slotbook_domain::{
    Appointment, AppointmentStatus, Package, SellerAppointmentSettings, UnavailabilityWindow,
    UtcInterval, ValidatedAvailability, WeeklyAvailabilityRule,
};

/// Storage collaborator for the slot engine and the booking guard.
///
/// Lookups return `Ok(None)` for missing rows; `Err` is reserved for
/// storage failures so that a broken store is never mistaken for an
/// empty calendar.
pub trait AvailabilityRepository {
    /// Timezone of a seller, `None` if the seller does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn seller_timezone(&mut self, seller_id: i64) -> Result<Option<Tz>, RepositoryError>;

    /// A package by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn package(&mut self, package_id: i64) -> Result<Option<Package>, RepositoryError>;

    /// All weekly rules of a seller, ordered by weekday.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn weekly_rules(
        &mut self,
        seller_id: i64,
    ) -> Result<Vec<WeeklyAvailabilityRule>, RepositoryError>;

    /// Unavailability windows intersecting `span`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn unavailability(
        &mut self,
        seller_id: i64,
        span: &UtcInterval,
    ) -> Result<Vec<UnavailabilityWindow>, RepositoryError>;

    /// Appointments intersecting `span`, minus those whose status is in `exclude`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn appointments(
        &mut self,
        seller_id: i64,
        span: &UtcInterval,
        exclude: &[AppointmentStatus],
    ) -> Result<Vec<Appointment>, RepositoryError>;

    /// Appointment settings of a seller, `None` if never submitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn appointment_settings(
        &mut self,
        seller_id: i64,
    ) -> Result<Option<SellerAppointmentSettings>, RepositoryError>;

    /// Replaces every weekly rule and the settings row in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::TransactionAborted` if any write fails; no
    /// partial state is left behind.
    fn replace_availability(
        &mut self,
        seller_id: i64,
        availability: &ValidatedAvailability,
    ) -> Result<(), RepositoryError>;

    /// Inserts an appointment unless a non-cancelled one intersects its
    /// interval widened by `buffer_minutes`. Check and insert are atomic.
    ///
    /// Returns the stored appointment with its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the interval is taken.
    fn insert_appointment(
        &mut self,
        appointment: &Appointment,
        buffer_minutes: u32,
    ) -> Result<Appointment, RepositoryError>;

    /// Marks an appointment cancelled. `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn cancel_appointment(
        &mut self,
        appointment_id: i64,
    ) -> Result<Option<Appointment>, RepositoryError>;
}
