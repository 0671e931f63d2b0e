// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and their conversion into domain values.
//!
//! Clock times are stored as `HH:MM:SS`, instants as RFC 3339 UTC text and
//! flags as `0`/`1` integers.

use diesel::prelude::*;
use num_traits::ToPrimitive;
use slotbook_domain::{
    Appointment, AppointmentStatus, ClockTime, Package, Seller, SellerAppointmentSettings,
    UnavailabilityWindow, UtcInterval, WeeklyAvailabilityRule, civil_time,
};
use std::str::FromStr;

use crate::diesel_schema::{
    appointment_settings, appointments, packages, sellers, unavailability_windows,
    weekly_availability,
};
use crate::error::PersistenceError;

fn corrupt(table: &str, id: i64, detail: impl std::fmt::Display) -> PersistenceError {
    PersistenceError::CorruptRow(format!("{table} row {id}: {detail}"))
}

fn stored_interval(
    table: &str,
    id: i64,
    start: &str,
    end: &str,
) -> Result<UtcInterval, PersistenceError> {
    let start = civil_time::parse_utc(start).map_err(|e| corrupt(table, id, e))?;
    let end = civil_time::parse_utc(end).map_err(|e| corrupt(table, id, e))?;
    UtcInterval::new(start, end).map_err(|e| corrupt(table, id, e))
}

fn stored_clock(table: &str, id: i64, value: &str) -> Result<ClockTime, PersistenceError> {
    ClockTime::from_str(value).map_err(|e| corrupt(table, id, e))
}

fn stored_u32(table: &str, id: i64, value: i32) -> Result<u32, PersistenceError> {
    value
        .to_u32()
        .ok_or_else(|| corrupt(table, id, format!("negative value {value}")))
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = sellers)]
pub struct SellerRow {
    pub seller_id: i64,
    pub name: String,
    pub timezone: String,
}

impl SellerRow {
    pub fn into_domain(self) -> Result<Seller, PersistenceError> {
        let timezone = civil_time::parse_timezone(&self.timezone)
            .map_err(|e| corrupt("sellers", self.seller_id, e))?;
        Ok(Seller {
            seller_id: Some(self.seller_id),
            name: self.name,
            timezone,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = packages)]
pub struct PackageRow {
    pub package_id: i64,
    pub seller_id: i64,
    pub name: String,
    pub duration_minutes: i32,
}

impl PackageRow {
    pub fn into_domain(self) -> Result<Package, PersistenceError> {
        Ok(Package {
            package_id: Some(self.package_id),
            seller_id: self.seller_id,
            name: self.name,
            duration_minutes: stored_u32("packages", self.package_id, self.duration_minutes)?,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = weekly_availability)]
pub struct WeeklyAvailabilityRow {
    pub weekly_availability_id: i64,
    pub seller_id: i64,
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub is_available: i32,
}

impl WeeklyAvailabilityRow {
    pub fn into_domain(self) -> Result<WeeklyAvailabilityRule, PersistenceError> {
        let id: i64 = self.weekly_availability_id;
        Ok(WeeklyAvailabilityRule {
            seller_id: self.seller_id,
            day_of_week: self
                .day_of_week
                .to_u8()
                .ok_or_else(|| corrupt("weekly_availability", id, "day_of_week out of range"))?,
            start_time: stored_clock("weekly_availability", id, &self.start_time)?,
            end_time: stored_clock("weekly_availability", id, &self.end_time)?,
            is_available: self.is_available != 0,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = appointment_settings)]
pub struct AppointmentSettingsRow {
    pub seller_id: i64,
    pub is_active: i32,
    pub max_daily_appointments: i32,
    pub duration_between_appointments: i32,
}

impl AppointmentSettingsRow {
    pub fn into_domain(self) -> Result<SellerAppointmentSettings, PersistenceError> {
        let id: i64 = self.seller_id;
        Ok(SellerAppointmentSettings {
            seller_id: id,
            is_active: self.is_active != 0,
            max_daily_appointments: stored_u32(
                "appointment_settings",
                id,
                self.max_daily_appointments,
            )?,
            duration_between_appointments: stored_u32(
                "appointment_settings",
                id,
                self.duration_between_appointments,
            )?,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = unavailability_windows)]
pub struct UnavailabilityRow {
    pub unavailability_id: i64,
    pub seller_id: i64,
    pub start_time: String,
    pub end_time: String,
    pub reason: Option<String>,
}

impl UnavailabilityRow {
    pub fn into_domain(self) -> Result<UnavailabilityWindow, PersistenceError> {
        Ok(UnavailabilityWindow {
            unavailability_id: Some(self.unavailability_id),
            seller_id: self.seller_id,
            interval: stored_interval(
                "unavailability_windows",
                self.unavailability_id,
                &self.start_time,
                &self.end_time,
            )?,
            reason: self.reason,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = appointments)]
pub struct AppointmentRow {
    pub appointment_id: i64,
    pub seller_id: i64,
    pub package_id: i64,
    pub start_time: String,
    pub end_time: String,
    pub status: String,
}

impl AppointmentRow {
    pub fn into_domain(self) -> Result<Appointment, PersistenceError> {
        let id: i64 = self.appointment_id;
        Ok(Appointment {
            appointment_id: Some(id),
            seller_id: self.seller_id,
            package_id: self.package_id,
            interval: stored_interval("appointments", id, &self.start_time, &self.end_time)?,
            status: AppointmentStatus::from_str(&self.status)
                .map_err(|e| corrupt("appointments", id, e))?,
        })
    }
}

/// Converts a collection of rows, failing on the first corrupt one.
pub fn rows_into_domain<R, T>(
    rows: Vec<R>,
    convert: impl Fn(R) -> Result<T, PersistenceError>,
) -> Result<Vec<T>, PersistenceError> {
    rows.into_iter().map(convert).collect()
}
