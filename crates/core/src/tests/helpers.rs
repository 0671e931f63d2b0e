// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AvailabilityRepository, RepositoryError};
use chrono_tz::Tz;
use slotbook_domain::{
    Appointment, AppointmentSettingsInput, AppointmentStatus, AvailabilitySubmission, Package,
    SellerAppointmentSettings, UnavailabilityWindow, UtcInterval, ValidatedAvailability,
    WeeklyAvailabilityInput, WeeklyAvailabilityRule, civil_time,
};
use std::collections::HashMap;

pub const SELLER_ID: i64 = 1;
pub const PACKAGE_ID: i64 = 10;

/// In-memory repository with an optional injected failure.
#[derive(Debug, Default)]
pub struct FakeRepository {
    pub sellers: HashMap<i64, Tz>,
    pub packages: HashMap<i64, Package>,
    pub rules: HashMap<i64, Vec<WeeklyAvailabilityRule>>,
    pub settings: HashMap<i64, SellerAppointmentSettings>,
    pub unavailability: Vec<UnavailabilityWindow>,
    pub appointments: Vec<Appointment>,
    pub failure: Option<RepositoryError>,
    pub calls: usize,
}

impl FakeRepository {
    fn enter(&mut self) -> Result<(), RepositoryError> {
        self.calls += 1;
        self.failure.clone().map_or(Ok(()), Err)
    }
}

impl AvailabilityRepository for FakeRepository {
    fn seller_timezone(&mut self, seller_id: i64) -> Result<Option<Tz>, RepositoryError> {
        self.enter()?;
        Ok(self.sellers.get(&seller_id).copied())
    }

    fn package(&mut self, package_id: i64) -> Result<Option<Package>, RepositoryError> {
        self.enter()?;
        Ok(self.packages.get(&package_id).cloned())
    }

    fn weekly_rules(
        &mut self,
        seller_id: i64,
    ) -> Result<Vec<WeeklyAvailabilityRule>, RepositoryError> {
        self.enter()?;
        Ok(self.rules.get(&seller_id).cloned().unwrap_or_default())
    }

    fn unavailability(
        &mut self,
        seller_id: i64,
        span: &UtcInterval,
    ) -> Result<Vec<UnavailabilityWindow>, RepositoryError> {
        self.enter()?;
        Ok(self
            .unavailability
            .iter()
            .filter(|w| w.seller_id == seller_id && w.interval.overlaps(span))
            .cloned()
            .collect())
    }

    fn appointments(
        &mut self,
        seller_id: i64,
        span: &UtcInterval,
        exclude: &[AppointmentStatus],
    ) -> Result<Vec<Appointment>, RepositoryError> {
        self.enter()?;
        Ok(self
            .appointments
            .iter()
            .filter(|a| a.seller_id == seller_id && a.interval.overlaps(span))
            .filter(|a| !exclude.contains(&a.status))
            .cloned()
            .collect())
    }

    fn appointment_settings(
        &mut self,
        seller_id: i64,
    ) -> Result<Option<SellerAppointmentSettings>, RepositoryError> {
        self.enter()?;
        Ok(self.settings.get(&seller_id).cloned())
    }

    fn replace_availability(
        &mut self,
        seller_id: i64,
        availability: &ValidatedAvailability,
    ) -> Result<(), RepositoryError> {
        self.enter()?;
        self.rules.insert(seller_id, availability.rules.clone());
        self.settings
            .insert(seller_id, availability.settings.clone());
        Ok(())
    }

    fn insert_appointment(
        &mut self,
        appointment: &Appointment,
        buffer_minutes: u32,
    ) -> Result<Appointment, RepositoryError> {
        self.enter()?;
        let padded = appointment.interval.widened(buffer_minutes);
        if self.appointments.iter().any(|a| {
            a.seller_id == appointment.seller_id
                && a.status.occupies_slot()
                && a.interval.overlaps(&padded)
        }) {
            return Err(RepositoryError::Conflict(String::from("interval taken")));
        }
        let mut stored = appointment.clone();
        stored.appointment_id = Some(i64::try_from(self.appointments.len()).unwrap() + 1);
        self.appointments.push(stored.clone());
        Ok(stored)
    }

    fn cancel_appointment(
        &mut self,
        appointment_id: i64,
    ) -> Result<Option<Appointment>, RepositoryError> {
        self.enter()?;
        Ok(self
            .appointments
            .iter_mut()
            .find(|a| a.appointment_id == Some(appointment_id))
            .map(|a| {
                a.status = AppointmentStatus::Cancelled;
                a.clone()
            }))
    }
}

pub fn interval(start: &str, end: &str) -> UtcInterval {
    UtcInterval::new(
        civil_time::parse_utc(start).unwrap(),
        civil_time::parse_utc(end).unwrap(),
    )
    .unwrap()
}

/// An Istanbul seller open Monday 09:00-17:00 with a one-hour package.
pub fn istanbul_seller() -> FakeRepository {
    let mut repo = FakeRepository::default();
    repo.sellers.insert(
        SELLER_ID,
        civil_time::parse_timezone("Europe/Istanbul").unwrap(),
    );
    repo.packages.insert(
        PACKAGE_ID,
        Package {
            package_id: Some(PACKAGE_ID),
            seller_id: SELLER_ID,
            name: String::from("Consultation"),
            duration_minutes: 60,
        },
    );
    repo.rules.insert(
        SELLER_ID,
        (0..7)
            .map(|day| WeeklyAvailabilityRule {
                seller_id: SELLER_ID,
                day_of_week: day,
                start_time: civil_time::parse_clock_time("09:00").unwrap(),
                end_time: civil_time::parse_clock_time("17:00").unwrap(),
                is_available: day == 1,
            })
            .collect(),
    );
    repo.settings.insert(
        SELLER_ID,
        SellerAppointmentSettings {
            seller_id: SELLER_ID,
            is_active: true,
            max_daily_appointments: 5,
            duration_between_appointments: 0,
        },
    );
    repo
}

pub fn booked(start: &str, end: &str, status: AppointmentStatus) -> Appointment {
    Appointment {
        appointment_id: Some(500),
        seller_id: SELLER_ID,
        package_id: PACKAGE_ID,
        interval: interval(start, end),
        status,
    }
}

pub fn submission() -> AvailabilitySubmission {
    AvailabilitySubmission {
        availability: (0..7)
            .map(|day| WeeklyAvailabilityInput {
                day_of_week: day,
                start_time: String::from("10:00"),
                end_time: String::from("18:00"),
                is_available: day != 0,
            })
            .collect(),
        settings: AppointmentSettingsInput {
            is_active: true,
            max_daily_appointments: 10,
            duration_between_appointments: 30,
        },
    }
}
