// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Appointment, AppointmentSettingsInput, AppointmentStatus, AvailabilitySubmission, ClockTime,
    SellerAppointmentSettings, UnavailabilityWindow, UtcInterval, WeeklyAvailabilityInput,
    WeeklyAvailabilityRule, civil_time,
};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

pub const SELLER_ID: i64 = 1;
pub const PACKAGE_ID: i64 = 10;

pub fn istanbul() -> Tz {
    civil_time::parse_timezone("Europe/Istanbul").unwrap()
}

pub fn new_york() -> Tz {
    civil_time::parse_timezone("America/New_York").unwrap()
}

pub fn date(s: &str) -> NaiveDate {
    civil_time::parse_date(s).unwrap()
}

pub fn utc(s: &str) -> DateTime<Utc> {
    civil_time::parse_utc(s).unwrap()
}

pub fn clock(s: &str) -> ClockTime {
    civil_time::parse_clock_time(s).unwrap()
}

pub fn interval(start: &str, end: &str) -> UtcInterval {
    UtcInterval::new(utc(start), utc(end)).unwrap()
}

pub fn rule(day_of_week: u8, start: &str, end: &str, is_available: bool) -> WeeklyAvailabilityRule {
    WeeklyAvailabilityRule {
        seller_id: SELLER_ID,
        day_of_week,
        start_time: clock(start),
        end_time: clock(end),
        is_available,
    }
}

/// Monday 09:00-17:00, every other day closed.
pub fn monday_only_rules() -> Vec<WeeklyAvailabilityRule> {
    (0..7)
        .map(|day| {
            if day == 1 {
                rule(day, "09:00", "17:00", true)
            } else {
                rule(day, "00:00", "00:00", false)
            }
        })
        .collect()
}

pub fn appointment(start: &str, end: &str, status: AppointmentStatus) -> Appointment {
    Appointment {
        appointment_id: Some(100),
        seller_id: SELLER_ID,
        package_id: PACKAGE_ID,
        interval: interval(start, end),
        status,
    }
}

pub fn unavailability(start: &str, end: &str) -> UnavailabilityWindow {
    UnavailabilityWindow::new(SELLER_ID, utc(start), utc(end), Some(String::from("Holiday")))
        .unwrap()
}

pub fn settings(max_daily: u32, buffer: u32) -> SellerAppointmentSettings {
    SellerAppointmentSettings {
        seller_id: SELLER_ID,
        is_active: true,
        max_daily_appointments: max_daily,
        duration_between_appointments: buffer,
    }
}

pub fn weekday_input(
    day: i64,
    start: &str,
    end: &str,
    is_available: bool,
) -> WeeklyAvailabilityInput {
    WeeklyAvailabilityInput {
        day_of_week: day,
        start_time: start.to_string(),
        end_time: end.to_string(),
        is_available,
    }
}

/// A valid week: weekdays 09:00-17:00, weekend closed.
pub fn valid_submission() -> AvailabilitySubmission {
    AvailabilitySubmission {
        availability: (0..7)
            .map(|day| {
                let open: bool = (1..=5).contains(&day);
                weekday_input(day, "09:00", "17:00", open)
            })
            .collect(),
        settings: AppointmentSettingsInput {
            is_active: true,
            max_daily_appointments: 8,
            duration_between_appointments: 15,
        },
    }
}
