// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod availability_settings;
mod booking;
pub mod civil_time;
mod error;
mod slot_generation;
mod slot_resolution;
mod types;

#[cfg(test)]
mod tests;

pub use availability_settings::{
    AppointmentSettingsInput, AvailabilitySubmission, DAYS_PER_WEEK,
    DURATION_BETWEEN_APPOINTMENTS_RANGE, MAX_DAILY_APPOINTMENTS_RANGE, SettingsViolation,
    ValidatedAvailability, ViolationKind, WeeklyAvailabilityInput, validate_availability_settings,
};
pub use booking::{BookingContext, local_day_span, validate_booking};
pub use error::DomainError;
pub use slot_generation::{
    DEFAULT_SLOT_MINUTES, DaySchedule, MINUTES_PER_DAY, RawSlot, candidate_count, day_span,
    generate_raw_slots, rule_for_date, validate_slot_minutes,
};
pub use slot_resolution::{SlotListing, resolve_slots};
pub use types::{
    Appointment, AppointmentStatus, ClockTime, Package, SellerAppointmentSettings, Seller, Slot,
    UnavailabilityWindow, UtcInterval, WeeklyAvailabilityRule,
};
