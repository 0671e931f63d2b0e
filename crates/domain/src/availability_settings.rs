// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Validation of a seller's weekly availability and appointment settings.
//!
//! A submission is either accepted whole, producing a [`ValidatedAvailability`]
//! ready for atomic replacement, or rejected with every violation found.
//! Validation never stops at the first problem.

use crate::civil_time;
use crate::types::{ClockTime, SellerAppointmentSettings, WeeklyAvailabilityRule};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Number of entries a submission must carry, one per weekday.
pub const DAYS_PER_WEEK: usize = 7;

/// Accepted range for `maxDailyAppointments`.
pub const MAX_DAILY_APPOINTMENTS_RANGE: RangeInclusive<i64> = 1..=50;

/// Accepted range for `durationBetweenAppointments`, in minutes.
pub const DURATION_BETWEEN_APPOINTMENTS_RANGE: RangeInclusive<i64> = 0..=120;

/// One unvalidated weekday entry as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyAvailabilityInput {
    /// 0 = Sunday … 6 = Saturday.
    pub day_of_week: i64,
    /// `HH:MM` or `HH:MM:SS`.
    pub start_time: String,
    /// `HH:MM`, `HH:MM:SS` or `24:00`.
    pub end_time: String,
    /// Whether the seller works on this weekday.
    pub is_available: bool,
}

/// Unvalidated appointment settings as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentSettingsInput {
    /// Whether the seller accepts bookings.
    pub is_active: bool,
    /// Daily cap.
    pub max_daily_appointments: i64,
    /// Buffer between appointments in minutes.
    pub duration_between_appointments: i64,
}

/// A full settings submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilitySubmission {
    /// Exactly seven weekday entries.
    pub availability: Vec<WeeklyAvailabilityInput>,
    /// Appointment settings.
    pub settings: AppointmentSettingsInput,
}

/// A submission that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedAvailability {
    /// Seven rules sorted by weekday.
    pub rules: Vec<WeeklyAvailabilityRule>,
    /// Normalized settings.
    pub settings: SellerAppointmentSettings,
}

/// The constraint a violation breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// The availability array does not have seven entries.
    EntryCount,
    /// `dayOfWeek` is outside `[0, 6]`.
    DayOfWeekOutOfRange,
    /// The same weekday appears more than once.
    DuplicateDayOfWeek,
    /// A weekday has no entry.
    MissingDayOfWeek,
    /// A time string does not parse.
    InvalidTime,
    /// An available day whose start is not before its end.
    StartNotBeforeEnd,
    /// A numeric setting is outside its accepted range.
    OutOfRange,
}

impl ViolationKind {
    /// Stable identifier used on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EntryCount => "entry_count",
            Self::DayOfWeekOutOfRange => "day_of_week_out_of_range",
            Self::DuplicateDayOfWeek => "duplicate_day_of_week",
            Self::MissingDayOfWeek => "missing_day_of_week",
            Self::InvalidTime => "invalid_time",
            Self::StartNotBeforeEnd => "start_not_before_end",
            Self::OutOfRange => "out_of_range",
        }
    }
}

/// A single failed check, addressed by field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsViolation {
    /// Field path, e.g. `availability[3].startTime`.
    pub field: String,
    /// Constraint broken.
    pub kind: ViolationKind,
    /// Human-readable description.
    pub message: String,
}

impl SettingsViolation {
    fn new(field: impl Into<String>, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }
}

fn entry_field(index: usize, name: &str) -> String {
    format!("availability[{index}].{name}")
}

fn parse_entry_time(
    index: usize,
    name: &str,
    value: &str,
    violations: &mut Vec<SettingsViolation>,
) -> Option<ClockTime> {
    match civil_time::parse_clock_time(value) {
        Ok(time) => Some(time),
        Err(e) => {
            violations.push(SettingsViolation::new(
                entry_field(index, name),
                ViolationKind::InvalidTime,
                e.to_string(),
            ));
            None
        }
    }
}

fn check_range(
    field: &str,
    value: i64,
    range: &RangeInclusive<i64>,
    violations: &mut Vec<SettingsViolation>,
) -> Option<u32> {
    if !range.contains(&value) {
        violations.push(SettingsViolation::new(
            field,
            ViolationKind::OutOfRange,
            format!(
                "must be between {} and {}, got {value}",
                range.start(),
                range.end()
            ),
        ));
        return None;
    }
    u32::try_from(value).ok()
}

/// Validates a submission for `seller_id`.
///
/// # Errors
///
/// Returns every [`SettingsViolation`] found if any check fails.
pub fn validate_availability_settings(
    seller_id: i64,
    submission: &AvailabilitySubmission,
) -> Result<ValidatedAvailability, Vec<SettingsViolation>> {
    let mut violations: Vec<SettingsViolation> = Vec::new();

    if submission.availability.len() != DAYS_PER_WEEK {
        violations.push(SettingsViolation::new(
            "availability",
            ViolationKind::EntryCount,
            format!(
                "expected {DAYS_PER_WEEK} entries, got {}",
                submission.availability.len()
            ),
        ));
    }

    let mut seen: [bool; DAYS_PER_WEEK] = [false; DAYS_PER_WEEK];
    let mut rules: Vec<WeeklyAvailabilityRule> = Vec::new();

    for (index, entry) in submission.availability.iter().enumerate() {
        let day: Option<u8> = u8::try_from(entry.day_of_week)
            .ok()
            .filter(|d| usize::from(*d) < DAYS_PER_WEEK);

        let day: Option<u8> = match day {
            None => {
                violations.push(SettingsViolation::new(
                    entry_field(index, "dayOfWeek"),
                    ViolationKind::DayOfWeekOutOfRange,
                    format!("must be between 0 and 6, got {}", entry.day_of_week),
                ));
                None
            }
            Some(d) if seen[usize::from(d)] => {
                violations.push(SettingsViolation::new(
                    entry_field(index, "dayOfWeek"),
                    ViolationKind::DuplicateDayOfWeek,
                    format!("dayOfWeek {d} appears more than once"),
                ));
                None
            }
            Some(d) => {
                seen[usize::from(d)] = true;
                Some(d)
            }
        };

        let start: Option<ClockTime> =
            parse_entry_time(index, "startTime", &entry.start_time, &mut violations);
        let end: Option<ClockTime> =
            parse_entry_time(index, "endTime", &entry.end_time, &mut violations);

        if let (Some(start), Some(end)) = (start, end) {
            if entry.is_available && start >= end {
                violations.push(SettingsViolation::new(
                    entry_field(index, "startTime"),
                    ViolationKind::StartNotBeforeEnd,
                    format!("start {start} must be before end {end}"),
                ));
            } else if let Some(day_of_week) = day {
                rules.push(WeeklyAvailabilityRule {
                    seller_id,
                    day_of_week,
                    start_time: start,
                    end_time: end,
                    is_available: entry.is_available,
                });
            }
        }
    }

    for (day, present) in seen.iter().enumerate() {
        if !present {
            violations.push(SettingsViolation::new(
                "availability",
                ViolationKind::MissingDayOfWeek,
                format!("no entry for dayOfWeek {day}"),
            ));
        }
    }

    let settings: &AppointmentSettingsInput = &submission.settings;
    let max_daily: Option<u32> = check_range(
        "settings.maxDailyAppointments",
        settings.max_daily_appointments,
        &MAX_DAILY_APPOINTMENTS_RANGE,
        &mut violations,
    );
    let buffer: Option<u32> = check_range(
        "settings.durationBetweenAppointments",
        settings.duration_between_appointments,
        &DURATION_BETWEEN_APPOINTMENTS_RANGE,
        &mut violations,
    );

    match (max_daily, buffer) {
        (Some(max_daily_appointments), Some(duration_between_appointments))
            if violations.is_empty() =>
        {
            rules.sort_by_key(|r| r.day_of_week);
            Ok(ValidatedAvailability {
                rules,
                settings: SellerAppointmentSettings {
                    seller_id,
                    is_active: settings.is_active,
                    max_daily_appointments,
                    duration_between_appointments,
                },
            })
        }
        _ => Err(violations),
    }
}
