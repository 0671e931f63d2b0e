// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Raw candidate slot generation for one seller-local day.

use crate::civil_time;
use crate::error::DomainError;
use crate::types::{ClockTime, UtcInterval, WeeklyAvailabilityRule};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

/// Slot granularity used when the caller does not supply one.
pub const DEFAULT_SLOT_MINUTES: u32 = 15;

/// Minutes in a nominal civil day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// A generated candidate before booking and unavailability are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSlot {
    /// Seller-local date the candidate belongs to.
    pub day_date: NaiveDate,
    /// Seller-local start time.
    pub hour: ClockTime,
    /// Start instant.
    pub start_time: DateTime<Utc>,
    /// End instant (start + duration in wall-clock minutes).
    pub end_time: DateTime<Utc>,
    /// Outside the weekly rule window for this weekday.
    pub is_outside_hours: bool,
}

/// Everything needed to generate one day of candidates.
#[derive(Debug, Clone)]
pub struct DaySchedule<'a> {
    /// Seller-local calendar date.
    pub date: NaiveDate,
    /// Seller timezone.
    pub timezone: Tz,
    /// Candidate cadence in minutes, already validated.
    pub slot_minutes: u32,
    /// Package duration; falls back to `slot_minutes` when absent.
    pub duration_minutes: Option<u32>,
    /// Weekly rule for the date's weekday, if any.
    pub rule: Option<&'a WeeklyAvailabilityRule>,
}

impl DaySchedule<'_> {
    /// Length of each slot in minutes.
    #[must_use]
    pub fn effective_duration(&self) -> u32 {
        self.duration_minutes.unwrap_or(self.slot_minutes)
    }
}

/// Validates a requested slot granularity.
///
/// # Errors
///
/// Returns `DomainError::InvalidSlotMinutes` unless `1 <= minutes <= 1440`.
pub fn validate_slot_minutes(minutes: i64) -> Result<u32, DomainError> {
    u32::try_from(minutes)
        .ok()
        .filter(|m| (1..=MINUTES_PER_DAY).contains(m))
        .ok_or(DomainError::InvalidSlotMinutes { minutes })
}

/// Number of candidates on a day with no DST transition: `floor(1440 / slot_minutes)`.
///
/// The trailing partial interval before midnight is not a candidate.
#[must_use]
pub const fn candidate_count(slot_minutes: u32) -> u32 {
    if slot_minutes == 0 {
        return 0;
    }
    MINUTES_PER_DAY / slot_minutes
}

/// Picks the weekly rule whose weekday matches the civil date.
#[must_use]
pub fn rule_for_date(
    rules: &[WeeklyAvailabilityRule],
    date: NaiveDate,
) -> Option<&WeeklyAvailabilityRule> {
    let weekday: u8 = civil_time::weekday_index(date);
    rules.iter().find(|r| r.day_of_week == weekday)
}

fn local_midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// The UTC span covered by the day's candidates: local midnight to the next
/// local midnight plus one slot duration.
///
/// Used to bound repository reads for unavailability and appointments.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` at the edges of the calendar.
pub fn day_span(schedule: &DaySchedule<'_>) -> Result<UtcInterval, DomainError> {
    let midnight: NaiveDateTime = local_midnight(schedule.date);
    let start: DateTime<Utc> = civil_time::local_to_utc(schedule.timezone, midnight);
    let end: DateTime<Utc> = civil_time::add_minutes_utc(
        midnight,
        schedule.timezone,
        i64::from(MINUTES_PER_DAY) + i64::from(schedule.effective_duration()),
    )?;
    UtcInterval::new(start, end)
}

/// Generates the ordered candidate slots for one seller-local day.
///
/// Candidates start at local 00:00 and step by `slot_minutes`. Starts that
/// fall in a spring-forward gap are skipped, so such a day has fewer
/// candidates. A repeated fall-back hour is emitted once, at its earliest
/// instant.
///
/// # Errors
///
/// Returns `DomainError::InvalidSlotMinutes` for a zero cadence, or
/// `DomainError::DateArithmeticOverflow` at the edges of the calendar.
pub fn generate_raw_slots(schedule: &DaySchedule<'_>) -> Result<Vec<RawSlot>, DomainError> {
    if schedule.slot_minutes == 0 || schedule.slot_minutes > MINUTES_PER_DAY {
        return Err(DomainError::InvalidSlotMinutes {
            minutes: i64::from(schedule.slot_minutes),
        });
    }

    let midnight: NaiveDateTime = local_midnight(schedule.date);
    let duration: i64 = i64::from(schedule.effective_duration());
    let count: u32 = candidate_count(schedule.slot_minutes);
    let mut slots: Vec<RawSlot> = Vec::new();

    for index in 0..count {
        let offset_minutes: i64 = i64::from(index) * i64::from(schedule.slot_minutes);
        let local_start: NaiveDateTime = midnight
            .checked_add_signed(Duration::minutes(offset_minutes))
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("stepping {offset_minutes} minutes from {midnight}"),
            })?;

        if !civil_time::local_time_exists(schedule.timezone, local_start) {
            continue;
        }

        let hour: ClockTime = ClockTime::from_naive_time(local_start.time());
        let start_time: DateTime<Utc> = civil_time::local_to_utc(schedule.timezone, local_start);
        let end_time: DateTime<Utc> =
            civil_time::add_minutes_utc(local_start, schedule.timezone, duration)?;

        slots.push(RawSlot {
            day_date: schedule.date,
            hour,
            start_time,
            end_time,
            is_outside_hours: schedule.rule.is_none_or(|rule| !rule.covers(hour)),
        });
    }

    Ok(slots)
}
