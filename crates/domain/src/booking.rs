// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-time checks for a new appointment.

use crate::civil_time;
use crate::error::DomainError;
use crate::slot_generation::rule_for_date;
use crate::types::{
    Appointment, ClockTime, SellerAppointmentSettings, UnavailabilityWindow, UtcInterval,
    WeeklyAvailabilityRule,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

/// The seller state a booking is checked against.
#[derive(Debug, Clone, Copy)]
pub struct BookingContext<'a> {
    /// Seller timezone.
    pub timezone: Tz,
    /// Current appointment settings.
    pub settings: &'a SellerAppointmentSettings,
    /// Weekly rules.
    pub rules: &'a [WeeklyAvailabilityRule],
    /// Unavailability windows near the candidate.
    pub unavailability: &'a [UnavailabilityWindow],
    /// Appointments on the candidate's local day, widened by the buffer.
    pub appointments: &'a [Appointment],
}

/// The UTC interval of the seller-local calendar day containing `instant`.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` at the edges of the calendar.
pub fn local_day_span(instant: DateTime<Utc>, tz: Tz) -> Result<UtcInterval, DomainError> {
    let date: NaiveDate = civil_time::to_local(instant, tz).date();
    let midnight: NaiveDateTime = date.and_time(NaiveTime::MIN);
    let start: DateTime<Utc> = civil_time::local_to_utc(tz, midnight);
    let end: DateTime<Utc> = civil_time::add_minutes_utc(midnight, tz, 24 * 60)?;
    UtcInterval::new(start, end)
}

fn fits_working_hours(candidate: &UtcInterval, ctx: &BookingContext<'_>) -> bool {
    let local_start: NaiveDateTime = civil_time::to_local(candidate.start(), ctx.timezone);
    let local_end: NaiveDateTime = civil_time::to_local(candidate.end(), ctx.timezone);
    let date: NaiveDate = local_start.date();

    let Some(rule) = rule_for_date(ctx.rules, date) else {
        return false;
    };
    if !rule.covers(ClockTime::from_naive_time(local_start.time())) {
        return false;
    }
    rule.end_time
        .on(date)
        .is_some_and(|closing| local_end <= closing)
}

/// Checks that `candidate` may be booked.
///
/// Checks run in order: seller active, working hours, unavailability,
/// overlap with other appointments (widened by the configured buffer),
/// daily cap on the seller-local day.
///
/// # Errors
///
/// Returns the first failed check as a `DomainError`.
pub fn validate_booking(
    candidate: &UtcInterval,
    ctx: &BookingContext<'_>,
) -> Result<(), DomainError> {
    let start: String = civil_time::format_utc(candidate.start());

    if !ctx.settings.is_active {
        return Err(DomainError::SellerInactive(ctx.settings.seller_id));
    }

    if !fits_working_hours(candidate, ctx) {
        return Err(DomainError::OutsideWorkingHours { start });
    }

    if ctx
        .unavailability
        .iter()
        .any(|w| w.interval.overlaps(candidate))
    {
        return Err(DomainError::SellerUnavailable { start });
    }

    let occupying = ctx
        .appointments
        .iter()
        .filter(|a| a.status.occupies_slot());

    let padded: UtcInterval = candidate.widened(ctx.settings.duration_between_appointments);
    if occupying.clone().any(|a| a.interval.overlaps(&padded)) {
        return Err(DomainError::SlotAlreadyBooked { start });
    }

    let date: NaiveDate = civil_time::to_local(candidate.start(), ctx.timezone).date();
    let same_day: usize = occupying
        .filter(|a| civil_time::to_local(a.interval.start(), ctx.timezone).date() == date)
        .count();
    if u32::try_from(same_day).unwrap_or(u32::MAX) >= ctx.settings.max_daily_appointments {
        return Err(DomainError::DailyLimitReached {
            date,
            limit: ctx.settings.max_daily_appointments,
        });
    }

    Ok(())
}
