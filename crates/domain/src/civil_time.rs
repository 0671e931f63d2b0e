// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Civil-time conversion between seller-local wall-clock time and UTC.
//!
//! Every function takes the timezone explicitly. There is no process-wide
//! "current timezone", so conversions for sellers in different zones can run
//! concurrently.
//!
//! ## Resolution of DST edge cases
//!
//! - Ambiguous local times (fall-back) resolve to the earliest instant.
//! - Non-existent local times (spring-forward gap) are shifted forward by the
//!   length of the gap, i.e. the offset in force before the transition is
//!   applied. Callers that must skip the gap check [`local_time_exists`].
//!
//! ## Duration arithmetic
//!
//! [`add_minutes_utc`] adds minutes to the wall clock first and converts the
//! result second, so one local hour on a transition day may span 59 or 61
//! elapsed UTC minutes (or more, across a whole gap).

use crate::error::DomainError;
use crate::types::ClockTime;
use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, Offset, SecondsFormat,
    TimeZone, Utc, Weekday,
};
use chrono_tz::Tz;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT_HM: &[BorrowedFormatItem<'_>] = format_description!("[hour]:[minute]");
const TIME_FORMAT_HMS: &[BorrowedFormatItem<'_>] =
    format_description!("[hour]:[minute]:[second]");

/// Longest span searched backwards for the offset in force before a gap.
const GAP_SEARCH_MINUTES: i64 = 24 * 60;

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns `DomainError::InvalidDateFormat` if the string does not have the
/// exact shape `\d{4}-\d{2}-\d{2}` or does not name a real date.
pub fn parse_date(date_string: &str) -> Result<NaiveDate, DomainError> {
    if !has_iso_date_shape(date_string) {
        return Err(DomainError::InvalidDateFormat {
            date_string: date_string.to_string(),
            reason: String::from("expected YYYY-MM-DD"),
        });
    }

    let date: time::Date =
        time::Date::parse(date_string, DATE_FORMAT).map_err(|e| DomainError::InvalidDateFormat {
            date_string: date_string.to_string(),
            reason: e.to_string(),
        })?;

    // Convert time::Date to chrono::NaiveDate
    NaiveDate::from_ymd_opt(
        date.year(),
        u32::from(u8::from(date.month())),
        u32::from(date.day()),
    )
    .ok_or_else(|| DomainError::InvalidDateFormat {
        date_string: date_string.to_string(),
        reason: String::from("date out of range"),
    })
}

fn has_iso_date_shape(s: &str) -> bool {
    let bytes: &[u8] = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Parses `HH:MM` or `HH:MM:SS`. `24:00` and `24:00:00` denote end of day.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimeFormat` if the string is not a valid clock time.
pub fn parse_clock_time(time_string: &str) -> Result<ClockTime, DomainError> {
    if time_string == "24:00" || time_string == "24:00:00" {
        return Ok(ClockTime::END_OF_DAY);
    }

    let parsed: time::Time = time::Time::parse(time_string, TIME_FORMAT_HMS)
        .or_else(|_| time::Time::parse(time_string, TIME_FORMAT_HM))
        .map_err(|e| DomainError::InvalidTimeFormat {
            time_string: time_string.to_string(),
            reason: e.to_string(),
        })?;

    ClockTime::from_hms(
        u32::from(parsed.hour()),
        u32::from(parsed.minute()),
        u32::from(parsed.second()),
    )
    .ok_or_else(|| DomainError::InvalidTimeFormat {
        time_string: time_string.to_string(),
        reason: String::from("time out of range"),
    })
}

/// Parses an IANA timezone identifier.
///
/// # Errors
///
/// Returns `DomainError::UnknownTimezone` if the zone is not in the tz database.
pub fn parse_timezone(timezone: &str) -> Result<Tz, DomainError> {
    timezone
        .parse::<Tz>()
        .map_err(|_| DomainError::UnknownTimezone(timezone.to_string()))
}

/// Parses an RFC 3339 timestamp into a UTC instant.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimestamp` if the string is not RFC 3339 or
/// carries a fractional second; instants are stored at whole-second precision.
pub fn parse_utc(timestamp: &str) -> Result<DateTime<Utc>, DomainError> {
    let instant: DateTime<Utc> = DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DomainError::InvalidTimestamp {
            timestamp: timestamp.to_string(),
            reason: e.to_string(),
        })?;
    if instant.timestamp_subsec_nanos() != 0 {
        return Err(DomainError::InvalidTimestamp {
            timestamp: timestamp.to_string(),
            reason: String::from("fractional seconds are not supported"),
        });
    }
    Ok(instant)
}

/// Formats an instant as `YYYY-MM-DDTHH:MM:SSZ`.
///
/// This is the storage and wire format; it sorts lexicographically in
/// instant order.
#[must_use]
pub fn format_utc(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Whether a wall-clock time exists in the zone (false inside a spring-forward gap).
#[must_use]
pub fn local_time_exists(tz: Tz, local: NaiveDateTime) -> bool {
    !matches!(tz.from_local_datetime(&local), LocalResult::None)
}

/// Converts a seller-local wall-clock time to a UTC instant.
///
/// Ambiguous times resolve to the earliest instant; times inside a gap are
/// shifted forward past it.
#[must_use]
pub fn local_to_utc(tz: Tz, local: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => shift_past_gap(tz, local),
    }
}

fn shift_past_gap(tz: Tz, local: NaiveDateTime) -> DateTime<Utc> {
    // Find the last wall-clock minute before the gap and reuse its offset.
    let offset_seconds: Option<i32> = (1..=GAP_SEARCH_MINUTES).find_map(|back| {
        let probe: NaiveDateTime = local.checked_sub_signed(Duration::minutes(back))?;
        match tz.from_local_datetime(&probe) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(_, dt) => {
                Some(dt.offset().fix().local_minus_utc())
            }
            LocalResult::None => None,
        }
    });

    offset_seconds
        .and_then(|secs| local.checked_sub_signed(Duration::seconds(i64::from(secs))))
        .unwrap_or(local)
        .and_utc()
}

/// Converts a UTC instant to seller-local wall-clock time.
#[must_use]
pub fn to_local(instant: DateTime<Utc>, tz: Tz) -> NaiveDateTime {
    instant.with_timezone(&tz).naive_local()
}

/// Converts a `(date, time, timezone)` triple to a UTC instant.
///
/// # Errors
///
/// Returns an error if the date or time does not parse, or the timezone is unknown.
///
/// # Example
///
/// ```
/// use slotbook_domain::civil_time::to_utc;
///
/// let instant = to_utc("2025-09-01", "09:00", "Europe/Istanbul").unwrap();
/// assert_eq!(instant.to_rfc3339(), "2025-09-01T06:00:00+00:00");
/// ```
pub fn to_utc(
    date_string: &str,
    time_string: &str,
    timezone: &str,
) -> Result<DateTime<Utc>, DomainError> {
    let date: NaiveDate = parse_date(date_string)?;
    let clock: ClockTime = parse_clock_time(time_string)?;
    let tz: Tz = parse_timezone(timezone)?;

    let local: NaiveDateTime = clock
        .on(date)
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("anchoring {clock} on {date}"),
        })?;

    Ok(local_to_utc(tz, local))
}

/// Adds wall-clock minutes to a local time in `tz`, then converts to UTC.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the addition overflows.
pub fn add_minutes_utc(
    local: NaiveDateTime,
    tz: Tz,
    minutes: i64,
) -> Result<DateTime<Utc>, DomainError> {
    let shifted: NaiveDateTime = local
        .checked_add_signed(Duration::minutes(minutes))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("adding {minutes} minutes to {local}"),
        })?;
    Ok(local_to_utc(tz, shifted))
}

/// Weekday index of a civil date, 0 = Sunday … 6 = Saturday.
#[must_use]
pub fn weekday_index(date: NaiveDate) -> u8 {
    match date.weekday() {
        Weekday::Sun => 0,
        Weekday::Mon => 1,
        Weekday::Tue => 2,
        Weekday::Wed => 3,
        Weekday::Thu => 4,
        Weekday::Fri => 5,
        Weekday::Sat => 6,
    }
}
