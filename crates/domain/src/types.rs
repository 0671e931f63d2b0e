// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::civil_time;
use crate::error::DomainError;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const SECONDS_PER_DAY: u32 = 86_400;

/// A wall-clock time of day, stored as seconds since local midnight.
///
/// `24:00` is representable as [`ClockTime::END_OF_DAY`] so that a working
/// window can close at midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    seconds: u32,
}

impl ClockTime {
    /// Local midnight at the start of the day.
    pub const MIDNIGHT: Self = Self { seconds: 0 };
    /// Local midnight at the end of the day (`24:00`).
    pub const END_OF_DAY: Self = Self {
        seconds: SECONDS_PER_DAY,
    };

    /// Creates a clock time from hours, minutes and seconds.
    ///
    /// Returns `None` unless `hour < 24`, `minute < 60`, `second < 60`.
    #[must_use]
    pub const fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        if hour >= 24 || minute >= 60 || second >= 60 {
            return None;
        }
        Some(Self {
            seconds: hour * 3600 + minute * 60 + second,
        })
    }

    /// Creates a clock time from a chrono time, dropping sub-second precision.
    #[must_use]
    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self {
            seconds: time.num_seconds_from_midnight(),
        }
    }

    /// Seconds elapsed since local midnight.
    #[must_use]
    pub const fn seconds_from_midnight(&self) -> u32 {
        self.seconds
    }

    /// Anchors this clock time on a calendar date.
    ///
    /// `24:00` yields midnight of the following day.
    #[must_use]
    pub fn on(&self, date: NaiveDate) -> Option<NaiveDateTime> {
        date.and_time(NaiveTime::MIN)
            .checked_add_signed(Duration::seconds(i64::from(self.seconds)))
    }
}

impl std::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hours: u32 = self.seconds / 3600;
        let minutes: u32 = (self.seconds % 3600) / 60;
        let seconds: u32 = self.seconds % 60;
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")
    }
}

impl FromStr for ClockTime {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        civil_time::parse_clock_time(s)
    }
}

/// A half-open `[start, end)` interval of UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtcInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl UtcInterval {
    /// Creates an interval.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInterval` unless `start < end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, DomainError> {
        if start >= end {
            return Err(DomainError::InvalidInterval {
                start: civil_time::format_utc(start),
                end: civil_time::format_utc(end),
            });
        }
        Ok(Self { start, end })
    }

    /// Interval start (inclusive).
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Interval end (exclusive).
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Half-open intersection: `[a, b)` and `[c, d)` overlap iff `a < d` and `c < b`.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns the interval grown by `minutes` on both sides.
    #[must_use]
    pub fn widened(&self, minutes: u32) -> Self {
        let pad: Duration = Duration::minutes(i64::from(minutes));
        Self {
            start: self.start.checked_sub_signed(pad).unwrap_or(self.start),
            end: self.end.checked_add_signed(pad).unwrap_or(self.end),
        }
    }
}

/// A seller's recurring working-hours window for one weekday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyAvailabilityRule {
    /// Owning seller.
    pub seller_id: i64,
    /// 0 = Sunday … 6 = Saturday.
    pub day_of_week: u8,
    /// Window start (inclusive), seller-local.
    pub start_time: ClockTime,
    /// Window end (exclusive), seller-local.
    pub end_time: ClockTime,
    /// Whether the seller works on this weekday at all.
    pub is_available: bool,
}

impl WeeklyAvailabilityRule {
    /// Whether a local start time falls inside `[start_time, end_time)` on an available day.
    #[must_use]
    pub fn covers(&self, time: ClockTime) -> bool {
        self.is_available && self.start_time <= time && time < self.end_time
    }
}

/// Per-seller appointment settings (singleton per seller).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerAppointmentSettings {
    /// Owning seller.
    pub seller_id: i64,
    /// Whether the seller accepts bookings.
    pub is_active: bool,
    /// Maximum appointments per seller-local day.
    pub max_daily_appointments: u32,
    /// Minimum gap in minutes between two appointments.
    pub duration_between_appointments: u32,
}

/// A one-off interval during which the seller cannot be booked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnavailabilityWindow {
    /// Persisted ID, `None` before insertion.
    pub unavailability_id: Option<i64>,
    /// Owning seller.
    pub seller_id: i64,
    /// The blocked interval.
    pub interval: UtcInterval,
    /// Free-form reason.
    pub reason: Option<String>,
}

impl UnavailabilityWindow {
    /// Creates a window, enforcing `start < end`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInterval` if `start >= end`.
    pub fn new(
        seller_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        reason: Option<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            unavailability_id: None,
            seller_id,
            interval: UtcInterval::new(start, end)?,
            reason,
        })
    }
}

/// Lifecycle status of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    /// Requested, not yet confirmed.
    #[default]
    Pending,
    /// Confirmed by the seller.
    Confirmed,
    /// Took place.
    Completed,
    /// Cancelled; no longer occupies its slot.
    Cancelled,
}

impl AppointmentStatus {
    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Only non-cancelled appointments occupy slots.
    #[must_use]
    pub const fn occupies_slot(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

impl FromStr for AppointmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidAppointmentStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An existing booking. Read-only from the slot engine's perspective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    /// Persisted ID, `None` before insertion.
    pub appointment_id: Option<i64>,
    /// Seller being booked.
    pub seller_id: i64,
    /// Package being booked.
    pub package_id: i64,
    /// Occupied interval.
    pub interval: UtcInterval,
    /// Current status.
    pub status: AppointmentStatus,
}

/// A seller and the timezone their weekly rules are expressed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seller {
    /// Persisted ID, `None` before insertion.
    pub seller_id: Option<i64>,
    /// Display name.
    pub name: String,
    /// IANA timezone.
    pub timezone: Tz,
}

impl Seller {
    /// Creates a seller, validating the name and timezone.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the timezone is unknown.
    pub fn new(name: &str, timezone: &str) -> Result<Self, DomainError> {
        let name: &str = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidName(String::from(
                "Seller name cannot be empty",
            )));
        }
        Ok(Self {
            seller_id: None,
            name: name.to_string(),
            timezone: civil_time::parse_timezone(timezone)?,
        })
    }
}

/// A bookable service with a fixed duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Persisted ID, `None` before insertion.
    pub package_id: Option<i64>,
    /// Owning seller.
    pub seller_id: i64,
    /// Display name.
    pub name: String,
    /// Length of one booking.
    pub duration_minutes: u32,
}

impl Package {
    /// Creates a package, validating the name and duration.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the duration is outside `[1, 1440]`.
    pub fn new(seller_id: i64, name: &str, duration_minutes: i64) -> Result<Self, DomainError> {
        let name: &str = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidName(String::from(
                "Package name cannot be empty",
            )));
        }
        let duration_minutes: u32 = u32::try_from(duration_minutes)
            .ok()
            .filter(|m| (1..=1440).contains(m))
            .ok_or(DomainError::InvalidDuration {
                minutes: duration_minutes,
            })?;
        Ok(Self {
            package_id: None,
            seller_id,
            name: name.to_string(),
            duration_minutes,
        })
    }
}

/// A resolved, bookable-or-not time slot. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// Seller-local calendar date the slot was generated for.
    pub day_date: NaiveDate,
    /// Seller-local start time.
    pub hour: ClockTime,
    /// Start instant.
    pub start_time: DateTime<Utc>,
    /// End instant.
    pub end_time: DateTime<Utc>,
    /// Inside working hours, not booked, not blocked.
    pub is_available: bool,
    /// Overlaps a non-cancelled appointment.
    pub is_booked: bool,
    /// Outside the weekly rule window.
    pub is_outside_hours: bool,
    /// Seller timezone name.
    pub timezone: String,
}
