// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::availability_settings::SettingsViolation;

/// Errors that can occur during domain validation and slot computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A calendar date string did not match `YYYY-MM-DD` or is not a real date.
    InvalidDateFormat {
        /// The rejected input.
        date_string: String,
        /// Why it was rejected.
        reason: String,
    },
    /// A clock time string did not match `HH:MM` or `HH:MM:SS`.
    InvalidTimeFormat {
        /// The rejected input.
        time_string: String,
        /// Why it was rejected.
        reason: String,
    },
    /// A UTC timestamp string was not valid RFC 3339.
    InvalidTimestamp {
        /// The rejected input.
        timestamp: String,
        /// Why it was rejected.
        reason: String,
    },
    /// The timezone is not a recognized IANA zone identifier.
    UnknownTimezone(String),
    /// Slot granularity is outside `[1, 1440]` minutes.
    InvalidSlotMinutes {
        /// The rejected value.
        minutes: i64,
    },
    /// A duration is outside `[1, 1440]` minutes.
    InvalidDuration {
        /// The rejected value.
        minutes: i64,
    },
    /// An interval whose start is not strictly before its end.
    InvalidInterval {
        /// Interval start (RFC 3339).
        start: String,
        /// Interval end (RFC 3339).
        end: String,
    },
    /// A name field was empty.
    InvalidName(String),
    /// Unknown appointment status string.
    InvalidAppointmentStatus(String),
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Seller does not exist.
    SellerNotFound(i64),
    /// Package does not exist or does not belong to the seller.
    PackageNotFound(i64),
    /// Appointment does not exist.
    AppointmentNotFound(i64),
    /// Unavailability window does not exist.
    UnavailabilityNotFound(i64),
    /// The seller has never submitted availability settings.
    AvailabilityNotConfigured(i64),
    /// Availability settings failed validation.
    ValidationFailed(Vec<SettingsViolation>),
    /// The seller is not accepting appointments.
    SellerInactive(i64),
    /// The requested appointment falls outside the seller's working hours.
    OutsideWorkingHours {
        /// Requested start (RFC 3339).
        start: String,
    },
    /// The requested appointment overlaps an unavailability window.
    SellerUnavailable {
        /// Requested start (RFC 3339).
        start: String,
    },
    /// The requested appointment overlaps another appointment.
    SlotAlreadyBooked {
        /// Requested start (RFC 3339).
        start: String,
    },
    /// The seller's daily appointment cap is already reached.
    DailyLimitReached {
        /// The seller-local calendar date.
        date: chrono::NaiveDate,
        /// The configured cap.
        limit: u32,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDateFormat {
                date_string,
                reason,
            } => {
                write!(f, "Invalid date '{date_string}': {reason}")
            }
            Self::InvalidTimeFormat {
                time_string,
                reason,
            } => {
                write!(f, "Invalid time '{time_string}': {reason}")
            }
            Self::InvalidTimestamp { timestamp, reason } => {
                write!(f, "Invalid timestamp '{timestamp}': {reason}")
            }
            Self::UnknownTimezone(tz) => write!(f, "Unknown timezone: {tz}"),
            Self::InvalidSlotMinutes { minutes } => {
                write!(
                    f,
                    "Invalid slot minutes: {minutes}. Must be between 1 and 1440"
                )
            }
            Self::InvalidDuration { minutes } => {
                write!(f, "Invalid duration: {minutes}. Must be between 1 and 1440")
            }
            Self::InvalidInterval { start, end } => {
                write!(f, "Interval start {start} must be before end {end}")
            }
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidAppointmentStatus(status) => {
                write!(f, "Invalid appointment status: {status}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::SellerNotFound(id) => write!(f, "Seller {id} not found"),
            Self::PackageNotFound(id) => write!(f, "Package {id} not found"),
            Self::AppointmentNotFound(id) => write!(f, "Appointment {id} not found"),
            Self::UnavailabilityNotFound(id) => {
                write!(f, "Unavailability window {id} not found")
            }
            Self::AvailabilityNotConfigured(id) => {
                write!(f, "Seller {id} has no availability settings")
            }
            Self::ValidationFailed(violations) => {
                write!(f, "Availability settings failed validation: ")?;
                for (index, violation) in violations.iter().enumerate() {
                    if index > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}: {}", violation.field, violation.message)?;
                }
                Ok(())
            }
            Self::SellerInactive(id) => {
                write!(f, "Seller {id} is not accepting appointments")
            }
            Self::OutsideWorkingHours { start } => {
                write!(f, "Appointment at {start} is outside working hours")
            }
            Self::SellerUnavailable { start } => {
                write!(f, "Seller is unavailable at {start}")
            }
            Self::SlotAlreadyBooked { start } => {
                write!(f, "Slot at {start} is already booked")
            }
            Self::DailyLimitReached { date, limit } => {
                write!(
                    f,
                    "Daily appointment limit of {limit} already reached on {date}"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
