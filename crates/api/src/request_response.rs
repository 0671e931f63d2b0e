// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests are plain structs filled in by the server layer. Responses
//! serialize to camelCase JSON.

use serde::{Deserialize, Serialize};
use slotbook_domain::{
    Appointment, Package, Seller, SellerAppointmentSettings, SettingsViolation, Slot, SlotListing,
    UnavailabilityWindow, ValidatedAvailability, WeeklyAvailabilityRule, civil_time,
};

/// API request to list the slots of one seller-local day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSlotsRequest {
    /// The seller.
    pub seller_id: i64,
    /// The package whose duration sets the slot length.
    pub package_id: i64,
    /// Seller-local date, `YYYY-MM-DD`.
    pub date: String,
    /// Slot cadence in minutes.
    pub slot_minutes: Option<i64>,
}

/// A single slot on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotInfo {
    /// Seller-local date.
    pub day_date: String,
    /// Seller-local start time, `HH:MM:SS`.
    pub hour: String,
    /// Start instant, UTC.
    pub start_time: String,
    /// End instant, UTC.
    pub end_time: String,
    /// Bookable.
    pub is_available: bool,
    /// Overlaps a non-cancelled appointment.
    pub is_booked: bool,
    /// Outside the weekly rule window.
    pub is_outside_hours: bool,
    /// IANA timezone name.
    pub tz: String,
}

impl From<&Slot> for SlotInfo {
    fn from(slot: &Slot) -> Self {
        Self {
            day_date: slot.day_date.to_string(),
            hour: slot.hour.to_string(),
            start_time: civil_time::format_utc(slot.start_time),
            end_time: civil_time::format_utc(slot.end_time),
            is_available: slot.is_available,
            is_booked: slot.is_booked,
            is_outside_hours: slot.is_outside_hours,
            tz: slot.timezone.clone(),
        }
    }
}

/// API response for a slot listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSlotsResponse {
    /// Number of candidates generated.
    pub total_slots: usize,
    /// Bookable candidates.
    pub available_slots: usize,
    /// Candidates overlapping an appointment.
    pub booked_slots: usize,
    /// Candidates outside working hours.
    pub outside_hours_slots: usize,
    /// Non-cancelled appointments in the day's span.
    pub existing_appointments: usize,
    /// Unavailability windows in the day's span.
    pub unavailabilities: usize,
    /// Slots in generation order.
    pub slots: Vec<SlotInfo>,
}

impl From<&SlotListing> for ListSlotsResponse {
    fn from(listing: &SlotListing) -> Self {
        Self {
            total_slots: listing.total_slots,
            available_slots: listing.available_slots,
            booked_slots: listing.booked_slots,
            outside_hours_slots: listing.outside_hours_slots,
            existing_appointments: listing.existing_appointments,
            unavailabilities: listing.unavailabilities,
            slots: listing.slots.iter().map(SlotInfo::from).collect(),
        }
    }
}

/// One weekday entry of an availability submission or read-back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyAvailabilityEntry {
    /// 0 = Sunday … 6 = Saturday.
    pub day_of_week: i64,
    /// Opening time.
    pub start_time: String,
    /// Closing time.
    pub end_time: String,
    /// Working day.
    pub is_available: bool,
}

impl From<&WeeklyAvailabilityRule> for WeeklyAvailabilityEntry {
    fn from(rule: &WeeklyAvailabilityRule) -> Self {
        Self {
            day_of_week: i64::from(rule.day_of_week),
            start_time: rule.start_time.to_string(),
            end_time: rule.end_time.to_string(),
            is_available: rule.is_available,
        }
    }
}

/// Appointment settings of a submission or read-back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentSettingsBody {
    /// Accepting bookings.
    pub is_active: bool,
    /// Daily cap.
    pub max_daily_appointments: i64,
    /// Buffer between appointments in minutes.
    pub duration_between_appointments: i64,
}

impl From<&SellerAppointmentSettings> for AppointmentSettingsBody {
    fn from(settings: &SellerAppointmentSettings) -> Self {
        Self {
            is_active: settings.is_active,
            max_daily_appointments: i64::from(settings.max_daily_appointments),
            duration_between_appointments: i64::from(settings.duration_between_appointments),
        }
    }
}

/// API request to replace a seller's availability settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceAvailabilityRequest {
    /// The seller.
    pub seller_id: i64,
    /// Seven weekday entries.
    pub availability: Vec<WeeklyAvailabilityEntry>,
    /// Appointment settings.
    pub settings: AppointmentSettingsBody,
}

/// API response carrying a seller's persisted availability settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySettingsResponse {
    /// The seller.
    pub seller_id: i64,
    /// Seven weekday entries, Sunday first.
    pub availability: Vec<WeeklyAvailabilityEntry>,
    /// Appointment settings.
    pub settings: AppointmentSettingsBody,
}

impl From<&ValidatedAvailability> for AvailabilitySettingsResponse {
    fn from(validated: &ValidatedAvailability) -> Self {
        Self {
            seller_id: validated.settings.seller_id,
            availability: validated
                .rules
                .iter()
                .map(WeeklyAvailabilityEntry::from)
                .collect(),
            settings: AppointmentSettingsBody::from(&validated.settings),
        }
    }
}

/// One rejected field of a settings submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationInfo {
    /// Field path, e.g. `availability[2].endTime`.
    pub field: String,
    /// Constraint identifier, e.g. `start_not_before_end`.
    pub constraint: String,
    /// Human-readable description.
    pub message: String,
}

impl From<&SettingsViolation> for ViolationInfo {
    fn from(violation: &SettingsViolation) -> Self {
        Self {
            field: violation.field.clone(),
            constraint: violation.kind.as_str().to_string(),
            message: violation.message.clone(),
        }
    }
}

/// API request to register a seller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSellerRequest {
    /// Display name.
    pub name: String,
    /// IANA timezone.
    pub timezone: String,
}

/// A package on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInfo {
    /// The package.
    pub package_id: i64,
    /// Owning seller.
    pub seller_id: i64,
    /// Display name.
    pub name: String,
    /// Length of one booking.
    pub duration_minutes: u32,
}

impl PackageInfo {
    pub(crate) fn from_package(package_id: i64, package: &Package) -> Self {
        Self {
            package_id,
            seller_id: package.seller_id,
            name: package.name.clone(),
            duration_minutes: package.duration_minutes,
        }
    }
}

/// A seller and their packages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerInfo {
    /// The seller.
    pub seller_id: i64,
    /// Display name.
    pub name: String,
    /// IANA timezone.
    pub timezone: String,
    /// Registered packages.
    pub packages: Vec<PackageInfo>,
}

impl SellerInfo {
    pub(crate) fn from_seller(seller_id: i64, seller: &Seller, packages: Vec<PackageInfo>) -> Self {
        Self {
            seller_id,
            name: seller.name.clone(),
            timezone: seller.timezone.name().to_string(),
            packages,
        }
    }
}

/// API request to register a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePackageRequest {
    /// Owning seller.
    pub seller_id: i64,
    /// Display name.
    pub name: String,
    /// Length of one booking, `[1, 1440]`.
    pub duration_minutes: i64,
}

/// API request to block out an interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUnavailabilityRequest {
    /// The seller.
    pub seller_id: i64,
    /// Start instant, RFC 3339.
    pub start_time: String,
    /// End instant, RFC 3339.
    pub end_time: String,
    /// Free-form reason.
    pub reason: Option<String>,
}

/// API request to list unavailability windows overlapping an interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListUnavailabilityRequest {
    /// The seller.
    pub seller_id: i64,
    /// Lower bound, RFC 3339.
    pub from: String,
    /// Upper bound, RFC 3339.
    pub to: String,
}

/// An unavailability window on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnavailabilityInfo {
    /// The window.
    pub unavailability_id: i64,
    /// The seller.
    pub seller_id: i64,
    /// Start instant, UTC.
    pub start_time: String,
    /// End instant, UTC.
    pub end_time: String,
    /// Free-form reason.
    pub reason: Option<String>,
}

impl UnavailabilityInfo {
    pub(crate) fn from_window(unavailability_id: i64, window: &UnavailabilityWindow) -> Self {
        Self {
            unavailability_id,
            seller_id: window.seller_id,
            start_time: civil_time::format_utc(window.interval.start()),
            end_time: civil_time::format_utc(window.interval.end()),
            reason: window.reason.clone(),
        }
    }
}

/// API response for an unavailability listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUnavailabilityResponse {
    /// The seller.
    pub seller_id: i64,
    /// Windows ordered by start.
    pub windows: Vec<UnavailabilityInfo>,
}

/// API request to book an appointment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAppointmentRequest {
    /// The seller.
    pub seller_id: i64,
    /// The package.
    pub package_id: i64,
    /// Start instant, RFC 3339.
    pub start_time: String,
}

/// An appointment on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentInfo {
    /// The appointment.
    pub appointment_id: i64,
    /// The seller.
    pub seller_id: i64,
    /// The package.
    pub package_id: i64,
    /// Start instant, UTC.
    pub start_time: String,
    /// End instant, UTC.
    pub end_time: String,
    /// Lifecycle status.
    pub status: String,
}

impl AppointmentInfo {
    pub(crate) fn from_appointment(appointment_id: i64, appointment: &Appointment) -> Self {
        Self {
            appointment_id,
            seller_id: appointment.seller_id,
            package_id: appointment.package_id,
            start_time: civil_time::format_utc(appointment.interval.start()),
            end_time: civil_time::format_utc(appointment.interval.end()),
            status: appointment.status.to_string(),
        }
    }
}
