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

//! API boundary for slotbook.
//!
//! Handlers take plain request structs, call the engine or the persistence
//! adapter, and return camelCase response DTOs. Every lower-layer error is
//! translated explicitly into an [`ApiError`].

mod error;
mod handlers;
pub mod params;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, ParamError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    book_appointment, cancel_appointment, create_package, create_seller, create_unavailability,
    delete_unavailability, get_availability_settings, get_seller, list_slots, list_unavailability,
    replace_availability_settings,
};
pub use request_response::{
    AppointmentInfo, AppointmentSettingsBody, AvailabilitySettingsResponse,
    CreateAppointmentRequest, CreatePackageRequest, CreateSellerRequest,
    CreateUnavailabilityRequest, ListSlotsRequest, ListSlotsResponse, ListUnavailabilityRequest,
    ListUnavailabilityResponse, PackageInfo, ReplaceAvailabilityRequest, SellerInfo, SlotInfo,
    UnavailabilityInfo, ViolationInfo, WeeklyAvailabilityEntry,
};
