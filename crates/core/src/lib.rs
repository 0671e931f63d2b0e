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

//! Repository-backed operations of the slotbook engine.
//!
//! The pure rules live in `slotbook-domain`. This crate sequences them
//! against an [`AvailabilityRepository`]: slot listing, availability
//! settings replacement and read-back, and guarded booking.

mod booking;
mod error;
mod repository;
mod settings;
mod slots;

#[cfg(test)]
mod tests;

pub use booking::{BookingRequest, book_appointment, cancel_appointment};
pub use error::{CoreError, RepositoryError};
pub use repository::AvailabilityRepository;
pub use settings::{get_availability_settings, replace_availability_settings};
pub use slots::{SlotQuery, list_slots};
