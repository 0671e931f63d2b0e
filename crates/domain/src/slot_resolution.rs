// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::slot_generation::RawSlot;
use crate::types::{Appointment, Slot, UnavailabilityWindow, UtcInterval};
use chrono_tz::Tz;

/// Resolved slots for one day plus aggregate counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotListing {
    /// Number of candidates generated.
    pub total_slots: usize,
    /// Candidates that are bookable.
    pub available_slots: usize,
    /// Candidates overlapping a non-cancelled appointment.
    pub booked_slots: usize,
    /// Candidates outside the weekly rule window.
    pub outside_hours_slots: usize,
    /// Non-cancelled appointments in the day's span.
    pub existing_appointments: usize,
    /// Unavailability windows in the day's span.
    pub unavailabilities: usize,
    /// Slots in generation order.
    pub slots: Vec<Slot>,
}

/// Annotates raw candidates with booking and unavailability state.
///
/// Cancelled appointments are ignored. Intersection is half-open on both
/// sides, so back-to-back intervals do not collide.
#[must_use]
pub fn resolve_slots(
    raw: Vec<RawSlot>,
    unavailability: &[UnavailabilityWindow],
    appointments: &[Appointment],
    timezone: Tz,
) -> SlotListing {
    let occupying: Vec<&Appointment> = appointments
        .iter()
        .filter(|a| a.status.occupies_slot())
        .collect();
    let tz_name: &str = timezone.name();

    let slots: Vec<Slot> = raw
        .into_iter()
        .map(|candidate| {
            // A zero-length candidate cannot occur; fall back to no overlap.
            let interval: Option<UtcInterval> =
                UtcInterval::new(candidate.start_time, candidate.end_time).ok();
            let intersects = |other: &UtcInterval| interval.is_some_and(|i| i.overlaps(other));

            let is_booked: bool = occupying.iter().any(|a| intersects(&a.interval));
            let is_blocked: bool = unavailability.iter().any(|w| intersects(&w.interval));

            Slot {
                day_date: candidate.day_date,
                hour: candidate.hour,
                start_time: candidate.start_time,
                end_time: candidate.end_time,
                is_available: !candidate.is_outside_hours && !is_booked && !is_blocked,
                is_booked,
                is_outside_hours: candidate.is_outside_hours,
                timezone: tz_name.to_string(),
            }
        })
        .collect();

    SlotListing {
        total_slots: slots.len(),
        available_slots: slots.iter().filter(|s| s.is_available).count(),
        booked_slots: slots.iter().filter(|s| s.is_booked).count(),
        outside_hours_slots: slots.iter().filter(|s| s.is_outside_hours).count(),
        existing_appointments: occupying.len(),
        unavailabilities: unavailability.len(),
        slots,
    }
}
