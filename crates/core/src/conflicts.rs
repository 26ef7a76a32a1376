// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Overlap checks between bookings and void bedspaces on one bedspace.
//!
//! A booking holds its bedspace from arrival until its departure date plus
//! its turnaround working days. A void holds it from start to end. All
//! ranges are inclusive. Cancelled bookings, non-arrivals and cancelled voids
//! never conflict.

use crate::error::CoreError;
use crate::ports::{BookingRepository, VoidBedspaceRepository, WorkingDayCalendar};
use cas3_domain::{Booking, DateRange, VoidBedspace};
use time::Date;
use uuid::Uuid;

/// Last day `booking` keeps its bedspace unavailable.
pub(crate) fn last_unavailable_date(calendar: &dyn WorkingDayCalendar, booking: &Booking) -> Date {
    calendar.add_working_days(booking.departure_date, booking.turnaround_working_days())
}

/// Whether `booking` still needs its bedspace at all.
pub(crate) fn holds_bedspace(booking: &Booking) -> bool {
    !booking.is_cancelled() && booking.non_arrival.is_none()
}

/// A proposed occupation of a bedspace.
pub(crate) struct ProposedStay {
    pub bedspace_id: Uuid,
    pub arrival_date: Date,
    pub departure_date: Date,
    pub turnaround_working_days: u32,
    /// The booking being changed, which never conflicts with itself.
    pub booking_id: Option<Uuid>,
}

/// Fails with `CoreError::Conflict` if the stay overlaps another booking or
/// a void bedspace.
pub(crate) fn check_stay_conflicts(
    bookings: &dyn BookingRepository,
    voids: &dyn VoidBedspaceRepository,
    calendar: &dyn WorkingDayCalendar,
    stay: &ProposedStay,
) -> Result<(), CoreError> {
    let last_unavailable: Date =
        calendar.add_working_days(stay.departure_date, stay.turnaround_working_days);
    let Ok(held) = DateRange::new(stay.arrival_date, last_unavailable) else {
        return Ok(());
    };

    if let Some(booking) = conflicting_booking(bookings, calendar, stay.bedspace_id, &held, stay.booking_id)? {
        return Err(booking_conflict(calendar, &booking));
    }

    let Ok(occupied) = DateRange::new(stay.arrival_date, stay.departure_date) else {
        return Ok(());
    };
    if let Some(void_bedspace) = conflicting_void(voids, stay.bedspace_id, &occupied, None)? {
        return Err(void_conflict(&void_bedspace));
    }

    Ok(())
}

/// Fails with `CoreError::Conflict` if a void over `window` would overlap a
/// booking or another void.
pub(crate) fn check_void_conflicts(
    bookings: &dyn BookingRepository,
    voids: &dyn VoidBedspaceRepository,
    calendar: &dyn WorkingDayCalendar,
    bedspace_id: Uuid,
    window: &DateRange,
    void_bedspace_id: Option<Uuid>,
) -> Result<(), CoreError> {
    if let Some(booking) = conflicting_booking(bookings, calendar, bedspace_id, window, None)? {
        return Err(booking_conflict(calendar, &booking));
    }

    if let Some(void_bedspace) = conflicting_void(voids, bedspace_id, window, void_bedspace_id)? {
        return Err(void_conflict(&void_bedspace));
    }

    Ok(())
}

fn conflicting_booking(
    bookings: &dyn BookingRepository,
    calendar: &dyn WorkingDayCalendar,
    bedspace_id: Uuid,
    window: &DateRange,
    excluding: Option<Uuid>,
) -> Result<Option<Booking>, CoreError> {
    Ok(bookings
        .find_by_bedspace(bedspace_id)?
        .into_iter()
        .filter(|booking| Some(booking.id) != excluding && holds_bedspace(booking))
        .find(|booking| {
            DateRange::new(booking.arrival_date, last_unavailable_date(calendar, booking))
                .is_ok_and(|held| held.overlaps(window))
        }))
}

fn conflicting_void(
    voids: &dyn VoidBedspaceRepository,
    bedspace_id: Uuid,
    window: &DateRange,
    excluding: Option<Uuid>,
) -> Result<Option<VoidBedspace>, CoreError> {
    Ok(voids
        .find_by_bedspace(bedspace_id)?
        .into_iter()
        .filter(|void_bedspace| Some(void_bedspace.id) != excluding && !void_bedspace.is_cancelled())
        .find(|void_bedspace| {
            void_bedspace
                .window()
                .is_some_and(|held| held.overlaps(window))
        }))
}

fn booking_conflict(calendar: &dyn WorkingDayCalendar, booking: &Booking) -> CoreError {
    CoreError::Conflict {
        entity_id: booking.id,
        message: format!(
            "A Booking already exists for dates from {} to {} which overlaps with the desired dates",
            booking.arrival_date,
            last_unavailable_date(calendar, booking)
        ),
    }
}

fn void_conflict(void_bedspace: &VoidBedspace) -> CoreError {
    CoreError::Conflict {
        entity_id: void_bedspace.id,
        message: format!(
            "A Void Bedspace already exists for dates from {} to {} which overlaps with the desired dates",
            void_bedspace.start_date, void_bedspace.end_date
        ),
    }
}
