// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Day-by-day occupancy counts for a premises.
//!
//! This is a read-only aggregation over bookings and void bedspaces.
//! Each booking is counted in exactly one bucket per day it covers:
//! cancelled, then arrived, then non-arrived, otherwise pending.

use crate::booking::Booking;
use crate::date_range::days_until;
use crate::void_bedspace::VoidBedspace;
use serde::{Deserialize, Serialize};
use time::Date;

/// Occupancy counts for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub date: Date,
    pub pending_bookings: u32,
    pub arrived_bookings: u32,
    pub non_arrived_bookings: u32,
    pub cancelled_bookings: u32,
    pub void_bedspaces: u32,
}

impl Availability {
    const fn empty(date: Date) -> Self {
        Self {
            date,
            pending_bookings: 0,
            arrived_bookings: 0,
            non_arrived_bookings: 0,
            cancelled_bookings: 0,
            void_bedspaces: 0,
        }
    }
}

/// Calculates availability for each day in `[start, end)`.
///
/// # Arguments
///
/// * `start` - First day reported
/// * `end` - Day after the last day reported
/// * `bookings` - Bookings at the premises
/// * `voids` - Void bedspaces at the premises
#[must_use]
pub fn calculate_availability(
    start: Date,
    end: Date,
    bookings: &[Booking],
    voids: &[VoidBedspace],
) -> Vec<Availability> {
    days_until(start, end)
        .into_iter()
        .map(|day| {
            let mut availability: Availability = Availability::empty(day);

            for booking in bookings
                .iter()
                .filter(|booking| booking.stay().is_some_and(|stay| stay.contains(day)))
            {
                if booking.is_cancelled() {
                    availability.cancelled_bookings += 1;
                } else if booking.arrival.is_some() {
                    availability.arrived_bookings += 1;
                } else if booking.non_arrival.is_some() {
                    availability.non_arrived_bookings += 1;
                } else {
                    availability.pending_bookings += 1;
                }
            }

            let void_count: usize = voids
                .iter()
                .filter(|void| !void.is_cancelled())
                .filter(|void| void.window().is_some_and(|window| window.contains(day)))
                .count();
            availability.void_bedspaces = u32::try_from(void_count).unwrap_or(u32::MAX);

            availability
        })
        .collect()
}
