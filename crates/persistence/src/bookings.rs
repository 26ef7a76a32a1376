// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::table::Table;
use cas3::{BookingRepository, PortError};
use cas3_domain::{Booking, BookingStatus};
use time::Date;
use tracing::debug;
use uuid::Uuid;

/// Bookings held in memory.
#[derive(Debug)]
pub struct InMemoryBookingRepository {
    table: Table<Booking>,
}

impl Default for InMemoryBookingRepository {
    fn default() -> Self {
        Self {
            table: Table::new("bookings"),
        }
    }
}

impl BookingRepository for InMemoryBookingRepository {
    fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, PortError> {
        Ok(self.table.get(id)?)
    }

    fn save(&self, booking: &Booking) -> Result<(), PortError> {
        self.table.upsert(booking)?;
        debug!(table = self.table.name(), booking_id = %booking.id, status = %booking.status, "Saved booking");
        Ok(())
    }

    fn find_by_premises(&self, premises_id: Uuid) -> Result<Vec<Booking>, PortError> {
        Ok(self
            .table
            .filter(|booking| booking.premises_id == premises_id)?)
    }

    fn find_by_bedspace(&self, bedspace_id: Uuid) -> Result<Vec<Booking>, PortError> {
        Ok(self
            .table
            .filter(|booking| booking.bedspace_id == bedspace_id)?)
    }

    fn find_future(
        &self,
        premises_id: Uuid,
        from: Date,
        statuses: &[BookingStatus],
    ) -> Result<Vec<Booking>, PortError> {
        let mut bookings: Vec<Booking> = self.table.filter(|booking| {
            booking.premises_id == premises_id
                && booking.departure_date >= from
                && statuses.contains(&booking.status)
        })?;
        bookings.sort_by_key(|booking| booking.arrival_date);
        Ok(bookings)
    }
}
