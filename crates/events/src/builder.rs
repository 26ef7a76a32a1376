// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Construction of domain events from entity graphs.
//!
//! The builder has no side effects: it reads the entities it is given and
//! returns a new event. Persisting and publishing is the publisher's job.
//! The only inputs besides the entities are the timestamp the builder was
//! created with and a freshly generated event id.

use crate::event::{
    ArrivalDetails, BedspaceArchiveDetails, BedspaceUnarchiveDetails, BookingDetails,
    CancellationDetails, DepartureDetails, DomainEvent, EventDetails, EventType,
    PremisesArchiveDetails, PremisesSummary, PremisesUnarchiveDetails, SCHEMA_VERSION,
    StaffMember,
};
use cas3_domain::{
    Arrival, Bedspace, Booking, Cancellation, Departure, Premises, Reason, User,
};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Builds domain events stamped with a fixed occurrence time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainEventBuilder {
    occurred_at: OffsetDateTime,
}

impl DomainEventBuilder {
    /// Creates a builder whose events occur at `occurred_at`.
    #[must_use]
    pub const fn new(occurred_at: OffsetDateTime) -> Self {
        Self { occurred_at }
    }

    /// Event for a newly created provisional booking.
    #[must_use]
    pub fn booking_provisionally_made(
        &self,
        booking: &Booking,
        premises: &Premises,
        user: &User,
    ) -> DomainEvent {
        self.booking_event(
            EventType::BookingProvisionallyMade,
            booking,
            EventDetails::Booking(booking_details(booking, premises, user)),
            user,
        )
    }

    /// Event for a confirmed booking.
    #[must_use]
    pub fn booking_confirmed(
        &self,
        booking: &Booking,
        premises: &Premises,
        user: &User,
    ) -> DomainEvent {
        self.booking_event(
            EventType::BookingConfirmed,
            booking,
            EventDetails::Booking(booking_details(booking, premises, user)),
            user,
        )
    }

    /// Event for a recorded arrival; `updated` selects the update variant.
    #[must_use]
    pub fn person_arrived(
        &self,
        booking: &Booking,
        arrival: &Arrival,
        premises: &Premises,
        user: &User,
        updated: bool,
    ) -> DomainEvent {
        let event_type: EventType = if updated {
            EventType::PersonArrivedUpdated
        } else {
            EventType::PersonArrived
        };

        let details: ArrivalDetails = ArrivalDetails {
            booking_id: booking.id,
            premises: premises_summary(premises),
            arrived_on: arrival.arrival_date,
            expected_departure_on: arrival.expected_departure_date,
            notes: arrival.notes.clone(),
            recorded_by: staff_member(user),
        };

        self.booking_event(event_type, booking, EventDetails::Arrival(details), user)
    }

    /// Event for a recorded departure; `updated` selects the update variant.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn person_departed(
        &self,
        booking: &Booking,
        departure: &Departure,
        reason: &Reason,
        move_on_category: &Reason,
        premises: &Premises,
        user: &User,
        updated: bool,
    ) -> DomainEvent {
        let event_type: EventType = if updated {
            EventType::PersonDepartureUpdated
        } else {
            EventType::PersonDeparted
        };

        let details: DepartureDetails = DepartureDetails {
            booking_id: booking.id,
            premises: premises_summary(premises),
            departed_at: departure.date_time,
            reason: reason.name.clone(),
            move_on_category: move_on_category.name.clone(),
            notes: departure.notes.clone(),
            recorded_by: staff_member(user),
        };

        self.booking_event(event_type, booking, EventDetails::Departure(details), user)
    }

    /// Event for a recorded cancellation; `updated` selects the update variant.
    #[must_use]
    pub fn booking_cancelled(
        &self,
        booking: &Booking,
        cancellation: &Cancellation,
        reason: &Reason,
        premises: &Premises,
        user: &User,
        updated: bool,
    ) -> DomainEvent {
        let event_type: EventType = if updated {
            EventType::BookingCancelledUpdated
        } else {
            EventType::BookingCancelled
        };

        let details: CancellationDetails = CancellationDetails {
            booking_id: booking.id,
            premises: premises_summary(premises),
            cancelled_on: cancellation.date,
            reason: reason.name.clone(),
            notes: cancellation.notes.clone(),
            recorded_by: staff_member(user),
        };

        self.booking_event(
            event_type,
            booking,
            EventDetails::Cancellation(details),
            user,
        )
    }

    /// Event for a bedspace whose end date has just been set.
    #[must_use]
    pub fn bedspace_archived(
        &self,
        bedspace: &Bedspace,
        end_date: Date,
        previous_end_date: Option<Date>,
        user: &User,
    ) -> DomainEvent {
        let details: BedspaceArchiveDetails = BedspaceArchiveDetails {
            bedspace_id: bedspace.id,
            premises_id: bedspace.premises_id,
            end_date,
            previous_end_date,
            user_id: user.id,
        };

        self.scheduling_event(
            EventType::BedspaceArchived,
            bedspace.premises_id,
            Some(bedspace.id),
            EventDetails::BedspaceArchive(details),
            user,
        )
    }

    /// Event for a bedspace brought back online from `new_start_date`.
    #[must_use]
    pub fn bedspace_unarchived(
        &self,
        bedspace: &Bedspace,
        previous_start_date: Date,
        previous_end_date: Option<Date>,
        new_start_date: Date,
        user: &User,
    ) -> DomainEvent {
        let details: BedspaceUnarchiveDetails = BedspaceUnarchiveDetails {
            bedspace_id: bedspace.id,
            premises_id: bedspace.premises_id,
            previous_start_date,
            previous_end_date,
            new_start_date,
            user_id: user.id,
        };

        self.scheduling_event(
            EventType::BedspaceUnarchived,
            bedspace.premises_id,
            Some(bedspace.id),
            EventDetails::BedspaceUnarchive(details),
            user,
        )
    }

    /// Event for a premises whose end date has just been set.
    #[must_use]
    pub fn premises_archived(
        &self,
        premises: &Premises,
        end_date: Date,
        previous_end_date: Option<Date>,
        user: &User,
    ) -> DomainEvent {
        let details: PremisesArchiveDetails = PremisesArchiveDetails {
            premises_id: premises.id,
            end_date,
            previous_end_date,
            user_id: user.id,
        };

        self.scheduling_event(
            EventType::PremisesArchived,
            premises.id,
            None,
            EventDetails::PremisesArchive(details),
            user,
        )
    }

    /// Event for a premises brought back online from `new_start_date`.
    #[must_use]
    pub fn premises_unarchived(
        &self,
        premises: &Premises,
        previous_start_date: Date,
        previous_end_date: Option<Date>,
        new_start_date: Date,
        user: &User,
    ) -> DomainEvent {
        let details: PremisesUnarchiveDetails = PremisesUnarchiveDetails {
            premises_id: premises.id,
            previous_start_date,
            previous_end_date,
            new_start_date,
            user_id: user.id,
        };

        self.scheduling_event(
            EventType::PremisesUnarchived,
            premises.id,
            None,
            EventDetails::PremisesUnarchive(details),
            user,
        )
    }

    fn booking_event(
        &self,
        event_type: EventType,
        booking: &Booking,
        details: EventDetails,
        user: &User,
    ) -> DomainEvent {
        DomainEvent {
            id: Uuid::new_v4(),
            event_type,
            occurred_at: self.occurred_at,
            application_id: booking.application_id,
            booking_id: Some(booking.id),
            premises_id: Some(booking.premises_id),
            bedspace_id: Some(booking.bedspace_id),
            crn: Some(booking.crn.clone()),
            noms_number: booking.noms_number.clone(),
            triggered_by_user_id: Some(user.id),
            schema_version: SCHEMA_VERSION,
            details,
        }
    }

    fn scheduling_event(
        &self,
        event_type: EventType,
        premises_id: Uuid,
        bedspace_id: Option<Uuid>,
        details: EventDetails,
        user: &User,
    ) -> DomainEvent {
        DomainEvent {
            id: Uuid::new_v4(),
            event_type,
            occurred_at: self.occurred_at,
            application_id: None,
            booking_id: None,
            premises_id: Some(premises_id),
            bedspace_id,
            crn: None,
            noms_number: None,
            triggered_by_user_id: Some(user.id),
            schema_version: SCHEMA_VERSION,
            details,
        }
    }
}

fn booking_details(booking: &Booking, premises: &Premises, user: &User) -> BookingDetails {
    BookingDetails {
        booking_id: booking.id,
        bedspace_id: booking.bedspace_id,
        premises: premises_summary(premises),
        arrival_on: booking.arrival_date,
        expected_departure_on: booking.departure_date,
        recorded_by: staff_member(user),
    }
}

fn premises_summary(premises: &Premises) -> PremisesSummary {
    PremisesSummary {
        id: premises.id,
        name: premises.name.clone(),
        address_line1: premises.address_line1.clone(),
        postcode: premises.postcode.clone(),
        probation_region_id: premises.probation_region_id,
    }
}

fn staff_member(user: &User) -> StaffMember {
    StaffMember {
        user_id: user.id,
        staff_code: user.staff_code.clone(),
        username: user.username.clone(),
        name: user.name.clone(),
    }
}
