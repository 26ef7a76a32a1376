// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Schema version stamped on every event payload.
pub const SCHEMA_VERSION: u32 = 1;

/// The kinds of domain event the engines emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    BookingProvisionallyMade,
    BookingConfirmed,
    BookingCancelled,
    BookingCancelledUpdated,
    PersonArrived,
    PersonArrivedUpdated,
    PersonDeparted,
    PersonDepartureUpdated,
    BedspaceArchived,
    BedspaceUnarchived,
    PremisesArchived,
    PremisesUnarchived,
}

impl EventType {
    /// The fully-qualified event type name used on the message bus.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BookingProvisionallyMade => "accommodation.cas3.booking.provisionally-made",
            Self::BookingConfirmed => "accommodation.cas3.booking.confirmed",
            Self::BookingCancelled => "accommodation.cas3.booking.cancelled",
            Self::BookingCancelledUpdated => "accommodation.cas3.booking.cancelled.updated",
            Self::PersonArrived => "accommodation.cas3.person.arrived",
            Self::PersonArrivedUpdated => "accommodation.cas3.person.arrived.updated",
            Self::PersonDeparted => "accommodation.cas3.person.departed",
            Self::PersonDepartureUpdated => "accommodation.cas3.person.departed.updated",
            Self::BedspaceArchived => "accommodation.cas3.bedspace.archived",
            Self::BedspaceUnarchived => "accommodation.cas3.bedspace.unarchived",
            Self::PremisesArchived => "accommodation.cas3.premises.archived",
            Self::PremisesUnarchived => "accommodation.cas3.premises.unarchived",
        }
    }

    /// Path segment used when building the event detail URL.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::BookingProvisionallyMade => "booking-provisionally-made",
            Self::BookingConfirmed => "booking-confirmed",
            Self::BookingCancelled => "booking-cancelled",
            Self::BookingCancelledUpdated => "booking-cancelled-updated",
            Self::PersonArrived => "person-arrived",
            Self::PersonArrivedUpdated => "person-arrived-updated",
            Self::PersonDeparted => "person-departed",
            Self::PersonDepartureUpdated => "person-departure-updated",
            Self::BedspaceArchived => "bedspace-archived",
            Self::BedspaceUnarchived => "bedspace-unarchived",
            Self::PremisesArchived => "premises-archived",
            Self::PremisesUnarchived => "premises-unarchived",
        }
    }

    /// Human-readable description sent with the published message.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::BookingProvisionallyMade => {
                "A booking has been provisionally made for a Transitional Accommodation premises"
            }
            Self::BookingConfirmed => {
                "A booking has been confirmed for a Transitional Accommodation premises"
            }
            Self::BookingCancelled => {
                "A booking for a Transitional Accommodation premises has been cancelled"
            }
            Self::BookingCancelledUpdated => {
                "A cancelled booking for a Transitional Accommodation premises has been updated"
            }
            Self::PersonArrived => {
                "Someone has arrived at a Transitional Accommodation premises for their booking"
            }
            Self::PersonArrivedUpdated => {
                "Someone has changed arrival date at a Transitional Accommodation premises for their booking"
            }
            Self::PersonDeparted => {
                "Someone has left a Transitional Accommodation premises"
            }
            Self::PersonDepartureUpdated => {
                "Person has updated departure date of Transitional Accommodation premises"
            }
            Self::BedspaceArchived => "A bedspace has been archived",
            Self::BedspaceUnarchived => "A bedspace has been unarchived",
            Self::PremisesArchived => "A premises has been archived",
            Self::PremisesUnarchived => "A premises has been unarchived",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The staff member recorded against an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    pub user_id: Uuid,
    pub staff_code: Option<String>,
    pub username: String,
    pub name: String,
}

/// Premises fields copied into booking events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremisesSummary {
    pub id: Uuid,
    pub name: String,
    pub address_line1: String,
    pub postcode: String,
    pub probation_region_id: Uuid,
}

/// Details shared by provisionally-made and confirmed events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDetails {
    pub booking_id: Uuid,
    pub bedspace_id: Uuid,
    pub premises: PremisesSummary,
    pub arrival_on: Date,
    pub expected_departure_on: Date,
    pub recorded_by: StaffMember,
}

/// Details of an arrival (or arrival update).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalDetails {
    pub booking_id: Uuid,
    pub premises: PremisesSummary,
    pub arrived_on: Date,
    pub expected_departure_on: Date,
    pub notes: Option<String>,
    pub recorded_by: StaffMember,
}

/// Details of a departure (or departure update).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartureDetails {
    pub booking_id: Uuid,
    pub premises: PremisesSummary,
    pub departed_at: OffsetDateTime,
    pub reason: String,
    pub move_on_category: String,
    pub notes: Option<String>,
    pub recorded_by: StaffMember,
}

/// Details of a cancellation (or cancellation update).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationDetails {
    pub booking_id: Uuid,
    pub premises: PremisesSummary,
    pub cancelled_on: Date,
    pub reason: String,
    pub notes: Option<String>,
    pub recorded_by: StaffMember,
}

/// A bedspace archive, with the end date it replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BedspaceArchiveDetails {
    pub bedspace_id: Uuid,
    pub premises_id: Uuid,
    pub end_date: Date,
    pub previous_end_date: Option<Date>,
    pub user_id: Uuid,
}

/// A bedspace restart, with the dates it replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BedspaceUnarchiveDetails {
    pub bedspace_id: Uuid,
    pub premises_id: Uuid,
    pub previous_start_date: Date,
    pub previous_end_date: Option<Date>,
    pub new_start_date: Date,
    pub user_id: Uuid,
}

/// A premises archive, with the end date it replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremisesArchiveDetails {
    pub premises_id: Uuid,
    pub end_date: Date,
    pub previous_end_date: Option<Date>,
    pub user_id: Uuid,
}

/// A premises restart, with the dates it replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremisesUnarchiveDetails {
    pub premises_id: Uuid,
    pub previous_start_date: Date,
    pub previous_end_date: Option<Date>,
    pub new_start_date: Date,
    pub user_id: Uuid,
}

/// Typed event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventDetails {
    Booking(BookingDetails),
    Arrival(ArrivalDetails),
    Departure(DepartureDetails),
    Cancellation(CancellationDetails),
    BedspaceArchive(BedspaceArchiveDetails),
    BedspaceUnarchive(BedspaceUnarchiveDetails),
    PremisesArchive(PremisesArchiveDetails),
    PremisesUnarchive(PremisesUnarchiveDetails),
}

/// An immutable record of a state change.
///
/// Every successful state-changing operation produces exactly one event per
/// entity it changed. Events are never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainEvent {
    pub id: Uuid,
    pub event_type: EventType,
    pub occurred_at: OffsetDateTime,
    pub application_id: Option<Uuid>,
    pub booking_id: Option<Uuid>,
    pub premises_id: Option<Uuid>,
    pub bedspace_id: Option<Uuid>,
    pub crn: Option<String>,
    pub noms_number: Option<String>,
    pub triggered_by_user_id: Option<Uuid>,
    pub schema_version: u32,
    pub details: EventDetails,
}

/// A persisted event together with store-level metadata.
///
/// A scheduled archive or unarchive that is later cancelled keeps its event;
/// the store records when it was cancelled so history replay can skip it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDomainEvent {
    pub event: DomainEvent,
    pub cancelled_at: Option<OffsetDateTime>,
}

impl StoredDomainEvent {
    /// Wraps a freshly persisted event.
    #[must_use]
    pub const fn new(event: DomainEvent) -> Self {
        Self {
            event,
            cancelled_at: None,
        }
    }

    /// Returns whether the scheduled change this event describes was cancelled.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        self.cancelled_at.is_some()
    }
}
