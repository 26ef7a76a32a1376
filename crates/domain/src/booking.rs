// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bookings and their outcome records.
//!
//! A booking is one person's stay in one bedspace. Outcomes (arrival,
//! departure, cancellation, confirmation, non-arrival) are held as at most
//! one current record each: recording the same outcome again replaces the
//! record rather than adding a second one. Extensions and turnarounds keep
//! their full history.

use crate::date_range::DateRange;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Lifecycle state of a booking.
///
/// Valid forward transitions are:
/// - Provisional → Confirmed → Arrived → Departed
/// - Provisional/Confirmed → `NotArrived`
/// - any non-terminal state → Cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BookingStatus {
    /// Initial state after creation.
    #[default]
    Provisional,
    /// Confirmed by the accommodation provider.
    Confirmed,
    /// The person has arrived.
    Arrived,
    /// The person has left.
    Departed,
    /// The booking was cancelled.
    Cancelled,
    /// The person never arrived.
    NotArrived,
}

impl BookingStatus {
    /// Converts this status to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Provisional => "provisional",
            Self::Confirmed => "confirmed",
            Self::Arrived => "arrived",
            Self::Departed => "departed",
            Self::Cancelled => "cancelled",
            Self::NotArrived => "not-arrived",
        }
    }

    /// Statuses in which the booking still holds (or will hold) the bedspace.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Provisional | Self::Confirmed | Self::Arrived)
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "provisional" => Ok(Self::Provisional),
            "confirmed" => Ok(Self::Confirmed),
            "arrived" => Ok(Self::Arrived),
            "departed" => Ok(Self::Departed),
            "cancelled" => Ok(Self::Cancelled),
            "not-arrived" => Ok(Self::NotArrived),
            _ => Err(DomainError::UnknownBookingStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Record of a person's arrival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrival {
    pub id: Uuid,
    pub arrival_date: Date,
    pub expected_departure_date: Date,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Record of a person's departure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Departure {
    pub id: Uuid,
    pub date_time: OffsetDateTime,
    pub reason_id: Uuid,
    pub move_on_category_id: Uuid,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Record of a booking cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cancellation {
    pub id: Uuid,
    pub date: Date,
    pub reason_id: Uuid,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Record of a booking confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub id: Uuid,
    pub date_time: OffsetDateTime,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Record of a person not arriving for their booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonArrival {
    pub id: Uuid,
    pub date: Date,
    pub reason_id: Uuid,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
}

/// A change to the booking's departure date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extension {
    pub id: Uuid,
    pub previous_departure_date: Date,
    pub new_departure_date: Date,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Working days the bedspace stays unavailable after departure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turnaround {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub working_day_count: u32,
    pub created_at: OffsetDateTime,
}

/// One person's stay in one bedspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Identity.
    pub id: Uuid,
    /// Case reference number of the occupant.
    pub crn: String,
    /// Prison (NOMS) number of the occupant, when known.
    pub noms_number: Option<String>,
    /// The premises the bedspace belongs to.
    pub premises_id: Uuid,
    /// The booked bedspace.
    pub bedspace_id: Uuid,
    /// Linked referral application, when the booking came from one.
    pub application_id: Option<Uuid>,
    /// Linked referral assessment, when the booking came from one.
    pub assessment_id: Option<Uuid>,
    pub arrival_date: Date,
    pub departure_date: Date,
    pub status: BookingStatus,
    pub key_worker_staff_code: Option<String>,
    pub offender_name: Option<String>,
    pub created_at: OffsetDateTime,
    pub arrival: Option<Arrival>,
    pub departure: Option<Departure>,
    pub cancellation: Option<Cancellation>,
    pub confirmation: Option<Confirmation>,
    pub non_arrival: Option<NonArrival>,
    pub extensions: Vec<Extension>,
    pub turnarounds: Vec<Turnaround>,
}

impl Booking {
    /// Returns whether the booking has been cancelled.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        self.cancellation.is_some()
    }

    /// The most recently recorded turnaround, if any.
    #[must_use]
    pub fn turnaround(&self) -> Option<&Turnaround> {
        self.turnarounds.last()
    }

    /// Working days of the current turnaround (zero when none is recorded).
    #[must_use]
    pub fn turnaround_working_days(&self) -> u32 {
        self.turnaround().map_or(0, |turnaround| turnaround.working_day_count)
    }

    /// The inclusive arrival-to-departure range, if the dates are ordered.
    #[must_use]
    pub fn stay(&self) -> Option<DateRange> {
        DateRange::new(self.arrival_date, self.departure_date).ok()
    }
}
