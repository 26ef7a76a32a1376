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

mod builder;
mod envelope;
mod event;

#[cfg(test)]
mod tests;

pub use builder::DomainEventBuilder;
pub use envelope::{AdditionalInformation, EventEnvelope, PersonIdentifier};
pub use event::{
    ArrivalDetails, BedspaceArchiveDetails, BedspaceUnarchiveDetails, BookingDetails,
    CancellationDetails, DepartureDetails, DomainEvent, EventDetails, EventType,
    PremisesArchiveDetails, PremisesSummary, PremisesUnarchiveDetails, SCHEMA_VERSION,
    StaffMember, StoredDomainEvent,
};
