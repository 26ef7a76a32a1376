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

mod availability;
mod booking;
mod date_range;
mod error;
mod premises;
mod reference;
mod types;
mod validation;
mod void_bedspace;

#[cfg(test)]
mod tests;

pub use availability::{Availability, calculate_availability};
pub use booking::{
    Arrival, Booking, BookingStatus, Cancellation, Confirmation, Departure, Extension, NonArrival,
    Turnaround,
};
pub use date_range::{
    DateRange, SCHEDULING_WINDOW_DAYS, WindowViolation, check_window, day_after, days_until,
    latest,
};
pub use error::DomainError;
pub use premises::{
    Bedspace, BedspaceStatus, Premises, PremisesCascade, PremisesStatus,
    recompute_premises_status,
};
pub use reference::{
    Characteristic, LocalAuthorityArea, ModelScope, ProbationDeliveryUnit, ProbationRegion,
    Reason, ReasonKind, ScopeMismatch, ServiceScope,
};
pub use types::{LaoStrategy, OccupantSummary, User};
pub use validation::{
    ConflictDetail, FieldError, MIN_BEDSPACE_REFERENCE_LENGTH, ValidationErrors,
    bedspace_reference_error,
};
pub use void_bedspace::{VoidBedspace, VoidBedspaceCancellation};
