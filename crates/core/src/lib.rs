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

mod archive;
mod archive_history;
mod best_effort;
mod booking;
mod calendar;
mod clock;
mod config;
mod conflicts;
mod error;
mod ports;
mod premises;
mod publisher;
mod void_bedspace;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use archive_history::{
    ArchiveAction, ArchiveStatus, BedspaceArchiveHistory, replay_archive_history,
};
pub use best_effort::attempt_best_effort;
pub use booking::{BookingService, FutureBooking, NewBooking};
pub use calendar::WeekdayCalendar;
pub use clock::{FixedClock, SystemClock};
pub use config::{
    Cas3Config, ConfigError, DomainEventsConfig, REJECT_FUTURE_DEPARTURE, StaticFeatureFlags,
    VALIDATE_ARRIVAL_BEFORE_BEDSPACE_START,
};
pub use error::{CoreError, GatewayError, PortError};
pub use ports::{
    Assessment, AssessmentGateway, BedspaceRepository, BookingRepository, Clock,
    DomainEventRepository, ErrorReporter, EventBus, FeatureFlags, OccupantLookup, Ports,
    PremisesRepository, ReferenceDataRepository, UserAccess, VoidBedspaceRepository,
    WorkingDayCalendar,
};
pub use premises::{BedspaceDetails, NewBedspace, PremisesDetails, PremisesService};
pub use publisher::DomainEventPublisher;
pub use void_bedspace::VoidBedspaceDetails;
