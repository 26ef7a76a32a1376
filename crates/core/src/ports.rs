// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Port traits for storage and external collaborators.
//!
//! Lookups return `Ok(None)` or an empty vector when nothing matches; no
//! port creates records implicitly. All calls are blocking.

use crate::error::{GatewayError, PortError};
use cas3_domain::{
    Bedspace, Booking, BookingStatus, Characteristic, LaoStrategy, LocalAuthorityArea,
    OccupantSummary, Premises, ProbationDeliveryUnit, ProbationRegion, Reason, ReasonKind, User,
    VoidBedspace,
};
use cas3_events::{DomainEvent, StoredDomainEvent};
use std::sync::Arc;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

// =============================================================================
// Repositories
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait BookingRepository: Send + Sync {
    fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, PortError>;
    fn save(&self, booking: &Booking) -> Result<(), PortError>;
    fn find_by_premises(&self, premises_id: Uuid) -> Result<Vec<Booking>, PortError>;
    fn find_by_bedspace(&self, bedspace_id: Uuid) -> Result<Vec<Booking>, PortError>;

    /// Bookings at the premises departing on or after `from` whose status is
    /// one of `statuses`.
    fn find_future(
        &self,
        premises_id: Uuid,
        from: Date,
        statuses: &[BookingStatus],
    ) -> Result<Vec<Booking>, PortError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait PremisesRepository: Send + Sync {
    fn find_by_id(&self, id: Uuid) -> Result<Option<Premises>, PortError>;
    fn save(&self, premises: &Premises) -> Result<(), PortError>;

    /// Whether a premises other than `excluding` already uses `name`.
    fn name_exists(&self, name: &str, excluding: Option<Uuid>) -> Result<bool, PortError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait BedspaceRepository: Send + Sync {
    fn find_by_id(&self, id: Uuid) -> Result<Option<Bedspace>, PortError>;
    fn find_by_premises(&self, premises_id: Uuid) -> Result<Vec<Bedspace>, PortError>;
    fn save(&self, bedspace: &Bedspace) -> Result<(), PortError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait VoidBedspaceRepository: Send + Sync {
    fn find_by_id(&self, id: Uuid) -> Result<Option<VoidBedspace>, PortError>;
    fn save(&self, void_bedspace: &VoidBedspace) -> Result<(), PortError>;
    fn find_by_premises(&self, premises_id: Uuid) -> Result<Vec<VoidBedspace>, PortError>;
    fn find_by_bedspace(&self, bedspace_id: Uuid) -> Result<Vec<VoidBedspace>, PortError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait ReferenceDataRepository: Send + Sync {
    fn find_reason(&self, kind: ReasonKind, id: Uuid) -> Result<Option<Reason>, PortError>;
    fn find_characteristic(&self, id: Uuid) -> Result<Option<Characteristic>, PortError>;
    fn find_probation_region(&self, id: Uuid) -> Result<Option<ProbationRegion>, PortError>;
    fn find_local_authority_area(&self, id: Uuid)
    -> Result<Option<LocalAuthorityArea>, PortError>;
    fn find_probation_delivery_unit(
        &self,
        id: Uuid,
    ) -> Result<Option<ProbationDeliveryUnit>, PortError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait DomainEventRepository: Send + Sync {
    fn save(&self, event: &DomainEvent) -> Result<(), PortError>;
    fn find_by_bedspace(&self, bedspace_id: Uuid) -> Result<Vec<StoredDomainEvent>, PortError>;

    /// Premises-level events only; bedspace events are found by bedspace.
    fn find_by_premises(&self, premises_id: Uuid) -> Result<Vec<StoredDomainEvent>, PortError>;

    /// Records that the scheduled change described by `event_id` was cancelled.
    fn mark_cancelled(&self, event_id: Uuid, at: OffsetDateTime) -> Result<(), PortError>;
}

// =============================================================================
// Collaborators
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait WorkingDayCalendar: Send + Sync {
    /// The date `working_days` working days after `date`.
    fn add_working_days(&self, date: Date, working_days: u32) -> Date;
}

#[cfg_attr(test, mockall::automock)]
pub trait OccupantLookup: Send + Sync {
    fn get_summaries(
        &self,
        crns: &[String],
        strategy: LaoStrategy,
    ) -> Result<Vec<OccupantSummary>, PortError>;
}

/// A referral assessment as seen by the booking engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    pub id: Uuid,
    pub application_id: Uuid,
}

#[cfg_attr(test, mockall::automock)]
pub trait AssessmentGateway: Send + Sync {
    fn find(&self, assessment_id: Uuid) -> Result<Option<Assessment>, GatewayError>;
    fn find_by_application(&self, application_id: Uuid)
    -> Result<Option<Assessment>, GatewayError>;

    /// Moves the assessment back to ready-to-place.
    fn accept(&self, assessment_id: Uuid, user: &User) -> Result<(), GatewayError>;
    fn close(&self, assessment_id: Uuid, user: &User) -> Result<(), GatewayError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait EventBus: Send + Sync {
    /// Publishes `payload` and returns the provider's message id.
    fn publish(&self, topic: &str, payload: &str) -> Result<String, PortError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait FeatureFlags: Send + Sync {
    fn is_enabled(&self, name: &str) -> bool;
}

#[cfg_attr(test, mockall::automock)]
pub trait ErrorReporter: Send + Sync {
    fn capture(&self, message: &str);
}

#[cfg_attr(test, mockall::automock)]
pub trait UserAccess: Send + Sync {
    fn can_view_premises(&self, user: &User, premises: &Premises) -> bool;
}

#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;

    fn today(&self) -> Date {
        self.now().date()
    }
}

/// Every port the services depend on.
#[derive(Clone)]
pub struct Ports {
    pub bookings: Arc<dyn BookingRepository>,
    pub premises: Arc<dyn PremisesRepository>,
    pub bedspaces: Arc<dyn BedspaceRepository>,
    pub void_bedspaces: Arc<dyn VoidBedspaceRepository>,
    pub reference_data: Arc<dyn ReferenceDataRepository>,
    pub domain_events: Arc<dyn DomainEventRepository>,
    pub calendar: Arc<dyn WorkingDayCalendar>,
    pub occupants: Arc<dyn OccupantLookup>,
    pub assessments: Arc<dyn AssessmentGateway>,
    pub event_bus: Arc<dyn EventBus>,
    pub feature_flags: Arc<dyn FeatureFlags>,
    pub error_reporter: Arc<dyn ErrorReporter>,
    pub user_access: Arc<dyn UserAccess>,
    pub clock: Arc<dyn Clock>,
}
