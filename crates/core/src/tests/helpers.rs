// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ports::{
    MockAssessmentGateway, MockBedspaceRepository, MockBookingRepository,
    MockDomainEventRepository, MockErrorReporter, MockEventBus, MockOccupantLookup,
    MockPremisesRepository, MockReferenceDataRepository, MockUserAccess,
    MockVoidBedspaceRepository, Ports,
};
use crate::{DomainEventsConfig, FixedClock, StaticFeatureFlags, WeekdayCalendar};
use cas3_domain::{
    Booking, BookingStatus, LaoStrategy, Premises, PremisesStatus, Reason, ReasonKind,
    ServiceScope, User,
};
use std::sync::Arc;
use time::OffsetDateTime;
use time::macros::{date, datetime};
use uuid::Uuid;

pub fn now() -> OffsetDateTime {
    datetime!(2024-06-15 10:30 UTC)
}

/// Mocks for every port. A mock with no expectations panics when called.
#[derive(Default)]
pub struct MockPorts {
    pub bookings: MockBookingRepository,
    pub premises: MockPremisesRepository,
    pub bedspaces: MockBedspaceRepository,
    pub void_bedspaces: MockVoidBedspaceRepository,
    pub reference_data: MockReferenceDataRepository,
    pub domain_events: MockDomainEventRepository,
    pub occupants: MockOccupantLookup,
    pub assessments: MockAssessmentGateway,
    pub event_bus: MockEventBus,
    pub error_reporter: MockErrorReporter,
    pub user_access: MockUserAccess,
    pub feature_flags: StaticFeatureFlags,
}

impl MockPorts {
    pub fn into_ports(self) -> Ports {
        Ports {
            bookings: Arc::new(self.bookings),
            premises: Arc::new(self.premises),
            bedspaces: Arc::new(self.bedspaces),
            void_bedspaces: Arc::new(self.void_bedspaces),
            reference_data: Arc::new(self.reference_data),
            domain_events: Arc::new(self.domain_events),
            calendar: Arc::new(WeekdayCalendar::default()),
            occupants: Arc::new(self.occupants),
            assessments: Arc::new(self.assessments),
            event_bus: Arc::new(self.event_bus),
            feature_flags: Arc::new(self.feature_flags),
            error_reporter: Arc::new(self.error_reporter),
            user_access: Arc::new(self.user_access),
            clock: Arc::new(FixedClock::new(now())),
        }
    }
}

pub fn events_disabled() -> DomainEventsConfig {
    DomainEventsConfig::default()
}

pub fn events_enabled() -> DomainEventsConfig {
    DomainEventsConfig {
        publish_enabled: true,
        topic: String::from("cas3-domain-events"),
        detail_url_base: String::from("https://cas3.example"),
    }
}

pub fn create_test_user() -> User {
    User {
        id: Uuid::new_v4(),
        name: String::from("Jane Officer"),
        staff_code: Some(String::from("N54A999")),
        username: String::from("JANEOFFICER"),
        probation_region_id: Uuid::new_v4(),
        lao_strategy: LaoStrategy::CheckUserAccess,
    }
}

pub fn create_test_premises() -> Premises {
    Premises {
        id: Uuid::new_v4(),
        name: String::from("Hope House"),
        address_line1: String::from("1 Station Road"),
        address_line2: None,
        town: None,
        postcode: String::from("LS1 1AA"),
        probation_region_id: Uuid::new_v4(),
        local_authority_area_id: None,
        probation_delivery_unit_id: Uuid::new_v4(),
        characteristic_ids: Vec::new(),
        notes: None,
        status: PremisesStatus::Active,
        start_date: date!(2023 - 01 - 01),
        end_date: None,
        turnaround_working_days: 2,
        created_at: now(),
    }
}

pub fn create_test_booking(premises: &Premises) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        crn: String::from("X320741"),
        noms_number: None,
        premises_id: premises.id,
        bedspace_id: Uuid::new_v4(),
        application_id: None,
        assessment_id: None,
        arrival_date: date!(2024 - 06 - 10),
        departure_date: date!(2024 - 08 - 10),
        status: BookingStatus::Provisional,
        key_worker_staff_code: None,
        offender_name: None,
        created_at: now(),
        arrival: None,
        departure: None,
        cancellation: None,
        confirmation: None,
        non_arrival: None,
        extensions: Vec::new(),
        turnarounds: Vec::new(),
    }
}

pub fn reason(kind: ReasonKind, service_scope: ServiceScope) -> Reason {
    Reason {
        id: Uuid::new_v4(),
        kind,
        name: String::from("Other"),
        service_scope,
        is_active: true,
    }
}
