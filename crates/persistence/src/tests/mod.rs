// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod booking_lifecycle_tests;

use crate::InMemoryStore;
use cas3::{
    Assessment, AssessmentGateway, BedspaceRepository, BookingRepository, BookingService,
    CoreError, DomainEventsConfig, ErrorReporter, EventBus, FixedClock, GatewayError,
    OccupantLookup, PortError, Ports, PremisesRepository, PremisesService, StaticFeatureFlags,
    UserAccess, VoidBedspaceRepository, WeekdayCalendar,
};
use cas3_domain::{
    Bedspace, Booking, BookingStatus, Characteristic, LaoStrategy, LocalAuthorityArea, ModelScope,
    OccupantSummary, Premises, PremisesStatus, ProbationDeliveryUnit, ProbationRegion, Reason,
    ReasonKind, ServiceScope, Turnaround, User, ValidationErrors, VoidBedspace,
};
use cas3_events::{EventType, StoredDomainEvent};
use std::sync::{Arc, Mutex};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

pub const TODAY: Date = date!(2024 - 06 - 15);

pub fn now() -> OffsetDateTime {
    datetime!(2024-06-15 10:30 UTC)
}

/// Records every published message.
#[derive(Debug, Default)]
pub struct RecordingEventBus {
    pub messages: Mutex<Vec<(String, String)>>,
}

impl EventBus for RecordingEventBus {
    fn publish(&self, topic: &str, payload: &str) -> Result<String, PortError> {
        let mut messages = self.messages.lock().unwrap();
        messages.push((topic.to_string(), payload.to_string()));
        Ok(format!("msg-{}", messages.len()))
    }
}

#[derive(Debug, Default)]
pub struct RecordingErrorReporter {
    pub messages: Mutex<Vec<String>>,
}

impl ErrorReporter for RecordingErrorReporter {
    fn capture(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

pub struct AllowAllUserAccess;

impl UserAccess for AllowAllUserAccess {
    fn can_view_premises(&self, _user: &User, _premises: &Premises) -> bool {
        true
    }
}

/// Treats CRNs in `restricted` as limited-access offenders.
#[derive(Debug, Default)]
pub struct FakeOccupantLookup {
    pub restricted: Vec<String>,
}

impl OccupantLookup for FakeOccupantLookup {
    fn get_summaries(
        &self,
        crns: &[String],
        strategy: LaoStrategy,
    ) -> Result<Vec<OccupantSummary>, PortError> {
        Ok(crns
            .iter()
            .map(|crn| {
                if strategy == LaoStrategy::CheckUserAccess && self.restricted.contains(crn) {
                    OccupantSummary::Restricted { crn: crn.clone() }
                } else {
                    OccupantSummary::Full {
                        crn: crn.clone(),
                        name: format!("Person {crn}"),
                    }
                }
            })
            .collect())
    }
}

/// Holds assessments and records what was done to them.
#[derive(Debug, Default)]
pub struct FakeAssessmentGateway {
    pub assessments: Mutex<Vec<Assessment>>,
    pub accepted: Mutex<Vec<Uuid>>,
    pub closed: Mutex<Vec<Uuid>>,
    pub fail_with: Mutex<Option<GatewayError>>,
}

impl FakeAssessmentGateway {
    pub fn add(&self) -> Assessment {
        let assessment: Assessment = Assessment {
            id: Uuid::new_v4(),
            application_id: Uuid::new_v4(),
        };
        self.assessments.lock().unwrap().push(assessment);
        assessment
    }

    fn failure(&self) -> Result<(), GatewayError> {
        self.fail_with.lock().unwrap().clone().map_or(Ok(()), Err)
    }
}

impl AssessmentGateway for FakeAssessmentGateway {
    fn find(&self, assessment_id: Uuid) -> Result<Option<Assessment>, GatewayError> {
        Ok(self
            .assessments
            .lock()
            .unwrap()
            .iter()
            .find(|assessment| assessment.id == assessment_id)
            .copied())
    }

    fn find_by_application(
        &self,
        application_id: Uuid,
    ) -> Result<Option<Assessment>, GatewayError> {
        Ok(self
            .assessments
            .lock()
            .unwrap()
            .iter()
            .find(|assessment| assessment.application_id == application_id)
            .copied())
    }

    fn accept(&self, assessment_id: Uuid, _user: &User) -> Result<(), GatewayError> {
        self.failure()?;
        self.accepted.lock().unwrap().push(assessment_id);
        Ok(())
    }

    fn close(&self, assessment_id: Uuid, _user: &User) -> Result<(), GatewayError> {
        self.failure()?;
        self.closed.lock().unwrap().push(assessment_id);
        Ok(())
    }
}

/// Reference data seeded into every harness.
pub struct SeededReference {
    pub probation_region: ProbationRegion,
    pub delivery_unit: ProbationDeliveryUnit,
    pub local_authority_area: LocalAuthorityArea,
    pub cancellation_reason: Reason,
    pub departure_reason: Reason,
    pub move_on_category: Reason,
    pub non_arrival_reason: Reason,
    pub void_reason: Reason,
    pub premises_characteristic: Characteristic,
    pub room_characteristic: Characteristic,
    pub approved_premises_characteristic: Characteristic,
}

fn reason(kind: ReasonKind, name: &str) -> Reason {
    Reason {
        id: Uuid::new_v4(),
        kind,
        name: String::from(name),
        service_scope: ServiceScope::TemporaryAccommodation,
        is_active: true,
    }
}

fn characteristic(name: &str, model_scope: ModelScope, service_scope: ServiceScope) -> Characteristic {
    Characteristic {
        id: Uuid::new_v4(),
        name: String::from(name),
        model_scope,
        service_scope,
    }
}

impl SeededReference {
    fn seed(store: &InMemoryStore) -> Self {
        let probation_region: ProbationRegion = ProbationRegion {
            id: Uuid::new_v4(),
            name: String::from("Yorkshire and the Humber"),
        };
        let seeded: Self = Self {
            delivery_unit: ProbationDeliveryUnit {
                id: Uuid::new_v4(),
                name: String::from("Leeds"),
                probation_region_id: probation_region.id,
            },
            local_authority_area: LocalAuthorityArea {
                id: Uuid::new_v4(),
                identifier: String::from("E08000035"),
                name: String::from("Leeds"),
            },
            probation_region,
            cancellation_reason: reason(ReasonKind::Cancellation, "Recall"),
            departure_reason: reason(ReasonKind::Departure, "Planned move-on"),
            move_on_category: reason(ReasonKind::MoveOnCategory, "Rented accommodation"),
            non_arrival_reason: reason(ReasonKind::NonArrival, "Remanded in custody"),
            void_reason: reason(ReasonKind::VoidBedspace, "Repairs"),
            premises_characteristic: characteristic(
                "Wheelchair accessible",
                ModelScope::Premises,
                ServiceScope::TemporaryAccommodation,
            ),
            room_characteristic: characteristic(
                "Shared kitchen",
                ModelScope::Room,
                ServiceScope::Any,
            ),
            approved_premises_characteristic: characteristic(
                "Catered",
                ModelScope::Any,
                ServiceScope::ApprovedPremises,
            ),
        };

        let data = &store.reference_data;
        data.insert_probation_region(&seeded.probation_region).unwrap();
        data.insert_probation_delivery_unit(&seeded.delivery_unit)
            .unwrap();
        data.insert_local_authority_area(&seeded.local_authority_area)
            .unwrap();
        for reason in [
            &seeded.cancellation_reason,
            &seeded.departure_reason,
            &seeded.move_on_category,
            &seeded.non_arrival_reason,
            &seeded.void_reason,
        ] {
            data.insert_reason(reason).unwrap();
        }
        for characteristic in [
            &seeded.premises_characteristic,
            &seeded.room_characteristic,
            &seeded.approved_premises_characteristic,
        ] {
            data.insert_characteristic(characteristic).unwrap();
        }

        seeded
    }
}

/// Both services wired to one in-memory store, with a seeded premises.
pub struct Harness {
    pub store: InMemoryStore,
    pub bus: Arc<RecordingEventBus>,
    pub reporter: Arc<RecordingErrorReporter>,
    pub assessments: Arc<FakeAssessmentGateway>,
    pub bookings: BookingService,
    pub premises_service: PremisesService,
    pub reference: SeededReference,
    pub user: User,
    pub premises: Premises,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_flags(StaticFeatureFlags::default())
    }

    pub fn with_flags(flags: StaticFeatureFlags) -> Self {
        let store: InMemoryStore = InMemoryStore::new();
        let reference: SeededReference = SeededReference::seed(&store);
        let bus: Arc<RecordingEventBus> = Arc::new(RecordingEventBus::default());
        let reporter: Arc<RecordingErrorReporter> = Arc::new(RecordingErrorReporter::default());
        let assessments: Arc<FakeAssessmentGateway> = Arc::new(FakeAssessmentGateway::default());
        let occupants: Arc<FakeOccupantLookup> = Arc::new(FakeOccupantLookup {
            restricted: vec![String::from("R000001")],
        });

        let ports: Ports = Ports {
            bookings: store.bookings.clone(),
            premises: store.premises.clone(),
            bedspaces: store.bedspaces.clone(),
            void_bedspaces: store.void_bedspaces.clone(),
            reference_data: store.reference_data.clone(),
            domain_events: store.domain_events.clone(),
            calendar: Arc::new(WeekdayCalendar::default()),
            occupants,
            assessments: assessments.clone(),
            event_bus: bus.clone(),
            feature_flags: Arc::new(flags),
            error_reporter: reporter.clone(),
            user_access: Arc::new(AllowAllUserAccess),
            clock: Arc::new(FixedClock::new(now())),
        };
        let events: DomainEventsConfig = DomainEventsConfig {
            publish_enabled: true,
            topic: String::from("cas3-domain-events"),
            detail_url_base: String::from("https://cas3.example"),
        };

        let user: User = User {
            id: Uuid::new_v4(),
            name: String::from("Jane Officer"),
            staff_code: Some(String::from("N54A999")),
            username: String::from("JANEOFFICER"),
            probation_region_id: reference.probation_region.id,
            lao_strategy: LaoStrategy::CheckUserAccess,
        };

        let premises: Premises = Premises {
            id: Uuid::new_v4(),
            name: String::from("Hope House"),
            address_line1: String::from("1 Station Road"),
            address_line2: None,
            town: Some(String::from("Leeds")),
            postcode: String::from("LS1 1AA"),
            probation_region_id: reference.probation_region.id,
            local_authority_area_id: Some(reference.local_authority_area.id),
            probation_delivery_unit_id: reference.delivery_unit.id,
            characteristic_ids: Vec::new(),
            notes: None,
            status: PremisesStatus::Active,
            start_date: date!(2023 - 01 - 01),
            end_date: None,
            turnaround_working_days: 2,
            created_at: now(),
        };
        store.premises.save(&premises).unwrap();

        Self {
            bookings: BookingService::new(ports.clone(), events.clone()),
            premises_service: PremisesService::new(ports, events),
            store,
            bus,
            reporter,
            assessments,
            reference,
            user,
            premises,
        }
    }

    pub fn premises_now(&self) -> Premises {
        self.store
            .premises
            .find_by_id(self.premises.id)
            .unwrap()
            .unwrap()
    }

    pub fn bedspace_now(&self, bedspace_id: Uuid) -> Bedspace {
        self.store
            .bedspaces
            .find_by_id(bedspace_id)
            .unwrap()
            .unwrap()
    }

    pub fn booking_now(&self, booking_id: Uuid) -> Booking {
        self.store
            .bookings
            .find_by_id(booking_id)
            .unwrap()
            .unwrap()
    }

    /// Saves a bedspace directly, bypassing start date validation.
    pub fn add_bedspace(&self, reference: &str, start_date: Date, end_date: Option<Date>) -> Bedspace {
        let bedspace: Bedspace = Bedspace {
            id: Uuid::new_v4(),
            premises_id: self.premises.id,
            reference: String::from(reference),
            characteristic_ids: Vec::new(),
            notes: None,
            start_date,
            end_date,
            created_at: now(),
        };
        self.store.bedspaces.save(&bedspace).unwrap();
        bedspace
    }

    /// Saves a booking directly with the given turnaround.
    pub fn add_booking(
        &self,
        bedspace: &Bedspace,
        arrival_date: Date,
        departure_date: Date,
        turnaround_working_days: u32,
    ) -> Booking {
        let booking_id: Uuid = Uuid::new_v4();
        let booking: Booking = Booking {
            id: booking_id,
            crn: String::from("X320741"),
            noms_number: Some(String::from("A1234BC")),
            premises_id: self.premises.id,
            bedspace_id: bedspace.id,
            application_id: None,
            assessment_id: None,
            arrival_date,
            departure_date,
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
            turnarounds: vec![Turnaround {
                id: Uuid::new_v4(),
                booking_id,
                working_day_count: turnaround_working_days,
                created_at: now(),
            }],
        };
        self.store.bookings.save(&booking).unwrap();
        booking
    }

    /// Saves a void bedspace directly.
    pub fn add_void(&self, bedspace: &Bedspace, start_date: Date, end_date: Date) -> VoidBedspace {
        let void_bedspace: VoidBedspace = VoidBedspace {
            id: Uuid::new_v4(),
            premises_id: self.premises.id,
            bedspace_id: bedspace.id,
            start_date,
            end_date,
            reason_id: self.reference.void_reason.id,
            reference_number: None,
            notes: None,
            cancellation: None,
        };
        self.store.void_bedspaces.save(&void_bedspace).unwrap();
        void_bedspace
    }

    /// Stored events of one type, in the order they were stored.
    pub fn events_of(&self, event_type: EventType) -> Vec<StoredDomainEvent> {
        self.store
            .domain_events
            .all()
            .unwrap()
            .into_iter()
            .filter(|stored| stored.event.event_type == event_type)
            .collect()
    }

    pub fn published_count(&self) -> usize {
        self.bus.messages.lock().unwrap().len()
    }
}

/// The field errors of a validation failure.
pub fn field_errors(result: Result<impl std::fmt::Debug, CoreError>) -> ValidationErrors {
    match result {
        Err(CoreError::Validation(errors)) => errors,
        other => panic!("expected field errors, got {other:?}"),
    }
}
