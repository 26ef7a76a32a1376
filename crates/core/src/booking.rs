// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The booking lifecycle.
//!
//! Each operation validates its inputs against the booking and its bedspace,
//! updates the booking, stores it and then emits the matching domain event.
//! Field errors are collected and returned together; nothing is stored when
//! any check fails.
//!
//! Arrival, departure and cancellation replace their existing record when
//! repeated and emit the "updated" event variant instead of the initial one.

use crate::best_effort::attempt_best_effort;
use crate::config::{DomainEventsConfig, REJECT_FUTURE_DEPARTURE, VALIDATE_ARRIVAL_BEFORE_BEDSPACE_START};
use crate::conflicts::{ProposedStay, check_stay_conflicts};
use crate::error::CoreError;
use crate::ports::{Assessment, Ports};
use crate::publisher::DomainEventPublisher;
use cas3_domain::{
    Arrival, Bedspace, Booking, BookingStatus, Cancellation, Confirmation, Departure, Extension,
    NonArrival, OccupantSummary, Premises, Reason, ReasonKind, ServiceScope, Turnaround, User,
    ValidationErrors,
};
use cas3_events::DomainEventBuilder;
use time::{Date, OffsetDateTime};
use tracing::{debug, info};
use uuid::Uuid;

/// Input for a new booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub crn: String,
    pub noms_number: Option<String>,
    pub arrival_date: Date,
    pub departure_date: Date,
    pub bedspace_id: Option<Uuid>,
    pub assessment_id: Option<Uuid>,
    /// Apply the premises' default turnaround instead of none.
    pub enable_turnaround: bool,
}

/// A future booking paired with what the requesting user may see of its occupant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FutureBooking {
    pub booking: Booking,
    pub occupant: OccupantSummary,
}

/// Drives bookings through their lifecycle.
pub struct BookingService {
    ports: Ports,
    publisher: DomainEventPublisher,
}

impl BookingService {
    pub fn new(ports: Ports, events: DomainEventsConfig) -> Self {
        let publisher: DomainEventPublisher =
            DomainEventPublisher::new(ports.domain_events.clone(), ports.event_bus.clone(), events);
        Self { ports, publisher }
    }

    fn now(&self) -> OffsetDateTime {
        self.ports.clock.now()
    }

    fn premises_for(&self, booking: &Booking) -> Result<Premises, CoreError> {
        self.ports
            .premises
            .find_by_id(booking.premises_id)?
            .ok_or_else(|| CoreError::not_found("Premises", booking.premises_id))
    }

    /// Looks up a reason and checks it belongs to temporary accommodation.
    fn find_reason(&self, kind: ReasonKind, id: Uuid) -> Result<ReasonLookup, CoreError> {
        Ok(match self.ports.reference_data.find_reason(kind, id)? {
            None => ReasonLookup::Missing,
            Some(reason) if !reason.service_scope.permits(ServiceScope::TemporaryAccommodation) => {
                ReasonLookup::WrongScope
            }
            Some(reason) => ReasonLookup::Found(reason),
        })
    }

    /// Creates a provisional booking.
    ///
    /// # Arguments
    ///
    /// * `user` - The user making the booking
    /// * `premises` - The premises the bedspace belongs to
    /// * `request` - Occupant, dates and bedspace
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for invalid fields, `CoreError::Conflict`
    /// when the bedspace is already taken for the dates, or a fatal error if
    /// the booking or its event cannot be stored.
    pub fn create_booking(
        &self,
        user: &User,
        premises: &Premises,
        request: NewBooking,
    ) -> Result<Booking, CoreError> {
        let mut errors: ValidationErrors = ValidationErrors::new();

        if request.bedspace_id.is_none() {
            errors.add("$.bedspaceId", "empty");
        }

        if request.departure_date <= request.arrival_date {
            errors.add("$.departureDate", "beforeBookingArrivalDate");
        }

        if let Some(bedspace_id) = request.bedspace_id {
            match self
                .ports
                .bedspaces
                .find_by_id(bedspace_id)?
                .filter(|bedspace| bedspace.premises_id == premises.id)
            {
                None => errors.add("$.bedspaceId", "doesNotExist"),
                Some(bedspace) => check_bedspace_window(&bedspace, &request, &mut errors),
            }
        }

        let mut assessment: Option<Assessment> = None;
        if let Some(assessment_id) = request.assessment_id {
            match self.ports.assessments.find(assessment_id) {
                Ok(Some(found)) => assessment = Some(found),
                Ok(None) => errors.add("$.assessmentId", "doesNotExist"),
                Err(err) => {
                    debug!(assessment_id = %assessment_id, error = %err, "Assessment lookup failed");
                    errors.add("$.assessmentId", "doesNotExist");
                }
            }
        }

        errors.into_result()?;

        // bedspace_id is present once validation has passed
        let bedspace_id: Uuid = request
            .bedspace_id
            .ok_or_else(|| CoreError::field("$.bedspaceId", "empty"))?;

        let turnaround_working_days: u32 = if request.enable_turnaround {
            premises.turnaround_working_days
        } else {
            0
        };

        check_stay_conflicts(
            self.ports.bookings.as_ref(),
            self.ports.void_bedspaces.as_ref(),
            self.ports.calendar.as_ref(),
            &ProposedStay {
                bedspace_id,
                arrival_date: request.arrival_date,
                departure_date: request.departure_date,
                turnaround_working_days,
                booking_id: None,
            },
        )?;

        let now: OffsetDateTime = self.now();
        let booking_id: Uuid = Uuid::new_v4();
        let booking: Booking = Booking {
            id: booking_id,
            crn: request.crn,
            noms_number: request.noms_number,
            premises_id: premises.id,
            bedspace_id,
            application_id: assessment.map(|found| found.application_id),
            assessment_id: assessment.map(|found| found.id),
            arrival_date: request.arrival_date,
            departure_date: request.departure_date,
            status: BookingStatus::Provisional,
            key_worker_staff_code: None,
            offender_name: None,
            created_at: now,
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
                created_at: now,
            }],
        };

        self.ports.bookings.save(&booking)?;
        info!(booking_id = %booking.id, bedspace_id = %bedspace_id, "Created provisional booking");

        self.publisher.publish(
            &DomainEventBuilder::new(now).booking_provisionally_made(&booking, premises, user),
        )?;

        if let Some(found) = assessment {
            attempt_best_effort(
                self.ports.error_reporter.as_ref(),
                "close assessment after booking",
                || self.ports.assessments.close(found.id, user),
            );
        }

        Ok(booking)
    }

    /// Records (or re-records) the occupant's arrival.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for invalid dates, `CoreError::Conflict`
    /// when the new dates clash, or a fatal error on storage failure.
    pub fn create_arrival(
        &self,
        user: &User,
        booking: &Booking,
        arrival_date: Date,
        expected_departure_date: Date,
        notes: Option<String>,
    ) -> Result<Booking, CoreError> {
        let mut errors: ValidationErrors = ValidationErrors::new();

        if expected_departure_date <= arrival_date {
            errors.add("$.expectedDepartureDate", "beforeBookingArrivalDate");
        }

        if self
            .ports
            .feature_flags
            .is_enabled(VALIDATE_ARRIVAL_BEFORE_BEDSPACE_START)
        {
            let bedspace: Option<Bedspace> = self.ports.bedspaces.find_by_id(booking.bedspace_id)?;
            if bedspace.is_some_and(|bedspace| arrival_date < bedspace.start_date) {
                errors.add("$.arrivalDate", "arrivalDateBeforeBedspaceStartDate");
            }
        }

        errors.into_result()?;

        check_stay_conflicts(
            self.ports.bookings.as_ref(),
            self.ports.void_bedspaces.as_ref(),
            self.ports.calendar.as_ref(),
            &ProposedStay {
                bedspace_id: booking.bedspace_id,
                arrival_date,
                departure_date: expected_departure_date,
                turnaround_working_days: booking.turnaround_working_days(),
                booking_id: Some(booking.id),
            },
        )?;

        let premises: Premises = self.premises_for(booking)?;
        let now: OffsetDateTime = self.now();
        let updated: bool = booking.arrival.is_some();

        let mut booking: Booking = booking.clone();
        let arrival: Arrival = Arrival {
            id: booking.arrival.as_ref().map_or_else(Uuid::new_v4, |existing| existing.id),
            arrival_date,
            expected_departure_date,
            notes,
            created_at: now,
        };
        booking.arrival_date = arrival_date;
        booking.departure_date = expected_departure_date;
        booking.status = BookingStatus::Arrived;
        booking.arrival = Some(arrival.clone());

        self.ports.bookings.save(&booking)?;
        info!(booking_id = %booking.id, updated, "Recorded arrival");

        self.publisher.publish(&DomainEventBuilder::new(now).person_arrived(
            &booking, &arrival, &premises, user, updated,
        ))?;

        Ok(booking)
    }

    /// Records (or re-records) the occupant's departure.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for an invalid time, reason or move-on
    /// category, or a fatal error on storage failure.
    pub fn create_departure(
        &self,
        user: &User,
        booking: &Booking,
        date_time: OffsetDateTime,
        reason_id: Uuid,
        move_on_category_id: Uuid,
        notes: Option<String>,
    ) -> Result<Booking, CoreError> {
        let mut errors: ValidationErrors = ValidationErrors::new();
        let now: OffsetDateTime = self.now();

        if date_time.date() < booking.arrival_date {
            errors.add("$.dateTime", "beforeBookingArrivalDate");
        }

        if self.ports.feature_flags.is_enabled(REJECT_FUTURE_DEPARTURE) && date_time > now {
            errors.add("$.dateTime", "departureDateInFuture");
        }

        let reason: Option<Reason> = match self.find_reason(ReasonKind::Departure, reason_id)? {
            ReasonLookup::Missing => {
                errors.add("$.reasonId", "doesNotExist");
                None
            }
            ReasonLookup::WrongScope => {
                errors.add("$.reasonId", "incorrectDepartureReasonServiceScope");
                None
            }
            ReasonLookup::Found(reason) => Some(reason),
        };

        let move_on_category: Option<Reason> =
            match self.find_reason(ReasonKind::MoveOnCategory, move_on_category_id)? {
                ReasonLookup::Missing => {
                    errors.add("$.moveOnCategoryId", "doesNotExist");
                    None
                }
                ReasonLookup::WrongScope => {
                    errors.add("$.moveOnCategoryId", "incorrectMoveOnCategoryServiceScope");
                    None
                }
                ReasonLookup::Found(category) => Some(category),
            };

        errors.into_result()?;
        let (Some(reason), Some(move_on_category)) = (reason, move_on_category) else {
            return Err(CoreError::field("$.reasonId", "doesNotExist"));
        };

        let premises: Premises = self.premises_for(booking)?;
        let updated: bool = booking.departure.is_some();

        let mut booking: Booking = booking.clone();
        let departure: Departure = Departure {
            id: booking.departure.as_ref().map_or_else(Uuid::new_v4, |existing| existing.id),
            date_time,
            reason_id,
            move_on_category_id,
            notes,
            created_at: now,
        };
        booking.departure_date = date_time.date();
        booking.status = BookingStatus::Departed;
        booking.departure = Some(departure.clone());

        self.ports.bookings.save(&booking)?;
        info!(booking_id = %booking.id, updated, "Recorded departure");

        self.publisher.publish(&DomainEventBuilder::new(now).person_departed(
            &booking,
            &departure,
            &reason,
            &move_on_category,
            &premises,
            user,
            updated,
        ))?;

        Ok(booking)
    }

    /// Records (or re-records) the cancellation of a booking.
    ///
    /// When the booking came from an application, its assessment is moved back
    /// to ready-to-place on a best-effort basis.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for an unknown reason, or a fatal error
    /// on storage failure. Assessment failures are reported, never returned.
    pub fn create_cancellation(
        &self,
        user: &User,
        booking: &Booking,
        cancelled_at: Date,
        reason_id: Uuid,
        notes: Option<String>,
    ) -> Result<Booking, CoreError> {
        let Some(reason) = self
            .ports
            .reference_data
            .find_reason(ReasonKind::Cancellation, reason_id)?
        else {
            return Err(CoreError::field("$.reason", "doesNotExist"));
        };

        let premises: Premises = self.premises_for(booking)?;
        let now: OffsetDateTime = self.now();
        let updated: bool = booking.cancellation.is_some();

        let mut booking: Booking = booking.clone();
        let cancellation: Cancellation = Cancellation {
            id: booking
                .cancellation
                .as_ref()
                .map_or_else(Uuid::new_v4, |existing| existing.id),
            date: cancelled_at,
            reason_id,
            notes,
            created_at: now,
        };
        booking.status = BookingStatus::Cancelled;
        booking.cancellation = Some(cancellation.clone());

        self.ports.bookings.save(&booking)?;
        info!(booking_id = %booking.id, updated, "Recorded cancellation");

        self.publisher.publish(&DomainEventBuilder::new(now).booking_cancelled(
            &booking,
            &cancellation,
            &reason,
            &premises,
            user,
            updated,
        ))?;

        if let Some(application_id) = booking.application_id {
            attempt_best_effort(
                self.ports.error_reporter.as_ref(),
                "accept assessment after cancellation",
                || match self.ports.assessments.find_by_application(application_id)? {
                    Some(assessment) => self.ports.assessments.accept(assessment.id, user),
                    None => Ok(()),
                },
            );
        }

        Ok(booking)
    }

    /// Confirms a booking.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::GeneralValidation` if the booking is already
    /// confirmed, or a fatal error on storage failure.
    pub fn create_confirmation(
        &self,
        user: &User,
        booking: &Booking,
        date_time: OffsetDateTime,
        notes: Option<String>,
    ) -> Result<Booking, CoreError> {
        if booking.confirmation.is_some() {
            return Err(CoreError::GeneralValidation(String::from(
                "This Booking already has a Confirmation set",
            )));
        }

        let premises: Premises = self.premises_for(booking)?;
        let now: OffsetDateTime = self.now();

        let mut booking: Booking = booking.clone();
        booking.status = BookingStatus::Confirmed;
        booking.confirmation = Some(Confirmation {
            id: Uuid::new_v4(),
            date_time,
            notes,
            created_at: now,
        });

        self.ports.bookings.save(&booking)?;
        info!(booking_id = %booking.id, "Confirmed booking");

        self.publisher
            .publish(&DomainEventBuilder::new(now).booking_confirmed(&booking, &premises, user))?;

        if let Some(assessment_id) = booking.assessment_id {
            attempt_best_effort(
                self.ports.error_reporter.as_ref(),
                "close assessment after confirmation",
                || self.ports.assessments.close(assessment_id, user),
            );
        }

        Ok(booking)
    }

    /// Moves the departure date, keeping the previous one in the extension history.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the new date is before arrival,
    /// `CoreError::Conflict` if the longer stay clashes, or a fatal error on
    /// storage failure.
    pub fn create_extension(
        &self,
        booking: &Booking,
        new_departure_date: Date,
        notes: Option<String>,
    ) -> Result<Booking, CoreError> {
        if new_departure_date < booking.arrival_date {
            return Err(CoreError::field("$.newDepartureDate", "beforeBookingArrivalDate"));
        }

        check_stay_conflicts(
            self.ports.bookings.as_ref(),
            self.ports.void_bedspaces.as_ref(),
            self.ports.calendar.as_ref(),
            &ProposedStay {
                bedspace_id: booking.bedspace_id,
                arrival_date: booking.arrival_date,
                departure_date: new_departure_date,
                turnaround_working_days: booking.turnaround_working_days(),
                booking_id: Some(booking.id),
            },
        )?;

        let mut booking: Booking = booking.clone();
        booking.extensions.push(Extension {
            id: Uuid::new_v4(),
            previous_departure_date: booking.departure_date,
            new_departure_date,
            notes,
            created_at: self.now(),
        });
        booking.departure_date = new_departure_date;

        self.ports.bookings.save(&booking)?;
        info!(booking_id = %booking.id, departure_date = %new_departure_date, "Extended booking");

        Ok(booking)
    }

    /// Replaces the current turnaround with one of `working_days`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a negative count,
    /// `CoreError::Conflict` if the longer turnaround clashes, or a fatal
    /// error on storage failure.
    pub fn create_turnaround(
        &self,
        booking: &Booking,
        working_days: i32,
    ) -> Result<Booking, CoreError> {
        let Ok(working_day_count) = u32::try_from(working_days) else {
            return Err(CoreError::field("$.workingDays", "isNotAPositiveInteger"));
        };

        check_stay_conflicts(
            self.ports.bookings.as_ref(),
            self.ports.void_bedspaces.as_ref(),
            self.ports.calendar.as_ref(),
            &ProposedStay {
                bedspace_id: booking.bedspace_id,
                arrival_date: booking.arrival_date,
                departure_date: booking.departure_date,
                turnaround_working_days: working_day_count,
                booking_id: Some(booking.id),
            },
        )?;

        let mut booking: Booking = booking.clone();
        booking.turnarounds.push(Turnaround {
            id: Uuid::new_v4(),
            booking_id: booking.id,
            working_day_count,
            created_at: self.now(),
        });

        self.ports.bookings.save(&booking)?;
        info!(booking_id = %booking.id, working_day_count, "Recorded turnaround");

        Ok(booking)
    }

    /// Records that the occupant never arrived.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a date before arrival or an
    /// unknown reason, or a fatal error on storage failure.
    pub fn create_non_arrival(
        &self,
        booking: &Booking,
        date: Date,
        reason_id: Uuid,
        notes: Option<String>,
    ) -> Result<Booking, CoreError> {
        let mut errors: ValidationErrors = ValidationErrors::new();

        if date < booking.arrival_date {
            errors.add("$.date", "beforeBookingArrivalDate");
        }

        if self
            .ports
            .reference_data
            .find_reason(ReasonKind::NonArrival, reason_id)?
            .is_none()
        {
            errors.add("$.reason", "doesNotExist");
        }

        errors.into_result()?;

        let mut booking: Booking = booking.clone();
        booking.non_arrival = Some(NonArrival {
            id: booking
                .non_arrival
                .as_ref()
                .map_or_else(Uuid::new_v4, |existing| existing.id),
            date,
            reason_id,
            notes,
            created_at: self.now(),
        });
        booking.status = BookingStatus::NotArrived;

        self.ports.bookings.save(&booking)?;
        info!(booking_id = %booking.id, "Recorded non-arrival");

        Ok(booking)
    }

    /// Fetches a booking, checking it belongs to `premises`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if there is no such booking at the premises.
    pub fn get_booking_for_premises(
        &self,
        premises: &Premises,
        booking_id: Uuid,
    ) -> Result<Booking, CoreError> {
        self.ports
            .bookings
            .find_by_id(booking_id)?
            .filter(|booking| booking.premises_id == premises.id)
            .ok_or_else(|| CoreError::not_found("Booking", booking_id))
    }

    /// Bookings at a premises that have not yet departed, with occupant summaries.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown premises,
    /// `CoreError::Unauthorized` if the user may not view it, or a fatal
    /// error if a lookup fails.
    pub fn find_future_bookings_for_premises(
        &self,
        premises_id: Uuid,
        statuses: &[BookingStatus],
        user: &User,
    ) -> Result<Vec<FutureBooking>, CoreError> {
        let premises: Premises = self
            .ports
            .premises
            .find_by_id(premises_id)?
            .ok_or_else(|| CoreError::not_found("Premises", premises_id))?;

        if !self.ports.user_access.can_view_premises(user, &premises) {
            return Err(CoreError::Unauthorized);
        }

        let bookings: Vec<Booking> =
            self.ports
                .bookings
                .find_future(premises_id, self.ports.clock.today(), statuses)?;

        let mut crns: Vec<String> = Vec::new();
        for booking in &bookings {
            if !crns.contains(&booking.crn) {
                crns.push(booking.crn.clone());
            }
        }

        let summaries: Vec<OccupantSummary> = if crns.is_empty() {
            Vec::new()
        } else {
            self.ports.occupants.get_summaries(&crns, user.lao_strategy)?
        };

        Ok(bookings
            .into_iter()
            .map(|booking| {
                let occupant: OccupantSummary = summaries
                    .iter()
                    .find(|summary| summary.crn() == booking.crn)
                    .cloned()
                    .unwrap_or_else(|| OccupantSummary::Unknown {
                        crn: booking.crn.clone(),
                    });
                FutureBooking { booking, occupant }
            })
            .collect())
    }
}

enum ReasonLookup {
    Missing,
    WrongScope,
    Found(Reason),
}

fn check_bedspace_window(bedspace: &Bedspace, request: &NewBooking, errors: &mut ValidationErrors) {
    if let Some(end_date) = bedspace.end_date {
        if end_date <= request.arrival_date {
            errors.add("$.bedspaceId", "bedspaceArchived");
        } else if request.departure_date > end_date {
            errors.add("$.departureDate", "bookingDepartureDateAfterBedspaceEndDate");
        }
    }

    if request.arrival_date < bedspace.start_date {
        errors.add("$.arrivalDate", "bookingArrivalDateBeforeBedspaceStartDate");
    }
}
