// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{Harness, TODAY, field_errors, now};
use cas3::{
    BedspaceRepository, BookingRepository, CoreError, GatewayError, NewBooking, REJECT_FUTURE_DEPARTURE,
    StaticFeatureFlags, VALIDATE_ARRIVAL_BEFORE_BEDSPACE_START,
};
use cas3_domain::{Bedspace, Booking, BookingStatus, OccupantSummary, ValidationErrors};
use cas3_events::EventType;
use time::macros::{date, datetime};
use uuid::Uuid;

fn new_booking(bedspace: &Bedspace) -> NewBooking {
    NewBooking {
        crn: String::from("X320741"),
        noms_number: Some(String::from("A1234BC")),
        arrival_date: date!(2024 - 06 - 20),
        departure_date: date!(2024 - 07 - 20),
        bedspace_id: Some(bedspace.id),
        assessment_id: None,
        enable_turnaround: true,
    }
}

#[test]
fn test_create_booking_stores_provisional_booking_with_default_turnaround() {
    let harness = Harness::new();
    let bedspace = harness.add_bedspace("Room 1", date!(2024 - 01 - 01), None);

    let booking: Booking = harness
        .bookings
        .create_booking(&harness.user, &harness.premises, new_booking(&bedspace))
        .unwrap();

    assert_eq!(booking.status, BookingStatus::Provisional);
    assert_eq!(booking.turnarounds.len(), 1);
    assert_eq!(booking.turnaround_working_days(), 2);
    assert_eq!(harness.booking_now(booking.id), booking);
    assert_eq!(harness.events_of(EventType::BookingProvisionallyMade).len(), 1);
    assert_eq!(harness.published_count(), 1);
}

#[test]
fn test_create_booking_without_turnaround_records_zero_days() {
    let harness = Harness::new();
    let bedspace = harness.add_bedspace("Room 1", date!(2024 - 01 - 01), None);

    let booking: Booking = harness
        .bookings
        .create_booking(
            &harness.user,
            &harness.premises,
            NewBooking {
                enable_turnaround: false,
                ..new_booking(&bedspace)
            },
        )
        .unwrap();

    assert_eq!(booking.turnarounds.len(), 1);
    assert_eq!(booking.turnaround_working_days(), 0);
}

#[test]
fn test_create_booking_collects_field_errors_and_stores_nothing() {
    let harness = Harness::new();

    let errors: ValidationErrors = field_errors(harness.bookings.create_booking(
        &harness.user,
        &harness.premises,
        NewBooking {
            crn: String::from("X320741"),
            noms_number: None,
            arrival_date: date!(2024 - 06 - 20),
            departure_date: date!(2024 - 06 - 20),
            bedspace_id: None,
            assessment_id: Some(Uuid::new_v4()),
            enable_turnaround: true,
        },
    ));

    assert!(errors.has("$.bedspaceId", "empty"));
    assert!(errors.has("$.departureDate", "beforeBookingArrivalDate"));
    assert!(errors.has("$.assessmentId", "doesNotExist"));
    assert!(
        harness
            .store
            .bookings
            .find_by_premises(harness.premises.id)
            .unwrap()
            .is_empty()
    );
    assert_eq!(harness.published_count(), 0);
}

#[test]
fn test_create_booking_rejects_bedspace_from_another_premises() {
    let harness = Harness::new();
    let other = Harness::new();
    let bedspace = other.add_bedspace("Room 1", date!(2024 - 01 - 01), None);
    harness.store.bedspaces.save(&bedspace).unwrap();

    let errors: ValidationErrors = field_errors(harness.bookings.create_booking(
        &harness.user,
        &harness.premises,
        new_booking(&bedspace),
    ));

    assert!(errors.has("$.bedspaceId", "doesNotExist"));
}

#[test]
fn test_create_booking_checks_bedspace_dates() {
    let harness = Harness::new();
    let archived = harness.add_bedspace("Room 1", date!(2024 - 01 - 01), Some(date!(2024 - 06 - 10)));
    let ending = harness.add_bedspace("Room 2", date!(2024 - 01 - 01), Some(date!(2024 - 07 - 01)));
    let upcoming = harness.add_bedspace("Room 3", date!(2024 - 07 - 01), None);

    let errors: ValidationErrors = field_errors(harness.bookings.create_booking(
        &harness.user,
        &harness.premises,
        new_booking(&archived),
    ));
    assert!(errors.has("$.bedspaceId", "bedspaceArchived"));

    let errors: ValidationErrors = field_errors(harness.bookings.create_booking(
        &harness.user,
        &harness.premises,
        new_booking(&ending),
    ));
    assert!(errors.has("$.departureDate", "bookingDepartureDateAfterBedspaceEndDate"));

    let errors: ValidationErrors = field_errors(harness.bookings.create_booking(
        &harness.user,
        &harness.premises,
        new_booking(&upcoming),
    ));
    assert!(errors.has("$.arrivalDate", "bookingArrivalDateBeforeBedspaceStartDate"));
}

#[test]
fn test_create_booking_links_and_closes_assessment() {
    let harness = Harness::new();
    let bedspace = harness.add_bedspace("Room 1", date!(2024 - 01 - 01), None);
    let assessment = harness.assessments.add();

    let booking: Booking = harness
        .bookings
        .create_booking(
            &harness.user,
            &harness.premises,
            NewBooking {
                assessment_id: Some(assessment.id),
                ..new_booking(&bedspace)
            },
        )
        .unwrap();

    assert_eq!(booking.assessment_id, Some(assessment.id));
    assert_eq!(booking.application_id, Some(assessment.application_id));
    assert_eq!(*harness.assessments.closed.lock().unwrap(), vec![assessment.id]);
    assert!(harness.reporter.messages.lock().unwrap().is_empty());
}

#[test]
fn test_create_booking_succeeds_when_closing_assessment_fails() {
    let harness = Harness::new();
    let bedspace = harness.add_bedspace("Room 1", date!(2024 - 01 - 01), None);
    let assessment = harness.assessments.add();
    *harness.assessments.fail_with.lock().unwrap() =
        Some(GatewayError::Unexpected(String::from("connection reset")));

    let booking: Booking = harness
        .bookings
        .create_booking(
            &harness.user,
            &harness.premises,
            NewBooking {
                assessment_id: Some(assessment.id),
                ..new_booking(&bedspace)
            },
        )
        .unwrap();

    assert_eq!(harness.booking_now(booking.id).status, BookingStatus::Provisional);
    let reported = harness.reporter.messages.lock().unwrap();
    assert_eq!(reported.len(), 1);
    assert!(reported[0].contains("connection reset"));
}

#[test]
fn test_create_booking_conflicts_with_turnaround_of_existing_booking() {
    let harness = Harness::new();
    let bedspace = harness.add_bedspace("Room 1", date!(2024 - 01 - 01), None);
    // Departs Monday 1 July, unavailable until Wednesday 3 July.
    let existing = harness.add_booking(&bedspace, date!(2024 - 06 - 20), date!(2024 - 07 - 01), 2);

    let clash = harness.bookings.create_booking(
        &harness.user,
        &harness.premises,
        NewBooking {
            arrival_date: date!(2024 - 07 - 03),
            departure_date: date!(2024 - 07 - 10),
            ..new_booking(&bedspace)
        },
    );
    match clash {
        Err(CoreError::Conflict { entity_id, message }) => {
            assert_eq!(entity_id, existing.id);
            assert!(message.starts_with("A Booking already exists"));
        }
        other => panic!("expected a conflict, got {other:?}"),
    }

    harness
        .bookings
        .create_booking(
            &harness.user,
            &harness.premises,
            NewBooking {
                arrival_date: date!(2024 - 07 - 04),
                departure_date: date!(2024 - 07 - 10),
                ..new_booking(&bedspace)
            },
        )
        .unwrap();
}

#[test]
fn test_cancelled_booking_never_conflicts() {
    let harness = Harness::new();
    let bedspace = harness.add_bedspace("Room 1", date!(2024 - 01 - 01), None);
    let existing = harness.add_booking(&bedspace, date!(2024 - 06 - 20), date!(2024 - 07 - 20), 0);
    harness
        .bookings
        .create_cancellation(
            &harness.user,
            &existing,
            TODAY,
            harness.reference.cancellation_reason.id,
            None,
        )
        .unwrap();

    harness
        .bookings
        .create_booking(&harness.user, &harness.premises, new_booking(&bedspace))
        .unwrap();
}

#[test]
fn test_create_booking_conflicts_with_void_bedspace() {
    let harness = Harness::new();
    let bedspace = harness.add_bedspace("Room 1", date!(2024 - 01 - 01), None);
    let void_bedspace = harness.add_void(&bedspace, date!(2024 - 07 - 15), date!(2024 - 07 - 25));

    match harness
        .bookings
        .create_booking(&harness.user, &harness.premises, new_booking(&bedspace))
    {
        Err(CoreError::Conflict { entity_id, message }) => {
            assert_eq!(entity_id, void_bedspace.id);
            assert!(message.starts_with("A Void Bedspace already exists"));
        }
        other => panic!("expected a conflict, got {other:?}"),
    }
}

#[test]
fn test_repeated_arrival_updates_single_record() {
    let harness = Harness::new();
    let bedspace = harness.add_bedspace("Room 1", date!(2024 - 01 - 01), None);
    let booking = harness.add_booking(&bedspace, date!(2024 - 06 - 10), date!(2024 - 07 - 10), 0);

    let arrived: Booking = harness
        .bookings
        .create_arrival(&harness.user, &booking, date!(2024 - 06 - 11), date!(2024 - 07 - 12), None)
        .unwrap();
    let corrected: Booking = harness
        .bookings
        .create_arrival(
            &harness.user,
            &arrived,
            date!(2024 - 06 - 12),
            date!(2024 - 07 - 12),
            Some(String::from("Arrived a day later")),
        )
        .unwrap();

    let first = arrived.arrival.unwrap();
    let second = corrected.arrival.clone().unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(corrected.status, BookingStatus::Arrived);
    assert_eq!(corrected.arrival_date, date!(2024 - 06 - 12));
    assert_eq!(corrected.departure_date, date!(2024 - 07 - 12));
    assert_eq!(harness.events_of(EventType::PersonArrived).len(), 1);
    assert_eq!(harness.events_of(EventType::PersonArrivedUpdated).len(), 1);
}

#[test]
fn test_arrival_rejects_departure_before_arrival() {
    let harness = Harness::new();
    let bedspace = harness.add_bedspace("Room 1", date!(2024 - 01 - 01), None);
    let booking = harness.add_booking(&bedspace, date!(2024 - 06 - 10), date!(2024 - 07 - 10), 0);

    let errors: ValidationErrors = field_errors(harness.bookings.create_arrival(
        &harness.user,
        &booking,
        date!(2024 - 06 - 12),
        date!(2024 - 06 - 11),
        None,
    ));

    assert!(errors.has("$.expectedDepartureDate", "beforeBookingArrivalDate"));
    assert_eq!(harness.booking_now(booking.id).status, BookingStatus::Provisional);
}

#[test]
fn test_arrival_rejects_same_day_expected_departure() {
    let harness = Harness::new();
    let bedspace = harness.add_bedspace("Room 1", date!(2024 - 01 - 01), None);
    let booking = harness.add_booking(&bedspace, date!(2024 - 06 - 10), date!(2024 - 07 - 10), 0);

    let errors: ValidationErrors = field_errors(harness.bookings.create_arrival(
        &harness.user,
        &booking,
        date!(2024 - 06 - 12),
        date!(2024 - 06 - 12),
        None,
    ));

    assert!(errors.has("$.expectedDepartureDate", "beforeBookingArrivalDate"));
    assert!(harness.booking_now(booking.id).arrival.is_none());

    let arrived: Booking = harness
        .bookings
        .create_arrival(&harness.user, &booking, date!(2024 - 06 - 12), date!(2024 - 06 - 13), None)
        .unwrap();
    assert_eq!(arrived.departure_date, date!(2024 - 06 - 13));
}

#[test]
fn test_arrival_before_bedspace_start_is_rejected_only_when_flag_enabled() {
    let strict = Harness::with_flags(
        StaticFeatureFlags::default().with(VALIDATE_ARRIVAL_BEFORE_BEDSPACE_START, true),
    );
    let bedspace = strict.add_bedspace("Room 1", date!(2024 - 06 - 12), None);
    let booking = strict.add_booking(&bedspace, date!(2024 - 06 - 12), date!(2024 - 07 - 10), 0);

    let errors: ValidationErrors = field_errors(strict.bookings.create_arrival(
        &strict.user,
        &booking,
        date!(2024 - 06 - 11),
        date!(2024 - 07 - 10),
        None,
    ));
    assert!(errors.has("$.arrivalDate", "arrivalDateBeforeBedspaceStartDate"));

    let lenient = Harness::new();
    let bedspace = lenient.add_bedspace("Room 1", date!(2024 - 06 - 12), None);
    let booking = lenient.add_booking(&bedspace, date!(2024 - 06 - 12), date!(2024 - 07 - 10), 0);
    lenient
        .bookings
        .create_arrival(&lenient.user, &booking, date!(2024 - 06 - 11), date!(2024 - 07 - 10), None)
        .unwrap();
}

#[test]
fn test_repeated_departure_updates_single_record() {
    let harness = Harness::new();
    let bedspace = harness.add_bedspace("Room 1", date!(2024 - 01 - 01), None);
    let booking = harness.add_booking(&bedspace, date!(2024 - 06 - 01), date!(2024 - 06 - 20), 0);

    let departed: Booking = harness
        .bookings
        .create_departure(
            &harness.user,
            &booking,
            datetime!(2024-06-14 09:00 UTC),
            harness.reference.departure_reason.id,
            harness.reference.move_on_category.id,
            None,
        )
        .unwrap();
    let corrected: Booking = harness
        .bookings
        .create_departure(
            &harness.user,
            &departed,
            datetime!(2024-06-13 17:00 UTC),
            harness.reference.departure_reason.id,
            harness.reference.move_on_category.id,
            Some(String::from("Left the evening before")),
        )
        .unwrap();

    assert_eq!(
        departed.departure.unwrap().id,
        corrected.departure.clone().unwrap().id
    );
    assert_eq!(corrected.status, BookingStatus::Departed);
    assert_eq!(corrected.departure_date, date!(2024 - 06 - 13));
    assert_eq!(harness.booking_now(booking.id), corrected);
    assert_eq!(harness.events_of(EventType::PersonDeparted).len(), 1);
    assert_eq!(harness.events_of(EventType::PersonDepartureUpdated).len(), 1);
}

#[test]
fn test_departure_validates_time_and_reasons() {
    let harness = Harness::new();
    let bedspace = harness.add_bedspace("Room 1", date!(2024 - 01 - 01), None);
    let booking = harness.add_booking(&bedspace, date!(2024 - 06 - 10), date!(2024 - 06 - 20), 0);

    let errors: ValidationErrors = field_errors(harness.bookings.create_departure(
        &harness.user,
        &booking,
        datetime!(2024-06-09 09:00 UTC),
        Uuid::new_v4(),
        harness.reference.departure_reason.id,
        None,
    ));

    assert!(errors.has("$.dateTime", "beforeBookingArrivalDate"));
    assert!(errors.has("$.reasonId", "doesNotExist"));
    assert!(errors.has("$.moveOnCategoryId", "doesNotExist"));
    assert!(harness.booking_now(booking.id).departure.is_none());
}

#[test]
fn test_future_departure_is_rejected_only_when_flag_enabled() {
    let strict = Harness::with_flags(StaticFeatureFlags::default().with(REJECT_FUTURE_DEPARTURE, true));
    let bedspace = strict.add_bedspace("Room 1", date!(2024 - 01 - 01), None);
    let booking = strict.add_booking(&bedspace, date!(2024 - 06 - 10), date!(2024 - 06 - 20), 0);

    let errors: ValidationErrors = field_errors(strict.bookings.create_departure(
        &strict.user,
        &booking,
        datetime!(2024-06-16 09:00 UTC),
        strict.reference.departure_reason.id,
        strict.reference.move_on_category.id,
        None,
    ));
    assert!(errors.has("$.dateTime", "departureDateInFuture"));

    let lenient = Harness::new();
    let bedspace = lenient.add_bedspace("Room 1", date!(2024 - 01 - 01), None);
    let booking = lenient.add_booking(&bedspace, date!(2024 - 06 - 10), date!(2024 - 06 - 20), 0);
    lenient
        .bookings
        .create_departure(
            &lenient.user,
            &booking,
            datetime!(2024-06-16 09:00 UTC),
            lenient.reference.departure_reason.id,
            lenient.reference.move_on_category.id,
            None,
        )
        .unwrap();
}

#[test]
fn test_cancellation_without_assessment_never_calls_gateway() {
    let harness = Harness::new();
    let bedspace = harness.add_bedspace("Room 1", date!(2024 - 01 - 01), None);
    let booking = harness.add_booking(&bedspace, date!(2024 - 06 - 20), date!(2024 - 07 - 20), 0);
    harness.assessments.add();

    let cancelled: Booking = harness
        .bookings
        .create_cancellation(
            &harness.user,
            &booking,
            TODAY,
            harness.reference.cancellation_reason.id,
            None,
        )
        .unwrap();

    assert_eq!(cancelled.status, BookingStatus::Cancelled);
    assert!(harness.assessments.accepted.lock().unwrap().is_empty());
    assert!(harness.reporter.messages.lock().unwrap().is_empty());
    assert_eq!(harness.events_of(EventType::BookingCancelled).len(), 1);
}

#[test]
fn test_cancellation_accepts_linked_assessment_and_repeat_updates() {
    let harness = Harness::new();
    let bedspace = harness.add_bedspace("Room 1", date!(2024 - 01 - 01), None);
    let assessment = harness.assessments.add();
    let mut booking = harness.add_booking(&bedspace, date!(2024 - 06 - 20), date!(2024 - 07 - 20), 0);
    booking.application_id = Some(assessment.application_id);
    harness.store.bookings.save(&booking).unwrap();

    let cancelled: Booking = harness
        .bookings
        .create_cancellation(
            &harness.user,
            &booking,
            TODAY,
            harness.reference.cancellation_reason.id,
            None,
        )
        .unwrap();
    let updated: Booking = harness
        .bookings
        .create_cancellation(
            &harness.user,
            &cancelled,
            date!(2024 - 06 - 14),
            harness.reference.cancellation_reason.id,
            Some(String::from("Backdated")),
        )
        .unwrap();

    assert_eq!(
        cancelled.cancellation.unwrap().id,
        updated.cancellation.unwrap().id
    );
    assert_eq!(harness.events_of(EventType::BookingCancelled).len(), 1);
    assert_eq!(harness.events_of(EventType::BookingCancelledUpdated).len(), 1);
    assert_eq!(
        *harness.assessments.accepted.lock().unwrap(),
        vec![assessment.id, assessment.id]
    );
}

#[test]
fn test_cancellation_with_unknown_reason_fails() {
    let harness = Harness::new();
    let bedspace = harness.add_bedspace("Room 1", date!(2024 - 01 - 01), None);
    let booking = harness.add_booking(&bedspace, date!(2024 - 06 - 20), date!(2024 - 07 - 20), 0);

    let errors: ValidationErrors = field_errors(harness.bookings.create_cancellation(
        &harness.user,
        &booking,
        TODAY,
        harness.reference.departure_reason.id,
        None,
    ));

    assert!(errors.has("$.reason", "doesNotExist"));
    assert!(!harness.booking_now(booking.id).is_cancelled());
}

#[test]
fn test_cancellation_survives_assessment_failure() {
    let harness = Harness::new();
    let bedspace = harness.add_bedspace("Room 1", date!(2024 - 01 - 01), None);
    let assessment = harness.assessments.add();
    let mut booking = harness.add_booking(&bedspace, date!(2024 - 06 - 20), date!(2024 - 07 - 20), 0);
    booking.application_id = Some(assessment.application_id);
    harness.store.bookings.save(&booking).unwrap();
    *harness.assessments.fail_with.lock().unwrap() = Some(GatewayError::Unauthorized);

    harness
        .bookings
        .create_cancellation(
            &harness.user,
            &booking,
            TODAY,
            harness.reference.cancellation_reason.id,
            None,
        )
        .unwrap();

    assert!(harness.booking_now(booking.id).is_cancelled());
    assert_eq!(harness.reporter.messages.lock().unwrap().len(), 1);
}

#[test]
fn test_confirmation_closes_assessment_once() {
    let harness = Harness::new();
    let bedspace = harness.add_bedspace("Room 1", date!(2024 - 01 - 01), None);
    let assessment = harness.assessments.add();
    let mut booking = harness.add_booking(&bedspace, date!(2024 - 06 - 20), date!(2024 - 07 - 20), 0);
    booking.assessment_id = Some(assessment.id);
    harness.store.bookings.save(&booking).unwrap();

    let confirmed: Booking = harness
        .bookings
        .create_confirmation(&harness.user, &booking, now(), None)
        .unwrap();

    assert_eq!(confirmed.status, BookingStatus::Confirmed);
    assert_eq!(harness.events_of(EventType::BookingConfirmed).len(), 1);
    assert_eq!(*harness.assessments.closed.lock().unwrap(), vec![assessment.id]);

    match harness
        .bookings
        .create_confirmation(&harness.user, &confirmed, now(), None)
    {
        Err(CoreError::GeneralValidation(message)) => {
            assert_eq!(message, "This Booking already has a Confirmation set");
        }
        other => panic!("expected a general validation error, got {other:?}"),
    }
}

#[test]
fn test_extension_records_previous_departure_date() {
    let harness = Harness::new();
    let bedspace = harness.add_bedspace("Room 1", date!(2022 - 01 - 01), None);
    let booking = harness.add_booking(&bedspace, date!(2022 - 08 - 10), date!(2022 - 08 - 26), 0);

    let extended: Booking = harness
        .bookings
        .create_extension(&booking, date!(2022 - 08 - 25), None)
        .unwrap();

    assert_eq!(extended.departure_date, date!(2022 - 08 - 25));
    assert_eq!(extended.extensions.len(), 1);
    assert_eq!(extended.extensions[0].previous_departure_date, date!(2022 - 08 - 26));
    assert_eq!(extended.extensions[0].new_departure_date, date!(2022 - 08 - 25));
    assert_eq!(harness.booking_now(booking.id), extended);
}

#[test]
fn test_extension_before_arrival_is_rejected() {
    let harness = Harness::new();
    let bedspace = harness.add_bedspace("Room 1", date!(2022 - 01 - 01), None);
    let booking = harness.add_booking(&bedspace, date!(2022 - 08 - 26), date!(2022 - 09 - 10), 0);

    let errors: ValidationErrors = field_errors(harness.bookings.create_extension(
        &booking,
        date!(2022 - 08 - 25),
        None,
    ));

    assert!(errors.has("$.newDepartureDate", "beforeBookingArrivalDate"));
    assert!(harness.booking_now(booking.id).extensions.is_empty());
}

#[test]
fn test_extension_into_following_booking_conflicts() {
    let harness = Harness::new();
    let bedspace = harness.add_bedspace("Room 1", date!(2024 - 01 - 01), None);
    let booking = harness.add_booking(&bedspace, date!(2024 - 06 - 10), date!(2024 - 06 - 20), 0);
    let following = harness.add_booking(&bedspace, date!(2024 - 06 - 25), date!(2024 - 07 - 20), 0);

    match harness
        .bookings
        .create_extension(&booking, date!(2024 - 06 - 26), None)
    {
        Err(CoreError::Conflict { entity_id, .. }) => assert_eq!(entity_id, following.id),
        other => panic!("expected a conflict, got {other:?}"),
    }
}

#[test]
fn test_turnaround_replaces_current_and_checks_conflicts() {
    let harness = Harness::new();
    let bedspace = harness.add_bedspace("Room 1", date!(2024 - 01 - 01), None);
    // Departs Friday 28 June.
    let booking = harness.add_booking(&bedspace, date!(2024 - 06 - 10), date!(2024 - 06 - 28), 0);
    harness.add_booking(&bedspace, date!(2024 - 07 - 02), date!(2024 - 07 - 20), 0);

    let updated: Booking = harness.bookings.create_turnaround(&booking, 1).unwrap();
    assert_eq!(updated.turnarounds.len(), 2);
    assert_eq!(updated.turnaround_working_days(), 1);

    assert!(matches!(
        harness.bookings.create_turnaround(&updated, 3),
        Err(CoreError::Conflict { .. })
    ));

    let errors: ValidationErrors = field_errors(harness.bookings.create_turnaround(&updated, -1));
    assert!(errors.has("$.workingDays", "isNotAPositiveInteger"));
}

#[test]
fn test_non_arrival_sets_status_and_frees_bedspace() {
    let harness = Harness::new();
    let bedspace = harness.add_bedspace("Room 1", date!(2024 - 01 - 01), None);
    let booking = harness.add_booking(&bedspace, date!(2024 - 06 - 10), date!(2024 - 07 - 10), 0);

    let errors: ValidationErrors = field_errors(harness.bookings.create_non_arrival(
        &booking,
        date!(2024 - 06 - 09),
        harness.reference.cancellation_reason.id,
        None,
    ));
    assert!(errors.has("$.date", "beforeBookingArrivalDate"));
    assert!(errors.has("$.reason", "doesNotExist"));

    let not_arrived: Booking = harness
        .bookings
        .create_non_arrival(
            &booking,
            date!(2024 - 06 - 10),
            harness.reference.non_arrival_reason.id,
            None,
        )
        .unwrap();
    assert_eq!(not_arrived.status, BookingStatus::NotArrived);

    harness
        .bookings
        .create_booking(&harness.user, &harness.premises, new_booking(&bedspace))
        .unwrap();
}

#[test]
fn test_get_booking_for_premises_checks_ownership() {
    let harness = Harness::new();
    let other = Harness::new();
    let bedspace = harness.add_bedspace("Room 1", date!(2024 - 01 - 01), None);
    let booking = harness.add_booking(&bedspace, date!(2024 - 06 - 10), date!(2024 - 07 - 10), 0);

    assert_eq!(
        harness
            .bookings
            .get_booking_for_premises(&harness.premises, booking.id)
            .unwrap(),
        booking
    );
    assert!(matches!(
        harness
            .bookings
            .get_booking_for_premises(&other.premises, booking.id),
        Err(CoreError::NotFound { .. })
    ));
    assert!(matches!(
        harness
            .bookings
            .get_booking_for_premises(&harness.premises, Uuid::new_v4()),
        Err(CoreError::NotFound { .. })
    ));
}

#[test]
fn test_future_bookings_pair_occupants_and_filter_status() {
    let harness = Harness::new();
    let bedspace = harness.add_bedspace("Room 1", date!(2024 - 01 - 01), None);
    let second = harness.add_bedspace("Room 2", date!(2024 - 01 - 01), None);

    harness.add_booking(&bedspace, date!(2024 - 05 - 01), date!(2024 - 06 - 01), 0);
    let later = harness.add_booking(&bedspace, date!(2024 - 07 - 01), date!(2024 - 07 - 20), 0);
    let mut restricted = harness.add_booking(&second, date!(2024 - 06 - 10), date!(2024 - 06 - 30), 0);
    restricted.crn = String::from("R000001");
    harness.store.bookings.save(&restricted).unwrap();
    let mut confirmed = harness.add_booking(&second, date!(2024 - 07 - 05), date!(2024 - 07 - 30), 0);
    confirmed.status = BookingStatus::Confirmed;
    harness.store.bookings.save(&confirmed).unwrap();

    let future = harness
        .bookings
        .find_future_bookings_for_premises(
            harness.premises.id,
            &[BookingStatus::Provisional],
            &harness.user,
        )
        .unwrap();

    let ids: Vec<Uuid> = future.iter().map(|entry| entry.booking.id).collect();
    assert_eq!(ids, vec![restricted.id, later.id]);
    assert_eq!(
        future[0].occupant,
        OccupantSummary::Restricted {
            crn: String::from("R000001")
        }
    );
    assert_eq!(
        future[1].occupant,
        OccupantSummary::Full {
            crn: String::from("X320741"),
            name: String::from("Person X320741"),
        }
    );
}

#[test]
fn test_future_bookings_for_unknown_premises_is_not_found() {
    let harness = Harness::new();

    assert!(matches!(
        harness.bookings.find_future_bookings_for_premises(
            Uuid::new_v4(),
            &[BookingStatus::Provisional],
            &harness.user,
        ),
        Err(CoreError::NotFound { .. })
    ));
}
