// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod reference;
mod validation;

use crate::{Bedspace, Booking, BookingStatus, Premises, PremisesStatus};
use time::{Date, OffsetDateTime};
use time::macros::datetime;
use uuid::Uuid;

pub fn created_at() -> OffsetDateTime {
    datetime!(2024-01-01 09:00 UTC)
}

pub fn create_test_premises() -> Premises {
    Premises {
        id: Uuid::new_v4(),
        name: String::from("Hope House"),
        address_line1: String::from("1 Station Road"),
        address_line2: None,
        town: Some(String::from("Leeds")),
        postcode: String::from("LS1 1AA"),
        probation_region_id: Uuid::new_v4(),
        local_authority_area_id: None,
        probation_delivery_unit_id: Uuid::new_v4(),
        characteristic_ids: Vec::new(),
        notes: None,
        status: PremisesStatus::Active,
        start_date: Date::from_calendar_date(2023, time::Month::January, 1).unwrap(),
        end_date: None,
        turnaround_working_days: 2,
        created_at: created_at(),
    }
}

pub fn create_test_bedspace(premises: &Premises, start_date: Date, end_date: Option<Date>) -> Bedspace {
    Bedspace {
        id: Uuid::new_v4(),
        premises_id: premises.id,
        reference: String::from("Room 1"),
        characteristic_ids: Vec::new(),
        notes: None,
        start_date,
        end_date,
        created_at: created_at(),
    }
}

pub fn create_test_booking(arrival_date: Date, departure_date: Date) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        crn: String::from("X320741"),
        noms_number: Some(String::from("A1234BC")),
        premises_id: Uuid::new_v4(),
        bedspace_id: Uuid::new_v4(),
        application_id: None,
        assessment_id: None,
        arrival_date,
        departure_date,
        status: BookingStatus::Provisional,
        key_worker_staff_code: None,
        offender_name: None,
        created_at: created_at(),
        arrival: None,
        departure: None,
        cancellation: None,
        confirmation: None,
        non_arrival: None,
        extensions: Vec::new(),
        turnarounds: Vec::new(),
    }
}
