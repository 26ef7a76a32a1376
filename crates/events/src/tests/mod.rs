// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use cas3_domain::{
    Bedspace, Booking, BookingStatus, LaoStrategy, Premises, PremisesStatus, User,
};
use time::OffsetDateTime;
use time::macros::{date, datetime};
use uuid::Uuid;

pub fn occurred_at() -> OffsetDateTime {
    datetime!(2024-06-15 10:30 UTC)
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
        created_at: occurred_at(),
    }
}

pub fn create_test_bedspace(premises: &Premises) -> Bedspace {
    Bedspace {
        id: Uuid::new_v4(),
        premises_id: premises.id,
        reference: String::from("Room 1"),
        characteristic_ids: Vec::new(),
        notes: None,
        start_date: date!(2023 - 01 - 01),
        end_date: None,
        created_at: occurred_at(),
    }
}

pub fn create_test_booking(premises: &Premises, bedspace: &Bedspace) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        crn: String::from("X320741"),
        noms_number: Some(String::from("A1234BC")),
        premises_id: premises.id,
        bedspace_id: bedspace.id,
        application_id: Some(Uuid::new_v4()),
        assessment_id: None,
        arrival_date: date!(2024 - 06 - 20),
        departure_date: date!(2024 - 08 - 20),
        status: BookingStatus::Provisional,
        key_worker_staff_code: None,
        offender_name: None,
        created_at: occurred_at(),
        arrival: None,
        departure: None,
        cancellation: None,
        confirmation: None,
        non_arrival: None,
        extensions: Vec::new(),
        turnarounds: Vec::new(),
    }
}
