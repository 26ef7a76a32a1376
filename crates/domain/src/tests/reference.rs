// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{BookingStatus, Characteristic, DomainError, ModelScope, ScopeMismatch, ServiceScope};
use std::str::FromStr;
use uuid::Uuid;

fn characteristic(model_scope: ModelScope, service_scope: ServiceScope) -> Characteristic {
    Characteristic {
        id: Uuid::new_v4(),
        name: String::from("Wheelchair accessible"),
        model_scope,
        service_scope,
    }
}

#[test]
fn test_wildcard_scopes_match_everything() {
    let any = characteristic(ModelScope::Any, ServiceScope::Any);
    assert_eq!(
        any.scope_mismatch(ModelScope::Room, ServiceScope::TemporaryAccommodation),
        None
    );
    assert_eq!(
        any.scope_mismatch(ModelScope::Premises, ServiceScope::TemporaryAccommodation),
        None
    );
}

#[test]
fn test_model_scope_checked_before_service_scope() {
    let wrong_both = characteristic(ModelScope::Premises, ServiceScope::ApprovedPremises);
    assert_eq!(
        wrong_both.scope_mismatch(ModelScope::Room, ServiceScope::TemporaryAccommodation),
        Some(ScopeMismatch::Model)
    );
}

#[test]
fn test_service_scope_mismatch() {
    let cas1_only = characteristic(ModelScope::Room, ServiceScope::ApprovedPremises);
    assert_eq!(
        cas1_only.scope_mismatch(ModelScope::Room, ServiceScope::TemporaryAccommodation),
        Some(ScopeMismatch::Service)
    );
}

#[test]
fn test_service_scope_round_trips_wire_names() {
    for scope in [
        ServiceScope::TemporaryAccommodation,
        ServiceScope::ApprovedPremises,
        ServiceScope::Any,
    ] {
        assert_eq!(ServiceScope::from_str(scope.as_str()), Ok(scope));
    }
    assert_eq!(
        ServiceScope::from_str("community"),
        Err(DomainError::UnknownServiceScope(String::from("community")))
    );
}

#[test]
fn test_booking_status_parsing() {
    assert_eq!(BookingStatus::from_str("not-arrived"), Ok(BookingStatus::NotArrived));
    assert!(BookingStatus::from_str("closed").is_err());
    assert!(BookingStatus::Arrived.is_live());
    assert!(!BookingStatus::Departed.is_live());
    assert!(!BookingStatus::Cancelled.is_live());
}
