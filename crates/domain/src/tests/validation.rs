// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ValidationErrors, bedspace_reference_error};
use time::macros::date;
use uuid::Uuid;

#[test]
fn test_reference_must_not_be_blank() {
    assert_eq!(bedspace_reference_error("   ", &[]), Some("empty"));
}

#[test]
fn test_reference_minimum_length_after_trim() {
    assert_eq!(
        bedspace_reference_error(" A1 ", &[]),
        Some("bedspaceReferenceNotMeetMinimumLength")
    );
}

#[test]
fn test_reference_needs_letter_or_digit() {
    assert_eq!(
        bedspace_reference_error("---", &[]),
        Some("bedspaceReferenceMustIncludeLetterOrNumber")
    );
}

#[test]
fn test_reference_unique_case_insensitive() {
    assert_eq!(
        bedspace_reference_error("room 1", &["ROOM 1", "Room 2"]),
        Some("bedspaceReferenceExists")
    );
    assert_eq!(bedspace_reference_error("Room 3", &["ROOM 1", "Room 2"]), None);
}

#[test]
fn test_first_error_per_path_wins() {
    let mut errors = ValidationErrors::new();
    errors.add("$.reference", "empty");
    errors.add("$.reference", "bedspaceReferenceExists");
    errors.add("$.startDate", "invalidStartDateInThePast");

    assert_eq!(errors.len(), 2);
    assert!(errors.has("$.reference", "empty"));
    assert!(!errors.has("$.reference", "bedspaceReferenceExists"));
    assert_eq!(
        errors.to_string(),
        "$.reference: empty, $.startDate: invalidStartDateInThePast"
    );
}

#[test]
fn test_conflict_carries_entity_and_date() {
    let bedspace_id = Uuid::new_v4();
    let errors = ValidationErrors::conflict(
        "$.endDate",
        "existingVoid",
        bedspace_id,
        date!(2024 - 06 - 20),
    );

    let error = errors.get("$.endDate").unwrap();
    assert_eq!(error.code, "existingVoid");
    let detail = error.conflict.as_ref().unwrap();
    assert_eq!(detail.entity_id, bedspace_id);
    assert_eq!(detail.value, date!(2024 - 06 - 20));
}

#[test]
fn test_into_result() {
    assert!(ValidationErrors::new().into_result().is_ok());
    assert!(ValidationErrors::single("$.name", "notUnique").into_result().is_err());
}
