// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level validation results.
//!
//! Validation failures are collected as `(path, code)` pairs, where the path
//! is a JSON-path style pointer at the offending input (e.g. `$.dateTime`)
//! and the code is a stable machine-readable message key (e.g.
//! `beforeBookingArrivalDate`). Archive and unarchive checks additionally
//! attach the conflicting entity and the first date that would be accepted.

use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

/// Minimum length of a bedspace reference, after trimming.
pub const MIN_BEDSPACE_REFERENCE_LENGTH: usize = 3;

/// Detail attached to a scheduling conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictDetail {
    /// The bedspace or premises the conflict was found on.
    pub entity_id: Uuid,
    /// The first date the rejected action would be accepted for.
    pub value: Date,
}

/// A single failed field check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// JSON-path style pointer at the input.
    pub path: String,
    /// Stable message key.
    pub code: String,
    /// Present for archive scheduling conflicts.
    pub conflict: Option<ConflictDetail>,
}

/// An ordered collection of field errors.
///
/// Only the first error recorded for a path is kept, so checks should be
/// made from most to least fundamental.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Creates a collection holding a single error.
    #[must_use]
    pub fn single(path: &str, code: &str) -> Self {
        let mut errors: Self = Self::new();
        errors.add(path, code);
        errors
    }

    /// Creates a collection holding a single scheduling conflict.
    #[must_use]
    pub fn conflict(path: &str, code: &str, entity_id: Uuid, value: Date) -> Self {
        let mut errors: Self = Self::new();
        errors.add_conflict(path, code, ConflictDetail { entity_id, value });
        errors
    }

    /// Records an error unless the path already has one.
    pub fn add(&mut self, path: &str, code: &str) {
        self.push(FieldError {
            path: path.to_string(),
            code: code.to_string(),
            conflict: None,
        });
    }

    /// Records a scheduling conflict unless the path already has an error.
    pub fn add_conflict(&mut self, path: &str, code: &str, detail: ConflictDetail) {
        self.push(FieldError {
            path: path.to_string(),
            code: code.to_string(),
            conflict: Some(detail),
        });
    }

    fn push(&mut self, error: FieldError) {
        if self.errors.iter().all(|existing| existing.path != error.path) {
            self.errors.push(error);
        }
    }

    /// Returns whether no errors were recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of recorded errors.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.errors.len()
    }

    /// The error recorded for `path`, if any.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&FieldError> {
        self.errors.iter().find(|error| error.path == path)
    }

    /// Returns whether `path` failed with `code`.
    #[must_use]
    pub fn has(&self, path: &str, code: &str) -> bool {
        self.get(path).is_some_and(|error| error.code == code)
    }

    /// Iterates the errors in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Converts the collection into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one error was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered: Vec<String> = self
            .errors
            .iter()
            .map(|error| format!("{}: {}", error.path, error.code))
            .collect();
        write!(f, "{}", rendered.join(", "))
    }
}

/// Checks a bedspace reference against the naming rules.
///
/// Uniqueness is checked case-insensitively against `existing_references`.
/// Returns the message key of the first rule broken, if any.
#[must_use]
pub fn bedspace_reference_error(
    reference: &str,
    existing_references: &[&str],
) -> Option<&'static str> {
    let trimmed: &str = reference.trim();

    if trimmed.is_empty() {
        return Some("empty");
    }

    if trimmed.chars().count() < MIN_BEDSPACE_REFERENCE_LENGTH {
        return Some("bedspaceReferenceNotMeetMinimumLength");
    }

    if !trimmed.chars().any(char::is_alphanumeric) {
        return Some("bedspaceReferenceMustIncludeLetterOrNumber");
    }

    let lowered: String = trimmed.to_lowercase();
    if existing_references
        .iter()
        .any(|existing| existing.trim().to_lowercase() == lowered)
    {
        return Some("bedspaceReferenceExists");
    }

    None
}
