// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use cas3_domain::ValidationErrors;
use uuid::Uuid;

/// Failure reported by a repository or collaborator port.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    /// The backing store failed - includes the operation name for tracing.
    #[error("Storage error in {operation}: {message}")]
    Storage {
        operation: &'static str,
        message: String,
    },

    /// A record could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A remote collaborator could not be reached.
    #[error("{0} unavailable")]
    Unavailable(String),
}

impl PortError {
    /// Create a Storage error with operation context.
    pub fn storage(operation: &'static str, message: impl ToString) -> Self {
        Self::Storage {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}

/// Failure reported by the referral assessment gateway.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("Not authorised to change the assessment")]
    Unauthorized,
    #[error("Assessment rejected the change: {0}")]
    Validation(String),
    #[error("Unexpected assessment failure: {0}")]
    Unexpected(String),
}

/// Errors returned by the booking and scheduling services.
///
/// `Validation`, `GeneralValidation`, `NotFound`, `Unauthorized` and
/// `Conflict` are expected outcomes of a request. The remaining variants are
/// fatal and mean the operation was aborted part-way.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// One or more fields failed validation.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// The request as a whole is invalid.
    #[error("{0}")]
    GeneralValidation(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Unauthorized")]
    Unauthorized,

    /// The requested dates clash with another booking or void bedspace.
    #[error("Conflict with {entity_id}: {message}")]
    Conflict { entity_id: Uuid, message: String },

    #[error("Persistence failure: {0}")]
    Persistence(#[from] PortError),

    /// The event was stored but could not be published.
    #[error("Event publish failure: {0}")]
    Publish(#[source] PortError),

    #[error("Event serialization failure: {0}")]
    Serialization(String),
}

impl CoreError {
    /// Create a `NotFound` error with entity type and ID context.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Create a `Validation` error for a single field.
    #[must_use]
    pub fn field(path: &str, code: &str) -> Self {
        Self::Validation(ValidationErrors::single(path, code))
    }

    /// Returns whether the operation was aborted by an infrastructure failure.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Persistence(_) | Self::Publish(_) | Self::Serialization(_)
        )
    }

    /// The field errors carried by a `Validation` error.
    #[must_use]
    pub const fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}
