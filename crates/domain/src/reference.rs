// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference data: characteristics, reasons and geography.
//!
//! Characteristics and reasons are tagged with the service line (and, for
//! characteristics, the kind of entity) they may be attached to. Scope
//! matching is a pure predicate over those tags.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// The service line a piece of reference data belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceScope {
    /// Temporary accommodation (CAS3).
    TemporaryAccommodation,
    /// Approved premises (CAS1). Never valid for CAS3 entities.
    ApprovedPremises,
    /// Valid for every service line.
    Any,
}

impl ServiceScope {
    /// Converts this scope to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TemporaryAccommodation => "temporary-accommodation",
            Self::ApprovedPremises => "approved-premises",
            Self::Any => "*",
        }
    }

    /// Returns whether data tagged with this scope may be used by `service`.
    #[must_use]
    pub fn permits(&self, service: Self) -> bool {
        *self == Self::Any || *self == service
    }
}

impl FromStr for ServiceScope {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "temporary-accommodation" => Ok(Self::TemporaryAccommodation),
            "approved-premises" => Ok(Self::ApprovedPremises),
            "*" => Ok(Self::Any),
            _ => Err(DomainError::UnknownServiceScope(s.to_string())),
        }
    }
}

impl std::fmt::Display for ServiceScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of entity a characteristic may be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelScope {
    /// Premises-level characteristic.
    Premises,
    /// Room (bedspace) level characteristic.
    Room,
    /// Valid on any entity.
    Any,
}

impl ModelScope {
    /// Converts this scope to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Premises => "premises",
            Self::Room => "room",
            Self::Any => "*",
        }
    }

    /// Returns whether a characteristic with this scope may be attached to `model`.
    #[must_use]
    pub fn permits(&self, model: Self) -> bool {
        *self == Self::Any || *self == model
    }
}

impl FromStr for ModelScope {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "premises" => Ok(Self::Premises),
            "room" => Ok(Self::Room),
            "*" => Ok(Self::Any),
            _ => Err(DomainError::UnknownModelScope(s.to_string())),
        }
    }
}

/// A tagged attribute of a premises or bedspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Characteristic {
    /// Identity.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Which entity kind it may be attached to.
    pub model_scope: ModelScope,
    /// Which service line it belongs to.
    pub service_scope: ServiceScope,
}

/// Outcome of matching a characteristic against a required scope pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeMismatch {
    /// The model scope does not permit the target entity.
    Model,
    /// The service scope does not permit the target service.
    Service,
}

impl Characteristic {
    /// Checks the characteristic against the model and service it is being
    /// attached to. Model scope is checked first.
    #[must_use]
    pub fn scope_mismatch(&self, model: ModelScope, service: ServiceScope) -> Option<ScopeMismatch> {
        if !self.model_scope.permits(model) {
            return Some(ScopeMismatch::Model);
        }
        if !self.service_scope.permits(service) {
            return Some(ScopeMismatch::Service);
        }
        None
    }
}

/// The lookup table a reason belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReasonKind {
    /// Why a booking was cancelled.
    Cancellation,
    /// Why a person departed.
    Departure,
    /// Where a person moved on to.
    MoveOnCategory,
    /// Why a person never arrived.
    NonArrival,
    /// Why a bedspace is void.
    VoidBedspace,
}

/// An entry of one of the reason lookup tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reason {
    /// Identity.
    pub id: Uuid,
    /// Which table this reason belongs to.
    pub kind: ReasonKind,
    /// Display name.
    pub name: String,
    /// Which service line it belongs to.
    pub service_scope: ServiceScope,
    /// Inactive reasons are kept for history only.
    pub is_active: bool,
}

/// A probation region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbationRegion {
    /// Identity.
    pub id: Uuid,
    /// Display name.
    pub name: String,
}

/// A local authority area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalAuthorityArea {
    /// Identity.
    pub id: Uuid,
    /// Short identifier.
    pub identifier: String,
    /// Display name.
    pub name: String,
}

/// A probation delivery unit, which always belongs to a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbationDeliveryUnit {
    /// Identity.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// The owning region.
    pub probation_region_id: Uuid,
}
