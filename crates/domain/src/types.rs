// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How restricted ("limited access") offenders are presented to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LaoStrategy {
    /// Restricted offenders are returned as restricted summaries.
    #[default]
    CheckUserAccess,
    /// Every offender is returned in full.
    NeverRestricted,
}

/// The staff member performing an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identity.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Delius staff code, when known.
    pub staff_code: Option<String>,
    /// Username used for audit records.
    pub username: String,
    /// The region the user works in.
    pub probation_region_id: Uuid,
    /// How this user sees limited-access offenders.
    pub lao_strategy: LaoStrategy,
}

/// A summary of the person occupying a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OccupantSummary {
    /// Full details are visible to the requesting user.
    Full {
        /// Case reference number.
        crn: String,
        /// Display name.
        name: String,
    },
    /// The person is a limited-access offender the user may not see.
    Restricted {
        /// Case reference number.
        crn: String,
    },
    /// The lookup service had no record.
    Unknown {
        /// Case reference number.
        crn: String,
    },
}

impl OccupantSummary {
    /// The case reference number the summary is for.
    #[must_use]
    pub fn crn(&self) -> &str {
        match self {
            Self::Full { crn, .. } | Self::Restricted { crn } | Self::Unknown { crn } => crn,
        }
    }
}
