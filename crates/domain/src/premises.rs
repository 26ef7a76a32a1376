// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Premises, bedspaces and the status cascade between them.
//!
//! ## Invariants
//!
//! - A premises has an end date if and only if its status is `Archived`
//! - A premises is archived only when every one of its bedspaces has an end date
//! - An archived premises' end date equals the latest bedspace end date
//!
//! Bedspace status is always derived from its dates relative to "today";
//! premises status is stored and kept consistent by `recompute_premises_status`.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Stored status of a premises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PremisesStatus {
    /// Accepting bookings (or scheduled to start doing so).
    #[default]
    Active,
    /// Archived, or scheduled to archive on its end date.
    Archived,
}

impl PremisesStatus {
    /// Converts this status to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }
}

impl FromStr for PremisesStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "archived" => Ok(Self::Archived),
            _ => Err(DomainError::UnknownPremisesStatus(s.to_string())),
        }
    }
}

/// A physical site containing bedspaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Premises {
    pub id: Uuid,
    /// Unique across CAS3 premises.
    pub name: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub town: Option<String>,
    pub postcode: String,
    pub probation_region_id: Uuid,
    pub local_authority_area_id: Option<Uuid>,
    pub probation_delivery_unit_id: Uuid,
    pub characteristic_ids: Vec<Uuid>,
    pub notes: Option<String>,
    pub status: PremisesStatus,
    pub start_date: Date,
    pub end_date: Option<Date>,
    /// Default turnaround applied to new bookings.
    pub turnaround_working_days: u32,
    pub created_at: OffsetDateTime,
}

impl Premises {
    /// Returns whether the premises is archived or scheduled to archive.
    #[must_use]
    pub fn is_archived(&self) -> bool {
        self.status == PremisesStatus::Archived
    }

    /// Returns whether the archive has taken effect as of `today`.
    #[must_use]
    pub fn is_archived_as_of(&self, today: Date) -> bool {
        self.is_archived() && self.end_date.is_some_and(|end| end <= today)
    }

    /// Archives the premises as of `end_date`.
    pub fn archive(&mut self, end_date: Date) {
        self.status = PremisesStatus::Archived;
        self.end_date = Some(end_date);
    }

    /// Brings the premises back online from `start_date`.
    pub fn unarchive(&mut self, start_date: Date) {
        self.status = PremisesStatus::Active;
        self.start_date = start_date;
        self.end_date = None;
    }
}

/// Derived status of a bedspace on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BedspaceStatus {
    /// Start date is in the future.
    Upcoming,
    /// Bookable.
    Online,
    /// End date is today or in the past.
    Archived,
}

/// A single occupiable unit (room and bed) within a premises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bedspace {
    pub id: Uuid,
    /// Non-owning back-reference to the premises.
    pub premises_id: Uuid,
    /// Unique (case-insensitive) within the premises.
    pub reference: String,
    pub characteristic_ids: Vec<Uuid>,
    pub notes: Option<String>,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub created_at: OffsetDateTime,
}

impl Bedspace {
    /// Derives the bedspace status as of `today`.
    #[must_use]
    pub fn status(&self, today: Date) -> BedspaceStatus {
        if self.end_date.is_some_and(|end| end <= today) {
            BedspaceStatus::Archived
        } else if self.start_date > today {
            BedspaceStatus::Upcoming
        } else {
            BedspaceStatus::Online
        }
    }

    /// Returns whether the archive has taken effect as of `today`.
    #[must_use]
    pub fn is_archived(&self, today: Date) -> bool {
        self.status(today) == BedspaceStatus::Archived
    }

    /// Returns whether an end date is set but still in the future.
    #[must_use]
    pub fn is_scheduled_to_archive(&self, today: Date) -> bool {
        self.end_date.is_some_and(|end| end > today)
    }
}

/// The premises-level change implied by the current bedspace dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PremisesCascade {
    /// Premises status is already consistent.
    Unchanged,
    /// Every bedspace has an end date; archive at the latest one.
    Archive {
        /// The latest bedspace end date.
        end_date: Date,
    },
    /// At least one bedspace is no longer archived; bring the premises back.
    Unarchive {
        /// The earliest start date among the bedspaces without an end date.
        start_date: Date,
    },
}

/// Works out whether the premises status needs to follow its bedspaces.
///
/// A premises with no bedspaces is never archived by cascade.
#[must_use]
pub fn recompute_premises_status(premises: &Premises, bedspaces: &[Bedspace]) -> PremisesCascade {
    let latest_end: Option<Date> = if bedspaces.is_empty() {
        None
    } else {
        bedspaces
            .iter()
            .map(|bedspace| bedspace.end_date)
            .collect::<Option<Vec<Date>>>()
            .and_then(|ends| ends.into_iter().max())
    };

    match (premises.status, latest_end) {
        (PremisesStatus::Active, Some(end_date)) => PremisesCascade::Archive { end_date },
        (PremisesStatus::Archived, Some(end_date)) if premises.end_date != Some(end_date) => {
            PremisesCascade::Archive { end_date }
        }
        (PremisesStatus::Archived, None) => bedspaces
            .iter()
            .filter(|bedspace| bedspace.end_date.is_none())
            .map(|bedspace| bedspace.start_date)
            .min()
            .map_or(PremisesCascade::Unchanged, |start_date| {
                PremisesCascade::Unarchive { start_date }
            }),
        _ => PremisesCascade::Unchanged,
    }
}
