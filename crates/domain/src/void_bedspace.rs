// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::date_range::DateRange;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Cancellation of a void bedspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoidBedspaceCancellation {
    pub id: Uuid,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
}

/// A window in which a bedspace is unavailable for reasons other than a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoidBedspace {
    pub id: Uuid,
    pub premises_id: Uuid,
    pub bedspace_id: Uuid,
    pub start_date: Date,
    pub end_date: Date,
    pub reason_id: Uuid,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
    pub cancellation: Option<VoidBedspaceCancellation>,
}

impl VoidBedspace {
    /// Returns whether the void has been cancelled.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        self.cancellation.is_some()
    }

    /// The inclusive range the void covers, if its dates are ordered.
    #[must_use]
    pub fn window(&self) -> Option<DateRange> {
        DateRange::new(self.start_date, self.end_date).ok()
    }
}
