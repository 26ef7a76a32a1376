// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Date range utilities shared by the booking and scheduling engines.
//!
//! All ranges here are inclusive on both ends: a booking from the 10th to
//! the 12th occupies the 10th, 11th and 12th.
//!
//! ## Invariants
//!
//! - A `DateRange` never has an end before its start
//! - Functions are pure and never consult the system clock

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::{Date, Duration};

/// How far either side of "today" a scheduled archive, restart or bedspace
/// start date may be placed.
pub const SCHEDULING_WINDOW_DAYS: i64 = 7;

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    /// Creates a new inclusive range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateRange` if `end` is before `start`.
    pub fn new(start: Date, end: Date) -> Result<Self, DomainError> {
        if end < start {
            return Err(DomainError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The first day of the range.
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// The last day of the range.
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Returns true when `date` falls within the range.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns true when the two ranges share at least one day.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Iterates every day of the range in order.
    pub fn days(&self) -> impl Iterator<Item = Date> + '_ {
        let end: Date = self.end;
        std::iter::successors(Some(self.start), move |day| {
            day.next_day().filter(|next| *next <= end)
        })
    }
}

/// Which side of the scheduling window a date fell out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowViolation {
    /// The date is more than the allowed number of days before today.
    InThePast,
    /// The date is more than the allowed number of days after today.
    InTheFuture,
}

/// Checks that `date` lies within `[today - days, today + days]`.
///
/// Returns `None` when the date is acceptable.
#[must_use]
pub fn check_window(date: Date, today: Date, days: i64) -> Option<WindowViolation> {
    let window: Duration = Duration::days(days);
    let earliest: Date = today.checked_sub(window).unwrap_or(Date::MIN);
    let latest: Date = today.checked_add(window).unwrap_or(Date::MAX);

    if date < earliest {
        Some(WindowViolation::InThePast)
    } else if date > latest {
        Some(WindowViolation::InTheFuture)
    } else {
        None
    }
}

/// Returns the day after `date`, saturating at the calendar maximum.
#[must_use]
pub fn day_after(date: Date) -> Date {
    date.next_day().unwrap_or(date)
}

/// Returns the days in the half-open range `[start, end)`.
///
/// An empty vector is returned when `end` is not after `start`.
#[must_use]
pub fn days_until(start: Date, end: Date) -> Vec<Date> {
    std::iter::successors(Some(start), |day| day.next_day())
        .take_while(|day| *day < end)
        .collect()
}

/// Returns the latest of the given dates, if any.
#[must_use]
pub fn latest<I>(dates: I) -> Option<Date>
where
    I: IntoIterator<Item = Date>,
{
    dates.into_iter().max()
}
