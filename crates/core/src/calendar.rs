// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ports::WorkingDayCalendar;
use std::collections::BTreeSet;
use time::{Date, Weekday};

/// Monday to Friday, excluding the configured bank holidays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekdayCalendar {
    bank_holidays: BTreeSet<Date>,
}

impl WeekdayCalendar {
    /// Creates a calendar that skips weekends and `bank_holidays`.
    pub fn new(bank_holidays: impl IntoIterator<Item = Date>) -> Self {
        Self {
            bank_holidays: bank_holidays.into_iter().collect(),
        }
    }

    /// Returns whether `date` is a working day.
    #[must_use]
    pub fn is_working_day(&self, date: Date) -> bool {
        !matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
            && !self.bank_holidays.contains(&date)
    }
}

impl WorkingDayCalendar for WeekdayCalendar {
    fn add_working_days(&self, date: Date, working_days: u32) -> Date {
        let mut current: Date = date;
        let mut remaining: u32 = working_days;

        while remaining > 0 {
            let Some(next) = current.next_day() else {
                break;
            };
            current = next;

            if self.is_working_day(current) {
                remaining -= 1;
            }
        }

        current
    }
}
