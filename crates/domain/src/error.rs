// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur while constructing or parsing domain values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A date range ends before it starts.
    InvalidDateRange {
        /// The requested start date.
        start: time::Date,
        /// The requested end date.
        end: time::Date,
    },
    /// A booking status string was not recognised.
    UnknownBookingStatus(String),
    /// A service scope string was not recognised.
    UnknownServiceScope(String),
    /// A model scope string was not recognised.
    UnknownModelScope(String),
    /// A premises status string was not recognised.
    UnknownPremisesStatus(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDateRange { start, end } => {
                write!(f, "Invalid date range: {end} is before {start}")
            }
            Self::UnknownBookingStatus(value) => write!(f, "Unknown booking status: {value}"),
            Self::UnknownServiceScope(value) => write!(f, "Unknown service scope: {value}"),
            Self::UnknownModelScope(value) => write!(f, "Unknown model scope: {value}"),
            Self::UnknownPremisesStatus(value) => write!(f, "Unknown premises status: {value}"),
        }
    }
}

impl std::error::Error for DomainError {}
