// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory persistence for the CAS3 booking engine.
//!
//! Every repository port from `cas3` has an adapter here backed by an
//! insertion-ordered table behind an `RwLock`. The adapters hold no business
//! rules: the services validate, the adapters store.
//!
//! These adapters are fakes for tests and a reference for implementing the
//! ports. Lookups are linear scans and nothing survives the process, so
//! they are not a production store.
//!
//! ## Domain events
//!
//! Domain events are kept as serialized JSON rows with the identifiers they
//! are looked up by. A stored payload is never rewritten. Cancelling a
//! scheduled archive or unarchive sets the row's `cancelled_at` column.
//!
//! ## Testing
//!
//! The scenario tests in this crate drive `BookingService` and
//! `PremisesService` end to end against these adapters.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod bookings;
mod domain_events;
mod error;
mod premises;
mod reference_data;
mod table;
mod void_bedspaces;

#[cfg(test)]
mod tests;

use std::sync::Arc;

pub use bookings::InMemoryBookingRepository;
pub use domain_events::{EventRow, InMemoryDomainEventRepository};
pub use error::PersistenceError;
pub use premises::{InMemoryBedspaceRepository, InMemoryPremisesRepository};
pub use reference_data::InMemoryReferenceData;
pub use void_bedspaces::InMemoryVoidBedspaceRepository;

/// One instance of every in-memory repository.
///
/// Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    pub bookings: Arc<InMemoryBookingRepository>,
    pub premises: Arc<InMemoryPremisesRepository>,
    pub bedspaces: Arc<InMemoryBedspaceRepository>,
    pub void_bedspaces: Arc<InMemoryVoidBedspaceRepository>,
    pub reference_data: Arc<InMemoryReferenceData>,
    pub domain_events: Arc<InMemoryDomainEventRepository>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
