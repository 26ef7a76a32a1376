// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Archive history reconstructed from stored domain events.
//!
//! History is a pure replay: cancelled events are skipped and the rest are
//! applied in the order they occurred. Replaying the same events always
//! gives the same actions.

use crate::error::CoreError;
use crate::premises::PremisesService;
use cas3_events::{EventDetails, StoredDomainEvent};
use serde::Serialize;
use time::Date;
use uuid::Uuid;

/// What an archive history entry did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArchiveStatus {
    Archived,
    Online,
}

/// One archive or unarchive, dated by when it takes effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArchiveAction {
    pub status: ArchiveStatus,
    pub date: Date,
}

/// The archive history of one bedspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BedspaceArchiveHistory {
    pub bedspace_id: Uuid,
    pub actions: Vec<ArchiveAction>,
}

/// Replays archive and unarchive events into actions.
///
/// Events of other types are ignored.
#[must_use]
pub fn replay_archive_history(events: &[StoredDomainEvent]) -> Vec<ArchiveAction> {
    let mut live: Vec<&StoredDomainEvent> = events
        .iter()
        .filter(|stored| !stored.is_cancelled())
        .collect();
    live.sort_by_key(|stored| stored.event.occurred_at);

    live.into_iter()
        .filter_map(|stored| match &stored.event.details {
            EventDetails::BedspaceArchive(details) => Some(ArchiveAction {
                status: ArchiveStatus::Archived,
                date: details.end_date,
            }),
            EventDetails::PremisesArchive(details) => Some(ArchiveAction {
                status: ArchiveStatus::Archived,
                date: details.end_date,
            }),
            EventDetails::BedspaceUnarchive(details) => Some(ArchiveAction {
                status: ArchiveStatus::Online,
                date: details.new_start_date,
            }),
            EventDetails::PremisesUnarchive(details) => Some(ArchiveAction {
                status: ArchiveStatus::Online,
                date: details.new_start_date,
            }),
            _ => None,
        })
        .collect()
}

impl PremisesService {
    /// Archive history of one bedspace.
    ///
    /// # Errors
    ///
    /// Returns a fatal error if the events cannot be read.
    pub fn get_bedspace_archive_history(
        &self,
        bedspace_id: Uuid,
    ) -> Result<Vec<ArchiveAction>, CoreError> {
        let events: Vec<StoredDomainEvent> = self.ports.domain_events.find_by_bedspace(bedspace_id)?;
        Ok(replay_archive_history(&events))
    }

    /// Archive history of several bedspaces, in the order requested.
    ///
    /// # Errors
    ///
    /// Returns a fatal error if the events cannot be read.
    pub fn get_bedspaces_archive_history(
        &self,
        bedspace_ids: &[Uuid],
    ) -> Result<Vec<BedspaceArchiveHistory>, CoreError> {
        bedspace_ids
            .iter()
            .map(|bedspace_id| {
                Ok(BedspaceArchiveHistory {
                    bedspace_id: *bedspace_id,
                    actions: self.get_bedspace_archive_history(*bedspace_id)?,
                })
            })
            .collect()
    }

    /// Archive history of a premises itself, excluding its bedspaces.
    ///
    /// # Errors
    ///
    /// Returns a fatal error if the events cannot be read.
    pub fn get_premises_archive_history(
        &self,
        premises_id: Uuid,
    ) -> Result<Vec<ArchiveAction>, CoreError> {
        let events: Vec<StoredDomainEvent> = self.ports.domain_events.find_by_premises(premises_id)?;
        Ok(replay_archive_history(&events))
    }
}
