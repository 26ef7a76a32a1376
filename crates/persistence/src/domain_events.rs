// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain event storage.
//!
//! Events are stored as serialized JSON alongside the columns they are
//! queried by, the way an event table in a relational store would hold
//! them. The payload is never rewritten; cancelling a scheduled change only
//! sets `cancelled_at` on the row.

use crate::error::PersistenceError;
use crate::table::{Keyed, Table};
use cas3::{DomainEventRepository, PortError};
use cas3_events::{DomainEvent, StoredDomainEvent};
use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

/// A stored event row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub id: Uuid,
    pub event_type: String,
    pub premises_id: Option<Uuid>,
    pub bedspace_id: Option<Uuid>,
    pub occurred_at: OffsetDateTime,
    /// The event serialized as JSON.
    pub payload: String,
    pub cancelled_at: Option<OffsetDateTime>,
}

impl Keyed for EventRow {
    fn key(&self) -> Uuid {
        self.id
    }
}

impl EventRow {
    /// Serializes `event` into a new row.
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be serialized.
    pub fn from_event(event: &DomainEvent) -> Result<Self, PersistenceError> {
        Ok(Self {
            id: event.id,
            event_type: event.event_type.as_str().to_string(),
            premises_id: event.premises_id,
            bedspace_id: event.bedspace_id,
            occurred_at: event.occurred_at,
            payload: serde_json::to_string(event)?,
            cancelled_at: None,
        })
    }

    /// Deserializes the row back into a stored event.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not a valid event.
    pub fn to_stored(&self) -> Result<StoredDomainEvent, PersistenceError> {
        let event: DomainEvent = serde_json::from_str(&self.payload)?;
        Ok(StoredDomainEvent {
            event,
            cancelled_at: self.cancelled_at,
        })
    }
}

#[derive(Debug)]
pub struct InMemoryDomainEventRepository {
    table: Table<EventRow>,
}

impl Default for InMemoryDomainEventRepository {
    fn default() -> Self {
        Self {
            table: Table::new("domain_events"),
        }
    }
}

impl InMemoryDomainEventRepository {
    /// Every stored row, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the table lock is poisoned.
    pub fn rows(&self) -> Result<Vec<EventRow>, PersistenceError> {
        self.table.filter(|_| true)
    }

    /// Every stored event, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned or a payload is invalid.
    pub fn all(&self) -> Result<Vec<StoredDomainEvent>, PersistenceError> {
        self.rows()?.iter().map(EventRow::to_stored).collect()
    }

    fn decode(rows: &[EventRow]) -> Result<Vec<StoredDomainEvent>, PortError> {
        Ok(rows
            .iter()
            .map(EventRow::to_stored)
            .collect::<Result<Vec<StoredDomainEvent>, PersistenceError>>()?)
    }
}

impl DomainEventRepository for InMemoryDomainEventRepository {
    fn save(&self, event: &DomainEvent) -> Result<(), PortError> {
        let row: EventRow = EventRow::from_event(event)?;
        if self.table.get(row.id)?.is_some() {
            return Err(PortError::storage(
                "save_domain_event",
                format!("duplicate event id {}", row.id),
            ));
        }
        self.table.upsert(&row)?;
        debug!(event_id = %event.id, event_type = %event.event_type, "Stored domain event");
        Ok(())
    }

    fn find_by_bedspace(&self, bedspace_id: Uuid) -> Result<Vec<StoredDomainEvent>, PortError> {
        Self::decode(&self.table.filter(|row| row.bedspace_id == Some(bedspace_id))?)
    }

    fn find_by_premises(&self, premises_id: Uuid) -> Result<Vec<StoredDomainEvent>, PortError> {
        Self::decode(&self.table.filter(|row| {
            row.premises_id == Some(premises_id) && row.bedspace_id.is_none()
        })?)
    }

    fn mark_cancelled(&self, event_id: Uuid, at: OffsetDateTime) -> Result<(), PortError> {
        let mut row: EventRow =
            self.table
                .get(event_id)?
                .ok_or_else(|| PersistenceError::NotFound {
                    table: self.table.name(),
                    id: event_id.to_string(),
                })?;
        row.cancelled_at = Some(at);
        self.table.upsert(&row)?;
        info!(event_id = %event_id, "Marked domain event cancelled");
        Ok(())
    }
}
