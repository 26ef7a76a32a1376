// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::config::DomainEventsConfig;
use crate::error::CoreError;
use crate::ports::{DomainEventRepository, EventBus};
use cas3_events::{DomainEvent, EventEnvelope};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Stores domain events and, when enabled, publishes them to the bus.
///
/// The event is always stored first. Nothing is published if storing fails.
/// A publish failure leaves the stored record in place and is returned as
/// `CoreError::Publish`.
pub struct DomainEventPublisher {
    events: Arc<dyn DomainEventRepository>,
    bus: Arc<dyn EventBus>,
    config: DomainEventsConfig,
}

impl DomainEventPublisher {
    pub fn new(
        events: Arc<dyn DomainEventRepository>,
        bus: Arc<dyn EventBus>,
        config: DomainEventsConfig,
    ) -> Self {
        Self {
            events,
            bus,
            config,
        }
    }

    /// Stores `event` and publishes it if publishing is enabled.
    ///
    /// Returns the bus message id, or `None` when publishing is disabled.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Persistence` if the event cannot be stored, and
    /// `CoreError::Serialization` or `CoreError::Publish` if it was stored but
    /// could not be sent.
    pub fn publish(&self, event: &DomainEvent) -> Result<Option<String>, CoreError> {
        self.events.save(event).map_err(|err| {
            error!(event_id = %event.id, event_type = %event.event_type, error = %err, "Failed to store domain event");
            CoreError::Persistence(err)
        })?;

        if !self.config.publish_enabled {
            debug!(event_id = %event.id, event_type = %event.event_type, "Publishing disabled; event stored only");
            return Ok(None);
        }

        let payload: String = EventEnvelope::from_event(event, &self.config.detail_url_base)
            .map_err(|err| CoreError::Serialization(err.to_string()))?
            .to_json()
            .map_err(|err| CoreError::Serialization(err.to_string()))?;

        let message_id: String = self
            .bus
            .publish(&self.config.topic, &payload)
            .map_err(|err| {
                error!(event_id = %event.id, event_type = %event.event_type, error = %err, "Failed to publish stored domain event");
                CoreError::Publish(err)
            })?;

        info!(event_id = %event.id, event_type = %event.event_type, message_id = %message_id, "Published domain event");
        Ok(Some(message_id))
    }
}
