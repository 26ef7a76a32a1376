// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The message published to the event bus for a domain event.
//!
//! Subscribers receive a small envelope and fetch the full payload from the
//! detail URL, so the envelope carries identifiers only.

use crate::event::DomainEvent;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

/// An identifier for the person an event is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonIdentifier {
    #[serde(rename = "type")]
    pub identifier_type: String,
    pub value: String,
}

/// Correlation identifiers carried alongside the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalInformation {
    pub event_id: Uuid,
    pub application_id: Option<Uuid>,
    pub booking_id: Option<Uuid>,
    pub premises_id: Option<Uuid>,
    pub bedspace_id: Option<Uuid>,
}

/// The bus message for one domain event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelope {
    pub event_type: String,
    pub version: u32,
    pub description: String,
    pub detail_url: String,
    pub occurred_at: String,
    pub additional_information: AdditionalInformation,
    pub person_reference: Vec<PersonIdentifier>,
}

impl EventEnvelope {
    /// Builds the envelope for `event`.
    ///
    /// # Arguments
    ///
    /// * `event` - The persisted domain event
    /// * `detail_url_base` - Base URL of the service that serves event details
    ///
    /// # Errors
    ///
    /// Returns an error if the occurrence time cannot be formatted.
    pub fn from_event(
        event: &DomainEvent,
        detail_url_base: &str,
    ) -> Result<Self, time::error::Format> {
        let mut person_reference: Vec<PersonIdentifier> = Vec::new();
        if let Some(crn) = &event.crn {
            person_reference.push(PersonIdentifier {
                identifier_type: String::from("CRN"),
                value: crn.clone(),
            });
        }
        if let Some(noms_number) = &event.noms_number {
            person_reference.push(PersonIdentifier {
                identifier_type: String::from("NOMS"),
                value: noms_number.clone(),
            });
        }

        Ok(Self {
            event_type: event.event_type.as_str().to_string(),
            version: event.schema_version,
            description: event.event_type.description().to_string(),
            detail_url: format!(
                "{}/events/cas3/{}/{}",
                detail_url_base.trim_end_matches('/'),
                event.event_type.slug(),
                event.id
            ),
            occurred_at: event.occurred_at.format(&Rfc3339)?,
            additional_information: AdditionalInformation {
                event_id: event.id,
                application_id: event.application_id,
                booking_id: event.booking_id,
                premises_id: event.premises_id,
                bedspace_id: event.bedspace_id,
            },
            person_reference,
        })
    }

    /// Serializes the envelope to its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
