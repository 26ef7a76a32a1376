// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Premises and bedspace maintenance.
//!
//! `PremisesService` owns every premises-level operation. Its archive
//! scheduling lives in `archive`, void bedspaces in `void_bedspace` and
//! history replay in `archive_history`.

use crate::config::DomainEventsConfig;
use crate::error::CoreError;
use crate::ports::Ports;
use crate::publisher::DomainEventPublisher;
use cas3_domain::{
    Availability, Bedspace, Characteristic, ModelScope, Premises, PremisesCascade, PremisesStatus,
    ProbationDeliveryUnit, ScopeMismatch, ServiceScope, User, ValidationErrors, WindowViolation,
    SCHEDULING_WINDOW_DAYS, bedspace_reference_error, calculate_availability, check_window,
    recompute_premises_status,
};
use cas3_events::DomainEventBuilder;
use time::{Date, OffsetDateTime};
use tracing::{debug, info};
use uuid::Uuid;

/// Editable premises fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PremisesDetails {
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
    pub turnaround_working_days: i32,
}

/// Input for a new bedspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBedspace {
    pub reference: String,
    pub start_date: Date,
    pub characteristic_ids: Vec<Uuid>,
    pub notes: Option<String>,
}

/// Editable bedspace fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BedspaceDetails {
    pub reference: String,
    pub characteristic_ids: Vec<Uuid>,
    pub notes: Option<String>,
}

/// Maintains premises, bedspaces and void bedspaces and schedules their archival.
pub struct PremisesService {
    pub(crate) ports: Ports,
    pub(crate) publisher: DomainEventPublisher,
}

impl PremisesService {
    pub fn new(ports: Ports, events: DomainEventsConfig) -> Self {
        let publisher: DomainEventPublisher =
            DomainEventPublisher::new(ports.domain_events.clone(), ports.event_bus.clone(), events);
        Self { ports, publisher }
    }

    pub(crate) fn now(&self) -> OffsetDateTime {
        self.ports.clock.now()
    }

    pub(crate) fn today(&self) -> Date {
        self.ports.clock.today()
    }

    /// The bedspace with `bedspace_id`, if it belongs to `premises_id`.
    pub(crate) fn find_bedspace_in(
        &self,
        premises_id: Uuid,
        bedspace_id: Uuid,
    ) -> Result<Option<Bedspace>, CoreError> {
        Ok(self
            .ports
            .bedspaces
            .find_by_id(bedspace_id)?
            .filter(|bedspace| bedspace.premises_id == premises_id))
    }

    pub(crate) fn find_premises(&self, premises_id: Uuid) -> Result<Premises, CoreError> {
        self.ports
            .premises
            .find_by_id(premises_id)?
            .ok_or_else(|| CoreError::not_found("Premises", premises_id))
    }

    /// Brings the stored premises status in line with its bedspaces.
    ///
    /// Emits `premises.archived` or `premises.unarchived` when the status
    /// changes and returns the change made.
    pub(crate) fn cascade_premises_status(
        &self,
        user: &User,
        premises_id: Uuid,
    ) -> Result<PremisesCascade, CoreError> {
        let mut premises: Premises = self.find_premises(premises_id)?;
        let bedspaces: Vec<Bedspace> = self.ports.bedspaces.find_by_premises(premises_id)?;
        let cascade: PremisesCascade = recompute_premises_status(&premises, &bedspaces);
        let builder: DomainEventBuilder = DomainEventBuilder::new(self.now());

        match cascade {
            PremisesCascade::Unchanged => {
                debug!(premises_id = %premises_id, "Premises status unchanged");
            }
            PremisesCascade::Archive { end_date } => {
                let previous_end_date: Option<Date> = premises.end_date;
                premises.archive(end_date);
                self.ports.premises.save(&premises)?;
                info!(premises_id = %premises_id, end_date = %end_date, "Archived premises after last bedspace archived");
                self.publisher.publish(&builder.premises_archived(
                    &premises,
                    end_date,
                    previous_end_date,
                    user,
                ))?;
            }
            PremisesCascade::Unarchive { start_date } => {
                let previous_start_date: Date = premises.start_date;
                let previous_end_date: Option<Date> = premises.end_date;
                premises.unarchive(start_date);
                self.ports.premises.save(&premises)?;
                info!(premises_id = %premises_id, start_date = %start_date, "Unarchived premises after bedspace came back online");
                self.publisher.publish(&builder.premises_unarchived(
                    &premises,
                    previous_start_date,
                    previous_end_date,
                    start_date,
                    user,
                ))?;
            }
        }

        Ok(cascade)
    }

    fn validate_characteristics(
        &self,
        characteristic_ids: &[Uuid],
        model: ModelScope,
        errors: &mut ValidationErrors,
    ) -> Result<(), CoreError> {
        for (index, characteristic_id) in characteristic_ids.iter().enumerate() {
            let path: String = format!("$.characteristics[{index}]");
            let characteristic: Option<Characteristic> = self
                .ports
                .reference_data
                .find_characteristic(*characteristic_id)?;

            match characteristic {
                None => errors.add(&path, "doesNotExist"),
                Some(characteristic) => {
                    match characteristic.scope_mismatch(model, ServiceScope::TemporaryAccommodation)
                    {
                        Some(ScopeMismatch::Model) => {
                            errors.add(&path, "incorrectCharacteristicModelScope");
                        }
                        Some(ScopeMismatch::Service) => {
                            errors.add(&path, "incorrectCharacteristicServiceScope");
                        }
                        None => {}
                    }
                }
            }
        }
        Ok(())
    }

    fn validate_premises_details(
        &self,
        details: &PremisesDetails,
        premises_id: Option<Uuid>,
    ) -> Result<ValidationErrors, CoreError> {
        let mut errors: ValidationErrors = ValidationErrors::new();

        if details.name.trim().is_empty() {
            errors.add("$.name", "empty");
        } else if self.ports.premises.name_exists(details.name.trim(), premises_id)? {
            errors.add("$.name", "notUnique");
        }

        if details.address_line1.trim().is_empty() {
            errors.add("$.address", "empty");
        }

        if details.postcode.trim().is_empty() {
            errors.add("$.postcode", "empty");
        }

        if details.turnaround_working_days < 0 {
            errors.add("$.turnaroundWorkingDays", "isNotAPositiveInteger");
        }

        if self
            .ports
            .reference_data
            .find_probation_region(details.probation_region_id)?
            .is_none()
        {
            errors.add("$.probationRegionId", "doesNotExist");
        }

        if let Some(local_authority_area_id) = details.local_authority_area_id {
            if self
                .ports
                .reference_data
                .find_local_authority_area(local_authority_area_id)?
                .is_none()
            {
                errors.add("$.localAuthorityAreaId", "doesNotExist");
            }
        }

        let delivery_unit: Option<ProbationDeliveryUnit> = self
            .ports
            .reference_data
            .find_probation_delivery_unit(details.probation_delivery_unit_id)?;
        if !delivery_unit.is_some_and(|unit| unit.probation_region_id == details.probation_region_id)
        {
            errors.add("$.probationDeliveryUnitId", "doesNotExist");
        }

        self.validate_characteristics(&details.characteristic_ids, ModelScope::Premises, &mut errors)?;

        Ok(errors)
    }

    /// Creates a premises that starts today.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for invalid details, or a fatal error
    /// on storage failure.
    pub fn create_premises(&self, details: PremisesDetails) -> Result<Premises, CoreError> {
        self.validate_premises_details(&details, None)?.into_result()?;

        let premises: Premises = Premises {
            id: Uuid::new_v4(),
            name: details.name.trim().to_string(),
            address_line1: details.address_line1,
            address_line2: details.address_line2,
            town: details.town,
            postcode: details.postcode,
            probation_region_id: details.probation_region_id,
            local_authority_area_id: details.local_authority_area_id,
            probation_delivery_unit_id: details.probation_delivery_unit_id,
            characteristic_ids: details.characteristic_ids,
            notes: details.notes,
            status: PremisesStatus::Active,
            start_date: self.today(),
            end_date: None,
            turnaround_working_days: u32::try_from(details.turnaround_working_days).unwrap_or(0),
            created_at: self.now(),
        };

        self.ports.premises.save(&premises)?;
        info!(premises_id = %premises.id, name = %premises.name, "Created premises");

        Ok(premises)
    }

    /// Replaces the editable details of a premises.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown premises,
    /// `CoreError::Validation` for invalid details, or a fatal error on
    /// storage failure.
    pub fn update_premises(
        &self,
        premises_id: Uuid,
        details: PremisesDetails,
    ) -> Result<Premises, CoreError> {
        let mut premises: Premises = self.find_premises(premises_id)?;
        self.validate_premises_details(&details, Some(premises_id))?
            .into_result()?;

        premises.name = details.name.trim().to_string();
        premises.address_line1 = details.address_line1;
        premises.address_line2 = details.address_line2;
        premises.town = details.town;
        premises.postcode = details.postcode;
        premises.probation_region_id = details.probation_region_id;
        premises.local_authority_area_id = details.local_authority_area_id;
        premises.probation_delivery_unit_id = details.probation_delivery_unit_id;
        premises.characteristic_ids = details.characteristic_ids;
        premises.notes = details.notes;
        premises.turnaround_working_days =
            u32::try_from(details.turnaround_working_days).unwrap_or(0);

        self.ports.premises.save(&premises)?;
        info!(premises_id = %premises.id, "Updated premises");

        Ok(premises)
    }

    fn validate_reference(
        &self,
        premises_id: Uuid,
        reference: &str,
        bedspace_id: Option<Uuid>,
        errors: &mut ValidationErrors,
    ) -> Result<(), CoreError> {
        let siblings: Vec<Bedspace> = self.ports.bedspaces.find_by_premises(premises_id)?;
        let existing: Vec<&str> = siblings
            .iter()
            .filter(|bedspace| Some(bedspace.id) != bedspace_id)
            .map(|bedspace| bedspace.reference.as_str())
            .collect();

        if let Some(code) = bedspace_reference_error(reference, &existing) {
            errors.add("$.reference", code);
        }
        Ok(())
    }

    /// Adds a bedspace to a premises.
    ///
    /// Creating a bedspace in an archived premises brings the premises back
    /// online from the bedspace start date.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for an invalid reference, start date or
    /// characteristic, or a fatal error on storage failure.
    pub fn create_bedspace(
        &self,
        user: &User,
        premises: &Premises,
        request: NewBedspace,
    ) -> Result<Bedspace, CoreError> {
        let mut errors: ValidationErrors = ValidationErrors::new();

        self.validate_reference(premises.id, &request.reference, None, &mut errors)?;

        match check_window(request.start_date, self.today(), SCHEDULING_WINDOW_DAYS) {
            Some(WindowViolation::InThePast) => {
                errors.add("$.startDate", "invalidStartDateInThePast");
            }
            Some(WindowViolation::InTheFuture) => {
                errors.add("$.startDate", "invalidStartDateInTheFuture");
            }
            None => {}
        }

        match premises.end_date {
            Some(end_date) if premises.is_archived() && request.start_date <= end_date => {
                errors.add("$.startDate", "startDateBeforePremisesEndDate");
            }
            _ if request.start_date < premises.start_date => {
                errors.add("$.startDate", "startDateBeforePremisesStartDate");
            }
            _ => {}
        }

        self.validate_characteristics(&request.characteristic_ids, ModelScope::Room, &mut errors)?;

        errors.into_result()?;

        let bedspace: Bedspace = Bedspace {
            id: Uuid::new_v4(),
            premises_id: premises.id,
            reference: request.reference.trim().to_string(),
            characteristic_ids: request.characteristic_ids,
            notes: request.notes,
            start_date: request.start_date,
            end_date: None,
            created_at: self.now(),
        };

        self.ports.bedspaces.save(&bedspace)?;
        info!(bedspace_id = %bedspace.id, premises_id = %premises.id, "Created bedspace");

        self.cascade_premises_status(user, premises.id)?;

        Ok(bedspace)
    }

    /// Replaces the editable details of a bedspace.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown bedspace,
    /// `CoreError::Validation` if it is archived or the details are invalid,
    /// or a fatal error on storage failure.
    pub fn update_bedspace(
        &self,
        premises: &Premises,
        bedspace_id: Uuid,
        details: BedspaceDetails,
    ) -> Result<Bedspace, CoreError> {
        let mut bedspace: Bedspace = self
            .find_bedspace_in(premises.id, bedspace_id)?
            .ok_or_else(|| CoreError::not_found("Bedspace", bedspace_id))?;

        if bedspace.is_archived(self.today()) {
            return Err(CoreError::field("$.bedspaceId", "bedspaceArchived"));
        }

        let mut errors: ValidationErrors = ValidationErrors::new();
        self.validate_reference(premises.id, &details.reference, Some(bedspace_id), &mut errors)?;
        self.validate_characteristics(&details.characteristic_ids, ModelScope::Room, &mut errors)?;
        errors.into_result()?;

        bedspace.reference = details.reference.trim().to_string();
        bedspace.characteristic_ids = details.characteristic_ids;
        bedspace.notes = details.notes;

        self.ports.bedspaces.save(&bedspace)?;
        info!(bedspace_id = %bedspace.id, "Updated bedspace");

        Ok(bedspace)
    }

    /// Daily occupancy for each day in `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns a fatal error if bookings or voids cannot be read.
    pub fn get_availability_for_range(
        &self,
        premises: &Premises,
        start: Date,
        end: Date,
    ) -> Result<Vec<Availability>, CoreError> {
        let bookings = self.ports.bookings.find_by_premises(premises.id)?;
        let voids = self.ports.void_bedspaces.find_by_premises(premises.id)?;

        Ok(calculate_availability(start, end, &bookings, &voids))
    }
}
