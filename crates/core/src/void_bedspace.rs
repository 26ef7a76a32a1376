// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::conflicts::check_void_conflicts;
use crate::error::CoreError;
use crate::premises::PremisesService;
use cas3_domain::{
    Bedspace, DateRange, Premises, ReasonKind, ValidationErrors, VoidBedspace,
    VoidBedspaceCancellation,
};
use tracing::info;
use time::Date;
use uuid::Uuid;

/// Input for creating or updating a void bedspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoidBedspaceDetails {
    pub bedspace_id: Uuid,
    pub start_date: Date,
    pub end_date: Date,
    pub reason_id: Uuid,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
}

impl PremisesService {
    fn validate_void_bedspace(
        &self,
        premises: &Premises,
        details: &VoidBedspaceDetails,
    ) -> Result<ValidationErrors, CoreError> {
        let mut errors: ValidationErrors = ValidationErrors::new();

        if details.end_date < details.start_date {
            errors.add("$.endDate", "beforeStartDate");
        }

        if self
            .ports
            .reference_data
            .find_reason(ReasonKind::VoidBedspace, details.reason_id)?
            .is_none()
        {
            errors.add("$.reason", "doesNotExist");
        }

        let bedspace: Option<Bedspace> = self.find_bedspace_in(premises.id, details.bedspace_id)?;
        match bedspace {
            None => errors.add("$.bedspaceId", "doesNotExist"),
            Some(bedspace) => {
                if bedspace
                    .end_date
                    .is_some_and(|end_date| details.start_date > end_date)
                {
                    errors.add("$.startDate", "voidStartDateAfterBedspaceEndDate");
                }
                if details.start_date < bedspace.start_date {
                    errors.add("$.startDate", "voidStartDateBeforeBedspaceStartDate");
                }
                if bedspace
                    .end_date
                    .is_some_and(|end_date| details.end_date > end_date)
                {
                    errors.add("$.endDate", "voidEndDateAfterBedspaceEndDate");
                }
            }
        }

        Ok(errors)
    }

    fn check_void_window(
        &self,
        details: &VoidBedspaceDetails,
        void_bedspace_id: Option<Uuid>,
    ) -> Result<(), CoreError> {
        let window: DateRange = DateRange::new(details.start_date, details.end_date)
            .map_err(|_| CoreError::field("$.endDate", "beforeStartDate"))?;

        check_void_conflicts(
            self.ports.bookings.as_ref(),
            self.ports.void_bedspaces.as_ref(),
            self.ports.calendar.as_ref(),
            details.bedspace_id,
            &window,
            void_bedspace_id,
        )
    }

    /// Takes a bedspace out of use for a window.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for invalid dates, reason or bedspace,
    /// `CoreError::Conflict` if the window clashes with a booking or another
    /// void, or a fatal error on storage failure.
    pub fn create_void_bedspace(
        &self,
        premises: &Premises,
        details: VoidBedspaceDetails,
    ) -> Result<VoidBedspace, CoreError> {
        self.validate_void_bedspace(premises, &details)?
            .into_result()?;
        self.check_void_window(&details, None)?;

        let void_bedspace: VoidBedspace = VoidBedspace {
            id: Uuid::new_v4(),
            premises_id: premises.id,
            bedspace_id: details.bedspace_id,
            start_date: details.start_date,
            end_date: details.end_date,
            reason_id: details.reason_id,
            reference_number: details.reference_number,
            notes: details.notes,
            cancellation: None,
        };

        self.ports.void_bedspaces.save(&void_bedspace)?;
        info!(void_bedspace_id = %void_bedspace.id, bedspace_id = %void_bedspace.bedspace_id, "Created void bedspace");

        Ok(void_bedspace)
    }

    fn find_void_bedspace(
        &self,
        premises: &Premises,
        void_bedspace_id: Uuid,
    ) -> Result<VoidBedspace, CoreError> {
        self.ports
            .void_bedspaces
            .find_by_id(void_bedspace_id)?
            .filter(|void_bedspace| void_bedspace.premises_id == premises.id)
            .ok_or_else(|| CoreError::not_found("VoidBedspace", void_bedspace_id))
    }

    /// Changes the window, reason or notes of a void bedspace.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown void,
    /// `CoreError::Validation` if it is cancelled or the details are invalid,
    /// `CoreError::Conflict` if the new window clashes, or a fatal error on
    /// storage failure.
    pub fn update_void_bedspace(
        &self,
        premises: &Premises,
        void_bedspace_id: Uuid,
        details: VoidBedspaceDetails,
    ) -> Result<VoidBedspace, CoreError> {
        let mut void_bedspace: VoidBedspace = self.find_void_bedspace(premises, void_bedspace_id)?;

        if void_bedspace.is_cancelled() {
            return Err(CoreError::field("$.voidBedspaceId", "alreadyCancelled"));
        }

        self.validate_void_bedspace(premises, &details)?
            .into_result()?;
        self.check_void_window(&details, Some(void_bedspace_id))?;

        void_bedspace.bedspace_id = details.bedspace_id;
        void_bedspace.start_date = details.start_date;
        void_bedspace.end_date = details.end_date;
        void_bedspace.reason_id = details.reason_id;
        void_bedspace.reference_number = details.reference_number;
        void_bedspace.notes = details.notes;

        self.ports.void_bedspaces.save(&void_bedspace)?;
        info!(void_bedspace_id = %void_bedspace.id, "Updated void bedspace");

        Ok(void_bedspace)
    }

    /// Cancels a void bedspace, returning the bedspace to use.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown void,
    /// `CoreError::Validation` if it is already cancelled, or a fatal error on
    /// storage failure.
    pub fn cancel_void_bedspace(
        &self,
        premises: &Premises,
        void_bedspace_id: Uuid,
        notes: Option<String>,
    ) -> Result<VoidBedspace, CoreError> {
        let mut void_bedspace: VoidBedspace = self.find_void_bedspace(premises, void_bedspace_id)?;

        if void_bedspace.is_cancelled() {
            return Err(CoreError::field("$.voidBedspaceId", "alreadyCancelled"));
        }

        void_bedspace.cancellation = Some(VoidBedspaceCancellation {
            id: Uuid::new_v4(),
            notes,
            created_at: self.now(),
        });

        self.ports.void_bedspaces.save(&void_bedspace)?;
        info!(void_bedspace_id = %void_bedspace.id, "Cancelled void bedspace");

        Ok(void_bedspace)
    }
}
