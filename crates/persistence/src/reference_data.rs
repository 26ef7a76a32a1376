// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference data lookups held in memory.
//!
//! Reference data is read-only to the engine; the `insert_*` methods exist
//! to seed it.

use crate::error::PersistenceError;
use crate::table::Table;
use cas3::{PortError, ReferenceDataRepository};
use cas3_domain::{
    Characteristic, LocalAuthorityArea, ProbationDeliveryUnit, ProbationRegion, Reason,
    ReasonKind,
};
use uuid::Uuid;

#[derive(Debug)]
pub struct InMemoryReferenceData {
    reasons: Table<Reason>,
    characteristics: Table<Characteristic>,
    probation_regions: Table<ProbationRegion>,
    local_authority_areas: Table<LocalAuthorityArea>,
    probation_delivery_units: Table<ProbationDeliveryUnit>,
}

impl Default for InMemoryReferenceData {
    fn default() -> Self {
        Self {
            reasons: Table::new("reasons"),
            characteristics: Table::new("characteristics"),
            probation_regions: Table::new("probation_regions"),
            local_authority_areas: Table::new("local_authority_areas"),
            probation_delivery_units: Table::new("probation_delivery_units"),
        }
    }
}

impl InMemoryReferenceData {
    /// # Errors
    ///
    /// Returns an error if the table lock is poisoned.
    pub fn insert_reason(&self, reason: &Reason) -> Result<(), PersistenceError> {
        self.reasons.upsert(reason)
    }

    /// # Errors
    ///
    /// Returns an error if the table lock is poisoned.
    pub fn insert_characteristic(
        &self,
        characteristic: &Characteristic,
    ) -> Result<(), PersistenceError> {
        self.characteristics.upsert(characteristic)
    }

    /// # Errors
    ///
    /// Returns an error if the table lock is poisoned.
    pub fn insert_probation_region(&self, region: &ProbationRegion) -> Result<(), PersistenceError> {
        self.probation_regions.upsert(region)
    }

    /// # Errors
    ///
    /// Returns an error if the table lock is poisoned.
    pub fn insert_local_authority_area(
        &self,
        area: &LocalAuthorityArea,
    ) -> Result<(), PersistenceError> {
        self.local_authority_areas.upsert(area)
    }

    /// # Errors
    ///
    /// Returns an error if the table lock is poisoned.
    pub fn insert_probation_delivery_unit(
        &self,
        unit: &ProbationDeliveryUnit,
    ) -> Result<(), PersistenceError> {
        self.probation_delivery_units.upsert(unit)
    }
}

impl ReferenceDataRepository for InMemoryReferenceData {
    fn find_reason(&self, kind: ReasonKind, id: Uuid) -> Result<Option<Reason>, PortError> {
        Ok(self.reasons.get(id)?.filter(|reason| reason.kind == kind))
    }

    fn find_characteristic(&self, id: Uuid) -> Result<Option<Characteristic>, PortError> {
        Ok(self.characteristics.get(id)?)
    }

    fn find_probation_region(&self, id: Uuid) -> Result<Option<ProbationRegion>, PortError> {
        Ok(self.probation_regions.get(id)?)
    }

    fn find_local_authority_area(
        &self,
        id: Uuid,
    ) -> Result<Option<LocalAuthorityArea>, PortError> {
        Ok(self.local_authority_areas.get(id)?)
    }

    fn find_probation_delivery_unit(
        &self,
        id: Uuid,
    ) -> Result<Option<ProbationDeliveryUnit>, PortError> {
        Ok(self.probation_delivery_units.get(id)?)
    }
}
