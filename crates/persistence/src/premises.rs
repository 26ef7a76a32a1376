// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::table::Table;
use cas3::{BedspaceRepository, PortError, PremisesRepository};
use cas3_domain::{Bedspace, Premises};
use tracing::debug;
use uuid::Uuid;

/// Premises held in memory.
#[derive(Debug)]
pub struct InMemoryPremisesRepository {
    table: Table<Premises>,
}

impl Default for InMemoryPremisesRepository {
    fn default() -> Self {
        Self {
            table: Table::new("premises"),
        }
    }
}

impl PremisesRepository for InMemoryPremisesRepository {
    fn find_by_id(&self, id: Uuid) -> Result<Option<Premises>, PortError> {
        Ok(self.table.get(id)?)
    }

    fn save(&self, premises: &Premises) -> Result<(), PortError> {
        self.table.upsert(premises)?;
        debug!(table = self.table.name(), premises_id = %premises.id, status = premises.status.as_str(), "Saved premises");
        Ok(())
    }

    fn name_exists(&self, name: &str, excluding: Option<Uuid>) -> Result<bool, PortError> {
        let lowered: String = name.trim().to_lowercase();
        Ok(self.table.read()?.iter().any(|premises| {
            Some(premises.id) != excluding && premises.name.trim().to_lowercase() == lowered
        }))
    }
}

/// Bedspaces held in memory.
#[derive(Debug)]
pub struct InMemoryBedspaceRepository {
    table: Table<Bedspace>,
}

impl Default for InMemoryBedspaceRepository {
    fn default() -> Self {
        Self {
            table: Table::new("bedspaces"),
        }
    }
}

impl BedspaceRepository for InMemoryBedspaceRepository {
    fn find_by_id(&self, id: Uuid) -> Result<Option<Bedspace>, PortError> {
        Ok(self.table.get(id)?)
    }

    fn find_by_premises(&self, premises_id: Uuid) -> Result<Vec<Bedspace>, PortError> {
        Ok(self
            .table
            .filter(|bedspace| bedspace.premises_id == premises_id)?)
    }

    fn save(&self, bedspace: &Bedspace) -> Result<(), PortError> {
        self.table.upsert(bedspace)?;
        debug!(table = self.table.name(), bedspace_id = %bedspace.id, "Saved bedspace");
        Ok(())
    }
}
