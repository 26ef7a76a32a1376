// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::table::Table;
use cas3::{PortError, VoidBedspaceRepository};
use cas3_domain::VoidBedspace;
use tracing::debug;
use uuid::Uuid;

/// Void bedspaces held in memory.
#[derive(Debug)]
pub struct InMemoryVoidBedspaceRepository {
    table: Table<VoidBedspace>,
}

impl Default for InMemoryVoidBedspaceRepository {
    fn default() -> Self {
        Self {
            table: Table::new("void_bedspaces"),
        }
    }
}

impl VoidBedspaceRepository for InMemoryVoidBedspaceRepository {
    fn find_by_id(&self, id: Uuid) -> Result<Option<VoidBedspace>, PortError> {
        Ok(self.table.get(id)?)
    }

    fn save(&self, void_bedspace: &VoidBedspace) -> Result<(), PortError> {
        self.table.upsert(void_bedspace)?;
        debug!(table = self.table.name(), void_bedspace_id = %void_bedspace.id, "Saved void bedspace");
        Ok(())
    }

    fn find_by_premises(&self, premises_id: Uuid) -> Result<Vec<VoidBedspace>, PortError> {
        Ok(self
            .table
            .filter(|void_bedspace| void_bedspace.premises_id == premises_id)?)
    }

    fn find_by_bedspace(&self, bedspace_id: Uuid) -> Result<Vec<VoidBedspace>, PortError> {
        Ok(self
            .table
            .filter(|void_bedspace| void_bedspace.bedspace_id == bedspace_id)?)
    }
}
