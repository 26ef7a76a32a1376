// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! An insertion-ordered table of records keyed by id.
//!
//! Backs the in-memory fakes only. Every lookup is a linear scan.

use crate::error::PersistenceError;
use cas3_domain::{
    Bedspace, Booking, Characteristic, LocalAuthorityArea, Premises, ProbationDeliveryUnit,
    ProbationRegion, Reason, VoidBedspace,
};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// A record with a stable primary key.
pub trait Keyed {
    fn key(&self) -> Uuid;
}

impl Keyed for Booking {
    fn key(&self) -> Uuid {
        self.id
    }
}

impl Keyed for Premises {
    fn key(&self) -> Uuid {
        self.id
    }
}

impl Keyed for Bedspace {
    fn key(&self) -> Uuid {
        self.id
    }
}

impl Keyed for VoidBedspace {
    fn key(&self) -> Uuid {
        self.id
    }
}

impl Keyed for Reason {
    fn key(&self) -> Uuid {
        self.id
    }
}

impl Keyed for Characteristic {
    fn key(&self) -> Uuid {
        self.id
    }
}

impl Keyed for ProbationRegion {
    fn key(&self) -> Uuid {
        self.id
    }
}

impl Keyed for LocalAuthorityArea {
    fn key(&self) -> Uuid {
        self.id
    }
}

impl Keyed for ProbationDeliveryUnit {
    fn key(&self) -> Uuid {
        self.id
    }
}

/// Rows are returned in the order they were first inserted.
#[derive(Debug)]
pub struct Table<T> {
    name: &'static str,
    rows: RwLock<Vec<T>>,
}

impl<T: Keyed + Clone> Table<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            rows: RwLock::new(Vec::new()),
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn read(&self) -> Result<RwLockReadGuard<'_, Vec<T>>, PersistenceError> {
        self.rows
            .read()
            .map_err(|_| PersistenceError::LockPoisoned(self.name))
    }

    pub fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<T>>, PersistenceError> {
        self.rows
            .write()
            .map_err(|_| PersistenceError::LockPoisoned(self.name))
    }

    pub fn get(&self, id: Uuid) -> Result<Option<T>, PersistenceError> {
        Ok(self.read()?.iter().find(|row| row.key() == id).cloned())
    }

    /// Inserts `row`, replacing any row with the same key in place.
    pub fn upsert(&self, row: &T) -> Result<(), PersistenceError> {
        let mut rows = self.write()?;
        match rows.iter_mut().find(|existing| existing.key() == row.key()) {
            Some(existing) => *existing = row.clone(),
            None => rows.push(row.clone()),
        }
        Ok(())
    }

    pub fn filter<P>(&self, predicate: P) -> Result<Vec<T>, PersistenceError>
    where
        P: Fn(&T) -> bool,
    {
        Ok(self
            .read()?
            .iter()
            .filter(|row| predicate(row))
            .cloned()
            .collect())
    }
}
