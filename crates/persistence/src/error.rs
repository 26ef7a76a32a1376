// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use cas3::PortError;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A table lock was poisoned by a panicking writer.
    LockPoisoned(&'static str),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// The requested record was not found.
    NotFound { table: &'static str, id: String },
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LockPoisoned(table) => write!(f, "Lock poisoned for table {table}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::NotFound { table, id } => write!(f, "Not found in {table}: {id}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<PersistenceError> for PortError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::SerializationError(msg) => Self::serialization(msg),
            PersistenceError::LockPoisoned(_) => Self::storage("lock", err),
            PersistenceError::NotFound { table, .. } => Self::storage(table, err),
        }
    }
}
