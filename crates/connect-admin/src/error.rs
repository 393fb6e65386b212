//! Error types for the property source and persistence store.

use thiserror::Error;

use crate::store::Collection;

/// Error returned by a [`PropertySource`](crate::PropertySource).
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("unknown model {0:?}")]
    UnknownModel(String),

    #[error("malformed property payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error returned by a [`PersistenceStore`](crate::PersistenceStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{collection} record {key:?} already exists")]
    DuplicateKey { collection: Collection, key: String },

    #[error("{collection} record {key:?} not found")]
    NotFound { collection: Collection, key: String },

    #[error("{collection} record {key:?} is malformed: {message}")]
    Malformed {
        collection: Collection,
        key: String,
        message: String,
    },
}

impl StoreError {
    /// Returns true if the error reports a missing record.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
