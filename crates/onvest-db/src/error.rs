//! Database-specific error types and conversions.

use onvest_core::error::OnvestError;
use thiserror::Error;

/// Database-layer error type.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("migration failed: {0}")]
    Migration(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    #[error("{entity} already exists")]
    Duplicate { entity: String },

    /// A stored row could not be mapped back to a domain value.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

impl From<DbError> for OnvestError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => OnvestError::NotFound { entity, id },
            DbError::Duplicate { entity } => OnvestError::AlreadyExists { entity },
            other => OnvestError::Database(other.to_string()),
        }
    }
}
