//! Storage-specific error type wrapping sqlx errors.

use wakehub_domain::error::{ConflictError, WakeHubError};

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for WakeHubError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Map an insert/update failure, surfacing unique-constraint violations as
/// a domain [`ConflictError`] instead of an opaque storage error.
pub(crate) fn map_write_err(
    err: sqlx::Error,
    entity: &'static str,
    field: &'static str,
) -> WakeHubError {
    if err
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation())
    {
        ConflictError { entity, field }.into()
    } else {
        StorageError::from(err).into()
    }
}
