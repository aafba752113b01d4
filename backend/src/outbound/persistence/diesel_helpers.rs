//! Shared helpers for Diesel repository implementations.
//!
//! This module provides:
//! - Error mapping from pool and Diesel errors to repository errors
//! - Version casting between database and domain types
//! - Row collection with conversion error mapping

use tracing::{debug, warn};

use crate::domain::Version;
use crate::domain::ports::EntityRepositoryError;

use super::pool::PoolError;

/// Map pool errors to repository connection errors.
pub fn map_pool_error(error: PoolError) -> EntityRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            EntityRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to repository errors.
///
/// Closed connections surface as connection failures so callers can report
/// the store as unavailable; everything else is a query failure with a
/// generic message.
pub fn map_diesel_error(error: diesel::result::Error) -> EntityRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => EntityRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => EntityRepositoryError::query("database query error"),
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::ClosedConnection => {
                EntityRepositoryError::connection("database connection error")
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                warn!(
                    constraint_name = ?info.constraint_name(),
                    "unexpected foreign key violation"
                );
                EntityRepositoryError::query("foreign key violation")
            }
            _ => EntityRepositoryError::query("database error"),
        },
        _ => EntityRepositoryError::query("database error"),
    }
}

/// Whether `error` is a foreign key violation.
///
/// Child inserts (likes, comments, memberships) use this to detect a missing
/// parent in the same statement that performs the insert.
pub fn is_foreign_key_violation(error: &diesel::result::Error) -> bool {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)
    )
}

/// Convert a stored version into a domain version.
///
/// The `version >= 1` check constraint keeps stored values positive; anything
/// else is reported as a conversion failure.
pub fn version_from_db(version: i32) -> Result<Version, String> {
    u32::try_from(version)
        .ok()
        .filter(|value| *value >= Version::INITIAL.get())
        .map(Version::new)
        .ok_or_else(|| format!("stored version {version} is out of range"))
}

/// Convert a domain version into its stored form.
pub fn version_for_db(version: Version) -> Result<i32, EntityRepositoryError> {
    i32::try_from(version.get())
        .map_err(|_| EntityRepositoryError::query(format!("version {version} is out of range")))
}

/// Stored form of an expected version used as a write guard.
///
/// No row can hold a version beyond the column range, so `None` means the
/// guard cannot match and the write is a miss.
pub fn guard_version(expected: Version) -> Option<i32> {
    i32::try_from(expected.get()).ok()
}

/// Convert a row count into a `usize`.
pub fn count_from_db(count: i64) -> Result<usize, EntityRepositoryError> {
    usize::try_from(count)
        .map_err(|_| EntityRepositoryError::query(format!("row count {count} is out of range")))
}

/// Collect row conversion results, mapping the first error to a query error.
pub fn collect_rows<R, T>(rows: Vec<R>) -> Result<Vec<T>, EntityRepositoryError>
where
    T: TryFrom<R, Error = String>,
{
    rows.into_iter()
        .map(T::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(EntityRepositoryError::query)
}
