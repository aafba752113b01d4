//! Optimistic concurrency gate shared by every versioned entity kind.
//!
//! The gate issues one guarded storage call keyed on `(id, expected
//! version)`. Only when that call misses does it re-read the entity by id to
//! tell a missing entity apart from a stale version. The re-read is not
//! atomic with the failed write, so the reported current version is a
//! best-effort hint that may already be outdated.
//!
//! The gate never retries.

use std::sync::Arc;

use mockable::Clock;
use serde_json::json;
use tracing::{debug, error};

use super::ports::{EntityRepositoryError, VersionedRepository};
use super::{EntityKind, Error, Version, Versioned};

/// Result of a guarded mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome<T> {
    /// The expected version matched and the mutation was applied.
    Applied(T),
    /// No entity with the id exists.
    NotFound,
    /// The entity exists at a different version.
    Conflict {
        /// Version observed by the disambiguating read.
        current: Version,
    },
}

impl<T> GateOutcome<T> {
    /// Translate the outcome into the domain result reported to callers.
    ///
    /// # Errors
    ///
    /// Returns a not-found error, or a conflict error whose details carry
    /// both the expected and the current version.
    pub fn into_result(
        self,
        kind: EntityKind,
        id: &impl std::fmt::Display,
        expected: Version,
    ) -> Result<T, Error> {
        match self {
            Self::Applied(value) => Ok(value),
            Self::NotFound => Err(not_found_error(kind, id)),
            Self::Conflict { current } => Err(conflict_error(kind, expected, current)),
        }
    }
}

/// Not-found error for an entity kind.
pub fn not_found_error(kind: EntityKind, id: &impl std::fmt::Display) -> Error {
    Error::not_found(format!("{kind} {id} not found"))
        .with_details(json!({ "code": "not_found", "id": id.to_string() }))
}

/// Conflict error carrying the version the caller should retry with.
pub fn conflict_error(kind: EntityKind, expected: Version, current: Version) -> Error {
    Error::conflict(format!("{kind} version conflict")).with_details(json!({
        "code": "version_mismatch",
        "expectedVersion": expected.get(),
        "currentVersion": current.get(),
    }))
}

/// Invalid-request error for an update that assigns nothing.
pub fn empty_update_error(kind: EntityKind) -> Error {
    Error::invalid_request(format!("{kind} update must change at least one field"))
        .with_details(json!({ "code": "empty_update" }))
}

/// Map a repository failure onto a transport-level domain error.
///
/// Storage failures are never reported as not-found or conflict.
pub fn map_repository_error(error: EntityRepositoryError) -> Error {
    error!(%error, "entity repository failure");
    match error {
        EntityRepositoryError::Connection { .. } => {
            Error::service_unavailable("storage is unavailable")
        }
        EntityRepositoryError::Query { message } => Error::internal(message),
    }
}

/// Conditional update and delete over a [`VersionedRepository`].
pub struct VersionGate<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> Clone for VersionGate<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R> VersionGate<R>
where
    R: VersionedRepository,
{
    /// Create a gate over `repository`, stamping updates with `clock`.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Apply `changes` when the entity is still at `expected`.
    ///
    /// # Errors
    ///
    /// Propagates repository failures unchanged.
    pub async fn conditional_update(
        &self,
        id: &R::Id,
        expected: Version,
        changes: &R::Changes,
    ) -> Result<GateOutcome<R::Entity>, EntityRepositoryError> {
        let now = self.clock.utc();
        match self
            .repository
            .update_if_version(id, expected, changes, now)
            .await?
        {
            Some(entity) => Ok(GateOutcome::Applied(entity)),
            None => self.disambiguate(id, expected).await,
        }
    }

    /// Remove the entity when it is still at `expected`.
    ///
    /// # Errors
    ///
    /// Propagates repository failures unchanged.
    pub async fn conditional_delete(
        &self,
        id: &R::Id,
        expected: Version,
    ) -> Result<GateOutcome<()>, EntityRepositoryError> {
        if self.repository.delete_if_version(id, expected).await? {
            Ok(GateOutcome::Applied(()))
        } else {
            self.disambiguate(id, expected).await
        }
    }

    async fn disambiguate<T>(
        &self,
        id: &R::Id,
        expected: Version,
    ) -> Result<GateOutcome<T>, EntityRepositoryError> {
        let kind = <R::Entity as Versioned>::KIND;
        match self.repository.find_by_id(id).await? {
            None => {
                debug!(%kind, %id, "guarded write missed: entity absent");
                Ok(GateOutcome::NotFound)
            }
            Some(entity) => {
                let current = entity.version();
                debug!(%kind, %id, %expected, %current, "guarded write missed: version conflict");
                Ok(GateOutcome::Conflict { current })
            }
        }
    }
}

#[cfg(test)]
#[path = "version_gate_tests.rs"]
mod tests;
