//! Driven port for entities guarded by optimistic concurrency.
//!
//! Adapters provide three primitives: a plain lookup by id, and a guarded
//! update and delete that only act when the stored version equals the
//! expected one. The guarded calls must each be a single atomic storage
//! operation; a separate read followed by a write is not acceptable.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Version, Versioned};

use super::define_port_error;

define_port_error! {
    /// Errors raised by entity repositories.
    pub enum EntityRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "entity repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "entity repository query failed: {message}",
    }
}

/// Storage for one kind of versioned entity.
#[async_trait]
pub trait VersionedRepository: Send + Sync {
    /// Identifier type of the stored entity.
    type Id: fmt::Display + Send + Sync;
    /// The stored entity.
    type Entity: Versioned + Send + Sync;
    /// Allow-listed field assignments applied by a guarded update.
    type Changes: Send + Sync;

    /// Fetch the entity by id alone.
    async fn find_by_id(&self, id: &Self::Id)
    -> Result<Option<Self::Entity>, EntityRepositoryError>;

    /// Atomically apply `changes`, stamp `updated_at`, and increment the
    /// version, but only when the stored version equals `expected`.
    ///
    /// Returns the post-mutation entity, or `None` when no row matched both
    /// the id and the expected version.
    async fn update_if_version(
        &self,
        id: &Self::Id,
        expected: Version,
        changes: &Self::Changes,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Self::Entity>, EntityRepositoryError>;

    /// Atomically remove the entity when the stored version equals
    /// `expected`. Returns whether a row was removed.
    async fn delete_if_version(
        &self,
        id: &Self::Id,
        expected: Version,
    ) -> Result<bool, EntityRepositoryError>;
}
