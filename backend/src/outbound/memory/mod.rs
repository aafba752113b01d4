//! Process-local repository adapters.
//!
//! Used when no database URL is configured, and by the HTTP integration
//! tests. Each store keeps its state behind one mutex so every check and the
//! mutation it guards happen in a single critical section, matching the
//! atomicity the PostgreSQL adapters get from single statements.

mod post_store;
mod room_store;

use std::sync::{Mutex, MutexGuard};

use crate::domain::Version;
use crate::domain::ports::EntityRepositoryError;

pub use post_store::InMemoryPostRepository;
pub use room_store::InMemoryRoomRepository;

fn lock<T>(state: &Mutex<T>) -> Result<MutexGuard<'_, T>, EntityRepositoryError> {
    state
        .lock()
        .map_err(|_| EntityRepositoryError::query("in-memory store poisoned"))
}

fn next_version(current: Version) -> Result<Version, EntityRepositoryError> {
    current
        .checked_next()
        .ok_or_else(|| EntityRepositoryError::query(format!("version {current} cannot advance")))
}
