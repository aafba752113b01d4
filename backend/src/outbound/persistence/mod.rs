//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the post and room repository ports backed by
//! PostgreSQL via `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories translate between Diesel rows and
//!   domain types; version rules live in the domain gate.
//! - **Single-statement guards**: every versioned update or delete carries
//!   the expected version in its `WHERE` clause.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//!
//! # Example
//!
//! ```ignore
//! use agora::outbound::persistence::{DbPool, DieselPostRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/agora")).await?;
//! let posts = DieselPostRepository::new(pool);
//! ```

pub(crate) mod diesel_helpers;
mod diesel_post_repository;
mod diesel_room_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_post_repository::DieselPostRepository;
pub use diesel_room_repository::DieselRoomRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
