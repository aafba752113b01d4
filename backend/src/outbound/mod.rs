//! Outbound adapters (driven side of the hexagon).
//!
//! Adapters are thin translators between the domain's repository ports and
//! concrete storage. `persistence` targets PostgreSQL; `memory` keeps state
//! in process for development and tests.

pub mod memory;
pub mod persistence;
