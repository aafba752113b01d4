//! Community rooms and posts behind optimistic concurrency versions.
//!
//! Layout follows a hexagonal split: [`domain`] holds entities, the version
//! gate, and the ports; [`inbound`] adapts HTTP onto the driving ports;
//! [`outbound`] implements the repositories over PostgreSQL or memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
