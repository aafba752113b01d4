//! Shared helpers for integration tests that run against embedded PostgreSQL.
//!
//! Each suite provisions its own cluster and a freshly migrated database, then
//! drives the Diesel repositories through the public crate API.

#![allow(dead_code)]

mod cluster_skip;
mod pg_embed;

use agora::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use tokio::runtime::Runtime;
use uuid::Uuid;

pub use cluster_skip::handle_cluster_setup_failure;
pub use pg_embed::test_cluster;

/// Pool size used by the repository suites; large enough for the
/// concurrent-writer scenarios to hold a connection each.
pub const POOL_SIZE: u32 = 8;

/// Render a `postgres` error with its SQLSTATE and message.
///
/// The `Display` implementation collapses database errors to `db error`,
/// which hides the useful part in CI logs.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// Create an empty database on `cluster` and return its URL.
pub fn create_database(cluster: &TestCluster) -> Result<String, String> {
    let name = format!("agora_{}", Uuid::new_v4().simple());
    let admin_url = cluster.connection().database_url("postgres");
    let mut client =
        Client::connect(&admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("CREATE DATABASE {name}"))
        .map_err(|err| format_postgres_error(&err))?;
    Ok(cluster.connection().database_url(&name))
}

/// A migrated database on a running cluster with a pool over it.
pub struct Provisioned {
    pub cluster: TestCluster,
    pub database_url: String,
    pub pool: DbPool,
}

/// Start a cluster, create and migrate a database, and pool connections to it.
pub fn provision(runtime: &Runtime) -> Result<Provisioned, String> {
    let cluster = test_cluster()?;
    let database_url = create_database(&cluster)?;

    let pool = runtime.block_on(async {
        run_pending_migrations(&database_url)
            .await
            .map_err(|err| err.to_string())?;
        let config = PoolConfig::new(&database_url)
            .with_max_size(POOL_SIZE)
            .with_min_idle(Some(1));
        DbPool::new(config).await.map_err(|err| err.to_string())
    })?;

    Ok(Provisioned {
        cluster,
        database_url,
        pool,
    })
}
