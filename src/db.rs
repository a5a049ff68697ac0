use std::str::FromStr;
use std::time::Duration;

use anyhow::Result;
use jointravel_shared::State;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{ConnectOptions, SqlitePool};
use tracing::log::LevelFilter;

use crate::config::DatabaseConfig;

/// Connection settings shared by every pool.
///
/// They are applied by sqlx on each new connection, so a pool that grows
/// past its first connection still waits on a locked database instead of
/// failing with SQLITE_BUSY.
fn connect_options(database_url: &str) -> Result<SqliteConnectOptions> {
    Ok(SqliteConnectOptions::from_str(database_url)?
        .busy_timeout(Duration::from_secs(5))
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .pragma("temp_store", "memory")
        .log_statements(LevelFilter::Debug))
}

fn writable_options(database_url: &str) -> Result<SqliteConnectOptions> {
    Ok(connect_options(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal))
}

/// Pools for the review command.
///
/// Toggles go through a single write connection, which serializes every
/// read-modify-write of a viewer's reaction. Status lookups get their own
/// read-only pool and keep answering while a toggle commits.
pub async fn create_state(config: &DatabaseConfig) -> Result<State> {
    // The writer opens first: it creates the file and switches it to WAL,
    // which the read-only connections cannot do.
    let write_db = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(writable_options(&config.url)?)
        .await?;

    let read_db = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(connect_options(&config.url)?.read_only(true))
        .await?;

    tracing::info!(
        read_connections = config.max_connections,
        "Opened reaction database"
    );

    Ok(State { read_db, write_db })
}

/// Single read-write pool for migrations and tests.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(writable_options(database_url)?)
        .await?;

    tracing::debug!(max_connections, "Created pool");

    Ok(pool)
}
