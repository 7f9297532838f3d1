//! # abonflow-store
//!
//! SQLite persistence layer for abonflow.
//!
//! `UserStore` and `AgentStore` each wrap a [`sqlx::SqlitePool`] and own
//! one table. The payment lifecycle transitions (approve, reject,
//! request more proof) live here so every caller gets the same status
//! and admin-message semantics. Migrations are embedded and run on
//! connect.

pub mod agents;
pub mod error;
pub mod password;
pub mod seed;
pub mod users;

pub use agents::AgentStore;
pub use error::{Result, StoreError};
pub use users::UserStore;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Open (creating if missing) and migrate the database at `url`.
pub async fn connect(url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    MIGRATOR.run(&pool).await?;
    Ok(pool)
}

/// A fresh in-memory database, migrated. One connection so every query
/// sees the same memory store. Used by the seed/demo path and by tests.
pub async fn connect_in_memory() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
    MIGRATOR.run(&pool).await?;
    Ok(pool)
}
