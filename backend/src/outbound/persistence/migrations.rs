//! Embedded schema migrations applied at startup.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use thiserror::Error;
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// The migration connection could not be opened.
    #[error("failed to connect for migrations: {0}")]
    Connect(#[from] diesel::ConnectionError),
    /// A migration failed to apply.
    #[error("failed to apply migrations: {0}")]
    Apply(String),
    /// The blocking migration task panicked or was cancelled.
    #[error("migration task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

fn apply_blocking(database_url: &str) -> Result<usize, MigrationError> {
    let mut connection = PgConnection::establish(database_url)?;
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply(err.to_string()))?;
    Ok(applied.len())
}

/// Apply pending migrations on a blocking thread.
///
/// # Errors
///
/// Returns [`MigrationError`] when connecting or applying fails.
pub async fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let database_url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || apply_blocking(&database_url)).await??;
    info!(applied, "database migrations up to date");
    Ok(())
}
