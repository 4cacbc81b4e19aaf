use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbOwner, DbProfile};
use crate::error::AppError;

/// Connect using the profile/owner environment. Does NOT run migrations.
pub async fn connect_db(profile: DbProfile, owner: DbOwner) -> Result<DatabaseConnection, AppError> {
    let database_url = db_url(profile, owner)?;
    connect_url(&database_url).await
}

/// Connect to an explicit URL (Postgres or SQLite).
pub async fn connect_url(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let mut opts = ConnectOptions::new(database_url.to_string());
    opts.connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    // In-memory SQLite is per-connection; pin the pool to one connection.
    if database_url.starts_with("sqlite::memory:") || database_url.contains("mode=memory") {
        opts.max_connections(1).min_connections(1);
    }

    Ok(Database::connect(opts).await?)
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(profile: DbProfile, owner: DbOwner) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(profile, owner).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    info!("Database ready");
    Ok(conn)
}

/// Fresh, migrated in-memory SQLite database.
pub async fn memory_db() -> Result<DatabaseConnection, AppError> {
    let conn = connect_url("sqlite::memory:").await?;
    migrate(&conn, MigrationCommand::Up).await?;
    Ok(conn)
}
