pub use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

mod m20261019_000001_init;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20261019_000001_init::Migration)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationCommand {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl MigrationCommand {
    fn changes_schema(self) -> bool {
        !matches!(self, MigrationCommand::Status)
    }
}

/// Where a connection points and how far its schema has come.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaState {
    pub backend: DatabaseBackend,
    pub database: String,
    pub applied: usize,
    pub known: usize,
}

/// Run one migration command against an open connection.
/// Shared by the CLI, the engine bootstrap and tests.
pub async fn migrate(db: &DatabaseConnection, command: MigrationCommand) -> Result<(), DbErr> {
    let before = schema_state(db).await?;
    tracing::info!(
        ?command,
        backend = ?before.backend,
        database = %before.database,
        applied = before.applied,
        known = before.known,
        "Running schema migration"
    );

    let result = match command {
        MigrationCommand::Up => Migrator::up(db, None).await,
        MigrationCommand::Down => Migrator::down(db, None).await,
        MigrationCommand::Fresh => Migrator::fresh(db).await,
        MigrationCommand::Reset => Migrator::reset(db).await,
        MigrationCommand::Refresh => Migrator::refresh(db).await,
        MigrationCommand::Status => Migrator::status(db).await,
    };

    if let Err(e) = result {
        tracing::error!(?command, database = %before.database, error = %e, "Schema migration failed");
        return Err(e);
    }

    if command.changes_schema() {
        let after = schema_state(db).await?;
        tracing::info!(?command, applied = after.applied, known = after.known, "Schema migration done");
    }
    Ok(())
}

pub async fn schema_state(db: &DatabaseConnection) -> Result<SchemaState, DbErr> {
    let backend = db.get_database_backend();
    let database = database_name(db, backend)
        .await?
        .unwrap_or_else(|| "<unknown>".to_string());

    // The migrations table does not exist before the first `up`.
    let applied = match Migrator::get_applied_migrations(db).await {
        Ok(applied) => applied.len(),
        Err(DbErr::Exec(_)) => 0,
        Err(e) => return Err(e),
    };

    Ok(SchemaState {
        backend,
        database,
        applied,
        known: Migrator::migrations().len(),
    })
}

async fn database_name(db: &DatabaseConnection, backend: DatabaseBackend) -> Result<Option<String>, DbErr> {
    let sql = match backend {
        DatabaseBackend::Postgres => "SELECT current_database() AS name",
        DatabaseBackend::Sqlite => "SELECT file AS name FROM pragma_database_list WHERE name = 'main'",
        _ => return Ok(None),
    };
    let Some(row) = db.query_one(Statement::from_string(backend, sql.to_owned())).await? else {
        return Ok(None);
    };
    let name: String = row.try_get("", "name")?;
    if name.is_empty() && backend == DatabaseBackend::Sqlite {
        return Ok(Some(":memory:".to_string()));
    }
    Ok(Some(name))
}
