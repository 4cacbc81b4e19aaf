use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use kniffel::{connect_db, connect_url, DbOwner, DbProfile};
use migration::{migrate, MigrationCommand};

#[derive(Clone, Copy, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(c: Command) -> Self {
        match c {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Reset => MigrationCommand::Reset,
            Command::Refresh => MigrationCommand::Refresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Env {
    Prod,
    Test,
}

#[derive(Clone, Copy, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Kniffel scoresheet database migration tool")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,

    /// Runtime environment (selects PROD_DB or TEST_DB)
    #[arg(short, long, value_enum, default_value = "test")]
    env: Env,

    /// Database type. In-memory SQLite is not offered: it would vanish
    /// when the command exits.
    #[arg(short, long, value_enum, default_value = "postgres")]
    db: Db,

    /// SQLite database file, used with `--db sqlite-file`
    #[arg(long, default_value = "kniffel.db")]
    sqlite_path: PathBuf,

    /// Emit JSON logs instead of plain text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if args.json {
        kniffel::telemetry::init_tracing();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stdout)
            .without_time()
            .with_target(false)
            .with_env_filter("migration=info,sqlx=warn")
            .init();
    }

    let conn = match args.db {
        Db::Postgres => {
            let profile = match args.env {
                Env::Prod => DbProfile::Prod,
                Env::Test => DbProfile::Test,
            };
            connect_db(profile, DbOwner::Owner).await
        }
        Db::SqliteFile => {
            let url = format!("sqlite://{}?mode=rwc", args.sqlite_path.display());
            connect_url(&url).await
        }
    };

    let conn = match conn {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("Could not connect: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migrate(&conn, args.command.into()).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
