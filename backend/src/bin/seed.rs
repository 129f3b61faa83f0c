//! Reset and reseed the database from the JSON fixture files.
//!
//! Deletes all rows of every entity type in child-first order, then inserts
//! the fixture records in parent-first order. Per-entity-type failures are
//! logged and do not stop the procedure; the exit status reflects only
//! setup failures (missing fixtures, unreachable database).
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use diesel::{Connection, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use backend::domain::FixtureError;
use backend::outbound::persistence::{DbPool, DieselSeedStore, PoolConfig, PoolError};
use backend::seed::{FixtureDirectory, SeedLoader};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// `seed` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seed",
    about = "Reset the schema and repopulate it from JSON fixtures",
    version
)]
struct CliArgs {
    /// Directory containing the fixture JSON files.
    #[arg(long = "fixtures", value_name = "dir", default_value = "backend/fixtures/seed")]
    fixtures_dir: PathBuf,
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// Apply pending migrations before resetting.
    #[arg(long)]
    migrate: bool,
}

#[derive(Debug, thiserror::Error)]
enum SeedCliError {
    #[error("failed to connect for migrations: {0}")]
    Connect(#[from] diesel::ConnectionError),
    #[error("failed to run migrations: {message}")]
    Migration { message: String },
    #[error(transparent)]
    Fixtures(#[from] FixtureError),
    #[error(transparent)]
    Pool(#[from] PoolError),
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let database_url = args
        .database_url
        .clone()
        .or_else(|| env::var("DATABASE_URL").ok())
        .ok_or_else(|| {
            io::Error::other("database URL missing: set DATABASE_URL or pass --database-url")
        })?;

    let runtime = Builder::new_current_thread().enable_all().build()?;
    runtime.block_on(run(&args, &database_url)).map_err(io::Error::other)
}

async fn run(args: &CliArgs, database_url: &str) -> Result<(), SeedCliError> {
    if args.migrate {
        apply_migrations(database_url)?;
    }

    let fixtures = FixtureDirectory::open(&args.fixtures_dir)?;
    let pool = DbPool::new(PoolConfig::new(database_url)).await?;
    let store = Arc::new(DieselSeedStore::new(pool));

    // The loader is fail-open per entity type and always walks the full
    // list; its outcome lives in the logs. The pool is released when this
    // scope ends, whatever happened above.
    SeedLoader::new(store, fixtures).run().await;
    Ok(())
}

fn apply_migrations(database_url: &str) -> Result<(), SeedCliError> {
    let mut conn = PgConnection::establish(database_url)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| SeedCliError::Migration {
            message: err.to_string(),
        })?;
    info!(count = applied.len(), "applied pending migrations");
    Ok(())
}
