use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use flexi_logger::{Age, Cleanup, Criterion, FileSpec, Logger, Naming};

use crate::error::{StoreError, StoreResult};

pub mod command_log;
pub mod officers;
pub mod pool;
pub mod system_status;

pub use pool::{DbConn, DbPool, init_pool, init_pool_with_url};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Initialize logger
pub fn init_logger() {
    Logger::try_with_str("info")
        .unwrap()
        .log_to_file(FileSpec::default().directory("logs"))
        .rotate(
            Criterion::Age(Age::Day),
            Naming::Numbers,
            Cleanup::KeepLogFiles(7),
        )
        .start()
        .unwrap();
}

/// Apply any pending schema migrations.
pub fn run_migrations(conn: &mut SqliteConnection) -> StoreResult<()> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| StoreError::Migration(e.to_string()))?;
    for version in applied {
        log::info!("applied migration {version}");
    }
    Ok(())
}

/// Initialize logger, pool and schema in one call.
pub fn initialize() -> StoreResult<DbPool> {
    init_logger();
    let pool = init_pool();
    let mut conn = pool.get()?;
    run_migrations(&mut conn)?;
    Ok(pool)
}
