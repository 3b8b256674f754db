//! Storage and validation layer for a duty-tracking bot: officer records
//! with on/off-duty status, scores and handled-incident counters, an
//! append-only command audit log, and service health snapshots.
//!
//! The crate owns the persisted schema, the insert/update validation
//! contracts derived from it, and the store operations. Transport (REST or
//! bot commands), authentication and scheduling live in embedding services.

pub mod db;
pub mod error;
pub mod models;
pub mod schema;
pub mod validate;

pub use db::{DbConn, DbPool, init_pool, init_pool_with_url, run_migrations};
pub use error::{StoreError, StoreResult};
