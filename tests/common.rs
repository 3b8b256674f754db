#![allow(dead_code)]
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

/// Open a fresh in-memory database with the schema applied.
pub fn setup_conn() -> SqliteConnection {
    let mut conn = SqliteConnection::establish(":memory:").expect("open in-memory db");
    precinct_store::run_migrations(&mut conn).expect("apply migrations");
    conn
}
