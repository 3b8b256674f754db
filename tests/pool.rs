use std::env;
use std::fs;
use std::path::PathBuf;

use precinct_store::db::officers;
use precinct_store::validate::InsertOfficerRequest;

/// Create a unique test DB path inside the system temp dir and remove any
/// existing file.
fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_precinct_store.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

#[test]
fn pooled_file_database_round_trip() {
    let db_path = setup_test_db("pool_round_trip");
    let pool = precinct_store::init_pool_with_url(&db_path);

    let mut conn = pool.get().unwrap();
    precinct_store::run_migrations(&mut conn).unwrap();

    let req = InsertOfficerRequest {
        discord_id: Some("123".into()),
        username: Some("alice".into()),
        ..Default::default()
    };
    let row = officers::insert(&mut conn, &req).unwrap();
    drop(conn);

    // A second connection from the pool sees the committed row.
    let mut conn = pool.get().unwrap();
    assert_eq!(officers::find_by_id(&mut conn, row.id).unwrap(), Some(row));

    fs::remove_file(&db_path).ok();
}

#[test]
fn migrations_are_idempotent() {
    let db_path = setup_test_db("migrations_idempotent");
    let pool = precinct_store::init_pool_with_url(&db_path);

    let mut conn = pool.get().unwrap();
    precinct_store::run_migrations(&mut conn).unwrap();
    precinct_store::run_migrations(&mut conn).unwrap();

    fs::remove_file(&db_path).ok();
}
