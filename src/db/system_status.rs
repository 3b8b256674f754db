use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::collections::HashSet;

use crate::error::StoreResult;
use crate::models::SystemStatus;
use crate::schema::system_status::dsl::*;
use crate::validate::{self, RecordStatusRequest};

/// Record a health snapshot for a named service. Multiple rows per service
/// are expected; "current" means newest `last_checked`.
pub fn record(conn: &mut SqliteConnection, req: &RecordStatusRequest) -> StoreResult<SystemStatus> {
    let row = validate::new_system_status(req, Utc::now().naive_utc())?;
    let inserted = diesel::insert_into(system_status)
        .values(&row)
        .get_result::<SystemStatus>(conn)?;
    log::debug!("recorded {} as {}", inserted.service, inserted.status);
    Ok(inserted)
}

/// The newest snapshot for one service, if any was ever recorded.
pub fn latest(conn: &mut SqliteConnection, service_name: &str) -> StoreResult<Option<SystemStatus>> {
    Ok(system_status
        .filter(service.eq(service_name))
        .order((last_checked.desc(), id.desc()))
        .select(SystemStatus::as_select())
        .first(conn)
        .optional()?)
}

/// The newest snapshot per service.
pub fn latest_all(conn: &mut SqliteConnection) -> StoreResult<Vec<SystemStatus>> {
    let rows: Vec<SystemStatus> = system_status
        .order((last_checked.desc(), id.desc()))
        .select(SystemStatus::as_select())
        .load(conn)?;

    let mut seen = HashSet::new();
    Ok(rows
        .into_iter()
        .filter(|row| seen.insert(row.service.clone()))
        .collect())
}
