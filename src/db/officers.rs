use chrono::Utc;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sqlite::SqliteConnection;

use crate::error::{StoreError, StoreResult};
use crate::models::Officer;
use crate::schema::officers::dsl::*;
use crate::validate::{self, InsertOfficerRequest, UpdateOfficerRequest};

/// Insert a new officer. Omitted defaulted fields take their declared
/// defaults; `created_at` and `updated_at` are stamped with the same
/// instant. A duplicate `discord_id` surfaces as `ConstraintViolation`.
pub fn insert(conn: &mut SqliteConnection, req: &InsertOfficerRequest) -> StoreResult<Officer> {
    let row = validate::new_officer(req, Utc::now().naive_utc())?;
    let inserted = diesel::insert_into(officers)
        .values(&row)
        .get_result::<Officer>(conn)
        .map_err(|e| match e {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                StoreError::ConstraintViolation(row.discord_id.clone())
            }
            other => StoreError::Database(other),
        })?;
    log::debug!("registered officer {} ({})", inserted.id, inserted.discord_id);
    Ok(inserted)
}

/// Apply a partial update to the officer with the given id. `updated_at` is
/// refreshed on every call, even for an empty payload.
pub fn update_by_id(
    conn: &mut SqliteConnection,
    officer_id: i32,
    req: &UpdateOfficerRequest,
) -> StoreResult<Officer> {
    let patch = validate::officer_patch(req, Utc::now().naive_utc())?;
    let affected = diesel::update(officers.filter(id.eq(officer_id)))
        .set(&patch)
        .execute(conn)?;
    if affected == 0 {
        return Err(StoreError::NotFound(format!("id {officer_id}")));
    }
    Ok(officers
        .filter(id.eq(officer_id))
        .select(Officer::as_select())
        .first(conn)?)
}

/// Apply a partial update, addressing the officer by `discord_id`. The key
/// itself is immutable and cannot appear in the payload.
pub fn update_by_discord_id(
    conn: &mut SqliteConnection,
    target: &str,
    req: &UpdateOfficerRequest,
) -> StoreResult<Officer> {
    let patch = validate::officer_patch(req, Utc::now().naive_utc())?;
    let affected = diesel::update(officers.filter(discord_id.eq(target)))
        .set(&patch)
        .execute(conn)?;
    if affected == 0 {
        return Err(StoreError::NotFound(format!("discord id {target}")));
    }
    Ok(officers
        .filter(discord_id.eq(target))
        .select(Officer::as_select())
        .first(conn)?)
}

pub fn find_by_id(conn: &mut SqliteConnection, officer_id: i32) -> StoreResult<Option<Officer>> {
    Ok(officers
        .filter(id.eq(officer_id))
        .select(Officer::as_select())
        .first(conn)
        .optional()?)
}

pub fn find_by_discord_id(
    conn: &mut SqliteConnection,
    target: &str,
) -> StoreResult<Option<Officer>> {
    Ok(officers
        .filter(discord_id.eq(target))
        .select(Officer::as_select())
        .first(conn)
        .optional()?)
}

/// All tracked officers, oldest registration first.
pub fn list(conn: &mut SqliteConnection) -> StoreResult<Vec<Officer>> {
    Ok(officers
        .order(id.asc())
        .select(Officer::as_select())
        .load(conn)?)
}
