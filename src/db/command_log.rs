use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::error::StoreResult;
use crate::models::CommandLog;
use crate::schema::command_logs::dsl::*;
use crate::validate::{self, AppendCommandLogRequest};

/// Append an audit entry. The table is append-only; no update or delete
/// operation exists for it.
pub fn append(conn: &mut SqliteConnection, req: &AppendCommandLogRequest) -> StoreResult<CommandLog> {
    let row = validate::new_command_log(req, Utc::now().naive_utc())?;
    let inserted = diesel::insert_into(command_logs)
        .values(&row)
        .get_result::<CommandLog>(conn)?;
    log::debug!(
        "logged command {} for {}",
        inserted.command,
        inserted.discord_id
    );
    Ok(inserted)
}

/// The most recent entries, newest first.
pub fn recent(conn: &mut SqliteConnection, limit: i64) -> StoreResult<Vec<CommandLog>> {
    Ok(command_logs
        .order((timestamp.desc(), id.desc()))
        .limit(limit)
        .select(CommandLog::as_select())
        .load(conn)?)
}
