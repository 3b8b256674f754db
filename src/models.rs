use chrono::NaiveDateTime;
use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::prelude::*;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::Sqlite;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::schema::{command_logs, officers, system_status};

/// Duty status of an officer. Stored as text in the `officers.status` column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum OfficerStatus {
    Active,
    OnDuty,
    OffDuty,
    Suspended,
}

impl OfficerStatus {
    pub const ALL: [OfficerStatus; 4] = [
        OfficerStatus::Active,
        OfficerStatus::OnDuty,
        OfficerStatus::OffDuty,
        OfficerStatus::Suspended,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OfficerStatus::Active => "active",
            OfficerStatus::OnDuty => "on_duty",
            OfficerStatus::OffDuty => "off_duty",
            OfficerStatus::Suspended => "suspended",
        }
    }
}

impl Default for OfficerStatus {
    fn default() -> Self {
        OfficerStatus::OffDuty
    }
}

impl fmt::Display for OfficerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OfficerStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(OfficerStatus::Active),
            "on_duty" => Ok(OfficerStatus::OnDuty),
            "off_duty" => Ok(OfficerStatus::OffDuty),
            "suspended" => Ok(OfficerStatus::Suspended),
            _ => Err(()),
        }
    }
}

impl ToSql<Text, Sqlite> for OfficerStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.as_str());
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Sqlite> for OfficerStatus {
    fn from_sql(value: <Sqlite as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let raw = <String as FromSql<Text, Sqlite>>::from_sql(value)?;
        raw.parse()
            .map_err(|_| format!("unrecognized officer status: {raw}").into())
    }
}

#[derive(Queryable, Identifiable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = officers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Officer {
    pub id: i32,
    pub discord_id: String,
    pub username: String,
    pub hours_on_duty: f32,
    pub robberies_handled: i32,
    pub score: i32,
    pub status: OfficerStatus,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Normalized insert row. Produced by validation, never built from raw input.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = officers)]
pub struct NewOfficer {
    pub discord_id: String,
    pub username: String,
    pub hours_on_duty: f32,
    pub robberies_handled: i32,
    pub score: i32,
    pub status: OfficerStatus,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Normalized partial update. `None` leaves a column untouched; the double
/// `Option` on `notes` distinguishes "leave alone" from "clear". Immutable
/// columns (`id`, `discord_id`, `created_at`) have no field here at all, and
/// `updated_at` is always stamped.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = officers)]
pub struct OfficerPatch {
    pub username: Option<String>,
    pub hours_on_duty: Option<f32>,
    pub robberies_handled: Option<i32>,
    pub score: Option<i32>,
    pub status: Option<OfficerStatus>,
    pub notes: Option<Option<String>>,
    pub updated_at: NaiveDateTime,
}

#[derive(Queryable, Identifiable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = command_logs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct CommandLog {
    pub id: i32,
    pub discord_id: String,
    pub command: String,
    pub username: String,
    pub timestamp: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = command_logs)]
pub struct NewCommandLog {
    pub discord_id: String,
    pub command: String,
    pub username: String,
    pub timestamp: NaiveDateTime,
}

/// Point-in-time health snapshot. `service` and `status` are open strings;
/// conventional values are `discord_bot`/`api_server`/`web_server` and
/// `online`/`offline`/`error`.
#[derive(Queryable, Identifiable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = system_status)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    pub id: i32,
    pub service: String,
    pub status: String,
    pub last_checked: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = system_status)]
pub struct NewSystemStatus {
    pub service: String,
    pub status: String,
    pub last_checked: NaiveDateTime,
}
