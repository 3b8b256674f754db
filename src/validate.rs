//! Pure validation for insert/update payloads. Nothing in this module
//! touches the database; uniqueness of `discord_id` is enforced by the
//! storage layer. Each function either returns a normalized row ready for
//! the write path or a structured list of per-field violations.
//!
//! Primitive type mismatches (a string where a number belongs) are rejected
//! earlier, by typed serde deserialization of the request structs. Requests
//! deny unknown fields, so a payload naming an immutable column such as
//! `discordId` on update fails to deserialize at all.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::models::{
    NewCommandLog, NewOfficer, NewSystemStatus, OfficerPatch, OfficerStatus,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub reason: String,
}

/// One or more fields failed the insert/update contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Names of the offending fields, in the order they were checked.
    pub fn fields(&self) -> Vec<&'static str> {
        self.violations.iter().map(|v| v.field).collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{} {}", v.field, v.reason)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Officer insert payload. `discordId` and `username` are mandatory; every
/// column with a declared default may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct InsertOfficerRequest {
    pub discord_id: Option<String>,
    pub username: Option<String>,
    pub hours_on_duty: Option<f32>,
    pub robberies_handled: Option<i32>,
    pub score: Option<i32>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Officer partial-update payload. Only mutable columns appear here;
/// `notes` is tri-state (absent / set / cleared via JSON null).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct UpdateOfficerRequest {
    pub username: Option<String>,
    pub hours_on_duty: Option<f32>,
    pub robberies_handled: Option<i32>,
    pub score: Option<i32>,
    pub status: Option<String>,
    #[serde(
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct AppendCommandLogRequest {
    pub discord_id: Option<String>,
    pub command: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct RecordStatusRequest {
    pub service: Option<String>,
    pub status: Option<String>,
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

fn require_text(
    violations: &mut Vec<FieldViolation>,
    field: &'static str,
    value: Option<&str>,
) -> Option<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Some(v.to_owned()),
        Some(_) => {
            violations.push(FieldViolation {
                field,
                reason: "must not be empty".into(),
            });
            None
        }
        None => {
            violations.push(FieldViolation {
                field,
                reason: "is required".into(),
            });
            None
        }
    }
}

fn check_hours(violations: &mut Vec<FieldViolation>, value: Option<f32>) -> Option<f32> {
    match value {
        Some(h) if !h.is_finite() || h < 0.0 => {
            violations.push(FieldViolation {
                field: "hoursOnDuty",
                reason: "must be a non-negative number".into(),
            });
            None
        }
        other => other,
    }
}

fn check_robberies(violations: &mut Vec<FieldViolation>, value: Option<i32>) -> Option<i32> {
    match value {
        Some(r) if r < 0 => {
            violations.push(FieldViolation {
                field: "robberiesHandled",
                reason: "must not be negative".into(),
            });
            None
        }
        other => other,
    }
}

fn parse_status(
    violations: &mut Vec<FieldViolation>,
    value: Option<&str>,
) -> Option<OfficerStatus> {
    let raw = value?;
    match raw.parse() {
        Ok(parsed) => Some(parsed),
        Err(()) => {
            violations.push(FieldViolation {
                field: "status",
                reason: format!(
                    "must be one of {}",
                    OfficerStatus::ALL.map(|s| s.as_str()).join(", ")
                ),
            });
            None
        }
    }
}

/// Validate an officer insert payload and normalize it into a full row.
/// Omitted defaulted fields take their declared defaults; `created_at` and
/// `updated_at` are both stamped with `now`.
pub fn new_officer(
    req: &InsertOfficerRequest,
    now: NaiveDateTime,
) -> Result<NewOfficer, ValidationError> {
    let mut violations = Vec::new();

    let discord_id = require_text(&mut violations, "discordId", req.discord_id.as_deref());
    let username = require_text(&mut violations, "username", req.username.as_deref());
    let hours_on_duty = check_hours(&mut violations, req.hours_on_duty);
    let robberies_handled = check_robberies(&mut violations, req.robberies_handled);
    let status = parse_status(&mut violations, req.status.as_deref());

    if !violations.is_empty() {
        return Err(ValidationError { violations });
    }

    Ok(NewOfficer {
        discord_id: discord_id.unwrap(),
        username: username.unwrap(),
        hours_on_duty: hours_on_duty.unwrap_or(0.0),
        robberies_handled: robberies_handled.unwrap_or(0),
        score: req.score.unwrap_or(0),
        status: status.unwrap_or_default(),
        notes: req.notes.clone(),
        created_at: now,
        updated_at: now,
    })
}

/// Validate an officer partial update. Fields left out stay untouched; the
/// resulting changeset always refreshes `updated_at`, so an empty payload is
/// legal and only advances the timestamp.
pub fn officer_patch(
    req: &UpdateOfficerRequest,
    now: NaiveDateTime,
) -> Result<OfficerPatch, ValidationError> {
    let mut violations = Vec::new();

    let username = match req.username.as_deref().map(str::trim) {
        Some("") => {
            violations.push(FieldViolation {
                field: "username",
                reason: "must not be empty".into(),
            });
            None
        }
        other => other.map(str::to_owned),
    };
    let hours_on_duty = check_hours(&mut violations, req.hours_on_duty);
    let robberies_handled = check_robberies(&mut violations, req.robberies_handled);
    let status = parse_status(&mut violations, req.status.as_deref());

    if !violations.is_empty() {
        return Err(ValidationError { violations });
    }

    Ok(OfficerPatch {
        username,
        hours_on_duty,
        robberies_handled,
        score: req.score,
        status,
        notes: req.notes.clone(),
        updated_at: now,
    })
}

/// Validate a command-log append payload. All three fields are mandatory.
pub fn new_command_log(
    req: &AppendCommandLogRequest,
    now: NaiveDateTime,
) -> Result<NewCommandLog, ValidationError> {
    let mut violations = Vec::new();

    let discord_id = require_text(&mut violations, "discordId", req.discord_id.as_deref());
    let command = require_text(&mut violations, "command", req.command.as_deref());
    let username = require_text(&mut violations, "username", req.username.as_deref());

    if !violations.is_empty() {
        return Err(ValidationError { violations });
    }

    Ok(NewCommandLog {
        discord_id: discord_id.unwrap(),
        command: command.unwrap(),
        username: username.unwrap(),
        timestamp: now,
    })
}

/// Validate a health-snapshot payload. `service` and `status` are mandatory
/// but deliberately not restricted to a closed set.
pub fn new_system_status(
    req: &RecordStatusRequest,
    now: NaiveDateTime,
) -> Result<NewSystemStatus, ValidationError> {
    let mut violations = Vec::new();

    let service = require_text(&mut violations, "service", req.service.as_deref());
    let status = require_text(&mut violations, "status", req.status.as_deref());

    if !violations.is_empty() {
        return Err(ValidationError { violations });
    }

    Ok(NewSystemStatus {
        service: service.unwrap(),
        status: status.unwrap(),
        last_checked: now,
    })
}
