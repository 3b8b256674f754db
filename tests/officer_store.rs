use std::thread::sleep;
use std::time::Duration;

use precinct_store::StoreError;
use precinct_store::db::officers;
use precinct_store::models::{Officer, OfficerStatus};
use precinct_store::validate::{InsertOfficerRequest, UpdateOfficerRequest};
use serde_json::json;

mod common;
use common::setup_conn;

fn minimal_insert(discord_id: &str, username: &str) -> InsertOfficerRequest {
    InsertOfficerRequest {
        discord_id: Some(discord_id.into()),
        username: Some(username.into()),
        ..Default::default()
    }
}

#[test]
fn insert_returns_fully_populated_row_with_defaults() {
    let mut conn = setup_conn();

    let row = officers::insert(&mut conn, &minimal_insert("123", "alice")).unwrap();

    assert!(row.id > 0);
    assert_eq!(row.discord_id, "123");
    assert_eq!(row.username, "alice");
    assert_eq!(row.hours_on_duty, 0.0);
    assert_eq!(row.robberies_handled, 0);
    assert_eq!(row.score, 0);
    assert_eq!(row.status, OfficerStatus::OffDuty);
    assert_eq!(row.notes, None);
    assert_eq!(row.created_at, row.updated_at);
}

#[test]
fn insert_honors_supplied_fields() {
    let mut conn = setup_conn();

    let req: InsertOfficerRequest = serde_json::from_value(json!({
        "discordId": "456",
        "username": "bob",
        "hoursOnDuty": 12.5,
        "robberiesHandled": 3,
        "score": -2,
        "status": "on_duty",
        "notes": "night shift"
    }))
    .unwrap();

    let row = officers::insert(&mut conn, &req).unwrap();
    assert_eq!(row.hours_on_duty, 12.5);
    assert_eq!(row.robberies_handled, 3);
    assert_eq!(row.score, -2);
    assert_eq!(row.status, OfficerStatus::OnDuty);
    assert_eq!(row.notes.as_deref(), Some("night shift"));
}

#[test]
fn duplicate_discord_id_yields_constraint_violation() {
    let mut conn = setup_conn();

    officers::insert(&mut conn, &minimal_insert("123", "alice")).unwrap();
    let err = officers::insert(&mut conn, &minimal_insert("123", "impostor")).unwrap_err();

    match err {
        StoreError::ConstraintViolation(dup) => assert_eq!(dup, "123"),
        other => panic!("expected ConstraintViolation, got {other:?}"),
    }

    // The losing insert must not have written anything.
    assert_eq!(officers::list(&mut conn).unwrap().len(), 1);
}

#[test]
fn partial_update_touches_only_named_fields_and_updated_at() {
    let mut conn = setup_conn();

    let before = officers::insert(&mut conn, &minimal_insert("123", "alice")).unwrap();
    sleep(Duration::from_millis(5));

    let req = UpdateOfficerRequest {
        score: Some(42),
        ..Default::default()
    };
    let after = officers::update_by_id(&mut conn, before.id, &req).unwrap();

    assert_eq!(after.score, 42);
    assert!(after.updated_at > before.updated_at);

    let expected = Officer {
        score: 42,
        updated_at: after.updated_at,
        ..before.clone()
    };
    assert_eq!(after, expected);
}

#[test]
fn update_payload_naming_discord_id_is_rejected() {
    let result = serde_json::from_value::<UpdateOfficerRequest>(json!({"discordId": "456"}));
    assert!(result.is_err());
}

#[test]
fn update_of_missing_officer_is_not_found() {
    let mut conn = setup_conn();

    let req = UpdateOfficerRequest {
        score: Some(1),
        ..Default::default()
    };
    assert!(matches!(
        officers::update_by_id(&mut conn, 999, &req),
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(
        officers::update_by_discord_id(&mut conn, "ghost", &req),
        Err(StoreError::NotFound(_))
    ));
}

#[test]
fn update_by_discord_id_addresses_the_same_row() {
    let mut conn = setup_conn();

    let before = officers::insert(&mut conn, &minimal_insert("123", "alice")).unwrap();
    let req = UpdateOfficerRequest {
        hours_on_duty: Some(8.0),
        ..Default::default()
    };
    let after = officers::update_by_discord_id(&mut conn, "123", &req).unwrap();

    assert_eq!(after.id, before.id);
    assert_eq!(after.hours_on_duty, 8.0);
}

#[test]
fn notes_can_be_set_and_cleared() {
    let mut conn = setup_conn();

    let row = officers::insert(&mut conn, &minimal_insert("123", "alice")).unwrap();

    let set: UpdateOfficerRequest =
        serde_json::from_value(json!({"notes": "on probation"})).unwrap();
    let with_notes = officers::update_by_id(&mut conn, row.id, &set).unwrap();
    assert_eq!(with_notes.notes.as_deref(), Some("on probation"));

    let clear: UpdateOfficerRequest = serde_json::from_value(json!({"notes": null})).unwrap();
    let cleared = officers::update_by_id(&mut conn, row.id, &clear).unwrap();
    assert_eq!(cleared.notes, None);
}

#[test]
fn empty_patch_still_advances_updated_at() {
    let mut conn = setup_conn();

    let before = officers::insert(&mut conn, &minimal_insert("123", "alice")).unwrap();
    sleep(Duration::from_millis(5));

    let after =
        officers::update_by_id(&mut conn, before.id, &UpdateOfficerRequest::default()).unwrap();
    assert!(after.updated_at > before.updated_at);

    let expected = Officer {
        updated_at: after.updated_at,
        ..before
    };
    assert_eq!(after, expected);
}

#[test]
fn insert_then_update_scenario() {
    let mut conn = setup_conn();

    let created = officers::insert(&mut conn, &minimal_insert("123", "alice")).unwrap();
    assert_eq!(created.status, OfficerStatus::OffDuty);
    let t0 = created.updated_at;
    assert_eq!(created.created_at, t0);

    sleep(Duration::from_millis(5));

    let req = UpdateOfficerRequest {
        status: Some("on_duty".into()),
        ..Default::default()
    };
    let updated = officers::update_by_id(&mut conn, created.id, &req).unwrap();

    assert_eq!(updated.status, OfficerStatus::OnDuty);
    assert!(updated.updated_at > t0);
    let expected = Officer {
        status: OfficerStatus::OnDuty,
        updated_at: updated.updated_at,
        ..created
    };
    assert_eq!(updated, expected);
}

#[test]
fn invalid_insert_reports_per_field_violations_and_writes_nothing() {
    let mut conn = setup_conn();

    let req = InsertOfficerRequest {
        discord_id: Some("123".into()),
        username: Some("alice".into()),
        hours_on_duty: Some(-4.0),
        status: Some("awol".into()),
        ..Default::default()
    };
    let err = officers::insert(&mut conn, &req).unwrap_err();
    match err {
        StoreError::Validation(v) => assert_eq!(v.fields(), vec!["hoursOnDuty", "status"]),
        other => panic!("expected Validation, got {other:?}"),
    }
    assert!(officers::list(&mut conn).unwrap().is_empty());
}

#[test]
fn find_and_list_supplements() {
    let mut conn = setup_conn();

    let alice = officers::insert(&mut conn, &minimal_insert("123", "alice")).unwrap();
    let bob = officers::insert(&mut conn, &minimal_insert("456", "bob")).unwrap();

    assert_eq!(
        officers::find_by_id(&mut conn, alice.id).unwrap(),
        Some(alice.clone())
    );
    assert_eq!(
        officers::find_by_discord_id(&mut conn, "456").unwrap(),
        Some(bob.clone())
    );
    assert_eq!(officers::find_by_discord_id(&mut conn, "789").unwrap(), None);
    assert_eq!(officers::list(&mut conn).unwrap(), vec![alice, bob]);
}
