use attendance_core::messages;
use axum::http::StatusCode;
use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::{as_user, window, TestContext, OFFICE_IP};

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
}

#[test_log::test(tokio::test)]
async fn added_windows_are_listed_in_start_order() {
    let ctx = TestContext::new();
    let owner = ctx.user().await;
    let room_id = ctx.room(&owner, json!([window(at(5, 9), at(5, 17))])).await;

    as_user(ctx.server.post(&format!("/time/add-time/{room_id}")), owner.id, OFFICE_IP)
        .json(&json!({ "time": [window(at(4, 9), at(4, 17))] }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = as_user(ctx.server.get(&format!("/time/show/{room_id}")), owner.id, OFFICE_IP).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["numberOfRecords"], 2);
    let first: DateTime<Utc> = serde_json::from_value(body["data"][0]["start_time"].clone()).unwrap();
    assert_eq!(first, at(4, 9));
}

#[test_log::test(tokio::test)]
async fn reversed_window_is_rejected() {
    let ctx = TestContext::new();
    let owner = ctx.user().await;
    let room_id = ctx.room(&owner, json!([])).await;

    let response = as_user(ctx.server.post(&format!("/time/add-time/{room_id}")), owner.id, OFFICE_IP)
        .json(&json!({ "time": [window(at(4, 17), at(4, 9))] }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], messages::START_BEFORE_END);
}

#[test_log::test(tokio::test)]
async fn non_owner_cannot_add_windows() {
    let ctx = TestContext::new();
    let owner = ctx.user().await;
    let stranger = ctx.user().await;
    let room_id = ctx.room(&owner, json!([])).await;

    let response = as_user(ctx.server.post(&format!("/time/add-time/{room_id}")), stranger.id, OFFICE_IP)
        .json(&json!({ "time": [window(at(4, 9), at(4, 17))] }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["message"], messages::NOT_TIME_OWNER);
}

#[test_log::test(tokio::test)]
async fn window_can_be_moved_and_deleted() {
    let ctx = TestContext::new();
    let owner = ctx.user().await;
    let room_id = ctx
        .room(&owner, json!([window(at(4, 9), at(4, 17)), window(at(5, 9), at(5, 17))]))
        .await;

    let listed: Value = as_user(ctx.server.get(&format!("/time/show/{room_id}")), owner.id, OFFICE_IP)
        .await
        .json();
    let time_id = listed["data"][0]["id"].as_str().unwrap().to_string();

    // Moving onto the sibling window collides.
    as_user(ctx.server.patch(&format!("/time/{time_id}")), owner.id, OFFICE_IP)
        .json(&window(at(5, 8), at(5, 10)))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // Overlapping only its own old slot is fine.
    as_user(ctx.server.patch(&format!("/time/{time_id}")), owner.id, OFFICE_IP)
        .json(&window(at(4, 8), at(4, 16)))
        .await
        .assert_status(StatusCode::CREATED);

    as_user(ctx.server.delete(&format!("/time/{time_id}")), owner.id, OFFICE_IP)
        .await
        .assert_status_ok();

    let response = as_user(ctx.server.get(&format!("/time/{time_id}")), owner.id, OFFICE_IP).await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["message"], messages::TIME_NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn malformed_window_body_is_rejected_with_envelope() {
    let ctx = TestContext::new();
    let owner = ctx.user().await;
    let room_id = ctx.room(&owner, json!([])).await;

    let response = as_user(ctx.server.post(&format!("/time/add-time/{room_id}")), owner.id, OFFICE_IP)
        .json(&json!({ "time": [{ "start_time": "not a date" }] }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("start_time"));
}

#[test_log::test(tokio::test)]
async fn non_uuid_path_is_rejected_with_envelope() {
    let ctx = TestContext::new();
    let owner = ctx.user().await;

    let response = as_user(ctx.server.get("/time/show/not-a-uuid"), owner.id, OFFICE_IP).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["success"], false);
}
