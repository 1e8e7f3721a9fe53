use attendance_core::messages;
use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{as_user, window, TestContext, OFFICE_IP};

#[test_log::test(tokio::test)]
async fn create_room_defaults_allowed_ip_to_caller_address() {
    let ctx = TestContext::new();
    let owner = ctx.user().await;

    let response = as_user(ctx.server.post("/room/create"), owner.id, "203.0.113.7")
        .json(&json!({
            "name": "Lab",
            "time": [window(
                Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 3, 4, 17, 0, 0).unwrap(),
            )],
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["allowed_ip"], "203.0.113.7");
    assert_eq!(body["data"]["owner_id"], owner.id.to_string());
    assert_eq!(body["data"]["time"].as_array().unwrap().len(), 1);
}

#[test_log::test(tokio::test)]
async fn create_room_with_overlapping_windows_is_rejected() {
    let ctx = TestContext::new();
    let owner = ctx.user().await;
    let at = |h| Utc.with_ymd_and_hms(2024, 3, 4, h, 0, 0).unwrap();

    let response = as_user(ctx.server.post("/room/create"), owner.id, OFFICE_IP)
        .json(&json!({
            "name": "Lab",
            "time": [window(at(10), at(12)), window(at(11), at(13))],
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], messages::OVERLAPPING_TIME);
}

#[test_log::test(tokio::test)]
async fn unknown_room_is_not_found() {
    let ctx = TestContext::new();
    let user = ctx.user().await;

    let response = as_user(
        ctx.server.get(&format!("/room/{}", Uuid::new_v4())),
        user.id,
        OFFICE_IP,
    )
    .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["message"], messages::ROOM_NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn room_detail_lists_owner_and_members() {
    let ctx = TestContext::new();
    let owner = ctx.user().await;
    let member = ctx.user().await;
    let room_id = ctx.room(&owner, json!([])).await;
    ctx.add_member(&owner, room_id, &member).await;

    let response = as_user(ctx.server.get(&format!("/room/{room_id}")), member.id, OFFICE_IP).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["owner"]["firstname"], owner.firstname.as_str());
    assert_eq!(body["data"]["members"][0]["id"], member.id.to_string());
}

#[test_log::test(tokio::test)]
async fn adding_a_member_twice_is_rejected() {
    let ctx = TestContext::new();
    let owner = ctx.user().await;
    let member = ctx.user().await;
    let room_id = ctx.room(&owner, json!([])).await;
    ctx.add_member(&owner, room_id, &member).await;

    let response = as_user(
        ctx.server.post(&format!("/room/add-member/{room_id}")),
        owner.id,
        OFFICE_IP,
    )
    .json(&json!({ "email": member.email }))
    .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], messages::ALREADY_MEMBER);
}

#[test_log::test(tokio::test)]
async fn only_the_owner_adds_members() {
    let ctx = TestContext::new();
    let owner = ctx.user().await;
    let stranger = ctx.user().await;
    let room_id = ctx.room(&owner, json!([])).await;

    let response = as_user(
        ctx.server.post(&format!("/room/add-member/{room_id}")),
        stranger.id,
        OFFICE_IP,
    )
    .json(&json!({ "email": stranger.email }))
    .await;

    response.assert_status(StatusCode::FORBIDDEN);
}
