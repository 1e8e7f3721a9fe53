use attendance_core::messages;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::{as_user, today, TestContext, OFFICE_IP};

#[test_log::test(tokio::test)]
async fn member_checks_in_once_per_day() {
    let ctx = TestContext::new();
    let owner = ctx.user().await;
    let member = ctx.user().await;
    let room_id = ctx.room(&owner, json!([today()])).await;
    ctx.add_member(&owner, room_id, &member).await;

    let first = as_user(
        ctx.server.post(&format!("/attendance/checkin/{room_id}")),
        member.id,
        OFFICE_IP,
    )
    .await;
    first.assert_status(StatusCode::CREATED);
    let body: Value = first.json();
    assert_eq!(body["data"]["userId"], member.id.to_string());
    assert!(body["data"]["checkOut"].is_null());

    let second = as_user(
        ctx.server.post(&format!("/attendance/checkin/{room_id}")),
        member.id,
        OFFICE_IP,
    )
    .await;
    second.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = second.json();
    assert_eq!(body["message"], messages::ALREADY_CHECKED_IN);
}

#[test_log::test(tokio::test)]
async fn check_in_from_another_network_is_forbidden() {
    let ctx = TestContext::new();
    let owner = ctx.user().await;
    let member = ctx.user().await;
    let room_id = ctx.room(&owner, json!([today()])).await;
    ctx.add_member(&owner, room_id, &member).await;

    let response = as_user(
        ctx.server.post(&format!("/attendance/checkin/{room_id}")),
        member.id,
        "198.51.100.23",
    )
    .await;

    response.assert_status(StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["message"], messages::IP_NOT_ALLOWED);
}

#[test_log::test(tokio::test)]
async fn check_out_closes_the_day() {
    let ctx = TestContext::new();
    let owner = ctx.user().await;
    let member = ctx.user().await;
    let room_id = ctx.room(&owner, json!([today()])).await;
    ctx.add_member(&owner, room_id, &member).await;

    let before = as_user(
        ctx.server.post(&format!("/attendance/checkout/{room_id}")),
        member.id,
        OFFICE_IP,
    )
    .await;
    before.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = before.json();
    assert_eq!(body["message"], messages::NOT_CHECKED_IN);

    as_user(
        ctx.server.post(&format!("/attendance/checkin/{room_id}")),
        member.id,
        OFFICE_IP,
    )
    .await
    .assert_status(StatusCode::CREATED);

    let response = as_user(
        ctx.server.post(&format!("/attendance/checkout/{room_id}")),
        member.id,
        OFFICE_IP,
    )
    .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert!(body["data"]["checkOut"].is_string());

    let again = as_user(
        ctx.server.post(&format!("/attendance/checkout/{room_id}")),
        member.id,
        OFFICE_IP,
    )
    .await;
    again.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = again.json();
    assert_eq!(body["message"], messages::ALREADY_CHECKED_OUT);
}

#[test_log::test(tokio::test)]
async fn room_without_schedule_today_refuses_check_in() {
    let ctx = TestContext::new();
    let owner = ctx.user().await;
    let member = ctx.user().await;
    let room_id = ctx.room(&owner, json!([])).await;
    ctx.add_member(&owner, room_id, &member).await;

    let response = as_user(
        ctx.server.post(&format!("/attendance/checkin/{room_id}")),
        member.id,
        OFFICE_IP,
    )
    .await;

    response.assert_status(StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["message"], messages::NO_SCHEDULE_TODAY);
}
