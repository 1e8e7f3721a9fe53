use attendance_core::messages;
use axum::http::StatusCode;
use chrono::{Datelike, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::{as_user, today, TestContext, OFFICE_IP};

#[test_log::test(tokio::test)]
async fn history_lists_the_callers_entries() {
    let ctx = TestContext::new();
    let owner = ctx.user().await;
    let member = ctx.user().await;
    let room_id = ctx.room(&owner, json!([today()])).await;
    ctx.add_member(&owner, room_id, &member).await;
    as_user(ctx.server.post(&format!("/attendance/checkin/{room_id}")), member.id, OFFICE_IP)
        .await
        .assert_status(StatusCode::CREATED);

    let mine: Value = as_user(ctx.server.get("/statistic/history-me"), member.id, OFFICE_IP)
        .await
        .json();
    assert_eq!(mine["numberOfRecords"], 1);
    assert_eq!(mine["data"][0]["roomName"], "Main office");

    let by_room: Value = as_user(
        ctx.server.get(&format!("/statistic/attendance-by-room/{room_id}")),
        owner.id,
        OFFICE_IP,
    )
    .await
    .json();
    assert_eq!(by_room["data"][0]["firstname"], member.firstname.as_str());

    let of_owner: Value = as_user(
        ctx.server.get(&format!("/statistic/find-by-user/{room_id}/{}", owner.id)),
        owner.id,
        OFFICE_IP,
    )
    .await
    .json();
    assert_eq!(of_owner["numberOfRecords"], 0);
}

#[test_log::test(tokio::test)]
async fn monthly_statistics_rank_attendees() {
    let ctx = TestContext::new();
    let owner = ctx.user().await;
    let member = ctx.user().await;
    let room_id = ctx.room(&owner, json!([today()])).await;
    ctx.add_member(&owner, room_id, &member).await;
    as_user(ctx.server.post(&format!("/attendance/checkin/{room_id}")), member.id, OFFICE_IP)
        .await
        .assert_status(StatusCode::CREATED);

    let now = Utc::now();
    let response = as_user(ctx.server.get("/statistic/time-work-by-month"), owner.id, OFFICE_IP)
        .add_query_param("roomId", room_id)
        .add_query_param("month", now.month())
        .add_query_param("year", now.year())
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["numberOfRecords"], 1);
    assert_eq!(body["data"][0]["userId"], member.id.to_string());
    assert_eq!(body["data"][0]["numberOfAttendances"], 1);
}

#[test_log::test(tokio::test)]
async fn out_of_range_month_is_rejected() {
    let ctx = TestContext::new();
    let owner = ctx.user().await;
    let room_id = ctx.room(&owner, json!([])).await;

    let response = as_user(ctx.server.get("/statistic/time-work-by-month"), owner.id, OFFICE_IP)
        .add_query_param("roomId", room_id)
        .add_query_param("month", 13)
        .add_query_param("year", 2024)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], messages::INVALID_MONTH);
}

#[test_log::test(tokio::test)]
async fn missing_query_parameters_are_rejected_with_envelope() {
    let ctx = TestContext::new();
    let owner = ctx.user().await;

    let response = as_user(ctx.server.get("/statistic/time-work-by-month"), owner.id, OFFICE_IP)
        .add_query_param("month", 3)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["success"], false);
}
