use std::{sync::Arc, time::Duration};

use attendance_core::{
    calendar::Calendar,
    errors::AttendanceError,
    messages,
    models::{room::CreateRoomRequest, time_window::TimeRange, user::User},
    services::{ServiceContext, Services},
    store::Stores,
};
use attendance_db::MemoryStore;
use chrono::{DateTime, TimeZone, Utc};
use fake::{
    Fake,
    faker::{
        internet::en::SafeEmail,
        name::en::{FirstName, LastName},
    },
};
use pretty_assertions::assert_eq;
use uuid::Uuid;

const OFFICE_IP: &str = "10.0.0.1";

fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, hour, minute, 0).unwrap()
}

fn fake_user() -> User {
    User {
        id: Uuid::new_v4(),
        firstname: FirstName().fake(),
        lastname: LastName().fake(),
        email: SafeEmail().fake(),
    }
}

struct Office {
    services: Services,
    owner: User,
    member: User,
    room_id: Uuid,
}

/// A room with one 09:00-17:00 window on 2024-03-04 and one member.
async fn office() -> Office {
    let store = Arc::new(MemoryStore::new());
    let owner = fake_user();
    let member = fake_user();
    store.insert_user(owner.clone()).await;
    store.insert_user(member.clone()).await;

    let ctx = ServiceContext::new(
        Stores::from_backend(store),
        Calendar::default(),
        Duration::from_secs(1),
    );
    let services = Services::new(ctx);

    let room = services
        .rooms
        .create_room(
            owner.id,
            CreateRoomRequest {
                name: "Main office".to_string(),
                allowed_ip: Some(OFFICE_IP.to_string()),
                time: vec![TimeRange::new(at(4, 9, 0), at(4, 17, 0))],
            },
            "192.168.1.50",
        )
        .await
        .unwrap();
    services
        .rooms
        .add_member(owner.id, room.id, &member.email)
        .await
        .unwrap();

    Office {
        services,
        owner,
        member,
        room_id: room.id,
    }
}

#[test_log::test(tokio::test)]
async fn late_check_in_and_early_check_out_are_flagged() {
    let office = office().await;
    let ledger = &office.services.attendance;

    let entry = ledger
        .check_in(office.member.id, office.room_id, OFFICE_IP, at(4, 9, 15))
        .await
        .unwrap();
    assert!(entry.is_late_arrival);
    assert_eq!(entry.check_out, None);

    let entry = ledger
        .check_out(office.member.id, office.room_id, OFFICE_IP, at(4, 16, 30))
        .await
        .unwrap();
    assert!(entry.is_leave_early);
    assert_eq!(entry.check_out, Some(at(4, 16, 30)));
}

#[test_log::test(tokio::test)]
async fn on_time_check_in_is_not_late() {
    let office = office().await;

    let entry = office
        .services
        .attendance
        .check_in(office.member.id, office.room_id, OFFICE_IP, at(4, 9, 0))
        .await
        .unwrap();

    assert!(!entry.is_late_arrival);
}

#[test_log::test(tokio::test)]
async fn second_check_in_on_the_same_day_conflicts() {
    let office = office().await;
    let ledger = &office.services.attendance;

    ledger
        .check_in(office.member.id, office.room_id, OFFICE_IP, at(4, 8, 55))
        .await
        .unwrap();
    let err = ledger
        .check_in(office.member.id, office.room_id, OFFICE_IP, at(4, 10, 0))
        .await
        .unwrap_err();

    assert!(matches!(err, AttendanceError::Conflict(_)));
    assert_eq!(err.message(), messages::ALREADY_CHECKED_IN);
}

#[test_log::test(tokio::test)]
async fn concurrent_check_ins_record_a_single_entry() {
    let office = office().await;
    let ledger = office.services.attendance.clone();

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let ledger = ledger.clone();
            let user_id = office.member.id;
            let room_id = office.room_id;
            tokio::spawn(async move { ledger.check_in(user_id, room_id, OFFICE_IP, at(4, 9, 0)).await })
        })
        .collect();

    let mut successes = 0;
    for task in tasks {
        if task.await.unwrap().is_ok() {
            successes += 1;
        }
    }

    assert_eq!(successes, 1);
    let history = ledger.my_history(office.member.id).await.unwrap();
    assert_eq!(history.len(), 1);
}

#[test_log::test(tokio::test)]
async fn check_in_from_another_network_is_forbidden() {
    let office = office().await;

    let err = office
        .services
        .attendance
        .check_in(office.member.id, office.room_id, "172.16.0.9", at(4, 9, 0))
        .await
        .unwrap_err();

    assert!(matches!(err, AttendanceError::Forbidden(_)));
    assert_eq!(err.message(), messages::IP_NOT_ALLOWED);
}

#[test_log::test(tokio::test)]
async fn check_in_by_non_member_is_forbidden() {
    let office = office().await;

    let err = office
        .services
        .attendance
        .check_in(Uuid::new_v4(), office.room_id, OFFICE_IP, at(4, 9, 0))
        .await
        .unwrap_err();

    assert_eq!(err.message(), messages::NOT_A_MEMBER);
}

#[test_log::test(tokio::test)]
async fn check_in_without_a_window_that_day_is_forbidden() {
    let office = office().await;

    let err = office
        .services
        .attendance
        .check_in(office.member.id, office.room_id, OFFICE_IP, at(5, 9, 0))
        .await
        .unwrap_err();

    assert!(matches!(err, AttendanceError::Forbidden(_)));
    assert_eq!(err.message(), messages::NO_SCHEDULE_TODAY);
}

#[test_log::test(tokio::test)]
async fn check_out_requires_a_check_in() {
    let office = office().await;

    let err = office
        .services
        .attendance
        .check_out(office.member.id, office.room_id, OFFICE_IP, at(4, 17, 0))
        .await
        .unwrap_err();

    assert!(matches!(err, AttendanceError::Validation(_)));
    assert_eq!(err.message(), messages::NOT_CHECKED_IN);
}

#[test_log::test(tokio::test)]
async fn second_check_out_conflicts() {
    let office = office().await;
    let ledger = &office.services.attendance;

    ledger
        .check_in(office.member.id, office.room_id, OFFICE_IP, at(4, 9, 0))
        .await
        .unwrap();
    ledger
        .check_out(office.member.id, office.room_id, OFFICE_IP, at(4, 17, 0))
        .await
        .unwrap();
    let err = ledger
        .check_out(office.member.id, office.room_id, OFFICE_IP, at(4, 18, 0))
        .await
        .unwrap_err();

    assert!(matches!(err, AttendanceError::Conflict(_)));
}

#[test_log::test(tokio::test)]
async fn overlapping_batch_is_rejected_as_a_whole() {
    let office = office().await;
    let schedule = &office.services.schedule;

    let err = schedule
        .insert_batch(
            office.owner.id,
            office.room_id,
            vec![
                TimeRange::new(at(6, 10, 0), at(6, 12, 0)),
                TimeRange::new(at(6, 11, 0), at(6, 13, 0)),
            ],
        )
        .await
        .unwrap_err();

    assert_eq!(err.message(), messages::OVERLAPPING_TIME);
    let windows = schedule.find_by_room(office.room_id).await.unwrap();
    assert_eq!(windows.len(), 1);
}

#[test_log::test(tokio::test)]
async fn schedule_round_trip() {
    let office = office().await;
    let schedule = &office.services.schedule;

    let inserted = schedule
        .insert_batch(
            office.owner.id,
            office.room_id,
            vec![TimeRange::new(at(6, 9, 0), at(6, 17, 0))],
        )
        .await
        .unwrap();
    assert_eq!(inserted.len(), 1);

    let updated = schedule
        .update(
            office.owner.id,
            inserted[0].id,
            TimeRange::new(at(6, 8, 0), at(6, 16, 0)),
        )
        .await
        .unwrap();
    assert_eq!(updated.start_time, at(6, 8, 0));

    let owned = schedule.find_by_id(inserted[0].id).await.unwrap();
    assert_eq!(owned.owner_id, office.owner.id);

    schedule.delete(office.owner.id, inserted[0].id).await.unwrap();
    let err = schedule.find_by_id(inserted[0].id).await.unwrap_err();
    assert!(matches!(err, AttendanceError::NotFound(_)));
}

#[test_log::test(tokio::test)]
async fn monthly_statistics_net_out_lateness() {
    let office = office().await;
    let ledger = &office.services.attendance;

    ledger
        .check_in(office.member.id, office.room_id, OFFICE_IP, at(4, 9, 15))
        .await
        .unwrap();
    ledger
        .check_out(office.member.id, office.room_id, OFFICE_IP, at(4, 16, 30))
        .await
        .unwrap();

    let ranked = office
        .services
        .statistics
        .statistics_for_month(office.room_id, 3, 2024)
        .await
        .unwrap();

    assert_eq!(ranked.len(), 1);
    let row = &ranked[0];
    assert_eq!(row.user_id, office.member.id);
    assert_eq!(row.firstname.as_deref(), Some(office.member.firstname.as_str()));
    assert_eq!(row.number_of_attendances, 1);
    assert_eq!(row.late_arrival_count, 1);
    assert_eq!(row.leave_early_count, 1);
    assert_eq!(row.standard_work_hours_per_month, 8.0);
    assert_eq!(row.total_arrival_late_hours, 0.25);
    assert_eq!(row.total_departure_early_hours, 0.5);
    assert_eq!(row.total_time_work_hours_per_month, 7.25);

    let april = office
        .services
        .statistics
        .statistics_for_month(office.room_id, 4, 2024)
        .await
        .unwrap();
    assert!(april.is_empty());
}

#[test_log::test(tokio::test)]
async fn room_history_carries_names() {
    let office = office().await;
    let ledger = &office.services.attendance;

    ledger
        .check_in(office.member.id, office.room_id, OFFICE_IP, at(4, 9, 0))
        .await
        .unwrap();

    let history = ledger.history_by_room(office.room_id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].room_name.as_deref(), Some("Main office"));
    assert_eq!(history[0].firstname.as_deref(), Some(office.member.firstname.as_str()));

    let of_owner = ledger
        .history_of_user(office.room_id, office.owner.id)
        .await
        .unwrap();
    assert!(of_owner.is_empty());
}
