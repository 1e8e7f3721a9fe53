use crate::models::DbAttendanceEntry;
use attendance_core::models::attendance::NewAttendanceEntry;
use chrono::{DateTime, NaiveDate, Utc};
use eyre::{eyre, Result};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const ENTRY_COLUMNS: &str = "id, user_id, room_id, time_window_id, attendance_day, check_in, check_out, is_late_arrival, is_leave_early";

pub async fn get_attendance_for_day(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    room_id: Uuid,
    day: NaiveDate,
) -> Result<Option<DbAttendanceEntry>> {
    let entry = sqlx::query_as::<_, DbAttendanceEntry>(&format!(
        r#"
        SELECT {ENTRY_COLUMNS}
        FROM attendance_entries
        WHERE user_id = $1 AND room_id = $2 AND attendance_day = $3
        "#
    ))
    .bind(user_id)
    .bind(room_id)
    .bind(day)
    .fetch_optional(pool)
    .await?;

    Ok(entry)
}

/// Single conditional write; `None` means the day already had an entry.
pub async fn insert_attendance_if_absent(
    pool: &Pool<Postgres>,
    entry: &NewAttendanceEntry,
) -> Result<Option<DbAttendanceEntry>> {
    let inserted = sqlx::query_as::<_, DbAttendanceEntry>(&format!(
        r#"
        INSERT INTO attendance_entries
            (id, user_id, room_id, time_window_id, attendance_day, check_in, is_late_arrival)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT ON CONSTRAINT one_entry_per_day DO NOTHING
        RETURNING {ENTRY_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(entry.user_id)
    .bind(entry.room_id)
    .bind(entry.time_window_id)
    .bind(entry.attendance_day)
    .bind(entry.check_in)
    .bind(entry.is_late_arrival)
    .fetch_optional(pool)
    .await?;

    Ok(inserted)
}

pub async fn update_check_out(
    pool: &Pool<Postgres>,
    id: Uuid,
    check_out: DateTime<Utc>,
    is_leave_early: bool,
) -> Result<DbAttendanceEntry> {
    let updated = sqlx::query_as::<_, DbAttendanceEntry>(&format!(
        r#"
        UPDATE attendance_entries
        SET check_out = $2, is_leave_early = $3
        WHERE id = $1
        RETURNING {ENTRY_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(check_out)
    .bind(is_leave_early)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| eyre!("Attendance entry {} not found", id))?;

    Ok(updated)
}

pub async fn get_attendance_by_room_between(
    pool: &Pool<Postgres>,
    room_id: Uuid,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<DbAttendanceEntry>> {
    let entries = sqlx::query_as::<_, DbAttendanceEntry>(&format!(
        r#"
        SELECT {ENTRY_COLUMNS}
        FROM attendance_entries
        WHERE room_id = $1 AND check_in >= $2 AND check_in < $3
        ORDER BY check_in ASC
        "#
    ))
    .bind(room_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

pub async fn get_attendance_by_room(
    pool: &Pool<Postgres>,
    room_id: Uuid,
) -> Result<Vec<DbAttendanceEntry>> {
    let entries = sqlx::query_as::<_, DbAttendanceEntry>(&format!(
        r#"
        SELECT {ENTRY_COLUMNS}
        FROM attendance_entries
        WHERE room_id = $1
        ORDER BY check_in DESC NULLS LAST
        "#
    ))
    .bind(room_id)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

pub async fn get_attendance_by_user(
    pool: &Pool<Postgres>,
    user_id: Uuid,
) -> Result<Vec<DbAttendanceEntry>> {
    let entries = sqlx::query_as::<_, DbAttendanceEntry>(&format!(
        r#"
        SELECT {ENTRY_COLUMNS}
        FROM attendance_entries
        WHERE user_id = $1
        ORDER BY check_in DESC NULLS LAST
        "#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}
