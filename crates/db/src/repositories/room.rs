use crate::models::{DbRoom, DbRoomMember, DbTimeWindow};
use attendance_core::models::time_window::TimeRange;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::time_window::{insert_time_windows_tx, lock_room_schedule};

/// Creates a room and its initial windows in a single transaction.
pub async fn create_room(
    pool: &Pool<Postgres>,
    name: &str,
    allowed_ip: &str,
    owner_id: Uuid,
    windows: &[TimeRange],
) -> Result<(DbRoom, Vec<DbTimeWindow>)> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating room: id={}, name={}, owner_id={}, windows={}",
        id, name, owner_id, windows.len()
    );

    let mut tx = pool.begin().await?;

    let room = sqlx::query_as::<_, DbRoom>(
        r#"
        INSERT INTO rooms (id, name, allowed_ip, owner_id, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, allowed_ip, owner_id, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(allowed_ip)
    .bind(owner_id)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    lock_room_schedule(&mut tx, id).await?;
    let time_windows = insert_time_windows_tx(&mut tx, id, windows).await?;

    tx.commit().await?;

    tracing::debug!("Room created successfully: id={}", id);
    Ok((room, time_windows))
}

pub async fn get_room_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbRoom>> {
    let room = sqlx::query_as::<_, DbRoom>(
        r#"
        SELECT id, name, allowed_ip, owner_id, created_at
        FROM rooms
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(room)
}

pub async fn get_room_members(pool: &Pool<Postgres>, room_id: Uuid) -> Result<Vec<DbRoomMember>> {
    let members = sqlx::query_as::<_, DbRoomMember>(
        r#"
        SELECT room_id, user_id
        FROM room_members
        WHERE room_id = $1
        ORDER BY joined_at ASC
        "#,
    )
    .bind(room_id)
    .fetch_all(pool)
    .await?;

    Ok(members)
}

/// Returns `false` when the user already was a member.
pub async fn add_room_member(pool: &Pool<Postgres>, room_id: Uuid, user_id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO room_members (room_id, user_id, joined_at)
        VALUES ($1, $2, $3)
        ON CONFLICT (room_id, user_id) DO NOTHING
        "#,
    )
    .bind(room_id)
    .bind(user_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
