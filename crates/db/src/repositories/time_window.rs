use crate::models::DbTimeWindow;
use attendance_core::models::time_window::TimeRange;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres, Transaction};
use uuid::Uuid;

/// Serializes schedule writes of one room until the transaction ends.
pub(crate) async fn lock_room_schedule(
    tx: &mut Transaction<'_, Postgres>,
    room_id: Uuid,
) -> Result<()> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1::text, 0))")
        .bind(room_id)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

pub(crate) async fn insert_time_windows_tx(
    tx: &mut Transaction<'_, Postgres>,
    room_id: Uuid,
    windows: &[TimeRange],
) -> Result<Vec<DbTimeWindow>> {
    let now = Utc::now();
    let mut inserted = Vec::with_capacity(windows.len());

    for window in windows {
        let time_window = sqlx::query_as::<_, DbTimeWindow>(
            r#"
            INSERT INTO time_windows (id, room_id, start_time, end_time, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, room_id, start_time, end_time, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(room_id)
        .bind(window.start_time)
        .bind(window.end_time)
        .bind(now)
        .fetch_one(&mut **tx)
        .await?;

        inserted.push(time_window);
    }

    Ok(inserted)
}

/// Inserts every window or none; the exclusion constraint rejects overlaps
/// that slipped past validation.
pub async fn create_time_windows(
    pool: &Pool<Postgres>,
    room_id: Uuid,
    windows: &[TimeRange],
) -> Result<Vec<DbTimeWindow>> {
    let mut tx = pool.begin().await?;
    lock_room_schedule(&mut tx, room_id).await?;
    let inserted = insert_time_windows_tx(&mut tx, room_id, windows).await?;
    tx.commit().await?;

    Ok(inserted)
}

pub async fn get_time_windows_by_room_id(
    pool: &Pool<Postgres>,
    room_id: Uuid,
) -> Result<Vec<DbTimeWindow>> {
    let time_windows = sqlx::query_as::<_, DbTimeWindow>(
        r#"
        SELECT id, room_id, start_time, end_time, created_at
        FROM time_windows
        WHERE room_id = $1
        ORDER BY start_time ASC
        "#,
    )
    .bind(room_id)
    .fetch_all(pool)
    .await?;

    Ok(time_windows)
}

pub async fn get_time_window_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbTimeWindow>> {
    let time_window = sqlx::query_as::<_, DbTimeWindow>(
        r#"
        SELECT id, room_id, start_time, end_time, created_at
        FROM time_windows
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(time_window)
}

pub async fn update_time_window(
    pool: &Pool<Postgres>,
    id: Uuid,
    window: TimeRange,
) -> Result<Option<DbTimeWindow>> {
    let mut tx = pool.begin().await?;

    let room_id = sqlx::query_scalar::<_, Uuid>("SELECT room_id FROM time_windows WHERE id = $1")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    let Some(room_id) = room_id else {
        return Ok(None);
    };
    lock_room_schedule(&mut tx, room_id).await?;

    let updated = sqlx::query_as::<_, DbTimeWindow>(
        r#"
        UPDATE time_windows
        SET start_time = $2, end_time = $3
        WHERE id = $1
        RETURNING id, room_id, start_time, end_time, created_at
        "#,
    )
    .bind(id)
    .bind(window.start_time)
    .bind(window.end_time)
    .fetch_optional(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(updated)
}

pub async fn delete_time_window(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM time_windows
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
