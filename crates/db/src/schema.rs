use eyre::Result;
use sqlx::{Executor, Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Needed for the equality part of the time window exclusion constraint
    sqlx::query("CREATE EXTENSION IF NOT EXISTS btree_gist;")
        .execute(pool)
        .await?;

    // Create users table (profiles are provisioned by the identity service)
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            firstname VARCHAR(50) NOT NULL,
            lastname VARCHAR(50) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create rooms table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rooms (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            allowed_ip VARCHAR(64) NOT NULL,
            owner_id UUID NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create room_members table; the primary key keeps membership unique
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS room_members (
            room_id UUID NOT NULL REFERENCES rooms(id) ON DELETE CASCADE,
            user_id UUID NOT NULL,
            joined_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT room_members_pkey PRIMARY KEY (room_id, user_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create time_windows table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS time_windows (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            room_id UUID NOT NULL REFERENCES rooms(id) ON DELETE CASCADE,
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time),
            CONSTRAINT no_overlapping_windows EXCLUDE USING gist (
                room_id WITH =,
                tstzrange(start_time, end_time, '[)') WITH &&
            )
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create attendance_entries table; one entry per user, room and day
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance_entries (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id UUID NOT NULL,
            room_id UUID NOT NULL REFERENCES rooms(id) ON DELETE CASCADE,
            time_window_id UUID NULL REFERENCES time_windows(id) ON DELETE SET NULL,
            attendance_day DATE NOT NULL,
            check_in TIMESTAMP WITH TIME ZONE NULL,
            check_out TIMESTAMP WITH TIME ZONE NULL,
            is_late_arrival BOOLEAN NOT NULL DEFAULT FALSE,
            is_leave_early BOOLEAN NOT NULL DEFAULT FALSE,
            CONSTRAINT one_entry_per_day UNIQUE (user_id, room_id, attendance_day)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes; several statements, so this goes through the simple query protocol
    pool.execute(
        r#"
        CREATE INDEX IF NOT EXISTS idx_time_windows_room_id ON time_windows(room_id);
        CREATE INDEX IF NOT EXISTS idx_time_windows_start_time ON time_windows(start_time);
        CREATE INDEX IF NOT EXISTS idx_room_members_user_id ON room_members(user_id);
        CREATE INDEX IF NOT EXISTS idx_attendance_room_check_in ON attendance_entries(room_id, check_in);
        CREATE INDEX IF NOT EXISTS idx_attendance_user_id ON attendance_entries(user_id);
        "#,
    )
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
