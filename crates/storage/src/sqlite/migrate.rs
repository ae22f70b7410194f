use chrono::Utc;
use sqlx::SqlitePool;

use super::SqliteInitError;

/// Runs the versioned schema migrations.
///
/// Version 1 creates courses, course modules, SCORM activities, attempts and
/// interactions.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    async fn is_applied(pool: &SqlitePool, version: i64) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM schema_migrations WHERE version = ?1")
            .bind(version)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
            ",
    )
    .execute(pool)
    .await?;

    if is_applied(pool, 1).await? {
        tracing::debug!("schema already at version 1");
        return Ok(());
    }

    let mut tx = pool.begin().await?;

    let statements = [
        r"
            CREATE TABLE IF NOT EXISTS courses (
                id INTEGER PRIMARY KEY,
                short_name TEXT NOT NULL,
                full_name TEXT NOT NULL
            );
        ",
        r"
            CREATE TABLE IF NOT EXISTS scorm_activities (
                id INTEGER PRIMARY KEY,
                course_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                FOREIGN KEY (course_id) REFERENCES courses(id) ON DELETE CASCADE
            );
        ",
        r"
            CREATE TABLE IF NOT EXISTS course_modules (
                id INTEGER PRIMARY KEY,
                course_id INTEGER NOT NULL,
                activity_id INTEGER NOT NULL UNIQUE,
                FOREIGN KEY (course_id) REFERENCES courses(id) ON DELETE CASCADE,
                FOREIGN KEY (activity_id) REFERENCES scorm_activities(id) ON DELETE CASCADE
            );
        ",
        r"
            CREATE TABLE IF NOT EXISTS scorm_attempts (
                activity_id INTEGER NOT NULL,
                user_id INTEGER NOT NULL,
                attempt INTEGER NOT NULL CHECK (attempt >= 0),
                score REAL,
                PRIMARY KEY (activity_id, user_id, attempt)
            );
        ",
        r"
            CREATE TABLE IF NOT EXISTS scorm_interactions (
                id INTEGER PRIMARY KEY,
                activity_id INTEGER NOT NULL,
                user_id INTEGER NOT NULL,
                attempt INTEGER NOT NULL CHECK (attempt >= 0),
                question_id TEXT NOT NULL,
                description TEXT NOT NULL,
                response TEXT NOT NULL,
                correct INTEGER NOT NULL CHECK (correct IN (0, 1))
            );
        ",
        r"
            CREATE INDEX IF NOT EXISTS idx_scorm_interactions_activity
                ON scorm_interactions (activity_id, question_id);
        ",
    ];

    for statement in statements {
        sqlx::query(statement).execute(&mut *tx).await?;
    }

    sqlx::query(
        r"
            INSERT INTO schema_migrations (version, applied_at)
            VALUES (?1, ?2)
            ON CONFLICT(version) DO NOTHING
        ",
    )
    .bind(1_i64)
    .bind(Utc::now())
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    tracing::debug!("applied schema version 1");

    Ok(())
}
