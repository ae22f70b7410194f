use report_core::model::{
    ActivityContext, ActivityId, Course, CourseModule, ScormActivity,
};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{
    activity_id_from_i64, conn, course_id_from_i64, course_module_id_from_i64, id_i64, ser,
};
use crate::repository::{ActivityRepository, StorageError};

fn map_activity_row(row: &sqlx::sqlite::SqliteRow) -> Result<ActivityContext, StorageError> {
    let activity_id = activity_id_from_i64(row.try_get::<i64, _>("activity_id").map_err(ser)?)?;
    let course_id = course_id_from_i64(row.try_get::<i64, _>("course_id").map_err(ser)?)?;
    let module_course_id =
        course_id_from_i64(row.try_get::<i64, _>("module_course_id").map_err(ser)?)?;
    let activity_course_id =
        course_id_from_i64(row.try_get::<i64, _>("activity_course_id").map_err(ser)?)?;
    let module_id = course_module_id_from_i64(row.try_get::<i64, _>("module_id").map_err(ser)?)?;

    let activity = ScormActivity {
        id: activity_id,
        course_id: activity_course_id,
        name: row.try_get("name").map_err(ser)?,
    };
    let course_module = CourseModule {
        id: module_id,
        course_id: module_course_id,
        activity_id,
    };
    let course = Course {
        id: course_id,
        short_name: row.try_get("short_name").map_err(ser)?,
        full_name: row.try_get("full_name").map_err(ser)?,
    };

    ActivityContext::new(activity, course_module, course).map_err(ser)
}

#[async_trait::async_trait]
impl ActivityRepository for SqliteRepository {
    async fn upsert_activity(&self, context: &ActivityContext) -> Result<(), StorageError> {
        let course = context.course();
        let activity = context.activity();
        let module = context.course_module();

        let mut tx = self.pool.begin().await.map_err(conn)?;

        sqlx::query(
            r"
                INSERT INTO courses (id, short_name, full_name)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(id) DO UPDATE SET
                    short_name = excluded.short_name,
                    full_name = excluded.full_name
            ",
        )
        .bind(id_i64("course_id", course.id.value())?)
        .bind(&course.short_name)
        .bind(&course.full_name)
        .execute(&mut *tx)
        .await
        .map_err(conn)?;

        sqlx::query(
            r"
                INSERT INTO scorm_activities (id, course_id, name)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(id) DO UPDATE SET
                    course_id = excluded.course_id,
                    name = excluded.name
            ",
        )
        .bind(id_i64("activity_id", activity.id.value())?)
        .bind(id_i64("course_id", activity.course_id.value())?)
        .bind(&activity.name)
        .execute(&mut *tx)
        .await
        .map_err(conn)?;

        sqlx::query(
            r"
                INSERT INTO course_modules (id, course_id, activity_id)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(id) DO UPDATE SET
                    course_id = excluded.course_id,
                    activity_id = excluded.activity_id
            ",
        )
        .bind(id_i64("course_module_id", module.id.value())?)
        .bind(id_i64("course_id", module.course_id.value())?)
        .bind(id_i64("activity_id", module.activity_id.value())?)
        .execute(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => StorageError::Conflict,
            other => conn(other),
        })?;

        tx.commit().await.map_err(conn)?;
        Ok(())
    }

    async fn get_activity(&self, id: ActivityId) -> Result<ActivityContext, StorageError> {
        let row = sqlx::query(
            r"
                SELECT
                    a.id AS activity_id,
                    a.course_id AS activity_course_id,
                    a.name,
                    m.id AS module_id,
                    m.course_id AS module_course_id,
                    c.id AS course_id,
                    c.short_name,
                    c.full_name
                FROM scorm_activities a
                JOIN course_modules m ON m.activity_id = a.id
                JOIN courses c ON c.id = a.course_id
                WHERE a.id = ?1
            ",
        )
        .bind(id_i64("activity_id", id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?
        .ok_or(StorageError::NotFound)?;

        map_activity_row(&row)
    }
}
