use report_core::model::{ActivityId, InteractionRecord, QuestionData, ScoreSet};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{activity_id_from_i64, conn, id_i64, ser, u32_from_i64, user_id_from_i64};
use crate::repository::{ScormDataProvider, StorageError, question_data_from_interactions};

fn map_interaction_row(row: &sqlx::sqlite::SqliteRow) -> Result<InteractionRecord, StorageError> {
    Ok(InteractionRecord {
        activity_id: activity_id_from_i64(row.try_get::<i64, _>("activity_id").map_err(ser)?)?,
        user_id: user_id_from_i64(row.try_get::<i64, _>("user_id").map_err(ser)?)?,
        attempt: u32_from_i64("attempt", row.try_get::<i64, _>("attempt").map_err(ser)?)?,
        question_id: row.try_get("question_id").map_err(ser)?,
        description: row.try_get("description").map_err(ser)?,
        response: row.try_get("response").map_err(ser)?,
        correct: row.try_get("correct").map_err(ser)?,
    })
}

#[async_trait::async_trait]
impl ScormDataProvider for SqliteRepository {
    async fn question_data(&self, activity_id: ActivityId) -> Result<QuestionData, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT
                    activity_id, user_id, attempt, question_id,
                    description, response, correct
                FROM scorm_interactions
                WHERE activity_id = ?1
                ORDER BY id ASC
            ",
        )
        .bind(id_i64("activity_id", activity_id.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut interactions = Vec::with_capacity(rows.len());
        for row in rows {
            interactions.push(map_interaction_row(&row)?);
        }
        tracing::debug!(
            %activity_id,
            interactions = interactions.len(),
            "loaded question interactions"
        );

        question_data_from_interactions(&interactions)
    }

    async fn user_scores(&self, activity_id: ActivityId) -> Result<ScoreSet, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT score
                FROM scorm_attempts
                WHERE activity_id = ?1
                ORDER BY user_id ASC, attempt ASC
            ",
        )
        .bind(id_i64("activity_id", activity_id.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut scores = Vec::with_capacity(rows.len());
        for row in rows {
            scores.push(row.try_get::<Option<f64>, _>("score").map_err(ser)?);
        }
        tracing::debug!(%activity_id, attempts = scores.len(), "loaded user scores");

        Ok(ScoreSet::new(scores))
    }
}
