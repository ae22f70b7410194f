use report_core::model::{AttemptRecord, InteractionRecord};

use super::SqliteRepository;
use super::mapping::{conn, id_i64};
use crate::repository::{AttemptRepository, StorageError};

#[async_trait::async_trait]
impl AttemptRepository for SqliteRepository {
    async fn record_attempt(&self, attempt: &AttemptRecord) -> Result<(), StorageError> {
        sqlx::query(
            r"
                INSERT INTO scorm_attempts (activity_id, user_id, attempt, score)
                VALUES (?1, ?2, ?3, ?4)
                ON CONFLICT(activity_id, user_id, attempt) DO UPDATE SET
                    score = excluded.score
            ",
        )
        .bind(id_i64("activity_id", attempt.activity_id.value())?)
        .bind(id_i64("user_id", attempt.user_id.value())?)
        .bind(i64::from(attempt.attempt))
        .bind(attempt.score)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn record_interaction(
        &self,
        interaction: &InteractionRecord,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r"
                INSERT INTO scorm_interactions (
                    activity_id, user_id, attempt, question_id,
                    description, response, correct
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
        )
        .bind(id_i64("activity_id", interaction.activity_id.value())?)
        .bind(id_i64("user_id", interaction.user_id.value())?)
        .bind(i64::from(interaction.attempt))
        .bind(&interaction.question_id)
        .bind(&interaction.description)
        .bind(&interaction.response)
        .bind(interaction.correct)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }
}
