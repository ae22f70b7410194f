use async_trait::async_trait;
use report_core::model::{
    ActivityContext, ActivityId, AttemptRecord, InteractionRecord, QuestionData, ScoreSet, UserId,
    tally_interactions,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Aggregated report data for SCORM activities.
#[async_trait]
pub trait ScormDataProvider: Send + Sync {
    /// Per-question response tallies for the activity.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the interactions cannot be read or encoded.
    async fn question_data(&self, activity_id: ActivityId) -> Result<QuestionData, StorageError>;

    /// One score per attempt, ordered by learner then attempt number.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the attempts cannot be read.
    async fn user_scores(&self, activity_id: ActivityId) -> Result<ScoreSet, StorageError>;
}

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Persist or update an activity together with its course and module.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the records cannot be stored.
    async fn upsert_activity(&self, context: &ActivityContext) -> Result<(), StorageError>;

    /// Fetch an activity with its course and module.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_activity(&self, id: ActivityId) -> Result<ActivityContext, StorageError>;
}

#[async_trait]
pub trait AttemptRepository: Send + Sync {
    /// Store an attempt, replacing the score of an existing
    /// (activity, user, attempt) entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the attempt cannot be stored.
    async fn record_attempt(&self, attempt: &AttemptRecord) -> Result<(), StorageError>;

    /// Append a tracked answer.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the interaction cannot be stored.
    async fn record_interaction(&self, interaction: &InteractionRecord)
    -> Result<(), StorageError>;
}

pub(crate) fn question_data_from_interactions(
    interactions: &[InteractionRecord],
) -> Result<QuestionData, StorageError> {
    QuestionData::from_summaries(&tally_interactions(interactions))
        .map_err(|e| StorageError::Serialization(e.to_string()))
}

type AttemptKey = (ActivityId, UserId, u32);

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    activities: Arc<Mutex<HashMap<ActivityId, ActivityContext>>>,
    attempts: Arc<Mutex<BTreeMap<AttemptKey, Option<f64>>>>,
    interactions: Arc<Mutex<Vec<InteractionRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScormDataProvider for InMemoryRepository {
    async fn question_data(&self, activity_id: ActivityId) -> Result<QuestionData, StorageError> {
        let guard = self
            .interactions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let rows: Vec<InteractionRecord> = guard
            .iter()
            .filter(|row| row.activity_id == activity_id)
            .cloned()
            .collect();
        question_data_from_interactions(&rows)
    }

    async fn user_scores(&self, activity_id: ActivityId) -> Result<ScoreSet, StorageError> {
        let guard = self
            .attempts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        // BTreeMap keys sort by (activity, user, attempt).
        Ok(guard
            .iter()
            .filter(|((activity, _, _), _)| *activity == activity_id)
            .map(|(_, score)| *score)
            .collect())
    }
}

#[async_trait]
impl ActivityRepository for InMemoryRepository {
    async fn upsert_activity(&self, context: &ActivityContext) -> Result<(), StorageError> {
        let mut guard = self
            .activities
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(context.activity_id(), context.clone());
        Ok(())
    }

    async fn get_activity(&self, id: ActivityId) -> Result<ActivityContext, StorageError> {
        let guard = self
            .activities
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.get(&id).cloned().ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl AttemptRepository for InMemoryRepository {
    async fn record_attempt(&self, attempt: &AttemptRecord) -> Result<(), StorageError> {
        let mut guard = self
            .attempts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(
            (attempt.activity_id, attempt.user_id, attempt.attempt),
            attempt.score,
        );
        Ok(())
    }

    async fn record_interaction(
        &self,
        interaction: &InteractionRecord,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .interactions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push(interaction.clone());
        Ok(())
    }
}

/// Aggregates the report repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub provider: Arc<dyn ScormDataProvider>,
    pub activities: Arc<dyn ActivityRepository>,
    pub attempts: Arc<dyn AttemptRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_repository(InMemoryRepository::new())
    }

    pub(crate) fn from_repository<R>(repo: R) -> Self
    where
        R: ScormDataProvider + ActivityRepository + AttemptRepository + Clone + 'static,
    {
        let provider: Arc<dyn ScormDataProvider> = Arc::new(repo.clone());
        let activities: Arc<dyn ActivityRepository> = Arc::new(repo.clone());
        let attempts: Arc<dyn AttemptRepository> = Arc::new(repo);
        Self {
            provider,
            activities,
            attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use report_core::model::{Course, CourseId, CourseModule, CourseModuleId, ScormActivity};

    fn attempt(activity: u64, user: u64, attempt: u32, score: Option<f64>) -> AttemptRecord {
        AttemptRecord {
            activity_id: ActivityId::new(activity),
            user_id: UserId::new(user),
            attempt,
            score,
        }
    }

    #[tokio::test]
    async fn scores_are_ordered_by_user_then_attempt() {
        let repo = InMemoryRepository::new();
        repo.record_attempt(&attempt(1, 2, 1, Some(70.0))).await.unwrap();
        repo.record_attempt(&attempt(1, 1, 2, None)).await.unwrap();
        repo.record_attempt(&attempt(1, 1, 1, Some(40.0))).await.unwrap();
        repo.record_attempt(&attempt(2, 1, 1, Some(99.0))).await.unwrap();

        let scores = repo.user_scores(ActivityId::new(1)).await.unwrap();
        assert_eq!(scores.as_slice(), &[Some(40.0), None, Some(70.0)]);
    }

    #[tokio::test]
    async fn rerecording_an_attempt_replaces_its_score() {
        let repo = InMemoryRepository::new();
        repo.record_attempt(&attempt(1, 1, 1, None)).await.unwrap();
        repo.record_attempt(&attempt(1, 1, 1, Some(88.0))).await.unwrap();

        let scores = repo.user_scores(ActivityId::new(1)).await.unwrap();
        assert_eq!(scores, ScoreSet::from_scores([88.0]));
    }

    #[tokio::test]
    async fn question_data_only_covers_requested_activity() {
        let repo = InMemoryRepository::new();
        for (activity, question) in [(1, "q1"), (2, "q9")] {
            repo.record_interaction(&InteractionRecord {
                activity_id: ActivityId::new(activity),
                user_id: UserId::new(1),
                attempt: 1,
                question_id: question.into(),
                description: String::new(),
                response: "x".into(),
                correct: true,
            })
            .await
            .unwrap();
        }

        let data = repo.question_data(ActivityId::new(1)).await.unwrap();
        let questions = data.as_value().as_array().unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0]["question_id"], "q1");
    }

    #[tokio::test]
    async fn missing_activity_is_not_found() {
        let storage = Storage::in_memory();
        let err = storage
            .activities
            .get_activity(ActivityId::new(5))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound));

        let ctx = ActivityContext::new(
            ScormActivity {
                id: ActivityId::new(5),
                course_id: CourseId::new(1),
                name: "Intro".into(),
            },
            CourseModule {
                id: CourseModuleId::new(50),
                course_id: CourseId::new(1),
                activity_id: ActivityId::new(5),
            },
            Course {
                id: CourseId::new(1),
                short_name: "C1".into(),
                full_name: "Course one".into(),
            },
        )
        .unwrap();
        storage.activities.upsert_activity(&ctx).await.unwrap();
        assert_eq!(
            storage.activities.get_activity(ActivityId::new(5)).await.unwrap(),
            ctx
        );
    }
}
