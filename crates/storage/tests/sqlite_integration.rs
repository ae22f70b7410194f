use report_core::model::{
    ActivityContext, ActivityId, AttemptRecord, Course, CourseId, CourseModule, CourseModuleId,
    InteractionRecord, ScoreSet, ScormActivity, UserId,
};
use storage::repository::{
    ActivityRepository, AttemptRepository, InMemoryRepository, ScormDataProvider, StorageError,
};
use storage::sqlite::SqliteRepository;

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

fn activity_context(id: u64) -> ActivityContext {
    ActivityContext::new(
        ScormActivity {
            id: ActivityId::new(id),
            course_id: CourseId::new(1),
            name: format!("Package {id}"),
        },
        CourseModule {
            id: CourseModuleId::new(100 + id),
            course_id: CourseId::new(1),
            activity_id: ActivityId::new(id),
        },
        Course {
            id: CourseId::new(1),
            short_name: "ONB".into(),
            full_name: "Onboarding".into(),
        },
    )
    .unwrap()
}

fn interactions() -> Vec<InteractionRecord> {
    let rows = [
        (1, "q1", "Paris", true),
        (2, "q1", "Lyon", false),
        (3, "q1", "Paris", true),
        (1, "q2", "4", true),
        (2, "q2", "5", false),
    ];
    rows.into_iter()
        .map(|(user, question, response, correct)| InteractionRecord {
            activity_id: ActivityId::new(1),
            user_id: UserId::new(user),
            attempt: 1,
            question_id: question.into(),
            description: format!("Prompt for {question}"),
            response: response.into(),
            correct,
        })
        .collect()
}

#[tokio::test]
async fn sqlite_roundtrips_activity_context() {
    let repo = connect("memdb_activity").await;
    let ctx = activity_context(1);
    repo.upsert_activity(&ctx).await.unwrap();
    repo.upsert_activity(&ctx).await.unwrap();

    let fetched = repo.get_activity(ActivityId::new(1)).await.unwrap();
    assert_eq!(fetched, ctx);

    let missing = repo.get_activity(ActivityId::new(2)).await.unwrap_err();
    assert!(matches!(missing, StorageError::NotFound));
}

#[tokio::test]
async fn sqlite_orders_scores_and_keeps_missing_entries() {
    let repo = connect("memdb_scores").await;
    let attempts = [
        (3, 1, Some(100.0)),
        (1, 2, Some(0.0)),
        (1, 1, Some(55.5)),
        (2, 1, None),
    ];
    for (user, attempt, score) in attempts {
        repo.record_attempt(&AttemptRecord {
            activity_id: ActivityId::new(1),
            user_id: UserId::new(user),
            attempt,
            score,
        })
        .await
        .unwrap();
    }

    let scores = repo.user_scores(ActivityId::new(1)).await.unwrap();
    assert_eq!(
        scores,
        ScoreSet::new(vec![Some(55.5), Some(0.0), None, Some(100.0)])
    );

    let other = repo.user_scores(ActivityId::new(9)).await.unwrap();
    assert!(other.is_empty());
}

#[tokio::test]
async fn sqlite_and_memory_agree_on_question_data() {
    let repo = connect("memdb_questions").await;
    let memory = InMemoryRepository::new();
    for row in interactions() {
        repo.record_interaction(&row).await.unwrap();
        memory.record_interaction(&row).await.unwrap();
    }

    let from_sqlite = repo.question_data(ActivityId::new(1)).await.unwrap();
    let from_memory = memory.question_data(ActivityId::new(1)).await.unwrap();
    assert_eq!(from_sqlite, from_memory);

    let questions = from_sqlite.as_value().as_array().unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0]["question_id"], "q1");
    assert_eq!(questions[0]["answered"], 3);
    assert_eq!(questions[0]["correct"], 2);
    assert_eq!(questions[0]["responses"][1]["response"], "Paris");
    assert_eq!(questions[0]["responses"][1]["count"], 2);
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = connect("memdb_migrate").await;
    repo.migrate().await.expect("second migrate");

    let version: i64 = sqlx::query_scalar("SELECT MAX(version) FROM schema_migrations")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(version, 1);
}
