use std::fmt;

use report_core::model::{
    ActivityContext, ActivityId, AttemptRecord, Course, CourseId, CourseModule, CourseModuleId,
    InteractionRecord, ScormActivity, UserId,
};
use storage::repository::Storage;

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    activity_id: ActivityId,
    learners: u32,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidActivityId { raw: String },
    InvalidLearners { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidActivityId { raw } => {
                write!(f, "invalid --activity-id value: {raw}")
            }
            ArgsError::InvalidLearners { raw } => write!(f, "invalid --learners value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("REPORT_DB_URL").unwrap_or_else(|_| "sqlite:report.sqlite3?mode=rwc".into());
        let mut activity_id = std::env::var("REPORT_ACTIVITY_ID")
            .ok()
            .and_then(|value| value.parse::<ActivityId>().ok())
            .unwrap_or_else(|| ActivityId::new(1));
        let mut learners = 6;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--activity-id" => {
                    let value = require_value(&mut args, "--activity-id")?;
                    activity_id = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidActivityId { raw: value.clone() })?;
                }
                "--learners" => {
                    let value = require_value(&mut args, "--learners")?;
                    learners = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidLearners { raw: value.clone() })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            activity_id,
            learners,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite:report.sqlite3?mode=rwc)");
    eprintln!("  --activity-id <id>        Activity id to upsert (default: 1)");
    eprintln!("  --learners <n>            Learners with one attempt each (default: 6)");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  REPORT_DB_URL, REPORT_ACTIVITY_ID");
}

const QUESTIONS: [(&str, &str, [&str; 3]); 3] = [
    ("q1", "Which exit is closest to the lab?", ["North", "East", "North"]),
    ("q2", "Who do you call for a chemical spill?", ["Safety officer", "Safety officer", "Reception"]),
    ("q3", "How often are extinguishers inspected?", ["Monthly", "Yearly", "Monthly"]),
];

const CORRECT: [&str; 3] = ["North", "Safety officer", "Monthly"];

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;
    let activity_id = args.activity_id;

    let course_id = CourseId::new(1);
    let context = ActivityContext::new(
        ScormActivity {
            id: activity_id,
            course_id,
            name: "Lab safety induction".into(),
        },
        CourseModule {
            id: CourseModuleId::new(activity_id.value() + 100),
            course_id,
            activity_id,
        },
        Course {
            id: course_id,
            short_name: "SAFE101".into(),
            full_name: "Laboratory safety".into(),
        },
    )?;
    storage.activities.upsert_activity(&context).await?;

    for learner in 0..args.learners {
        let user_id = UserId::new(u64::from(learner) + 1);
        let mut correct = 0_u32;
        for (idx, (question_id, description, answers)) in QUESTIONS.iter().enumerate() {
            let response = answers[(learner as usize) % answers.len()];
            let is_correct = response == CORRECT[idx];
            if is_correct {
                correct += 1;
            }
            storage
                .attempts
                .record_interaction(&InteractionRecord {
                    activity_id,
                    user_id,
                    attempt: 1,
                    question_id: (*question_id).to_string(),
                    description: (*description).to_string(),
                    response: response.to_string(),
                    correct: is_correct,
                })
                .await?;
        }

        // Every fourth learner abandons the package before a score is reported.
        let score = if learner % 4 == 3 {
            None
        } else {
            Some(f64::from(correct) / QUESTIONS.len() as f64 * 100.0)
        };
        storage
            .attempts
            .record_attempt(&AttemptRecord {
                activity_id,
                user_id,
                attempt: 1,
                score,
            })
            .await?;
    }

    println!(
        "Seeded activity {} with {} learner attempts into {}",
        activity_id, args.learners, args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
