mod activity;
mod ids;
mod question;
mod report;
mod scores;

pub use ids::{ActivityId, CourseId, CourseModuleId, ParseIdError, UserId};

pub use activity::{
    ActivityContext, ActivityError, AttemptRecord, Course, CourseModule, InteractionRecord,
    ScormActivity,
};
pub use question::{QuestionData, QuestionSummary, ResponseTally, tally_interactions};
pub use report::{ReportViewModel, clamp_percentage, round_to_cents};
pub use scores::ScoreSet;
