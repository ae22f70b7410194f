use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ids::{ActivityId, CourseId, CourseModuleId, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActivityError {
    #[error("course module {module} belongs to activity {found}, expected {expected}")]
    ModuleActivityMismatch {
        module: CourseModuleId,
        expected: ActivityId,
        found: ActivityId,
    },

    #[error("{record} belongs to course {found}, expected {expected}")]
    CourseMismatch {
        record: &'static str,
        expected: CourseId,
        found: CourseId,
    },

    #[error("activity name cannot be empty")]
    EmptyName,
}

/// A SCORM package instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScormActivity {
    pub id: ActivityId,
    pub course_id: CourseId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseModule {
    pub id: CourseModuleId,
    pub course_id: CourseId,
    pub activity_id: ActivityId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub short_name: String,
    pub full_name: String,
}

/// The activity, course module and course a report is rendered for.
///
/// The three records always agree with each other: the module points at the
/// activity and both live in the course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityContext {
    activity: ScormActivity,
    course_module: CourseModule,
    course: Course,
}

impl ActivityContext {
    /// Bundle the records for one activity.
    ///
    /// # Errors
    ///
    /// Returns `ActivityError` if the records disagree on activity or course,
    /// or if the activity name is blank.
    pub fn new(
        activity: ScormActivity,
        course_module: CourseModule,
        course: Course,
    ) -> Result<Self, ActivityError> {
        if activity.name.trim().is_empty() {
            return Err(ActivityError::EmptyName);
        }
        if course_module.activity_id != activity.id {
            return Err(ActivityError::ModuleActivityMismatch {
                module: course_module.id,
                expected: activity.id,
                found: course_module.activity_id,
            });
        }
        if activity.course_id != course.id {
            return Err(ActivityError::CourseMismatch {
                record: "activity",
                expected: course.id,
                found: activity.course_id,
            });
        }
        if course_module.course_id != course.id {
            return Err(ActivityError::CourseMismatch {
                record: "course module",
                expected: course.id,
                found: course_module.course_id,
            });
        }

        Ok(Self {
            activity,
            course_module,
            course,
        })
    }

    #[must_use]
    pub fn activity_id(&self) -> ActivityId {
        self.activity.id
    }

    #[must_use]
    pub fn activity(&self) -> &ScormActivity {
        &self.activity
    }

    #[must_use]
    pub fn course_module(&self) -> &CourseModule {
        &self.course_module
    }

    #[must_use]
    pub fn course(&self) -> &Course {
        &self.course
    }
}

/// One learner attempt at an activity. `score` is `None` when the package
/// never reported a raw score.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptRecord {
    pub activity_id: ActivityId,
    pub user_id: UserId,
    pub attempt: u32,
    pub score: Option<f64>,
}

/// A single tracked answer to a question inside an attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionRecord {
    pub activity_id: ActivityId,
    pub user_id: UserId,
    pub attempt: u32,
    pub question_id: String,
    pub description: String,
    pub response: String,
    pub correct: bool,
}
