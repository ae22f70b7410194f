mod question_report;
mod renderer;

pub use question_report::{
    DASHBOARD_SCRIPT, QUESTION_VIEW_SCRIPT, QuestionReport, REPORT_TEMPLATE,
};
pub use renderer::{OutputMode, RenderContext, ReportRenderer};
