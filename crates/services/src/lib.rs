#![forbid(unsafe_code)]

pub mod error;
pub mod page;
pub mod report;
pub mod template;

pub use error::{ReportError, TemplateError};
pub use page::{AmdCall, PageRequirements, ScriptRegistrar};
pub use report::{
    DASHBOARD_SCRIPT, OutputMode, QUESTION_VIEW_SCRIPT, QuestionReport, REPORT_TEMPLATE,
    RenderContext, ReportRenderer,
};
pub use template::TemplateRenderer;
