use serde_json::Value;
use services::{REPORT_TEMPLATE, TemplateError, TemplateRenderer};

use crate::vm::ReportDashboardVm;

mod report;

pub use report::{ReportTemplate, ReportTemplateProps};

/// Server-side rendered templates, looked up by name.
#[derive(Debug, Clone, Copy, Default)]
pub struct SsrTemplates;

impl SsrTemplates {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Names this renderer can serve.
    #[must_use]
    pub fn names(&self) -> &'static [&'static str] {
        &[REPORT_TEMPLATE]
    }
}

fn invalid_context(template: &str, err: &serde_json::Error) -> TemplateError {
    TemplateError::InvalidContext {
        template: template.to_string(),
        message: err.to_string(),
    }
}

impl TemplateRenderer for SsrTemplates {
    fn render_from_template(&self, name: &str, context: &Value) -> Result<String, TemplateError> {
        match name {
            REPORT_TEMPLATE => {
                let dashboard = ReportDashboardVm::from_context(context)
                    .map_err(|e| invalid_context(name, &e))?;
                Ok(report::render_report(dashboard))
            }
            other => {
                tracing::warn!(template = other, "template not registered");
                Err(TemplateError::UnknownTemplate(other.to_string()))
            }
        }
    }
}
