use async_trait::async_trait;
use report_core::model::ActivityContext;

use crate::error::ReportError;
use crate::page::ScriptRegistrar;
use crate::template::TemplateRenderer;

/// What the caller asked the report for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    View,
    /// Export in the named format (`csv`, `ods`, `excel`, ...).
    Download(String),
}

impl OutputMode {
    /// Interpret a download parameter; blank means an interactive view.
    #[must_use]
    pub fn from_download_param(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self::View
        } else {
            Self::Download(trimmed.to_ascii_lowercase())
        }
    }

    #[must_use]
    pub fn is_download(&self) -> bool {
        matches!(self, Self::Download(_))
    }
}

/// Request-scoped collaborators a report writes through.
///
/// Owned by whoever handles the request; a report borrows them for a single
/// `display` call.
pub struct RenderContext<'a> {
    pub output: &'a dyn TemplateRenderer,
    pub page: &'a mut dyn ScriptRegistrar,
    pub body: &'a mut String,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        output: &'a dyn TemplateRenderer,
        page: &'a mut dyn ScriptRegistrar,
        body: &'a mut String,
    ) -> Self {
        Self { output, page, body }
    }
}

/// A report that can be shown for a SCORM activity.
#[async_trait]
pub trait ReportRenderer: Send + Sync {
    /// Short identifier of the report.
    fn name(&self) -> &'static str;

    /// Render the report for `target` into `ctx`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError` when data cannot be loaded or the output cannot
    /// be produced.
    async fn display(
        &self,
        target: &ActivityContext,
        mode: &OutputMode,
        ctx: &mut RenderContext<'_>,
    ) -> Result<(), ReportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_download_param_means_view() {
        assert_eq!(OutputMode::from_download_param(""), OutputMode::View);
        assert_eq!(OutputMode::from_download_param("  "), OutputMode::View);
    }

    #[test]
    fn download_param_is_normalised() {
        let mode = OutputMode::from_download_param(" CSV ");
        assert_eq!(mode, OutputMode::Download("csv".into()));
        assert!(mode.is_download());
    }
}
