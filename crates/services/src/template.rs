use serde_json::Value;

use crate::error::TemplateError;

/// Renders a named template against a JSON context into an HTML fragment.
pub trait TemplateRenderer: Send + Sync {
    /// # Errors
    ///
    /// Returns `TemplateError::UnknownTemplate` for names the renderer does not
    /// serve, or `TemplateError::InvalidContext` if the context does not fit
    /// the template.
    fn render_from_template(&self, name: &str, context: &Value) -> Result<String, TemplateError>;
}
