//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;

/// Errors emitted by a `TemplateRenderer`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TemplateError {
    #[error("unknown template: {0}")]
    UnknownTemplate(String),
    #[error("invalid context for template {template}: {message}")]
    InvalidContext { template: String, message: String },
}

/// Errors emitted while rendering a report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("script arguments could not be encoded: {0}")]
    Serialization(#[from] serde_json::Error),
}
