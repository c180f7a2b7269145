//! Application layer errors.
//!
//! These errors represent failures while touching the outside world: reading
//! files, decoding data, compiling and running templates. Rule violations are
//! `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{DataFormat, TemplateDialect};
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed (missing file, permission, stat).
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A data file could not be decoded.
    #[error("Malformed data in {path}: {reason}")]
    MalformedData { path: PathBuf, reason: String },

    /// A file was expected but something else was found.
    #[error("{path} is not a file")]
    NotAFile { path: PathBuf },

    /// A template of the right dialect failed to compile.
    #[error("Failed to parse template {path}: {reason}")]
    TemplateParse { path: PathBuf, reason: String },

    /// A compiled template failed while rendering.
    #[error("Failed to execute {dialect} template '{name}': {reason}")]
    TemplateExecution {
        name: String,
        dialect: TemplateDialect,
        reason: String,
    },

    /// Data could not be written in the requested format.
    #[error("Cannot write data as {format}: {reason}")]
    EncodeFailed { format: DataFormat, reason: String },

    /// The template handle does not carry an engine for its dialect.
    #[error("unable to infer template type: {detail}")]
    UnknownDispatch { detail: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that the path exists and is readable".into(),
            ],
            Self::MalformedData { path, .. } => vec![
                format!("Fix the syntax in {}", path.display()),
                "The top level of a data file must be a mapping".into(),
            ],
            Self::NotAFile { path } => vec![
                format!("{} is a directory", path.display()),
                "Point --root at a single template file".into(),
            ],
            Self::TemplateParse { path, .. } => vec![
                format!("Check the template syntax in {}", path.display()),
                "Partials must use the same dialect as the root template".into(),
            ],
            Self::TemplateExecution { .. } => vec![
                "Check that the template only references keys present in the data".into(),
                "Run `quire data` to inspect the assembled context".into(),
            ],
            Self::EncodeFailed { format, .. } => match format {
                DataFormat::Toml => vec![
                    "TOML has no null; remove null values or pick another format".into(),
                    "Try --format json or --format yaml".into(),
                ],
                _ => vec!["Try --format json".into()],
            },
            Self::UnknownDispatch { .. } => vec![
                "This appears to be a bug in Quire".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } => ErrorCategory::NotFound,
            Self::MalformedData { .. }
            | Self::NotAFile { .. }
            | Self::TemplateParse { .. }
            | Self::TemplateExecution { .. }
            | Self::EncodeFailed { .. } => ErrorCategory::Validation,
            Self::UnknownDispatch { .. } => ErrorCategory::Internal,
        }
    }
}
