// ============================================================================
// domain/error.rs - DOMAIN RULE VIOLATIONS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside batch outcomes)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("unsupported data format '{identifier}'")]
    UnsupportedDataFormat { identifier: String },

    #[error("unsupported template dialect '{identifier}'")]
    UnsupportedDialect { identifier: String },

    #[error("unrecognized sort order '{key}'")]
    UnrecognizedSortKey { key: String },

    #[error("unknown data key collision policy '{value}'")]
    UnknownCollisionPolicy { value: String },

    #[error("no root template given")]
    MissingRoot,

    // ========================================================================
    // Conflicts
    // ========================================================================
    #[error("data key '{key}' is already defined by global data")]
    DataKeyCollision { key: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnsupportedDataFormat { identifier } => vec![
                format!("'{}' is not a known data format", identifier),
                "Data files must end in .json, .yaml, .yml or .toml".into(),
            ],
            Self::UnsupportedDialect { identifier } => vec![
                format!("'{}' is not a known template dialect", identifier),
                "Text templates: .tmpl, .gotmpl".into(),
                "HTML templates: .hmpl, .gohmpl".into(),
                "Mustache templates: .mst, .mustache".into(),
            ],
            Self::UnrecognizedSortKey { .. } => vec![
                "Valid orders: filename, filename-desc, modified, modified-desc".into(),
            ],
            Self::UnknownCollisionPolicy { .. } => {
                vec!["Valid policies: error, overwrite".into()]
            }
            Self::MissingRoot => vec![
                "Pass the template to render with --root".into(),
                "Or set `root` in the config file".into(),
            ],
            Self::DataKeyCollision { key } => vec![
                format!("A global data file already defines '{}'", key),
                "Choose another key with --data-key".into(),
                "Or allow replacing it with --on-collision overwrite".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedDataFormat { .. }
            | Self::UnsupportedDialect { .. }
            | Self::UnrecognizedSortKey { .. }
            | Self::UnknownCollisionPolicy { .. }
            | Self::MissingRoot => ErrorCategory::Validation,
            Self::DataKeyCollision { .. } => ErrorCategory::Conflict,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
    Internal,
}
