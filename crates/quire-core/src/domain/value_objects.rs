//! Domain value objects: DataFormat, TemplateDialect, SortOrder, DataKeyCollision.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! Each one knows its string representation and how to be recognised from a
//! file extension or a user-supplied key. Nothing here touches the filesystem.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Lowercased extension of `path` without the leading dot.
fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

// ── DataFormat ───────────────────────────────────────────────────────────────

/// A structured data grammar a data file can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    Json,
    Yaml,
    Toml,
}

impl DataFormat {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
        }
    }

    /// Recognise a format from an extension or format name.
    ///
    /// Case-insensitive; a leading dot is ignored. Returns `None` for anything
    /// unsupported.
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        let id = identifier.trim().trim_start_matches('.').to_ascii_lowercase();
        match id.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Recognise the format of a data file from its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        extension_of(path).and_then(|ext| Self::from_identifier(&ext))
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_identifier(s).ok_or_else(|| DomainError::UnsupportedDataFormat {
            identifier: s.to_string(),
        })
    }
}

// ── TemplateDialect ──────────────────────────────────────────────────────────

/// A template grammar. Every loaded template set has exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateDialect {
    /// Go-style text templates (`.tmpl`, `.gotmpl`).
    Text,
    /// Go-style templates with HTML escaping (`.hmpl`, `.gohmpl`).
    Html,
    /// Mustache templates (`.mst`, `.mustache`).
    Mustache,
}

impl TemplateDialect {
    pub const ALL: [Self; 3] = [Self::Text, Self::Html, Self::Mustache];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Html => "html",
            Self::Mustache => "mustache",
        }
    }

    pub const fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Text => &["tmpl", "gotmpl"],
            Self::Html => &["hmpl", "gohmpl"],
            Self::Mustache => &["mst", "mustache"],
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        let ext = extension.trim_start_matches('.').to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|dialect| dialect.extensions().contains(&ext.as_str()))
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        extension_of(path).and_then(|ext| Self::from_extension(&ext))
    }
}

impl fmt::Display for TemplateDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── SortOrder ────────────────────────────────────────────────────────────────

/// What files are compared by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortField {
    #[default]
    Filename,
    Modified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// A parsed sort key such as `filename` or `modified-desc`.
///
/// The default is filename ascending, which is also what an empty key means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOrder {
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub const fn is_descending(&self) -> bool {
        matches!(self.direction, SortDirection::Descending)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = match self.field {
            SortField::Filename => "filename",
            SortField::Modified => "modified",
        };
        match self.direction {
            SortDirection::Ascending => f.write_str(field),
            SortDirection::Descending => write!(f, "{field}-desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    /// The prefix picks the field and a `-desc` suffix reverses it. Any other
    /// suffix is ascending.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        if key.is_empty() {
            return Ok(Self::default());
        }

        let field = if key.starts_with("filename") {
            SortField::Filename
        } else if key.starts_with("modified") {
            SortField::Modified
        } else {
            return Err(DomainError::UnrecognizedSortKey {
                key: s.to_string(),
            });
        };

        let direction = if key.ends_with("-desc") {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };

        Ok(Self { field, direction })
    }
}

// ── DataKeyCollision ─────────────────────────────────────────────────────────

/// What to do when a global data file already defines the data key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataKeyCollision {
    /// Refuse to assemble the context.
    #[default]
    Error,
    /// Replace the global value with the data list and report it.
    Overwrite,
}

impl DataKeyCollision {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Overwrite => "overwrite",
        }
    }
}

impl fmt::Display for DataKeyCollision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataKeyCollision {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "overwrite" => Ok(Self::Overwrite),
            other => Err(DomainError::UnknownCollisionPolicy {
                value: other.to_string(),
            }),
        }
    }
}
