//! The data model flowing from loaded files to the render context.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};

/// The decoded top-level mapping of one data file.
///
/// Whatever grammar the file was written in, values are normalised into the
/// JSON value model.
pub type KeyedData = Map<String, Value>;

/// Decoded data files keyed by absolute path, in discovery order.
pub type LoadedFileSet = IndexMap<PathBuf, KeyedData>;

/// Default key the ordered data list is stored under.
pub const DEFAULT_DATA_KEY: &str = "data";

// ── SuperData ────────────────────────────────────────────────────────────────

/// The assembled render context: merged globals plus the ordered data list
/// under the data key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SuperData(KeyedData);

impl SuperData {
    pub fn new(map: KeyedData) -> Self {
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &KeyedData {
        &self.0
    }

    pub fn into_map(self) -> KeyedData {
        self.0
    }

    /// The context as a JSON value, ready for a template engine.
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<KeyedData> for SuperData {
    fn from(map: KeyedData) -> Self {
        Self(map)
    }
}

// ── Diagnostic ───────────────────────────────────────────────────────────────

/// A non-fatal finding from a batch operation.
///
/// Batch operations return these instead of printing; the caller decides how
/// to surface them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: Option<PathBuf>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            path: None,
            message: message.into(),
        }
    }

    pub fn at(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}: {}", path.display(), self.message),
            None => f.write_str(&self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn super_data_serializes_transparently() {
        let mut map = KeyedData::new();
        map.insert("site".into(), json!("demo"));
        let data = SuperData::new(map);

        assert_eq!(serde_json::to_value(&data).unwrap(), json!({"site": "demo"}));
        assert_eq!(data.to_value(), json!({"site": "demo"}));
    }

    #[test]
    fn diagnostic_display_includes_path() {
        let d = Diagnostic::at("posts/a.yaml", "bad indentation");
        assert_eq!(d.to_string(), "posts/a.yaml: bad indentation");
        assert_eq!(Diagnostic::new("plain").to_string(), "plain");
    }
}
