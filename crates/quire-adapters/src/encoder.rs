//! Data encoder adapter: writes a mapping back out as JSON, YAML or TOML.

use tracing::trace;

use quire_core::{
    application::ports::{DataEncoder, EncodeError},
    domain::{DataFormat, KeyedData},
};

/// Encodes mappings with serde_json, serde_yaml and toml.
///
/// Output always ends in a newline. JSON is pretty-printed unless
/// [`SerdeEncoder::compact`] is set; the other grammars have one layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeEncoder {
    compact: bool,
}

impl SerdeEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print JSON on a single line.
    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }
}

impl DataEncoder for SerdeEncoder {
    fn encode(&self, format: DataFormat, data: &KeyedData) -> Result<String, EncodeError> {
        trace!(%format, keys = data.len(), compact = self.compact, "Encoding document");
        let mut text = match format {
            DataFormat::Json if self.compact => serde_json::to_string(data).map_err(reason)?,
            DataFormat::Json => serde_json::to_string_pretty(data).map_err(reason)?,
            DataFormat::Yaml => serde_yaml::to_string(data).map_err(reason)?,
            DataFormat::Toml => toml::to_string_pretty(data).map_err(reason)?,
        };

        if !text.ends_with('\n') {
            text.push('\n');
        }
        Ok(text)
    }
}

fn reason(err: impl std::fmt::Display) -> EncodeError {
    EncodeError::new(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SerdeDecoder;
    use quire_core::application::ports::DataDecoder;
    use serde_json::json;

    fn map(value: serde_json::Value) -> KeyedData {
        match value {
            serde_json::Value::Object(map) => map,
            _ => unreachable!("test data is a mapping"),
        }
    }

    #[test]
    fn json_is_pretty_unless_compact() {
        let data = map(json!({"a": 1}));

        let pretty = SerdeEncoder::new().encode(DataFormat::Json, &data).unwrap();
        assert_eq!(pretty, "{\n  \"a\": 1\n}\n");

        let compact = SerdeEncoder::new()
            .compact(true)
            .encode(DataFormat::Json, &data)
            .unwrap();
        assert_eq!(compact, "{\"a\":1}\n");
    }

    #[test]
    fn written_documents_read_back_unchanged() {
        let data = map(json!({
            "site": "demo",
            "tags": ["a", "b"],
            "items": [{"title": "A", "n": 1}, {"title": "B", "n": 2}],
        }));

        for format in [DataFormat::Json, DataFormat::Yaml, DataFormat::Toml] {
            let text = SerdeEncoder::new().encode(format, &data).unwrap();
            let back = SerdeDecoder::new().decode(format, &text).unwrap();
            assert_eq!(back, data, "{format}:\n{text}");
        }
    }

    #[test]
    fn yaml_layout() {
        let data = map(json!({"title": "Hello"}));
        let text = SerdeEncoder::new().encode(DataFormat::Yaml, &data).unwrap();
        assert_eq!(text, "title: Hello\n");
    }

    #[test]
    fn toml_cannot_hold_null() {
        let data = map(json!({"missing": null}));
        assert!(SerdeEncoder::new().encode(DataFormat::Toml, &data).is_err());
    }
}
