//! Data decoder adapter backed by serde_json, serde_yaml and toml.
//!
//! Every grammar is normalised into the JSON value model so templates see the
//! same shapes regardless of where the data came from:
//!
//! - TOML datetimes become strings
//! - YAML tags are dropped; only the tagged value is kept
//! - YAML scalar mapping keys are stringified (`1: a` becomes `"1": "a"`)
//! - a YAML document that is empty or `null` is an empty mapping

use serde_json::{Map, Number, Value};
use tracing::trace;

use quire_core::{
    application::ports::{DataDecoder, DecodeError},
    domain::{DataFormat, KeyedData},
};

/// Decodes JSON, YAML and TOML documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeDecoder;

impl SerdeDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl DataDecoder for SerdeDecoder {
    fn decode(&self, format: DataFormat, text: &str) -> Result<KeyedData, DecodeError> {
        trace!(%format, bytes = text.len(), "Decoding document");
        match format {
            DataFormat::Json => decode_json(text),
            DataFormat::Yaml => decode_yaml(text),
            DataFormat::Toml => decode_toml(text),
        }
    }
}

fn top_level_mapping(value: Value) -> Result<KeyedData, DecodeError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(DecodeError::new(format!(
            "top level must be a mapping, found {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

// ── JSON ─────────────────────────────────────────────────────────────────────

fn decode_json(text: &str) -> Result<KeyedData, DecodeError> {
    let value: Value = serde_json::from_str(text).map_err(|e| DecodeError::new(e.to_string()))?;
    top_level_mapping(value)
}

// ── YAML ─────────────────────────────────────────────────────────────────────

fn decode_yaml(text: &str) -> Result<KeyedData, DecodeError> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| DecodeError::new(e.to_string()))?;

    match yaml_to_json(value)? {
        Value::Null => Ok(KeyedData::new()),
        other => top_level_mapping(other),
    }
}

fn yaml_to_json(value: serde_yaml::Value) -> Result<Value, DecodeError> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => yaml_number(&n),
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(yaml_key(key)?, yaml_to_json(value)?);
            }
            Value::Object(map)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn yaml_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::from(i)
    } else if let Some(u) = n.as_u64() {
        Value::from(u)
    } else {
        let f = n.as_f64().unwrap_or(f64::NAN);
        Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(n.to_string()))
    }
}

fn yaml_key(key: serde_yaml::Value) -> Result<String, DecodeError> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Null => Ok("null".into()),
        Yaml::Tagged(tagged) => yaml_key(tagged.value),
        Yaml::Sequence(_) | Yaml::Mapping(_) => Err(DecodeError::new(
            "mapping keys must be scalars (strings, numbers or booleans)",
        )),
    }
}

// ── TOML ─────────────────────────────────────────────────────────────────────

fn decode_toml(text: &str) -> Result<KeyedData, DecodeError> {
    let table: toml::Table = toml::from_str(text).map_err(|e| DecodeError::new(e.to_string()))?;
    Ok(toml_table(table))
}

fn toml_table(table: toml::Table) -> KeyedData {
    table
        .into_iter()
        .map(|(key, value)| (key, toml_to_json(value)))
        .collect()
}

fn toml_to_json(value: toml::Value) -> Value {
    use toml::Value as Toml;

    match value {
        Toml::String(s) => Value::String(s),
        Toml::Integer(i) => Value::from(i),
        Toml::Float(f) => Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(f.to_string())),
        Toml::Boolean(b) => Value::Bool(b),
        Toml::Datetime(dt) => Value::String(dt.to_string()),
        Toml::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        Toml::Table(table) => Value::Object(toml_table(table)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(format: DataFormat, text: &str) -> Result<Value, DecodeError> {
        SerdeDecoder::new().decode(format, text).map(Value::Object)
    }

    const EXPECTED: &str = r#"{"title": "Hello", "tags": ["a", "b"], "count": 3, "nested": {"ok": true}}"#;

    #[test]
    fn all_formats_decode_to_the_same_value() {
        let expected: Value = serde_json::from_str(EXPECTED).unwrap();

        let yaml = "title: Hello\ntags: [a, b]\ncount: 3\nnested:\n  ok: true\n";
        let toml = "title = \"Hello\"\ntags = [\"a\", \"b\"]\ncount = 3\n[nested]\nok = true\n";

        assert_eq!(decode(DataFormat::Json, EXPECTED).unwrap(), expected);
        assert_eq!(decode(DataFormat::Yaml, yaml).unwrap(), expected);
        assert_eq!(decode(DataFormat::Toml, toml).unwrap(), expected);
    }

    #[test]
    fn json_top_level_must_be_mapping() {
        let err = decode(DataFormat::Json, "[1, 2, 3]").unwrap_err();
        assert!(err.reason.contains("found a list"), "{}", err.reason);
    }

    #[test]
    fn invalid_syntax_is_an_error() {
        assert!(decode(DataFormat::Json, "{\"a\": ").is_err());
        assert!(decode(DataFormat::Yaml, "a: [unclosed").is_err());
        assert!(decode(DataFormat::Toml, "a = ").is_err());
    }

    #[test]
    fn yaml_null_document_is_empty() {
        assert_eq!(decode(DataFormat::Yaml, "# only a comment\n").unwrap(), json!({}));
        assert_eq!(decode(DataFormat::Yaml, "~").unwrap(), json!({}));
    }

    #[test]
    fn yaml_scalar_document_is_rejected() {
        assert!(decode(DataFormat::Yaml, "just a string").is_err());
    }

    #[test]
    fn yaml_keys_are_stringified_and_tags_dropped() {
        let value = decode(DataFormat::Yaml, "1: one\ntrue: yes\nwho: !person Ada\n").unwrap();
        assert_eq!(value, json!({"1": "one", "true": "yes", "who": "Ada"}));
    }

    #[test]
    fn toml_datetime_becomes_string() {
        let value = decode(DataFormat::Toml, "published = 2024-03-01T10:00:00Z\n").unwrap();
        assert_eq!(value, json!({"published": "2024-03-01T10:00:00Z"}));
    }

    #[test]
    fn toml_and_yaml_floats_keep_numbers() {
        assert_eq!(
            decode(DataFormat::Toml, "ratio = 0.5").unwrap(),
            json!({"ratio": 0.5})
        );
        assert_eq!(
            decode(DataFormat::Yaml, "ratio: 0.5").unwrap(),
            json!({"ratio": 0.5})
        );
    }
}
