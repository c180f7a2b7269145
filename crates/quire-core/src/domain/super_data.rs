//! Assembly of the render context from global data and the ordered data list.

use serde_json::Value;

use crate::domain::{
    data::{DEFAULT_DATA_KEY, Diagnostic, KeyedData, SuperData},
    error::DomainError,
    merge::merge,
    value_objects::DataKeyCollision,
};

/// The assembled context plus what was noticed while building it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assembly {
    pub super_data: SuperData,
    /// Global keys defined by more than one global file.
    pub conflicts: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Merge `globals` (first wins) and store `ordered` under `data_key`.
///
/// An empty key means [`DEFAULT_DATA_KEY`]. The data key is always present in
/// the result, even when `ordered` is empty.
pub fn assemble(
    data_key: &str,
    ordered: Vec<KeyedData>,
    globals: &[KeyedData],
    policy: DataKeyCollision,
) -> Result<Assembly, DomainError> {
    let key = if data_key.is_empty() {
        DEFAULT_DATA_KEY
    } else {
        data_key
    };

    let outcome = merge(globals);
    let mut context = outcome.merged;
    let mut diagnostics = Vec::new();

    if context.contains_key(key) {
        match policy {
            DataKeyCollision::Error => {
                return Err(DomainError::DataKeyCollision {
                    key: key.to_string(),
                });
            }
            DataKeyCollision::Overwrite => diagnostics.push(Diagnostic::new(format!(
                "global value for '{key}' replaced by the data list"
            ))),
        }
    }

    let list = ordered.into_iter().map(Value::Object).collect();
    context.insert(key.to_string(), Value::Array(list));

    Ok(Assembly {
        super_data: SuperData::new(context),
        conflicts: outcome.conflicts,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keyed(value: Value) -> KeyedData {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn assemble_places_list_under_key() {
        let globals = vec![keyed(json!({"site": "demo"}))];
        let ordered = vec![keyed(json!({"title": "A"})), keyed(json!({"title": "B"}))];

        let assembly = assemble("items", ordered, &globals, DataKeyCollision::Error).unwrap();

        assert_eq!(
            assembly.super_data.to_value(),
            json!({"site": "demo", "items": [{"title": "A"}, {"title": "B"}]})
        );
        assert!(assembly.conflicts.is_empty());
        assert!(assembly.diagnostics.is_empty());
    }

    #[test]
    fn assemble_empty_key_defaults_to_data() {
        let assembly = assemble("", Vec::new(), &[], DataKeyCollision::Error).unwrap();
        assert_eq!(assembly.super_data.get("data"), Some(&json!([])));
    }

    #[test]
    fn assemble_reports_global_conflicts() {
        let globals = vec![keyed(json!({"site": "one"})), keyed(json!({"site": "two"}))];

        let assembly = assemble("data", Vec::new(), &globals, DataKeyCollision::Error).unwrap();

        assert_eq!(assembly.super_data.get("site"), Some(&json!("one")));
        assert_eq!(assembly.conflicts, vec!["site".to_string()]);
    }

    #[test]
    fn assemble_collision_errors_by_default() {
        let globals = vec![keyed(json!({"data": "taken"}))];

        let err = assemble("data", Vec::new(), &globals, DataKeyCollision::default()).unwrap_err();

        assert_eq!(err, DomainError::DataKeyCollision { key: "data".into() });
    }

    #[test]
    fn assemble_collision_overwrite_replaces_and_reports() {
        let globals = vec![keyed(json!({"data": "taken"}))];
        let ordered = vec![keyed(json!({"n": 1}))];

        let assembly = assemble("data", ordered, &globals, DataKeyCollision::Overwrite).unwrap();

        assert_eq!(assembly.super_data.get("data"), Some(&json!([{"n": 1}])));
        assert_eq!(assembly.diagnostics.len(), 1);
    }
}
