//! Template execution, dispatched on the handle's dialect tag.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, instrument};

use quire_core::{
    application::ApplicationError,
    domain::TemplateDialect,
    error::QuireResult,
};

use super::{Engine, TemplateHandle};

/// Render `handle` against `context` and return the text.
///
/// Writing the result anywhere is the caller's job.
#[instrument(skip_all, fields(template = %handle.name, dialect = %handle.dialect))]
pub fn execute(handle: &TemplateHandle, context: &Value) -> QuireResult<String> {
    let rendered = match (handle.dialect, &handle.engine) {
        (
            TemplateDialect::Text | TemplateDialect::Html,
            Engine::Go { template, escape },
        ) if *escape == (handle.dialect == TemplateDialect::Html) => {
            let context = gtmpl::Context::from(to_gtmpl(context));
            template.render(&context).map_err(|e| e.to_string())
        }
        (TemplateDialect::Mustache, Engine::Mustache(set)) => set.render(context),
        (dialect, engine) => {
            return Err(ApplicationError::UnknownDispatch {
                detail: format!("{dialect} template '{}' holds a {} engine", handle.name, engine.kind()),
            }
            .into());
        }
    };

    let output = rendered.map_err(|reason| ApplicationError::TemplateExecution {
        name: handle.name.clone(),
        dialect: handle.dialect,
        reason,
    })?;

    debug!(bytes = output.len(), "Template executed");
    Ok(output)
}

fn to_gtmpl(value: &Value) -> gtmpl::Value {
    match value {
        Value::Null => gtmpl::Value::Nil,
        Value::Bool(b) => gtmpl::Value::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                gtmpl::Value::from(i)
            } else if let Some(u) = n.as_u64() {
                gtmpl::Value::from(u)
            } else {
                gtmpl::Value::from(n.as_f64().unwrap_or_default())
            }
        }
        Value::String(s) => gtmpl::Value::String(s.clone()),
        Value::Array(items) => gtmpl::Value::Array(items.iter().map(to_gtmpl).collect()),
        Value::Object(map) => gtmpl::Value::Map(
            map.iter()
                .map(|(k, v)| (k.clone(), to_gtmpl(v)))
                .collect::<HashMap<_, _>>(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_core::error::QuireError;

    use crate::template::mustache_set::MustacheSet;
    use serde_json::json;

    fn handle(dialect: TemplateDialect, text: &str) -> TemplateHandle {
        TemplateHandle {
            name: "root".into(),
            dialect,
            partials: Vec::new(),
            engine: Engine::compile(dialect, "root", text).unwrap(),
        }
    }

    #[test]
    fn text_dialect_renders_ranges() {
        let h = handle(
            TemplateDialect::Text,
            "{{.site}}: {{range .items}}{{.title}} {{end}}",
        );
        let context = json!({"site": "demo", "items": [{"title": "A"}, {"title": "B"}]});

        assert_eq!(execute(&h, &context).unwrap(), "demo: A B ");
    }

    #[test]
    fn text_dialect_does_not_escape() {
        let h = handle(TemplateDialect::Text, "{{.body}}");
        let out = execute(&h, &json!({"body": "<b>&</b>"})).unwrap();
        assert_eq!(out, "<b>&</b>");
    }

    #[test]
    fn html_dialect_escapes_printed_values() {
        let h = handle(TemplateDialect::Html, "<p>{{.body}}</p>");
        let out = execute(&h, &json!({"body": "<script>x</script>"})).unwrap();
        assert_eq!(out, "<p>&lt;script&gt;x&lt;/script&gt;</p>");
    }

    #[test]
    fn html_dialect_logic_sees_raw_values() {
        let h = handle(
            TemplateDialect::Html,
            "{{if eq .x \"a&b\"}}same{{else}}diff{{end}} {{len .x}}",
        );
        assert_eq!(execute(&h, &json!({"x": "a&b"})).unwrap(), "same 3");
    }

    #[test]
    fn html_dialect_escapes_partial_output() {
        let mut h = handle(TemplateDialect::Html, "{{template \"b.hmpl\" .}}");
        h.engine.add_partial("b.hmpl", "<b>{{.x}}</b>").unwrap();
        assert_eq!(execute(&h, &json!({"x": "<i>"})).unwrap(), "<b>&lt;i&gt;</b>");
    }

    #[test]
    fn mustache_dialect_renders_with_escaping() {
        let h = handle(TemplateDialect::Mustache, "{{site}} / {{{raw}}} / {{safe}}");
        let out = execute(&h, &json!({"site": "demo", "raw": "<i>", "safe": "<i>"})).unwrap();
        assert_eq!(out, "demo / <i> / &lt;i&gt;");
    }

    #[test]
    fn mustache_dialect_renders_sections() {
        let h = handle(
            TemplateDialect::Mustache,
            "{{#items}}{{title}},{{/items}}{{^empty}}none{{/empty}}",
        );
        let context = json!({"items": [{"title": "A"}, {"title": "B"}], "empty": []});
        assert_eq!(execute(&h, &context).unwrap(), "A,B,none");
    }

    #[test]
    fn numbers_and_booleans_reach_go_templates() {
        let h = handle(TemplateDialect::Text, "{{.n}} {{if .ok}}yes{{end}}");
        assert_eq!(execute(&h, &json!({"n": 3, "ok": true})).unwrap(), "3 yes");
    }

    #[test]
    fn execution_error_names_template_and_dialect() {
        let h = handle(TemplateDialect::Text, "{{template \"missing.tmpl\" .}}");
        let err = execute(&h, &json!({})).unwrap_err();

        assert!(matches!(
            err,
            QuireError::Application(ApplicationError::TemplateExecution {
                ref name,
                dialect: TemplateDialect::Text,
                ..
            }) if name == "root"
        ));
    }

    #[test]
    fn mismatched_engine_is_unknown_dispatch() {
        let h = TemplateHandle {
            name: "root".into(),
            dialect: TemplateDialect::Text,
            partials: Vec::new(),
            engine: Engine::Mustache(MustacheSet::new("{{x}}").unwrap()),
        };

        let err = execute(&h, &json!({})).unwrap_err();

        assert!(err.to_string().contains("unable to infer template type"));
    }
}
