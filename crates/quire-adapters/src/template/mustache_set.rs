//! Mustache root plus named partials, rendered by the `mustache` crate.
//!
//! Partials are held as source and spliced in at `{{> name}}` before the
//! combined text is compiled, so nothing is read from disk at render time.
//! A partial that is unknown, or that would include itself again, renders
//! as nothing.

use std::collections::HashMap;

use serde_json::Value;

#[derive(Debug, Default)]
pub(crate) struct MustacheSet {
    root: String,
    partials: HashMap<String, String>,
}

impl MustacheSet {
    /// Check that `root` compiles and keep it.
    pub(crate) fn new(root: &str) -> Result<Self, String> {
        check(root)?;
        Ok(Self {
            root: root.to_owned(),
            partials: HashMap::new(),
        })
    }

    /// Check that `text` compiles on its own and register it as `name`.
    pub(crate) fn add_partial(&mut self, name: &str, text: &str) -> Result<(), String> {
        check(text)?;
        self.partials.insert(name.to_owned(), text.to_owned());
        Ok(())
    }

    pub(crate) fn render(&self, context: &Value) -> Result<String, String> {
        let source = expand(&self.root, &self.partials, &mut Vec::new());
        let template = mustache::compile_str(&source).map_err(|e| e.to_string())?;

        let mut out = Vec::new();
        template
            .render(&mut out, context)
            .map_err(|e| e.to_string())?;
        String::from_utf8(out).map_err(|e| e.to_string())
    }
}

fn check(text: &str) -> Result<(), String> {
    let source = expand(text, &HashMap::new(), &mut Vec::new());
    mustache::compile_str(&source)
        .map(drop)
        .map_err(|e| e.to_string())
}

/// Replace every `{{> name}}` tag in `text` with that partial's expansion.
fn expand(text: &str, partials: &HashMap<String, String>, stack: &mut Vec<String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find("{{>") {
        let Some(close) = rest[open..].find("}}") else {
            break;
        };
        out.push_str(&rest[..open]);

        let name = rest[open + 3..open + close].trim();
        match partials.get(name) {
            Some(partial) if !stack.iter().any(|seen| seen == name) => {
                stack.push(name.to_owned());
                out.push_str(&expand(partial, partials, stack));
                stack.pop();
            }
            _ => {}
        }
        rest = &rest[open + close + 2..];
    }

    out.push_str(rest);
    out
}
