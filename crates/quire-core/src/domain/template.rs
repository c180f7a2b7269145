//! Naming rules for templates.

use std::path::Path;

use crate::domain::value_objects::TemplateDialect;

/// The name a partial is referenced by from the root template.
///
/// Go-style dialects use the full file name (`{{ template "nav.tmpl" . }}`);
/// Mustache uses the stem (`{{> nav}}`).
pub fn partial_name(path: &Path, dialect: TemplateDialect) -> Option<String> {
    let name = match dialect {
        TemplateDialect::Text | TemplateDialect::Html => path.file_name(),
        TemplateDialect::Mustache => path.file_stem(),
    }?;
    Some(name.to_string_lossy().into_owned())
}
