//! Compiled engines behind a template handle.

use std::fmt;

use quire_core::domain::TemplateDialect;

use super::actions::{self, ESCAPER, html_escape};
use super::mustache_set::MustacheSet;

/// The engine object for one template set.
pub(crate) enum Engine {
    /// Go-style templates. `escape` is set for the HTML dialect.
    Go { template: gtmpl::Template, escape: bool },
    Mustache(MustacheSet),
}

impl Engine {
    /// Compile the root template for `dialect`.
    pub(crate) fn compile(dialect: TemplateDialect, name: &str, text: &str) -> Result<Self, String> {
        match dialect {
            TemplateDialect::Text | TemplateDialect::Html => {
                let escape = dialect == TemplateDialect::Html;
                let mut template = gtmpl::Template::default();
                if escape {
                    template.add_func(ESCAPER, |args: &[gtmpl::Value]| {
                        let text: String = args.iter().map(ToString::to_string).collect();
                        Ok(gtmpl::Value::String(html_escape(&text).into_owned()))
                    });
                }
                template
                    .parse(go_source(name, text, escape)?)
                    .map_err(|e| e.to_string())?;
                Ok(Self::Go { template, escape })
            }
            TemplateDialect::Mustache => MustacheSet::new(text).map(Self::Mustache),
        }
    }

    /// Register a partial under `name`.
    pub(crate) fn add_partial(&mut self, name: &str, text: &str) -> Result<(), String> {
        match self {
            Self::Go { template, escape } => {
                let source = go_source(name, text, *escape)?;
                template.add_template(name, source).map_err(|e| e.to_string())
            }
            Self::Mustache(set) => set.add_partial(name, text),
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Go { .. } => "go-template",
            Self::Mustache(_) => "mustache",
        }
    }
}

/// Source text to hand to `gtmpl`, rejected up front if an action is left
/// open.
fn go_source(name: &str, text: &str, escape: bool) -> Result<String, String> {
    if escape {
        actions::escape_output(name, text).map(|source| source.into_owned())
    } else {
        actions::scan(name, text).map(|_| text.to_owned())
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Engine").field(&self.kind()).finish()
    }
}
