//! Template loading and execution across dialects.
//!
//! A [`TemplateHandle`] carries one compiled template set (root plus
//! partials) and a dialect tag. Execution dispatches on that tag, so callers
//! never need to know which engine is behind a handle:
//!
//! | Dialect  | Extensions           | Engine                          |
//! |----------|----------------------|---------------------------------|
//! | Text     | `.tmpl`, `.gotmpl`   | `gtmpl`                         |
//! | Html     | `.hmpl`, `.gohmpl`   | `gtmpl`, printed values escaped |
//! | Mustache | `.mst`, `.mustache`  | `mustache`                      |

mod actions;
mod engine;
mod executor;
mod loader;
mod mustache_set;

use quire_core::domain::{Diagnostic, TemplateDialect};

pub(crate) use engine::Engine;
pub use executor::execute;
pub use loader::TemplateLoader;

/// A compiled template set of exactly one dialect.
#[derive(Debug)]
pub struct TemplateHandle {
    pub(crate) name: String,
    pub(crate) dialect: TemplateDialect,
    pub(crate) partials: Vec<String>,
    pub(crate) engine: Engine,
}

impl TemplateHandle {
    /// File name of the root template.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dialect(&self) -> TemplateDialect {
        self.dialect
    }

    /// Names partials can be referenced by, in load order.
    pub fn partials(&self) -> &[String] {
        &self.partials
    }

    pub fn has_partial(&self, name: &str) -> bool {
        self.partials.iter().any(|p| p == name)
    }
}

/// A handle plus the partials that were skipped while building it.
#[derive(Debug)]
pub struct LoadedTemplate {
    pub handle: TemplateHandle,
    pub diagnostics: Vec<Diagnostic>,
}
