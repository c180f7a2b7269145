//! Template loader: one root template plus same-dialect partials.
//!
//! Partial arguments go through the same path resolution as data inputs, so
//! directories and globs work. Partials of another dialect, unreadable files
//! and duplicate names are skipped and reported rather than failing the load.
//! A partial of the right dialect that does not parse is a hard error.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use quire_core::{
    application::{
        ApplicationError, PathResolver,
        ports::{EntryKind, Filesystem},
    },
    domain::{Diagnostic, DomainError, TemplateDialect, partial_name},
    error::QuireResult,
};

use super::{Engine, LoadedTemplate, TemplateHandle};

/// Root name for templates built from source without one.
const SOURCE_NAME: &str = "template";

pub struct TemplateLoader<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> TemplateLoader<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Load `root` and every partial of its dialect found in `partials`.
    ///
    /// # Errors
    ///
    /// - [`DomainError::MissingRoot`] if `root` is empty.
    /// - [`ApplicationError::FilesystemError`] if `root` cannot be read.
    /// - [`ApplicationError::NotAFile`] if `root` is a directory.
    /// - [`DomainError::UnsupportedDialect`] for an unknown root extension.
    /// - [`ApplicationError::TemplateParse`] if the root, or a partial of the
    ///   same dialect, does not parse.
    #[instrument(skip_all, fields(root = %root.display(), partials = partials.len()))]
    pub fn load<P: AsRef<Path>>(&self, root: &Path, partials: &[P]) -> QuireResult<LoadedTemplate> {
        if root.as_os_str().is_empty() {
            return Err(DomainError::MissingRoot.into());
        }

        match self.filesystem.entry_kind(root)? {
            EntryKind::File => {}
            EntryKind::Directory | EntryKind::Other => {
                return Err(ApplicationError::NotAFile {
                    path: root.to_path_buf(),
                }
                .into());
            }
        }

        let dialect = TemplateDialect::from_path(root).ok_or_else(|| {
            DomainError::UnsupportedDialect {
                identifier: root
                    .extension()
                    .map(|ext| ext.to_string_lossy().into_owned())
                    .unwrap_or_else(|| root.display().to_string()),
            }
        })?;

        let name = partial_name(root, dialect).ok_or_else(|| ApplicationError::NotAFile {
            path: root.to_path_buf(),
        })?;

        let bytes = self.filesystem.read(root)?;
        let text = String::from_utf8(bytes).map_err(|e| ApplicationError::TemplateParse {
            path: root.to_path_buf(),
            reason: format!("invalid UTF-8: {e}"),
        })?;
        let mut engine =
            Engine::compile(dialect, &name, &text).map_err(|reason| ApplicationError::TemplateParse {
                path: root.to_path_buf(),
                reason,
            })?;
        debug!(%dialect, name = %name, "Root template parsed");

        let resolution = PathResolver::new(self.filesystem).resolve(partials);
        let mut diagnostics = resolution.diagnostics;
        let root_abs = self.filesystem.absolute(root).ok();

        let mut names = HashSet::from([name.clone()]);
        let mut loaded = Vec::new();

        for path in resolution.paths {
            if root_abs.is_some() && self.filesystem.absolute(&path).ok() == root_abs {
                continue;
            }

            let Some(partial_dialect) = TemplateDialect::from_path(&path) else {
                diagnostics.push(Diagnostic::at(&path, "not a template file, skipped"));
                continue;
            };
            if partial_dialect != dialect {
                diagnostics.push(Diagnostic::at(
                    &path,
                    format!("{partial_dialect} partial does not match {dialect} root, skipped"),
                ));
                continue;
            }

            let Some(partial) = partial_name(&path, dialect) else {
                continue;
            };
            if names.contains(&partial) {
                diagnostics.push(Diagnostic::at(
                    &path,
                    format!("partial name '{partial}' already loaded, skipped"),
                ));
                continue;
            }

            let text = match self.read_text(&path) {
                Ok(text) => text,
                Err(reason) => {
                    debug!(path = %path.display(), %reason, "Skipping unreadable partial");
                    diagnostics.push(Diagnostic::at(&path, format!("{reason}, skipped")));
                    continue;
                }
            };

            engine
                .add_partial(&partial, &text)
                .map_err(|reason| ApplicationError::TemplateParse {
                    path: path.clone(),
                    reason,
                })?;
            debug!(partial = %partial, "Partial registered");

            names.insert(partial.clone());
            loaded.push(partial);
        }

        Ok(LoadedTemplate {
            handle: TemplateHandle {
                name,
                dialect,
                partials: loaded,
                engine,
            },
            diagnostics,
        })
    }

    /// Build a template set from in-memory sources.
    ///
    /// `partials` pairs a reference name with its text; names are used as
    /// given, so the dialect's naming rule does not apply. An empty `name`
    /// becomes `"template"`. Every partial must parse; a repeated name keeps
    /// the first text and is reported.
    #[instrument(skip_all, fields(%dialect, name))]
    pub fn from_source<I, K, V>(
        dialect: TemplateDialect,
        name: &str,
        root: &str,
        partials: I,
    ) -> QuireResult<LoadedTemplate>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let name = if name.is_empty() { SOURCE_NAME } else { name };
        let mut engine = Engine::compile(dialect, name, root).map_err(|reason| {
            ApplicationError::TemplateParse {
                path: PathBuf::from(name),
                reason,
            }
        })?;

        let mut names = HashSet::from([name.to_owned()]);
        let mut loaded = Vec::new();
        let mut diagnostics = Vec::new();

        for (partial, text) in partials {
            let partial = partial.as_ref();
            if !names.insert(partial.to_owned()) {
                diagnostics.push(Diagnostic::new(format!(
                    "partial name '{partial}' already loaded, skipped"
                )));
                continue;
            }
            engine
                .add_partial(partial, text.as_ref())
                .map_err(|reason| ApplicationError::TemplateParse {
                    path: PathBuf::from(partial),
                    reason,
                })?;
            loaded.push(partial.to_owned());
        }
        debug!(partials = loaded.len(), "Template set built from source");

        Ok(LoadedTemplate {
            handle: TemplateHandle {
                name: name.to_owned(),
                dialect,
                partials: loaded,
                engine,
            },
            diagnostics,
        })
    }

    fn read_text(&self, path: &Path) -> Result<String, String> {
        let bytes = self.filesystem.read(path).map_err(|e| e.to_string())?;
        String::from_utf8(bytes).map_err(|e| format!("invalid UTF-8: {e}"))
    }
}
