//! Path Resolver - turns user inputs into a flat list of files.
//!
//! Inputs may be plain paths, directories (walked recursively) or glob
//! patterns. Failures while expanding are reported as diagnostics so one bad
//! pattern never stops the batch.

use indexmap::IndexSet;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use crate::{
    application::ports::{EntryKind, Filesystem},
    domain::Diagnostic,
};

/// Resolved paths plus anything that went wrong expanding them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Deduplicated, first occurrence first.
    pub paths: Vec<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Expands globs and directory trees.
pub struct PathResolver<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> PathResolver<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Whether an input is treated as a glob pattern.
    pub fn is_glob(input: &str) -> bool {
        input.contains(['*', '?', '['])
    }

    /// Resolve inputs in order.
    ///
    /// Plain paths that are not directories pass through unchanged, whether
    /// or not they exist.
    #[instrument(skip_all, fields(inputs = inputs.len()))]
    pub fn resolve<P: AsRef<Path>>(&self, inputs: &[P]) -> Resolution {
        let mut paths = IndexSet::new();
        let mut diagnostics = Vec::new();

        for input in inputs {
            let input = input.as_ref();
            let text = input.to_string_lossy();

            if Self::is_glob(&text) {
                self.expand_glob(input, &text, &mut paths, &mut diagnostics);
            } else {
                self.expand(input.to_path_buf(), &mut paths, &mut diagnostics);
            }
        }

        debug!(
            resolved = paths.len(),
            diagnostics = diagnostics.len(),
            "Inputs resolved"
        );

        Resolution {
            paths: paths.into_iter().collect(),
            diagnostics,
        }
    }

    fn expand_glob(
        &self,
        input: &Path,
        pattern: &str,
        paths: &mut IndexSet<PathBuf>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        match self.filesystem.glob(pattern) {
            Ok(matches) => {
                for entry in matches {
                    match entry {
                        Ok(path) => self.expand(path, paths, diagnostics),
                        Err(e) => diagnostics.push(Diagnostic::at(input, e.to_string())),
                    }
                }
            }
            Err(e) => diagnostics.push(Diagnostic::at(input, format!("invalid glob: {e}"))),
        }
    }

    fn expand(
        &self,
        path: PathBuf,
        paths: &mut IndexSet<PathBuf>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        if !matches!(self.filesystem.entry_kind(&path), Ok(EntryKind::Directory)) {
            paths.insert(path);
            return;
        }

        for entry in self.filesystem.walk_files(&path) {
            match entry {
                Ok(file) => {
                    paths.insert(file);
                }
                Err(e) => diagnostics.push(Diagnostic::at(&path, e.to_string())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ApplicationError, ports::MockFilesystem};
    use crate::error::QuireError;

    fn missing(path: &Path) -> QuireError {
        ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: "not found".into(),
        }
        .into()
    }

    #[test]
    fn plain_paths_pass_through_and_dedupe() {
        let mut fs = MockFilesystem::new();
        fs.expect_entry_kind().returning(|p| {
            if p == Path::new("a.json") {
                Ok(EntryKind::File)
            } else {
                Err(missing(p))
            }
        });

        let resolver = PathResolver::new(&fs);
        let res = resolver.resolve(&["a.json", "ghost.json", "a.json"]);

        assert_eq!(
            res.paths,
            vec![PathBuf::from("a.json"), PathBuf::from("ghost.json")]
        );
        assert!(res.diagnostics.is_empty());
    }

    #[test]
    fn directories_are_walked() {
        let mut fs = MockFilesystem::new();
        fs.expect_entry_kind().returning(|p| {
            if p == Path::new("posts") {
                Ok(EntryKind::Directory)
            } else {
                Ok(EntryKind::File)
            }
        });
        fs.expect_walk_files().returning(|_| {
            vec![
                Ok(PathBuf::from("posts/a.yaml")),
                Ok(PathBuf::from("posts/nested/b.yaml")),
            ]
        });

        let res = PathResolver::new(&fs).resolve(&["posts"]);

        assert_eq!(
            res.paths,
            vec![
                PathBuf::from("posts/a.yaml"),
                PathBuf::from("posts/nested/b.yaml")
            ]
        );
    }

    #[test]
    fn glob_failures_become_diagnostics() {
        let mut fs = MockFilesystem::new();
        fs.expect_entry_kind().returning(|_| Ok(EntryKind::File));
        fs.expect_glob().returning(|pattern| {
            if pattern == "[" {
                Err(QuireError::Configuration {
                    message: "unclosed character class".into(),
                })
            } else {
                Ok(vec![
                    Ok(PathBuf::from("x.json")),
                    Err(missing(Path::new("locked"))),
                ])
            }
        });

        let res = PathResolver::new(&fs).resolve(&["[", "*.json", "y.json"]);

        assert_eq!(
            res.paths,
            vec![PathBuf::from("x.json"), PathBuf::from("y.json")]
        );
        assert_eq!(res.diagnostics.len(), 2);
        assert!(res.diagnostics[0].message.starts_with("invalid glob"));
    }

    #[test]
    fn glob_detection() {
        assert!(PathResolver::is_glob("posts/*.yaml"));
        assert!(PathResolver::is_glob("file?.json"));
        assert!(PathResolver::is_glob("[ab].toml"));
        assert!(!PathResolver::is_glob("posts/a.yaml"));
    }
}
