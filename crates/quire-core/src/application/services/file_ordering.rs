//! File Ordering - sorts path lists and loaded data by name or mtime.

use std::path::PathBuf;
use tracing::{debug, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{Diagnostic, KeyedData, LoadedFileSet, SortEntry, SortField, SortOrder, compare},
    error::QuireResult,
};

/// Items in their final order, plus a diagnostic when the key was not
/// understood.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ordered<T> {
    pub items: Vec<T>,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct FileOrdering<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> FileOrdering<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Order a list of paths.
    #[instrument(skip_all, fields(paths = paths.len(), key = %key))]
    pub fn order_paths(&self, paths: Vec<PathBuf>, key: &str) -> QuireResult<Ordered<PathBuf>> {
        let items = paths.into_iter().map(|p| (p.clone(), p)).collect();
        self.order(items, key)
    }

    /// Order loaded data files by their paths, dropping the paths.
    #[instrument(skip_all, fields(files = files.len(), key = %key))]
    pub fn order_loaded(
        &self,
        files: LoadedFileSet,
        key: &str,
    ) -> QuireResult<Ordered<KeyedData>> {
        self.order(files.into_iter().collect(), key)
    }

    /// An unrecognized key leaves items as found; a failed stat aborts.
    fn order<T>(&self, items: Vec<(PathBuf, T)>, key: &str) -> QuireResult<Ordered<T>> {
        let order = match key.parse::<SortOrder>() {
            Ok(order) => order,
            Err(e) => {
                debug!(key, "Unrecognized sort order, keeping discovery order");
                return Ok(Ordered {
                    items: items.into_iter().map(|(_, item)| item).collect(),
                    diagnostics: vec![Diagnostic::new(format!(
                        "{e}; keeping discovery order"
                    ))],
                });
            }
        };

        let mut keyed = Vec::with_capacity(items.len());
        for (path, item) in items {
            let modified = match order.field {
                SortField::Modified => Some(self.filesystem.modified(&path)?),
                SortField::Filename => None,
            };
            keyed.push((path, modified, item));
        }

        keyed.sort_by(|(path_a, mod_a, _), (path_b, mod_b, _)| {
            let a = SortEntry {
                path: path_a,
                modified: *mod_a,
            };
            let b = SortEntry {
                path: path_b,
                modified: *mod_b,
            };
            compare(&a, &b, order)
        });

        debug!(%order, count = keyed.len(), "Files ordered");

        Ok(Ordered {
            items: keyed.into_iter().map(|(_, _, item)| item).collect(),
            diagnostics: Vec::new(),
        })
    }
}
