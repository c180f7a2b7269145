//! Local filesystem adapter using std::fs, walkdir and glob.

use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use walkdir::WalkDir;

use quire_core::{
    application::{
        ApplicationError,
        ports::{EntryKind, Filesystem},
    },
    error::{QuireError, QuireResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn entry_kind(&self, path: &Path) -> QuireResult<EntryKind> {
        let metadata = std::fs::metadata(path).map_err(|e| map_io_error(path, e, "stat"))?;
        Ok(if metadata.is_dir() {
            EntryKind::Directory
        } else if metadata.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        })
    }

    fn read(&self, path: &Path) -> QuireResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn modified(&self, path: &Path) -> QuireResult<SystemTime> {
        std::fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(|e| map_io_error(path, e, "read modification time"))
    }

    fn walk_files(&self, dir: &Path) -> Vec<QuireResult<PathBuf>> {
        WalkDir::new(dir)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.into_path())),
                Ok(_) => None,
                Err(e) => {
                    let path = e.path().unwrap_or(dir).to_path_buf();
                    Some(Err(QuireError::from(ApplicationError::FilesystemError {
                        path,
                        reason: format!("directory walk error: {e}"),
                    })))
                }
            })
            .collect()
    }

    fn glob(&self, pattern: &str) -> QuireResult<Vec<QuireResult<PathBuf>>> {
        let paths = glob::glob(pattern).map_err(|e| QuireError::Configuration {
            message: format!("invalid glob pattern '{pattern}': {e}"),
        })?;

        Ok(paths
            .map(|entry| {
                entry.map_err(|e| {
                    QuireError::from(ApplicationError::FilesystemError {
                        path: e.path().to_path_buf(),
                        reason: format!("unreadable glob match: {}", e.error()),
                    })
                })
            })
            .collect())
    }

    fn absolute(&self, path: &Path) -> QuireResult<PathBuf> {
        std::path::absolute(path).map_err(|e| map_io_error(path, e, "make path absolute"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> QuireError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
