//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
    time::SystemTime,
};

use quire_core::{
    application::{
        ApplicationError,
        ports::{EntryKind, Filesystem},
    },
    error::{QuireError, QuireResult},
};

/// In-memory filesystem for testing.
///
/// Clones share the same tree. Relative paths are resolved against `/`.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, MemoryFile>,
    directories: BTreeSet<PathBuf>,
}

#[derive(Debug, Clone)]
struct MemoryFile {
    content: Vec<u8>,
    modified: SystemTime,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Add a file with the current time as its mtime, creating parents.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) -> QuireResult<()> {
        self.add_file_modified(path, content, SystemTime::now())
    }

    /// Add a file with an explicit mtime, creating parents.
    pub fn add_file_modified(
        &self,
        path: impl AsRef<Path>,
        content: impl AsRef<[u8]>,
        modified: SystemTime,
    ) -> QuireResult<()> {
        let path = rooted(path.as_ref());
        let mut inner = self.write()?;

        if let Some(parent) = path.parent() {
            for ancestor in parent.ancestors() {
                inner.directories.insert(ancestor.to_path_buf());
            }
        }
        inner.files.insert(
            path,
            MemoryFile {
                content: content.as_ref().to_vec(),
                modified,
            },
        );
        Ok(())
    }

    /// Create an empty directory and its parents.
    pub fn add_dir(&self, path: impl AsRef<Path>) -> QuireResult<()> {
        let path = rooted(path.as_ref());
        let mut inner = self.write()?;
        for ancestor in path.ancestors() {
            inner.directories.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    /// List all files.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read_lock()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read_lock(&self) -> QuireResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| lock_error())
    }

    fn write(&self) -> QuireResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| lock_error())
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn entry_kind(&self, path: &Path) -> QuireResult<EntryKind> {
        let path = rooted(path);
        let inner = self.read_lock()?;

        if inner.files.contains_key(&path) {
            Ok(EntryKind::File)
        } else if inner.directories.contains(&path) {
            Ok(EntryKind::Directory)
        } else {
            Err(not_found(&path))
        }
    }

    fn read(&self, path: &Path) -> QuireResult<Vec<u8>> {
        let path = rooted(path);
        let inner = self.read_lock()?;
        inner
            .files
            .get(&path)
            .map(|file| file.content.clone())
            .ok_or_else(|| not_found(&path))
    }

    fn modified(&self, path: &Path) -> QuireResult<SystemTime> {
        let path = rooted(path);
        let inner = self.read_lock()?;
        inner
            .files
            .get(&path)
            .map(|file| file.modified)
            .ok_or_else(|| not_found(&path))
    }

    fn walk_files(&self, dir: &Path) -> Vec<QuireResult<PathBuf>> {
        let dir = rooted(dir);
        match self.read_lock() {
            // BTreeMap order over paths is component-wise, which matches a
            // depth-first walk with siblings sorted by name.
            Ok(inner) => inner
                .files
                .keys()
                .filter(|path| path.starts_with(&dir) && **path != dir)
                .cloned()
                .map(Ok)
                .collect(),
            Err(e) => vec![Err(e)],
        }
    }

    fn glob(&self, pattern: &str) -> QuireResult<Vec<QuireResult<PathBuf>>> {
        let pattern = rooted(Path::new(pattern));
        let text = pattern.to_string_lossy();
        let matcher = glob::Pattern::new(&text).map_err(|e| QuireError::Configuration {
            message: format!("invalid glob pattern '{text}': {e}"),
        })?;

        let options = glob::MatchOptions {
            require_literal_separator: true,
            ..glob::MatchOptions::new()
        };

        let inner = self.read_lock()?;
        let files = inner.files.keys();
        let dirs = inner.directories.iter();
        let mut matches: Vec<PathBuf> = files
            .chain(dirs)
            .filter(|path| matcher.matches_path_with(path, options))
            .cloned()
            .collect();
        matches.sort();

        Ok(matches.into_iter().map(Ok).collect())
    }

    fn absolute(&self, path: &Path) -> QuireResult<PathBuf> {
        Ok(rooted(path))
    }
}

fn rooted(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        Path::new("/").join(path)
    }
}

fn not_found(path: &Path) -> QuireError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "No such file or directory".into(),
    }
    .into()
}

fn lock_error() -> QuireError {
    QuireError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}
