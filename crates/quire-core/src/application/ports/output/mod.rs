//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `quire-adapters` crate provides implementations.

use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

use crate::domain::{DataFormat, KeyedData};
use crate::error::QuireResult;

/// What a path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Sockets, devices and the like.
    Other,
}

/// Port for read-only filesystem access.
///
/// Implemented by:
/// - `quire_adapters::filesystem::LocalFilesystem` (production)
/// - `quire_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - Nothing here writes; rendering output is the caller's job
/// - Walks and globs report per-entry failures so callers can skip them
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Stat a path. A missing path is an error.
    fn entry_kind(&self, path: &Path) -> QuireResult<EntryKind>;

    /// Read a whole file.
    fn read(&self, path: &Path) -> QuireResult<Vec<u8>>;

    /// Last modification time of a file.
    fn modified(&self, path: &Path) -> QuireResult<SystemTime>;

    /// Regular files below `dir` at any depth, in file-name order.
    fn walk_files(&self, dir: &Path) -> Vec<QuireResult<PathBuf>>;

    /// Expand a glob pattern. The outer error is a bad pattern; inner errors
    /// are unreadable entries.
    fn glob(&self, pattern: &str) -> QuireResult<Vec<QuireResult<PathBuf>>>;

    /// Make a path absolute without touching the filesystem.
    fn absolute(&self, path: &Path) -> QuireResult<PathBuf>;
}

/// Why a data document could not be decoded.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{reason}")]
pub struct DecodeError {
    pub reason: String,
}

impl DecodeError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Port for structured data grammars.
///
/// Implemented by:
/// - `quire_adapters::decoder::SerdeDecoder` (JSON, YAML, TOML)
#[cfg_attr(test, mockall::automock)]
pub trait DataDecoder: Send + Sync {
    /// Decode one document into its top-level mapping.
    ///
    /// `text` is never empty; callers handle empty files themselves.
    fn decode(&self, format: DataFormat, text: &str) -> Result<KeyedData, DecodeError>;
}

/// Why data could not be written in a format.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{reason}")]
pub struct EncodeError {
    pub reason: String,
}

impl EncodeError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Port for writing data back out as a document.
///
/// Implemented by:
/// - `quire_adapters::encoder::SerdeEncoder` (JSON, YAML, TOML)
#[cfg_attr(test, mockall::automock)]
pub trait DataEncoder: Send + Sync {
    /// Encode `data` as one `format` document.
    fn encode(&self, format: DataFormat, data: &KeyedData) -> Result<String, EncodeError>;
}
