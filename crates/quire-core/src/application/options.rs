//! Options for one render invocation.

use std::path::PathBuf;

use crate::domain::{DEFAULT_DATA_KEY, DataKeyCollision};

/// Everything a render needs to know, passed explicitly through the pipeline.
///
/// Built by the CLI from flags and configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Root template to render.
    pub root: Option<PathBuf>,
    /// Partial files, directories or globs.
    pub partials: Vec<PathBuf>,
    /// Data merged into the top level of the context.
    pub global_data: Vec<PathBuf>,
    /// Data collected into an ordered list under `data_key`.
    pub data: Vec<PathBuf>,
    pub data_key: String,
    /// Raw sort key, e.g. `filename` or `modified-desc`.
    pub sort_data: String,
    pub on_data_key_collision: DataKeyCollision,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            root: None,
            partials: Vec::new(),
            global_data: Vec::new(),
            data: Vec::new(),
            data_key: DEFAULT_DATA_KEY.to_string(),
            sort_data: "filename".to_string(),
            on_data_key_collision: DataKeyCollision::default(),
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_partial(mut self, partial: impl Into<PathBuf>) -> Self {
        self.partials.push(partial.into());
        self
    }

    pub fn with_global_data(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_data.push(path.into());
        self
    }

    pub fn with_data(mut self, path: impl Into<PathBuf>) -> Self {
        self.data.push(path.into());
        self
    }

    pub fn with_data_key(mut self, key: impl Into<String>) -> Self {
        self.data_key = key.into();
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort_data = sort.into();
        self
    }

    pub fn with_collision(mut self, policy: DataKeyCollision) -> Self {
        self.on_data_key_collision = policy;
        self
    }
}
