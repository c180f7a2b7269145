//! Data Loader - reads data files into keyed data.

use std::path::Path;
use tracing::{debug, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{DataDecoder, Filesystem},
        services::path_resolver::PathResolver,
    },
    domain::{DataFormat, Diagnostic, DomainError, KeyedData, LoadedFileSet},
    error::QuireResult,
};

/// Every file that loaded, plus one diagnostic per file that did not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadOutcome {
    pub files: LoadedFileSet,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct DataLoader<'a> {
    filesystem: &'a dyn Filesystem,
    decoder: &'a dyn DataDecoder,
}

impl<'a> DataLoader<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, decoder: &'a dyn DataDecoder) -> Self {
        Self {
            filesystem,
            decoder,
        }
    }

    /// Load a single data file.
    ///
    /// The format comes from the extension and is checked before the file is
    /// read. A zero-byte file is an empty mapping.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load_file(&self, path: &Path) -> QuireResult<KeyedData> {
        let format = DataFormat::from_path(path).ok_or_else(|| {
            let identifier = path
                .extension()
                .map(|ext| ext.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            DomainError::UnsupportedDataFormat { identifier }
        })?;

        let bytes = self.filesystem.read(path)?;
        if bytes.is_empty() {
            debug!("Empty data file");
            return Ok(KeyedData::new());
        }

        let text = String::from_utf8(bytes).map_err(|e| ApplicationError::MalformedData {
            path: path.to_path_buf(),
            reason: format!("invalid UTF-8: {e}"),
        })?;

        let data = self
            .decoder
            .decode(format, &text)
            .map_err(|e| ApplicationError::MalformedData {
                path: path.to_path_buf(),
                reason: e.reason,
            })?;

        debug!(%format, keys = data.len(), "Data file loaded");
        Ok(data)
    }

    /// Resolve `inputs` and load every file found.
    ///
    /// Failures are excluded from the set and reported; the batch never
    /// aborts.
    #[instrument(skip_all, fields(inputs = inputs.len()))]
    pub fn load_many<P: AsRef<Path>>(&self, inputs: &[P]) -> LoadOutcome {
        let resolution = PathResolver::new(self.filesystem).resolve(inputs);
        let mut outcome = LoadOutcome {
            files: LoadedFileSet::new(),
            diagnostics: resolution.diagnostics,
        };

        for path in resolution.paths {
            match self.load_file(&path) {
                Ok(data) => {
                    let key = self.filesystem.absolute(&path).unwrap_or(path);
                    outcome.files.entry(key).or_insert(data);
                }
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "Skipping data file");
                    outcome.diagnostics.push(Diagnostic::at(&path, e.to_string()));
                }
            }
        }

        outcome
    }
}
