//! Context Service - main application orchestrator for the render context.
//!
//! This service coordinates the data side of a render:
//! 1. Load global data and per-file data
//! 2. Order the per-file data
//! 3. Assemble the super-data
//!
//! Template loading and execution live with the template engines in
//! `quire-adapters`; they share this service's filesystem.

use tracing::{debug, info, instrument};

use crate::{
    application::{
        options::RenderOptions,
        ports::{DataDecoder, Filesystem},
        services::{
            data_loader::DataLoader, file_ordering::FileOrdering, path_resolver::PathResolver,
        },
    },
    domain::{Diagnostic, KeyedData, SuperData, assemble},
    error::QuireResult,
};

/// The assembled context and every diagnostic collected on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextOutcome {
    pub super_data: SuperData,
    /// Global keys defined by more than one global data file.
    pub conflicts: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds render contexts from data files.
pub struct ContextService {
    filesystem: Box<dyn Filesystem>,
    decoder: Box<dyn DataDecoder>,
}

impl ContextService {
    /// Create a new context service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use quire_core::application::{ContextService, RenderOptions};
    ///
    /// let service = ContextService::new(
    ///     filesystem, // impl Filesystem
    ///     decoder,    // impl DataDecoder
    /// );
    /// let outcome = service.build(&RenderOptions::new().with_data("posts"))?;
    /// ```
    pub fn new(filesystem: Box<dyn Filesystem>, decoder: Box<dyn DataDecoder>) -> Self {
        Self {
            filesystem,
            decoder,
        }
    }

    pub fn filesystem(&self) -> &dyn Filesystem {
        self.filesystem.as_ref()
    }

    pub fn resolver(&self) -> PathResolver<'_> {
        PathResolver::new(self.filesystem.as_ref())
    }

    pub fn loader(&self) -> DataLoader<'_> {
        DataLoader::new(self.filesystem.as_ref(), self.decoder.as_ref())
    }

    pub fn ordering(&self) -> FileOrdering<'_> {
        FileOrdering::new(self.filesystem.as_ref())
    }

    /// Build the super-data for `options`.
    ///
    /// Unloadable files and repeated global keys become diagnostics. A failed
    /// stat during modified ordering or a data key collision under the
    /// `error` policy aborts.
    #[instrument(
        skip_all,
        fields(
            data_key = %options.data_key,
            sort = %options.sort_data,
            globals = options.global_data.len(),
            data = options.data.len()
        )
    )]
    pub fn build(&self, options: &RenderOptions) -> QuireResult<ContextOutcome> {
        let loader = self.loader();
        let mut diagnostics = Vec::new();

        // 1. Load
        let globals = loader.load_many(&options.global_data);
        diagnostics.extend(globals.diagnostics);

        let data = loader.load_many(&options.data);
        diagnostics.extend(data.diagnostics);
        let data_files = data.files.len();

        // 2. Order
        let ordered = self.ordering().order_loaded(data.files, &options.sort_data)?;
        diagnostics.extend(ordered.diagnostics);

        // 3. Assemble
        let globals: Vec<KeyedData> = globals.files.into_values().collect();
        let assembly = assemble(
            &options.data_key,
            ordered.items,
            &globals,
            options.on_data_key_collision,
        )?;

        diagnostics.extend(assembly.conflicts.iter().map(|key| {
            Diagnostic::new(format!(
                "global key '{key}' is defined more than once; keeping the first value"
            ))
        }));
        diagnostics.extend(assembly.diagnostics);

        for diagnostic in &diagnostics {
            debug!(%diagnostic, "Context diagnostic");
        }
        info!(
            globals = globals.len(),
            data = data_files,
            diagnostics = diagnostics.len(),
            "Context assembled"
        );

        Ok(ContextOutcome {
            super_data: assembly.super_data,
            conflicts: assembly.conflicts,
            diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{DecodeError, EntryKind, MockDataDecoder, MockFilesystem};
    use crate::domain::{DataKeyCollision, DomainError};
    use crate::error::QuireError;
    use serde_json::json;
    use std::path::Path;

    const FILES: &[(&str, &str)] = &[
        ("global.json", r#"{"site": "demo"}"#),
        ("other.json", r#"{"site": "other", "year": 2024}"#),
        ("taken.json", r#"{"items": "already here"}"#),
        ("posts/b.json", r#"{"title": "B"}"#),
        ("posts/a.json", r#"{"title": "A"}"#),
    ];

    fn service() -> ContextService {
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
                Ok("posts/a.json".into()),
                Ok("posts/b.json".into()),
            ]
        });
        fs.expect_absolute().returning(|p| Ok(p.to_path_buf()));
        fs.expect_read().returning(|p| {
            FILES
                .iter()
                .find(|(name, _)| Path::new(name) == p)
                .map(|(_, text)| text.as_bytes().to_vec())
                .ok_or_else(|| QuireError::Configuration {
                    message: "unexpected read".into(),
                })
        });

        let mut decoder = MockDataDecoder::new();
        decoder.expect_decode().returning(|_, text| {
            serde_json::from_str::<serde_json::Value>(text)
                .ok()
                .and_then(|v| v.as_object().cloned())
                .ok_or_else(|| DecodeError::new("not a mapping"))
        });

        ContextService::new(Box::new(fs), Box::new(decoder))
    }

    #[test]
    fn build_assembles_globals_and_ordered_data() {
        let options = RenderOptions::new()
            .with_global_data("global.json")
            .with_data("posts")
            .with_data_key("items")
            .with_sort("filename-asc");

        let outcome = service().build(&options).unwrap();

        assert_eq!(
            outcome.super_data.to_value(),
            json!({"site": "demo", "items": [{"title": "A"}, {"title": "B"}]})
        );
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn build_descending_reverses_list() {
        let options = RenderOptions::new()
            .with_data("posts")
            .with_sort("filename-desc");

        let outcome = service().build(&options).unwrap();

        assert_eq!(
            outcome.super_data.get("data"),
            Some(&json!([{"title": "B"}, {"title": "A"}]))
        );
    }

    #[test]
    fn build_reports_global_conflicts() {
        let options = RenderOptions::new()
            .with_global_data("global.json")
            .with_global_data("other.json");

        let outcome = service().build(&options).unwrap();

        assert_eq!(outcome.super_data.get("site"), Some(&json!("demo")));
        assert_eq!(outcome.super_data.get("year"), Some(&json!(2024)));
        assert_eq!(outcome.conflicts, vec!["site".to_string()]);
        assert_eq!(outcome.diagnostics.len(), 1);
    }

    #[test]
    fn build_data_key_collision_policies() {
        let options = RenderOptions::new()
            .with_global_data("taken.json")
            .with_data("posts")
            .with_data_key("items");

        let err = service().build(&options).unwrap_err();
        assert!(matches!(
            err,
            QuireError::Domain(DomainError::DataKeyCollision { .. })
        ));

        let outcome = service()
            .build(&options.with_collision(DataKeyCollision::Overwrite))
            .unwrap();
        assert_eq!(
            outcome.super_data.get("items"),
            Some(&json!([{"title": "A"}, {"title": "B"}]))
        );
        assert_eq!(outcome.diagnostics.len(), 1);
    }

    #[test]
    fn build_with_no_inputs_has_empty_list() {
        let outcome = service().build(&RenderOptions::new()).unwrap();
        assert_eq!(outcome.super_data.to_value(), json!({"data": []}));
    }
}
