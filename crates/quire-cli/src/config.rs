//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the
//! [`RenderOptions`] built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (merged in [`AppConfig::render_options`])
//! 2. `QUIRE_*` environment variables, e.g. `QUIRE_DATA_KEY=posts`,
//!    `QUIRE_DATA=a.yaml,b.yaml`, `QUIRE_OUTPUT__NO_COLOR=true`
//! 3. Config file passed with `--config` (TOML, YAML or JSON by extension)
//! 4. Built-in defaults (always present)
//!
//! List values do not replace each other across the CLI boundary: CLI
//! entries come first, followed by the configured ones.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use quire_core::{
    application::RenderOptions,
    domain::{DEFAULT_DATA_KEY, DataKeyCollision},
    error::QuireResult,
};

use crate::cli::DataFlags;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root template used when `--root` is not given.
    pub root: Option<PathBuf>,
    pub partials: Vec<PathBuf>,
    pub global_data: Vec<PathBuf>,
    pub data: Vec<PathBuf>,
    pub data_key: String,
    pub sort_data: String,
    /// `error` or `overwrite`.
    pub on_data_key_collision: String,
    /// Output settings.
    pub output: OutputConfig,

    /// File this configuration was read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root: None,
            partials: Vec::new(),
            global_data: Vec::new(),
            data: Vec::new(),
            data_key: DEFAULT_DATA_KEY.into(),
            sort_data: "filename".into(),
            on_data_key_collision: DataKeyCollision::default().as_str().into(),
            output: OutputConfig::default(),
            source: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the optional file and the
    /// environment.
    ///
    /// Relative paths in the file are resolved against the file's directory;
    /// paths from the environment are left as given.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut file_layer = Self::default();

        if let Some(path) = config_file {
            file_layer = Config::builder()
                .add_source(File::from(path.as_path()).required(true))
                .build()
                .and_then(|c| c.try_deserialize::<Self>())
                .with_context(|| format!("failed to read config file {}", path.display()))?;

            if let Some(base) = path.parent() {
                file_layer.rebase(base);
            }
            debug!(path = %path.display(), "Configuration file loaded");
        }

        let mut config: Self = Config::builder()
            .add_source(Config::try_from(&file_layer)?)
            .add_source(
                Environment::with_prefix("QUIRE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("partials")
                    .with_list_parse_key("global_data")
                    .with_list_parse_key("data"),
            )
            .build()
            .and_then(|c| c.try_deserialize::<Self>())
            .context("failed to merge environment configuration")?;

        config.collision_policy()?;
        config.source = config_file.cloned();
        Ok(config)
    }

    /// The configured data-key collision policy.
    pub fn collision_policy(&self) -> QuireResult<DataKeyCollision> {
        Ok(self.on_data_key_collision.parse()?)
    }

    /// Combine CLI flags with this configuration into one render request.
    ///
    /// Scalars from the CLI win; list flags are CLI entries followed by the
    /// configured entries.
    pub fn render_options(
        &self,
        root: Option<&Path>,
        partials: &[PathBuf],
        flags: &DataFlags,
    ) -> QuireResult<RenderOptions> {
        let on_data_key_collision = match flags.on_collision {
            Some(policy) => policy.into(),
            None => self.collision_policy()?,
        };

        Ok(RenderOptions {
            root: root.map(Path::to_path_buf).or_else(|| self.root.clone()),
            partials: chain(partials, &self.partials),
            global_data: chain(&flags.global_data, &self.global_data),
            data: chain(&flags.data, &self.data),
            data_key: flags
                .data_key
                .clone()
                .unwrap_or_else(|| self.data_key.clone()),
            sort_data: flags
                .sort_data
                .clone()
                .unwrap_or_else(|| self.sort_data.clone()),
            on_data_key_collision,
        })
    }

    fn rebase(&mut self, base: &Path) {
        let join = |p: &PathBuf| {
            if p.is_relative() {
                base.join(p)
            } else {
                p.clone()
            }
        };

        self.root = self.root.as_ref().map(join);
        for list in [&mut self.partials, &mut self.global_data, &mut self.data] {
            *list = list.iter().map(join).collect();
        }
    }
}

fn chain(first: &[PathBuf], then: &[PathBuf]) -> Vec<PathBuf> {
    first.iter().chain(then).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CollisionPolicy;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, text: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.data_key, "data");
        assert_eq!(cfg.sort_data, "filename");
        assert_eq!(cfg.collision_policy().unwrap(), DataKeyCollision::Error);
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn toml_file_is_read_and_paths_rebased() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "quire.toml",
            r#"
root = "templates/page.tmpl"
data = ["posts", "/abs/extra.yaml"]
data_key = "posts"
sort_data = "modified-desc"

[output]
no_color = true
"#,
        );

        let cfg = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(cfg.root, Some(dir.path().join("templates/page.tmpl")));
        assert_eq!(
            cfg.data,
            vec![dir.path().join("posts"), PathBuf::from("/abs/extra.yaml")]
        );
        assert_eq!(cfg.data_key, "posts");
        assert_eq!(cfg.sort_data, "modified-desc");
        assert!(cfg.output.no_color);
        assert_eq!(cfg.source, Some(path));
    }

    #[test]
    fn yaml_file_keeps_unset_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "quire.yaml", "on_data_key_collision: overwrite\n");

        let cfg = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(cfg.collision_policy().unwrap(), DataKeyCollision::Overwrite);
        assert_eq!(cfg.data_key, "data");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn bad_collision_policy_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "quire.json", r#"{"on_data_key_collision": "merge"}"#);
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn cli_scalars_win_and_lists_chain() {
        let cfg = AppConfig {
            root: Some(PathBuf::from("cfg.tmpl")),
            partials: vec![PathBuf::from("cfg-partials")],
            data: vec![PathBuf::from("cfg.yaml")],
            data_key: "posts".into(),
            ..AppConfig::default()
        };
        let flags = DataFlags {
            data: vec![PathBuf::from("cli.yaml")],
            sort_data: Some("filename-desc".into()),
            on_collision: Some(CollisionPolicy::Overwrite),
            ..DataFlags::default()
        };

        let options = cfg
            .render_options(Some(Path::new("cli.tmpl")), &[PathBuf::from("p")], &flags)
            .unwrap();

        assert_eq!(options.root, Some(PathBuf::from("cli.tmpl")));
        assert_eq!(
            options.partials,
            vec![PathBuf::from("p"), PathBuf::from("cfg-partials")]
        );
        assert_eq!(
            options.data,
            vec![PathBuf::from("cli.yaml"), PathBuf::from("cfg.yaml")]
        );
        assert_eq!(options.data_key, "posts");
        assert_eq!(options.sort_data, "filename-desc");
        assert_eq!(options.on_data_key_collision, DataKeyCollision::Overwrite);
    }

    #[test]
    fn config_root_used_when_cli_has_none() {
        let cfg = AppConfig {
            root: Some(PathBuf::from("cfg.tmpl")),
            ..AppConfig::default()
        };
        let options = cfg.render_options(None, &[], &DataFlags::default()).unwrap();
        assert_eq!(options.root, Some(PathBuf::from("cfg.tmpl")));
        assert_eq!(options.on_data_key_collision, DataKeyCollision::Error);
    }
}
