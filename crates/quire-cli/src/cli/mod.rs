//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use quire_core::domain::{DataFormat, DataKeyCollision};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "quire",
    bin_name = "quire",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Render JSON, YAML and TOML data through templates",
    long_about = "Quire loads structured data files, assembles them into a single \
                  context and renders a text, HTML or Mustache template against it.",
    after_help = "EXAMPLES:\n\
        \x20 quire render -r page.tmpl -g site.toml -d posts/ -k posts\n\
        \x20 quire render -r index.hmpl -p 'partials/*.hmpl' -o index.html\n\
        \x20 quire data -g site.toml -d posts/ -s modified-desc\n\
        \x20 quire completions bash > /usr/share/bash-completion/completions/quire",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a template against the assembled data.
    #[command(
        visible_alias = "r",
        about = "Render a template",
        after_help = "EXAMPLES:\n\
            \x20 quire render --root page.tmpl --global-data site.json\n\
            \x20 quire render -r list.mst -d 'posts/*.yaml' -k posts -s filename-desc\n\
            \x20 quire render -r index.hmpl -p partials/ -o public/index.html"
    )]
    Render(RenderArgs),

    /// Print the assembled super-data as JSON, YAML or TOML.
    #[command(
        about = "Print the assembled data",
        after_help = "EXAMPLES:\n\
            \x20 quire data -g site.toml\n\
            \x20 quire data -d posts/ -k posts -s modified\n\
            \x20 quire data -g site.toml -d posts/ -f yaml -o context.yaml"
    )]
    Data(DataArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 quire completions bash > ~/.local/share/bash-completion/completions/quire\n\
            \x20 quire completions zsh  > ~/.zfunc/_quire\n\
            \x20 quire completions fish > ~/.config/fish/completions/quire.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 quire config list\n\
            \x20 quire -c quire.toml config get data_key\n\
            \x20 quire config path"
    )]
    Config(ConfigCommands),
}

// ── data flags ────────────────────────────────────────────────────────────────

/// Flags that control how the render context is assembled.
///
/// Shared by `render` and `data`.
#[derive(Debug, Default, Args)]
pub struct DataFlags {
    /// Files merged into the top level of the context, first value wins.
    #[arg(
        short = 'g',
        long = "global-data",
        value_name = "PATH",
        help = "Global data file, directory or glob (repeatable)"
    )]
    pub global_data: Vec<PathBuf>,

    /// Files collected into an ordered list under the data key.
    #[arg(
        short = 'd',
        long = "data",
        value_name = "PATH",
        help = "Data file, directory or glob (repeatable)"
    )]
    pub data: Vec<PathBuf>,

    #[arg(
        short = 'k',
        long = "data-key",
        value_name = "NAME",
        help = "Context key for the data list [default: data]"
    )]
    pub data_key: Option<String>,

    /// `filename` or `modified`, optionally suffixed with `-desc`.
    #[arg(
        short = 's',
        long = "sort-data",
        value_name = "ORDER",
        help = "Data ordering: filename, modified, filename-desc, modified-desc"
    )]
    pub sort_data: Option<String>,

    #[arg(
        long = "on-collision",
        value_name = "POLICY",
        value_enum,
        help = "What to do when global data defines the data key [default: error]"
    )]
    pub on_collision: Option<CollisionPolicy>,
}

// ── render ────────────────────────────────────────────────────────────────────

/// Arguments for `quire render`.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Root template; its extension selects the dialect.
    #[arg(
        short = 'r',
        long = "root",
        value_name = "TEMPLATE",
        help = "Root template (.tmpl, .hmpl, .mst and variants)"
    )]
    pub root: Option<PathBuf>,

    #[arg(
        short = 'p',
        long = "partial",
        value_name = "PATH",
        help = "Partial template file, directory or glob (repeatable)"
    )]
    pub partials: Vec<PathBuf>,

    #[command(flatten)]
    pub data: DataFlags,

    /// Write the rendered text here instead of stdout.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Output file (default: stdout)"
    )]
    pub output: Option<PathBuf>,
}

// ── data ──────────────────────────────────────────────────────────────────────

/// Arguments for `quire data`.
#[derive(Debug, Args)]
pub struct DataArgs {
    #[command(flatten)]
    pub data: DataFlags,

    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value_t = OutputFormat::Json,
        help = "Format to write the data in"
    )]
    pub format: OutputFormat,

    /// Print compact JSON on one line.
    #[arg(long = "compact", help = "Print compact JSON (json format only)")]
    pub compact: bool,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Write to FILE instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `quire completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `quire config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Key name, e.g. `data_key` or `output.no_color`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Policy when global data already defines the data key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Fail the render.
    Error,
    /// Replace the global value with the data list.
    Overwrite,
}

impl From<CollisionPolicy> for DataKeyCollision {
    fn from(policy: CollisionPolicy) -> Self {
        match policy {
            CollisionPolicy::Error => Self::Error,
            CollisionPolicy::Overwrite => Self::Overwrite,
        }
    }
}

/// Grammar for `quire data` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Toml,
}

impl From<OutputFormat> for DataFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Self::Json,
            OutputFormat::Yaml => Self::Yaml,
            OutputFormat::Toml => Self::Toml,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
