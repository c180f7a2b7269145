//! CLI errors and how they reach the user.
//!
//! Every failure ends as one report on stderr and an exit code:
//!
//! | Code | Cause                                          |
//! |------|------------------------------------------------|
//! |  2   | Bad input, data, templates or a key collision  |
//! |  3   | A named file does not exist                    |
//! |  4   | Configuration                                  |
//! |  1   | Anything else                                  |

use std::error::Error;
use std::io;
use std::path::PathBuf;

use owo_colors::{OwoColorize, Style};
use thiserror::Error;

use quire_core::error::{ErrorCategory, QuireError};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// A value clap accepted but quire cannot use.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    /// Loading, assembling or rendering failed.
    #[error(transparent)]
    Core(#[from] QuireError),

    /// `--output` could not be written.
    #[error("Cannot write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// stdout or stderr went away.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => vec!["Use --help to see accepted values".into()],
            Self::ConfigError { .. } => {
                vec!["Run 'quire config list' to see the effective values".into()]
            }
            Self::Core(err) => err.suggestions(),
            Self::Write { .. } => vec!["Check that the target directory exists and is writable".into()],
            Self::Io(_) => Vec::new(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidInput { .. } => 2,
            Self::ConfigError { .. } => 4,
            Self::Core(err) => match err.category() {
                ErrorCategory::Validation | ErrorCategory::Conflict => 2,
                ErrorCategory::NotFound => 3,
                ErrorCategory::Configuration => 4,
                ErrorCategory::Internal => 1,
            },
            Self::Write { .. } | Self::Io(_) => 1,
        }
    }

    /// The text printed to stderr when a command fails.
    ///
    /// Causes are listed only when `verbose` is set.
    pub fn report(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, style: Style| {
            if color {
                text.style(style).to_string()
            } else {
                text.to_owned()
            }
        };

        let mut out = format!("{} {self}\n", paint("error:", Style::new().red().bold()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                out.push_str(&format!("  {} {err}\n", paint("caused by:", Style::new().dimmed())));
                source = err.source();
            }
        }

        for suggestion in self.suggestions() {
            out.push_str(&format!("  {} {suggestion}\n", paint("hint:", Style::new().yellow())));
        }
        out
    }
}
