//! Output management and formatting.
//!
//! Rendered documents and `data` JSON go to stdout untouched. Everything
//! else (warnings, status lines) goes to stderr so it never mixes with a
//! document being piped somewhere.

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

use console::Term;
use owo_colors::OwoColorize;

use quire_core::domain::Diagnostic;

use crate::cli::global::GlobalArgs;
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// Manages CLI output based on configuration.
pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    status: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        Self {
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color || !io::stderr().is_terminal(),
            status: Term::stderr(),
        }
    }

    // ── Document output ────────────────────────────────────────────────────

    /// Write `text` to stdout exactly as given. Never suppressed.
    pub fn emit(&self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()
    }

    /// Write a document to `path` instead of stdout.
    pub fn write_file(&self, path: &Path, text: &str) -> CliResult<()> {
        fs::write(path, text).map_err(|source| CliError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    // ── Status output ──────────────────────────────────────────────────────

    /// Generic line; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.status.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.status.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.status.write_line(&line)
    }

    /// Report a non-fatal diagnostic as a warning.
    pub fn diagnostic(&self, diagnostic: &Diagnostic) -> io::Result<()> {
        self.warning(&diagnostic.to_string())
    }

    /// Report every diagnostic in order.
    pub fn diagnostics<'a>(
        &self,
        diagnostics: impl IntoIterator<Item = &'a Diagnostic>,
    ) -> io::Result<()> {
        for diagnostic in diagnostics {
            self.diagnostic(diagnostic)?;
        }
        Ok(())
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.status.write_line(&line)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::AppConfig;

    fn make_manager(quiet: bool, no_color: bool) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn quiet_suppresses_status_lines() {
        let out = make_manager(true, true);
        assert!(out.print("hello").is_ok());
        assert!(out.warning("careful").is_ok());
    }

    #[test]
    fn diagnostics_are_written_as_warnings() {
        let out = make_manager(false, true);
        let diagnostics = [
            Diagnostic::at("a.yaml", "bad indentation"),
            Diagnostic::new("no files matched"),
        ];
        assert!(out.diagnostics(&diagnostics).is_ok());
    }

    #[test]
    fn no_color_flag_reported() {
        assert!(!make_manager(false, true).supports_color());
    }

    #[test]
    fn config_can_disable_color() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
        };
        let config = AppConfig {
            output: crate::config::OutputConfig { no_color: true },
            ..AppConfig::default()
        };
        assert!(!OutputManager::new(&args, &config).supports_color());
    }
}
