//! `quire config`: inspect the effective configuration.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.emit(&format!("{value}\n"))?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.emit(&serialised)?;
        }

        ConfigCommands::Path => match &config.source {
            Some(path) => output.emit(&format!("{}\n", path.display()))?,
            None => output.print("No configuration file in use (pass one with --config)")?,
        },
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let list = |paths: &[std::path::PathBuf]| {
        paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(",")
    };

    match key {
        "root" => Ok(config
            .root
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()),
        "partials" => Ok(list(&config.partials)),
        "global_data" => Ok(list(&config.global_data)),
        "data" => Ok(list(&config.data)),
        "data_key" => Ok(config.data_key.clone()),
        "sort_data" => Ok(config.sort_data.clone()),
        "on_data_key_collision" => Ok(config.on_data_key_collision.clone()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        _ => Err(CliError::InvalidInput {
            message: format!("Unknown config key: '{key}'"),
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
