//! `quire data`: write the assembled super-data as JSON, YAML or TOML.

use tracing::{info, instrument};

use quire_adapters::SerdeEncoder;
use quire_core::{
    application::{ApplicationError, DataEncoder},
    domain::DataFormat,
    error::QuireError,
};

use crate::{
    cli::DataArgs,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(format = ?args.format))]
pub fn execute(args: DataArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let options = config.render_options(None, &[], &args.data)?;

    let context = super::context_service().build(&options)?;
    output.diagnostics(&context.diagnostics)?;

    let format = DataFormat::from(args.format);
    let encoder = SerdeEncoder::new().compact(args.compact);
    let text = encoder
        .encode(format, context.super_data.as_map())
        .map_err(|e| {
            QuireError::from(ApplicationError::EncodeFailed {
                format,
                reason: e.reason,
            })
        })?;

    match &args.output {
        Some(path) => {
            output.write_file(path, &text)?;
            info!(path = %path.display(), bytes = text.len(), "Data written");
            output.success(&format!("Wrote {format} data to {}", path.display()))?;
        }
        None => output.emit(&text)?,
    }
    Ok(())
}
