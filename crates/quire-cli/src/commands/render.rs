//! Implementation of the `quire render` command.
//!
//! Assembles the super-data, loads the root template with its partials and
//! writes the executed result to stdout or `--output`.

use tracing::{debug, info, instrument};

use quire_adapters::{TemplateLoader, execute as execute_template};
use quire_core::{domain::DomainError, error::QuireError};

use crate::{
    cli::RenderArgs,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `quire render` command.
///
/// Dispatch sequence:
/// 1. Merge CLI flags with configuration into `RenderOptions`
/// 2. Build the super-data from global and per-file data
/// 3. Load the root template and same-dialect partials
/// 4. Execute and write the result
///
/// Diagnostics from steps 2 and 3 are printed as warnings; they never stop
/// the render.
#[instrument(skip_all)]
pub fn execute(args: RenderArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let options = config.render_options(args.root.as_deref(), &args.partials, &args.data)?;
    let Some(root) = options.root.as_deref() else {
        return Err(QuireError::from(DomainError::MissingRoot).into());
    };

    let service = super::context_service();
    let context = service.build(&options)?;
    output.diagnostics(&context.diagnostics)?;

    let loaded = TemplateLoader::new(service.filesystem()).load(root, &options.partials)?;
    output.diagnostics(&loaded.diagnostics)?;
    debug!(
        template = loaded.handle.name(),
        dialect = %loaded.handle.dialect(),
        partials = loaded.handle.partials().len(),
        "Template set ready"
    );

    let rendered = execute_template(&loaded.handle, &context.super_data.to_value())?;

    match &args.output {
        Some(path) => {
            output.write_file(path, &rendered)?;
            info!(path = %path.display(), bytes = rendered.len(), "Output written");
            output.success(&format!(
                "Rendered {} to {}",
                loaded.handle.name(),
                path.display()
            ))?;
        }
        None => output.emit(&rendered)?,
    }

    Ok(())
}
