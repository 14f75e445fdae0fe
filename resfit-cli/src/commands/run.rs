//! Implementation of the 'run' subcommand: the whole generate, normalize,
//! verify sequence against one output directory.

use crate::cli::RunArgs;
use crate::commands::generate::run_generate;
use crate::commands::normalize::normalize_files;
use crate::commands::verify::verify_dir;
use crate::commands::{require_tools, resolve_catalog};
use crate::error::CliResult;

use resfit_core::config::DEFAULT_OUTPUT_EXTENSION;
use resfit_core::discovery::find_processable_files;
use resfit_core::naming::InputNamePattern;
use resfit_core::{CoreConfigBuilder, CoreError, SelectionPolicy};

use log::warn;

pub fn run_all(args: RunArgs) -> CliResult<bool> {
    let catalog = resolve_catalog(&args.catalog)?;
    if !args.generate.source.is_file() {
        return Err(CoreError::PathError(format!(
            "Source video '{}' does not exist",
            args.generate.source.display()
        )));
    }
    require_tools(&["ffmpeg", "ffprobe"])?;

    let generated = run_generate(&args.generate)?;
    if !generated {
        warn!("Some variants failed to generate; normalizing the ones that exist");
    }

    let config = CoreConfigBuilder::new()
        .input_dir(args.generate.output_dir.clone())
        .catalog(catalog)
        .policy(SelectionPolicy::from(args.policy))
        .jobs(usize::from(args.jobs))
        .build()?;
    config.validate()?;

    let pattern = InputNamePattern::new(&config.input_extension)?;
    let files = find_processable_files(&config.input_dir, &pattern)?;
    let normalized = normalize_files(&config, &files)?;

    let verified = verify_dir(&config.output_dir, &config.catalog, DEFAULT_OUTPUT_EXTENSION)?;

    Ok(generated && normalized && verified)
}
