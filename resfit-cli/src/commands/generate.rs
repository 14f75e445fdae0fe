//! Implementation of the 'generate' subcommand.

use crate::cli::GenerateArgs;
use crate::commands::require_tools;
use crate::error::CliResult;

use resfit_core::CoreError;
use resfit_core::external::SidecarSpawner;
use resfit_core::processing::{default_variants, generate_variants};
use resfit_core::terminal::{print_section, print_status, print_success, print_warning};

use log::debug;

pub fn run_generate(args: &GenerateArgs) -> CliResult<bool> {
    if !args.source.is_file() {
        return Err(CoreError::PathError(format!(
            "Source video '{}' does not exist",
            args.source.display()
        )));
    }
    require_tools(&["ffmpeg"])?;

    let variants = if args.variants.is_empty() {
        default_variants()
    } else {
        args.variants.clone()
    };
    debug!("Generating variants: {:?}", variants);

    print_section("Generate");
    print_status("Source", &args.source.display().to_string(), false);
    print_status("Output", &args.output_dir.display().to_string(), false);
    print_status("Variants", &variants.len().to_string(), false);

    let reports = generate_variants(
        &SidecarSpawner,
        &args.source,
        &args.output_dir,
        &variants,
        args.clean,
    )?;

    let mut failed = 0;
    for report in &reports {
        match &report.error {
            None => print_success(&format!("Created {}", report.output.display())),
            Some(e) => {
                failed += 1;
                print_warning(&format!("Failed to create {}: {}", report.resolution, e));
            }
        }
    }

    Ok(failed == 0)
}
