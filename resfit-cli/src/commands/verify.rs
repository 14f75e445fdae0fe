//! Implementation of the 'verify' subcommand.

use crate::cli::VerifyArgs;
use crate::commands::{require_tools, resolve_catalog};
use crate::error::CliResult;

use resfit_core::external::CrateFfprobeExecutor;
use resfit_core::processing::verify_outputs;
use resfit_core::terminal::{print_section, print_status, print_success, print_warning};
use resfit_core::utils::get_filename_safe;
use resfit_core::{CoreError, StandardCatalog};

use std::path::Path;

pub fn run_verify(args: VerifyArgs) -> CliResult<bool> {
    let catalog = resolve_catalog(&args.catalog)?;
    if !args.dir.is_dir() {
        return Err(CoreError::PathError(format!(
            "Directory '{}' does not exist",
            args.dir.display()
        )));
    }
    require_tools(&["ffprobe"])?;

    verify_dir(&args.dir, &catalog, &args.output_ext)
}

/// Verifies the outputs in `dir` and prints one line per file.
///
/// Returns `Ok(false)` if any output is non-standard or could not be probed.
pub fn verify_dir(dir: &Path, catalog: &StandardCatalog, output_ext: &str) -> CliResult<bool> {
    print_section("Verify");
    let entries = verify_outputs(&CrateFfprobeExecutor::new(), dir, catalog, output_ext)?;

    if entries.is_empty() {
        print_warning(&format!("No *_standardized.{output_ext} files in {}", dir.display()));
        return Ok(true);
    }

    let mut bad = 0;
    for entry in &entries {
        let name = get_filename_safe(&entry.path)?;
        let verdict = match (&entry.resolution, &entry.error) {
            (Some(resolution), _) if entry.standard => format!("{resolution} standard"),
            (Some(resolution), _) => format!("{resolution} non-standard"),
            (None, Some(e)) => format!("failed: {e}"),
            (None, None) => "failed".to_string(),
        };
        if !entry.standard {
            bad += 1;
        }
        print_status(&name, &verdict, false);
    }

    if bad == 0 {
        print_success(&format!("All {} output(s) are standard", entries.len()));
    } else {
        print_warning(&format!("{bad} of {} output(s) are not standard", entries.len()));
    }
    Ok(bad == 0)
}
