//! Implementation of the 'normalize' subcommand.
//!
//! Builds a [`CoreConfig`] from the arguments, discovers the input files and
//! hands them to the core pipeline, then prints one block per file and a
//! summary.

use crate::cli::NormalizeArgs;
use crate::commands::{require_tools, resolve_catalog};
use crate::error::CliResult;

use resfit_core::discovery::{NamedVideo, find_processable_files};
use resfit_core::external::{CrateFfprobeExecutor, SidecarSpawner};
use resfit_core::naming::InputNamePattern;
use resfit_core::processing::{BatchSummary, FileReport, FileStatus, normalize_videos};
use resfit_core::terminal::{
    print_processing, print_section, print_status, print_success, print_warning,
};
use resfit_core::{CoreConfig, CoreConfigBuilder, SelectionPolicy, format_duration};

use std::time::Instant;

pub fn run_normalize(args: NormalizeArgs) -> CliResult<bool> {
    let catalog = resolve_catalog(&args.catalog)?;

    let mut builder = CoreConfigBuilder::new()
        .input_dir(args.input_dir)
        .catalog(catalog)
        .policy(SelectionPolicy::from(args.policy))
        .jobs(usize::from(args.jobs))
        .overwrite(!args.skip_existing)
        .input_extension(&args.input_ext)
        .output_extension(&args.output_ext);
    if let Some(output_dir) = args.output_dir {
        builder = builder.output_dir(output_dir);
    }
    let config = builder.build()?;
    config.validate()?;

    let pattern = InputNamePattern::new(&config.input_extension)?;
    let files = find_processable_files(&config.input_dir, &pattern)?;
    require_tools(&["ffmpeg", "ffprobe"])?;

    normalize_files(&config, &files)
}

/// Normalizes `files` with the real ffmpeg/ffprobe and prints the results.
///
/// Returns `Ok(false)` if any file failed.
pub fn normalize_files(config: &CoreConfig, files: &[NamedVideo]) -> CliResult<bool> {
    print_section("Normalize");
    print_status("Input", &config.input_dir.display().to_string(), false);
    print_status("Output", &config.output_dir.display().to_string(), false);
    print_status("Catalog", &config.catalog.to_string(), false);
    print_status("Policy", &config.policy.to_string(), false);
    print_status("Files", &files.len().to_string(), true);

    let start = Instant::now();
    let reports = normalize_videos(
        &SidecarSpawner,
        &CrateFfprobeExecutor::new(),
        config,
        files,
    )?;

    for report in &reports {
        print_report(report);
    }

    let summary = BatchSummary::from_reports(&reports);
    print_section("Summary");
    print_status("Normalized", &summary.normalized.to_string(), false);
    print_status("Skipped", &summary.skipped.to_string(), false);
    print_status("Failed", &summary.failed.to_string(), summary.failed > 0);
    print_status("Total time", &format_duration(start.elapsed()), false);
    if summary.all_succeeded() {
        print_success(&summary.to_string());
    } else {
        print_warning(&summary.to_string());
    }

    Ok(summary.all_succeeded())
}

fn print_report(report: &FileReport) {
    print_processing(&report.filename);
    if let Some(observed) = report.observed {
        print_status("Observed", &observed.to_string(), false);
    }
    if let Some(target) = report.target {
        print_status("Target", &target.to_string(), true);
    }
    if let Some(plan) = &report.plan {
        print_status("Plan", &plan.to_string(), false);
    }

    match &report.status {
        FileStatus::Normalized => {
            print_status("Output", &report.output.display().to_string(), false);
            print_status("Result", "ok", false);
        }
        FileStatus::Skipped { reason } => {
            print_status("Result", "skipped", false);
            print_status("Reason", reason, false);
        }
        FileStatus::Failed { stage, error } => {
            print_status("Result", &format!("failed ({stage})"), false);
            print_status("Error", &error.to_string(), false);
        }
    }
}
