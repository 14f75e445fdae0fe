// ============================================================================
// resfit-core/src/processing/normalize.rs
// ============================================================================
//
// NORMALIZATION: Batch orchestration of probe -> select -> plan -> execute
//
// Every input runs through the same four stages. A failure in any stage is
// recorded in that file's FileReport and the batch moves on; only problems
// with the batch itself (output directory, thread pool) return Err.
//
// WORKFLOW:
// 1. Create the output directory
// 2. For each input (in order, or on a rayon pool when jobs > 1):
//    a. Derive the output path, skip it if it exists and overwrite is off
//    b. Probe the actual resolution
//    c. Select the catalog target under the configured policy
//    d. Compute the crop/pad plan
//    e. Run ffmpeg with the plan, removing any partial output on failure
// 3. Return one FileReport per input, in input order

use crate::config::CoreConfig;
use crate::discovery::NamedVideo;
use crate::error::{CoreError, CoreResult};
use crate::external::{FfmpegSpawner, FfprobeExecutor, execute_plan};
use crate::naming::standardized_filename;
use crate::plan::plan;
use crate::processing::report::{FileReport, FileStage, FileStatus};
use crate::resolution::Resolution;
use crate::selector::select;
use crate::terminal::BatchProgress;
use crate::utils::format_duration;

use log::{debug, error, info, warn};
use rayon::prelude::*;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Instant;

/// Normalizes `files` into `config.output_dir`.
///
/// # Arguments
///
/// * `spawner` - Runs the ffmpeg transform
/// * `prober` - Reports each file's actual resolution
/// * `config` - Catalog, policy, extensions, parallelism and overwrite setting
/// * `files` - Inputs, usually from [`crate::discovery::find_processable_files`]
///
/// # Returns
///
/// * `Ok(Vec<FileReport>)` - One report per input, in input order, whether
///   or not the file succeeded
/// * `Err(CoreError)` - If the output directory cannot be created or the
///   worker pool cannot be built
///
/// # Examples
///
/// ```rust,no_run
/// use resfit_core::{CoreConfig, normalize_videos};
/// use resfit_core::discovery::find_processable_files;
/// use resfit_core::external::{CrateFfprobeExecutor, SidecarSpawner};
/// use resfit_core::naming::InputNamePattern;
/// use std::path::PathBuf;
///
/// let config = CoreConfig::new(PathBuf::from("output_videos"));
/// let pattern = InputNamePattern::new(&config.input_extension).unwrap();
/// let files = find_processable_files(&config.input_dir, &pattern).unwrap();
///
/// let reports = normalize_videos(&SidecarSpawner, &CrateFfprobeExecutor::new(), &config, &files).unwrap();
/// for report in &reports {
///     println!("{}: {:?}", report.filename, report.status);
/// }
/// ```
pub fn normalize_videos<S, P>(
    spawner: &S,
    prober: &P,
    config: &CoreConfig,
    files: &[NamedVideo],
) -> CoreResult<Vec<FileReport>>
where
    S: FfmpegSpawner + Sync,
    P: FfprobeExecutor + Sync,
{
    std::fs::create_dir_all(&config.output_dir).map_err(|e| {
        error!(
            "Failed to create output directory {}: {}",
            config.output_dir.display(),
            e
        );
        CoreError::Io(e)
    })?;

    info!(
        "Normalizing {} file(s) against [{}] with the {} policy",
        files.len(),
        config.catalog,
        config.policy
    );

    let progress = BatchProgress::new(files.len(), "Normalizing");
    let run_one = |video: &NamedVideo| {
        let report = normalize_file(spawner, prober, config, video);
        progress.advance(&report.filename);
        report
    };

    let reports: Vec<FileReport> = if config.jobs > 1 {
        debug!("Running with {} worker threads", config.jobs);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.jobs)
            .thread_name(|i| format!("resfit-worker-{i}"))
            .build()
            .map_err(|e| CoreError::OperationFailed(format!("Failed to build worker pool: {e}")))?;
        // par_iter over a slice collects in input order.
        pool.install(|| files.par_iter().map(run_one).collect())
    } else {
        files.iter().map(run_one).collect()
    };
    progress.finish();

    Ok(reports)
}

/// Runs one file through the pipeline, capturing the outcome.
fn normalize_file<S, P>(
    spawner: &S,
    prober: &P,
    config: &CoreConfig,
    video: &NamedVideo,
) -> FileReport
where
    S: FfmpegSpawner,
    P: FfprobeExecutor,
{
    let start = Instant::now();
    let filename = video
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| video.path.display().to_string());

    let mut report = FileReport {
        input: video.path.clone(),
        filename,
        named_resolution: video.named_resolution,
        observed: None,
        target: None,
        plan: None,
        output: config.output_dir.clone(),
        status: FileStatus::Normalized,
        duration: Default::default(),
    };

    report.status = match run_stages(spawner, prober, config, video, &mut report) {
        Ok(status) => status,
        Err((stage, error)) => {
            log_failure(&report, stage, &error);
            FileStatus::Failed { stage, error }
        }
    };
    report.duration = start.elapsed();

    if report.is_success() {
        info!(
            "{}: {} -> {} in {}",
            report.filename,
            report.observed.map(|r| r.to_string()).unwrap_or_default(),
            report.target.map(|r| r.to_string()).unwrap_or_default(),
            format_duration(report.duration)
        );
    }
    report
}

/// The stages proper. Fills in `report` as facts become known and returns
/// the final status, or the failing stage and its error.
fn run_stages<S, P>(
    spawner: &S,
    prober: &P,
    config: &CoreConfig,
    video: &NamedVideo,
    report: &mut FileReport,
) -> Result<FileStatus, (FileStage, CoreError)>
where
    S: FfmpegSpawner,
    P: FfprobeExecutor,
{
    let output_name = standardized_filename(&video.path, &config.output_extension)
        .map_err(|e| (FileStage::Execute, e))?;
    report.output = config.output_dir.join(output_name);

    if !config.overwrite && report.output.exists() {
        warn!(
            "Output file already exists: {}. Skipping {}.",
            report.output.display(),
            report.filename
        );
        return Ok(FileStatus::Skipped {
            reason: format!("{} already exists", report.output.display()),
        });
    }

    let observed = prober
        .probe_resolution(&video.path)
        .map_err(|e| (FileStage::Probe, e))?;
    report.observed = Some(observed);
    if observed != video.named_resolution {
        warn!(
            "{}: filename says {} but the stream is {}; using the stream resolution",
            report.filename, video.named_resolution, observed
        );
    }

    let target = select(observed, &config.catalog, config.policy)
        .map_err(|e| (FileStage::Select, e))?;
    report.target = Some(target);
    debug!(
        "{}: selected {} (distance {:.2})",
        report.filename,
        target,
        observed.distance(&target)
    );

    let transform = plan(observed, target).map_err(|e| (FileStage::Plan, e))?;
    report.plan = Some(transform);
    debug!("{}: plan {}", report.filename, transform);

    if let Err(e) = execute_plan(spawner, &video.path, &transform, &report.output) {
        cleanup_partial_output(&report.output);
        return Err((FileStage::Execute, e));
    }

    Ok(FileStatus::Normalized)
}

/// Removes whatever ffmpeg left at `path` after a failed run.
fn cleanup_partial_output(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => warn!("Removed partial output after failed transform: {}", path.display()),
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => warn!(
            "Failed to remove partial output {}: {}",
            path.display(),
            err
        ),
    }
}

fn log_failure(report: &FileReport, stage: FileStage, err: &CoreError) {
    let known = |r: Option<Resolution>| {
        r.map(|r| r.to_string()).unwrap_or_else(|| "unknown".to_string())
    };

    match err {
        CoreError::InvalidPlan(_) => error!(
            "{}: invalid plan ({}) observed={} target={} output={}",
            report.filename,
            err,
            known(report.observed),
            known(report.target),
            report.output.display()
        ),
        _ => error!(
            "{}: {} stage failed: {} (observed={}, target={})",
            report.filename,
            stage,
            err,
            known(report.observed),
            known(report.target)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StandardCatalog;
    use crate::external::mocks::{MockFfmpegSpawner, MockFfprobeExecutor};
    use crate::selector::SelectionPolicy;
    use std::path::Path;
    use tempfile::tempdir;

    fn res(w: u32, h: u32) -> Resolution {
        Resolution::new(w, h).unwrap()
    }

    fn named(dir: &Path, w: u32, h: u32) -> NamedVideo {
        let path = dir.join(format!("{w}x{h}.mp4"));
        std::fs::write(&path, b"video").unwrap();
        NamedVideo {
            path,
            named_resolution: res(w, h),
        }
    }

    #[test]
    fn test_single_file_pad_only() {
        let dir = tempdir().unwrap();
        let video = named(dir.path(), 854, 476);
        let config = CoreConfig::new(dir.path().to_path_buf());

        let spawner = MockFfmpegSpawner::new();
        spawner.add_success_expectation("pad=854:480:0:2", true);
        let prober = MockFfprobeExecutor::new();
        prober.expect_resolution(&video.path, res(854, 476));

        let reports = normalize_videos(&spawner, &prober, &config, &[video]).unwrap();
        assert_eq!(reports.len(), 1);
        let report = &reports[0];
        assert!(report.is_success(), "{:?}", report.status);
        assert_eq!(report.target, Some(res(854, 480)));
        assert_eq!(report.output, dir.path().join("854x476_standardized.mp4"));
        assert!(report.output.exists());
    }

    #[test]
    fn test_restricted_policy_reports_select_stage() {
        let dir = tempdir().unwrap();
        let video = named(dir.path(), 642, 358);
        let mut config = CoreConfig::new(dir.path().to_path_buf());
        config.catalog = StandardCatalog::new(vec![res(640, 360), res(854, 480)]).unwrap();
        config.policy = SelectionPolicy::BelowObservedHeight;

        let spawner = MockFfmpegSpawner::new();
        let prober = MockFfprobeExecutor::new();
        prober.expect_resolution(&video.path, res(642, 358));

        let reports = normalize_videos(&spawner, &prober, &config, &[video]).unwrap();
        let (stage, err) = reports[0].failure().expect("should fail");
        assert_eq!(stage, FileStage::Select);
        assert!(matches!(err, CoreError::NoEligibleCandidate { .. }));
        assert_eq!(reports[0].observed, Some(res(642, 358)));
        assert!(spawner.get_received_calls().is_empty());
    }

    #[test]
    fn test_probe_result_wins_over_filename() {
        let dir = tempdir().unwrap();
        let video = named(dir.path(), 1918, 1080);
        let config = CoreConfig::new(dir.path().to_path_buf());

        let spawner = MockFfmpegSpawner::new();
        // Stream is really 2558x1438, so the crop plan is used.
        spawner.add_success_expectation("crop=1920:1080:319:179", false);
        let prober = MockFfprobeExecutor::new();
        prober.expect_resolution(&video.path, res(2558, 1438));

        let reports = normalize_videos(&spawner, &prober, &config, &[video]).unwrap();
        assert!(reports[0].is_success());
        assert_eq!(reports[0].observed, Some(res(2558, 1438)));
    }
}
