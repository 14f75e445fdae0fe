//! The two ffmpeg jobs resfit runs: generating a scaled variant of a source
//! video and applying a transform plan to a variant.

use super::ffmpeg_builder::{FfmpegCommandBuilder, VideoFilterChain, plan_filter};
use super::ffmpeg_executor::{FfmpegSpawner, run_ffmpeg};
use crate::error::{CoreError, CoreResult};
use crate::plan::TransformPlan;
use crate::resolution::Resolution;

use ffmpeg_sidecar::command::FfmpegCommand;
use std::path::Path;

/// Builds the command that applies `plan` to `input` and writes `output`.
///
/// An empty plan copies the streams unchanged instead of running an empty
/// filter graph.
#[must_use]
pub fn build_transform_command(input: &Path, plan: &TransformPlan, output: &Path) -> FfmpegCommand {
    let mut cmd = FfmpegCommandBuilder::new().build();
    cmd.input(&*input.to_string_lossy());

    match plan_filter(plan) {
        Some(filter) => {
            cmd.args(["-vf", filter.as_str()]);
        }
        None => {
            cmd.args(["-c", "copy"]);
        }
    }

    cmd.output(&*output.to_string_lossy());
    cmd
}

/// Builds the command that scales `source` to exactly `resolution`.
#[must_use]
pub fn build_scale_command(source: &Path, resolution: Resolution, output: &Path) -> FfmpegCommand {
    let mut cmd = FfmpegCommandBuilder::new().build();
    cmd.input(&*source.to_string_lossy());
    if let Some(filter) = VideoFilterChain::new().add_scale(resolution).build() {
        cmd.args(["-vf", filter.as_str()]);
    }
    cmd.output(&*output.to_string_lossy());
    cmd
}

/// Applies `plan` to `input`, writing `output`.
///
/// Any spawn, wait or exit failure is reported as
/// [`CoreError::ExecutorFailure`]; there are no retries.
pub fn execute_plan<S: FfmpegSpawner>(
    spawner: &S,
    input: &Path,
    plan: &TransformPlan,
    output: &Path,
) -> CoreResult<()> {
    let cmd = build_transform_command(input, plan, output);
    run_ffmpeg(spawner, cmd, "transform").map_err(|e| {
        CoreError::ExecutorFailure(format!(
            "{} -> {} ({plan}): {e}",
            input.display(),
            output.display()
        ))
    })
}

/// Scales `source` to `resolution`, writing `output`.
pub fn scale_video<S: FfmpegSpawner>(
    spawner: &S,
    source: &Path,
    resolution: Resolution,
    output: &Path,
) -> CoreResult<()> {
    let cmd = build_scale_command(source, resolution, output);
    run_ffmpeg(spawner, cmd, "scale").map_err(|e| {
        CoreError::ExecutorFailure(format!(
            "scaling {} to {resolution}: {e}",
            source.display()
        ))
    })
}
