//! FFprobe integration for reading video stream dimensions.
//!
//! The orchestrator only needs one fact from ffprobe: the width and height
//! of the first video stream. Everything goes through the
//! [`FfprobeExecutor`] trait so tests can substitute canned results.

use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use crate::resolution::Resolution;

use ffprobe::{FfProbeError, ffprobe};
use std::path::Path;

/// Something that can report the frame size of a video file.
pub trait FfprobeExecutor {
    /// Returns the resolution of the first video stream in `input_path`.
    fn probe_resolution(&self, input_path: &Path) -> CoreResult<Resolution>;
}

/// [`FfprobeExecutor`] backed by the `ffprobe` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrateFfprobeExecutor;

impl CrateFfprobeExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl FfprobeExecutor for CrateFfprobeExecutor {
    fn probe_resolution(&self, input_path: &Path) -> CoreResult<Resolution> {
        get_video_resolution(input_path)
    }
}

/// Gets the resolution of the first video stream of `input_path`.
pub fn get_video_resolution(input_path: &Path) -> CoreResult<Resolution> {
    log::debug!(
        "Running ffprobe (via crate) for video resolution on: {}",
        input_path.display()
    );

    let metadata = ffprobe(input_path).map_err(|err| {
        log::debug!("ffprobe failed on {}: {:?}", input_path.display(), err);
        map_ffprobe_error(err, input_path)
    })?;

    let video_stream = metadata
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| {
            CoreError::Probe(format!("No video stream found in {}", input_path.display()))
        })?;

    let (width, height) = match (video_stream.width, video_stream.height) {
        (Some(w), Some(h)) => (w, h),
        _ => {
            return Err(CoreError::Probe(format!(
                "Video stream missing width or height in {}",
                input_path.display()
            )));
        }
    };

    let to_axis = |value: i64| u32::try_from(value).ok().filter(|v| *v > 0);
    match (to_axis(width), to_axis(height)) {
        (Some(w), Some(h)) => Resolution::new(w, h),
        _ => Err(CoreError::Probe(format!(
            "Invalid dimensions found in {}: width={width}, height={height}",
            input_path.display()
        ))),
    }
}

fn map_ffprobe_error(err: FfProbeError, input_path: &Path) -> CoreError {
    let context = format!("ffprobe ({})", input_path.display());
    match err {
        FfProbeError::Io(io_err) => command_start_error(context, io_err),
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            command_failed_error(context, output.status, stderr)
        }
        FfProbeError::Deserialize(err) => {
            CoreError::JsonParseError(format!("{context} output deserialization: {err}"))
        }
        _ => CoreError::Probe(format!("Unknown ffprobe error for {}: {err:?}", input_path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_an_error() {
        let result = get_video_resolution(Path::new("surely_this_does_not_exist_42.mp4"));
        assert!(result.is_err());
    }
}
