//! FFmpeg command builder utilities
//!
//! Builders for the two kinds of ffmpeg invocation resfit makes: scaling a
//! source into a non-standard variant, and applying a [`TransformPlan`]
//! to normalize a variant. The plan's typed crop/pad steps are serialized
//! into ffmpeg's filter syntax here and nowhere else.

use crate::plan::{Crop, Pad, TransformPlan};
use crate::resolution::Resolution;

use ffmpeg_sidecar::command::FfmpegCommand;

/// Builder for creating `FFmpeg` commands with common configurations
///
/// Every command hides the banner and overwrites its output (`-y`). Skipping
/// existing outputs is decided before ffmpeg runs, so ffmpeg never prompts.
pub struct FfmpegCommandBuilder {
    cmd: FfmpegCommand,
}

impl Default for FfmpegCommandBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FfmpegCommandBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cmd: FfmpegCommand::new(),
        }
    }

    /// Builds the `FFmpeg` command with the common options applied
    #[must_use]
    pub fn build(mut self) -> FfmpegCommand {
        self.cmd.args(["-hide_banner", "-y"]);
        self.cmd
    }
}

/// Builder for constructing video filter chains
#[derive(Default)]
pub struct VideoFilterChain {
    filters: Vec<String>,
}

impl VideoFilterChain {
    /// Creates a new empty filter chain
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a centered crop (`crop=w:h:x:y`)
    #[must_use]
    pub fn add_crop(mut self, crop: &Crop) -> Self {
        self.filters.push(format!(
            "crop={}:{}:{}:{}",
            crop.width, crop.height, crop.x, crop.y
        ));
        self
    }

    /// Adds a centered pad (`pad=w:h:x:y`)
    #[must_use]
    pub fn add_pad(mut self, pad: &Pad) -> Self {
        self.filters.push(format!(
            "pad={}:{}:{}:{}",
            pad.width, pad.height, pad.x, pad.y
        ));
        self
    }

    /// Adds every step of `plan` in order (crop, then pad)
    #[must_use]
    pub fn add_plan(self, plan: &TransformPlan) -> Self {
        let chain = match plan.crop() {
            Some(crop) => self.add_crop(crop),
            None => self,
        };
        match plan.pad() {
            Some(pad) => chain.add_pad(pad),
            None => chain,
        }
    }

    /// Adds a scale filter (`scale=w:h`)
    #[must_use]
    pub fn add_scale(mut self, resolution: Resolution) -> Self {
        self.filters
            .push(format!("scale={}:{}", resolution.width(), resolution.height()));
        self
    }

    /// Builds the filter chain into a single filter string
    #[must_use]
    pub fn build(self) -> Option<String> {
        if self.filters.is_empty() {
            None
        } else {
            Some(self.filters.join(","))
        }
    }
}

/// Serializes `plan` as an ffmpeg `-vf` argument; `None` for an empty plan.
#[must_use]
pub fn plan_filter(plan: &TransformPlan) -> Option<String> {
    VideoFilterChain::new().add_plan(plan).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::plan;

    fn res(w: u32, h: u32) -> Resolution {
        Resolution::new(w, h).unwrap()
    }

    #[test]
    fn test_builder_common_options() {
        let cmd = FfmpegCommandBuilder::new().build();
        let args: Vec<String> = cmd
            .get_args()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        assert_eq!(args, ["-hide_banner", "-y"]);
    }

    #[test]
    fn test_video_filter_chain_empty() {
        let chain = VideoFilterChain::new();
        assert_eq!(chain.build(), None);
        assert_eq!(plan_filter(&TransformPlan::None), None);
    }

    #[test]
    fn test_plan_filters() {
        let pad_only = plan(res(1918, 1080), res(1920, 1080)).unwrap();
        assert_eq!(plan_filter(&pad_only), Some("pad=1920:1080:1:0".to_string()));

        let crop_only = plan(res(2558, 1438), res(1920, 1080)).unwrap();
        assert_eq!(
            plan_filter(&crop_only),
            Some("crop=1920:1080:319:179".to_string())
        );

        let both = plan(res(642, 358), res(640, 360)).unwrap();
        assert_eq!(
            plan_filter(&both),
            Some("crop=640:358:1:0,pad=640:360:0:1".to_string())
        );
    }

    #[test]
    fn test_scale_filter() {
        let chain = VideoFilterChain::new().add_scale(res(854, 476));
        assert_eq!(chain.build(), Some("scale=854:476".to_string()));
    }
}
