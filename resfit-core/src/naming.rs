//! Filename conventions for generated and normalized videos.
//!
//! Inputs are named `{width}x{height}.{ext}`; normalized outputs are named
//! `{width}x{height}_standardized.{ext}`. The width/height in an input name
//! record the resolution the variant was generated at.

use crate::error::{CoreError, CoreResult};
use crate::resolution::Resolution;

use regex::Regex;
use std::path::Path;

/// Suffix appended to the input stem for normalized outputs.
pub const STANDARDIZED_SUFFIX: &str = "_standardized";

/// Matches `{width}x{height}.{ext}` exactly.
#[derive(Debug, Clone)]
pub struct InputNamePattern {
    regex: Regex,
}

impl InputNamePattern {
    pub fn new(extension: &str) -> CoreResult<Self> {
        let pattern = format!(r"^(\d+)x(\d+)\.{}$", regex::escape(extension));
        let regex = Regex::new(&pattern)
            .map_err(|e| CoreError::Config(format!("invalid input extension '{extension}': {e}")))?;
        Ok(Self { regex })
    }

    /// Returns the resolution encoded in `filename`, or `None` when the name
    /// does not follow the convention (including zero or overflowing
    /// dimensions).
    #[must_use]
    pub fn parse(&self, filename: &str) -> Option<Resolution> {
        let captures = self.regex.captures(filename)?;
        let width = captures.get(1)?.as_str().parse::<u32>().ok()?;
        let height = captures.get(2)?.as_str().parse::<u32>().ok()?;
        Resolution::new(width, height).ok()
    }

    /// Like [`parse`](Self::parse), for a path's final component.
    #[must_use]
    pub fn parse_path(&self, path: &Path) -> Option<Resolution> {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| self.parse(name))
    }
}

/// `{width}x{height}.{ext}` for a generated variant.
#[must_use]
pub fn variant_filename(resolution: Resolution, extension: &str) -> String {
    format!("{resolution}.{extension}")
}

/// `{stem}_standardized.{ext}` for the normalized copy of `input`.
pub fn standardized_filename(input: &Path, output_extension: &str) -> CoreResult<String> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            CoreError::PathError(format!("Failed to get filename stem for {}", input.display()))
        })?;
    Ok(format!("{stem}{STANDARDIZED_SUFFIX}.{output_extension}"))
}

/// True for names produced by [`standardized_filename`] with `output_extension`.
#[must_use]
pub fn is_standardized_filename(filename: &str, output_extension: &str) -> bool {
    filename
        .strip_suffix(output_extension)
        .and_then(|rest| rest.strip_suffix('.'))
        .is_some_and(|stem| stem.ends_with(STANDARDIZED_SUFFIX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_valid_names() {
        let pattern = InputNamePattern::new("mp4").unwrap();
        assert_eq!(pattern.parse("854x476.mp4"), Some(Resolution::new(854, 476).unwrap()));
        assert_eq!(pattern.parse("3838x2158.mp4"), Some(Resolution::new(3838, 2158).unwrap()));
    }

    #[test]
    fn test_parse_rejects_other_names() {
        let pattern = InputNamePattern::new("mp4").unwrap();
        for name in [
            "854X476.mp4",
            "0x480.mp4",
            "854x0.mp4",
            "854x476.mkv",
            "854x476.mp4.bak",
            "854x476_standardized.mp4",
            "clip_854x476.mp4",
            "854x476xmp4",
            "99999999999x480.mp4",
            "input.mp4",
        ] {
            assert_eq!(pattern.parse(name), None, "accepted {name}");
        }
    }

    #[test]
    fn test_custom_extension_is_escaped() {
        let pattern = InputNamePattern::new("m.v").unwrap();
        assert!(pattern.parse("640x360.m.v").is_some());
        assert!(pattern.parse("640x360.mxv").is_none());
    }

    #[test]
    fn test_parse_path() {
        let pattern = InputNamePattern::new("mp4").unwrap();
        let path = PathBuf::from("/videos/out/1250x720.mp4");
        assert_eq!(pattern.parse_path(&path), Some(Resolution::new(1250, 720).unwrap()));
    }

    #[test]
    fn test_output_names() {
        let input = PathBuf::from("/videos/1918x1080.mp4");
        assert_eq!(
            standardized_filename(&input, "mp4").unwrap(),
            "1918x1080_standardized.mp4"
        );
        assert_eq!(
            variant_filename(Resolution::new(642, 358).unwrap(), "mp4"),
            "642x358.mp4"
        );

        assert!(is_standardized_filename("1918x1080_standardized.mp4", "mp4"));
        assert!(!is_standardized_filename("1918x1080_standardized.mkv", "mp4"));
        assert!(!is_standardized_filename("1918x1080.mp4", "mp4"));
        assert!(!is_standardized_filename("_standardizedmp4", "mp4"));
    }
}
