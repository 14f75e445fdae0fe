//! Generation of deliberately non-standard variants of a source video.
//!
//! Each variant is the source scaled to an off-catalog size and saved as
//! `{width}x{height}.mp4`, which is exactly the shape of input the
//! normalizer expects.

use crate::config::DEFAULT_INPUT_EXTENSION;
use crate::error::{CoreError, CoreResult};
use crate::external::{FfmpegSpawner, scale_video};
use crate::naming::{InputNamePattern, is_standardized_filename, variant_filename};
use crate::processing::report::GenerateReport;
use crate::resolution::Resolution;
use crate::terminal::BatchProgress;

use log::{debug, error, info};
use std::path::Path;

/// Variant sizes produced when none are given: each sits a couple of
/// pixels off a standard size, or well above the largest one.
pub const DEFAULT_VARIANTS: [(u32, u32); 6] = [
    (854, 476),
    (642, 358),
    (1250, 720),
    (1918, 1080),
    (2558, 1438),
    (3838, 2158),
];

/// [`DEFAULT_VARIANTS`] as resolutions.
#[must_use]
pub fn default_variants() -> Vec<Resolution> {
    DEFAULT_VARIANTS
        .iter()
        .filter_map(|&(w, h)| Resolution::new(w, h).ok())
        .collect()
}

/// Scales `source` into each of `variants` under `output_dir`.
///
/// With `clean`, previously generated variants and normalized outputs in
/// `output_dir` are removed first; other files are left alone.
///
/// A failed variant is recorded in its report and the loop continues.
///
/// # Returns
///
/// * `Ok(Vec<GenerateReport>)` - One report per variant, in order
/// * `Err(CoreError::PathError)` - If `source` is not a file
/// * `Err(CoreError::Io)` - If `output_dir` cannot be prepared
pub fn generate_variants<S: FfmpegSpawner>(
    spawner: &S,
    source: &Path,
    output_dir: &Path,
    variants: &[Resolution],
    clean: bool,
) -> CoreResult<Vec<GenerateReport>> {
    if !source.is_file() {
        return Err(CoreError::PathError(format!(
            "Source video not found: {}",
            source.display()
        )));
    }

    if clean && output_dir.is_dir() {
        let removed = clean_generated_files(output_dir)?;
        info!("Removed {} previously generated file(s) from {}", removed, output_dir.display());
    }
    std::fs::create_dir_all(output_dir)?;

    let progress = BatchProgress::new(variants.len(), "Generating");
    let reports = variants
        .iter()
        .map(|&resolution| {
            let output = output_dir.join(variant_filename(resolution, DEFAULT_INPUT_EXTENSION));
            debug!("Generating {} -> {}", resolution, output.display());

            let error = match scale_video(spawner, source, resolution, &output) {
                Ok(()) => {
                    info!("Generated {}", output.display());
                    None
                }
                Err(e) => {
                    error!("Failed to generate {}: {}", resolution, e);
                    Some(e)
                }
            };
            progress.advance(&resolution.to_string());
            GenerateReport {
                resolution,
                output,
                error,
            }
        })
        .collect();
    progress.finish();

    Ok(reports)
}

/// Removes `{w}x{h}.mp4` variants and `*_standardized.mp4` outputs from `dir`.
fn clean_generated_files(dir: &Path) -> CoreResult<usize> {
    let pattern = InputNamePattern::new(DEFAULT_INPUT_EXTENSION)?;
    let mut removed = 0;

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if pattern.parse(name).is_some() || is_standardized_filename(name, DEFAULT_INPUT_EXTENSION) {
            debug!("Removing {}", path.display());
            std::fs::remove_file(&path)?;
            removed += 1;
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_variants_are_valid() {
        let variants = default_variants();
        assert_eq!(variants.len(), DEFAULT_VARIANTS.len());
        assert_eq!(variants[0], Resolution::new(854, 476).unwrap());
    }

    #[test]
    fn test_clean_keeps_unrelated_files() {
        let dir = tempdir().unwrap();
        for name in ["854x476.mp4", "854x476_standardized.mp4", "notes.txt", "source.mp4"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let removed = clean_generated_files(dir.path()).unwrap();
        assert_eq!(removed, 2);
        assert!(dir.path().join("notes.txt").exists());
        assert!(dir.path().join("source.mp4").exists());
        assert!(!dir.path().join("854x476.mp4").exists());
    }
}
