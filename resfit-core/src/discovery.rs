//! File discovery module for finding videos to normalize and verify.
//!
//! Only the top level of the given directory is searched. Results are
//! sorted by path so batches run in a stable order.

use crate::error::{CoreError, CoreResult};
use crate::naming::{InputNamePattern, is_standardized_filename};
use crate::resolution::Resolution;

use std::path::{Path, PathBuf};

/// A video whose filename follows the `{width}x{height}.{ext}` convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedVideo {
    pub path: PathBuf,
    /// Resolution recorded in the filename.
    pub named_resolution: Resolution,
}

/// Finds videos named `{width}x{height}.{ext}` in `input_dir`.
///
/// Files that do not follow the naming convention are skipped and logged at
/// debug level.
///
/// # Returns
///
/// * `Ok(Vec<NamedVideo>)` - The matching files, sorted by path
/// * `Err(CoreError::Io)` - If the directory cannot be read
/// * `Err(CoreError::NoFilesFound)` - If no file matches
///
/// # Examples
///
/// ```rust,no_run
/// use resfit_core::discovery::find_processable_files;
/// use resfit_core::naming::InputNamePattern;
/// use std::path::Path;
///
/// let pattern = InputNamePattern::new("mp4").unwrap();
/// match find_processable_files(Path::new("output_videos"), &pattern) {
///     Ok(files) => {
///         for file in files {
///             println!("{} ({})", file.path.display(), file.named_resolution);
///         }
///     }
///     Err(e) => println!("Error finding video files: {}", e),
/// }
/// ```
pub fn find_processable_files(
    input_dir: &Path,
    pattern: &InputNamePattern,
) -> CoreResult<Vec<NamedVideo>> {
    let read_dir = std::fs::read_dir(input_dir)?;
    let mut files: Vec<NamedVideo> = read_dir
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if !path.is_file() {
                return None;
            }

            match pattern.parse_path(&path) {
                Some(named_resolution) => Some(NamedVideo {
                    path,
                    named_resolution,
                }),
                None => {
                    log::debug!("Skipping unrecognized file name: {}", path.display());
                    None
                }
            }
        })
        .collect();

    if files.is_empty() {
        return Err(CoreError::NoFilesFound);
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

/// Finds normalized outputs (`*_standardized.{ext}`) in `dir`, sorted by path.
///
/// An empty result is not an error here; verification simply has nothing
/// to report.
pub fn find_standardized_outputs(dir: &Path, output_extension: &str) -> CoreResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            let is_match = path.is_file()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| is_standardized_filename(n, output_extension));
            is_match.then_some(path)
        })
        .collect();
    files.sort();
    Ok(files)
}
