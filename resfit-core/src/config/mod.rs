//! Configuration structures and constants for the resfit-core library.
//!
//! A [`CoreConfig`] is built once per invocation and passed explicitly to
//! the batch functions. It owns the standard catalog and the selection
//! policy, so no catalog state lives outside of it.

mod builder;

use crate::catalog::StandardCatalog;
use crate::error::{CoreError, CoreResult};
use crate::selector::SelectionPolicy;

use std::path::PathBuf;

pub use builder::CoreConfigBuilder;

// Default constants

/// Extension of the generated, non-standard input variants.
pub const DEFAULT_INPUT_EXTENSION: &str = "mp4";

/// Extension of the normalized outputs.
pub const DEFAULT_OUTPUT_EXTENSION: &str = "mp4";

/// Number of files processed concurrently. 1 keeps the batch sequential.
pub const DEFAULT_JOBS: usize = 1;

/// Main configuration structure for the resfit-core library.
///
/// # Examples
///
/// ```rust,no_run
/// use resfit_core::config::CoreConfigBuilder;
/// use resfit_core::SelectionPolicy;
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new()
///     .input_dir(PathBuf::from("output_videos"))
///     .policy(SelectionPolicy::Nearest)
///     .jobs(4)
///     .build()
///     .unwrap();
/// assert_eq!(config.output_dir, PathBuf::from("output_videos"));
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Directory containing `{width}x{height}.{ext}` input videos
    pub input_dir: PathBuf,

    /// Directory where `*_standardized.{ext}` outputs are written
    pub output_dir: PathBuf,

    /// Standard resolutions to normalize to
    pub catalog: StandardCatalog,

    /// Candidate filter used by the selector
    pub policy: SelectionPolicy,

    /// Extension of input videos, without the leading dot
    pub input_extension: String,

    /// Extension of normalized outputs, without the leading dot
    pub output_extension: String,

    /// Number of files processed concurrently
    pub jobs: usize,

    /// Replace outputs that already exist instead of skipping the input
    pub overwrite: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            catalog: StandardCatalog::default(),
            policy: SelectionPolicy::default(),
            input_extension: DEFAULT_INPUT_EXTENSION.to_string(),
            output_extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
            jobs: DEFAULT_JOBS,
            overwrite: true,
        }
    }
}

impl CoreConfig {
    /// Creates a configuration that reads and writes in the same directory.
    #[must_use]
    pub fn new(input_dir: PathBuf) -> Self {
        Self {
            output_dir: input_dir.clone(),
            input_dir,
            ..Self::default()
        }
    }

    /// Checks the configuration before a batch starts.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.input_dir.is_dir() {
            return Err(CoreError::Config(format!(
                "input directory '{}' does not exist or is not a directory",
                self.input_dir.display()
            )));
        }

        validate_extension("input", &self.input_extension)?;
        validate_extension("output", &self.output_extension)?;

        if self.jobs == 0 {
            return Err(CoreError::Config("jobs must be at least 1".to_string()));
        }

        Ok(())
    }
}

fn validate_extension(kind: &str, extension: &str) -> CoreResult<()> {
    if extension.is_empty() {
        return Err(CoreError::Config(format!("{kind} extension must not be empty")));
    }
    if extension.starts_with('.') || extension.contains(['/', '\\']) {
        return Err(CoreError::Config(format!(
            "{kind} extension '{extension}' must be a bare extension such as 'mp4'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_new_uses_input_dir_for_output() {
        let config = CoreConfig::new(PathBuf::from("videos"));
        assert_eq!(config.output_dir, PathBuf::from("videos"));
        assert_eq!(config.jobs, DEFAULT_JOBS);
        assert_eq!(config.policy, SelectionPolicy::Nearest);
        assert!(config.overwrite);
    }

    #[test]
    fn test_validate() {
        let dir = tempdir().unwrap();
        let mut config = CoreConfig::new(dir.path().to_path_buf());
        assert!(config.validate().is_ok());

        config.output_extension = ".mp4".to_string();
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));

        config.output_extension = "mp4".to_string();
        config.jobs = 0;
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));

        let missing = CoreConfig::new(dir.path().join("missing"));
        assert!(matches!(missing.validate(), Err(CoreError::Config(_))));
    }
}
