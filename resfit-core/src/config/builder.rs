// ============================================================================
// resfit-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// Fluent construction of CoreConfig. Only the input directory is required;
// the output directory falls back to the input directory and every other
// field falls back to the defaults in config/mod.rs.

use std::path::PathBuf;

use super::CoreConfig;
use crate::catalog::StandardCatalog;
use crate::error::{CoreError, CoreResult};
use crate::selector::SelectionPolicy;

/// Builder for creating CoreConfig instances.
///
/// # Examples
///
/// ```rust
/// use resfit_core::config::CoreConfigBuilder;
/// use resfit_core::{Resolution, StandardCatalog};
/// use std::path::PathBuf;
///
/// let catalog = StandardCatalog::new(vec![
///     Resolution::new(1920, 1080).unwrap(),
///     Resolution::new(1280, 720).unwrap(),
/// ])
/// .unwrap();
///
/// let config = CoreConfigBuilder::new()
///     .input_dir(PathBuf::from("/path/to/variants"))
///     .output_dir(PathBuf::from("/path/to/normalized"))
///     .catalog(catalog)
///     .output_extension("mkv")
///     .build()
///     .unwrap();
/// assert_eq!(config.catalog.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoreConfigBuilder {
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    catalog: Option<StandardCatalog>,
    policy: Option<SelectionPolicy>,
    input_extension: Option<String>,
    output_extension: Option<String>,
    jobs: Option<usize>,
    overwrite: Option<bool>,
}

impl CoreConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory containing input videos.
    pub fn input_dir(mut self, input_dir: PathBuf) -> Self {
        self.input_dir = Some(input_dir);
        self
    }

    /// Sets the directory for normalized outputs (defaults to the input directory).
    pub fn output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = Some(output_dir);
        self
    }

    pub fn catalog(mut self, catalog: StandardCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn input_extension(mut self, extension: &str) -> Self {
        self.input_extension = Some(extension.to_string());
        self
    }

    pub fn output_extension(mut self, extension: &str) -> Self {
        self.output_extension = Some(extension.to_string());
        self
    }

    /// Sets how many files are processed concurrently.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = Some(jobs);
        self
    }

    /// Sets whether existing outputs are replaced (`true`) or the input is skipped.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = Some(overwrite);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// * `CoreError::Config` if no input directory was given
    pub fn build(self) -> CoreResult<CoreConfig> {
        let input_dir = self
            .input_dir
            .ok_or_else(|| CoreError::Config("input_dir is required".to_string()))?;
        let defaults = CoreConfig::new(input_dir);

        Ok(CoreConfig {
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            catalog: self.catalog.unwrap_or(defaults.catalog),
            policy: self.policy.unwrap_or(defaults.policy),
            input_extension: self.input_extension.unwrap_or(defaults.input_extension),
            output_extension: self.output_extension.unwrap_or(defaults.output_extension),
            jobs: self.jobs.unwrap_or(defaults.jobs),
            overwrite: self.overwrite.unwrap_or(defaults.overwrite),
            input_dir: defaults.input_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_input_dir() {
        assert!(matches!(
            CoreConfigBuilder::new().build(),
            Err(CoreError::Config(_))
        ));
    }

    #[test]
    fn test_build_applies_overrides() {
        let config = CoreConfigBuilder::new()
            .input_dir(PathBuf::from("in"))
            .output_dir(PathBuf::from("out"))
            .policy(SelectionPolicy::BelowObservedHeight)
            .jobs(3)
            .overwrite(false)
            .build()
            .unwrap();

        assert_eq!(config.input_dir, PathBuf::from("in"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.policy, SelectionPolicy::BelowObservedHeight);
        assert_eq!(config.jobs, 3);
        assert!(!config.overwrite);
        assert_eq!(config.catalog, StandardCatalog::default());
    }
}
