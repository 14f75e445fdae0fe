//! Core library for normalizing video files to standard resolutions.
//!
//! Given a video whose resolution is close to, but not exactly, a standard
//! size, resfit picks the nearest entry of a [`StandardCatalog`] and computes
//! a centered crop and/or pad that lands on it exactly, without scaling.
//! The pixel work itself is done by ffmpeg; resolutions are read with ffprobe.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use resfit_core::{CoreConfig, normalize_videos, find_processable_files};
//! use resfit_core::external::{CrateFfprobeExecutor, SidecarSpawner};
//! use resfit_core::naming::InputNamePattern;
//! use std::path::PathBuf;
//!
//! let config = CoreConfig::new(PathBuf::from("output_videos"));
//! config.validate().unwrap();
//!
//! let pattern = InputNamePattern::new(&config.input_extension).unwrap();
//! let files = find_processable_files(&config.input_dir, &pattern).unwrap();
//!
//! let reports = normalize_videos(
//!     &SidecarSpawner,
//!     &CrateFfprobeExecutor::new(),
//!     &config,
//!     &files,
//! ).unwrap();
//! ```
//!
//! The algorithm itself needs no external tools:
//!
//! ```rust
//! use resfit_core::{Resolution, SelectionPolicy, StandardCatalog, plan, select};
//!
//! let observed = Resolution::new(1918, 1080).unwrap();
//! let target = select(observed, &StandardCatalog::default(), SelectionPolicy::Nearest).unwrap();
//! assert_eq!(target, Resolution::new(1920, 1080).unwrap());
//!
//! let transform = plan(observed, target).unwrap();
//! assert_eq!(transform.output_size(observed), (1920, 1080));
//! ```

pub mod catalog;
pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod naming;
pub mod plan;
pub mod processing;
pub mod resolution;
pub mod selector;
pub mod terminal;
pub mod utils;

// Re-exports for public API
pub use catalog::StandardCatalog;
pub use config::{CoreConfig, CoreConfigBuilder};
pub use discovery::{NamedVideo, find_processable_files, find_standardized_outputs};
pub use error::{CoreError, CoreResult};
pub use plan::{Crop, Pad, TransformPlan, plan};
pub use processing::{
    BatchSummary, FileReport, FileStage, FileStatus, GenerateReport, VerificationEntry,
    generate_variants, normalize_videos, verify_outputs,
};
pub use resolution::Resolution;
pub use selector::{SelectionPolicy, select};
pub use utils::format_duration;
