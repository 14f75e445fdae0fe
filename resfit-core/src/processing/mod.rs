//! Batch orchestration: variant generation, normalization and verification.
//!
//! Each batch function is generic over the external tool traits in
//! [`crate::external`] and returns one report per item, so a single bad file
//! never hides the results for the rest.

/// Scaling a source into non-standard variants
pub mod generate;

/// The probe -> select -> plan -> execute pipeline
pub mod normalize;

/// Report types shared by the batch functions
pub mod report;

/// Post-normalization verification pass
pub mod verify;

pub use generate::{DEFAULT_VARIANTS, default_variants, generate_variants};
pub use normalize::normalize_videos;
pub use report::{BatchSummary, FileReport, FileStage, FileStatus, GenerateReport, VerificationEntry};
pub use verify::verify_outputs;
