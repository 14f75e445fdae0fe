//! Per-file and per-batch results.
//!
//! A batch never stops at the first bad file. Whatever happens to a file is
//! captured in its [`FileReport`], and the caller decides how to present it.

use crate::error::CoreError;
use crate::plan::TransformPlan;
use crate::resolution::Resolution;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// The pipeline step a file was in when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStage {
    Probe,
    Select,
    Plan,
    Execute,
}

impl fmt::Display for FileStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileStage::Probe => "probe",
            FileStage::Select => "select",
            FileStage::Plan => "plan",
            FileStage::Execute => "execute",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub enum FileStatus {
    /// The output was written.
    Normalized,
    /// The file was left alone (existing output and overwrite disabled).
    Skipped { reason: String },
    Failed { stage: FileStage, error: CoreError },
}

/// Outcome of normalizing one input file.
#[derive(Debug)]
pub struct FileReport {
    pub input: PathBuf,
    pub filename: String,
    /// Resolution encoded in the filename.
    pub named_resolution: Resolution,
    /// Resolution reported by the probe, once known.
    pub observed: Option<Resolution>,
    /// Selected catalog entry, once known.
    pub target: Option<Resolution>,
    pub plan: Option<TransformPlan>,
    pub output: PathBuf,
    pub status: FileStatus,
    pub duration: Duration,
}

impl FileReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.status, FileStatus::Normalized)
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self.status, FileStatus::Failed { .. })
    }

    /// The failing stage and error, if the file failed.
    #[must_use]
    pub fn failure(&self) -> Option<(FileStage, &CoreError)> {
        match &self.status {
            FileStatus::Failed { stage, error } => Some((*stage, error)),
            _ => None,
        }
    }
}

/// Counts over a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub normalized: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    #[must_use]
    pub fn from_reports(reports: &[FileReport]) -> Self {
        reports.iter().fold(
            BatchSummary {
                total: reports.len(),
                ..Default::default()
            },
            |mut summary, report| {
                match report.status {
                    FileStatus::Normalized => summary.normalized += 1,
                    FileStatus::Skipped { .. } => summary.skipped += 1,
                    FileStatus::Failed { .. } => summary.failed += 1,
                }
                summary
            },
        )
    }

    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} file(s): {} normalized, {} skipped, {} failed",
            self.total, self.normalized, self.skipped, self.failed
        )
    }
}

/// Outcome of generating one variant.
#[derive(Debug)]
pub struct GenerateReport {
    pub resolution: Resolution,
    pub output: PathBuf,
    pub error: Option<CoreError>,
}

impl GenerateReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Classification of one normalized output.
#[derive(Debug)]
pub struct VerificationEntry {
    pub path: PathBuf,
    /// Probed resolution; `None` when the probe failed.
    pub resolution: Option<Resolution>,
    /// Whether the probed resolution is a catalog entry.
    pub standard: bool,
    pub error: Option<CoreError>,
}
