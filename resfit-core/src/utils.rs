//! Small formatting and path helpers shared by the batch code and the CLI.

use crate::error::{CoreError, CoreResult};

use std::path::Path;
use std::time::Duration;

/// Formats a duration as HH:MM:SS (e.g. 3725s -> "01:02:05").
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Extracts the filename of `path` as a `String`.
pub fn get_filename_safe(path: &Path) -> CoreResult<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            CoreError::PathError(format!("Failed to get filename for {}", path.display()))
        })
}
