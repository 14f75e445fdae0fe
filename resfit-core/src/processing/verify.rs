//! Verification pass over normalized outputs.
//!
//! Every `*_standardized.{ext}` file is probed and checked for membership in
//! the catalog. Non-standard outputs and probe failures are reported, never
//! raised.

use crate::catalog::StandardCatalog;
use crate::discovery::find_standardized_outputs;
use crate::error::CoreResult;
use crate::external::FfprobeExecutor;
use crate::processing::report::VerificationEntry;

use log::{info, warn};
use std::path::Path;

/// Probes every normalized output in `dir` and classifies it.
///
/// # Returns
///
/// * `Ok(Vec<VerificationEntry>)` - One entry per output, sorted by path;
///   empty when there is nothing to verify
/// * `Err(CoreError::Io)` - If `dir` cannot be read
pub fn verify_outputs<P: FfprobeExecutor>(
    prober: &P,
    dir: &Path,
    catalog: &StandardCatalog,
    output_extension: &str,
) -> CoreResult<Vec<VerificationEntry>> {
    let outputs = find_standardized_outputs(dir, output_extension)?;
    info!("Verifying {} output(s) in {}", outputs.len(), dir.display());

    let entries = outputs
        .into_iter()
        .map(|path| match prober.probe_resolution(&path) {
            Ok(resolution) => {
                let standard = catalog.contains(&resolution);
                if !standard {
                    warn!("{} is {}, which is not a standard resolution", path.display(), resolution);
                }
                VerificationEntry {
                    path,
                    resolution: Some(resolution),
                    standard,
                    error: None,
                }
            }
            Err(e) => {
                warn!("Could not probe {}: {}", path.display(), e);
                VerificationEntry {
                    path,
                    resolution: None,
                    standard: false,
                    error: Some(e),
                }
            }
        })
        .collect();

    Ok(entries)
}
