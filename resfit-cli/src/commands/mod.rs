//! Command implementations for the CLI.
//!
//! Each submodule implements one subcommand. They all return
//! `CliResult<bool>`: `Err` for problems that stop the command outright,
//! `Ok(false)` when the command ran but some item failed.

use crate::cli::CatalogArgs;
use crate::error::CliResult;

use resfit_core::StandardCatalog;
use resfit_core::external::check_dependency;

/// The `generate` command: scale a source into off-size variants.
pub mod generate;

/// The `normalize` command: crop/pad variants to the catalog.
pub mod normalize;

/// The `plan` command: dry-run selection and planning for one resolution.
pub mod plan;

/// The `run` command: generate, normalize and verify in sequence.
pub mod run;

/// The `verify` command: classify normalized outputs.
pub mod verify;

/// Builds the catalog from `--standard` values, else `--catalog`, else the default.
pub fn resolve_catalog(args: &CatalogArgs) -> CliResult<StandardCatalog> {
    if !args.standards.is_empty() {
        return StandardCatalog::new(args.standards.clone());
    }
    match &args.catalog {
        Some(path) => StandardCatalog::from_json_file(path),
        None => Ok(StandardCatalog::default()),
    }
}

/// Fails early when an external tool the command needs is missing.
pub fn require_tools(tools: &[&str]) -> CliResult<()> {
    tools.iter().try_for_each(|tool| check_dependency(tool))
}
