//! Implementation of the 'plan' subcommand.
//!
//! Shows what normalization would do to one resolution: the selected
//! target, the crop/pad plan and the ffmpeg filter. Runs no external tool.

use crate::cli::PlanArgs;
use crate::commands::resolve_catalog;
use crate::error::CliResult;

use resfit_core::external::plan_filter;
use resfit_core::terminal::{print_section, print_status};
use resfit_core::{SelectionPolicy, plan, select};

pub fn run_plan(args: PlanArgs) -> CliResult<bool> {
    let catalog = resolve_catalog(&args.catalog)?;
    let policy = SelectionPolicy::from(args.policy);
    let observed = args.resolution;

    print_section("Plan");
    print_status("Observed", &observed.to_string(), true);
    print_status("Catalog", &catalog.to_string(), false);
    print_status("Policy", &policy.to_string(), false);

    let target = select(observed, &catalog, policy)?;
    print_status("Target", &target.to_string(), true);
    print_status("Distance", &format!("{:.2}", observed.distance(&target)), false);

    let transform = plan(observed, target)?;
    print_status("Plan", &transform.to_string(), false);
    let filter = plan_filter(&transform).unwrap_or_else(|| "none (-c copy)".to_string());
    print_status("Filter", &filter, false);

    Ok(true)
}
