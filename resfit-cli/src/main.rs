// resfit-cli/src/main.rs
//
// Entry point for the resfit binary.
//
// Responsibilities:
// - Parse arguments (clap).
// - Set up logging to the console, and to a file with --log-dir.
// - Dispatch to the subcommand.
// - Map the outcome to an exit code: 0 when everything succeeded, 1 when
//   the command failed or any file in the batch failed.

use clap::Parser;
use log::{debug, info};
use resfit_cli::error::suggestion_for;
use resfit_cli::logging::init_logging;
use resfit_cli::{Cli, Commands, run_all, run_generate, run_normalize, run_plan, run_verify};
use resfit_core::format_duration;
use resfit_core::terminal::print_error;
use std::process;
use std::time::Instant;

fn main() {
    let cli = Cli::parse();

    let command_name = match &cli.command {
        Commands::Generate(_) => "generate",
        Commands::Normalize(_) => "normalize",
        Commands::Verify(_) => "verify",
        Commands::Plan(_) => "plan",
        Commands::Run(_) => "run",
    };

    match init_logging(cli.verbose, cli.log_dir.as_deref(), command_name) {
        Ok(Some(log_path)) => info!("Log file: {}", log_path.display()),
        Ok(None) => {}
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }

    let start = Instant::now();
    let result = match cli.command {
        Commands::Generate(args) => run_generate(&args),
        Commands::Normalize(args) => run_normalize(args),
        Commands::Verify(args) => run_verify(args),
        Commands::Plan(args) => run_plan(args),
        Commands::Run(args) => run_all(args),
    };
    debug!("{} finished in {}", command_name, format_duration(start.elapsed()));

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            print_error("Error", &e.to_string(), suggestion_for(&e));
            process::exit(1);
        }
    }
}
