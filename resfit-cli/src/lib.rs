// resfit-cli/src/lib.rs
//
// Library portion of the resfit CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands};
pub use commands::generate::run_generate;
pub use commands::normalize::run_normalize;
pub use commands::plan::run_plan;
pub use commands::run::run_all;
pub use commands::verify::run_verify;
