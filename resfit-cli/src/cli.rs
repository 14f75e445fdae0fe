// resfit-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use resfit_core::{Resolution, SelectionPolicy};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Resfit: normalize videos to standard resolutions",
    long_about = "Generates off-size video variants, crops/pads them to the nearest standard \
                  resolution with ffmpeg, and verifies the results with ffprobe."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Also write the log to a timestamped file in this directory
    #[arg(long, global = true, value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scale a source video into deliberately non-standard variants
    Generate(GenerateArgs),
    /// Crop/pad every WIDTHxHEIGHT.mp4 in a directory to a standard resolution
    Normalize(NormalizeArgs),
    /// Probe normalized outputs and report whether each is standard
    Verify(VerifyArgs),
    /// Show the target and crop/pad plan for one resolution without running anything
    Plan(PlanArgs),
    /// Generate, normalize and verify in one go
    Run(RunArgs),
}

/// Selection policy as accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PolicyArg {
    /// Nearest catalog entry by Euclidean distance
    #[default]
    Nearest,
    /// Only entries strictly shorter than the input
    BelowHeight,
}

impl From<PolicyArg> for SelectionPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Nearest => SelectionPolicy::Nearest,
            PolicyArg::BelowHeight => SelectionPolicy::BelowObservedHeight,
        }
    }
}

/// Where the standard catalog comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct CatalogArgs {
    /// Standard resolution to target (repeatable, e.g. --standard 1920x1080).
    /// Takes precedence over --catalog.
    #[arg(long = "standard", value_name = "WxH")]
    pub standards: Vec<Resolution>,

    /// JSON file listing the standard resolutions
    #[arg(long, value_name = "FILE", env = "RESFIT_CATALOG")]
    pub catalog: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Source video to scale
    #[arg(short, long, default_value = "input.mp4", value_name = "SOURCE")]
    pub source: PathBuf,

    /// Directory the variants are written to
    #[arg(short, long = "output", default_value = "output_videos", value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Variant to generate (repeatable); defaults to the built-in list
    #[arg(long = "variant", value_name = "WxH")]
    pub variants: Vec<Resolution>,

    /// Remove previously generated variants and outputs first
    #[arg(long, default_value_t = false)]
    pub clean: bool,
}

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Directory containing WIDTHxHEIGHT.<ext> files
    #[arg(default_value = "output_videos", value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory for the *_standardized files (defaults to INPUT_DIR)
    #[arg(short, long = "output", value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// How the target resolution is chosen
    #[arg(long, value_enum, default_value_t = PolicyArg::Nearest)]
    pub policy: PolicyArg,

    /// Number of files processed at once
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: u16,

    /// Leave existing *_standardized files alone instead of overwriting
    #[arg(long, default_value_t = false)]
    pub skip_existing: bool,

    /// Extension of the input files
    #[arg(long, default_value = "mp4", value_name = "EXT")]
    pub input_ext: String,

    /// Extension of the normalized outputs
    #[arg(long, default_value = "mp4", value_name = "EXT")]
    pub output_ext: String,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Directory containing *_standardized files
    #[arg(default_value = "output_videos", value_name = "DIR")]
    pub dir: PathBuf,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Extension of the normalized outputs
    #[arg(long, default_value = "mp4", value_name = "EXT")]
    pub output_ext: String,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Observed resolution, e.g. 1918x1080
    #[arg(value_name = "WxH")]
    pub resolution: Resolution,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// How the target resolution is chosen
    #[arg(long, value_enum, default_value_t = PolicyArg::Nearest)]
    pub policy: PolicyArg,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub generate: GenerateArgs,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// How the target resolution is chosen
    #[arg(long, value_enum, default_value_t = PolicyArg::Nearest)]
    pub policy: PolicyArg,

    /// Number of files normalized at once
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_normalize_args() {
        let cli = Cli::try_parse_from([
            "resfit",
            "normalize",
            "videos",
            "--standard",
            "640x360",
            "--standard",
            "854x480",
            "--policy",
            "below-height",
            "-j",
            "4",
        ])
        .unwrap();

        match cli.command {
            Commands::Normalize(args) => {
                assert_eq!(args.input_dir, PathBuf::from("videos"));
                assert_eq!(args.catalog.standards.len(), 2);
                assert_eq!(SelectionPolicy::from(args.policy), SelectionPolicy::BelowObservedHeight);
                assert_eq!(args.jobs, 4);
                assert!(!args.skip_existing);
            }
            other => panic!("Unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_bad_resolution() {
        assert!(Cli::try_parse_from(["resfit", "plan", "1920X1080"]).is_err());
        assert!(Cli::try_parse_from(["resfit", "plan", "0x1080"]).is_err());
        assert!(Cli::try_parse_from(["resfit", "normalize", "-j", "0"]).is_err());
    }
}
