// ============================================================================
// resfit-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: console logging, optionally mirrored to a file
//
// Everything the tool prints goes through the `log` macros, including the
// styled terminal helpers from resfit_core::terminal. Without --log-dir
// env_logger writes to stderr; with it, fern fans each record out to stderr
// and to resfit_{command}_{timestamp}.log with ANSI codes stripped.
//
// USAGE:
// - default: info and above
// - --verbose: debug and above
// - RUST_LOG overrides both when set (console-only mode)

use crate::error::{CliErrorContext, CliResult};

use log::LevelFilter;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Name of the log file for `command` started at `timestamp`.
pub fn log_file_name(command: &str, timestamp: &str) -> String {
    format!("resfit_{command}_{timestamp}.log")
}

fn level_for(verbose: bool) -> LevelFilter {
    if verbose { LevelFilter::Debug } else { LevelFilter::Info }
}

/// Installs the global logger.
///
/// Returns the log file path when `log_dir` is given.
pub fn init_logging(verbose: bool, log_dir: Option<&Path>, command: &str) -> CliResult<Option<PathBuf>> {
    let level = level_for(verbose);

    let Some(log_dir) = log_dir else {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(level.as_str().to_ascii_lowercase()),
        )
        .format(|buf, record| {
            // Info lines are user-facing output; other levels carry a tag.
            if record.level() == log::Level::Info {
                writeln!(buf, "{}", record.args())
            } else {
                let style = buf.default_level_style(record.level());
                writeln!(buf, "{style}{:<5}{style:#} {}", record.level(), record.args())
            }
        })
        .init();
        return Ok(None);
    };

    std::fs::create_dir_all(log_dir)
        .cli_with_context(|| format!("Failed to create log directory '{}'", log_dir.display()))?;
    let log_path = log_dir.join(log_file_name(command, &get_timestamp()));
    let log_file = fern::log_file(&log_path)
        .cli_with_context(|| format!("Failed to open log file '{}'", log_path.display()))?;

    let console = fern::Dispatch::new()
        .format(|out, message, record| {
            if record.level() == log::Level::Info {
                out.finish(format_args!("{message}"))
            } else {
                out.finish(format_args!("{:<5} {message}", record.level()))
            }
        })
        .chain(std::io::stderr());

    let file = fern::Dispatch::new()
        .format(|out, message, record| {
            let plain = strip_ansi_escapes::strip_str(message.to_string());
            out.finish(format_args!(
                "{} {:<5} {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                plain
            ))
        })
        .chain(log_file);

    fern::Dispatch::new()
        .level(level)
        .chain(console)
        .chain(file)
        .apply()
        .map_err(|e| resfit_core::CoreError::OperationFailed(format!("Failed to initialize logging: {e}")))?;

    Ok(Some(log_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_name() {
        assert_eq!(
            log_file_name("normalize", "20240601_123045"),
            "resfit_normalize_20240601_123045.log"
        );
    }

    #[test]
    fn test_timestamp_shape() {
        let ts = get_timestamp();
        assert_eq!(ts.len(), 15);
        assert_eq!(ts.as_bytes()[8], b'_');
        assert!(ts.chars().filter(|c| *c != '_').all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(true), LevelFilter::Debug);
        assert_eq!(level_for(false), LevelFilter::Info);
    }
}
