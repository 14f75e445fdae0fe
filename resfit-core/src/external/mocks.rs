// resfit-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

// Compiled for unit tests and when the "test-mocks" feature is enabled.
#![cfg(any(test, feature = "test-mocks"))]

use super::{FfmpegProcess, FfmpegSpawner, FfprobeExecutor};
use crate::error::{CoreError, CoreResult};
use crate::resolution::Resolution;

use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::collections::HashMap;
use std::os::unix::process::ExitStatusExt; // For ExitStatus::from_raw
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::{Arc, Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Mock implementation of FfmpegProcess.
#[derive(Clone)]
pub struct MockFfmpegProcess {
    /// Events to emit when handle_events is called.
    pub events_to_emit: Vec<FfmpegEvent>,
    /// Exit status to return when wait is called.
    pub exit_status: ExitStatus,
}

impl FfmpegProcess for MockFfmpegProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        for event in self.events_to_emit.drain(..) {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        Ok(self.exit_status)
    }
}

/// Represents an expected ffmpeg command call and its mock result.
pub struct MockFfmpegExpectation {
    pub arg_pattern: String,
    pub result: CoreResult<MockFfmpegProcess>,
    pub create_dummy_output: bool,
}

/// Mock implementation of FfmpegSpawner supporting multiple expectations.
///
/// Each spawned command is matched against the first pending expectation
/// whose pattern is a substring of any argument; the expectation is then
/// consumed. Commands with no matching expectation panic.
#[derive(Clone, Default)]
pub struct MockFfmpegSpawner {
    expectations: Arc<Mutex<Vec<MockFfmpegExpectation>>>,
    received_calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MockFfmpegSpawner {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_expectation(
        &self,
        arg_pattern: &str,
        result: CoreResult<MockFfmpegProcess>,
        create_dummy_output: bool,
    ) {
        lock(&self.expectations).push(MockFfmpegExpectation {
            arg_pattern: arg_pattern.to_string(),
            result,
            create_dummy_output,
        });
    }

    pub fn add_success_expectation(&self, arg_pattern: &str, create_dummy_output: bool) {
        let process = MockFfmpegProcess {
            events_to_emit: Vec::new(),
            exit_status: ExitStatus::from_raw(0),
        };
        self.add_expectation(arg_pattern, Ok(process), create_dummy_output);
    }

    pub fn add_spawn_error_expectation(&self, arg_pattern: &str, error: CoreError) {
        self.add_expectation(arg_pattern, Err(error), false);
    }

    /// Expects a command that runs, emits `events`, and exits with `exit_code`.
    ///
    /// `exit_code` is the process exit code, encoded as a raw wait status.
    pub fn add_exit_error_expectation(
        &self,
        arg_pattern: &str,
        events: Vec<FfmpegEvent>,
        exit_code: i32,
    ) {
        let process = MockFfmpegProcess {
            events_to_emit: events,
            exit_status: ExitStatus::from_raw(exit_code << 8),
        };
        self.add_expectation(arg_pattern, Ok(process), false);
    }

    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        lock(&self.received_calls).clone()
    }

    pub fn pending_expectations(&self) -> usize {
        lock(&self.expectations).len()
    }
}

impl FfmpegSpawner for MockFfmpegSpawner {
    type Process = MockFfmpegProcess;

    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let args: Vec<String> = cmd
            .get_args()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        lock(&self.received_calls).push(args.clone());

        let expectation = {
            let mut expectations = lock(&self.expectations);
            let found_index = expectations
                .iter()
                .position(|exp| args.iter().any(|arg| arg.contains(&exp.arg_pattern)));
            match found_index {
                Some(index) => expectations.remove(index),
                None => {
                    log::error!("MockFfmpegSpawner: No expectation found for command args: {:?}", args);
                    panic!("MockFfmpegSpawner: No expectation found for command args: {:?}", args);
                }
            }
        };
        log::info!(
            "MockFfmpegSpawner: Matched expectation with pattern '{}'",
            expectation.arg_pattern
        );

        let process = expectation.result?;
        if expectation.create_dummy_output {
            match args.last() {
                Some(output_path_str) => {
                    let output_path = PathBuf::from(output_path_str);
                    if let Some(parent) = output_path.parent() {
                        if let Err(e) = std::fs::create_dir_all(parent) {
                            log::error!("MockFfmpegSpawner failed to create parent dir {:?}: {}", parent, e);
                        }
                    }
                    if let Err(e) = std::fs::write(&output_path, b"mock output") {
                        log::error!("MockFfmpegSpawner failed to create dummy output file {:?}: {}", output_path, e);
                    }
                }
                None => log::warn!("MockFfmpegSpawner couldn't find output path in args to create dummy file."),
            }
        }
        Ok(process)
    }
}

/// Mock implementation of FfprobeExecutor.
///
/// Errors are stored as messages and returned as `CoreError::Probe`, since
/// `CoreError` is not `Clone`.
#[derive(Clone, Default)]
pub struct MockFfprobeExecutor {
    results: Arc<Mutex<HashMap<PathBuf, Result<Resolution, String>>>>,
    probed: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockFfprobeExecutor {
    pub fn new() -> Self {
        Default::default()
    }

    /// Makes `probe_resolution(input_path)` return `resolution`.
    pub fn expect_resolution(&self, input_path: &Path, resolution: Resolution) {
        lock(&self.results).insert(input_path.to_path_buf(), Ok(resolution));
    }

    /// Makes `probe_resolution(input_path)` fail with `message`.
    pub fn expect_probe_error(&self, input_path: &Path, message: &str) {
        lock(&self.results).insert(input_path.to_path_buf(), Err(message.to_string()));
    }

    pub fn probed_paths(&self) -> Vec<PathBuf> {
        lock(&self.probed).clone()
    }
}

impl FfprobeExecutor for MockFfprobeExecutor {
    fn probe_resolution(&self, input_path: &Path) -> CoreResult<Resolution> {
        log::info!("MockFfprobeExecutor::probe_resolution called for: {}", input_path.display());
        lock(&self.probed).push(input_path.to_path_buf());
        match lock(&self.results).get(input_path) {
            Some(Ok(resolution)) => Ok(*resolution),
            Some(Err(message)) => Err(CoreError::Probe(message.clone())),
            None => Err(CoreError::Probe(format!(
                "MockFfprobeExecutor: No expectation set for path {}",
                input_path.display()
            ))),
        }
    }
}
