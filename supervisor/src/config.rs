//! Configuration of the managed binary

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::environment::FakeTimeEnvironment;

/// Default managed binary, relative to the working directory
pub const DEFAULT_PROGRAM: &str = "./Nethermind.Runner";
pub const DEFAULT_WORKING_DIR: &str = "/nethermind";
pub const DEFAULT_ARGS: [&str; 2] = ["--config", "circles"];
/// Grace period between SIGTERM and SIGKILL when retiring a process
pub const DEFAULT_STOP_TIMEOUT: Duration = Duration::from_secs(10);

/// Deployment constants for the supervised process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedProcessConfig {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    pub stop_timeout: Duration,
    pub faketime: FakeTimeEnvironment,
}

impl Default for ManagedProcessConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
            args: DEFAULT_ARGS.iter().map(|arg| arg.to_string()).collect(),
            working_dir: PathBuf::from(DEFAULT_WORKING_DIR),
            stop_timeout: DEFAULT_STOP_TIMEOUT,
            faketime: FakeTimeEnvironment::default(),
        }
    }
}

impl ManagedProcessConfig {
    /// Config for `program` with no arguments and the default working directory
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            ..Self::default()
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_working_dir(mut self, working_dir: impl Into<PathBuf>) -> Self {
        self.working_dir = working_dir.into();
        self
    }

    pub fn with_stop_timeout(mut self, stop_timeout: Duration) -> Self {
        self.stop_timeout = stop_timeout;
        self
    }

    pub fn with_faketime_library(mut self, library: impl Into<PathBuf>) -> Self {
        self.faketime = self.faketime.with_library(library);
        self
    }

    /// Program path as it will be executed.
    ///
    /// Relative paths containing a separator (`./Nethermind.Runner`) are
    /// resolved against the working directory; bare names go through `PATH`.
    pub fn resolved_program(&self) -> PathBuf {
        if self.program.is_relative() && self.program.components().count() > 1 {
            self.working_dir.join(&self.program)
        } else {
            self.program.clone()
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}
