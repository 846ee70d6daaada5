//! Command line and environment configuration

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use supervisor::config::{DEFAULT_ARGS, DEFAULT_PROGRAM, DEFAULT_WORKING_DIR};
use supervisor::environment::DEFAULT_FAKETIME_LIBRARY;
use supervisor::ManagedProcessConfig;

/// Every flag can also be set through the named environment variable or a `.env` file
#[derive(Parser, Debug, Clone)]
#[command(name = "time-controller")]
#[command(about = "Restarts a managed process under a libfaketime clock on request")]
pub struct Args {
    /// Address the control endpoint listens on
    #[arg(long, env = "TIME_CONTROLLER_BIND", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    /// Managed binary; relative paths with a separator resolve against --working-dir
    #[arg(long, env = "MANAGED_PROGRAM", default_value = DEFAULT_PROGRAM)]
    pub program: PathBuf,

    /// Working directory of the managed binary
    #[arg(long, env = "MANAGED_WORKING_DIR", default_value = DEFAULT_WORKING_DIR)]
    pub working_dir: PathBuf,

    /// libfaketime shared object preloaded into the managed binary
    #[arg(long, env = "FAKETIME_LIBRARY", default_value = DEFAULT_FAKETIME_LIBRARY)]
    pub faketime_library: PathBuf,

    /// Seconds to wait after SIGTERM before sending SIGKILL
    #[arg(long, env = "STOP_TIMEOUT_SECS", default_value_t = 10)]
    pub stop_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Arguments for the managed binary, after `--` (default: --config circles)
    #[arg(last = true)]
    pub managed_args: Vec<String>,
}

impl Args {
    /// Supervisor configuration described by these arguments
    pub fn managed_process_config(&self) -> ManagedProcessConfig {
        let args: Vec<String> = if self.managed_args.is_empty() {
            DEFAULT_ARGS.iter().map(|arg| arg.to_string()).collect()
        } else {
            self.managed_args.clone()
        };

        ManagedProcessConfig::new(&self.program)
            .with_args(args)
            .with_working_dir(&self.working_dir)
            .with_stop_timeout(Duration::from_secs(self.stop_timeout_secs))
            .with_faketime_library(&self.faketime_library)
    }
}
