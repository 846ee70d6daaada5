//! Supervisor library for running a single process under a fake clock
//!
//! This library owns the lifecycle of one managed child process. Each restart
//! retires the running instance (SIGTERM to its process group, reap, SIGKILL
//! after a grace period) and relaunches the binary with an environment that
//! preloads libfaketime so every time syscall reports the requested time.

pub mod config;
pub mod environment;
pub mod error;
pub mod process;
pub mod supervisor;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::ManagedProcessConfig;
pub use environment::{EnvironmentMap, FakeTimeEnvironment};
pub use error::{SupervisorError, SupervisorResult};
pub use process::ManagedProcess;
pub use supervisor::Supervisor;
pub use traits::{MockTimeControl, TimeControl};
pub use types::{Confirmation, FakeTime, SupervisorStatus};
