//! Handle for the single managed child process
//!
//! The child is started as the leader of a new process group so that
//! termination signals also reach anything it spawns. Stopping is explicit
//! via [`ManagedProcess::terminate`]; a handle dropped before it was
//! terminated kills the whole group, even if the leader already exited.

use chrono::{DateTime, Utc};
use nix::errno::Errno;
use nix::sys::signal::{Signal, killpg};
use nix::unistd::Pid;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::process::{Child, Command};
use tokio::time::Instant;

use crate::config::ManagedProcessConfig;
use crate::environment::EnvironmentMap;
use crate::error::{SupervisorError, SupervisorResult};
use crate::types::FakeTime;
use shared::{process_debug, process_warn, ProcessId};

/// How often an emptying process group is re-checked
const GROUP_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// A running instance of the managed binary
#[derive(Debug)]
pub struct ManagedProcess {
    child: Child,
    pid: u32,
    environment: EnvironmentMap,
    fake_time: Option<FakeTime>,
    started_at: DateTime<Utc>,
    /// Set once `terminate` has emptied the group
    retired: bool,
}

impl ManagedProcess {
    /// Launch the configured binary with exactly `environment`.
    ///
    /// Returns as soon as the process has been exec'd; readiness is not awaited.
    pub fn spawn(
        config: &ManagedProcessConfig,
        environment: EnvironmentMap,
        fake_time: Option<FakeTime>,
    ) -> SupervisorResult<Self> {
        let program = config.resolved_program();

        let mut cmd = Command::new(&program);
        cmd.args(&config.args)
            .current_dir(&config.working_dir)
            .env_clear()
            .envs(environment.iter())
            .process_group(0)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let child = cmd
            .spawn()
            .map_err(|e| SupervisorError::launch(program.display().to_string(), e))?;

        let pid = child.id().ok_or_else(|| {
            SupervisorError::launch(
                program.display().to_string(),
                std::io::Error::other("process exited before its pid was read"),
            )
        })?;

        process_debug!(
            ProcessId::current(),
            "🧭 Spawned {} (PID: {}) in {}",
            program.display(),
            pid,
            config.working_dir.display()
        );

        Ok(Self {
            child,
            pid,
            environment,
            fake_time,
            started_at: Utc::now(),
            retired: false,
        })
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// The process leads its own group, so the group id equals the pid
    pub fn pgid(&self) -> Pid {
        Pid::from_raw(self.pid as i32)
    }

    pub fn environment(&self) -> &EnvironmentMap {
        &self.environment
    }

    pub fn fake_time(&self) -> Option<&FakeTime> {
        self.fake_time.as_ref()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Check if the process is still running (reaps it if it has exited)
    pub fn is_running(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    /// Stop the process group and reap the leader.
    ///
    /// The group is signalled even when the leader has already exited, so
    /// anything it left running is retired too. Sends SIGTERM, gives the
    /// group up to `grace` to empty, then escalates to SIGKILL. On error the
    /// handle is left as it was so the caller can keep tracking it.
    pub async fn terminate(&mut self, grace: Duration) -> SupervisorResult<ExitStatus> {
        let deadline = Instant::now() + grace;

        self.signal_group(Signal::SIGTERM)?;

        let status = match tokio::time::timeout_at(deadline, self.child.wait()).await {
            Ok(status) => status?,
            Err(_) => {
                process_warn!(
                    ProcessId::current(),
                    "🔨 Managed process {} ignored SIGTERM for {:?}, sending SIGKILL",
                    self.pid,
                    grace
                );
                self.signal_group(Signal::SIGKILL)?;
                self.child.wait().await?
            }
        };

        if !self.wait_for_group_exit(deadline).await {
            process_warn!(
                ProcessId::current(),
                "🔨 Process group {} outlived its leader, sending SIGKILL",
                self.pid
            );
            self.signal_group(Signal::SIGKILL)?;
        }

        self.retired = true;
        Ok(status)
    }

    fn signal_group(&self, signal: Signal) -> SupervisorResult<()> {
        match killpg(self.pgid(), signal) {
            Ok(()) => Ok(()),
            // Group already empty
            Err(Errno::ESRCH) => Ok(()),
            Err(errno) => Err(SupervisorError::termination(
                self.pid,
                format!("{signal} delivery failed: {errno}"),
            )),
        }
    }

    /// Whether any member of the process group still exists
    fn group_exists(&self) -> bool {
        killpg(self.pgid(), None).is_ok()
    }

    /// Poll until the group is empty; false if `deadline` passes first
    async fn wait_for_group_exit(&self, deadline: Instant) -> bool {
        loop {
            if !self.group_exists() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(GROUP_POLL_INTERVAL).await;
        }
    }
}

impl Drop for ManagedProcess {
    fn drop(&mut self) {
        if self.retired {
            return;
        }
        if self.is_running() {
            process_warn!(
                ProcessId::current(),
                "⚠️ Managed process {} dropped while running, killing its process group",
                self.pid
            );
        }
        // The leader may be gone while processes it spawned are not
        let _ = killpg(self.pgid(), Signal::SIGKILL);
    }
}
