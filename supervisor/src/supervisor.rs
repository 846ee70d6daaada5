//! Process supervisor with time-injection control
//!
//! Owns at most one [`ManagedProcess`]. All mutation happens while holding
//! the `current` lock, so a restart's stop-then-launch sequence is never
//! interleaved with another restart and two instances never overlap.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

use crate::config::ManagedProcessConfig;
use crate::environment::EnvironmentMap;
use crate::error::SupervisorResult;
use crate::process::ManagedProcess;
use crate::traits::TimeControl;
use crate::types::{Confirmation, FakeTime, SupervisorStatus};
use shared::{process_error, process_info, process_warn, ProcessId};

/// Supervisor for the single managed process
#[derive(Debug)]
pub struct Supervisor {
    config: ManagedProcessConfig,

    /// Currently running process, if any
    current: Mutex<Option<ManagedProcess>>,

    /// Successful launches so far
    launches: AtomicU64,
}

impl Supervisor {
    /// Create an idle supervisor; nothing is launched until asked
    pub fn new(config: ManagedProcessConfig) -> Self {
        Self {
            config,
            current: Mutex::new(None),
            launches: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &ManagedProcessConfig {
        &self.config
    }

    /// Launch the managed binary with the ambient time.
    ///
    /// Meant for startup; if a process is somehow already running it is
    /// retired first so the single-instance rule still holds.
    pub async fn launch_initial(&self) -> SupervisorResult<Confirmation> {
        let mut current = self.current.lock().await;
        self.retire(&mut current).await?;
        self.launch(&mut current, self.config.faketime.ambient(), None)
    }

    /// Restart the managed binary so it observes `fake_time`.
    ///
    /// Missing, empty or NUL-bearing input is rejected before anything is
    /// touched. If the new launch fails the supervisor is left with no process.
    pub async fn restart_with(&self, fake_time: Option<&str>) -> SupervisorResult<Confirmation> {
        let fake_time = FakeTime::parse(fake_time)?;

        let mut current = self.current.lock().await;
        self.retire(&mut current).await?;

        let environment = self.config.faketime.build(&fake_time);
        self.launch(&mut current, environment, Some(fake_time))
    }

    /// Snapshot of the supervised process; an exited process is dropped here
    pub async fn status(&self) -> SupervisorStatus {
        let mut current = self.current.lock().await;

        if let Some(process) = current.as_mut() {
            if !process.is_running() {
                process_warn!(
                    ProcessId::current(),
                    "⚠️ Managed process {} exited on its own",
                    process.pid()
                );
                *current = None;
            }
        }

        let launches = self.launches.load(Ordering::Relaxed);
        match current.as_ref() {
            Some(process) => SupervisorStatus {
                running: true,
                pid: Some(process.pid()),
                fake_time: process.fake_time().map(|t| t.to_string()),
                started_at: Some(process.started_at()),
                launches,
            },
            None => SupervisorStatus {
                launches,
                ..SupervisorStatus::default()
            },
        }
    }

    /// Stop the managed process, leaving the supervisor empty
    pub async fn shutdown(&self) -> SupervisorResult<()> {
        let mut current = self.current.lock().await;
        self.retire(&mut current).await
    }

    /// Terminate and reap the current process; the slot is cleared only on success
    async fn retire(&self, current: &mut Option<ManagedProcess>) -> SupervisorResult<()> {
        if let Some(process) = current.as_mut() {
            let pid = process.pid();
            match process.terminate(self.config.stop_timeout).await {
                Ok(status) => {
                    process_info!(ProcessId::current(), "🛑 Managed process {} exited ({})", pid, status);
                }
                Err(e) => {
                    process_error!(ProcessId::current(), "❌ Could not stop managed process {}: {}", pid, e);
                    return Err(e);
                }
            }
        }

        *current = None;
        Ok(())
    }

    fn launch(
        &self,
        current: &mut Option<ManagedProcess>,
        environment: EnvironmentMap,
        fake_time: Option<FakeTime>,
    ) -> SupervisorResult<Confirmation> {
        let process = match ManagedProcess::spawn(&self.config, environment, fake_time.clone()) {
            Ok(process) => process,
            Err(e) => {
                process_error!(ProcessId::current(), "❌ {}", e);
                return Err(e);
            }
        };

        let confirmation = Confirmation {
            fake_time,
            pid: process.pid(),
        };
        *current = Some(process);
        self.launches.fetch_add(1, Ordering::Relaxed);

        process_info!(
            ProcessId::current(),
            "🚀 Managed process {} running: {}",
            confirmation.pid,
            confirmation.message()
        );
        Ok(confirmation)
    }
}

#[async_trait]
impl TimeControl for Supervisor {
    async fn launch_initial(&self) -> SupervisorResult<Confirmation> {
        Supervisor::launch_initial(self).await
    }

    async fn restart_with(&self, fake_time: Option<String>) -> SupervisorResult<Confirmation> {
        Supervisor::restart_with(self, fake_time.as_deref()).await
    }

    async fn status(&self) -> SupervisorStatus {
        Supervisor::status(self).await
    }

    async fn shutdown(&self) -> SupervisorResult<()> {
        Supervisor::shutdown(self).await
    }
}
