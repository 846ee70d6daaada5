//! Trait seam between request handlers and the supervisor
//!
//! Handlers depend on [`TimeControl`] rather than on [`Supervisor`](crate::Supervisor)
//! so they can be tested against `MockTimeControl`.

use async_trait::async_trait;

use crate::error::SupervisorResult;
use crate::types::{Confirmation, SupervisorStatus};

/// Control over the fake clock of the managed process
#[mockall::automock]
#[async_trait]
pub trait TimeControl: Send + Sync {
    /// Start the managed process with the ambient time
    async fn launch_initial(&self) -> SupervisorResult<Confirmation>;

    /// Restart the managed process under `fake_time`
    async fn restart_with(&self, fake_time: Option<String>) -> SupervisorResult<Confirmation>;

    /// Current state of the managed process
    async fn status(&self) -> SupervisorStatus;

    /// Stop the managed process
    async fn shutdown(&self) -> SupervisorResult<()>;
}
