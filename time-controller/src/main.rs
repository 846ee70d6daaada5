//! Time controller entry point
//!
//! Launches the managed binary with the ambient clock, then serves the
//! control endpoint until Ctrl+C/SIGTERM, stopping the managed process on exit.

use clap::Parser;
use std::sync::Arc;

use shared::{logging, process_debug, ProcessId};
use supervisor::Supervisor;
use time_controller::{shutdown_signal, Args, ControlServer, ControllerResult};

#[tokio::main]
async fn main() -> ControllerResult<()> {
    // .env values fill in anything not already set in the environment
    let _ = dotenv::dotenv();
    let args = Args::parse();

    ProcessId::init_controller();
    logging::init_tracing_with_level(Some(&args.log_level))?;

    let config = args.managed_process_config();
    logging::log_startup(
        ProcessId::current(),
        &format!("time controller for {}", config.resolved_program().display()),
    );
    process_debug!(ProcessId::current(), "Managed process config: {:?}", config);

    let supervisor = Arc::new(Supervisor::new(config));

    // The endpoint still comes up on failure so a later /set_time can recover
    match supervisor.launch_initial().await {
        Ok(confirmation) => logging::log_success(ProcessId::current(), &confirmation.message()),
        Err(e) => logging::log_error(ProcessId::current(), "Initial launch", &e),
    }

    let server = ControlServer::new(args.bind, supervisor.clone());
    let served = server.run(shutdown_signal()).await;

    if let Err(e) = supervisor.shutdown().await {
        logging::log_error(ProcessId::current(), "Stopping managed process", &e);
    }

    served?;
    logging::log_success(ProcessId::current(), "Time controller stopped gracefully");
    Ok(())
}
