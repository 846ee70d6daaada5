//! Test helpers for supervisor integration tests

#![allow(dead_code)]

use nix::sys::signal::kill;
use nix::unistd::Pid;
use std::collections::HashMap;
use std::time::Duration;
use tempfile::TempDir;

use supervisor::ManagedProcessConfig;

/// Grace period used by tests; short enough to keep escalation tests quick
pub const TEST_STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Config that runs `sleep 30` inside a fresh temporary directory
pub fn sleeper_config(dir: &TempDir) -> ManagedProcessConfig {
    ManagedProcessConfig::new("sleep")
        .with_args(["30"])
        .with_working_dir(dir.path())
        .with_stop_timeout(TEST_STOP_TIMEOUT)
        .with_faketime_library("")
}

/// Config for a shell loop that ignores SIGTERM (and so do its children)
pub fn stubborn_config(dir: &TempDir, stop_timeout: Duration) -> ManagedProcessConfig {
    ManagedProcessConfig::new("sh")
        .with_args(["-c", "trap '' TERM; while true; do sleep 1; done"])
        .with_working_dir(dir.path())
        .with_stop_timeout(stop_timeout)
        .with_faketime_library("")
}

/// Config for a shell that backgrounds `sleep 30`, records its pid in
/// `child.pid` and exits, leaving the sleeper alone in the process group
pub fn orphaning_config(dir: &TempDir, stop_timeout: Duration) -> ManagedProcessConfig {
    ManagedProcessConfig::new("sh")
        .with_args(["-c", "sleep 30 & echo $! > child.pid; exit 0"])
        .with_working_dir(dir.path())
        .with_stop_timeout(stop_timeout)
        .with_faketime_library("")
}

/// Wait for the pid written by [`orphaning_config`]
pub async fn read_child_pid(dir: &TempDir) -> u32 {
    let path = dir.path().join("child.pid");
    for _ in 0..100 {
        if let Some(pid) = std::fs::read_to_string(&path)
            .ok()
            .and_then(|raw| raw.trim().parse().ok())
        {
            return pid;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("no pid recorded in {}", path.display());
}

/// Whether the process exists and is not a zombie.
///
/// Orphans are reparented away from the test, so a killed one may linger as
/// a zombie that [`is_alive`] still reports.
pub fn is_running(pid: u32) -> bool {
    match std::fs::read_to_string(format!("/proc/{pid}/stat")) {
        Ok(stat) => stat
            .rsplit_once(')')
            .map(|(_, rest)| !rest.trim_start().starts_with('Z'))
            .unwrap_or(false),
        Err(_) => false,
    }
}

/// Whether a (non-reaped) process with this pid exists
pub fn is_alive(pid: u32) -> bool {
    kill(Pid::from_raw(pid as i32), None).is_ok()
}

/// Environment of a live process as reported by procfs
pub fn read_environ(pid: u32) -> HashMap<String, String> {
    let raw = std::fs::read(format!("/proc/{pid}/environ")).expect("readable /proc environ");
    raw.split(|byte| *byte == 0)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| {
            let entry = String::from_utf8_lossy(entry);
            entry
                .split_once('=')
                .map(|(key, value)| (key.to_string(), value.to_string()))
        })
        .collect()
}
