use crate::app::error::PrerequisiteError;
use crate::app::models::AgentStatus;
use std::process::Command;
use std::thread;
use std::time::Duration;
use sysinfo::System;

pub const AGENT_GRACE_PERIOD: Duration = Duration::from_secs(2);

/// Answers whether a process with a given name is currently running.
pub trait ProcessTable {
    fn is_running(&self, name: &str) -> bool;
}

/// Process table backed by the host OS.
pub struct SystemProcessTable;

impl ProcessTable for SystemProcessTable {
    fn is_running(&self, name: &str) -> bool {
        let mut sys = System::new();
        sys.refresh_processes();

        let names: Vec<&str> = sys.processes().values().map(|p| p.name()).collect();
        log::debug!("Found {} running processes", names.len());
        matches_any(names, name)
    }
}

/// Case-insensitive substring match of `needle` against process names.
pub fn matches_any<'a>(names: impl IntoIterator<Item = &'a str>, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    names
        .into_iter()
        .any(|name| name.to_lowercase().contains(&needle))
}

pub struct ProcessGuard<T: ProcessTable> {
    table: T,
    grace_period: Duration,
}

impl<T: ProcessTable> ProcessGuard<T> {
    pub fn new(table: T, grace_period: Duration) -> Self {
        Self {
            table,
            grace_period,
        }
    }

    /// Starts `launch_path` unless `executable_name` is already running.
    ///
    /// With no `launch_args` the agent is left alone: an agent without keys is useless.
    /// A launched agent must still be alive after the grace period.
    pub fn ensure_running(
        &self,
        executable_name: &str,
        launch_path: &str,
        launch_args: &[String],
    ) -> Result<AgentStatus, PrerequisiteError> {
        if self.table.is_running(executable_name) {
            return Ok(AgentStatus::AlreadyRunning);
        }
        if launch_args.is_empty() {
            return Ok(AgentStatus::SkippedNoArgs);
        }

        log::info!("🚀 Starting {}...", launch_path);
        let mut child = Command::new(launch_path)
            .args(launch_args)
            .spawn()
            .map_err(|source| PrerequisiteError::AgentSpawn {
                path: launch_path.to_string(),
                source,
            })?;

        thread::sleep(self.grace_period);

        match child.try_wait() {
            Ok(None) => Ok(AgentStatus::Started { pid: child.id() }),
            Ok(Some(status)) => Err(PrerequisiteError::AgentExited {
                path: launch_path.to_string(),
                code: status.code(),
            }),
            Err(source) => Err(PrerequisiteError::AgentSpawn {
                path: launch_path.to_string(),
                source,
            }),
        }
    }
}
