use std::path::PathBuf;
use std::process::ExitCode;

/// Ordered project roots handed to the update tool. Not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedProjectSet {
    pub paths: Vec<PathBuf>,
}

impl ResolvedProjectSet {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }
}

/// Outcome of making sure the key agent is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentStatus {
    Started { pid: u32 },
    AlreadyRunning,
    SkippedNoArgs,
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Internal,
    PrerequisiteFailed,
    ConfigFallback,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Internal => 1,
            ExitStatus::PrerequisiteFailed => 2,
            ExitStatus::ConfigFallback => 3,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}
