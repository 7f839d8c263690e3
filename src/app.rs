// Declare modules
pub mod cli;
pub mod config;
pub mod error;
pub mod launcher;
pub mod models;
pub mod network;
pub mod process;
pub mod resolver;

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use self::cli::Cli;
use self::config::Configuration;
use self::error::PrerequisiteError;
use self::launcher::UpdateCommand;
use self::models::{AgentStatus, ConfigSource, ExitStatus};
use self::network::DnsFlusher;
use self::process::{ProcessGuard, SystemProcessTable, AGENT_GRACE_PERIOD};
use self::resolver::ProjectResolver;

/// Side effects of a run, kept behind a trait so dry runs and tests can stand in.
pub trait Host {
    fn ensure_agent(&mut self, config: &Configuration) -> Result<AgentStatus, PrerequisiteError>;
    /// Returns `Ok(false)` when the flush was skipped.
    fn flush_dns(&mut self, config: &Configuration) -> Result<bool, PrerequisiteError>;
    fn launch_update(&mut self, command: &UpdateCommand) -> Result<()>;
}

/// Starts real processes.
pub struct SystemHost {
    guard: ProcessGuard<SystemProcessTable>,
}

impl SystemHost {
    pub fn new() -> Self {
        Self {
            guard: ProcessGuard::new(SystemProcessTable, AGENT_GRACE_PERIOD),
        }
    }
}

impl Host for SystemHost {
    fn ensure_agent(&mut self, config: &Configuration) -> Result<AgentStatus, PrerequisiteError> {
        let agent = config.agent_executable_name();
        let status = self
            .guard
            .ensure_running(&agent, &config.agent_path, &config.agent_args)?;
        match status {
            AgentStatus::Started { pid } => log::info!("🔑 {} started (PID {}).", agent, pid),
            AgentStatus::AlreadyRunning => log::info!("🔑 {} already running.", agent),
            AgentStatus::SkippedNoArgs => {
                log::info!("🔑 No keys configured for {}, not starting it.", agent)
            }
        }
        Ok(status)
    }

    fn flush_dns(&mut self, config: &Configuration) -> Result<bool, PrerequisiteError> {
        let flusher = DnsFlusher::new(config.flush_dns_command.clone());
        let flushed = flusher.flush()?;
        if flushed {
            log::info!("🌐 DNS cache flushed ({}).", flusher.command_line());
        } else {
            log::info!("🌐 No DNS flush command configured.");
        }
        Ok(flushed)
    }

    fn launch_update(&mut self, command: &UpdateCommand) -> Result<()> {
        let pid = command.spawn()?;
        log::debug!("Update tool running with PID {}", pid);
        Ok(())
    }
}

/// Prints the update command and touches nothing else.
pub struct DryRunHost;

impl Host for DryRunHost {
    fn ensure_agent(&mut self, config: &Configuration) -> Result<AgentStatus, PrerequisiteError> {
        log::info!("[dry-run] Would make sure {} is running", config.agent_path);
        Ok(AgentStatus::SkippedNoArgs)
    }

    fn flush_dns(&mut self, config: &Configuration) -> Result<bool, PrerequisiteError> {
        log::info!("[dry-run] Would run `{}`", config.flush_dns_command.join(" "));
        Ok(false)
    }

    fn launch_update(&mut self, command: &UpdateCommand) -> Result<()> {
        for arg in command.args() {
            println!("{}", arg);
        }
        Ok(())
    }
}

/// Per-invocation inputs.
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    pub scan_dirs: Vec<PathBuf>,
    pub list_files: Vec<PathBuf>,
    pub close_on_success: bool,
}

/// Runs agent check, DNS flush, project resolution and update launch in order.
pub struct Orchestrator<H: Host> {
    host: H,
    install_dir: PathBuf,
}

impl<H: Host> Orchestrator<H> {
    pub fn new(host: H, install_dir: PathBuf) -> Self {
        Self { host, install_dir }
    }

    pub fn run(&mut self, request: &RunRequest) -> Result<ExitStatus> {
        let (config, source) = config::load(&self.install_dir);

        if let Err(err) = self.prepare(&config) {
            log::error!("❌ {}", err);
            return Ok(ExitStatus::PrerequisiteFailed);
        }

        let default_list = config.default_list_file(&self.install_dir);
        let resolver = ProjectResolver::new(&request.scan_dirs, &request.list_files, &default_list);
        log::debug!("Reading project lists {:?}", resolver.list_files());
        let projects = resolver.resolve();

        if !projects.is_empty() {
            log::info!("📦 Updating {} project(s):", projects.len());
            for path in &projects.paths {
                log::info!("  {}", path.display());
            }
            let command =
                UpdateCommand::new(&config.update_tool_path, &projects, request.close_on_success);
            self.host.launch_update(&command)?;
            log::info!("✅ Done.");
        }

        Ok(match source {
            ConfigSource::File(path) => {
                log::debug!("Run finished with settings from {}", path.display());
                ExitStatus::Success
            }
            ConfigSource::Defaults => ExitStatus::ConfigFallback,
        })
    }

    fn prepare(&mut self, config: &Configuration) -> Result<(), PrerequisiteError> {
        self.host.ensure_agent(config)?;
        self.host.flush_dns(config)?;
        Ok(())
    }
}

/// Directory holding the running executable.
fn install_dir() -> Result<PathBuf> {
    let exe = env::current_exe().context("Failed to locate the running executable")?;
    exe.parent()
        .map(|p| p.to_path_buf())
        .context("Executable has no parent directory")
}

/// Initializes components and orchestrates data flow.
pub fn run(args: Cli) -> Result<ExitStatus> {
    let install_dir = match args.config_dir.clone() {
        Some(dir) => dir,
        None => install_dir()?,
    };

    let request = RunRequest {
        scan_dirs: args.scan_dirs,
        list_files: args.list_files,
        close_on_success: !args.no_close,
    };

    if args.dry_run {
        Orchestrator::new(DryRunHost, install_dir).run(&request)
    } else {
        Orchestrator::new(SystemHost::new(), install_dir).run(&request)
    }
}
