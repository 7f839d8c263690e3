use crate::app::models::ResolvedProjectSet;
use anyhow::{Context, Result};
use std::process::Command;

/// Separator TortoiseProc expects between paths in `/path`.
pub const PATH_DELIMITER: char = '*';

const UPDATE_COMMAND: &str = "/command:update";
const CLOSE_ON_SUCCESS: &str = "/closeonend:2";
const PATH_FLAG: &str = "/path";

/// Argument vector for one bulk update, tool executable first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCommand {
    args: Vec<String>,
}

impl UpdateCommand {
    pub fn new(tool_path: &str, projects: &ResolvedProjectSet, close_on_success: bool) -> Self {
        let mut args = vec![tool_path.to_string(), UPDATE_COMMAND.to_string()];
        if close_on_success {
            args.push(CLOSE_ON_SUCCESS.to_string());
        }
        args.push(PATH_FLAG.to_string());
        args.push(join_paths(projects));

        Self { args }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Starts the tool and returns its PID without waiting for it.
    pub fn spawn(&self) -> Result<u32> {
        let (program, rest) = self
            .args
            .split_first()
            .context("Update command is empty")?;

        let child = Command::new(program)
            .args(rest)
            .spawn()
            .with_context(|| format!("Failed to start update tool {}", program))?;
        Ok(child.id())
    }
}

/// Joins project paths with `*`. Paths containing `*` are passed through with a warning.
pub fn join_paths(projects: &ResolvedProjectSet) -> String {
    let parts: Vec<String> = projects
        .paths
        .iter()
        .map(|path| {
            let text = path.to_string_lossy().into_owned();
            if text.contains(PATH_DELIMITER) {
                log::warn!(
                    "⚠️ Project path {} contains '{}'; the update tool will split it.",
                    text,
                    PATH_DELIMITER
                );
            }
            text
        })
        .collect();

    parts.join(PATH_DELIMITER.to_string().as_str())
}
