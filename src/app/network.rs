use crate::app::error::PrerequisiteError;
use std::process::Command;

/// Runs the configured DNS cache flush command once.
pub struct DnsFlusher {
    command: Vec<String>,
}

impl DnsFlusher {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }

    /// Returns `Ok(false)` when no command is configured.
    pub fn flush(&self) -> Result<bool, PrerequisiteError> {
        let Some((program, args)) = self.command.split_first() else {
            return Ok(false);
        };

        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|source| PrerequisiteError::FlushSpawn {
                command: self.command_line(),
                source,
            })?;

        if status.success() {
            Ok(true)
        } else {
            Err(PrerequisiteError::FlushFailed {
                command: self.command_line(),
                code: status.code(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flusher(parts: &[&str]) -> DnsFlusher {
        DnsFlusher::new(parts.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn empty_command_is_skipped() {
        assert!(!flusher(&[]).flush().unwrap());
    }

    #[test]
    fn unknown_program_is_spawn_error() {
        let err = flusher(&["/nonexistent/flushdns"]).flush().unwrap_err();
        assert!(matches!(err, PrerequisiteError::FlushSpawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn exit_status_decides_outcome() {
        assert!(flusher(&["true"]).flush().unwrap());

        let err = flusher(&["sh", "-c", "exit 4"]).flush().unwrap_err();
        match err {
            PrerequisiteError::FlushFailed { command, code } => {
                assert_eq!(command, "sh -c exit 4");
                assert_eq!(code, Some(4));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
