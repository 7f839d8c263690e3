use thiserror::Error;

/// Failures that must stop the run before any project is updated.
#[derive(Debug, Error)]
pub enum PrerequisiteError {
    #[error("Failed to start {path}: {source}")]
    AgentSpawn {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} exited right after launch with code {}", display_code(.code))]
    AgentExited { path: String, code: Option<i32> },
    #[error("Failed to run `{command}`: {source}")]
    FlushSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` failed with code {}", display_code(.code))]
    FlushFailed { command: String, code: Option<i32> },
}

fn display_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "none (terminated by signal)".to_string(), |c| c.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_include_exit_code() {
        let err = PrerequisiteError::AgentExited {
            path: "pageant.exe".to_string(),
            code: Some(1),
        };
        assert_eq!(
            err.to_string(),
            "pageant.exe exited right after launch with code 1"
        );

        let err = PrerequisiteError::FlushFailed {
            command: "ipconfig /flushdns".to_string(),
            code: None,
        };
        assert!(err.to_string().contains("terminated by signal"));
    }
}
