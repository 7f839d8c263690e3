use crate::app::models::ConfigSource;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "mordate.json";

/// Operator settings read from `mordate.json`. Missing keys keep their defaults.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Configuration {
    #[serde(rename = "pageant_path")]
    pub agent_path: String,
    #[serde(rename = "pageant_params")]
    pub agent_args: Vec<String>,
    #[serde(rename = "tortoise_path")]
    pub update_tool_path: String,
    #[serde(rename = "projects_filename")]
    pub default_list_filename: String,
    /// Program followed by its arguments. Empty disables the flush.
    pub flush_dns_command: Vec<String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            agent_path: r"C:\Program Files\Five-BN\putty\PAGEANT.EXE".to_string(),
            agent_args: Vec::new(),
            update_tool_path: r"C:\Program Files\TortoiseSVN\bin\TortoiseProc.exe".to_string(),
            default_list_filename: "projects.txt".to_string(),
            flush_dns_command: default_flush_command(),
        }
    }
}

#[cfg(windows)]
fn default_flush_command() -> Vec<String> {
    vec!["ipconfig".to_string(), "/flushdns".to_string()]
}

#[cfg(not(windows))]
fn default_flush_command() -> Vec<String> {
    vec!["resolvectl".to_string(), "flush-caches".to_string()]
}

impl Configuration {
    /// File name of the agent executable, used to look it up in the process table.
    pub fn agent_executable_name(&self) -> String {
        // Windows-style separators appear in configs regardless of host.
        self.agent_path
            .rsplit(|c: char| c == '\\' || c == '/')
            .next()
            .unwrap_or(self.agent_path.as_str())
            .to_string()
    }

    /// The default list file, relative names resolved against `base_dir`.
    pub fn default_list_file(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.default_list_filename)
    }
}

/// Reads `mordate.json` from `base_dir`. Never fails: any problem falls back to defaults.
pub fn load(base_dir: &Path) -> (Configuration, ConfigSource) {
    let config_path = base_dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        log::warn!(
            "⚠️ Config {} not found, using defaults.",
            config_path.display()
        );
        return (Configuration::default(), ConfigSource::Defaults);
    }

    match read_config(&config_path) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            (config, ConfigSource::File(config_path))
        }
        Err(err) => {
            log::warn!("⚠️ {:#}. Using defaults.", err);
            (Configuration::default(), ConfigSource::Defaults)
        }
    }
}

fn read_config(path: &Path) -> Result<Configuration> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    let config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let (config, source) = load(dir.path());
        assert_eq!(source, ConfigSource::Defaults);
        assert_eq!(config.agent_path, r"C:\Program Files\Five-BN\putty\PAGEANT.EXE");
        assert!(config.agent_args.is_empty());
        assert_eq!(config.default_list_filename, "projects.txt");
    }

    #[test]
    fn malformed_file_uses_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{ \"pageant_path\": ").unwrap();
        let (config, source) = load(dir.path());
        assert_eq!(source, ConfigSource::Defaults);
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{ "pageant_params": ["C:\\keys\\work.ppk"], "projects_filename": "svn.txt" }"#,
        )
        .unwrap();

        let (config, source) = load(dir.path());
        assert_eq!(source, ConfigSource::File(dir.path().join(CONFIG_FILENAME)));
        assert_eq!(config.agent_args, vec![r"C:\keys\work.ppk".to_string()]);
        assert_eq!(config.default_list_filename, "svn.txt");
        assert_eq!(config.update_tool_path, Configuration::default().update_tool_path);
        assert_eq!(config.flush_dns_command, default_flush_command());
    }

    #[test]
    fn agent_name_handles_both_separators() {
        let mut config = Configuration::default();
        assert_eq!(config.agent_executable_name(), "PAGEANT.EXE");
        config.agent_path = "/usr/bin/ssh-agent".to_string();
        assert_eq!(config.agent_executable_name(), "ssh-agent");
    }

    #[test]
    fn default_list_file_is_relative_to_base_dir() {
        let config = Configuration::default();
        assert_eq!(
            config.default_list_file(Path::new("/opt/mordate")),
            PathBuf::from("/opt/mordate/projects.txt")
        );
    }
}
