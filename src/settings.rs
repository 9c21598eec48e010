use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SESSION_IDLE_MINUTES};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub session_idle_minutes: u32,
    #[serde(default)]
    pub auto_open_browser: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            session_idle_minutes: DEFAULT_SESSION_IDLE_MINUTES,
            auto_open_browser: false,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Reads `key = value` lines; unknown keys and unparsable values keep their defaults.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut settings = Settings::default();
        if !config_path.exists() {
            return Ok(settings);
        }

        let file = File::open(config_path).context("Failed to open config file")?;
        let reader = BufReader::new(file);
        let mut config_map = HashMap::new();

        for line in reader.lines() {
            let line = line.context("Failed to read line from config")?;
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                config_map.insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        if let Some(host) = config_map.get("host") {
            settings.host = host.trim_matches('"').to_string();
        }
        if let Some(port_str) = config_map.get("port") {
            if let Ok(port) = port_str.parse::<u16>() {
                settings.port = port;
            }
        }
        if let Some(minutes_str) = config_map.get("session_idle_minutes") {
            if let Ok(minutes) = minutes_str.parse::<u32>() {
                settings.session_idle_minutes = minutes;
            }
        }
        if let Some(auto_open_str) = config_map.get("auto_open_browser") {
            if let Ok(auto_open) = auto_open_str.parse::<bool>() {
                settings.auto_open_browser = auto_open;
            }
        }

        Ok(settings)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Creating config directory")?;
        }

        let mut content = String::new();
        content.push_str("# Office Streams Configuration File\n");
        content.push_str(&format!("host = \"{}\"\n", self.host));
        content.push_str(&format!("port = {}\n", self.port));
        content.push_str(&format!("session_idle_minutes = {}\n", self.session_idle_minutes));
        content.push_str(&format!("auto_open_browser = {}\n", self.auto_open_browser));

        std::fs::write(config_path, content).context("Failed to write to config file")?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let mut path = std::env::current_exe()
            .unwrap_or_default()
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();

        if path.ends_with("target/debug") || path.ends_with("target/release") {
            path.pop();
            path.pop();
        }
        path.push("office_streams.ini");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("absent.ini")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.port, 3001);
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("office_streams.ini");
        let settings = Settings {
            host: "0.0.0.0".to_string(),
            port: 8080,
            session_idle_minutes: 5,
            auto_open_browser: true,
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn comments_and_bad_values_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("office_streams.ini");
        std::fs::write(&path, "# comment\n\nport = not-a-number\nsession_idle_minutes=12\n").unwrap();
        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(settings.session_idle_minutes, 12);
    }
}
