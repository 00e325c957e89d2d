use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = ".issue-tracker-config.json";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

/// Optional server settings from `~/.issue-tracker-config.json`.
/// Precedence: CLI flags > environment > config file > defaults.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl Config {
    /// Bind address with environment overrides and defaults applied.
    pub fn bind_address(&self) -> (String, u16) {
        let host = env::var("ISSUE_TRACKER_HOST")
            .ok()
            .or_else(|| self.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = env::var("ISSUE_TRACKER_PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .or(self.port)
            .unwrap_or(DEFAULT_PORT);

        (host, port)
    }
}

pub fn load_config() -> Config {
    let Some(home_dir) = dirs::home_dir() else {
        return Config::default();
    };
    load_config_from(&home_dir.join(CONFIG_FILE))
}

/// Missing or unreadable config files fall back to defaults; the server
/// should come up either way.
pub fn load_config_from(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }
    fs::read_to_string(path)
        .ok()
        .and_then(|content| serde_json::from_str(&content).ok())
        .unwrap_or_default()
}
