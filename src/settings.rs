use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::error::{Result, SiftError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// tracing filter used when neither RUST_LOG nor --verbose is given.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_color() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            color: default_color(),
        }
    }
}

impl Settings {
    /// Build the tracing filter for `log_level`. Each comma-separated
    /// directive must be a bare level (`warn`) or a `target=level` pair.
    pub fn log_filter(&self) -> Result<EnvFilter> {
        let spec = self.log_level.trim();
        let invalid = |detail: String| {
            SiftError::Settings(format!("invalid log_level {:?}: {detail}", self.log_level))
        };
        if let Some(bad) = spec
            .split(',')
            .find(|d| !d.contains('=') && LevelFilter::from_str(d.trim()).is_err())
        {
            return Err(invalid(format!("{bad:?} is not a level")));
        }
        EnvFilter::try_new(spec).map_err(|e| invalid(e.to_string()))
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("sift")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn read_settings(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| SiftError::Settings(format!("{}: {e}", path.display())))?;
    let settings: Settings = serde_json::from_str(&content)
        .map_err(|e| SiftError::Settings(format!("{}: {e}", path.display())))?;
    settings.log_filter()?;
    Ok(settings)
}

/// Load settings from an explicit path, or from `~/.config/sift/settings.json`
/// when none is given. Only the default location may be absent.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    match explicit {
        Some(path) => read_settings(path),
        None => {
            let path = settings_path();
            if path.exists() {
                read_settings(&path)
            } else {
                Ok(Settings::default())
            }
        }
    }
}

/// Expand a bare `~` or a leading `~/` to the home directory. Other
/// paths, including `~user/...`, are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\"))
    };
    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
