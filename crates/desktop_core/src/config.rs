//! Desktop configuration document.
//!
//! # Responsibility
//! - Parse the JSON config listing manifest files, theme and runtime knobs.
//! - Resolve manifest paths relative to the config file location.
//!
//! # Invariants
//! - `log_level` is one of `trace|debug|info|warn|error` after loading.
//! - Omitted fields take documented defaults.

use crate::desktop::DesktopOptions;
use log::info;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopConfig {
    /// Manifest file paths; relative entries resolve against `base_dir`.
    #[serde(default)]
    pub apps: Vec<PathBuf>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    #[serde(default)]
    pub session_db: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub terminate_on_last_window_close: bool,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            apps: Vec::new(),
            theme: None,
            log_level: default_log_level(),
            log_dir: None,
            session_db: None,
            terminate_on_last_window_close: true,
            base_dir: None,
        }
    }
}

impl DesktopConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let mut config: Self =
            serde_json::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.log_level = normalize_log_level(&config.log_level)?;
        Ok(config)
    }

    /// Reads a config file; relative paths inside it resolve against its
    /// parent directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        let mut config = Self::from_json_str(&text)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        info!(
            "event=config_load module=config status=ok path={} apps={}",
            path.display(),
            config.apps.len()
        );
        Ok(config)
    }

    /// Manifest paths resolved against the config file directory.
    pub fn manifest_paths(&self) -> Vec<PathBuf> {
        self.apps.iter().map(|path| self.resolve(path)).collect()
    }

    /// Session database path, resolved like manifest paths.
    pub fn session_db_path(&self) -> Option<PathBuf> {
        self.session_db.as_deref().map(|path| self.resolve(path))
    }

    pub fn options(&self) -> DesktopOptions {
        DesktopOptions {
            terminate_on_last_window_close: self.terminate_on_last_window_close,
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

fn normalize_log_level(level: &str) -> Result<String, ConfigError> {
    let normalized = level.trim().to_ascii_lowercase();
    let normalized = if normalized == "warning" {
        "warn".to_string()
    } else {
        normalized
    };
    if LOG_LEVELS.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        Err(ConfigError::InvalidLogLevel(level.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    Io { path: PathBuf, message: String },
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "invalid desktop config JSON: {message}"),
            Self::Io { path, message } => {
                write!(f, "cannot read desktop config `{}`: {message}", path.display())
            }
            Self::InvalidLogLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DesktopConfig};
    use std::path::PathBuf;

    #[test]
    fn omitted_fields_take_defaults() {
        let config = DesktopConfig::from_json_str("{}").expect("empty config");
        assert!(config.apps.is_empty());
        assert_eq!(config.log_level, "info");
        assert!(config.terminate_on_last_window_close);
        assert!(config.options().terminate_on_last_window_close);
        assert_eq!(config, DesktopConfig::default());
    }

    #[test]
    fn log_level_is_normalized_and_validated() {
        let config =
            DesktopConfig::from_json_str(r#"{ "log_level": " WARNING " }"#).expect("parse");
        assert_eq!(config.log_level, "warn");

        let err = DesktopConfig::from_json_str(r#"{ "log_level": "loud" }"#).unwrap_err();
        assert_eq!(err, ConfigError::InvalidLogLevel("loud".to_string()));
    }

    #[test]
    fn load_resolves_relative_paths_against_config_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("desktop.json");
        std::fs::write(
            &path,
            r#"{
                "apps": ["apps/notes.json", "/opt/apps/terminal.json"],
                "theme": "dark",
                "session_db": "session.sqlite3",
                "terminate_on_last_window_close": false
            }"#,
        )
        .expect("write config");

        let config = DesktopConfig::load(&path).expect("load");
        assert_eq!(
            config.manifest_paths(),
            vec![
                dir.path().join("apps/notes.json"),
                PathBuf::from("/opt/apps/terminal.json"),
            ]
        );
        assert_eq!(
            config.session_db_path(),
            Some(dir.path().join("session.sqlite3"))
        );
        assert_eq!(config.theme.as_deref(), Some("dark"));
        assert!(!config.options().terminate_on_last_window_close);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = DesktopConfig::from_json_str("{ apps: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
