//! Session configuration loaded from TOML.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, WebtopError};

/// Top-level configuration (`webtop.toml`).
///
/// Every field has a default, so an empty file (or no file at all) yields a
/// working configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct WebtopConfig {
    /// Host name shown in the prompt and by `uname`.
    #[serde(default = "default_hostname")]
    pub hostname: String,
    /// Login name shown in the prompt and by `whoami`.
    #[serde(default = "default_user")]
    pub user: String,
    /// Home directory; `cd` with no argument returns here.
    #[serde(default = "default_home")]
    pub home: String,
    /// Kernel string reported by `uname`.
    #[serde(default = "default_kernel")]
    pub kernel: String,
    /// Maximum number of terminal history entries retained.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Directory for persisted key-value state. `None` keeps state in memory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Lines printed when a terminal opens.
    #[serde(default = "default_banner")]
    pub banner: Vec<String>,
}

fn default_hostname() -> String {
    "linuxos".to_string()
}
fn default_user() -> String {
    "user".to_string()
}
fn default_home() -> String {
    "/home/user".to_string()
}
fn default_kernel() -> String {
    "LinuxOS 5.4.0-web x86_64".to_string()
}
fn default_history_limit() -> usize {
    100
}
fn default_banner() -> Vec<String> {
    vec![
        "LinuxOS Terminal v2.0".to_string(),
        "Type 'help' for available commands".to_string(),
    ]
}

impl Default for WebtopConfig {
    fn default() -> Self {
        Self {
            hostname: default_hostname(),
            user: default_user(),
            home: default_home(),
            kernel: default_kernel(),
            history_limit: default_history_limit(),
            data_dir: None,
            banner: default_banner(),
        }
    }
}

impl WebtopConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            log::info!("Loading config from {}", path.display());
            Self::load(path)
        } else {
            log::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.home.starts_with('/') {
            return Err(WebtopError::Config(format!(
                "home must be an absolute path: {}",
                self.home
            )));
        }
        if self.user.is_empty() || self.user.contains(char::is_whitespace) {
            return Err(WebtopError::Config(format!("invalid user: {:?}", self.user)));
        }
        if self.history_limit == 0 {
            return Err(WebtopError::Config(
                "history_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = WebtopConfig::from_toml_str("").unwrap();
        assert_eq!(config, WebtopConfig::default());
        assert_eq!(config.home, "/home/user");
        assert_eq!(config.hostname, "linuxos");
        assert_eq!(config.history_limit, 100);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn partial_toml_overrides_fields() {
        let config = WebtopConfig::from_toml_str(
            "hostname = \"box\"\nhistory_limit = 5\ndata_dir = \"/var/lib/webtop\"\n",
        )
        .unwrap();
        assert_eq!(config.hostname, "box");
        assert_eq!(config.history_limit, 5);
        assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/webtop")));
        assert_eq!(config.user, "user");
    }

    #[test]
    fn relative_home_rejected() {
        let err = WebtopConfig::from_toml_str("home = \"home/user\"").unwrap_err();
        assert!(matches!(err, WebtopError::Config(_)));
    }

    #[test]
    fn zero_history_rejected() {
        assert!(WebtopConfig::from_toml_str("history_limit = 0").is_err());
    }

    #[test]
    fn user_with_space_rejected() {
        assert!(WebtopConfig::from_toml_str("user = \"a b\"").is_err());
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = WebtopConfig::from_toml_str("hostname = ").unwrap_err();
        assert!(matches!(err, WebtopError::TomlParse(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "user = \"alice\"").unwrap();
        let config = WebtopConfig::load(file.path()).unwrap();
        assert_eq!(config.user, "alice");
    }

    #[test]
    fn load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = WebtopConfig::load_or_default(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, WebtopConfig::default());
    }
}
