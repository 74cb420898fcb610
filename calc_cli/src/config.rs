//! Configuration file support.
//!
//! Settings come from an optional TOML file: the path given with `--config`,
//! else `computo.toml` in the working directory, else built-in defaults.
//!
//! ```toml
//! license_url = "https://example.com/licencias.txt"   # "" for local mode
//! license_timeout_secs = 5
//!
//! [local_licenses]
//! "admin@test.com" = "MASTER2026"
//!
//! [defaults]
//! spacing = "40"
//! waste_percent = 10
//! faces = 2
//! layers = 1
//! ceiling_thickness = "9.5"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use calc_core::calculations::{RoomInput, SystemType};
use calc_core::GlobalSettings;
use serde::Deserialize;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "computo.toml";

/// Environment variable overriding `license_url`
pub const LICENSE_URL_ENV: &str = "COMPUTO_LICENSE_URL";

/// Published license list (one `email:key` per line)
pub const DEFAULT_LICENSE_URL: &str = "https://gist.githubusercontent.com/PabloDevCode/ebd32710506e47dcc3194d29da566398/raw/8b38d505eca9ab4964212ba634d413d35b0e9e1a/licencias.txt";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote license list; `None` selects the local list
    pub license_url: Option<String>,

    /// Timeout for the single license fetch
    pub license_timeout_secs: u64,

    /// email -> key pairs used when no remote list is configured
    pub local_licenses: BTreeMap<String, String>,

    /// Defaults for new room calculations
    pub defaults: GlobalSettings,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            license_url: Some(DEFAULT_LICENSE_URL.to_string()),
            license_timeout_secs: 5,
            local_licenses: BTreeMap::new(),
            defaults: GlobalSettings::default(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from `computo.toml` if present.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let path: Option<PathBuf> = match path {
            Some(p) => Some(p.to_path_buf()),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.exists().then_some(default)
            }
        };

        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(&path)
                    .map_err(|e| CliError::config(path.display().to_string(), e.to_string()))?;
                debug!(path = %path.display(), "loaded config file");
                Config::from_toml(&text).map_err(|e| match e {
                    CliError::Config { reason, .. } => CliError::config(path.display().to_string(), reason),
                    other => other,
                })?
            }
            None => Config::default(),
        };

        config.apply_license_url_override(std::env::var(LICENSE_URL_ENV).ok());
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml(text: &str) -> CliResult<Self> {
        let mut config: Config = toml::from_str(text).map_err(|e| CliError::config("<toml>", e.to_string()))?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Replace the license URL with an environment-provided one.
    pub fn apply_license_url_override(&mut self, value: Option<String>) {
        if let Some(url) = value {
            self.license_url = Some(url);
            self.normalize();
        }
    }

    pub fn license_timeout(&self) -> Duration {
        Duration::from_secs(self.license_timeout_secs)
    }

    fn normalize(&mut self) {
        if self.license_url.as_deref().is_some_and(|u| u.trim().is_empty()) {
            self.license_url = None;
        }
    }

    fn validate(&self) -> CliResult<()> {
        if self.license_timeout_secs == 0 {
            return Err(CliError::config("<toml>", "license_timeout_secs must be at least 1"));
        }
        RoomInput::with_settings(SystemType::DrywallPartition, 1.0, 1.0, &self.defaults)
            .validate()
            .map_err(|e| CliError::config("<toml>", format!("[defaults] {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_core::calculations::{BoardThickness, Spacing};

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.license_url.as_deref(), Some(DEFAULT_LICENSE_URL));
        assert_eq!(config.license_timeout(), Duration::from_secs(5));
        assert_eq!(config.defaults.waste_percent, 10);
    }

    #[test]
    fn test_full_file() {
        let config = Config::from_toml(
            r#"
license_url = "https://example.com/list.txt"
license_timeout_secs = 3

[local_licenses]
"admin@test.com" = "MASTER2026"

[defaults]
spacing = "48"
waste_percent = 5
faces = 1
layers = 2
ceiling_thickness = "12.5"
"#,
        )
        .unwrap();
        assert_eq!(config.license_url.as_deref(), Some("https://example.com/list.txt"));
        assert_eq!(config.license_timeout_secs, 3);
        assert_eq!(config.local_licenses.get("admin@test.com").map(String::as_str), Some("MASTER2026"));
        assert_eq!(config.defaults.spacing, Spacing::Cm48);
        assert_eq!(config.defaults.layers, 2);
        assert_eq!(config.defaults.ceiling_thickness, BoardThickness::Mm12_5);
    }

    #[test]
    fn test_empty_url_selects_local_mode() {
        let config = Config::from_toml("license_url = \"\"\n").unwrap();
        assert_eq!(config.license_url, None);
        assert_eq!(config.defaults, GlobalSettings::default());
    }

    #[test]
    fn test_invalid_defaults_rejected() {
        let err = Config::from_toml("[defaults]\nwaste_percent = 35\n").unwrap_err();
        assert!(err.to_string().contains("waste_percent"));
        assert!(Config::from_toml("[defaults]\nspacing = \"50\"\n").is_err());
        assert!(Config::from_toml("license_timeout_secs = 0\n").is_err());
    }

    #[test]
    fn test_env_override() {
        let mut config = Config::from_toml("license_url = \"\"\n").unwrap();
        config.apply_license_url_override(Some("https://override.example/list".to_string()));
        assert_eq!(config.license_url.as_deref(), Some("https://override.example/list"));
        config.apply_license_url_override(None);
        assert_eq!(config.license_url.as_deref(), Some("https://override.example/list"));
        config.apply_license_url_override(Some(" ".to_string()));
        assert_eq!(config.license_url, None);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/computo.toml"))).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }
}
