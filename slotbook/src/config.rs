//! Configuration system for slotbook.
//!
//! Configuration is merged from multiple sources with the following
//! precedence (highest to lowest):
//!
//! 1. Programmatic overrides (via [`ConfigBuilder::with_config`])
//! 2. Environment variables (`SLOTBOOK_*`)
//! 3. YAML config file (`<data dir>/config.yaml`)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use slotbook::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! println!("busy timeout: {:?}", config.busy_timeout());
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::store::default_data_dir;

/// Default bound on storage write-lock waits, in milliseconds.
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// Complete configuration structure.
///
/// Every field is optional; unset fields fall back to built-in defaults at
/// the point of use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the database file and config.
    pub data_dir: Option<PathBuf>,

    /// Bound on storage write-lock waits, in milliseconds.
    pub busy_timeout_ms: Option<u64>,

    /// Bound on admission-gate waits, in milliseconds.
    ///
    /// Unset means booking attempts block until the gate is granted.
    pub gate_wait_ms: Option<u64>,
}

impl Config {
    /// Returns the storage busy timeout (default 5000ms).
    #[must_use]
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms.unwrap_or(DEFAULT_BUSY_TIMEOUT_MS))
    }

    /// Returns the admission-gate wait bound, if one is configured.
    #[must_use]
    pub fn gate_wait(&self) -> Option<Duration> {
        self.gate_wait_ms.map(Duration::from_millis)
    }

    /// Resolves the effective data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no directory is configured and the home
    /// directory cannot be determined.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }

    /// Resolves the database file path inside the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be resolved.
    pub fn store_path(&self) -> Result<PathBuf> {
        Ok(self.resolve_data_dir()?.join("slotbook.db"))
    }

    /// Reads configuration from `SLOTBOOK_*` environment variables.
    fn from_env() -> Result<Self> {
        Ok(Self {
            data_dir: std::env::var("SLOTBOOK_DATA_DIR").ok().map(PathBuf::from),
            busy_timeout_ms: env_millis("SLOTBOOK_BUSY_TIMEOUT_MS")?,
            gate_wait_ms: env_millis("SLOTBOOK_GATE_WAIT_MS")?,
        })
    }

    /// Overlays `other` on top of `self`; set fields in `other` win.
    fn merge(self, other: Self) -> Self {
        Self {
            data_dir: other.data_dir.or(self.data_dir),
            busy_timeout_ms: other.busy_timeout_ms.or(self.busy_timeout_ms),
            gate_wait_ms: other.gate_wait_ms.or(self.gate_wait_ms),
        }
    }
}

/// Parses an optional millisecond value from the environment.
fn env_millis(name: &str) -> Result<Option<u64>> {
    match std::env::var(name) {
        Ok(raw) => raw.parse::<u64>().map(Some).map_err(|_| Error::Validation {
            field: name.to_string(),
            message: format!("'{raw}' is not a millisecond count"),
        }),
        Err(_) => Ok(None),
    }
}

/// Builder merging configuration sources into a [`Config`].
///
/// # Examples
///
/// ```
/// use slotbook::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .with_config(Config {
///         busy_timeout_ms: Some(250),
///         ..Config::default()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.busy_timeout().as_millis(), 250);
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config_file: Option<PathBuf>,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Creates a builder with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the config file from an explicit path instead of the data
    /// directory.
    #[must_use]
    pub fn with_config_file(mut self, path: impl AsRef<Path>) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Applies programmatic overrides with the highest precedence.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Merges all sources into the final configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed, or an
    /// environment variable holds a malformed value.
    pub fn build(self) -> Result<Config> {
        let mut merged = Config::default();

        let file = match &self.config_file {
            Some(path) => Some(path.clone()),
            // The default location depends on the data dir, which may come
            // from the environment; a missing home directory just means no
            // file-based config.
            None => Config::from_env()?
                .resolve_data_dir()
                .ok()
                .map(|dir| dir.join("config.yaml")),
        };
        if let Some(path) = file {
            if path.exists() {
                let text = std::fs::read_to_string(&path)?;
                let parsed: Config = serde_yaml::from_str(&text)?;
                merged = merged.merge(parsed);
            }
        }

        merged = merged.merge(Config::from_env()?);

        if let Some(overrides) = self.overrides {
            merged = merged.merge(overrides);
        }

        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() -> Vec<(&'static str, Option<String>)> {
        ["SLOTBOOK_DATA_DIR", "SLOTBOOK_BUSY_TIMEOUT_MS", "SLOTBOOK_GATE_WAIT_MS"]
            .into_iter()
            .map(|name| {
                let saved = std::env::var(name).ok();
                std::env::remove_var(name);
                (name, saved)
            })
            .collect()
    }

    fn restore_env(saved: Vec<(&'static str, Option<String>)>) {
        for (name, value) in saved {
            match value {
                Some(v) => std::env::set_var(name, v),
                None => std::env::remove_var(name),
            }
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.busy_timeout(), Duration::from_millis(5000));
        assert_eq!(config.gate_wait(), None);
    }

    #[test]
    fn test_merge_prefers_overlay() {
        let base = Config {
            data_dir: Some(PathBuf::from("/base")),
            busy_timeout_ms: Some(1000),
            gate_wait_ms: None,
        };
        let overlay = Config {
            data_dir: None,
            busy_timeout_ms: Some(2000),
            gate_wait_ms: Some(300),
        };

        let merged = base.merge(overlay);
        assert_eq!(merged.data_dir, Some(PathBuf::from("/base")));
        assert_eq!(merged.busy_timeout_ms, Some(2000));
        assert_eq!(merged.gate_wait_ms, Some(300));
    }

    #[test]
    fn test_yaml_parsing() {
        let parsed: Config =
            serde_yaml::from_str("data_dir: /srv/slots\nbusy_timeout_ms: 1234\n").unwrap();
        assert_eq!(parsed.data_dir, Some(PathBuf::from("/srv/slots")));
        assert_eq!(parsed.busy_timeout_ms, Some(1234));
        assert_eq!(parsed.gate_wait_ms, None);
    }

    #[test]
    fn test_yaml_rejects_unknown_fields() {
        let result: std::result::Result<Config, _> = serde_yaml::from_str("port_min: 5000\n");
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_builder_reads_config_file() {
        let saved = clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "busy_timeout_ms: 750\ngate_wait_ms: 100\n").unwrap();

        let config = ConfigBuilder::new().with_config_file(&path).build().unwrap();
        assert_eq!(config.busy_timeout(), Duration::from_millis(750));
        assert_eq!(config.gate_wait(), Some(Duration::from_millis(100)));

        restore_env(saved);
    }

    #[test]
    #[serial]
    fn test_env_overrides_config_file() {
        let saved = clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "busy_timeout_ms: 750\n").unwrap();

        std::env::set_var("SLOTBOOK_BUSY_TIMEOUT_MS", "900");
        let config = ConfigBuilder::new().with_config_file(&path).build().unwrap();
        assert_eq!(config.busy_timeout(), Duration::from_millis(900));

        restore_env(saved);
    }

    #[test]
    #[serial]
    fn test_programmatic_overrides_win() {
        let saved = clear_env();
        std::env::set_var("SLOTBOOK_BUSY_TIMEOUT_MS", "900");

        let config = ConfigBuilder::new()
            .with_config(Config {
                busy_timeout_ms: Some(42),
                ..Config::default()
            })
            .build()
            .unwrap();
        assert_eq!(config.busy_timeout(), Duration::from_millis(42));

        restore_env(saved);
    }

    #[test]
    #[serial]
    fn test_malformed_env_value_is_rejected() {
        let saved = clear_env();
        std::env::set_var("SLOTBOOK_GATE_WAIT_MS", "soon");

        let result = ConfigBuilder::new().build();
        assert!(matches!(result, Err(Error::Validation { .. })));

        restore_env(saved);
    }

    #[test]
    fn test_store_path_uses_data_dir() {
        let config = Config {
            data_dir: Some(PathBuf::from("/srv/slots")),
            ..Config::default()
        };
        assert_eq!(
            config.store_path().unwrap(),
            PathBuf::from("/srv/slots/slotbook.db")
        );
    }
}
