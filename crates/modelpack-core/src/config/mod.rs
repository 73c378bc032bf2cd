//! Configuration module for Modelpack Core.
//!
//! Load order: defaults, then a TOML file (`./modelpack.toml` unless a path is
//! given), then `MODELPACK_*` environment variables.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, Result};

/// File looked up in the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "modelpack.toml";

/// Environment variable overriding `database.path`.
pub const ENV_DATABASE: &str = "MODELPACK_DATABASE";

/// Environment variable overriding `packaging.output_dir`.
pub const ENV_OUTPUT_DIR: &str = "MODELPACK_OUTPUT_DIR";

/// Database configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("modelpack.db")
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: default_database_path() }
    }
}

/// Packaging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackagingConfig {
    /// Config-store key holding the archive output directory.
    #[serde(default = "default_output_dir_key")]
    pub output_dir_key: String,
    /// Output directory used when the config store has no value for `output_dir_key`.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir_key() -> String {
    "PATH_STATIC_TEST".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("/kaier/workspace/static")
}

impl Default for PackagingConfig {
    fn default() -> Self {
        Self { output_dir_key: default_output_dir_key(), output_dir: default_output_dir() }
    }
}

/// Root configuration for Modelpack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Packaging configuration.
    #[serde(default)]
    pub packaging: PackagingConfig,
}

impl Config {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from `./modelpack.toml` (if present) and the environment.
    pub fn load() -> Result<Self> {
        Self::load_with(None, |key| std::env::var(key).ok())
    }

    /// Load configuration from an explicit file (required to exist when given)
    /// and an environment lookup.
    pub fn load_with(
        path: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => {
                let local = Path::new(DEFAULT_CONFIG_FILE);
                if local.exists() { Self::load_from_file(local)? } else { Self::default() }
            }
        };
        config.apply_env(env);
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::Config(format!(
                "configuration file not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)
            .map_err(|e| CoreError::Config(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Override values from environment variables if set and non-empty.
    pub fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        let present = |key: &str| env(key).filter(|v| !v.trim().is_empty());
        if let Some(path) = present(ENV_DATABASE) {
            self.database.path = PathBuf::from(path);
        }
        if let Some(dir) = present(ENV_OUTPUT_DIR) {
            self.packaging.output_dir = PathBuf::from(dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.database.path, PathBuf::from("modelpack.db"));
        assert_eq!(config.packaging.output_dir_key, "PATH_STATIC_TEST");
        assert_eq!(config.packaging.output_dir, PathBuf::from("/kaier/workspace/static"));
        assert_eq!(Config::new(), config);
    }

    #[test]
    fn test_config_deserialize_minimal() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_deserialize_full() {
        let config: Config = toml::from_str(
            r#"
            [database]
            path = "/var/lib/modelpack/app.db"

            [packaging]
            output_dir_key = "PATH_DOWNLOADS"
            output_dir = "/srv/static"
            "#,
        )
        .unwrap();
        assert_eq!(config.database.path, PathBuf::from("/var/lib/modelpack/app.db"));
        assert_eq!(config.packaging.output_dir_key, "PATH_DOWNLOADS");
        assert_eq!(config.packaging.output_dir, PathBuf::from("/srv/static"));
    }

    #[test]
    fn test_load_from_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = Config::load_from_file(&temp.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("configuration file not found"));
    }

    #[test]
    fn test_load_from_invalid_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("modelpack.toml");
        std::fs::write(&path, "[database\npath = 1").unwrap();
        let err = Config::load_from_file(&path).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn test_load_with_file_and_env() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("modelpack.toml");
        std::fs::write(&path, "[packaging]\noutput_dir = \"/from/file\"\n").unwrap();

        let config = Config::load_with(Some(&path), no_env).unwrap();
        assert_eq!(config.packaging.output_dir, PathBuf::from("/from/file"));

        let env: HashMap<&str, &str> =
            HashMap::from([(ENV_OUTPUT_DIR, "/from/env"), (ENV_DATABASE, "/tmp/x.db")]);
        let config =
            Config::load_with(Some(&path), |k| env.get(k).map(|v| (*v).to_string())).unwrap();
        assert_eq!(config.packaging.output_dir, PathBuf::from("/from/env"));
        assert_eq!(config.database.path, PathBuf::from("/tmp/x.db"));
    }

    #[test]
    fn test_apply_env_ignores_blank_values() {
        let mut config = Config::default();
        config.apply_env(|_| Some("  ".to_string()));
        assert_eq!(config, Config::default());
    }
}
