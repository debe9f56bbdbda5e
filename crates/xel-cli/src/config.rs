//! Layered configuration
//!
//! Settings are resolved with four layers of precedence (highest wins):
//! 1. Command-line flags: `--schemas`, `--log`
//! 2. Environment variables: `XEL_SCHEMAS`, `XEL_LOG`
//! 3. Project file: `xel.toml`
//! 4. Built-in defaults

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_SCHEMAS: &str = "schemas";
const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemasConfig {
    #[serde(default)]
    pub paths: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub level: Option<String>,
}

/// Project config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct XelConfigFile {
    #[serde(default)]
    pub schemas: SchemasConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Values read from the environment
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub schemas: Option<Vec<PathBuf>>,
    pub log: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            schemas: std::env::var_os("XEL_SCHEMAS")
                .map(|v| std::env::split_paths(&v).collect::<Vec<_>>())
                .filter(|paths| !paths.is_empty()),
            log: std::env::var("XEL_LOG").ok().filter(|v| !v.is_empty()),
        }
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub schemas: Vec<PathBuf>,
    pub log: Option<String>,
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq)]
pub struct XelConfig {
    pub schema_paths: Vec<PathBuf>,
    pub log_level: String,
}

impl XelConfig {
    /// Load config with layered precedence: defaults < file < env < flags.
    /// A missing project file is not an error.
    pub fn load(config_path: &Path, cli: CliOverrides) -> Result<Self> {
        let file = if config_path.exists() {
            Self::load_file(config_path)?
        } else {
            XelConfigFile::default()
        };
        Ok(Self::resolve(file, EnvOverrides::from_env(), cli))
    }

    pub fn load_file(path: &Path) -> Result<XelConfigFile> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn resolve(file: XelConfigFile, env: EnvOverrides, cli: CliOverrides) -> Self {
        let mut schema_paths = if file.schemas.paths.is_empty() {
            vec![PathBuf::from(DEFAULT_SCHEMAS)]
        } else {
            file.schemas.paths
        };
        if let Some(paths) = env.schemas {
            schema_paths = paths;
        }
        if !cli.schemas.is_empty() {
            schema_paths = cli.schemas;
        }

        let log_level = cli
            .log
            .or(env.log)
            .or(file.log.level)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Self {
            schema_paths,
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = XelConfig::resolve(
            XelConfigFile::default(),
            EnvOverrides::default(),
            CliOverrides::default(),
        );
        assert_eq!(config.schema_paths, vec![PathBuf::from("schemas")]);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_file_layer() {
        let file: XelConfigFile = toml::from_str(
            r#"
[schemas]
paths = ["ui/schemas", "vendor/schemas"]

[log]
level = "debug"
"#,
        )
        .unwrap();
        let config = XelConfig::resolve(file, EnvOverrides::default(), CliOverrides::default());
        assert_eq!(config.schema_paths.len(), 2);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_precedence() {
        let file: XelConfigFile = toml::from_str(
            r#"
[schemas]
paths = ["from-file"]

[log]
level = "debug"
"#,
        )
        .unwrap();
        let env = EnvOverrides {
            schemas: Some(vec![PathBuf::from("from-env")]),
            log: Some("info".to_string()),
        };

        let config = XelConfig::resolve(file.clone(), env.clone(), CliOverrides::default());
        assert_eq!(config.schema_paths, vec![PathBuf::from("from-env")]);
        assert_eq!(config.log_level, "info");

        let cli = CliOverrides {
            schemas: vec![PathBuf::from("from-cli")],
            log: Some("trace".to_string()),
        };
        let config = XelConfig::resolve(file, env, cli);
        assert_eq!(config.schema_paths, vec![PathBuf::from("from-cli")]);
        assert_eq!(config.log_level, "trace");
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = XelConfig::load(Path::new("no/such/xel.toml"), CliOverrides::default());
        assert!(config.is_ok());
    }
}
