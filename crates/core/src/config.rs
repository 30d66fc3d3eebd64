use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Runtime environment the application was started in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            other => Err(ConfigError::InvalidEnvironment(other.to_string())),
        }
    }
}

/// Immutable application configuration, constructed once at startup and
/// owned by the service instance for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub name: String,
    pub version: String,
    pub environment: Environment,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration file")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),

    #[error("invalid environment '{0}' (expected development, production, or test)")]
    InvalidEnvironment(String),
}

/// Optional on-disk overrides for [`AppConfig::load`].
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    name: Option<String>,
    environment: Option<Environment>,
}

impl AppConfig {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        environment: Environment,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            environment,
        }
    }

    /// Load configuration shared by all adapters: an optional TOML file, then
    /// an `APP_ENV` override. `default_name` identifies the adapter mode and
    /// is used when the file does not set a name.
    pub fn load(config_path: &Path, default_name: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            toml::from_str(&content)?
        } else {
            tracing::debug!("Configuration file not found, using defaults");
            ConfigFile::default()
        };

        let env_override = std::env::var("APP_ENV").ok();
        Self::from_parts(file, env_override.as_deref(), default_name)
    }

    fn from_parts(
        file: ConfigFile,
        env_override: Option<&str>,
        default_name: &str,
    ) -> Result<Self, ConfigError> {
        let environment = match env_override {
            Some(value) if !value.is_empty() => value.parse()?,
            _ => file.environment.unwrap_or_default(),
        };

        Ok(Self {
            name: file.name.unwrap_or_else(|| default_name.to_string()),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_environment_from_str() {
        assert_eq!(
            "production".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert_eq!("test".parse::<Environment>().unwrap(), Environment::Test);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_environment_serializes_lowercase() {
        let json = serde_json::to_string(&Environment::Development).unwrap();
        assert_eq!(json, "\"development\"");
    }

    #[test]
    fn test_defaults_without_file() {
        let config =
            AppConfig::from_parts(ConfigFile::default(), None, "Template CLI").unwrap();
        assert_eq!(config.name, "Template CLI");
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_env_override_wins_over_file() {
        let file = ConfigFile {
            name: Some("My App".to_string()),
            environment: Some(Environment::Development),
        };
        let config = AppConfig::from_parts(file, Some("production"), "Template CLI").unwrap();
        assert_eq!(config.name, "My App");
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn test_invalid_env_override_is_an_error() {
        let result = AppConfig::from_parts(ConfigFile::default(), Some("prod"), "Template CLI");
        assert!(matches!(result, Err(ConfigError::InvalidEnvironment(_))));
    }

    #[test]
    fn test_load_reads_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"From File\"\nenvironment = \"test\"").unwrap();

        let config = AppConfig::load(file.path(), "Template CLI").unwrap();
        assert_eq!(config.name, "From File");
        assert_eq!(config.environment, Environment::Test);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = [not toml").unwrap();

        assert!(matches!(
            AppConfig::load(file.path(), "Template CLI"),
            Err(ConfigError::Parse(_))
        ));
    }
}
