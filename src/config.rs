//! # Configuration
//!
//! Settings loaded with the `config` crate.
//!
//! Sources, later ones overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. An optional `quotes.toml` in the working directory
//! 3. Environment variables prefixed with `QUOTES__`, using `__` between
//!    path segments (e.g. `QUOTES__LOGGING__FORMAT=json`)
//!
//! A `.env` file, when present, is loaded into the environment first.
//!
//! # Examples
//!
//! ```
//! use oficina_quotes::config::Settings;
//!
//! let settings = Settings::default();
//! assert_eq!(settings.logging.level, "info");
//! assert_eq!(settings.pagination.default_per_page, 10);
//! ```

use config::{Config, Environment, File};
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Default configuration file name (without extension).
pub const DEFAULT_CONFIG_FILE: &str = "quotes";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "QUOTES";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Values were read but are inconsistent.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Pagination limits for list and search operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PaginationSettings {
    /// Page size when the caller does not give one.
    pub default_per_page: u32,
    /// Largest page size a caller may request.
    pub max_per_page: u32,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            default_per_page: 10,
            max_per_page: 100,
        }
    }
}

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Settings {
    /// Logging settings.
    pub logging: LoggingSettings,
    /// Pagination settings.
    pub pagination: PaginationSettings,
}

impl Settings {
    /// Loads settings from `.env`, `quotes.toml` and the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source is malformed or values are invalid.
    pub fn load() -> ConfigResult<Self> {
        if let Err(e) = dotenvy::dotenv()
            && !e.not_found()
        {
            tracing::warn!(error = %e, "failed to read .env file");
        }
        Self::from_sources(Some(DEFAULT_CONFIG_FILE), Self::environment())
    }

    /// Loads settings from an optional file and an environment source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source is malformed or values are invalid.
    pub fn from_sources(file: Option<&str>, env: Environment) -> ConfigResult<Self> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format.to_string())?
            .set_default(
                "pagination.default_per_page",
                i64::from(defaults.pagination.default_per_page),
            )?
            .set_default(
                "pagination.max_per_page",
                i64::from(defaults.pagination.max_per_page),
            )?;

        if let Some(file) = file {
            builder = builder.add_source(File::with_name(file).required(false));
        }

        let settings: Self = builder.add_source(env).build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Returns the environment source for `QUOTES__*` variables.
    #[must_use]
    pub fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    fn validate(&self) -> ConfigResult<()> {
        let pagination = &self.pagination;
        if pagination.max_per_page == 0 {
            return Err(ConfigError::Invalid(
                "pagination.max_per_page must be at least 1".to_string(),
            ));
        }
        if pagination.default_per_page == 0 || pagination.default_per_page > pagination.max_per_page
        {
            return Err(ConfigError::Invalid(format!(
                "pagination.default_per_page must be between 1 and {}",
                pagination.max_per_page
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Settings::environment().source(Some(map))
    }

    #[test]
    fn defaults_without_sources() {
        let settings = Settings::from_sources(None, env(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.logging.format, LogFormat::Pretty);
        assert_eq!(settings.pagination.max_per_page, 100);
    }

    #[test]
    fn environment_overrides_defaults() {
        let settings = Settings::from_sources(
            None,
            env(&[
                ("QUOTES__LOGGING__LEVEL", "debug"),
                ("QUOTES__LOGGING__FORMAT", "json"),
                ("QUOTES__PAGINATION__MAX_PER_PAGE", "50"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert_eq!(settings.pagination.max_per_page, 50);
        assert_eq!(settings.pagination.default_per_page, 10);
    }

    #[test]
    fn unrelated_variables_are_ignored() {
        let settings =
            Settings::from_sources(None, env(&[("OTHER__LOGGING__LEVEL", "trace")])).unwrap();
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn missing_file_is_optional() {
        let settings = Settings::from_sources(Some("does-not-exist"), env(&[])).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn rejects_default_above_max() {
        let err = Settings::from_sources(
            None,
            env(&[("QUOTES__PAGINATION__DEFAULT_PER_PAGE", "500")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_unknown_format() {
        let err =
            Settings::from_sources(None, env(&[("QUOTES__LOGGING__FORMAT", "xml")])).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }
}
