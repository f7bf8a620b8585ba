//! Settings file support
//!
//! Settings are read from `--config <PATH>` or, when that flag is absent,
//! from `<config_home>/capital-gains/config.toml` if the file exists.
//! Every key is optional:
//!
//! ```toml
//! [tax]
//! exemption_threshold = "20000"
//! rate = "0.20"
//!
//! [log]
//! level = "warn"
//! ```

use anyhow::Context;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{CapitalGainsError, Result};
use crate::tax::TaxRules;

/// Environment variable overriding the configured log filter
pub const LOG_ENV_VAR: &str = "CAPITAL_GAINS_LOG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub tax: TaxRules,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from an explicit path, the default location, or defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => match default_config_path() {
                Some(p) if p.exists() => Self::from_file(&p),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(CapitalGainsError::from)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let settings: Settings =
            toml::from_str(raw).map_err(|e| CapitalGainsError::ConfigError(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> std::result::Result<(), CapitalGainsError> {
        if self.tax.exemption_threshold < Decimal::ZERO {
            return Err(CapitalGainsError::ConfigError(format!(
                "exemption_threshold must not be negative, got {}",
                self.tax.exemption_threshold
            )));
        }
        if self.tax.rate < Decimal::ZERO || self.tax.rate > Decimal::ONE {
            return Err(CapitalGainsError::ConfigError(format!(
                "rate must be between 0 and 1, got {}",
                self.tax.rate
            )));
        }
        Ok(())
    }

    /// Log filter directive, `CAPITAL_GAINS_LOG` taking precedence.
    pub fn log_filter(&self) -> String {
        std::env::var(LOG_ENV_VAR).unwrap_or_else(|_| self.log.level.clone())
    }
}

/// `<config_home>/capital-gains/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dir_spec::config_home().map(|dir| dir.join("capital-gains").join("config.toml"))
}
