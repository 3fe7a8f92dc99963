//! Environment variable handling for configuration overrides.

use std::env;
use std::path::PathBuf;

use crate::config::schema::Config;
use crate::error::Result;
use crate::logging::LOG_MODE_ENV;
use crate::strategy::EditableStrategy;

/// Strategy override.
pub const STRATEGY_ENV: &str = "EDITABLES_STRATEGY";
/// Installer chain override; labels are comma-separated.
pub const INSTALLER_ENV: &str = "EDITABLES_INSTALLER";
/// Record ledger override.
pub const RECORD_ENV: &str = "EDITABLES_RECORD";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use editables::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply `EDITABLES_*` overrides to `config`.
    ///
    /// Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `EDITABLES_STRATEGY` is not a known
    /// strategy.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Some(strategy) = Self::var(STRATEGY_ENV) {
            config.strategy = Some(strategy.parse::<EditableStrategy>()?);
        }

        if let Some(installer) = Self::var(INSTALLER_ENV) {
            config.installer = Some(
                installer
                    .split(',')
                    .map(str::trim)
                    .filter(|label| !label.is_empty())
                    .map(String::from)
                    .collect(),
            );
        }

        if let Some(record) = Self::var(RECORD_ENV) {
            config.record = Some(PathBuf::from(record));
        }

        // Checked by the validator, like the file-based value.
        if let Some(mode) = Self::var(LOG_MODE_ENV) {
            config.log_mode = Some(mode);
        }

        Ok(())
    }

    fn var(name: &str) -> Option<String> {
        env::var(name).ok().filter(|v| !v.trim().is_empty())
    }
}
