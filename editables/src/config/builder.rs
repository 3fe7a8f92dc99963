//! Layered configuration assembly.

use std::env;
use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;
use crate::installer::InstallerRegistry;

/// Builds the effective configuration from every layer.
///
/// Layers, lowest precedence first: built-in defaults, user config, project
/// config, local project config, environment, programmatic overrides. The
/// result is validated against the installer registry.
///
/// # Examples
///
/// ```
/// use editables::config::{Config, ConfigBuilder};
/// use editables::EditableStrategy;
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config {
///         strategy: Some(EditableStrategy::Strict),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.strategy, Some(EditableStrategy::Strict));
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    config_dir: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Vec<Config>,
    registry: Option<InstallerRegistry>,
}

impl ConfigBuilder {
    /// Create a builder that reads every layer from the current directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discover project files from `dir` instead of the current directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Read the user config from `dir/config.yaml` instead of the home directory.
    #[must_use]
    pub fn with_config_dir(mut self, dir: &Path) -> Self {
        self.config_dir = Some(dir.to_path_buf());
        self
    }

    /// Ignore configuration files.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignore environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Add a programmatic layer; later calls take precedence.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides.push(config);
        self
    }

    /// Validate installer labels against `registry` instead of the global one.
    #[must_use]
    pub fn with_registry(mut self, registry: InstallerRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Merge and validate all layers.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file cannot be read or parsed,
    /// an environment value is invalid, or the merged result fails
    /// validation.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::defaults();

        if !self.skip_files {
            let working_dir = match self.working_dir {
                Some(dir) => dir,
                None => env::current_dir()?,
            };
            let sources = ConfigLoader::load_all(&working_dir, self.config_dir.as_deref())?;
            config = ConfigMerger::merge(config, &sources);
        }

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        for layer in &self.overrides {
            ConfigMerger::merge_into(&mut config, layer);
        }

        match &self.registry {
            Some(registry) => ConfigValidator::validate(&config, registry)?,
            None => ConfigValidator::validate(&config, InstallerRegistry::global())?,
        }

        Ok(config)
    }
}
