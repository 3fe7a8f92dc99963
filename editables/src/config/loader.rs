//! Configuration file discovery and loading.
//!
//! Files are looked up in two places: the user config directory and the
//! nearest project directory at or above the working directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Project configuration file name.
pub const PROJECT_CONFIG_FILE: &str = "editables.yaml";

/// Uncommitted project configuration file name, layered over the project file.
pub const LOCAL_CONFIG_FILE: &str = "editables.local.yaml";

/// Directory under the home directory holding the user config.
pub const USER_CONFIG_DIR: &str = ".editables";

/// Configuration source with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration from the known file locations.
///
/// # Examples
///
/// ```no_run
/// use editables::config::ConfigLoader;
/// use std::path::Path;
///
/// let sources = ConfigLoader::load_all(Path::new("."), None).unwrap();
/// println!("Found {} configuration sources", sources.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Discover and load all configuration files.
    ///
    /// Searches for:
    /// 1. User config at `~/.editables/config.yaml` (precedence 1)
    /// 2. `editables.yaml` walking up from `working_dir` (precedence 2)
    /// 3. `editables.local.yaml` next to it (precedence 3)
    ///
    /// `config_dir` overrides where the user config is loaded from.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration file exists but cannot be read
    /// or parsed.
    pub fn load_all(working_dir: &Path, config_dir: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();

        if let Some(user_config) = Self::load_user_config(config_dir)? {
            sources.push(user_config);
        }
        sources.extend(Self::discover_project_configs(working_dir)?);

        sources.sort_by_key(|s| s.precedence);
        Ok(sources)
    }

    fn load_user_config(config_dir: Option<&Path>) -> Result<Option<ConfigSource>> {
        let config_path = match config_dir {
            Some(dir) => dir.join("config.yaml"),
            None => match Self::user_config_path() {
                Some(path) => path,
                None => {
                    log::debug!("no home directory, skipping user config");
                    return Ok(None);
                }
            },
        };

        if !config_path.exists() {
            return Ok(None);
        }

        let config = Self::load_file(&config_path)?;
        Ok(Some(ConfigSource {
            path: config_path,
            precedence: 1,
            config,
        }))
    }

    /// Discover project configurations by walking up directories.
    ///
    /// Stops at the first directory containing either project file.
    ///
    /// # Errors
    ///
    /// Returns an error if any discovered file cannot be read or parsed.
    pub fn discover_project_configs(start_dir: &Path) -> Result<Vec<ConfigSource>> {
        let mut configs = Vec::new();
        let mut current = start_dir.to_path_buf();

        loop {
            for (name, precedence) in [(PROJECT_CONFIG_FILE, 2), (LOCAL_CONFIG_FILE, 3)] {
                let path = current.join(name);
                if path.exists() {
                    log::debug!("loading project config {}", path.display());
                    let config = Self::load_file(&path)?;
                    configs.push(ConfigSource {
                        path,
                        precedence,
                        config,
                    });
                }
            }

            if !configs.is_empty() || !current.pop() {
                break;
            }
        }

        Ok(configs)
    }

    /// Load and parse a YAML configuration file.
    ///
    /// An empty file is an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read configuration file: {e}"),
        })?;

        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Path of the user configuration file, if a home directory is known.
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        home::home_dir().map(|home| home.join(USER_CONFIG_DIR).join("config.yaml"))
    }
}
