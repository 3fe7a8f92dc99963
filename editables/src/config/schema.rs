//! Configuration schema definitions.
//!
//! Every field is optional so that partial files from several locations
//! can be layered over each other.

use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

use crate::installer::InstallOptions;
use crate::strategy::EditableStrategy;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use editables::config::Config;
/// use editables::EditableStrategy;
///
/// let config: Config = serde_yaml::from_str("strategy: strict\ninstaller: symlink\n").unwrap();
/// assert_eq!(config.strategy, Some(EditableStrategy::Strict));
/// assert_eq!(config.installer_labels(), ["symlink"]);
///
/// let chain: Config = serde_yaml::from_str("installer: [symlink, redirector]\n").unwrap();
/// assert_eq!(chain.installer_labels(), ["symlink", "redirector"]);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default strategy for installs.
    pub strategy: Option<EditableStrategy>,

    /// Installer labels to try, in order, instead of automatic selection.
    ///
    /// Accepts a single label or a list.
    #[serde(default, deserialize_with = "one_or_many")]
    pub installer: Option<Vec<String>>,

    /// Install-receipt ledger to append created files to.
    pub record: Option<PathBuf>,

    /// Log verbosity (`quiet`, `normal`, `verbose`).
    pub log_mode: Option<String>,
}

impl Config {
    /// Built-in defaults, the lowest configuration layer.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            strategy: Some(EditableStrategy::default()),
            ..Self::default()
        }
    }

    /// The configured installer chain; empty when unset.
    #[must_use]
    pub fn installer_labels(&self) -> &[String] {
        self.installer.as_deref().unwrap_or_default()
    }

    /// The configured strategy, or the default one.
    #[must_use]
    pub fn strategy_or_default(&self) -> EditableStrategy {
        self.strategy.unwrap_or_default()
    }

    /// Install options described by this configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use editables::config::Config;
    ///
    /// let config = Config {
    ///     installer: Some(vec!["pth_file".to_string()]),
    ///     ..Config::defaults()
    /// };
    /// let options = config.install_options();
    /// assert_eq!(options.installers(), ["pth_file"]);
    /// assert!(options.record().is_none());
    /// ```
    #[must_use]
    pub fn install_options(&self) -> InstallOptions {
        let mut options = InstallOptions::new(self.strategy_or_default())
            .with_installers(self.installer_labels().iter().cloned());
        if let Some(record) = &self.record {
            options = options.with_record(record.clone());
        }
        options
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<OneOrMany>::deserialize(deserializer)?.map(|value| match value {
            OneOrMany::One(label) => vec![label],
            OneOrMany::Many(labels) => labels,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_is_empty_config() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r"
strategy: lax
installer: redirector
record: /venv/lib/site-packages/foo-1.0.dist-info/RECORD
log_mode: verbose
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.strategy, Some(EditableStrategy::Lax));
        assert_eq!(config.installer_labels(), ["redirector"]);
        assert_eq!(
            config.record,
            Some(PathBuf::from("/venv/lib/site-packages/foo-1.0.dist-info/RECORD"))
        );
        assert_eq!(config.log_mode.as_deref(), Some("verbose"));
    }

    #[test]
    fn test_installer_chain() {
        let config: Config =
            serde_yaml::from_str("installer:\n  - symlink\n  - pth_file\n").unwrap();
        assert_eq!(config.installer_labels(), ["symlink", "pth_file"]);

        let options = config.install_options();
        assert_eq!(options.installers(), ["symlink", "pth_file"]);
        assert!(Config::default().installer_labels().is_empty());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Config, _> = serde_yaml::from_str("strategy: lax\nports: 5\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let result: Result<Config, _> = serde_yaml::from_str("strategy: loose\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults_strategy() {
        assert_eq!(Config::defaults().strategy, Some(EditableStrategy::Lax));
        assert_eq!(Config::default().strategy_or_default(), EditableStrategy::Lax);
    }
}
