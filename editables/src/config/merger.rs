//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration layers according to precedence rules.
///
/// # Examples
///
/// ```
/// use editables::config::{Config, ConfigMerger};
///
/// let low = Config { installer: Some(vec!["pth_file".to_string()]), ..Default::default() };
/// let high = Config { installer: Some(vec!["symlink".to_string()]), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.installer_labels(), ["symlink"]);
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge sources, given from lowest to highest precedence, over `base`.
    #[must_use]
    pub fn merge(base: Config, sources: &[ConfigSource]) -> Config {
        let mut result = base;
        for source in sources {
            log::debug!(
                "applying config {} (precedence {})",
                source.path.display(),
                source.precedence
            );
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge `source` into `target`; every field set in `source` wins.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.strategy.is_some() {
            target.strategy = source.strategy;
        }
        if source.installer.is_some() {
            target.installer.clone_from(&source.installer);
        }
        if source.record.is_some() {
            target.record.clone_from(&source.record);
        }
        if source.log_mode.is_some() {
            target.log_mode.clone_from(&source.log_mode);
        }
    }
}
