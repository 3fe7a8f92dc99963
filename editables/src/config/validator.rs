//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::installer::InstallerRegistry;
use crate::logging::LogLevel;

/// Validates a merged configuration against an installer registry.
///
/// # Examples
///
/// ```
/// use editables::config::{Config, ConfigValidator};
/// use editables::installer::InstallerRegistry;
///
/// let config = Config {
///     installer: Some(vec!["hardlink".to_string()]),
///     ..Config::defaults()
/// };
/// assert!(ConfigValidator::validate(&config, &InstallerRegistry::builtin()).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an empty or unregistered installer
    /// label, an installer chain where no member supports the configured
    /// strategy, an empty record path or an unknown log mode.
    pub fn validate(config: &Config, registry: &InstallerRegistry) -> Result<()> {
        let labels = config.installer_labels();
        let mut methods = Vec::with_capacity(labels.len());
        for label in labels {
            let label = label.as_str();
            if label.trim().is_empty() {
                return Err(Error::Validation {
                    field: "installer".into(),
                    message: "Installer label cannot be empty".into(),
                });
            }

            let Some(method) = registry.get(label) else {
                let known: Vec<_> = registry.labels().collect();
                return Err(Error::Validation {
                    field: "installer".into(),
                    message: format!(
                        "Unknown installer '{label}' (known: {})",
                        known.join(", ")
                    ),
                });
            };
            methods.push((label, method));
        }

        // A chain only needs one member able to honour the strategy.
        if let Some(strategy) = config.strategy {
            let capable = methods.iter().any(|(_, method)| method.supports(strategy));
            if !methods.is_empty() && !capable {
                let names: Vec<_> = methods.iter().map(|(label, _)| *label).collect();
                let message = match names.as_slice() {
                    [label] => {
                        format!("Installer '{label}' does not support strategy '{strategy}'")
                    }
                    _ => format!(
                        "None of the installers '{}' support strategy '{strategy}'",
                        names.join(", ")
                    ),
                };
                return Err(Error::Validation {
                    field: "installer".into(),
                    message,
                });
            }
        }

        if let Some(record) = &config.record {
            if record.as_os_str().is_empty() {
                return Err(Error::Validation {
                    field: "record".into(),
                    message: "Record path cannot be empty".into(),
                });
            }
        }

        if let Some(mode) = &config.log_mode {
            LogLevel::parse(mode).map_err(|message| Error::Validation {
                field: "log_mode".into(),
                message,
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::EditableStrategy;
    use std::path::PathBuf;

    fn validate(config: &Config) -> Result<()> {
        ConfigValidator::validate(config, &InstallerRegistry::builtin())
    }

    fn field(err: Error) -> String {
        match err {
            Error::Validation { field, .. } => field,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_empty_config() {
        validate(&Config::default()).unwrap();
        validate(&Config::defaults()).unwrap();
    }

    #[test]
    fn test_known_installers() {
        for label in ["symlink", "redirector", "pth_file"] {
            let config = Config {
                installer: Some(vec![label.to_string()]),
                ..Config::defaults()
            };
            validate(&config).unwrap();
        }
    }

    #[test]
    fn test_unknown_installer() {
        let config = Config {
            installer: Some(vec!["hardlink".to_string()]),
            ..Default::default()
        };
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("known: symlink, redirector, pth_file"));
    }

    #[test]
    fn test_empty_installer() {
        let config = Config {
            installer: Some(vec!["  ".to_string()]),
            ..Default::default()
        };
        assert_eq!(field(validate(&config).unwrap_err()), "installer");
    }

    #[test]
    fn test_installer_strategy_mismatch() {
        let config = Config {
            strategy: Some(EditableStrategy::Strict),
            installer: Some(vec!["pth_file".to_string()]),
            ..Default::default()
        };
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("does not support strategy 'strict'"));
    }

    #[test]
    fn test_chain_needs_one_capable_member() {
        let mut config = Config {
            strategy: Some(EditableStrategy::Strict),
            installer: Some(vec!["pth_file".to_string(), "symlink".to_string()]),
            ..Default::default()
        };
        validate(&config).unwrap();

        config.installer = Some(vec!["redirector".to_string(), "pth_file".to_string()]);
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("'redirector, pth_file'"));
    }

    #[test]
    fn test_chain_with_unknown_member() {
        let config = Config {
            installer: Some(vec!["symlink".to_string(), "copy".to_string()]),
            ..Default::default()
        };
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("Unknown installer 'copy'"));
    }

    #[test]
    fn test_empty_record() {
        let config = Config {
            record: Some(PathBuf::new()),
            ..Default::default()
        };
        assert_eq!(field(validate(&config).unwrap_err()), "record");
    }

    #[test]
    fn test_log_mode() {
        let mut config = Config {
            log_mode: Some("VERBOSE".to_string()),
            ..Default::default()
        };
        validate(&config).unwrap();

        config.log_mode = Some("loud".to_string());
        assert_eq!(field(validate(&config).unwrap_err()), "log_mode");
    }
}
