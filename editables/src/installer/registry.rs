//! Ordered registry of install methods and the selection algorithm.

use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;

use super::{InstallMethod, PthFileInstaller, RedirectorInstaller, SymlinkInstaller};
use crate::error::{Error, Result};
use crate::strategy::EditableStrategy;

static GLOBAL_REGISTRY: Lazy<InstallerRegistry> = Lazy::new(InstallerRegistry::builtin);

/// Install methods ordered by priority.
///
/// Lower priorities come first; equal priorities keep registration order.
/// Labels are unique.
///
/// # Examples
///
/// ```
/// use editables::installer::InstallerRegistry;
///
/// let registry = InstallerRegistry::builtin();
/// let labels: Vec<_> = registry.labels().collect();
/// assert_eq!(labels, ["symlink", "redirector", "pth_file"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InstallerRegistry {
    methods: Vec<Arc<dyn InstallMethod>>,
}

impl InstallerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in methods.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for method in builtin_methods() {
            if let Err(e) = registry.register_arc(method) {
                log::warn!("skipping built-in installer: {e}");
            }
        }
        registry
    }

    /// The process-wide registry of built-in methods, built on first use.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL_REGISTRY
    }

    /// Register a method at the position given by its priority.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateInstaller`] if the label is taken.
    pub fn register<M: InstallMethod + 'static>(&mut self, method: M) -> Result<()> {
        self.register_arc(Arc::new(method))
    }

    /// Register a shared method at the position given by its priority.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateInstaller`] if the label is taken.
    pub fn register_arc(&mut self, method: Arc<dyn InstallMethod>) -> Result<()> {
        if self.get(method.label()).is_some() {
            return Err(Error::DuplicateInstaller {
                label: method.label().to_string(),
            });
        }

        let position = self
            .methods
            .iter()
            .position(|m| m.priority() > method.priority())
            .unwrap_or(self.methods.len());
        log::debug!(
            "registered installer '{}' (priority {}) at position {position}",
            method.label(),
            method.priority()
        );
        self.methods.insert(position, method);
        Ok(())
    }

    /// Look up a method by label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&Arc<dyn InstallMethod>> {
        self.methods.iter().find(|m| m.label() == label)
    }

    /// Iterate over methods in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn InstallMethod>> + '_ {
        self.methods.iter()
    }

    /// Iterate over labels in priority order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.methods.iter().map(|m| m.label())
    }

    /// Number of registered methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Whether no methods are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Pick the method to use for `strategy` in `output_directory`.
    ///
    /// `labels` is an ordered fallback chain: only those methods are
    /// considered, in the given order. An empty chain considers every
    /// method in priority order. The first candidate supporting the
    /// strategy and capable for the directory wins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownInstaller`] for an unregistered label and
    /// [`Error::NoInstaller`] when no candidate qualifies.
    pub fn select(
        &self,
        output_directory: &Path,
        strategy: EditableStrategy,
        labels: &[&str],
    ) -> Result<Arc<dyn InstallMethod>> {
        let candidates: Vec<&Arc<dyn InstallMethod>> = if labels.is_empty() {
            self.methods.iter().collect()
        } else {
            labels
                .iter()
                .map(|label| {
                    self.get(label).ok_or_else(|| Error::UnknownInstaller {
                        label: (*label).to_string(),
                    })
                })
                .collect::<Result<_>>()?
        };

        for method in candidates {
            if !method.supports(strategy) {
                log::debug!("installer '{}' does not support {strategy}", method.label());
                continue;
            }
            if !method.is_capable(output_directory) {
                log::debug!(
                    "installer '{}' is not capable in {}",
                    method.label(),
                    output_directory.display()
                );
                continue;
            }
            log::debug!("selected installer '{}' for {strategy}", method.label());
            return Ok(Arc::clone(method));
        }

        Err(Error::NoInstaller { strategy })
    }
}

fn builtin_methods() -> [Arc<dyn InstallMethod>; 3] {
    [
        Arc::new(SymlinkInstaller),
        Arc::new(RedirectorInstaller),
        Arc::new(PthFileInstaller),
    ]
}
