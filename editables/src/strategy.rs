//! Editable installation strategies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How finely an installer links the source tree into the output directory.
///
/// Strategies are ordered from coarsest to finest.
///
/// # Examples
///
/// ```
/// use editables::EditableStrategy;
///
/// let strategy: EditableStrategy = "strict".parse().unwrap();
/// assert_eq!(strategy, EditableStrategy::Strict);
/// assert_eq!(EditableStrategy::Lax.to_string(), "lax");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EditableStrategy {
    /// Link only the outermost directories and top-level modules.
    ///
    /// Files added under a linked directory are picked up without
    /// reinstalling; new top-level packages are not.
    #[default]
    Lax,
    /// Link every individual file.
    Strict,
}

impl EditableStrategy {
    /// All strategies, coarsest first.
    pub const ALL: [Self; 2] = [Self::Lax, Self::Strict];

    /// The lowercase name of the strategy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lax => "lax",
            Self::Strict => "strict",
        }
    }
}

impl fmt::Display for EditableStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditableStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lax" => Ok(Self::Lax),
            "strict" => Ok(Self::Strict),
            _ => Err(Error::Validation {
                field: "strategy".to_string(),
                message: format!("unknown strategy '{s}' (expected 'lax' or 'strict')"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("LAX".parse::<EditableStrategy>().unwrap(), EditableStrategy::Lax);
        assert_eq!(
            "Strict".parse::<EditableStrategy>().unwrap(),
            EditableStrategy::Strict
        );
        assert!("loose".parse::<EditableStrategy>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&EditableStrategy::Strict).unwrap();
        assert_eq!(json, "\"strict\"");
        let parsed: EditableStrategy = serde_json::from_str("\"lax\"").unwrap();
        assert_eq!(parsed, EditableStrategy::Lax);
    }
}
