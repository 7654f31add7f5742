//! Parser configuration.
//!
//! Naming conventions of the target library are passed explicitly to the
//! parser through [`ParserConfig`]; nothing here is process-global.

use anyhow::{Context, Result};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};

/// Naming conventions of the library the package extends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Lowercase language name (e.g. `"sbml"`).
    pub name: String,
    /// Prefix used for generated constants (e.g. `"SBML"`).
    pub prefix: String,
    /// Class every element derives from unless it names its own `baseClass`.
    pub base_class: String,
    /// Prefix of ListOf wrapper class names; the XML name uses it with a
    /// lowercase first letter.
    pub list_of_prefix: String,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            name: "sbml".to_string(),
            prefix: "SBML".to_string(),
            base_class: "SBase".to_string(),
            list_of_prefix: "ListOf".to_string(),
        }
    }
}

/// Configuration handed to [`PackageParser`](crate::parser::PackageParser).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub language: LanguageConfig,
    /// Fail on plugin `<reference>`s that match no element instead of
    /// dropping them with a warning.
    pub strict_references: bool,
}

impl ParserConfig {
    /// Load configuration from a TOML file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Utf8Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path.as_std_path())
            .with_context(|| format!("Failed to read config {}", path))?;
        Self::from_toml_str(&content).with_context(|| format!("Invalid config {}", path))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_references = strict;
        self
    }
}
