use crate::config::consts::attributes;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// tmplparts engine settings
///
/// ```toml
/// boolean_attributes = ["hidden", "disabled"]
/// strict_params = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    /// Attribute names treated as whole-value contexts
    #[serde(default = "default_boolean_attributes")]
    pub boolean_attributes: Vec<String>,
    /// Fail on expressions missing from params instead of skipping them
    #[serde(default)]
    pub strict_params: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            boolean_attributes: default_boolean_attributes(),
            strict_params: false,
        }
    }
}

fn default_boolean_attributes() -> Vec<String> {
    attributes::BOOLEAN.iter().map(|s| s.to_string()).collect()
}

impl EngineConfig {
    /// Parse settings from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Whether `name` is a whole-value attribute context (ASCII case-insensitive)
    pub fn is_boolean_attribute(&self, name: &str) -> bool {
        self.boolean_attributes
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(name))
    }
}
