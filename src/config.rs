use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CrossdocError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Link synthesis settings
    pub links: LinkConfig,
}

/// Shape of the output identifiers produced by the link synthesizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Filename prefix for class/interface/trait pages
    pub type_prefix: String,

    /// Filename prefix for function pages (kept distinct so the output
    /// namespace never collides with type identifiers)
    pub function_prefix: String,

    /// Replacement for the namespace separator in filenames
    pub namespace_delimiter: String,

    /// Output file extension
    pub extension: String,

    /// Anchor prefix marking synthetic (annotation-declared) members
    pub magic_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            links: LinkConfig::default(),
        }
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            type_prefix: "class".to_string(),
            function_prefix: "function".to_string(),
            namespace_delimiter: ".".to_string(),
            extension: "html".to_string(),
            magic_prefix: "m".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| CrossdocError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| CrossdocError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration with fallback to default
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => {
                if p.as_ref().exists() {
                    Self::load(p)
                } else {
                    Ok(Self::default())
                }
            }
            None => {
                // Try common config file locations
                let candidates = ["Crossdoc.toml", "crossdoc.toml", ".crossdoc.toml"];

                for candidate in &candidates {
                    if Path::new(candidate).exists() {
                        return Self::load(candidate);
                    }
                }

                Ok(Self::default())
            }
        }
    }
}
