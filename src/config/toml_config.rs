use crate::config::ImportSettings;
use crate::utils::error::{ImportError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional settings file. Every section and key may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub import: Option<ImportSection>,
    pub store: Option<StoreSection>,
    pub persistence: Option<PersistenceSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportSection {
    pub directory: Option<String>,
    pub delimiter: Option<char>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSection {
    pub website_id: Option<u32>,
    pub store_id: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistenceSection {
    pub customer_store: Option<String>,
}

impl TomlConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| ImportError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ImportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` references with environment values; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ImportError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Overlays the keys present in this file onto `settings`.
    pub fn apply_to(&self, settings: &mut ImportSettings) {
        if let Some(import) = &self.import {
            if let Some(directory) = &import.directory {
                settings.import_dir = directory.clone();
            }
            if let Some(delimiter) = import.delimiter {
                settings.delimiter = delimiter;
            }
        }
        if let Some(store) = &self.store {
            if let Some(website_id) = store.website_id {
                settings.website_id = website_id;
            }
            if let Some(store_id) = store.store_id {
                settings.store_id = store_id;
            }
        }
        if let Some(persistence) = &self.persistence {
            if let Some(customer_store) = &persistence.customer_store {
                settings.customer_store = customer_store.clone();
            }
        }
    }

    pub fn into_settings(self) -> ImportSettings {
        let mut settings = ImportSettings::default();
        self.apply_to(&mut settings);
        settings
    }
}
