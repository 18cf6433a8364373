#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::StoreContext;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ImportError, Result};
use crate::utils::validation::{validate_delimiter, validate_path, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_IMPORT_DIR: &str = "var/import";
pub const DEFAULT_CUSTOMER_STORE: &str = "var/customers.json";

/// Settings for one import run, after defaults, file and command line are merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSettings {
    pub import_dir: String,
    pub delimiter: char,
    pub website_id: u32,
    pub store_id: u32,
    pub customer_store: String,
}

impl Default for ImportSettings {
    fn default() -> Self {
        let context = StoreContext::default();
        Self {
            import_dir: DEFAULT_IMPORT_DIR.to_string(),
            delimiter: ',',
            website_id: context.website_id,
            store_id: context.store_id,
            customer_store: DEFAULT_CUSTOMER_STORE.to_string(),
        }
    }
}

impl ConfigProvider for ImportSettings {
    fn import_dir(&self) -> &str {
        &self.import_dir
    }

    fn delimiter(&self) -> Result<u8> {
        validate_delimiter("delimiter", self.delimiter)?;
        u8::try_from(self.delimiter).map_err(|_| ImportError::InvalidConfigValueError {
            field: "delimiter".to_string(),
            value: self.delimiter.to_string(),
            reason: "Delimiter must be a single ASCII character".to_string(),
        })
    }

    fn store_context(&self) -> StoreContext {
        StoreContext {
            website_id: self.website_id,
            store_id: self.store_id,
        }
    }

    fn customer_store_path(&self) -> &str {
        &self.customer_store
    }
}

impl Validate for ImportSettings {
    fn validate(&self) -> Result<()> {
        validate_path("import_dir", &self.import_dir)?;
        validate_path("customer_store", &self.customer_store)?;
        validate_delimiter("delimiter", self.delimiter)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = ImportSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.import_dir(), "var/import");
        assert_eq!(settings.delimiter().unwrap(), b',');
        assert_eq!(settings.store_context(), StoreContext::default());
    }

    #[test]
    fn test_invalid_delimiter_is_rejected() {
        let settings = ImportSettings {
            delimiter: '"',
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_non_ascii_delimiter_is_not_truncated() {
        let settings = ImportSettings {
            delimiter: 'é',
            ..Default::default()
        };
        assert!(matches!(
            settings.delimiter(),
            Err(ImportError::InvalidConfigValueError { ref field, .. }) if field == "delimiter"
        ));

        let settings = ImportSettings {
            delimiter: ';',
            ..Default::default()
        };
        assert_eq!(settings.delimiter().unwrap(), b';');
    }
}
