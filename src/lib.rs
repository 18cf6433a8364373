pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{Cli, Command, ImportArgs};

pub use adapters::{json_store::JsonFileCustomerRepository, memory::InMemoryCustomerRepository};
pub use config::ImportSettings;
pub use crate::core::importer::{exit_code, import_into_store, CustomerImporter};
pub use domain::model::{Customer, CustomerRecord, ImportFormat, ImportSummary, StoreContext};
pub use utils::error::{ImportError, Result};
