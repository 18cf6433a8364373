use crate::adapters::table::CustomerTable;
use crate::domain::model::Customer;
use crate::domain::ports::CustomerRepository;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Customer store kept in a single JSON file.
///
/// The whole table is rewritten after every successful save, so each saved
/// record is durable on its own and nothing is rolled back when a later
/// record fails.
#[derive(Debug)]
pub struct JsonFileCustomerRepository {
    path: PathBuf,
    table: Mutex<CustomerTable>,
}

impl JsonFileCustomerRepository {
    /// Loads the table from `path`; a missing file starts an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let table = if path.exists() {
            let data = fs::read(&path)?;
            serde_json::from_slice(&data)?
        } else {
            CustomerTable::default()
        };

        tracing::debug!(
            "opened customer store {} ({} customers)",
            path.display(),
            table.customers().len()
        );

        Ok(Self {
            path,
            table: Mutex::new(table),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn customers(&self) -> Vec<Customer> {
        self.table.lock().await.customers().to_vec()
    }

    fn write_table(&self, table: &CustomerTable) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(table)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

#[async_trait]
impl CustomerRepository for JsonFileCustomerRepository {
    async fn find_by_email(&self, email: &str, website_id: u32) -> Result<Option<Customer>> {
        let table = self.table.lock().await;
        Ok(table.find_by_email(email, website_id).cloned())
    }

    async fn save(&self, customer: Customer) -> Result<Customer> {
        let mut table = self.table.lock().await;

        // Commit in memory only once the file write went through.
        let mut next = table.clone();
        let saved = next.upsert(customer)?;
        self.write_table(&next)?;
        *table = next;

        Ok(saved)
    }
}
