use crate::domain::model::{Customer, StoreContext};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn import_dir(&self) -> &str;
    /// Single-byte CSV delimiter; a value that is not one is a configuration error.
    fn delimiter(&self) -> Result<u8>;
    fn store_context(&self) -> StoreContext;
    fn customer_store_path(&self) -> &str;
}

/// Persistence boundary for customer entities.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_by_email(&self, email: &str, website_id: u32) -> Result<Option<Customer>>;

    fn create(&self) -> Customer {
        Customer::default()
    }

    async fn save(&self, customer: Customer) -> Result<Customer>;
}
