use crate::adapters::table::CustomerTable;
use crate::domain::model::Customer;
use crate::domain::ports::CustomerRepository;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct MemoryState {
    table: CustomerTable,
    saved_emails: Vec<String>,
    lookups: usize,
}

/// Process-local customer store. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn customers(&self) -> Vec<Customer> {
        self.state.lock().await.table.customers().to_vec()
    }

    /// Emails of successful saves, in call order.
    pub async fn saved_emails(&self) -> Vec<String> {
        self.state.lock().await.saved_emails.clone()
    }

    pub async fn lookup_count(&self) -> usize {
        self.state.lock().await.lookups
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_email(&self, email: &str, website_id: u32) -> Result<Option<Customer>> {
        let mut state = self.state.lock().await;
        state.lookups += 1;
        Ok(state.table.find_by_email(email, website_id).cloned())
    }

    async fn save(&self, customer: Customer) -> Result<Customer> {
        let mut state = self.state.lock().await;
        let saved = state.table.upsert(customer)?;
        state.saved_emails.push(saved.email.clone());
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_state() {
        let repository = InMemoryCustomerRepository::new();
        let handle = repository.clone();

        let mut customer = repository.create();
        customer.email = "a@b.com".to_string();
        customer.first_name = "Ann".to_string();
        customer.last_name = "Lee".to_string();
        customer.website_id = 1;
        repository.save(customer).await.unwrap();

        assert!(handle.find_by_email("a@b.com", 1).await.unwrap().is_some());
        assert!(handle.find_by_email("a@b.com", 2).await.unwrap().is_none());
        assert_eq!(handle.lookup_count().await, 2);
        assert_eq!(handle.saved_emails().await, ["a@b.com"]);
    }

    #[tokio::test]
    async fn test_rejected_save_is_not_logged() {
        let repository = InMemoryCustomerRepository::new();
        let customer = repository.create();

        assert!(repository.save(customer).await.is_err());
        assert!(repository.saved_emails().await.is_empty());
        assert!(repository.customers().await.is_empty());
    }
}
