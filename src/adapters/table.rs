use crate::domain::model::Customer;
use crate::utils::error::{ImportError, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Customer rows plus the id sequence, shared by the repository adapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerTable {
    next_id: u64,
    customers: Vec<Customer>,
}

impl Default for CustomerTable {
    fn default() -> Self {
        Self {
            next_id: 1,
            customers: Vec::new(),
        }
    }
}

impl CustomerTable {
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Emails are unique per website, compared case-insensitively.
    pub fn find_by_email(&self, email: &str, website_id: u32) -> Option<&Customer> {
        self.customers
            .iter()
            .find(|c| c.website_id == website_id && c.email.eq_ignore_ascii_case(email))
    }

    /// Inserts a new customer or replaces the stored row with the same id.
    pub fn upsert(&mut self, mut customer: Customer) -> Result<Customer> {
        validate_customer(&customer)?;

        if let Some(other) = self.find_by_email(&customer.email, customer.website_id) {
            if other.id != customer.id {
                return Err(rejected(
                    &customer,
                    "a customer with the same email already exists in this website",
                ));
            }
        }

        let now = Utc::now();
        customer.updated_at = Some(now);

        match customer.id {
            None => {
                customer.id = Some(self.next_id);
                customer.created_at = Some(now);
                self.next_id += 1;
                self.customers.push(customer.clone());
            }
            Some(id) => {
                let slot = self
                    .customers
                    .iter_mut()
                    .find(|c| c.id == Some(id))
                    .ok_or_else(|| rejected(&customer, &format!("no customer with id {}", id)))?;
                *slot = customer.clone();
            }
        }

        Ok(customer)
    }
}

fn validate_customer(customer: &Customer) -> Result<()> {
    if customer.email.trim().is_empty() {
        return Err(rejected(customer, "email is required"));
    }
    match customer.email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
        _ => return Err(rejected(customer, "invalid email address")),
    }
    if customer.first_name.trim().is_empty() {
        return Err(rejected(customer, "first name is required"));
    }
    if customer.last_name.trim().is_empty() {
        return Err(rejected(customer, "last name is required"));
    }
    Ok(())
}

fn rejected(customer: &Customer, message: &str) -> ImportError {
    ImportError::Persistence {
        email: customer.email.clone(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(email: &str, website_id: u32) -> Customer {
        Customer {
            email: email.to_string(),
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            website_id,
            store_id: 1,
            group_id: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_insert_assigns_ids_and_timestamps() {
        let mut table = CustomerTable::default();
        let first = table.upsert(customer("a@b.com", 1)).unwrap();
        let second = table.upsert(customer("c@d.com", 1)).unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert!(first.created_at.is_some());
        assert_eq!(table.customers().len(), 2);
    }

    #[test]
    fn test_update_replaces_row() {
        let mut table = CustomerTable::default();
        let mut saved = table.upsert(customer("a@b.com", 1)).unwrap();
        let created_at = saved.created_at;

        saved.first_name = "Annie".to_string();
        table.upsert(saved).unwrap();

        let stored = table.find_by_email("A@B.com", 1).unwrap();
        assert_eq!(stored.first_name, "Annie");
        assert_eq!(stored.created_at, created_at);
        assert_eq!(table.customers().len(), 1);
    }

    #[test]
    fn test_duplicate_email_is_rejected() {
        let mut table = CustomerTable::default();
        table.upsert(customer("a@b.com", 1)).unwrap();

        let err = table.upsert(customer("a@b.com", 1)).unwrap_err();
        assert!(matches!(err, ImportError::Persistence { .. }));
        assert!(table.upsert(customer("a@b.com", 2)).is_ok());
    }

    #[test]
    fn test_validation_rules() {
        let mut table = CustomerTable::default();
        assert!(table.upsert(customer("", 1)).is_err());
        assert!(table.upsert(customer("not-an-email", 1)).is_err());

        let mut nameless = customer("a@b.com", 1);
        nameless.last_name.clear();
        assert!(table.upsert(nameless).is_err());

        let mut ghost = customer("a@b.com", 1);
        ghost.id = Some(42);
        assert!(table.upsert(ghost).is_err());
        assert!(table.customers().is_empty());
    }
}
