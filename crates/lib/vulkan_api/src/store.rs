//! In-memory fixture store: the backend's two lists (domains and accounts).
//!
//! Each store is constructed explicitly and owned by one [`crate::AppState`];
//! there is no process-wide data.

use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use vulkan_core::models::{Domain, EmailAccount};

/// Length of generated account ids.
const ACCOUNT_ID_LEN: usize = 9;

/// Domain and account lists.
#[derive(Debug, Clone, Default)]
pub struct FixtureStore {
    domains: Vec<Domain>,
    accounts: Vec<EmailAccount>,
}

impl FixtureStore {
    pub fn new(domains: Vec<Domain>, accounts: Vec<EmailAccount>) -> Self {
        Self { domains, accounts }
    }

    /// Store seeded with the two fixture domains and three fixture accounts.
    pub fn seeded() -> Self {
        let domains = vec![
            Domain::new("1", "empresa.com"),
            Domain::new("2", "startup.io"),
        ];
        let accounts = vec![
            fixture_account("1", "1", "financeiro@empresa.com", 10240, false),
            fixture_account("2", "1", "contato@empresa.com", 5120, true),
            fixture_account("3", "2", "admin@startup.io", 20480, false),
        ];
        Self::new(domains, accounts)
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    /// Accounts whose `domain_id` matches, in insertion order.
    pub fn accounts_for(&self, domain_id: &str) -> Vec<EmailAccount> {
        self.accounts
            .iter()
            .filter(|a| a.domain_id == domain_id)
            .cloned()
            .collect()
    }

    pub fn account(&self, id: &str) -> Option<&EmailAccount> {
        self.accounts.iter().find(|a| a.id == id)
    }

    /// Append a new, unblocked account with a freshly generated id.
    pub fn insert_account(&mut self, domain_id: &str, email: &str, storage: u64) -> EmailAccount {
        let account = EmailAccount {
            id: self.generate_id(),
            domain_id: domain_id.to_string(),
            email: email.to_string(),
            storage,
            is_blocked: false,
        };
        self.accounts.push(account.clone());
        account
    }

    pub fn remove_account(&mut self, id: &str) -> Option<EmailAccount> {
        let index = self.accounts.iter().position(|a| a.id == id)?;
        Some(self.accounts.remove(index))
    }

    /// Flip `is_blocked`, returning the updated account.
    pub fn toggle_block(&mut self, id: &str) -> Option<EmailAccount> {
        let account = self.accounts.iter_mut().find(|a| a.id == id)?;
        account.is_blocked = !account.is_blocked;
        Some(account.clone())
    }

    /// Set the storage quota, returning the updated account.
    pub fn set_storage(&mut self, id: &str, storage: u64) -> Option<EmailAccount> {
        let account = self.accounts.iter_mut().find(|a| a.id == id)?;
        account.storage = storage;
        Some(account.clone())
    }

    /// Random lowercase alphanumeric id, distinct from every existing id.
    fn generate_id(&self) -> String {
        loop {
            let id: String = rng()
                .sample_iter(&Alphanumeric)
                .take(ACCOUNT_ID_LEN)
                .map(|b| char::from(b).to_ascii_lowercase())
                .collect();
            if self.account(&id).is_none() {
                return id;
            }
        }
    }
}

fn fixture_account(
    id: &str,
    domain_id: &str,
    email: &str,
    storage: u64,
    is_blocked: bool,
) -> EmailAccount {
    EmailAccount {
        id: id.to_string(),
        domain_id: domain_id.to_string(),
        email: email.to_string(),
        storage,
        is_blocked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_store_has_fixture_rows() {
        let store = FixtureStore::seeded();
        assert_eq!(store.domains().len(), 2);
        assert_eq!(store.accounts_for("1").len(), 2);
        assert_eq!(store.accounts_for("2").len(), 1);
        assert!(store.accounts_for("3").is_empty());
        assert!(store.account("2").unwrap().is_blocked);
    }

    #[test]
    fn insert_generates_distinct_lowercase_ids() {
        let mut store = FixtureStore::seeded();
        let mut ids = std::collections::HashSet::new();
        for i in 0..50 {
            let account = store.insert_account("2", &format!("user{i}@startup.io"), 100);
            assert_eq!(account.id.len(), ACCOUNT_ID_LEN);
            assert!(
                account
                    .id
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            );
            assert!(!account.is_blocked);
            assert!(ids.insert(account.id));
        }
        assert_eq!(store.accounts_for("2").len(), 51);
    }

    #[test]
    fn toggle_twice_restores_state() {
        let mut store = FixtureStore::seeded();
        assert!(!store.toggle_block("2").unwrap().is_blocked);
        assert!(store.toggle_block("2").unwrap().is_blocked);
        assert!(store.toggle_block("missing").is_none());
    }

    #[test]
    fn remove_and_set_storage() {
        let mut store = FixtureStore::seeded();
        assert_eq!(store.set_storage("3", 99).unwrap().storage, 99);
        assert_eq!(store.remove_account("3").unwrap().email, "admin@startup.io");
        assert!(store.remove_account("3").is_none());
        assert!(store.set_storage("3", 1).is_none());
    }
}
