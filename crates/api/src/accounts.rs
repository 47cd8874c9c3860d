//! In-memory account registry.
//!
//! Holds the accounts created by successful registrations so the login and
//! profile endpoints have something to authenticate against. Keyed by
//! lowercased email; email uniqueness is the only constraint.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use fibem_core::error::CoreError;
use fibem_core::role::Role;
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A registered account.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    /// PHC-formatted Argon2id hash. Never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub plan_id: Option<String>,
    pub on_trial: bool,
    pub created_at: DateTime<Utc>,
}

/// In-memory account registry keyed by lowercased email.
#[derive(Default)]
pub struct AccountStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new account. Fails with `Conflict` when the email is taken.
    pub async fn insert(&self, account: Account) -> Result<(), CoreError> {
        let key = account.email.to_lowercase();
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&key) {
            return Err(CoreError::Conflict(format!(
                "An account with email {} already exists",
                account.email
            )));
        }
        accounts.insert(key, account);
        Ok(())
    }

    /// Case-insensitive email lookup.
    pub async fn find_by_email(&self, email: &str) -> Option<Account> {
        self.accounts
            .read()
            .await
            .get(&email.to_lowercase())
            .cloned()
    }

    pub async fn find_by_id(&self, id: Uuid) -> Option<Account> {
        self.accounts
            .read()
            .await
            .values()
            .find(|a| a.id == id)
            .cloned()
    }

    pub async fn count(&self) -> usize {
        self.accounts.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn account(email: &str) -> Account {
        Account {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: "$argon2id$fake".to_string(),
            first_name: "Jeanne".to_string(),
            last_name: "Martin".to_string(),
            role: Role::Candidate,
            plan_id: None,
            on_trial: false,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn insert_and_lookup() {
        let store = AccountStore::new();
        let a = account("Jeanne@Example.fr");
        let id = a.id;
        store.insert(a).await.unwrap();

        // Lookup is case-insensitive.
        assert!(store.find_by_email("jeanne@example.fr").await.is_some());
        assert!(store.find_by_id(id).await.is_some());
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let store = AccountStore::new();
        store.insert(account("a@b.fr")).await.unwrap();
        let result = store.insert(account("A@B.FR")).await;
        assert_matches!(result, Err(CoreError::Conflict(_)));
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let json = serde_json::to_value(account("a@b.fr")).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "a@b.fr");
    }
}
