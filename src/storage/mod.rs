//! Storage capability for accounts and its implementations.

mod memory;
mod postgres;

pub use memory::MemoryAccountStore;
pub use postgres::{ensure_database_exists, PgAccountStore};

use crate::error::AppError;
use crate::model::{Account, NewAccount};
use async_trait::async_trait;
use uuid::Uuid;

/// Durable CRUD over the `account` table. Handlers hold it as `Arc<dyn AccountStore>`.
///
/// Lookups, updates and deletes that match no row fail with [`AppError::NotFound`].
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Idempotently create the table and anything its defaults depend on.
    async fn initialize(&self) -> Result<(), AppError>;

    async fn list_all(&self) -> Result<Vec<Account>, AppError>;

    async fn get_by_id(&self, uuid: Uuid) -> Result<Account, AppError>;

    /// Insert and return the row as stored, including defaulted columns.
    async fn create(&self, account: &NewAccount) -> Result<Account, AppError>;

    /// Write first name, last name and email; refreshes `updated_at`.
    async fn update(&self, account: &Account) -> Result<Account, AppError>;

    async fn delete(&self, uuid: Uuid) -> Result<(), AppError>;

    /// Cheap connectivity check for readiness probes.
    async fn ping(&self) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CreateAccountRequest, UpdateAccountRequest};

    fn new_account(first: &str, last: &str, email: &str) -> NewAccount {
        NewAccount::new(CreateAccountRequest {
            first_name: first.into(),
            last_name: last.into(),
            email: email.into(),
        })
    }

    #[tokio::test]
    async fn create_returns_stored_row_with_defaults() {
        let store = MemoryAccountStore::new();
        store.initialize().await.unwrap();
        let input = new_account("Hector", "Avalos", "h@x.com");
        let created = store.create(&input).await.unwrap();
        assert_eq!(created.uuid, input.uuid);
        assert_eq!(created.client_code, 0);
        assert!(created.balance.is_zero());
        assert_eq!(created.created_at, created.updated_at);

        let fetched = store.get_by_id(created.uuid).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let store = MemoryAccountStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(store.get_by_id(id).await, Err(AppError::NotFound)));
        assert!(matches!(store.delete(id).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn update_refreshes_updated_at_only() {
        let store = MemoryAccountStore::new();
        let created = store.create(&new_account("A", "B", "c@d.com")).await.unwrap();
        let mut changed = created.clone();
        changed.apply(UpdateAccountRequest {
            first_name: "Z".into(),
            ..Default::default()
        });
        let updated = store.update(&changed).await.unwrap();
        assert_eq!(updated.first_name, "Z");
        assert_eq!(updated.last_name, "B");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn update_of_deleted_row_is_not_found() {
        let store = MemoryAccountStore::new();
        let created = store.create(&new_account("A", "B", "c@d.com")).await.unwrap();
        store.delete(created.uuid).await.unwrap();
        assert!(matches!(store.update(&created).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn duplicate_identifier_is_rejected() {
        let store = MemoryAccountStore::new();
        let input = new_account("A", "B", "c@d.com");
        store.create(&input).await.unwrap();
        let err = store.create(&input).await.unwrap_err();
        assert!(matches!(err, AppError::Db(_)));
        assert_eq!(err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_is_in_creation_order() {
        let store = MemoryAccountStore::new();
        assert!(store.list_all().await.unwrap().is_empty());
        let a = store.create(&new_account("A", "A", "a@x.com")).await.unwrap();
        let b = store.create(&new_account("B", "B", "b@x.com")).await.unwrap();
        let ids: Vec<Uuid> = store.list_all().await.unwrap().into_iter().map(|a| a.uuid).collect();
        assert_eq!(ids, vec![a.uuid, b.uuid]);
    }
}
