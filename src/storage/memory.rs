//! In-process account store with the same contract as the PostgreSQL one.

use super::AccountStore;
use crate::error::AppError;
use crate::model::{Account, NewAccount};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Rows kept in insertion order.
#[derive(Default)]
pub struct MemoryAccountStore {
    rows: RwLock<Vec<Account>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn initialize(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Account>, AppError> {
        Ok(self.rows.read().await.clone())
    }

    async fn get_by_id(&self, uuid: Uuid) -> Result<Account, AppError> {
        self.rows
            .read()
            .await
            .iter()
            .find(|a| a.uuid == uuid)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn create(&self, account: &NewAccount) -> Result<Account, AppError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|a| a.uuid == account.uuid) {
            return Err(AppError::Db(sqlx::Error::Protocol(format!(
                "duplicate key value violates unique constraint: account {} already exists",
                account.uuid
            ))));
        }
        let now = Utc::now();
        let row = Account {
            uuid: account.uuid,
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            email: account.email.clone(),
            client_code: 0,
            balance: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, account: &Account) -> Result<Account, AppError> {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|a| a.uuid == account.uuid)
            .ok_or(AppError::NotFound)?;
        row.first_name = account.first_name.clone();
        row.last_name = account.last_name.clone();
        row.email = account.email.clone();
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, uuid: Uuid) -> Result<(), AppError> {
        let mut rows = self.rows.write().await;
        let pos = rows
            .iter()
            .position(|a| a.uuid == uuid)
            .ok_or(AppError::NotFound)?;
        rows.remove(pos);
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
