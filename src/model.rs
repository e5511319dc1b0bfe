//! Account entity and request payloads.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted bank account row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub uuid: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub client_code: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Overlay the non-empty fields of `req` onto this account.
    pub fn apply(&mut self, req: UpdateAccountRequest) {
        if !req.first_name.is_empty() {
            self.first_name = req.first_name;
        }
        if !req.last_name.is_empty() {
            self.last_name = req.last_name;
        }
        if !req.email.is_empty() {
            self.email = req.email;
        }
    }
}

/// Body of `POST /account`. Absent fields decode as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateAccountRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Body of `PUT /account/{id}`. Empty or absent fields leave the stored value unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateAccountRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Account as handed to the store for insertion. Balance, client code and
/// timestamps come from the store defaults.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub uuid: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl NewAccount {
    pub fn new(req: CreateAccountRequest) -> Self {
        NewAccount {
            uuid: Uuid::new_v4(),
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
        }
    }
}
