//! PostgreSQL-backed account store.

use super::AccountStore;
use crate::config::Config;
use crate::error::{AppError, ConfigError};
use crate::model::{Account, NewAccount};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

const ACCOUNT_COLUMNS: &str =
    "uuid, first_name, last_name, email, client_code, balance, created_at, updated_at";

const CREATE_EXTENSION: &str = r#"CREATE EXTENSION IF NOT EXISTS "pgcrypto""#;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS account (
        uuid UUID PRIMARY KEY NOT NULL DEFAULT gen_random_uuid(),
        first_name VARCHAR(255) NOT NULL,
        last_name VARCHAR(255) NOT NULL,
        email VARCHAR(255) NOT NULL,
        client_code INTEGER NOT NULL DEFAULT 0,
        balance DECIMAL(16, 2) NOT NULL DEFAULT 0.0,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgAccountStore {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        PgAccountStore { pool, timeout }
    }

    /// Open a pool sized and bounded by `config`.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.store_timeout)
            .connect(&config.database_url)
            .await?;
        Ok(Self::new(pool, config.store_timeout))
    }

    async fn bounded<T, F>(&self, op: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.timeout, op).await {
            Ok(res) => res.map_err(AppError::from),
            Err(_) => Err(AppError::Timeout(self.timeout)),
        }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn initialize(&self) -> Result<(), AppError> {
        tracing::debug!(sql = %CREATE_EXTENSION, "query");
        self.bounded(sqlx::query(CREATE_EXTENSION).execute(&self.pool))
            .await?;
        tracing::debug!(sql = %CREATE_TABLE, "query");
        self.bounded(sqlx::query(CREATE_TABLE).execute(&self.pool))
            .await?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Account>, AppError> {
        let sql = format!(
            "SELECT {} FROM account ORDER BY created_at, uuid",
            ACCOUNT_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        self.bounded(sqlx::query_as::<_, Account>(&sql).fetch_all(&self.pool))
            .await
    }

    async fn get_by_id(&self, uuid: Uuid) -> Result<Account, AppError> {
        let sql = format!("SELECT {} FROM account WHERE uuid = $1", ACCOUNT_COLUMNS);
        tracing::debug!(sql = %sql, %uuid, "query");
        self.bounded(
            sqlx::query_as::<_, Account>(&sql)
                .bind(uuid)
                .fetch_optional(&self.pool),
        )
        .await?
        .ok_or(AppError::NotFound)
    }

    async fn create(&self, account: &NewAccount) -> Result<Account, AppError> {
        let sql = format!(
            "INSERT INTO account (uuid, first_name, last_name, email) VALUES ($1, $2, $3, $4) RETURNING {}",
            ACCOUNT_COLUMNS
        );
        tracing::debug!(sql = %sql, uuid = %account.uuid, "query");
        self.bounded(
            sqlx::query_as::<_, Account>(&sql)
                .bind(account.uuid)
                .bind(&account.first_name)
                .bind(&account.last_name)
                .bind(&account.email)
                .fetch_one(&self.pool),
        )
        .await
    }

    async fn update(&self, account: &Account) -> Result<Account, AppError> {
        let sql = format!(
            r#"UPDATE account
            SET first_name = $1, last_name = $2, email = $3, updated_at = NOW()
            WHERE uuid = $4
            RETURNING {}"#,
            ACCOUNT_COLUMNS
        );
        tracing::debug!(sql = %sql, uuid = %account.uuid, "query");
        self.bounded(
            sqlx::query_as::<_, Account>(&sql)
                .bind(&account.first_name)
                .bind(&account.last_name)
                .bind(&account.email)
                .bind(account.uuid)
                .fetch_optional(&self.pool),
        )
        .await?
        .ok_or(AppError::NotFound)
    }

    async fn delete(&self, uuid: Uuid) -> Result<(), AppError> {
        let sql = "DELETE FROM account WHERE uuid = $1";
        tracing::debug!(sql = %sql, %uuid, "query");
        let res = self
            .bounded(sqlx::query(sql).bind(uuid).execute(&self.pool))
            .await?;
        if res.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.bounded(sqlx::query("SELECT 1").fetch_optional(&self.pool))
            .await?;
        Ok(())
    }
}

/// Connect to the `postgres` admin database on the same server and create the
/// target database when it is missing. No-op when the target is `postgres` itself.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split a connection URL into (admin URL pointing at `postgres`, target database name).
fn parse_db_name_from_url(url: &str) -> Result<(String, String), ConfigError> {
    let scheme_end = url
        .find("://")
        .ok_or_else(|| ConfigError::DatabaseUrl("missing scheme".into()))?
        + 3;
    let path_start = match url[scheme_end..].find('/') {
        Some(i) => scheme_end + i + 1,
        None => return Ok((url.to_string(), String::new())),
    };
    let rest = &url[path_start..];
    let (db_name, query) = match rest.split_once('?') {
        Some((db, q)) => (db.trim(), Some(q)),
        None => (rest.trim(), None),
    };
    let mut admin_url = format!("{}postgres", &url[..path_start]);
    if let Some(q) = query {
        admin_url.push('?');
        admin_url.push_str(q);
    }
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_database_name_from_url() {
        let (admin, db) = parse_db_name_from_url("postgres://u:p@host:5432/bank").unwrap();
        assert_eq!(admin, "postgres://u:p@host:5432/postgres");
        assert_eq!(db, "bank");
    }

    #[test]
    fn keeps_query_string_on_admin_url() {
        let (admin, db) =
            parse_db_name_from_url("postgres://host/bank?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://host/postgres?sslmode=disable");
        assert_eq!(db, "bank");
    }

    #[test]
    fn url_without_path_has_no_database() {
        let (_, db) = parse_db_name_from_url("postgres://host:5432").unwrap();
        assert!(db.is_empty());
        assert!(parse_db_name_from_url("not a url").is_err());
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("bank"), "\"bank\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
