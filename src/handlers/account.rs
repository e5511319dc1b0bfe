//! Account CRUD handlers: list, create, fetch, update, delete.

use crate::error::AppError;
use crate::extractors::{AccountId, JsonBody};
use crate::model::{CreateAccountRequest, NewAccount, UpdateAccountRequest};
use crate::response::{created, ok};
use crate::state::AppState;
use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::IntoResponse,
};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let accounts = state.store.list_all().await?;
    Ok(ok(accounts))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateAccountRequest>,
) -> Result<impl IntoResponse, AppError> {
    let account = state.store.create(&NewAccount::new(req)).await?;
    tracing::info!(uuid = %account.uuid, "account created");
    Ok(created(account))
}

pub async fn read(
    State(state): State<AppState>,
    AccountId(uuid): AccountId,
) -> Result<impl IntoResponse, AppError> {
    let account = state.store.get_by_id(uuid).await?;
    Ok(ok(account))
}

/// Fetch, overlay the non-empty request fields, write back.
pub async fn update(
    State(state): State<AppState>,
    AccountId(uuid): AccountId,
    JsonBody(req): JsonBody<UpdateAccountRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut account = state.store.get_by_id(uuid).await?;
    account.apply(req);
    let account = state.store.update(&account).await?;
    tracing::info!(uuid = %account.uuid, "account updated");
    Ok(ok(account))
}

pub async fn delete(
    State(state): State<AppState>,
    AccountId(uuid): AccountId,
) -> Result<impl IntoResponse, AppError> {
    state.store.delete(uuid).await?;
    tracing::info!(%uuid, "account deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Method fallback for the account routes.
pub async fn method_not_allowed(method: Method) -> AppError {
    AppError::MethodNotAllowed(method.to_string())
}

/// Router fallback for unknown paths.
pub async fn not_found() -> AppError {
    AppError::NotFound
}
