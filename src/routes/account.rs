//! Account CRUD routes. Unsupported methods answer 405 with the JSON error envelope.

use crate::handlers::account::{create, delete, list, method_not_allowed, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn account_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/account",
            get(list).post(create).fallback(method_not_allowed),
        )
        .route(
            "/account/:id",
            get(read)
                .put(update)
                .delete(delete)
                .fallback(method_not_allowed),
        )
        .with_state(state)
}
