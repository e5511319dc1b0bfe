//! Shared application state for all routes.

use crate::storage::AccountStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Process-wide store handle, injected at startup.
    pub store: Arc<dyn AccountStore>,
}

impl AppState {
    pub fn new<S>(store: S) -> Self
    where
        S: AccountStore + 'static,
    {
        AppState {
            store: Arc::new(store),
        }
    }
}
