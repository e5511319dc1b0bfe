//! Bank accounts: CRUD REST service over a PostgreSQL `account` table.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod state;
pub mod storage;
pub mod telemetry;

pub use config::Config;
pub use error::{AppError, ConfigError};
pub use model::{Account, CreateAccountRequest, NewAccount, UpdateAccountRequest};
pub use routes::{account_routes, app, common_routes};
pub use state::AppState;
pub use storage::{ensure_database_exists, AccountStore, MemoryAccountStore, PgAccountStore};
pub use telemetry::init_tracing;
