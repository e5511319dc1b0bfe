//! Bank accounts server: loads `.env`, ensures the database and `account` table exist, serves the REST API.
//!
//! Run from repo root: `cargo run -p server`

use bank_accounts::{
    app, ensure_database_exists, init_tracing, AccountStore, AppState, Config, PgAccountStore,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env()?;
    ensure_database_exists(&config.database_url).await?;
    let store = PgAccountStore::connect(&config).await?;
    store.initialize().await?;

    let state = AppState::new(store);
    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
