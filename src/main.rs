//! Entry point: load config, wire dependencies, and run the server.

use authd::auth::TokenSigner;
use authd::config::Config;
use authd::db::{self, PgUserStore};
use authd::{create_app, AppState, AuthService};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db_pool = db::create_pool(&config.database_url).await?;
    let store = Arc::new(PgUserStore::new(db_pool));
    let signer = TokenSigner::new(config.secret_key.clone());
    let auth_service = AuthService::new(store, signer);

    let state = AppState { auth_service };
    let app = create_app(state);

    tracing::info!(addr = %config.server_addr, "listening");
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
