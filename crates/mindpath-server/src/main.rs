use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use mindpath_api::support::SupportClient;
use mindpath_api::{AppState, AppStateInner};
use mindpath_crypto::RecordCipher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mindpath=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let jwt_secret = std::env::var("MINDPATH_JWT_SECRET").unwrap_or_else(|_| {
        warn!("MINDPATH_JWT_SECRET not set, using dev default");
        "dev-jwt-secret-change-me".into()
    });
    let encryption_key = std::env::var("MINDPATH_ENCRYPTION_KEY").unwrap_or_else(|_| {
        warn!("MINDPATH_ENCRYPTION_KEY not set, using dev default");
        "dev-encryption-key-change-me".into()
    });
    let db_path = std::env::var("MINDPATH_DB_PATH").unwrap_or_else(|_| "mindpath.db".into());
    let host = std::env::var("MINDPATH_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("MINDPATH_PORT")
        .unwrap_or_else(|_| "10000".into())
        .parse()?;
    let openai_api_key = std::env::var("OPENAI_API_KEY").ok();

    // Init database
    let db = mindpath_db::Database::open(&PathBuf::from(&db_path))?;

    // Shared state: secrets are read once here and injected, never looked up
    // again inside the codec or handlers.
    let state: AppState = Arc::new(AppStateInner {
        db,
        jwt_secret,
        cipher: RecordCipher::new(encryption_key),
        support: SupportClient::new(openai_api_key),
    });

    let app = mindpath_api::router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("MindPath server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
