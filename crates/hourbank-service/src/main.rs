use hourbank_service::config::Config;
use hourbank_service::handlers::AppState;
use hourbank_service::routes;
use hourbank_service::store::{MemoryStore, PgStore, Store};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hourbank_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting hour-bank service");

    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!("Configuration loaded successfully");

    // Pick the storage backend. Without DATABASE_URL everything lives in
    // process memory and is lost on restart.
    let store: Arc<dyn Store> = match &config.database_url {
        Some(database_url) => {
            info!("Connecting to database...");
            let store = PgStore::connect(database_url).await.map_err(|e| {
                error!("Failed to connect to database: {}", e);
                e
            })?;
            info!("Database connection established");
            Arc::new(store)
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory storage");
            Arc::new(MemoryStore::new())
        }
    };

    let metrics_handle = routes::init_metrics_recorder().map_err(|e| {
        error!("Failed to install metrics recorder: {}", e);
        e
    })?;

    let bind_address = config.bind_address.clone();
    let state = Arc::new(AppState { store, config });
    let app = routes::build_routes(state, metrics_handle);

    let addr: SocketAddr = bind_address.parse().map_err(|e| {
        error!("Invalid bind address: {}", e);
        e
    })?;

    info!("Hour-bank service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
