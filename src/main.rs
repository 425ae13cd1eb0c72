use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clubhub::api::router;
use clubhub::catalog::CourseCatalog;
use clubhub::registry::MemberRegistry;
use clubhub::relay::FormRelay;
use clubhub::remote::{HttpRemoteRegistry, NoopRemoteRegistry, RemoteConfig, RemoteRegistry};
use clubhub::services::PollScheduler;
use clubhub::state::AppState;
use clubhub::store::SnapshotStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "clubhub=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://clubhub.db?mode=rwc".to_string());

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let admin_token = std::env::var("ADMIN_TOKEN")
        .map_err(|_| String::from("ADMIN_TOKEN is not set"))?;

    let remote: Arc<dyn RemoteRegistry> = match RemoteConfig::from_env() {
        Ok(config) => Arc::new(HttpRemoteRegistry::new(config)?),
        Err(err) => {
            warn!("remote registry disabled: {}", err);
            Arc::new(NoopRemoteRegistry)
        }
    };

    let store = SnapshotStore::new(pool.clone());

    let catalog = Arc::new(CourseCatalog::new(store.clone()));
    catalog.load().await?;

    let registry = Arc::new(MemberRegistry::new(store, remote));
    let members = registry.load().await?;
    info!("registry loaded with {} members", members.len());

    let relay = Arc::new(FormRelay::new(std::env::var("FORM_RELAY_URL").ok())?);

    let poll_interval = std::env::var("POLL_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(30);
    let (scheduler, mut changes) = PollScheduler::new(registry.clone(), poll_interval);
    tokio::spawn(scheduler.start());
    tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            info!("registry now has {} members", *changes.borrow());
        }
    });

    let state = AppState {
        db: pool.clone(),
        catalog,
        registry,
        relay,
        admin_token,
    };

    let app = router(state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
