use database::{PgStore, StoreConnectionInfo};
use food_discovery::{client::Client, config::DiscoveryConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use web::{start_web_server, WebState};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // discovery configuration
    let config = DiscoveryConfig::from_env()
        .expect("could not load discovery configuration.");

    // database
    let connection_info = StoreConnectionInfo::from_env()
        .expect("expected database connection info in env.");
    let store = PgStore::connect(connection_info)
        .await
        .expect("could not connect to database.");

    // web server
    let web_future = start_web_server(WebState {
        food_client: Client::new(store, config),
    });

    let _ = web_future.await;
}
