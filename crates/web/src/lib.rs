pub use crate::common::RouteResult;

use axum::{extract::FromRef, Router};
use database::PgStore;
use food_discovery::client::Client;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod common;
pub mod middleware;

#[derive(Clone, FromRef)]
pub struct WebState {
    pub food_client: Client<PgStore>,
}

pub async fn start_web_server(state: WebState) -> std::io::Result<()> {
    let routes = Router::new()
        .nest_service("/api", api::routes(state))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind("0.0.0.0:8080").await?;
    axum::serve(listener, routes.into_make_service()).await?;

    Ok(())
}
