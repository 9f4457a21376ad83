use axum::{routing::on, Router};

use crate::{
    common::{route_not_found, METHOD_FILTER_ALL},
    middleware::cache_control::cache_control_middleware,
    WebState,
};

mod filters;
mod images;
mod stations;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .nest_service("/stations", stations::routes(state.clone()))
        .nest_service("/filters", filters::routes(state.clone()))
        .nest_service("/images", images::routes(state))
        .layer(axum::middleware::from_fn(cache_control_middleware))
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}
