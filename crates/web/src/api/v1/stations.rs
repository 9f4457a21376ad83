use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    routing::{get, on},
    Json, Router,
};
use food_discovery::{aggregate::Page, client::FallbackResolution};
use model::{station::Station, WithId};
use utility::id::Id;

use crate::{
    common::{
        parse_param, route_not_found, schema, schema_no_example, RouteResult,
        METHOD_FILTER_ALL,
    },
    WebState,
};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<Station>))
        .route("/food/schema", get(schema_no_example::<FallbackResolution>))
        .route("/:id", get(get_station))
        .route("/", get(get_stations))
        .route("/:id/food", get(get_station_food))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn get_stations(
    State(WebState { food_client, .. }): State<WebState>,
) -> RouteResult<Json<Vec<WithId<Station>>>> {
    Ok(Json(food_client.get_stations().await?))
}

async fn get_station(
    Path(id): Path<String>,
    State(WebState { food_client, .. }): State<WebState>,
) -> RouteResult<Json<WithId<Station>>> {
    Ok(Json(food_client.get_station(&Id::new(id)).await?))
}

/// Aggregated food for a station, falling back to a configured nearby
/// station when the requested one has nothing to offer.
async fn get_station_food(
    Path(id): Path<String>,
    State(WebState { food_client, .. }): State<WebState>,
    Query(params): Query<HashMap<String, String>>,
) -> RouteResult<Json<FallbackResolution>> {
    let offset = parse_param::<usize>("offset", params.get("offset"))?.unwrap_or(0);
    let limit = parse_param::<usize>("limit", params.get("limit"))?
        .unwrap_or(food_client.config().page_size);

    let resolution = food_client
        .resolve_with_fallback(&Id::new(id), Page::new(offset, limit))
        .await?;
    Ok(Json(resolution))
}
