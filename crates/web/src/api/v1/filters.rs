use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    routing::{get, on},
    Json, Router,
};
use food_discovery::{
    aggregate::{FoodPage, Page},
    filter::TagFilterOptions,
};
use utility::id::Id;

use crate::{
    common::{
        parse_param, route_not_found, schema_no_example, RouteErrorResponse,
        RouteResult, METHOD_FILTER_ALL,
    },
    WebState,
};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema_no_example::<FoodPage>))
        .route("/:tag", get(get_filtered))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

/// Tag-filtered food at a station. `hour` pins the clock for time-sensitive
/// tags; without it the server's wall clock applies.
async fn get_filtered(
    Path(tag): Path<String>,
    State(WebState { food_client, .. }): State<WebState>,
    Query(params): Query<HashMap<String, String>>,
) -> RouteResult<Json<FoodPage>> {
    let station = params.get("station").ok_or_else(|| {
        RouteErrorResponse::bad_request("station parameter is required")
    })?;
    let offset = parse_param::<usize>("offset", params.get("offset"))?.unwrap_or(0);
    let limit = parse_param::<usize>("limit", params.get("limit"))?
        .unwrap_or(food_client.config().page_size);
    let hour = parse_param::<u32>("hour", params.get("hour"))?;
    if hour.is_some_and(|hour| hour > 23) {
        return Err(RouteErrorResponse::bad_request(
            "hour must be between 0 and 23",
        ));
    }

    let mut options = TagFilterOptions::new(Page::new(offset, limit));
    if let Some(hour) = hour {
        options = options.at_hour(hour);
    }

    let page = food_client
        .filter_by_tag(&Id::new(station.clone()), &tag, options)
        .await?;
    Ok(Json(page))
}
