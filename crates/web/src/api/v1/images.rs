use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    routing::{get, on},
    Json, Router,
};
use model::{menu_image::MenuImage, WithId};
use schemars::JsonSchema;
use serde::Serialize;
use utility::id::Id;

use crate::{
    common::{
        route_not_found, schema_no_example, RouteErrorResponse, RouteResult,
        METHOD_FILTER_ALL,
    },
    WebState,
};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema_no_example::<ImagesResponse>))
        .route("/", get(get_images))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct ImagesResponse {
    success: bool,
    images: Vec<WithId<MenuImage>>,
}

/// Menu images for a curated listing or a mall outlet, in display order.
/// Exactly one of the two parameters selects the owner.
async fn get_images(
    State(WebState { food_client, .. }): State<WebState>,
    Query(params): Query<HashMap<String, String>>,
) -> RouteResult<Json<ImagesResponse>> {
    let images = match (params.get("listing"), params.get("outlet")) {
        (Some(listing), None) => {
            food_client
                .get_listing_images(&Id::new(listing.clone()))
                .await?
        }
        (None, Some(outlet)) => {
            food_client
                .get_outlet_images(&Id::new(outlet.clone()))
                .await?
        }
        _ => {
            return Err(RouteErrorResponse::bad_request(
                "exactly one of listing or outlet is required",
            ))
        }
    };

    Ok(Json(ImagesResponse {
        success: true,
        images,
    }))
}
