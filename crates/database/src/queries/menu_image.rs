use std::collections::HashMap;

use food_discovery::store::Result;
use model::{listing::FoodListing, menu_image::MenuImage, outlet::MallOutlet, WithId};
use sqlx::{Executor, Postgres};
use utility::id::IdWrapper as _;
use utility::{id::Id, let_also::LetAlso};

use crate::data_model::{
    menu_image::{HeaderImageRow, MenuImageRow},
    with_ids,
};

use super::convert_error;

pub async fn get_for_listing<'c, E>(
    executor: E,
    listing: &Id<FoodListing>,
) -> Result<Vec<WithId<MenuImage>>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, url, display_order, is_header
        FROM
            menu_images
        WHERE listing_id = $1
        ORDER BY display_order ASC;
        ",
    )
    .bind(listing.raw())
    .fetch_all(executor)
    .await
    .map_err(convert_error)?
    .let_owned(|rows: Vec<MenuImageRow>| Ok(with_ids(rows)))
}

pub async fn get_for_outlet<'c, E>(
    executor: E,
    outlet: &Id<MallOutlet>,
) -> Result<Vec<WithId<MenuImage>>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, url, display_order, is_header
        FROM
            menu_images
        WHERE outlet_id = $1
        ORDER BY display_order ASC;
        ",
    )
    .bind(outlet.raw())
    .fetch_all(executor)
    .await
    .map_err(convert_error)?
    .let_owned(|rows: Vec<MenuImageRow>| Ok(with_ids(rows)))
}

pub async fn get_headers_for_outlets<'c, E>(
    executor: E,
    outlets: &[Id<MallOutlet>],
) -> Result<HashMap<Id<MallOutlet>, String>>
where
    E: Executor<'c, Database = Postgres>,
{
    let rows: Vec<HeaderImageRow> = sqlx::query_as(
        "
        SELECT DISTINCT ON (outlet_id)
            outlet_id, url
        FROM
            menu_images
        WHERE outlet_id = ANY($1) AND is_header
        ORDER BY outlet_id, display_order ASC;
        ",
    )
    .bind(outlets.raw())
    .fetch_all(executor)
    .await
    .map_err(convert_error)?;

    Ok(rows
        .into_iter()
        .map(|row| (Id::new(row.outlet_id), row.url))
        .collect())
}
