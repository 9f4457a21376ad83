use std::collections::HashMap;

use food_discovery::store::Result;
use model::{listing::FoodListing, price::Price};
use sqlx::{Executor, Postgres};
use utility::id::Id;
use utility::id::IdWrapper as _;

use crate::data_model::price::PriceRow;

use super::convert_error;

pub async fn get_for_listings<'c, E>(
    executor: E,
    listings: &[Id<FoodListing>],
) -> Result<HashMap<Id<FoodListing>, Vec<Price>>>
where
    E: Executor<'c, Database = Postgres>,
{
    let rows: Vec<PriceRow> = sqlx::query_as(
        "
        SELECT
            listing_id, label, amount_sgd, price_range
        FROM
            listing_prices
        WHERE listing_id = ANY($1)
        ORDER BY listing_id, display_order ASC;
        ",
    )
    .bind(listings.raw())
    .fetch_all(executor)
    .await
    .map_err(convert_error)?;

    let mut by_listing: HashMap<Id<FoodListing>, Vec<Price>> = HashMap::new();
    for row in rows {
        let (listing, price) = row.to_keyed();
        by_listing.entry(listing).or_default().push(price);
    }
    Ok(by_listing)
}
