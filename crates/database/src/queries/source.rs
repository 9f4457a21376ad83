use std::collections::HashMap;

use food_discovery::store::Result;
use model::{listing::FoodListing, source::AttributedSource};
use sqlx::{Executor, Postgres};
use utility::id::Id;
use utility::id::IdWrapper as _;

use crate::data_model::source::AttributedSourceRow;

use super::convert_error;

pub async fn get_for_listings<'c, E>(
    executor: E,
    listings: &[Id<FoodListing>],
) -> Result<HashMap<Id<FoodListing>, Vec<AttributedSource>>>
where
    E: Executor<'c, Database = Postgres>,
{
    let rows: Vec<AttributedSourceRow> = sqlx::query_as(
        "
        SELECT
            ls.listing_id, s.id, s.name, s.icon_url, s.color, s.priority,
            ls.is_primary, ls.source_url
        FROM
            listing_sources ls
            JOIN sources s ON s.id = ls.source_id
        WHERE ls.listing_id = ANY($1)
        ORDER BY ls.listing_id, s.priority ASC;
        ",
    )
    .bind(listings.raw())
    .fetch_all(executor)
    .await
    .map_err(convert_error)?;

    let mut by_listing: HashMap<Id<FoodListing>, Vec<AttributedSource>> = HashMap::new();
    for row in rows {
        let (listing, source) = row.to_attributed();
        by_listing.entry(listing).or_default().push(source);
    }
    Ok(by_listing)
}
