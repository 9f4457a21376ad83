use food_discovery::store::Result;
use model::{listing::FoodListing, station::Station, WithId};
use sqlx::{Executor, Postgres};
use utility::{id::Id, let_also::LetAlso};

use crate::data_model::{listing::FoodListingRow, with_ids};

use super::convert_error;

pub async fn get_active_by_station<'c, E>(
    executor: E,
    station: &Id<Station>,
) -> Result<Vec<WithId<FoodListing>>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, station_id, name, address, latitude, longitude,
            distance_m, walk_time_min, tags, rating, image_url,
            opening_hours, is_active, created_at
        FROM
            food_listings
        WHERE station_id = $1 AND is_active;
        ",
    )
    .bind(station.raw())
    .fetch_all(executor)
    .await
    .map_err(convert_error)?
    .let_owned(|rows: Vec<FoodListingRow>| Ok(with_ids(rows)))
}

pub async fn get_all<'c, E>(executor: E) -> Result<Vec<WithId<FoodListing>>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, station_id, name, address, latitude, longitude,
            distance_m, walk_time_min, tags, rating, image_url,
            opening_hours, is_active, created_at
        FROM
            food_listings;
        ",
    )
    .fetch_all(executor)
    .await
    .map_err(convert_error)?
    .let_owned(|rows: Vec<FoodListingRow>| Ok(with_ids(rows)))
}

pub async fn set_activity<'c, E>(
    executor: E,
    id: &Id<FoodListing>,
    active: bool,
) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_scalar(
        "
        UPDATE food_listings
        SET is_active = $2
        WHERE id = $1
        RETURNING id;
        ",
    )
    .bind(id.raw())
    .bind(active)
    .fetch_one(executor)
    .await
    .map_err(convert_error)
    .map(|_: String| ())
}

pub async fn set_walk<'c, E>(
    executor: E,
    id: &Id<FoodListing>,
    distance_m: f64,
    walk_time_min: u32,
) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_scalar(
        "
        UPDATE food_listings
        SET distance_m = $2,
            walk_time_min = $3
        WHERE id = $1
        RETURNING id;
        ",
    )
    .bind(id.raw())
    .bind(distance_m)
    .bind(walk_time_min as i32)
    .fetch_one(executor)
    .await
    .map_err(convert_error)
    .map(|_: String| ())
}

pub async fn delete_inactive<'c, E>(executor: E) -> Result<u64>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query(
        "
        DELETE FROM food_listings
        WHERE NOT is_active;
        ",
    )
    .execute(executor)
    .await
    .map_err(convert_error)
    .map(|result| result.rows_affected())
}
