use food_discovery::store::Result;
use model::{
    outlet::{ChainBrand, ChainOutlet, ChainOutletWithBrand},
    station::Station,
    WithId,
};
use sqlx::{Executor, Postgres};
use utility::{id::Id, let_also::LetAlso};

use crate::data_model::{
    chain::{ChainBrandRow, ChainOutletRow, ChainOutletWithBrandRow},
    with_ids,
};

use super::convert_error;

pub async fn get_active_near_station<'c, E>(
    executor: E,
    station: &Id<Station>,
    max_distance_m: f64,
) -> Result<Vec<ChainOutletWithBrand>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            o.id, o.brand_id, o.nearest_station_id, o.name, o.address,
            o.latitude, o.longitude, o.distance_to_station_m, o.level_unit,
            o.opening_hours, o.tags, o.rating, o.is_active,
            b.id AS brand_row_id, b.name AS brand_name,
            b.logo_url AS brand_logo_url, b.default_tags AS brand_default_tags
        FROM
            chain_outlets o
            LEFT JOIN chain_brands b ON b.id = o.brand_id
        WHERE
            o.nearest_station_id = $1
            AND o.is_active
            AND o.distance_to_station_m IS NOT NULL
            AND o.distance_to_station_m <= $2;
        ",
    )
    .bind(station.raw())
    .bind(max_distance_m)
    .fetch_all(executor)
    .await
    .map_err(convert_error)?
    .let_owned(|rows: Vec<ChainOutletWithBrandRow>| {
        Ok(rows.into_iter().map(|row| row.to_joined()).collect())
    })
}

pub async fn get_unlinked<'c, E>(executor: E) -> Result<Vec<WithId<ChainOutlet>>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, brand_id, nearest_station_id, name, address, latitude,
            longitude, distance_to_station_m, level_unit, opening_hours,
            tags, rating, is_active
        FROM
            chain_outlets
        WHERE brand_id IS NULL;
        ",
    )
    .fetch_all(executor)
    .await
    .map_err(convert_error)?
    .let_owned(|rows: Vec<ChainOutletRow>| Ok(with_ids(rows)))
}

pub async fn get_brands<'c, E>(executor: E) -> Result<Vec<WithId<ChainBrand>>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, name, logo_url, default_tags
        FROM
            chain_brands
        ORDER BY name ASC;
        ",
    )
    .fetch_all(executor)
    .await
    .map_err(convert_error)?
    .let_owned(|rows: Vec<ChainBrandRow>| Ok(with_ids(rows)))
}

pub async fn link_to_brand<'c, E>(
    executor: E,
    outlet: &Id<ChainOutlet>,
    brand: &Id<ChainBrand>,
) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_scalar(
        "
        UPDATE chain_outlets
        SET brand_id = $2
        WHERE id = $1
        RETURNING id;
        ",
    )
    .bind(outlet.raw())
    .bind(brand.raw())
    .fetch_one(executor)
    .await
    .map_err(convert_error)
    .map(|_: String| ())
}
