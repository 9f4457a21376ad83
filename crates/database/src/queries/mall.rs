use food_discovery::store::Result;
use model::{outlet::MallOutletWithMall, station::Station};
use sqlx::{Executor, Postgres};
use utility::{id::Id, let_also::LetAlso};

use crate::data_model::mall::MallOutletWithMallRow;

use super::convert_error;

pub async fn get_active_by_station<'c, E>(
    executor: E,
    station: &Id<Station>,
) -> Result<Vec<MallOutletWithMall>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            o.id, o.mall_id, o.name, o.level_unit, o.opening_hours,
            o.tags, o.rating, o.image_url, o.is_active,
            m.name AS mall_name, m.station_id,
            m.latitude AS mall_latitude, m.longitude AS mall_longitude,
            m.distance_m AS mall_distance_m
        FROM
            mall_outlets o
            JOIN malls m ON m.id = o.mall_id
        WHERE m.station_id = $1 AND o.is_active;
        ",
    )
    .bind(station.raw())
    .fetch_all(executor)
    .await
    .map_err(convert_error)?
    .let_owned(|rows: Vec<MallOutletWithMallRow>| {
        Ok(rows.into_iter().map(|row| row.to_joined()).collect())
    })
}
