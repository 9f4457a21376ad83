use food_discovery::store::Result;
use model::{station::Station, WithId};
use sqlx::{Executor, Postgres};
use utility::{id::Id, let_also::LetAlso};

use crate::data_model::{station::StationRow, with_id, with_ids};

use super::convert_error;

pub async fn get<'c, E>(executor: E, id: &Id<Station>) -> Result<WithId<Station>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, name, latitude, longitude, lines
        FROM
            stations
        WHERE id = $1;
        ",
    )
    .bind(id.raw())
    .fetch_one(executor)
    .await
    .map_err(convert_error)
    .map(|row: StationRow| with_id(row))
}

pub async fn get_all<'c, E>(executor: E) -> Result<Vec<WithId<Station>>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, name, latitude, longitude, lines
        FROM
            stations
        ORDER BY name ASC;
        ",
    )
    .fetch_all(executor)
    .await
    .map_err(convert_error)?
    .let_owned(|rows: Vec<StationRow>| Ok(with_ids(rows)))
}

pub async fn put<'c, E>(
    executor: E,
    station: WithId<Station>,
) -> Result<WithId<Station>>
where
    E: Executor<'c, Database = Postgres>,
{
    let lines: Vec<String> = station
        .content
        .lines
        .iter()
        .map(|line| line.code().to_owned())
        .collect();
    sqlx::query_as(
        "
        INSERT INTO stations(
            id,
            name,
            latitude,
            longitude,
            lines
        )
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (id)
        DO UPDATE SET
            name = EXCLUDED.name,
            latitude = EXCLUDED.latitude,
            longitude = EXCLUDED.longitude,
            lines = EXCLUDED.lines
        RETURNING id, name, latitude, longitude, lines;
        ",
    )
    .bind(station.id.raw())
    .bind(station.content.name)
    .bind(station.content.latitude)
    .bind(station.content.longitude)
    .bind(lines)
    .fetch_one(executor)
    .await
    .map_err(convert_error)
    .map(|row: StationRow| with_id(row))
}
