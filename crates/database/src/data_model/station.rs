use async_trait::async_trait;
use food_discovery::store::{Result, StationRepo};
use model::{
    station::{Station, TransitLine},
    WithId,
};
use sqlx::prelude::FromRow;
use utility::id::Id;

use super::StoreRow;
use crate::{
    queries::station::{get, get_all, put},
    PgStoreAutocommit, PgStoreTransaction,
};

#[derive(Debug, Clone, FromRow)]
pub struct StationRow {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub lines: Vec<String>,
}

impl StoreRow for StationRow {
    type Model = Station;

    fn get_id(&self) -> Id<Self::Model> {
        Id::new(self.id.clone())
    }

    fn to_model(self) -> Self::Model {
        Station {
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
            // unknown line codes are dropped rather than failing the row
            lines: self
                .lines
                .iter()
                .filter_map(|code| TransitLine::from_code(code))
                .collect(),
        }
    }
}

#[async_trait]
impl StationRepo for PgStoreAutocommit {
    async fn station(&mut self, id: &Id<Station>) -> Result<WithId<Station>> {
        get(&self.pool, id).await
    }

    async fn stations(&mut self) -> Result<Vec<WithId<Station>>> {
        get_all(&self.pool).await
    }

    async fn put_station(&mut self, station: WithId<Station>) -> Result<WithId<Station>> {
        put(&self.pool, station).await
    }
}

#[async_trait]
impl<'a> StationRepo for PgStoreTransaction<'a> {
    async fn station(&mut self, id: &Id<Station>) -> Result<WithId<Station>> {
        get(&mut *self.tx, id).await
    }

    async fn stations(&mut self) -> Result<Vec<WithId<Station>>> {
        get_all(&mut *self.tx).await
    }

    async fn put_station(&mut self, station: WithId<Station>) -> Result<WithId<Station>> {
        put(&mut *self.tx, station).await
    }
}
