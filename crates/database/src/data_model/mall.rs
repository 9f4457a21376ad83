use async_trait::async_trait;
use food_discovery::store::{MallOutletRepo, Result};
use model::{
    opening_hours::OpeningHours,
    outlet::{Mall, MallOutlet, MallOutletWithMall},
    station::Station,
    WithId,
};
use sqlx::prelude::FromRow;
use utility::id::Id;

use super::StoreRow;
use crate::{
    queries::mall::get_active_by_station, PgStoreAutocommit, PgStoreTransaction,
};

#[derive(Debug, Clone, FromRow)]
pub struct MallOutletRow {
    pub id: String,
    pub mall_id: String,
    pub name: String,
    pub level_unit: Option<String>,
    pub opening_hours: Option<String>,
    pub tags: Vec<String>,
    pub rating: Option<f64>,
    pub image_url: Option<String>,
    pub is_active: bool,
}

impl StoreRow for MallOutletRow {
    type Model = MallOutlet;

    fn get_id(&self) -> Id<Self::Model> {
        Id::new(self.id.clone())
    }

    fn to_model(self) -> Self::Model {
        MallOutlet {
            name: self.name,
            mall_id: Id::new(self.mall_id),
            level_unit: self.level_unit,
            opening_hours: self.opening_hours.map(OpeningHours::new),
            tags: self.tags,
            rating: self.rating,
            image_url: self.image_url,
            is_active: self.is_active,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct MallOutletWithMallRow {
    #[sqlx(flatten)]
    pub outlet: MallOutletRow,
    pub mall_name: String,
    pub station_id: String,
    pub mall_latitude: Option<f64>,
    pub mall_longitude: Option<f64>,
    pub mall_distance_m: Option<f64>,
}

impl MallOutletWithMallRow {
    pub fn to_joined(self) -> MallOutletWithMall {
        let mall = WithId::new(
            Id::new(self.outlet.mall_id.clone()),
            Mall {
                name: self.mall_name,
                station_id: Id::new(self.station_id),
                latitude: self.mall_latitude,
                longitude: self.mall_longitude,
                distance_m: self.mall_distance_m,
            },
        );
        MallOutletWithMall {
            outlet: super::with_id(self.outlet),
            mall,
        }
    }
}

#[async_trait]
impl MallOutletRepo for PgStoreAutocommit {
    async fn active_mall_outlets_by_station(
        &mut self,
        station: &Id<Station>,
    ) -> Result<Vec<MallOutletWithMall>> {
        get_active_by_station(&self.pool, station).await
    }
}

#[async_trait]
impl<'a> MallOutletRepo for PgStoreTransaction<'a> {
    async fn active_mall_outlets_by_station(
        &mut self,
        station: &Id<Station>,
    ) -> Result<Vec<MallOutletWithMall>> {
        get_active_by_station(&mut *self.tx, station).await
    }
}
