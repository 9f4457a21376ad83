use async_trait::async_trait;
use food_discovery::store::{ChainOutletRepo, Result};
use model::{
    opening_hours::OpeningHours,
    outlet::{ChainBrand, ChainOutlet, ChainOutletWithBrand},
    station::Station,
    WithId,
};
use sqlx::prelude::FromRow;
use utility::id::Id;

use super::StoreRow;
use crate::{
    queries::chain::{
        get_active_near_station, get_brands, get_unlinked, link_to_brand,
    },
    PgStoreAutocommit, PgStoreTransaction,
};

#[derive(Debug, Clone, FromRow)]
pub struct ChainBrandRow {
    pub id: String,
    pub name: String,
    pub logo_url: Option<String>,
    pub default_tags: Vec<String>,
}

impl StoreRow for ChainBrandRow {
    type Model = ChainBrand;

    fn get_id(&self) -> Id<Self::Model> {
        Id::new(self.id.clone())
    }

    fn to_model(self) -> Self::Model {
        ChainBrand {
            name: self.name,
            logo_url: self.logo_url,
            default_tags: self.default_tags,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ChainOutletRow {
    pub id: String,
    pub brand_id: Option<String>,
    pub nearest_station_id: String,
    pub name: String,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub distance_to_station_m: Option<f64>,
    pub level_unit: Option<String>,
    pub opening_hours: Option<String>,
    pub tags: Vec<String>,
    pub rating: Option<f64>,
    pub is_active: bool,
}

impl StoreRow for ChainOutletRow {
    type Model = ChainOutlet;

    fn get_id(&self) -> Id<Self::Model> {
        Id::new(self.id.clone())
    }

    fn to_model(self) -> Self::Model {
        ChainOutlet {
            name: self.name,
            brand_id: self.brand_id.map(Id::new),
            nearest_station_id: Id::new(self.nearest_station_id),
            address: self.address,
            latitude: self.latitude,
            longitude: self.longitude,
            distance_to_station_m: self.distance_to_station_m,
            level_unit: self.level_unit,
            opening_hours: self.opening_hours.map(OpeningHours::new),
            tags: self.tags,
            rating: self.rating,
            is_active: self.is_active,
        }
    }
}

/// Outlet columns joined with their brand's, brand columns aliased. A null
/// `brand_row_id` means the outlet is unlinked.
#[derive(Debug, Clone, FromRow)]
pub struct ChainOutletWithBrandRow {
    #[sqlx(flatten)]
    pub outlet: ChainOutletRow,
    pub brand_row_id: Option<String>,
    pub brand_name: Option<String>,
    pub brand_logo_url: Option<String>,
    pub brand_default_tags: Option<Vec<String>>,
}

impl ChainOutletWithBrandRow {
    pub fn to_joined(self) -> ChainOutletWithBrand {
        let brand = match (self.brand_row_id, self.brand_name) {
            (Some(id), Some(name)) => Some(WithId::new(
                Id::new(id),
                ChainBrand {
                    name,
                    logo_url: self.brand_logo_url,
                    default_tags: self.brand_default_tags.unwrap_or_default(),
                },
            )),
            _ => None,
        };
        ChainOutletWithBrand {
            outlet: super::with_id(self.outlet),
            brand,
        }
    }
}

#[async_trait]
impl ChainOutletRepo for PgStoreAutocommit {
    async fn active_chain_outlets_near(
        &mut self,
        station: &Id<Station>,
        max_distance_m: f64,
    ) -> Result<Vec<ChainOutletWithBrand>> {
        get_active_near_station(&self.pool, station, max_distance_m).await
    }

    async fn unlinked_chain_outlets(&mut self) -> Result<Vec<WithId<ChainOutlet>>> {
        get_unlinked(&self.pool).await
    }

    async fn chain_brands(&mut self) -> Result<Vec<WithId<ChainBrand>>> {
        get_brands(&self.pool).await
    }

    async fn link_outlet_to_brand(
        &mut self,
        outlet: &Id<ChainOutlet>,
        brand: &Id<ChainBrand>,
    ) -> Result<()> {
        link_to_brand(&self.pool, outlet, brand).await
    }
}

#[async_trait]
impl<'a> ChainOutletRepo for PgStoreTransaction<'a> {
    async fn active_chain_outlets_near(
        &mut self,
        station: &Id<Station>,
        max_distance_m: f64,
    ) -> Result<Vec<ChainOutletWithBrand>> {
        get_active_near_station(&mut *self.tx, station, max_distance_m).await
    }

    async fn unlinked_chain_outlets(&mut self) -> Result<Vec<WithId<ChainOutlet>>> {
        get_unlinked(&mut *self.tx).await
    }

    async fn chain_brands(&mut self) -> Result<Vec<WithId<ChainBrand>>> {
        get_brands(&mut *self.tx).await
    }

    async fn link_outlet_to_brand(
        &mut self,
        outlet: &Id<ChainOutlet>,
        brand: &Id<ChainBrand>,
    ) -> Result<()> {
        link_to_brand(&mut *self.tx, outlet, brand).await
    }
}
