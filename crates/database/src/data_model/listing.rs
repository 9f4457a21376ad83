use async_trait::async_trait;
use chrono::{DateTime, Utc};
use food_discovery::store::{ListingRepo, Result};
use model::{
    listing::FoodListing, opening_hours::OpeningHours, station::Station, WithId,
};
use sqlx::prelude::FromRow;
use utility::id::Id;

use super::StoreRow;
use crate::{
    queries::listing::{
        delete_inactive, get_active_by_station, get_all, set_activity, set_walk,
    },
    PgStoreAutocommit, PgStoreTransaction,
};

#[derive(Debug, Clone, FromRow)]
pub struct FoodListingRow {
    pub id: String,
    pub station_id: String,
    pub name: String,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub distance_m: Option<f64>,
    pub walk_time_min: Option<i32>,
    pub tags: Vec<String>,
    pub rating: Option<f64>,
    pub image_url: Option<String>,
    pub opening_hours: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl StoreRow for FoodListingRow {
    type Model = FoodListing;

    fn get_id(&self) -> Id<Self::Model> {
        Id::new(self.id.clone())
    }

    fn to_model(self) -> Self::Model {
        FoodListing {
            name: self.name,
            address: self.address,
            station_id: Id::new(self.station_id),
            latitude: self.latitude,
            longitude: self.longitude,
            distance_m: self.distance_m,
            walk_time_min: self.walk_time_min.map(|minutes| minutes as u32),
            tags: self.tags,
            rating: self.rating,
            image_url: self.image_url,
            opening_hours: self.opening_hours.map(OpeningHours::new),
            is_active: self.is_active,
            created_at: Some(self.created_at),
        }
    }
}

#[async_trait]
impl ListingRepo for PgStoreAutocommit {
    async fn active_listings_by_station(
        &mut self,
        station: &Id<Station>,
    ) -> Result<Vec<WithId<FoodListing>>> {
        get_active_by_station(&self.pool, station).await
    }

    async fn all_listings(&mut self) -> Result<Vec<WithId<FoodListing>>> {
        get_all(&self.pool).await
    }

    async fn set_listing_activity(
        &mut self,
        id: &Id<FoodListing>,
        active: bool,
    ) -> Result<()> {
        set_activity(&self.pool, id, active).await
    }

    async fn set_listing_walk(
        &mut self,
        id: &Id<FoodListing>,
        distance_m: f64,
        walk_time_min: u32,
    ) -> Result<()> {
        set_walk(&self.pool, id, distance_m, walk_time_min).await
    }

    async fn delete_inactive_listings(&mut self) -> Result<u64> {
        delete_inactive(&self.pool).await
    }
}

#[async_trait]
impl<'a> ListingRepo for PgStoreTransaction<'a> {
    async fn active_listings_by_station(
        &mut self,
        station: &Id<Station>,
    ) -> Result<Vec<WithId<FoodListing>>> {
        get_active_by_station(&mut *self.tx, station).await
    }

    async fn all_listings(&mut self) -> Result<Vec<WithId<FoodListing>>> {
        get_all(&mut *self.tx).await
    }

    async fn set_listing_activity(
        &mut self,
        id: &Id<FoodListing>,
        active: bool,
    ) -> Result<()> {
        set_activity(&mut *self.tx, id, active).await
    }

    async fn set_listing_walk(
        &mut self,
        id: &Id<FoodListing>,
        distance_m: f64,
        walk_time_min: u32,
    ) -> Result<()> {
        set_walk(&mut *self.tx, id, distance_m, walk_time_min).await
    }

    async fn delete_inactive_listings(&mut self) -> Result<u64> {
        delete_inactive(&mut *self.tx).await
    }
}
