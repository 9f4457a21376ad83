use std::{collections::HashMap, error, result};

use async_trait::async_trait;
use model::{
    listing::FoodListing,
    menu_image::MenuImage,
    outlet::{ChainBrand, ChainOutlet, ChainOutletWithBrand, MallOutlet, MallOutletWithMall},
    price::Price,
    source::AttributedSource,
    station::Station,
    WithId,
};
use utility::id::Id;

#[derive(Debug)]
pub enum StoreError {
    NotFound,
    Other(Box<dyn error::Error + Send + Sync>),
}

impl StoreError {
    pub fn other<T: error::Error + Send + Sync + 'static>(why: T) -> Self {
        Self::Other(Box::new(why))
    }
}

pub type Result<T> = result::Result<T, StoreError>;

#[async_trait]
pub trait StationRepo {
    async fn station(&mut self, id: &Id<Station>) -> Result<WithId<Station>>;
    async fn stations(&mut self) -> Result<Vec<WithId<Station>>>;
    /// Inserts or replaces a reference station. Maintenance only.
    async fn put_station(&mut self, station: WithId<Station>) -> Result<WithId<Station>>;
}

#[async_trait]
pub trait ListingRepo {
    async fn active_listings_by_station(
        &mut self,
        station: &Id<Station>,
    ) -> Result<Vec<WithId<FoodListing>>>;

    /// All listings regardless of activity flag. Maintenance only.
    async fn all_listings(&mut self) -> Result<Vec<WithId<FoodListing>>>;

    async fn set_listing_activity(
        &mut self,
        id: &Id<FoodListing>,
        active: bool,
    ) -> Result<()>;

    async fn set_listing_walk(
        &mut self,
        id: &Id<FoodListing>,
        distance_m: f64,
        walk_time_min: u32,
    ) -> Result<()>;

    /// Hard-deletes soft-deleted listings, returning how many went away.
    async fn delete_inactive_listings(&mut self) -> Result<u64>;
}

#[async_trait]
pub trait ChainOutletRepo {
    /// Active outlets whose nearest station is the given one and whose stored
    /// distance does not exceed the cutoff. Outlets without a stored distance
    /// are not served.
    async fn active_chain_outlets_near(
        &mut self,
        station: &Id<Station>,
        max_distance_m: f64,
    ) -> Result<Vec<ChainOutletWithBrand>>;

    async fn unlinked_chain_outlets(&mut self) -> Result<Vec<WithId<ChainOutlet>>>;

    async fn chain_brands(&mut self) -> Result<Vec<WithId<ChainBrand>>>;

    async fn link_outlet_to_brand(
        &mut self,
        outlet: &Id<ChainOutlet>,
        brand: &Id<ChainBrand>,
    ) -> Result<()>;
}

#[async_trait]
pub trait MallOutletRepo {
    async fn active_mall_outlets_by_station(
        &mut self,
        station: &Id<Station>,
    ) -> Result<Vec<MallOutletWithMall>>;
}

#[async_trait]
pub trait SourceRepo {
    /// Association rows for the given listings, grouped by listing. Listings
    /// without rows are absent from the map.
    async fn sources_for_listings(
        &mut self,
        listings: &[Id<FoodListing>],
    ) -> Result<HashMap<Id<FoodListing>, Vec<AttributedSource>>>;
}

#[async_trait]
pub trait PriceRepo {
    async fn prices_for_listings(
        &mut self,
        listings: &[Id<FoodListing>],
    ) -> Result<HashMap<Id<FoodListing>, Vec<Price>>>;
}

#[async_trait]
pub trait MenuImageRepo {
    async fn images_for_listing(
        &mut self,
        listing: &Id<FoodListing>,
    ) -> Result<Vec<WithId<MenuImage>>>;

    async fn images_for_outlet(
        &mut self,
        outlet: &Id<MallOutlet>,
    ) -> Result<Vec<WithId<MenuImage>>>;

    /// Header image url per outlet, for outlets that have one.
    async fn header_images_for_outlets(
        &mut self,
        outlets: &[Id<MallOutlet>],
    ) -> Result<HashMap<Id<MallOutlet>, String>>;
}

pub trait StoreOperations:
    StationRepo
    + ListingRepo
    + ChainOutletRepo
    + MallOutletRepo
    + SourceRepo
    + PriceRepo
    + MenuImageRepo
{
}

#[async_trait]
pub trait StoreTransaction: StoreOperations {
    async fn commit(self) -> Result<()>;
}

pub trait StoreAutocommit: StoreOperations {}

/// Handle to the relational store. Concurrent access works by cloning the
/// store object; every `auto()` handle is independent.
#[async_trait]
pub trait Store: Clone + Send + Sync + Sized {
    type Transaction: StoreTransaction + Send;
    type Autocommit: StoreAutocommit + Send;

    async fn transaction(&self) -> Result<Self::Transaction>;

    fn auto(&self) -> Self::Autocommit;
}
