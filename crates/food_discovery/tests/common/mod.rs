#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    io,
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;
use food_discovery::store::{
    ChainOutletRepo, ListingRepo, MallOutletRepo, MenuImageRepo, PriceRepo, Result,
    SourceRepo, StationRepo, Store, StoreAutocommit, StoreError, StoreOperations,
    StoreTransaction,
};
use model::{
    listing::FoodListing,
    menu_image::MenuImage,
    outlet::{
        ChainBrand, ChainOutlet, ChainOutletWithBrand, Mall, MallOutlet,
        MallOutletWithMall,
    },
    price::Price,
    source::{AttributedSource, Source},
    station::{Station, TransitLine},
    WithId,
};
use utility::id::Id;

#[derive(Default)]
struct MemData {
    stations: Vec<WithId<Station>>,
    listings: Vec<WithId<FoodListing>>,
    chain_outlets: Vec<ChainOutletWithBrand>,
    mall_outlets: Vec<MallOutletWithMall>,
    sources: HashMap<Id<FoodListing>, Vec<AttributedSource>>,
    prices: HashMap<Id<FoodListing>, Vec<Price>>,
    listing_images: HashMap<Id<FoodListing>, Vec<WithId<MenuImage>>>,
    outlet_images: HashMap<Id<MallOutlet>, Vec<WithId<MenuImage>>>,
    failing_ops: HashSet<&'static str>,
}

/// In-memory store backing the scenario tests, with per-operation failure
/// injection.
#[derive(Clone, Default)]
pub struct MemStore {
    data: Arc<Mutex<MemData>>,
}

impl MemStore {
    pub fn with_station(self, station: WithId<Station>) -> Self {
        self.data.lock().unwrap().stations.push(station);
        self
    }

    pub fn with_listing(self, listing: WithId<FoodListing>) -> Self {
        self.data.lock().unwrap().listings.push(listing);
        self
    }

    pub fn with_chain_outlet(self, outlet: ChainOutletWithBrand) -> Self {
        self.data.lock().unwrap().chain_outlets.push(outlet);
        self
    }

    pub fn with_mall_outlet(self, outlet: MallOutletWithMall) -> Self {
        self.data.lock().unwrap().mall_outlets.push(outlet);
        self
    }

    pub fn with_sources(self, listing: &str, sources: Vec<AttributedSource>) -> Self {
        self.data
            .lock()
            .unwrap()
            .sources
            .insert(Id::new(listing.to_owned()), sources);
        self
    }

    pub fn with_prices(self, listing: &str, prices: Vec<Price>) -> Self {
        self.data
            .lock()
            .unwrap()
            .prices
            .insert(Id::new(listing.to_owned()), prices);
        self
    }

    pub fn with_listing_images(self, listing: &str, images: Vec<WithId<MenuImage>>) -> Self {
        self.data
            .lock()
            .unwrap()
            .listing_images
            .insert(Id::new(listing.to_owned()), images);
        self
    }

    pub fn with_outlet_images(self, outlet: &str, images: Vec<WithId<MenuImage>>) -> Self {
        self.data
            .lock()
            .unwrap()
            .outlet_images
            .insert(Id::new(outlet.to_owned()), images);
        self
    }

    /// Makes the named operation fail with an injected error. Operation names
    /// are the repo method concerns: "listings", "chain_outlets",
    /// "mall_outlets", "sources", "prices", "images".
    pub fn failing_on(self, op: &'static str) -> Self {
        self.data.lock().unwrap().failing_ops.insert(op);
        self
    }
}

pub struct MemHandle {
    data: Arc<Mutex<MemData>>,
}

impl MemHandle {
    fn guard(&self, op: &str) -> Result<MutexGuard<'_, MemData>> {
        let data = self.data.lock().unwrap();
        if data.failing_ops.contains(op) {
            return Err(StoreError::other(io::Error::new(
                io::ErrorKind::Other,
                format!("injected {op} failure"),
            )));
        }
        Ok(data)
    }
}

#[async_trait]
impl StationRepo for MemHandle {
    async fn station(&mut self, id: &Id<Station>) -> Result<WithId<Station>> {
        self.guard("stations")?
            .stations
            .iter()
            .find(|station| &station.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn stations(&mut self) -> Result<Vec<WithId<Station>>> {
        Ok(self.guard("stations")?.stations.clone())
    }

    async fn put_station(&mut self, station: WithId<Station>) -> Result<WithId<Station>> {
        let mut data = self.guard("stations")?;
        data.stations.retain(|existing| existing.id != station.id);
        data.stations.push(station.clone());
        Ok(station)
    }
}

#[async_trait]
impl ListingRepo for MemHandle {
    async fn active_listings_by_station(
        &mut self,
        station: &Id<Station>,
    ) -> Result<Vec<WithId<FoodListing>>> {
        Ok(self
            .guard("listings")?
            .listings
            .iter()
            .filter(|listing| {
                listing.content.is_active && &listing.content.station_id == station
            })
            .cloned()
            .collect())
    }

    async fn all_listings(&mut self) -> Result<Vec<WithId<FoodListing>>> {
        Ok(self.guard("listings")?.listings.clone())
    }

    async fn set_listing_activity(
        &mut self,
        id: &Id<FoodListing>,
        active: bool,
    ) -> Result<()> {
        let mut data = self.guard("listings")?;
        let listing = data
            .listings
            .iter_mut()
            .find(|listing| &listing.id == id)
            .ok_or(StoreError::NotFound)?;
        listing.content.is_active = active;
        Ok(())
    }

    async fn set_listing_walk(
        &mut self,
        id: &Id<FoodListing>,
        distance_m: f64,
        walk_time_min: u32,
    ) -> Result<()> {
        let mut data = self.guard("listings")?;
        let listing = data
            .listings
            .iter_mut()
            .find(|listing| &listing.id == id)
            .ok_or(StoreError::NotFound)?;
        listing.content.distance_m = Some(distance_m);
        listing.content.walk_time_min = Some(walk_time_min);
        Ok(())
    }

    async fn delete_inactive_listings(&mut self) -> Result<u64> {
        let mut data = self.guard("listings")?;
        let before = data.listings.len();
        data.listings.retain(|listing| listing.content.is_active);
        Ok((before - data.listings.len()) as u64)
    }
}

#[async_trait]
impl ChainOutletRepo for MemHandle {
    async fn active_chain_outlets_near(
        &mut self,
        station: &Id<Station>,
        max_distance_m: f64,
    ) -> Result<Vec<ChainOutletWithBrand>> {
        Ok(self
            .guard("chain_outlets")?
            .chain_outlets
            .iter()
            .filter(|entry| {
                entry.outlet.content.is_active
                    && &entry.outlet.content.nearest_station_id == station
                    && entry
                        .outlet
                        .content
                        .distance_to_station_m
                        .is_some_and(|distance| distance <= max_distance_m)
            })
            .cloned()
            .collect())
    }

    async fn unlinked_chain_outlets(&mut self) -> Result<Vec<WithId<ChainOutlet>>> {
        Ok(self
            .guard("chain_outlets")?
            .chain_outlets
            .iter()
            .filter(|entry| entry.outlet.content.brand_id.is_none())
            .map(|entry| entry.outlet.clone())
            .collect())
    }

    async fn chain_brands(&mut self) -> Result<Vec<WithId<ChainBrand>>> {
        Ok(self
            .guard("chain_outlets")?
            .chain_outlets
            .iter()
            .filter_map(|entry| entry.brand.clone())
            .collect())
    }

    async fn link_outlet_to_brand(
        &mut self,
        outlet: &Id<ChainOutlet>,
        brand: &Id<ChainBrand>,
    ) -> Result<()> {
        let mut data = self.guard("chain_outlets")?;
        let entry = data
            .chain_outlets
            .iter_mut()
            .find(|entry| &entry.outlet.id == outlet)
            .ok_or(StoreError::NotFound)?;
        entry.outlet.content.brand_id = Some(brand.clone());
        Ok(())
    }
}

#[async_trait]
impl MallOutletRepo for MemHandle {
    async fn active_mall_outlets_by_station(
        &mut self,
        station: &Id<Station>,
    ) -> Result<Vec<MallOutletWithMall>> {
        Ok(self
            .guard("mall_outlets")?
            .mall_outlets
            .iter()
            .filter(|entry| {
                entry.outlet.content.is_active && &entry.mall.content.station_id == station
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SourceRepo for MemHandle {
    async fn sources_for_listings(
        &mut self,
        listings: &[Id<FoodListing>],
    ) -> Result<HashMap<Id<FoodListing>, Vec<AttributedSource>>> {
        let data = self.guard("sources")?;
        Ok(listings
            .iter()
            .filter_map(|id| data.sources.get(id).map(|rows| (id.clone(), rows.clone())))
            .collect())
    }
}

#[async_trait]
impl PriceRepo for MemHandle {
    async fn prices_for_listings(
        &mut self,
        listings: &[Id<FoodListing>],
    ) -> Result<HashMap<Id<FoodListing>, Vec<Price>>> {
        let data = self.guard("prices")?;
        Ok(listings
            .iter()
            .filter_map(|id| data.prices.get(id).map(|rows| (id.clone(), rows.clone())))
            .collect())
    }
}

#[async_trait]
impl MenuImageRepo for MemHandle {
    async fn images_for_listing(
        &mut self,
        listing: &Id<FoodListing>,
    ) -> Result<Vec<WithId<MenuImage>>> {
        let mut images = self
            .guard("images")?
            .listing_images
            .get(listing)
            .cloned()
            .unwrap_or_default();
        images.sort_by_key(|image| image.content.display_order);
        Ok(images)
    }

    async fn images_for_outlet(
        &mut self,
        outlet: &Id<MallOutlet>,
    ) -> Result<Vec<WithId<MenuImage>>> {
        let mut images = self
            .guard("images")?
            .outlet_images
            .get(outlet)
            .cloned()
            .unwrap_or_default();
        images.sort_by_key(|image| image.content.display_order);
        Ok(images)
    }

    async fn header_images_for_outlets(
        &mut self,
        outlets: &[Id<MallOutlet>],
    ) -> Result<HashMap<Id<MallOutlet>, String>> {
        let data = self.guard("images")?;
        Ok(outlets
            .iter()
            .filter_map(|id| {
                data.outlet_images.get(id).and_then(|images| {
                    images
                        .iter()
                        .find(|image| image.content.is_header)
                        .map(|image| (id.clone(), image.content.url.clone()))
                })
            })
            .collect())
    }
}

impl StoreOperations for MemHandle {}

#[async_trait]
impl StoreTransaction for MemHandle {
    async fn commit(self) -> Result<()> {
        Ok(())
    }
}

impl StoreAutocommit for MemHandle {}

#[async_trait]
impl Store for MemStore {
    type Transaction = MemHandle;
    type Autocommit = MemHandle;

    async fn transaction(&self) -> Result<MemHandle> {
        Ok(self.auto())
    }

    fn auto(&self) -> MemHandle {
        MemHandle {
            data: self.data.clone(),
        }
    }
}

// fixture helpers

pub fn station(name: &str, latitude: f64, longitude: f64) -> WithId<Station> {
    WithId::new(
        Id::from_name(name),
        Station {
            name: name.to_owned(),
            latitude,
            longitude,
            lines: vec![TransitLine::BukitPanjangLrt],
        },
    )
}

pub fn listing(id: &str, station: &str, name: &str) -> WithId<FoodListing> {
    WithId::new(
        Id::new(id.to_owned()),
        FoodListing {
            name: name.to_owned(),
            address: None,
            station_id: Id::from_name(station),
            latitude: None,
            longitude: None,
            distance_m: None,
            walk_time_min: None,
            tags: Vec::new(),
            rating: None,
            image_url: None,
            opening_hours: None,
            is_active: true,
            created_at: None,
        },
    )
}

pub fn chain_outlet(
    id: &str,
    station: &str,
    name: &str,
    distance_m: f64,
) -> ChainOutletWithBrand {
    ChainOutletWithBrand {
        outlet: WithId::new(
            Id::new(id.to_owned()),
            ChainOutlet {
                name: name.to_owned(),
                brand_id: None,
                nearest_station_id: Id::from_name(station),
                address: None,
                latitude: None,
                longitude: None,
                distance_to_station_m: Some(distance_m),
                level_unit: None,
                opening_hours: None,
                tags: Vec::new(),
                rating: None,
                is_active: true,
            },
        ),
        brand: None,
    }
}

pub fn mall_outlet(id: &str, mall: &str, station: &str, name: &str) -> MallOutletWithMall {
    MallOutletWithMall {
        outlet: WithId::new(
            Id::new(id.to_owned()),
            MallOutlet {
                name: name.to_owned(),
                mall_id: Id::from_name(mall),
                level_unit: None,
                opening_hours: None,
                tags: Vec::new(),
                rating: None,
                image_url: None,
                is_active: true,
            },
        ),
        mall: WithId::new(
            Id::from_name(mall),
            Mall {
                name: mall.to_owned(),
                station_id: Id::from_name(station),
                latitude: None,
                longitude: None,
                distance_m: Some(150.0),
            },
        ),
    }
}

pub fn attributed(
    source_id: &str,
    name: &str,
    priority: i32,
    is_primary: bool,
) -> AttributedSource {
    AttributedSource {
        source: WithId::new(
            Id::new(source_id.to_owned()),
            Source {
                name: name.to_owned(),
                icon_url: None,
                color: None,
                priority,
            },
        ),
        is_primary,
        source_url: None,
    }
}

pub fn menu_image(id: &str, url: &str, display_order: i32, is_header: bool) -> WithId<MenuImage> {
    WithId::new(
        Id::new(id.to_owned()),
        MenuImage {
            url: url.to_owned(),
            display_order,
            is_header,
        },
    )
}
