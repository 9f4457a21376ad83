use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::{
    geo::walking_minutes,
    id::{HasId, Id},
};

use crate::{
    listing::FoodListing,
    opening_hours::OpeningHours,
    outlet::{ChainOutletWithBrand, MallOutletWithMall},
    price::Price,
    source::{AttributedSource, Source},
    station::Station,
    ExampleData, WithId,
};

/// Which underlying table a food item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Curated,
    ChainOutlet,
    MallOutlet,
}

/// The unified food entry served by the aggregator, regardless of whether it
/// originated as a curated listing, a chain outlet or a mall tenant.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub kind: ItemKind,
    pub name: String,
    pub address: Option<String>,
    pub station_id: Id<Station>,
    /// Brand or mall display name, where one applies.
    pub venue: Option<String>,
    pub level_unit: Option<String>,
    pub distance_m: Option<f64>,
    pub walk_time_min: Option<u32>,
    pub tags: Vec<String>,
    pub rating: Option<f64>,
    pub image_url: Option<String>,
    pub opening_hours: Option<OpeningHours>,
    pub prices: Vec<Price>,
    pub sources: Vec<AttributedSource>,
    pub primary_source: Option<Id<Source>>,
    pub is_fallback: bool,
}

impl HasId for FoodItem {
    type IdType = String;
}

impl FoodItem {
    pub fn from_listing(listing: WithId<FoodListing>) -> WithId<FoodItem> {
        let id = Id::new(listing.id.raw());
        let listing = listing.content;
        let walk_time_min = listing
            .walk_time_min
            .or_else(|| listing.distance_m.map(walking_minutes));
        WithId::new(
            id,
            FoodItem {
                kind: ItemKind::Curated,
                name: listing.name,
                address: listing.address,
                station_id: listing.station_id,
                venue: None,
                level_unit: None,
                distance_m: listing.distance_m,
                walk_time_min,
                tags: listing.tags,
                rating: listing.rating,
                image_url: listing.image_url,
                opening_hours: listing.opening_hours,
                prices: Vec::new(),
                sources: Vec::new(),
                primary_source: None,
                is_fallback: false,
            },
        )
    }

    pub fn from_chain_outlet(entry: ChainOutletWithBrand) -> WithId<FoodItem> {
        let id = Id::new(entry.outlet.id.raw());
        let outlet = entry.outlet.content;
        let (venue, logo_url, default_tags) = match entry.brand {
            Some(brand) => (
                Some(brand.content.name),
                brand.content.logo_url,
                brand.content.default_tags,
            ),
            None => (None, None, Vec::new()),
        };
        let mut tags = outlet.tags;
        for tag in default_tags {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        let walk_time_min = outlet.distance_to_station_m.map(walking_minutes);
        WithId::new(
            id,
            FoodItem {
                kind: ItemKind::ChainOutlet,
                name: outlet.name,
                address: outlet.address,
                station_id: outlet.nearest_station_id,
                venue,
                level_unit: outlet.level_unit,
                distance_m: outlet.distance_to_station_m,
                walk_time_min,
                tags,
                rating: outlet.rating,
                image_url: logo_url,
                opening_hours: outlet.opening_hours,
                prices: Vec::new(),
                sources: Vec::new(),
                primary_source: None,
                is_fallback: false,
            },
        )
    }

    pub fn from_mall_outlet(entry: MallOutletWithMall) -> WithId<FoodItem> {
        let id = Id::new(entry.outlet.id.raw());
        let outlet = entry.outlet.content;
        let mall = entry.mall.content;
        let walk_time_min = mall.distance_m.map(walking_minutes);
        WithId::new(
            id,
            FoodItem {
                kind: ItemKind::MallOutlet,
                name: outlet.name,
                address: None,
                station_id: mall.station_id,
                venue: Some(mall.name),
                level_unit: outlet.level_unit,
                distance_m: mall.distance_m,
                walk_time_min,
                tags: outlet.tags,
                rating: outlet.rating,
                image_url: outlet.image_url,
                opening_hours: outlet.opening_hours,
                prices: Vec::new(),
                sources: Vec::new(),
                primary_source: None,
                is_fallback: false,
            },
        )
    }

    /// Data-richness used as the deduplication tie-break: one point each for
    /// an image, a price and opening hours.
    pub fn richness_score(&self) -> u8 {
        let mut score = 0;
        if self.image_url.is_some() {
            score += 1;
        }
        if !self.prices.is_empty() {
            score += 1;
        }
        if self.opening_hours.is_some() {
            score += 1;
        }
        score
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Priority of the primary source, if one is attributed.
    pub fn primary_source_priority(&self) -> Option<i32> {
        self.sources
            .iter()
            .find(|s| s.is_primary)
            .map(AttributedSource::priority)
    }
}

impl ExampleData for FoodItem {
    fn example_data() -> Self {
        FoodItem::from_listing(WithId::new(
            Id::from_name("Ajisen Ramen"),
            FoodListing::example_data(),
        ))
        .content
    }
}
