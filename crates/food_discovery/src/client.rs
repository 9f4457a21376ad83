use model::{
    item::{FoodItem, ItemKind},
    listing::FoodListing,
    menu_image::MenuImage,
    outlet::MallOutlet,
    station::Station,
    WithId,
};
use schemars::JsonSchema;
use serde::Serialize;
use utility::{id::Id, let_also::LetAlso};

use crate::{
    aggregate::{dedup_items, paginate, sort_items, FoodPage, Page, CHAIN_RADIUS_CUTOFF_M},
    config::DiscoveryConfig,
    filter::{apply_tag_filter, current_hour, TagFilterOptions},
    sources::{is_discoverable, resolve_attribution},
    store::{
        ChainOutletRepo, ListingRepo, MallOutletRepo, MenuImageRepo, PriceRepo,
        SourceRepo, StationRepo, Store,
    },
    RequestResult,
};

/// Outcome of nearby-station fallback. `resolved` equals the requested
/// station unless a fallback candidate supplied the items.
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FallbackResolution {
    #[serde(rename = "station")]
    pub requested: Id<Station>,
    #[serde(rename = "resolvedStation")]
    pub resolved: Id<Station>,
    pub is_fallback: bool,
    pub results: Vec<WithId<FoodItem>>,
    pub has_more: bool,
}

#[derive(Debug, Clone)]
pub struct Client<S>
where
    S: Store + Send + Sync + Sized + 'static,
{
    store: S,
    config: DiscoveryConfig,
}

impl<S> Client<S>
where
    S: Store,
{
    pub fn new(store: S, config: DiscoveryConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    pub async fn get_station(&self, id: &Id<Station>) -> RequestResult<WithId<Station>> {
        Ok(self.store.auto().station(id).await?)
    }

    pub async fn get_stations(&self) -> RequestResult<Vec<WithId<Station>>> {
        Ok(self.store.auto().stations().await?)
    }

    /// Everything servable at a station, deduplicated, attributed and
    /// sorted, before pagination. Any failed store call fails the whole
    /// aggregation; there is no partial result.
    async fn aggregate_all(
        &self,
        station: &Id<Station>,
    ) -> RequestResult<Vec<WithId<FoodItem>>> {
        let (listings, chain_outlets, mall_outlets) = {
            let mut listing_handle = self.store.auto();
            let mut chain_handle = self.store.auto();
            let mut mall_handle = self.store.auto();
            tokio::try_join!(
                listing_handle.active_listings_by_station(station),
                chain_handle.active_chain_outlets_near(station, CHAIN_RADIUS_CUTOFF_M),
                mall_handle.active_mall_outlets_by_station(station),
            )?
        };

        let listing_ids: Vec<Id<FoodListing>> =
            listings.iter().map(|listing| listing.id.clone()).collect();
        let outlet_ids: Vec<Id<MallOutlet>> = mall_outlets
            .iter()
            .map(|entry| entry.outlet.id.clone())
            .collect();
        let (mut prices, mut header_images) = {
            let mut price_handle = self.store.auto();
            let mut image_handle = self.store.auto();
            tokio::try_join!(
                price_handle.prices_for_listings(&listing_ids),
                image_handle.header_images_for_outlets(&outlet_ids),
            )?
        };

        // Prices and header images are attached before deduplication so the
        // richness tie-break sees them.
        let mut items =
            Vec::with_capacity(listings.len() + chain_outlets.len() + mall_outlets.len());
        for listing in listings {
            let listing_prices = prices.remove(&listing.id).unwrap_or_default();
            let mut item = FoodItem::from_listing(listing);
            item.content.prices = listing_prices;
            items.push(item);
        }
        for entry in chain_outlets {
            items.push(FoodItem::from_chain_outlet(entry));
        }
        for entry in mall_outlets {
            let header = header_images.remove(&entry.outlet.id);
            let mut item = FoodItem::from_mall_outlet(entry);
            if item.content.image_url.is_none() {
                item.content.image_url = header;
            }
            items.push(item);
        }

        let mut items = dedup_items(items);

        let surviving: Vec<Id<FoodListing>> = items
            .iter()
            .filter(|item| item.content.kind == ItemKind::Curated)
            .map(|item| Id::new(item.id.raw()))
            .collect();
        let mut sources = self.store.auto().sources_for_listings(&surviving).await?;

        items.retain_mut(|item| {
            if item.content.kind != ItemKind::Curated {
                return true;
            }
            let rows = sources.remove(&Id::new(item.id.raw())).unwrap_or_default();
            if !is_discoverable(&rows, &self.config.excluded_sources) {
                return false;
            }
            let attribution = resolve_attribution(rows);
            item.content.primary_source = attribution.primary;
            item.content.sources = attribution.sources;
            true
        });

        sort_items(&mut items);
        Ok(items)
    }

    pub async fn aggregate(
        &self,
        station: &Id<Station>,
        page: Page,
    ) -> RequestResult<FoodPage> {
        self.aggregate_all(station)
            .await?
            .let_owned(|items| Ok(paginate(items, page)))
    }

    /// Substitutes a configured nearby station's items when the requested
    /// station has none. Candidates are tried in table order; the first with
    /// any item wins. No candidate having items is an empty success, not a
    /// failure.
    pub async fn resolve_with_fallback(
        &self,
        station: &Id<Station>,
        page: Page,
    ) -> RequestResult<FallbackResolution> {
        let direct = self.aggregate(station, page).await?;
        if direct.total > 0 {
            return Ok(FallbackResolution {
                requested: station.clone(),
                resolved: station.clone(),
                is_fallback: false,
                results: direct.results,
                has_more: direct.has_more,
            });
        }

        for candidate in self.config.fallback.candidates(station) {
            let nearby = self.aggregate(candidate, page).await?;
            if nearby.total == 0 {
                continue;
            }
            log::info!("no food at {station}, serving {candidate} instead");
            let mut results = nearby.results;
            for item in &mut results {
                item.content.is_fallback = true;
            }
            return Ok(FallbackResolution {
                requested: station.clone(),
                resolved: candidate.clone(),
                is_fallback: true,
                results,
                has_more: nearby.has_more,
            });
        }

        Ok(FallbackResolution {
            requested: station.clone(),
            resolved: station.clone(),
            is_fallback: false,
            results: Vec::new(),
            has_more: false,
        })
    }

    pub async fn filter_by_tag(
        &self,
        station: &Id<Station>,
        tag: &str,
        options: TagFilterOptions,
    ) -> RequestResult<FoodPage> {
        let items = self.aggregate_all(station).await?;
        let hour = options.hour.unwrap_or_else(current_hour);
        apply_tag_filter(items, tag, hour, self.config.hours_policy)
            .let_owned(|filtered| Ok(paginate(filtered, options.page)))
    }

    pub async fn get_listing_images(
        &self,
        listing: &Id<FoodListing>,
    ) -> RequestResult<Vec<WithId<MenuImage>>> {
        Ok(self.store.auto().images_for_listing(listing).await?)
    }

    pub async fn get_outlet_images(
        &self,
        outlet: &Id<MallOutlet>,
    ) -> RequestResult<Vec<WithId<MenuImage>>> {
        Ok(self.store.auto().images_for_outlet(outlet).await?)
    }
}
