use std::collections::HashSet;

use food_discovery::{
    aggregate::dedup_items,
    store::{ListingRepo, PriceRepo, Store, StoreTransaction},
};
use model::{item::FoodItem, listing::FoodListing, station::Station, WithId};
use serde::Serialize;
use utility::id::Id;

use super::{print_report, Result};

/// Ids that lose their slot under the aggregator's richness dedup. Prices
/// count towards richness, so they are attached first, exactly as the
/// serving path does.
fn plan_deactivations(items: Vec<WithId<FoodItem>>) -> Vec<Id<FoodListing>> {
    let all: Vec<String> = items.iter().map(|item| item.id.raw()).collect();
    let survivors: HashSet<String> = dedup_items(items)
        .into_iter()
        .map(|item| item.id.raw())
        .collect();
    all.into_iter()
        .filter(|id| !survivors.contains(id))
        .map(Id::new)
        .collect()
}

#[derive(Debug, Clone, Serialize)]
struct DedupeReport {
    deactivated_listings: usize,
}

pub async fn run<S: Store>(store: &S, station: &Id<Station>) -> Result<()> {
    log::info!("deduplicating listings at {station}...");

    let mut tx = store.transaction().await?;
    let listings = tx.active_listings_by_station(station).await?;
    let ids: Vec<Id<FoodListing>> = listings.iter().map(|listing| listing.id.clone()).collect();
    let mut prices = tx.prices_for_listings(&ids).await?;

    let mut items = Vec::with_capacity(listings.len());
    for listing in listings {
        let listing_prices = prices.remove(&listing.id).unwrap_or_default();
        let mut item = FoodItem::from_listing(listing);
        item.content.prices = listing_prices;
        items.push(item);
    }

    let losers = plan_deactivations(items);
    for id in &losers {
        log::info!("soft-deleting duplicate listing {id}");
        tx.set_listing_activity(id, false).await?;
    }
    tx.commit().await?;

    print_report(
        "dedupe",
        &DedupeReport {
            deactivated_listings: losers.len(),
        },
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use model::{opening_hours::OpeningHours, ExampleData};

    use super::*;

    fn listing_item(id: &str, name: &str, with_hours: bool) -> WithId<FoodItem> {
        let mut listing = FoodListing::example_data();
        listing.name = name.to_owned();
        listing.image_url = None;
        listing.opening_hours = with_hours.then(|| OpeningHours::new("10:00-22:00"));
        FoodItem::from_listing(WithId::new(Id::new(id.to_owned()), listing))
    }

    #[test]
    fn poorer_duplicate_loses_its_slot() {
        let items = vec![
            listing_item("a", "Ajisen Ramen", false),
            listing_item("b", "Ajisen Ramen Restaurant", true),
        ];
        assert_eq!(plan_deactivations(items), vec![Id::new("a".to_owned())]);
    }

    #[test]
    fn tie_keeps_the_earlier_listing() {
        let items = vec![
            listing_item("a", "Toast Box", true),
            listing_item("b", "Toast Box", true),
        ];
        assert_eq!(plan_deactivations(items), vec![Id::new("b".to_owned())]);
    }

    #[test]
    fn unique_listings_are_untouched() {
        let items = vec![
            listing_item("a", "Ajisen Ramen", false),
            listing_item("b", "Koufu Food Court", false),
        ];
        assert!(plan_deactivations(items).is_empty());
    }
}
