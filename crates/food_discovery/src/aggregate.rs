use std::cmp::Ordering;

use indexmap::IndexMap;
use model::{item::FoodItem, WithId};
use schemars::JsonSchema;
use serde::Serialize;
use utility::normalize::{extract_core_name, normalize};

/// Chain outlets stored as "nearest" to a station but further away than this
/// do not belong to it.
pub const CHAIN_RADIUS_CUTOFF_M: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: usize,
    pub limit: usize,
}

impl Page {
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    pub fn first(limit: usize) -> Self {
        Self { offset: 0, limit }
    }
}

/// One page of aggregated food items. `total` is the pre-pagination count and
/// stays off the wire.
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FoodPage {
    pub results: Vec<WithId<FoodItem>>,
    pub has_more: bool,
    #[serde(skip)]
    pub total: usize,
}

/// Collapses entries that normalize to the same core name at the same
/// station, keeping the entry with the richer data. Ties keep the earlier
/// entry, so running this twice changes nothing.
pub fn dedup_items(items: Vec<WithId<FoodItem>>) -> Vec<WithId<FoodItem>> {
    let mut by_key: IndexMap<(String, String), WithId<FoodItem>> = IndexMap::new();
    for item in items {
        let key = (
            extract_core_name(&item.content.name),
            item.content.station_id.raw(),
        );
        match by_key.get_mut(&key) {
            Some(existing) => {
                if item.content.richness_score() > existing.content.richness_score() {
                    *existing = item;
                }
            }
            None => {
                by_key.insert(key, item);
            }
        }
    }
    by_key.into_values().collect()
}

/// The stable serving order: primary source priority, then rating descending
/// with unrated entries last, then normalized name.
pub(crate) fn sort_items(items: &mut [WithId<FoodItem>]) {
    items.sort_by(compare_items);
}

fn compare_items(a: &WithId<FoodItem>, b: &WithId<FoodItem>) -> Ordering {
    let priority_a = a.content.primary_source_priority().unwrap_or(i32::MAX);
    let priority_b = b.content.primary_source_priority().unwrap_or(i32::MAX);
    priority_a
        .cmp(&priority_b)
        .then_with(|| match (a.content.rating, b.content.rating) {
            (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| normalize(&a.content.name).cmp(&normalize(&b.content.name)))
}

pub(crate) fn paginate(items: Vec<WithId<FoodItem>>, page: Page) -> FoodPage {
    let total = items.len();
    let results = items
        .into_iter()
        .skip(page.offset)
        .take(page.limit)
        .collect();
    FoodPage {
        results,
        has_more: page.offset + page.limit < total,
        total,
    }
}

#[cfg(test)]
mod tests {
    use model::{item::ItemKind, listing::FoodListing, opening_hours::OpeningHours, ExampleData};
    use utility::id::Id;

    use super::*;

    fn item(id: &str, name: &str, richness: u8) -> WithId<FoodItem> {
        let mut listing = FoodListing::example_data();
        listing.name = name.to_owned();
        listing.image_url = (richness >= 1).then(|| "https://cdn.example.com/x.jpg".to_owned());
        listing.opening_hours = (richness >= 2).then(|| OpeningHours::new("10:00-22:00"));
        let mut entry = FoodItem::from_listing(WithId::new(Id::new(id.to_owned()), listing));
        if richness >= 3 {
            entry.content.prices.push(model::price::Price::example_data());
        }
        entry
    }

    #[test]
    fn dedup_prefers_the_richer_entry() {
        let poor = item("a", "Ajisen Ramen", 0);
        let rich = item("b", "Ajisen Ramen Restaurant", 2);
        let kept = dedup_items(vec![poor, rich]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, Id::new("b".to_owned()));
    }

    #[test]
    fn dedup_keeps_the_earlier_entry_on_ties() {
        let first = item("a", "Ajisen Ramen", 1);
        let second = item("b", "Ajisen Ramen", 1);
        let kept = dedup_items(vec![first, second]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, Id::new("a".to_owned()));
    }

    #[test]
    fn dedup_is_idempotent() {
        let items = vec![
            item("a", "Ajisen Ramen", 0),
            item("b", "Ajisen Ramen Restaurant", 2),
            item("c", "Koufu Food Court", 1),
            item("d", "Toast Box", 3),
        ];
        let once = dedup_items(items);
        let names_once: Vec<_> = once.iter().map(|i| i.id.clone()).collect();
        let twice = dedup_items(once);
        let names_twice: Vec<_> = twice.iter().map(|i| i.id.clone()).collect();
        assert_eq!(names_once, names_twice);
    }

    #[test]
    fn dedup_is_scoped_per_station() {
        let mut at_senja = item("a", "Toast Box", 1);
        at_senja.content.station_id = Id::from_name("Senja");
        let mut at_phoenix = item("b", "Toast Box", 1);
        at_phoenix.content.station_id = Id::from_name("Phoenix");
        assert_eq!(dedup_items(vec![at_senja, at_phoenix]).len(), 2);
    }

    #[test]
    fn sort_puts_unrated_last_and_breaks_ties_by_name() {
        let mut items = vec![item("a", "Zen Noodles", 0), item("b", "Ah Hua Kelong", 0)];
        items[0].content.rating = None;
        items[1].content.rating = None;
        sort_items(&mut items);
        assert_eq!(items[0].content.name, "Ah Hua Kelong");

        let mut items = vec![item("a", "Low", 0), item("b", "High", 0)];
        items[0].content.rating = Some(3.9);
        items[1].content.rating = Some(4.5);
        sort_items(&mut items);
        assert_eq!(items[0].content.name, "High");

        let mut items = vec![item("a", "Unrated", 0), item("b", "Rated", 0)];
        items[0].content.rating = None;
        items[1].content.rating = Some(1.0);
        sort_items(&mut items);
        assert_eq!(items[0].content.name, "Rated");
    }

    #[test]
    fn pagination_boundary() {
        let items: Vec<_> = (0..5)
            .map(|n| item(&format!("id-{n}"), &format!("Stall {n}"), 0))
            .collect();

        let page = paginate(items.clone(), Page::new(0, 5));
        assert!(!page.has_more);
        assert_eq!(page.results.len(), 5);
        assert_eq!(page.total, 5);

        let page = paginate(items.clone(), Page::new(0, 4));
        assert!(page.has_more);

        let page = paginate(items.clone(), Page::new(4, 4));
        assert!(!page.has_more);
        assert_eq!(page.results.len(), 1);

        let page = paginate(items, Page::new(10, 4));
        assert!(!page.has_more);
        assert!(page.results.is_empty());
    }

    #[test]
    fn chain_and_mall_items_keep_their_kind_through_dedup() {
        let curated = item("a", "Ya Kun Kaya Toast", 0);
        let mut chain = item("b", "Ya Kun Kaya Toast Express", 0);
        chain.content.kind = ItemKind::ChainOutlet;
        chain.content.image_url = Some("https://cdn.example.com/logo.png".to_owned());
        let kept = dedup_items(vec![curated, chain]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].content.kind, ItemKind::ChainOutlet);
    }
}
