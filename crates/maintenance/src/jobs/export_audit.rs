use std::collections::HashMap;

use food_discovery::store::{ListingRepo, PriceRepo, Store};
use itertools::Itertools;
use model::{listing::FoodListing, price::Price, WithId};
use serde::Serialize;
use utility::id::Id;

use super::{print_report, Result};

/// One csv line of the data-quality audit.
#[derive(Debug, Clone, Serialize)]
struct AuditRow {
    listing_id: String,
    station_id: String,
    name: String,
    is_active: bool,
    missing_image: bool,
    missing_price: bool,
    missing_walk_time: bool,
    created: String,
}

impl AuditRow {
    fn needs_attention(&self) -> bool {
        self.missing_image || self.missing_price || self.missing_walk_time
    }
}

fn audit_rows(
    listings: &[WithId<FoodListing>],
    prices: &HashMap<Id<FoodListing>, Vec<Price>>,
) -> Vec<AuditRow> {
    listings
        .iter()
        .map(|listing| AuditRow {
            listing_id: listing.id.raw(),
            station_id: listing.content.station_id.raw(),
            name: listing.content.name.clone(),
            is_active: listing.content.is_active,
            missing_image: listing.content.image_url.is_none(),
            missing_price: prices.get(&listing.id).map_or(true, Vec::is_empty),
            missing_walk_time: listing.content.walk_time_min.is_none(),
            created: listing
                .content
                .created_at
                .map(|at| at.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        })
        .sorted_by(|a, b| {
            a.station_id
                .cmp(&b.station_id)
                .then_with(|| a.name.cmp(&b.name))
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
struct ExportReport {
    exported_rows: usize,
    flagged_rows: usize,
}

pub async fn run<S: Store>(store: &S, path: &str) -> Result<()> {
    log::info!("exporting listing audit to {path}...");

    let mut handle = store.auto();
    let listings = handle.all_listings().await?;
    let ids: Vec<Id<FoodListing>> = listings.iter().map(|listing| listing.id.clone()).collect();
    let prices = handle.prices_for_listings(&ids).await?;

    let rows = audit_rows(&listings, &prices);
    let mut writer = csv::Writer::from_path(path)?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    print_report(
        "export",
        &ExportReport {
            exported_rows: rows.len(),
            flagged_rows: rows.iter().filter(|row| row.needs_attention()).count(),
        },
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use model::ExampleData;

    use super::*;

    fn listing(id: &str, station: &str, name: &str) -> WithId<FoodListing> {
        let mut listing = FoodListing::example_data();
        listing.station_id = Id::from_name(station);
        listing.name = name.to_owned();
        listing.image_url = None;
        listing.created_at = None;
        WithId::new(Id::new(id.to_owned()), listing)
    }

    #[test]
    fn rows_sort_by_station_then_name() {
        let listings = vec![
            listing("a", "Senja", "Zen Noodles"),
            listing("b", "Phoenix", "Ah Hua Kelong"),
            listing("c", "Senja", "Ajisen Ramen"),
        ];
        let rows = audit_rows(&listings, &HashMap::new());
        let order: Vec<&str> = rows.iter().map(|row| row.listing_id.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[test]
    fn price_flag_covers_absent_and_empty() {
        let listings = vec![
            listing("priced", "Senja", "Ajisen Ramen"),
            listing("empty", "Senja", "Koufu"),
            listing("absent", "Senja", "Toast Box"),
        ];
        let mut prices = HashMap::new();
        prices.insert(Id::new("priced".to_owned()), vec![Price::example_data()]);
        prices.insert(Id::new("empty".to_owned()), Vec::new());

        let rows = audit_rows(&listings, &prices);
        let by_id: HashMap<&str, &AuditRow> = rows
            .iter()
            .map(|row| (row.listing_id.as_str(), row))
            .collect();
        assert!(!by_id["priced"].missing_price);
        assert!(by_id["empty"].missing_price);
        assert!(by_id["absent"].missing_price);
    }

    #[test]
    fn created_column_is_a_plain_date() {
        let mut entry = listing("a", "Senja", "Ajisen Ramen");
        entry.content.created_at = Some(Utc.with_ymd_and_hms(2024, 3, 9, 4, 30, 0).unwrap());
        let rows = audit_rows(&[entry], &HashMap::new());
        assert_eq!(rows[0].created, "2024-03-09");

        let rows = audit_rows(&[listing("b", "Senja", "Koufu")], &HashMap::new());
        assert_eq!(rows[0].created, "");
    }

    #[test]
    fn attention_flags_follow_the_missing_fields() {
        let mut entry = listing("a", "Senja", "Ajisen Ramen");
        entry.content.image_url = Some("https://cdn.example.com/x.jpg".to_owned());
        entry.content.walk_time_min = Some(3);
        let mut prices = HashMap::new();
        prices.insert(Id::new("a".to_owned()), vec![Price::example_data()]);
        let rows = audit_rows(&[entry], &prices);
        assert!(!rows[0].needs_attention());
    }
}
