use std::collections::HashMap;

use food_discovery::store::{ListingRepo, StationRepo, Store};
use model::{listing::FoodListing, station::Station};
use serde::Serialize;
use utility::geo::walking_minutes;

use super::{print_report, Result};

#[derive(Debug, PartialEq)]
enum BackfillPlan {
    Update { distance_m: f64, walk_time_min: u32 },
    AlreadyComplete,
    MissingCoordinates,
}

/// What to write back for one listing. A stored walk time is never
/// overwritten; a stored distance is trusted over the coordinates.
fn plan_backfill(listing: &FoodListing, station: &Station) -> BackfillPlan {
    match (listing.distance_m, listing.walk_time_min) {
        (Some(_), Some(_)) => BackfillPlan::AlreadyComplete,
        (Some(distance_m), None) => BackfillPlan::Update {
            distance_m,
            walk_time_min: walking_minutes(distance_m),
        },
        (None, walk_time_min) => match listing.distance_from(station) {
            Some(distance_m) => BackfillPlan::Update {
                distance_m,
                walk_time_min: walk_time_min.unwrap_or_else(|| walking_minutes(distance_m)),
            },
            None => BackfillPlan::MissingCoordinates,
        },
    }
}

#[derive(Debug, Clone, Serialize)]
struct BackfillReport {
    updated_listings: usize,
    already_complete: usize,
    missing_coordinates: usize,
    unknown_stations: usize,
}

pub async fn run<S: Store>(store: &S) -> Result<()> {
    log::info!("backfilling listing distances...");

    let mut handle = store.auto();
    let stations: HashMap<_, _> = handle
        .stations()
        .await?
        .into_iter()
        .map(|station| (station.id, station.content))
        .collect();

    let mut report = BackfillReport {
        updated_listings: 0,
        already_complete: 0,
        missing_coordinates: 0,
        unknown_stations: 0,
    };
    for listing in handle.all_listings().await? {
        let Some(station) = stations.get(&listing.content.station_id) else {
            log::warn!(
                "listing {} points at unknown station {}",
                listing.id,
                listing.content.station_id
            );
            report.unknown_stations += 1;
            continue;
        };
        match plan_backfill(&listing.content, station) {
            BackfillPlan::Update {
                distance_m,
                walk_time_min,
            } => {
                handle
                    .set_listing_walk(&listing.id, distance_m, walk_time_min)
                    .await?;
                report.updated_listings += 1;
            }
            BackfillPlan::AlreadyComplete => report.already_complete += 1,
            BackfillPlan::MissingCoordinates => report.missing_coordinates += 1,
        }
    }

    print_report("backfill", &report);
    Ok(())
}

#[cfg(test)]
mod tests {
    use model::ExampleData;

    use super::*;

    fn bare_listing() -> FoodListing {
        let mut listing = FoodListing::example_data();
        listing.distance_m = None;
        listing.walk_time_min = None;
        listing
    }

    #[test]
    fn derives_walk_time_from_stored_distance() {
        let station = Station::example_data();
        let mut listing = bare_listing();
        listing.distance_m = Some(240.0);
        assert_eq!(
            plan_backfill(&listing, &station),
            BackfillPlan::Update {
                distance_m: 240.0,
                walk_time_min: 3,
            }
        );
    }

    #[test]
    fn derives_distance_from_coordinates() {
        let station = Station::example_data();
        let mut listing = bare_listing();
        listing.latitude = Some(station.latitude);
        listing.longitude = Some(station.longitude);
        match plan_backfill(&listing, &station) {
            BackfillPlan::Update {
                distance_m,
                walk_time_min,
            } => {
                assert!(distance_m < 1.0);
                assert_eq!(walk_time_min, 0);
            }
            other => panic!("expected an update, got {other:?}"),
        }
    }

    #[test]
    fn stored_walk_time_survives_a_distance_backfill() {
        let station = Station::example_data();
        let mut listing = bare_listing();
        listing.walk_time_min = Some(7);
        listing.latitude = Some(station.latitude);
        listing.longitude = Some(station.longitude);
        match plan_backfill(&listing, &station) {
            BackfillPlan::Update { walk_time_min, .. } => assert_eq!(walk_time_min, 7),
            other => panic!("expected an update, got {other:?}"),
        }
    }

    #[test]
    fn complete_rows_are_left_alone() {
        let station = Station::example_data();
        let mut listing = bare_listing();
        listing.distance_m = Some(240.0);
        listing.walk_time_min = Some(3);
        assert_eq!(plan_backfill(&listing, &station), BackfillPlan::AlreadyComplete);
    }

    #[test]
    fn rows_without_coordinates_cannot_be_backfilled() {
        let station = Station::example_data();
        let mut listing = bare_listing();
        listing.latitude = None;
        listing.longitude = None;
        assert_eq!(
            plan_backfill(&listing, &station),
            BackfillPlan::MissingCoordinates
        );
    }
}
