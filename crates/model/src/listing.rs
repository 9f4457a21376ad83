use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::{opening_hours::OpeningHours, station::Station, ExampleData};

/// A curated food establishment entry anchored to a station. Soft-deleted
/// via the activity flag, never removed by the serving path.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FoodListing {
    pub name: String,
    pub address: Option<String>,
    #[serde(skip)]
    pub station_id: Id<Station>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub distance_m: Option<f64>,
    pub walk_time_min: Option<u32>,
    pub tags: Vec<String>,
    pub rating: Option<f64>,
    pub image_url: Option<String>,
    pub opening_hours: Option<OpeningHours>,
    pub is_active: bool,
    #[serde(skip)]
    pub created_at: Option<DateTime<Utc>>,
}

impl FoodListing {
    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    /// Exact distance from the anchoring station, when coordinates are known.
    pub fn distance_from(&self, station: &Station) -> Option<f64> {
        let latitude = self.latitude?;
        let longitude = self.longitude?;
        Some(station.distance_to_m(latitude, longitude))
    }
}

impl HasId for FoodListing {
    type IdType = String;
}

impl ExampleData for FoodListing {
    fn example_data() -> Self {
        FoodListing {
            name: "Ajisen Ramen".to_owned(),
            address: Some("1 Jelebu Road".to_owned()),
            station_id: Id::from_name("Bukit Panjang"),
            latitude: Some(1.3786),
            longitude: Some(103.7619),
            distance_m: Some(240.0),
            walk_time_min: Some(3),
            tags: vec!["Ramen".to_owned(), "Japanese".to_owned()],
            rating: Some(4.1),
            image_url: None,
            opening_hours: Some(OpeningHours::example_data()),
            is_active: true,
            created_at: None,
        }
    }
}
