use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::{opening_hours::OpeningHours, station::Station, ExampleData, WithId};

/// A food chain present at many stations, e.g. a toast or bubble-tea brand.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChainBrand {
    pub name: String,
    pub logo_url: Option<String>,
    pub default_tags: Vec<String>,
}

impl HasId for ChainBrand {
    type IdType = String;
}

impl ExampleData for ChainBrand {
    fn example_data() -> Self {
        ChainBrand {
            name: "Ya Kun Kaya Toast".to_owned(),
            logo_url: Some("https://cdn.example.com/logos/ya-kun.png".to_owned()),
            default_tags: vec!["Breakfast".to_owned(), "Coffee".to_owned()],
        }
    }
}

/// A single outlet of a chain, keyed to its geographically nearest station.
/// Outlets far beyond the station (outside the radius cutoff) are stored but
/// never served.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChainOutlet {
    pub name: String,
    #[serde(skip)]
    pub brand_id: Option<Id<ChainBrand>>,
    #[serde(skip)]
    pub nearest_station_id: Id<Station>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub distance_to_station_m: Option<f64>,
    pub level_unit: Option<String>,
    pub opening_hours: Option<OpeningHours>,
    pub tags: Vec<String>,
    pub rating: Option<f64>,
    pub is_active: bool,
}

impl HasId for ChainOutlet {
    type IdType = String;
}

impl ExampleData for ChainOutlet {
    fn example_data() -> Self {
        ChainOutlet {
            name: "Ya Kun Kaya Toast Hillion Mall".to_owned(),
            brand_id: Some(Id::from_name("Ya Kun Kaya Toast")),
            nearest_station_id: Id::from_name("Bukit Panjang"),
            address: Some("17 Petir Road #B1-56".to_owned()),
            latitude: Some(1.3781),
            longitude: Some(103.7636),
            distance_to_station_m: Some(130.0),
            level_unit: Some("#B1-56".to_owned()),
            opening_hours: Some(OpeningHours::new("07:30-21:30")),
            tags: vec!["Breakfast".to_owned()],
            rating: None,
            is_active: true,
        }
    }
}

/// Chain outlet together with its resolved brand, as the aggregator consumes
/// it. Unlinked outlets carry no brand.
#[derive(Debug, Clone)]
pub struct ChainOutletWithBrand {
    pub outlet: WithId<ChainOutlet>,
    pub brand: Option<WithId<ChainBrand>>,
}

/// A shopping mall associated with a station.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Mall {
    pub name: String,
    #[serde(skip)]
    pub station_id: Id<Station>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub distance_m: Option<f64>,
}

impl HasId for Mall {
    type IdType = String;
}

impl ExampleData for Mall {
    fn example_data() -> Self {
        Mall {
            name: "Hillion Mall".to_owned(),
            station_id: Id::from_name("Bukit Panjang"),
            latitude: Some(1.3782),
            longitude: Some(103.7637),
            distance_m: Some(120.0),
        }
    }
}

/// A food tenant inside a mall.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MallOutlet {
    pub name: String,
    #[serde(skip)]
    pub mall_id: Id<Mall>,
    pub level_unit: Option<String>,
    pub opening_hours: Option<OpeningHours>,
    pub tags: Vec<String>,
    pub rating: Option<f64>,
    pub image_url: Option<String>,
    pub is_active: bool,
}

impl HasId for MallOutlet {
    type IdType = String;
}

impl ExampleData for MallOutlet {
    fn example_data() -> Self {
        MallOutlet {
            name: "Koufu Food Court".to_owned(),
            mall_id: Id::from_name("Hillion Mall"),
            level_unit: Some("#03-01".to_owned()),
            opening_hours: Some(OpeningHours::new("08:00-22:00")),
            tags: vec!["Hawker".to_owned()],
            rating: Some(3.9),
            image_url: None,
            is_active: true,
        }
    }
}

/// Mall outlet together with its mall, as the aggregator consumes it.
#[derive(Debug, Clone)]
pub struct MallOutletWithMall {
    pub outlet: WithId<MallOutlet>,
    pub mall: WithId<Mall>,
}
