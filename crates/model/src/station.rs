use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::{geo::haversine_distance_m, id::HasId};

use crate::ExampleData;

/// Singapore MRT/LRT lines a station can sit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum TransitLine {
    NorthSouth,
    EastWest,
    NorthEast,
    Circle,
    Downtown,
    ThomsonEastCoast,
    BukitPanjangLrt,
    SengkangLrt,
    PunggolLrt,
}

impl TransitLine {
    pub fn code(&self) -> &'static str {
        match self {
            TransitLine::NorthSouth => "NS",
            TransitLine::EastWest => "EW",
            TransitLine::NorthEast => "NE",
            TransitLine::Circle => "CC",
            TransitLine::Downtown => "DT",
            TransitLine::ThomsonEastCoast => "TE",
            TransitLine::BukitPanjangLrt => "BP",
            TransitLine::SengkangLrt => "SK",
            TransitLine::PunggolLrt => "PG",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "NS" => Some(TransitLine::NorthSouth),
            "EW" => Some(TransitLine::EastWest),
            "NE" => Some(TransitLine::NorthEast),
            "CC" => Some(TransitLine::Circle),
            "DT" => Some(TransitLine::Downtown),
            "TE" => Some(TransitLine::ThomsonEastCoast),
            "BP" => Some(TransitLine::BukitPanjangLrt),
            "SK" => Some(TransitLine::SengkangLrt),
            "PG" => Some(TransitLine::PunggolLrt),
            _ => None,
        }
    }

    pub fn is_lrt(&self) -> bool {
        matches!(
            self,
            TransitLine::BukitPanjangLrt
                | TransitLine::SengkangLrt
                | TransitLine::PunggolLrt
        )
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub lines: Vec<TransitLine>,
}

impl Station {
    pub fn distance_to_m(&self, latitude: f64, longitude: f64) -> f64 {
        haversine_distance_m(self.latitude, self.longitude, latitude, longitude)
    }

    /// Feeder stations served only by an LRT loop, the usual candidates for
    /// nearby-station fallback.
    pub fn is_lrt_feeder(&self) -> bool {
        !self.lines.is_empty() && self.lines.iter().all(TransitLine::is_lrt)
    }
}

impl HasId for Station {
    type IdType = String;
}

impl ExampleData for Station {
    fn example_data() -> Self {
        Station {
            name: "Senja".to_owned(),
            latitude: 1.3827,
            longitude: 103.7625,
            lines: vec![TransitLine::BukitPanjangLrt],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lrt_feeder_detection() {
        let senja = Station::example_data();
        assert!(senja.is_lrt_feeder());

        let interchange = Station {
            name: "Bukit Panjang".to_owned(),
            latitude: 1.3785,
            longitude: 103.7627,
            lines: vec![TransitLine::Downtown, TransitLine::BukitPanjangLrt],
        };
        assert!(!interchange.is_lrt_feeder());
    }

    #[test]
    fn line_codes() {
        assert_eq!(TransitLine::Downtown.code(), "DT");
        assert_eq!(TransitLine::BukitPanjangLrt.code(), "BP");
        assert!(TransitLine::BukitPanjangLrt.is_lrt());
        assert!(!TransitLine::Downtown.is_lrt());
    }

    #[test]
    fn line_codes_round_trip() {
        for line in [
            TransitLine::NorthSouth,
            TransitLine::EastWest,
            TransitLine::NorthEast,
            TransitLine::Circle,
            TransitLine::Downtown,
            TransitLine::ThomsonEastCoast,
            TransitLine::BukitPanjangLrt,
            TransitLine::SengkangLrt,
            TransitLine::PunggolLrt,
        ] {
            assert_eq!(TransitLine::from_code(line.code()), Some(line));
        }
        assert_eq!(TransitLine::from_code("XX"), None);
    }
}
