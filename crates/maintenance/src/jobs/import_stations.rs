use std::fs::File;

use food_discovery::store::{StationRepo, Store};
use model::{
    station::{Station, TransitLine},
    WithId,
};
use serde::{Deserialize, Serialize};
use utility::id::Id;

use super::{print_report, Result};

/// One station as it appears in the import file. Lines come as the printed
/// line codes ("NS", "BP", ...), not as enum names.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StationRecord {
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    lines: Vec<String>,
}

impl StationRecord {
    fn into_station(self) -> (Station, usize) {
        let mut lines = Vec::new();
        let mut unknown = 0;
        for code in &self.lines {
            match TransitLine::from_code(code) {
                Some(line) => lines.push(line),
                None => {
                    log::warn!("unknown line code {code:?} on station {:?}", self.name);
                    unknown += 1;
                }
            }
        }
        let station = Station {
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
            lines,
        };
        (station, unknown)
    }
}

#[derive(Debug, Clone, Serialize)]
struct ImportReport {
    imported_stations: usize,
    unknown_line_codes: usize,
}

pub async fn run<S: Store>(store: &S, path: &str) -> Result<()> {
    log::info!("importing stations from {path}...");
    let records: Vec<StationRecord> = serde_json::from_reader(File::open(path)?)?;

    let mut report = ImportReport {
        imported_stations: 0,
        unknown_line_codes: 0,
    };
    let mut handle = store.auto();
    for record in records {
        let (station, unknown) = record.into_station();
        report.unknown_line_codes += unknown;
        handle
            .put_station(WithId::new(Id::from_name(&station.name), station))
            .await?;
        report.imported_stations += 1;
    }

    print_report("import", &report);
    Ok(())
}
