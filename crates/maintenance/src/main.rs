use std::{env, process};

use database::{PgStore, StoreConnectionInfo};
use model::station::Station;
use utility::id::Id;

mod jobs;

const USAGE: &str = "\
usage: maintenance <job> [args]

jobs:
  import-stations <stations.json>   upsert reference stations from a json file
  backfill-distances                fill missing listing distances and walk times
  link-chain-brands                 attach unlinked chain outlets to their brands
  dedupe-station <station-id>       soft-delete duplicate listings at one station
  export-audit <out.csv>            write per-listing data-quality rows
  purge-inactive                    hard-delete soft-deleted listings";

#[derive(Debug)]
enum Job {
    ImportStations { path: String },
    BackfillDistances,
    LinkChainBrands,
    DedupeStation { station: Id<Station> },
    ExportAudit { path: String },
    PurgeInactive,
}

fn parse_job(args: &[&str]) -> Option<Job> {
    match args {
        ["import-stations", path] => Some(Job::ImportStations {
            path: (*path).to_owned(),
        }),
        ["backfill-distances"] => Some(Job::BackfillDistances),
        ["link-chain-brands"] => Some(Job::LinkChainBrands),
        ["dedupe-station", station] => Some(Job::DedupeStation {
            station: Id::new((*station).to_owned()),
        }),
        ["export-audit", path] => Some(Job::ExportAudit {
            path: (*path).to_owned(),
        }),
        ["purge-inactive"] => Some(Job::PurgeInactive),
        _ => None,
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let Some(job) = parse_job(&args) else {
        eprintln!("{USAGE}");
        process::exit(2);
    };

    // database
    let connection_info = StoreConnectionInfo::from_env()
        .expect("expected database connection info in env.");
    let store = PgStore::connect(connection_info)
        .await
        .expect("could not connect to database.");

    let outcome = match job {
        Job::ImportStations { path } => jobs::import_stations::run(&store, &path).await,
        Job::BackfillDistances => jobs::backfill_distances::run(&store).await,
        Job::LinkChainBrands => jobs::link_chain_brands::run(&store).await,
        Job::DedupeStation { station } => jobs::dedupe_station::run(&store, &station).await,
        Job::ExportAudit { path } => jobs::export_audit::run(&store, &path).await,
        Job::PurgeInactive => jobs::purge_inactive::run(&store).await,
    };

    if let Err(why) = outcome {
        log::error!("job failed: {:?}", why);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognised_jobs_parse() {
        assert!(matches!(
            parse_job(&["import-stations", "stations.json"]),
            Some(Job::ImportStations { .. })
        ));
        assert!(matches!(
            parse_job(&["backfill-distances"]),
            Some(Job::BackfillDistances)
        ));
        assert!(matches!(
            parse_job(&["link-chain-brands"]),
            Some(Job::LinkChainBrands)
        ));
        assert!(matches!(
            parse_job(&["dedupe-station", "senja"]),
            Some(Job::DedupeStation { .. })
        ));
        assert!(matches!(
            parse_job(&["export-audit", "audit.csv"]),
            Some(Job::ExportAudit { .. })
        ));
        assert!(matches!(
            parse_job(&["purge-inactive"]),
            Some(Job::PurgeInactive)
        ));
    }

    #[test]
    fn bad_invocations_do_not_parse() {
        assert!(parse_job(&[]).is_none());
        assert!(parse_job(&["unknown-job"]).is_none());
        assert!(parse_job(&["dedupe-station"]).is_none());
        assert!(parse_job(&["backfill-distances", "extra"]).is_none());
    }
}
