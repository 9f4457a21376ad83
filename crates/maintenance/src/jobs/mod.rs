use std::{io, result};

use food_discovery::store::StoreError;
use serde::Serialize;

pub mod backfill_distances;
pub mod dedupe_station;
pub mod export_audit;
pub mod import_stations;
pub mod link_chain_brands;
pub mod purge_inactive;

#[derive(Debug)]
pub enum JobError {
    Store(StoreError),
    Io(io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
}

impl From<StoreError> for JobError {
    fn from(why: StoreError) -> Self {
        Self::Store(why)
    }
}

impl From<io::Error> for JobError {
    fn from(why: io::Error) -> Self {
        Self::Io(why)
    }
}

impl From<csv::Error> for JobError {
    fn from(why: csv::Error) -> Self {
        Self::Csv(why)
    }
}

impl From<serde_json::Error> for JobError {
    fn from(why: serde_json::Error) -> Self {
        Self::Json(why)
    }
}

pub type Result<T> = result::Result<T, JobError>;

/// Every job finishes by printing a small json report to stdout.
pub(crate) fn print_report(job: &str, report: &impl Serialize) {
    println!(
        "{job} report: {}",
        serde_json::to_string_pretty(report).unwrap()
    );
}
