use food_discovery::store::{ListingRepo, Store};
use serde::Serialize;

use super::{print_report, Result};

#[derive(Debug, Clone, Serialize)]
struct PurgeReport {
    deleted_listings: u64,
}

/// Hard-deletes everything the dedupe and curation passes soft-deleted.
pub async fn run<S: Store>(store: &S) -> Result<()> {
    log::info!("purging inactive listings...");

    let mut handle = store.auto();
    let deleted_listings = handle.delete_inactive_listings().await?;

    print_report("purge", &PurgeReport { deleted_listings });
    Ok(())
}
