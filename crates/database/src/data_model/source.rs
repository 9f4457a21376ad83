use std::collections::HashMap;

use async_trait::async_trait;
use food_discovery::store::{Result, SourceRepo};
use model::{
    listing::FoodListing,
    source::{AttributedSource, Source},
    WithId,
};
use sqlx::prelude::FromRow;
use utility::id::Id;

use crate::{queries::source::get_for_listings, PgStoreAutocommit, PgStoreTransaction};

/// One row of the listing-to-source join, keyed by the listing it belongs to.
#[derive(Debug, Clone, FromRow)]
pub struct AttributedSourceRow {
    pub listing_id: String,
    pub id: String,
    pub name: String,
    pub icon_url: Option<String>,
    pub color: Option<String>,
    pub priority: i32,
    pub is_primary: bool,
    pub source_url: Option<String>,
}

impl AttributedSourceRow {
    pub fn to_attributed(self) -> (Id<FoodListing>, AttributedSource) {
        (
            Id::new(self.listing_id),
            AttributedSource {
                source: WithId::new(
                    Id::new(self.id),
                    Source {
                        name: self.name,
                        icon_url: self.icon_url,
                        color: self.color,
                        priority: self.priority,
                    },
                ),
                is_primary: self.is_primary,
                source_url: self.source_url,
            },
        )
    }
}

#[async_trait]
impl SourceRepo for PgStoreAutocommit {
    async fn sources_for_listings(
        &mut self,
        listings: &[Id<FoodListing>],
    ) -> Result<HashMap<Id<FoodListing>, Vec<AttributedSource>>> {
        get_for_listings(&self.pool, listings).await
    }
}

#[async_trait]
impl<'a> SourceRepo for PgStoreTransaction<'a> {
    async fn sources_for_listings(
        &mut self,
        listings: &[Id<FoodListing>],
    ) -> Result<HashMap<Id<FoodListing>, Vec<AttributedSource>>> {
        get_for_listings(&mut *self.tx, listings).await
    }
}
