use std::collections::HashMap;

use async_trait::async_trait;
use food_discovery::store::{PriceRepo, Result};
use model::{listing::FoodListing, price::Price};
use sqlx::prelude::FromRow;
use utility::id::Id;

use crate::{queries::price::get_for_listings, PgStoreAutocommit, PgStoreTransaction};

#[derive(Debug, Clone, FromRow)]
pub struct PriceRow {
    pub listing_id: String,
    pub label: String,
    pub amount_sgd: Option<f64>,
    pub price_range: Option<String>,
}

impl PriceRow {
    pub fn to_keyed(self) -> (Id<FoodListing>, Price) {
        (
            Id::new(self.listing_id),
            Price {
                label: self.label,
                amount_sgd: self.amount_sgd,
                range: self.price_range,
            },
        )
    }
}

#[async_trait]
impl PriceRepo for PgStoreAutocommit {
    async fn prices_for_listings(
        &mut self,
        listings: &[Id<FoodListing>],
    ) -> Result<HashMap<Id<FoodListing>, Vec<Price>>> {
        get_for_listings(&self.pool, listings).await
    }
}

#[async_trait]
impl<'a> PriceRepo for PgStoreTransaction<'a> {
    async fn prices_for_listings(
        &mut self,
        listings: &[Id<FoodListing>],
    ) -> Result<HashMap<Id<FoodListing>, Vec<Price>>> {
        get_for_listings(&mut *self.tx, listings).await
    }
}
