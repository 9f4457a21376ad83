use std::collections::HashMap;

use async_trait::async_trait;
use food_discovery::store::{MenuImageRepo, Result};
use model::{listing::FoodListing, menu_image::MenuImage, outlet::MallOutlet, WithId};
use sqlx::prelude::FromRow;
use utility::id::Id;

use super::StoreRow;
use crate::{
    queries::menu_image::{get_for_listing, get_for_outlet, get_headers_for_outlets},
    PgStoreAutocommit, PgStoreTransaction,
};

#[derive(Debug, Clone, FromRow)]
pub struct MenuImageRow {
    pub id: String,
    pub url: String,
    pub display_order: i32,
    pub is_header: bool,
}

impl StoreRow for MenuImageRow {
    type Model = MenuImage;

    fn get_id(&self) -> Id<Self::Model> {
        Id::new(self.id.clone())
    }

    fn to_model(self) -> Self::Model {
        MenuImage {
            url: self.url,
            display_order: self.display_order,
            is_header: self.is_header,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct HeaderImageRow {
    pub outlet_id: String,
    pub url: String,
}

#[async_trait]
impl MenuImageRepo for PgStoreAutocommit {
    async fn images_for_listing(
        &mut self,
        listing: &Id<FoodListing>,
    ) -> Result<Vec<WithId<MenuImage>>> {
        get_for_listing(&self.pool, listing).await
    }

    async fn images_for_outlet(
        &mut self,
        outlet: &Id<MallOutlet>,
    ) -> Result<Vec<WithId<MenuImage>>> {
        get_for_outlet(&self.pool, outlet).await
    }

    async fn header_images_for_outlets(
        &mut self,
        outlets: &[Id<MallOutlet>],
    ) -> Result<HashMap<Id<MallOutlet>, String>> {
        get_headers_for_outlets(&self.pool, outlets).await
    }
}

#[async_trait]
impl<'a> MenuImageRepo for PgStoreTransaction<'a> {
    async fn images_for_listing(
        &mut self,
        listing: &Id<FoodListing>,
    ) -> Result<Vec<WithId<MenuImage>>> {
        get_for_listing(&mut *self.tx, listing).await
    }

    async fn images_for_outlet(
        &mut self,
        outlet: &Id<MallOutlet>,
    ) -> Result<Vec<WithId<MenuImage>>> {
        get_for_outlet(&mut *self.tx, outlet).await
    }

    async fn header_images_for_outlets(
        &mut self,
        outlets: &[Id<MallOutlet>],
    ) -> Result<HashMap<Id<MallOutlet>, String>> {
        get_headers_for_outlets(&mut *self.tx, outlets).await
    }
}
