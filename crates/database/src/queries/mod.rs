use food_discovery::store::StoreError;

pub mod chain;
pub mod listing;
pub mod mall;
pub mod menu_image;
pub mod price;
pub mod source;
pub mod station;

pub(crate) fn convert_error(why: sqlx::Error) -> StoreError {
    match why {
        sqlx::Error::RowNotFound => StoreError::NotFound,
        _ => StoreError::Other(Box::new(why)),
    }
}
