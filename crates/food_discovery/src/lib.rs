use std::error::Error;

pub mod aggregate;
pub mod client;
pub mod config;
pub mod filter;
pub mod sources;
pub mod store;

#[derive(Debug)]
pub enum RequestError {
    NotFound,
    Other(Box<dyn Error + Send>),
}

impl RequestError {
    pub fn other<T: Error + Send + 'static>(why: T) -> Self {
        Self::Other(Box::new(why))
    }
}

impl From<store::StoreError> for RequestError {
    fn from(value: store::StoreError) -> Self {
        match value {
            store::StoreError::NotFound => Self::NotFound,
            store::StoreError::Other(why) => Self::Other(why),
        }
    }
}

pub type RequestResult<O> = Result<O, RequestError>;
