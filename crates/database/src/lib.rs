use std::{env, error::Error};

use async_trait::async_trait;
use food_discovery::store::{
    Store, StoreAutocommit, StoreError, StoreOperations, StoreTransaction,
};
use queries::convert_error;
use sqlx::Transaction;

pub mod data_model;
pub mod queries;

pub struct StoreConnectionInfo {
    pub username: String,
    pub password: String,
    pub hostname: String,
    pub port: u16,
    pub database: String,
}

impl StoreConnectionInfo {
    pub fn from_env() -> Option<Self> {
        let username = env::var("DATABASE_USER").ok()?;
        let password = env::var("DATABASE_PASSWORD").ok()?;
        let hostname = env::var("DATABASE_HOST").ok()?;
        let port: u16 = env::var("DATABASE_PORT").ok()?.parse().ok()?;
        let database = env::var("DATABASE_NAME").ok()?;
        Some(Self {
            username,
            password,
            hostname,
            port,
            database,
        })
    }

    pub(self) fn postgres_url(self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.hostname, self.port, self.database
        )
    }
}

#[derive(Clone)]
pub struct PgStore {
    connection: sqlx::PgPool,
}

pub struct PgStoreTransaction<'a> {
    tx: Transaction<'a, sqlx::Postgres>,
}

#[async_trait]
impl<'a> StoreTransaction for PgStoreTransaction<'a> {
    async fn commit(self) -> food_discovery::store::Result<()> {
        self.tx.commit().await.map_err(|why| match why {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            _ => StoreError::Other(Box::new(why)),
        })
    }
}

pub struct PgStoreAutocommit {
    pool: sqlx::PgPool,
}

impl StoreAutocommit for PgStoreAutocommit {}

impl PgStore {
    /// Connects to the pool. The schema under `migrations/` is applied out
    /// of band; the serving path never runs migrations.
    pub async fn connect(
        connection_info: StoreConnectionInfo,
    ) -> Result<Self, Box<dyn Error>> {
        let url = connection_info.postgres_url();
        let pool = sqlx::postgres::PgPool::connect(&url).await?;

        Ok(Self { connection: pool })
    }
}

#[async_trait]
impl Store for PgStore {
    type Transaction = PgStoreTransaction<'static>;
    type Autocommit = PgStoreAutocommit;

    fn auto(&self) -> Self::Autocommit {
        PgStoreAutocommit {
            pool: self.connection.clone(),
        }
    }

    async fn transaction(&self) -> food_discovery::store::Result<Self::Transaction> {
        let tx: Transaction<'_, sqlx::Postgres> = self
            .connection
            .begin()
            .await
            .map_err(convert_error)?;

        Ok(PgStoreTransaction { tx })
    }
}

impl StoreOperations for PgStoreAutocommit {}

impl<'a> StoreOperations for PgStoreTransaction<'a> {}
