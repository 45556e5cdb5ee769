use std::fmt::Debug;

use async_trait::async_trait;
use bb8::PooledConnection;
use bb8_redis::RedisConnectionManager;
use redis::AsyncCommands;
use time::OffsetDateTime;
use tower_sessions::{
    session::{Id, Record},
    session_store, SessionStore,
};

const KEY_PREFIX: &str = "dashboard-session:";

#[derive(Debug, thiserror::Error)]
pub enum RedisStoreError {
    #[error(transparent)]
    Redis(#[from] redis::RedisError),

    #[error(transparent)]
    Decode(#[from] rmp_serde::decode::Error),

    #[error(transparent)]
    Encode(#[from] rmp_serde::encode::Error),
}

impl From<RedisStoreError> for session_store::Error {
    fn from(err: RedisStoreError) -> Self {
        match err {
            RedisStoreError::Redis(inner) => session_store::Error::Backend(inner.to_string()),
            RedisStoreError::Decode(inner) => session_store::Error::Decode(inner.to_string()),
            RedisStoreError::Encode(inner) => session_store::Error::Encode(inner.to_string()),
        }
    }
}

/// Dashboard sessions kept in Redis, one MessagePack encoded record per key.
///
/// Keys expire together with the session record.
#[derive(Debug, Clone)]
pub struct RedisStore<C: Send + Sync> {
    client: C,
}

impl RedisStore<bb8::Pool<RedisConnectionManager>> {
    pub fn new(client: bb8::Pool<RedisConnectionManager>) -> Self {
        Self { client }
    }

    async fn connection(
        &self,
    ) -> session_store::Result<PooledConnection<'_, RedisConnectionManager>> {
        self.client.get().await.map_err(|_| {
            session_store::Error::Backend("Can't get a connection from the pool".to_owned())
        })
    }
}

fn key(session_id: &Id) -> String {
    format!("{KEY_PREFIX}{session_id}")
}

#[async_trait]
impl SessionStore for RedisStore<bb8::Pool<RedisConnectionManager>> {
    async fn save(&self, record: &Record) -> session_store::Result<()> {
        let payload = rmp_serde::to_vec(&record).map_err(RedisStoreError::Encode)?;
        let mut connection = self.connection().await?;

        let _: () = connection
            .set(key(&record.id), payload.as_slice())
            .await
            .map_err(RedisStoreError::Redis)?;

        let _: () = connection
            .expire_at(key(&record.id), record.expiry_date.unix_timestamp())
            .await
            .map_err(RedisStoreError::Redis)?;

        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let data: Option<Vec<u8>> = self
            .connection()
            .await?
            .get(key(session_id))
            .await
            .map_err(RedisStoreError::Redis)?;

        match data {
            Some(data) => {
                let record: Record =
                    rmp_serde::from_slice(&data).map_err(RedisStoreError::Decode)?;
                // Redis expiry has second granularity.
                if record.expiry_date <= OffsetDateTime::now_utc() {
                    return Ok(None);
                }
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        let _: () = self
            .connection()
            .await?
            .del(key(session_id))
            .await
            .map_err(RedisStoreError::Redis)?;
        Ok(())
    }
}
