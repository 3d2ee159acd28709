use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tokio::sync::OnceCell;

use crate::store::{KeyValueStore, StoreError};

const KEY_PREFIX: &str = "cvgen:";

/// Redis-backed store for deployments where the data directory is not durable.
///
/// One multiplexed connection is opened on first use and shared by every
/// later call.
pub struct RedisStore {
    client: redis::Client,
    conn: OnceCell<MultiplexedConnection>,
}

impl RedisStore {
    pub fn open(url: &str) -> Result<Self, StoreError> {
        Ok(Self {
            client: redis::Client::open(url)?,
            conn: OnceCell::new(),
        })
    }

    fn key(key: &str) -> String {
        format!("{KEY_PREFIX}{key}")
    }

    async fn connection(&self) -> Result<MultiplexedConnection, StoreError> {
        let conn = self
            .conn
            .get_or_try_init(|| self.client.get_multiplexed_async_connection())
            .await?;
        Ok(conn.clone())
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(Self::key(key)).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.connection().await?;
        conn.set::<_, _, ()>(Self::key(key), value).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_prefixed() {
        assert_eq!(RedisStore::key("cvData"), "cvgen:cvData");
    }

    #[test]
    fn test_open_rejects_bad_url() {
        assert!(RedisStore::open("not a url").is_err());
    }

    #[test]
    fn test_open_is_lazy() {
        // No server is contacted until the first command.
        let store = RedisStore::open("redis://127.0.0.1:1/").unwrap();
        assert!(store.conn.get().is_none());
    }

    #[tokio::test]
    async fn test_failed_connect_is_not_cached() {
        let store = RedisStore::open("redis://127.0.0.1:1/").unwrap();
        assert!(store.get("cvData").await.is_err());
        assert!(store.conn.get().is_none());
        assert!(store.set("cvData", "{}").await.is_err());
    }
}
