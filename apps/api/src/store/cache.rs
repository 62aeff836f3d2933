//! Redis-backed snapshot cache, applied as a decorator around another store.
//!
//! A cache problem never fails a scoring run: reads and writes that error are
//! logged and the inner store is used. A failing inner store is never papered
//! over with a cached copy beyond the TTL.

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::models::employee::PopulationSnapshot;
use crate::store::AttributeStore;

pub const SNAPSHOT_CACHE_KEY: &str = "talent-match:population-snapshot:v1";

pub struct CachedAttributeStore<S> {
    inner: S,
    redis: redis::Client,
    ttl_secs: u64,
}

impl<S: AttributeStore> CachedAttributeStore<S> {
    pub fn new(inner: S, redis: redis::Client, ttl_secs: u64) -> Self {
        Self {
            inner,
            redis,
            ttl_secs,
        }
    }

    async fn read_cached(&self) -> Result<Option<PopulationSnapshot>, AppError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.get(SNAPSHOT_CACHE_KEY).await?;
        Ok(raw.and_then(|json| match serde_json::from_str(&json) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("Discarding unreadable cached snapshot: {e}");
                None
            }
        }))
    }

    async fn write_cached(&self, snapshot: &PopulationSnapshot) -> Result<(), AppError> {
        let json = serde_json::to_string(snapshot).map_err(|e| AppError::Internal(e.into()))?;
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        redis::cmd("SET")
            .arg(SNAPSHOT_CACHE_KEY)
            .arg(json)
            .arg("EX")
            .arg(self.ttl_secs)
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl<S: AttributeStore> AttributeStore for CachedAttributeStore<S> {
    async fn fetch_snapshot(&self) -> Result<PopulationSnapshot, AppError> {
        match self.read_cached().await {
            Ok(Some(snapshot)) => {
                debug!("Population snapshot served from cache");
                return Ok(snapshot);
            }
            Ok(None) => debug!("Population snapshot cache miss"),
            Err(e) => warn!("Snapshot cache read failed, falling back to source: {e}"),
        }

        let snapshot = self.inner.fetch_snapshot().await?;
        if let Err(e) = self.write_cached(&snapshot).await {
            warn!("Snapshot cache write failed: {e}");
        }
        Ok(snapshot)
    }

    async fn healthcheck(&self) -> Result<(), AppError> {
        self.inner.healthcheck().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryAttributeStore;

    fn unreachable_redis() -> redis::Client {
        redis::Client::open("redis://127.0.0.1:1/").unwrap()
    }

    #[tokio::test]
    async fn test_unreachable_cache_falls_through_to_source() {
        let inner = InMemoryAttributeStore::new(crate::matching::pipeline::tests::sample_snapshot());
        let store = CachedAttributeStore::new(inner, unreachable_redis(), 60);

        let snapshot = store.fetch_snapshot().await.unwrap();
        assert_eq!(snapshot.employees.len(), 5);
        assert_eq!(store.inner.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_source_failure_is_not_masked_by_cache() {
        let inner = InMemoryAttributeStore::unavailable();
        let store = CachedAttributeStore::new(inner, unreachable_redis(), 60);

        let err = store.fetch_snapshot().await.unwrap_err();
        assert!(matches!(err, AppError::SourceUnavailable(_)));
    }
}
