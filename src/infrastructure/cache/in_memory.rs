use crate::core::errors::FinTrackError;
use crate::core::services::GroupSettlement;
use crate::infrastructure::cache::Cache;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct InMemoryCache {
    cache: Arc<RwLock<HashMap<String, (GroupSettlement, chrono::DateTime<chrono::Utc>)>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        InMemoryCache {
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_group_settlement(&self, group_id: &str) -> Result<Option<GroupSettlement>, FinTrackError> {
        let cache = self.cache.read().await;
        let key = crate::infrastructure::cache::cache_keys::group_settlement_key(group_id);
        Ok(cache
            .get(&key)
            .filter(|(_, expiry)| *expiry > chrono::Utc::now())
            .map(|(settlement, _)| settlement.clone()))
    }

    async fn save_group_settlement(
        &self,
        group_id: &str,
        settlement: &GroupSettlement,
        ttl: std::time::Duration,
    ) -> Result<(), FinTrackError> {
        let mut cache = self.cache.write().await;
        let key = crate::infrastructure::cache::cache_keys::group_settlement_key(group_id);
        cache.insert(
            key,
            (
                settlement.clone(),
                chrono::Utc::now()
                    + chrono::Duration::from_std(ttl)
                        .map_err(|e| FinTrackError::CacheError(format!("Failed to convert TTL: {}", e)))?,
            ),
        );
        Ok(())
    }

    async fn invalidate_group_settlement(&self, group_id: &str) -> Result<(), FinTrackError> {
        let mut cache = self.cache.write().await;
        let key = crate::infrastructure::cache::cache_keys::group_settlement_key(group_id);
        cache.remove(&key);
        Ok(())
    }
}
