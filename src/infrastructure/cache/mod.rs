pub mod cache_keys;
pub mod in_memory;

use crate::core::errors::FinTrackError;
use crate::core::services::GroupSettlement;
use async_trait::async_trait;

/// Caches the shared (non-personalized) part of a group's settlement
/// computation. Invalidated whenever an expense is written to the group.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get_group_settlement(&self, group_id: &str) -> Result<Option<GroupSettlement>, FinTrackError>;
    async fn save_group_settlement(
        &self,
        group_id: &str,
        settlement: &GroupSettlement,
        ttl: std::time::Duration,
    ) -> Result<(), FinTrackError>;
    async fn invalidate_group_settlement(&self, group_id: &str) -> Result<(), FinTrackError>;
}
