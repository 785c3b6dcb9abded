mod netting_tests;
mod schedule_tests;
mod share_tests;
mod transaction_tests;
mod user_tests;

use crate::core::models::user::User;
use crate::core::services::FinTrackService;
use crate::infrastructure::cache::in_memory::InMemoryCache;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

pub fn create_test_service() -> FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache> {
    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    let cache = InMemoryCache::new();
    FinTrackService::new(storage, logging, cache, "test-secret".to_string())
}

pub async fn register(
    service: &FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>,
    name: &str,
    email: &str,
) -> User {
    service
        .register_user(name.to_string(), email.to_string(), "password123".to_string())
        .await
        .unwrap()
}
