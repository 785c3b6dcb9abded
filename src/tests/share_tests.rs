use crate::core::errors::FinTrackError;
use crate::core::models::share::AccessLevel;
use crate::tests::{create_test_service, register};

#[tokio::test]
async fn test_access_denied_without_grant() {
    let service = create_test_service();
    let owner = register(&service, "Alice", "alice@example.com").await;
    let other = register(&service, "Bob", "bob@example.com").await;

    let result = service.list_transactions(&owner.id, None, &other).await;
    assert!(matches!(result, Err(FinTrackError::AccessDenied(_))));
}

#[tokio::test]
async fn test_read_grant_allows_viewing_only() {
    let service = create_test_service();
    let owner = register(&service, "Alice", "alice@example.com").await;
    let viewer = register(&service, "Bob", "bob@example.com").await;

    service
        .grant_access(&owner, "bob@example.com", AccessLevel::Read)
        .await
        .unwrap();

    service
        .add_transaction(&owner.id, 25.0, "Misc".to_string(), String::new(), None, &owner)
        .await
        .unwrap();

    let visible = service.list_transactions(&owner.id, None, &viewer).await.unwrap();
    assert_eq!(visible.len(), 1);

    let result = service
        .add_transaction(&owner.id, 10.0, "Misc".to_string(), String::new(), None, &viewer)
        .await;
    assert!(matches!(result, Err(FinTrackError::ReadOnlyAccess(_))));
}

#[tokio::test]
async fn test_edit_grant_allows_mutations() {
    let service = create_test_service();
    let owner = register(&service, "Alice", "alice@example.com").await;
    let editor = register(&service, "Bob", "bob@example.com").await;

    service
        .grant_access(&owner, "bob@example.com", AccessLevel::Edit)
        .await
        .unwrap();

    let transaction = service
        .add_transaction(&owner.id, 10.0, "Misc".to_string(), String::new(), None, &editor)
        .await
        .unwrap();
    assert_eq!(transaction.user_id, owner.id);

    service.set_budget(&owner.id, 500.0, &editor).await.unwrap();
    let budget = service.get_budget(&owner.id, &editor).await.unwrap().unwrap();
    assert_eq!(budget.monthly_limit, 500.0);
}

#[tokio::test]
async fn test_regrant_replaces_level_and_revoke_removes() {
    let service = create_test_service();
    let owner = register(&service, "Alice", "alice@example.com").await;
    let grantee = register(&service, "Bob", "bob@example.com").await;

    service
        .grant_access(&owner, "bob@example.com", AccessLevel::Edit)
        .await
        .unwrap();
    // Downgrade to read-only
    service
        .grant_access(&owner, "bob@example.com", AccessLevel::Read)
        .await
        .unwrap();

    let grants = service.list_grants(&owner).await.unwrap();
    assert_eq!(grants.len(), 1);
    assert_eq!(grants[0].level, AccessLevel::Read);

    let received = service.list_shared_with_me(&grantee).await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].owner_id, owner.id);

    service.revoke_access(&owner, &grantee.id).await.unwrap();
    let result = service.list_transactions(&owner.id, None, &grantee).await;
    assert!(matches!(result, Err(FinTrackError::AccessDenied(_))));

    let result = service.revoke_access(&owner, &grantee.id).await;
    assert!(matches!(result, Err(FinTrackError::ShareNotFound(_))));
}

#[tokio::test]
async fn test_cannot_share_with_self() {
    let service = create_test_service();
    let owner = register(&service, "Alice", "alice@example.com").await;

    let result = service
        .grant_access(&owner, "alice@example.com", AccessLevel::Read)
        .await;
    assert!(matches!(result, Err(FinTrackError::SelfShare)));
}

#[tokio::test]
async fn test_grant_to_unknown_email_fails() {
    let service = create_test_service();
    let owner = register(&service, "Alice", "alice@example.com").await;

    let result = service
        .grant_access(&owner, "nobody@example.com", AccessLevel::Read)
        .await;
    assert!(matches!(result, Err(FinTrackError::UserNotFound(_))));
}
