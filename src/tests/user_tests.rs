use crate::core::errors::FinTrackError;
use crate::tests::{create_test_service, register};

#[tokio::test]
async fn test_register_and_login() {
    let service = create_test_service();
    let user = register(&service, "Alice", "alice@example.com").await;
    assert_eq!(user.name, "Alice");
    assert!(!user.id.is_empty());

    let token = service
        .authenticate("alice@example.com", "password123")
        .await
        .unwrap();
    let claims = service.validate_token(&token).unwrap();
    assert_eq!(claims.sub, user.id);

    let logs = service.get_app_logs().await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, crate::constants::USER_REGISTERED);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let service = create_test_service();
    register(&service, "Alice", "alice@example.com").await;

    let result = service
        .register_user(
            "Impostor".to_string(),
            "alice@example.com".to_string(),
            "password123".to_string(),
        )
        .await;
    assert!(matches!(result, Err(FinTrackError::EmailAlreadyRegistered(_))));
}

#[tokio::test]
async fn test_register_invalid_email() {
    let service = create_test_service();
    let result = service
        .register_user("Alice".to_string(), "invalid".to_string(), "pw".to_string())
        .await;
    assert!(matches!(result, Err(FinTrackError::InvalidEmail(_))));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let service = create_test_service();
    register(&service, "Alice", "alice@example.com").await;

    let result = service.authenticate("alice@example.com", "wrong").await;
    assert!(matches!(result, Err(FinTrackError::InvalidCredentials)));

    let result = service.authenticate("nobody@example.com", "password123").await;
    assert!(matches!(result, Err(FinTrackError::InvalidCredentials)));
}

#[tokio::test]
async fn test_invalid_token_is_rejected() {
    let service = create_test_service();
    let result = service.validate_token("not-a-token");
    assert!(matches!(result, Err(FinTrackError::Unauthorized(_))));
}
