use crate::core::errors::FinTrackError;
use crate::core::models::autopay::Cadence;
use crate::tests::{create_test_service, register};
use chrono::{TimeZone, Utc};

#[tokio::test]
async fn test_add_and_list_transactions() {
    let service = create_test_service();
    let user = register(&service, "Alice", "alice@example.com").await;

    let first = service
        .add_transaction(
            &user.id,
            120.5,
            "Groceries".to_string(),
            "weekly shop".to_string(),
            Some(Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap()),
            &user,
        )
        .await
        .unwrap();
    service
        .add_transaction(
            &user.id,
            40.0,
            "Transport".to_string(),
            String::new(),
            Some(Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap()),
            &user,
        )
        .await
        .unwrap();

    let all = service.list_transactions(&user.id, None, &user).await.unwrap();
    assert_eq!(all.len(), 2);
    // Newest first
    assert_eq!(all[0].category, "Transport");

    let march = service
        .list_transactions(&user.id, Some((2024, 3)), &user)
        .await
        .unwrap();
    assert_eq!(march.len(), 1);
    assert_eq!(march[0].id, first.id);
}

#[tokio::test]
async fn test_update_and_delete_transaction() {
    let service = create_test_service();
    let user = register(&service, "Alice", "alice@example.com").await;

    let transaction = service
        .add_transaction(&user.id, 10.0, "Misc".to_string(), String::new(), None, &user)
        .await
        .unwrap();

    let updated = service
        .update_transaction(&transaction.id, 15.0, "Misc".to_string(), "corrected".to_string(), &user)
        .await
        .unwrap();
    assert_eq!(updated.amount, 15.0);
    assert_eq!(updated.note, "corrected");

    service.delete_transaction(&transaction.id, &user).await.unwrap();
    let result = service.delete_transaction(&transaction.id, &user).await;
    assert!(matches!(result, Err(FinTrackError::TransactionNotFound(_))));
}

#[tokio::test]
async fn test_rejects_invalid_amounts() {
    let service = create_test_service();
    let user = register(&service, "Alice", "alice@example.com").await;

    for amount in [0.0, -5.0, 1_000_001.0, 9.999] {
        let result = service
            .add_transaction(&user.id, amount, "Misc".to_string(), String::new(), None, &user)
            .await;
        assert!(
            matches!(result, Err(FinTrackError::InvalidInput(_, _))),
            "amount {} accepted",
            amount
        );
    }
}

#[tokio::test]
async fn test_monthly_report_against_budget() {
    let service = create_test_service();
    let user = register(&service, "Alice", "alice@example.com").await;

    service.set_budget(&user.id, 1000.0, &user).await.unwrap();
    service
        .add_transaction(
            &user.id,
            200.0,
            "Groceries".to_string(),
            String::new(),
            Some(Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap()),
            &user,
        )
        .await
        .unwrap();
    service
        .add_emi(
            &user.id,
            "Car loan".to_string(),
            100.0,
            Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap(),
            12,
            &user,
        )
        .await
        .unwrap();
    service
        .add_autopay(
            &user.id,
            "Streaming".to_string(),
            50.0,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Cadence::Monthly,
            &user,
        )
        .await
        .unwrap();

    let report = service.monthly_report(&user.id, 2024, 3, &user).await.unwrap();
    assert_eq!(report.outflow.transaction_total, 200.0);
    assert_eq!(report.outflow.emi_total, 100.0);
    assert_eq!(report.outflow.autopay_total, 50.0);
    assert_eq!(report.outflow.total, 350.0);
    assert_eq!(report.monthly_limit, 1000.0);
    assert_eq!(report.remaining, 650.0);
}

#[tokio::test]
async fn test_monthly_report_requires_budget() {
    let service = create_test_service();
    let user = register(&service, "Alice", "alice@example.com").await;

    let result = service.monthly_report(&user.id, 2024, 3, &user).await;
    assert!(matches!(result, Err(FinTrackError::BudgetNotSet(_))));
}

#[tokio::test]
async fn test_spending_trend_has_six_buckets() {
    let service = create_test_service();
    let user = register(&service, "Alice", "alice@example.com").await;

    service
        .add_transaction(
            &user.id,
            80.0,
            "Groceries".to_string(),
            String::new(),
            Some(Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap()),
            &user,
        )
        .await
        .unwrap();

    let trend = service.spending_trend(&user.id, 2024, 6, &user).await.unwrap();
    assert_eq!(trend.len(), 6);
    assert_eq!((trend[0].year, trend[0].month), (2024, 1));
    assert_eq!(trend[4].transaction_total, 80.0);
    assert_eq!(trend[5].transaction_total, 0.0);
}
