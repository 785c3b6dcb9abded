use crate::core::engine::report::{TREND_MONTHS, month_outflow, trailing_trend};
use crate::core::engine::schedule::{
    EmiProjection, is_autopay_due_in_month, month_index, project_next_emi_state,
};
use crate::core::models::autopay::{Autopay, Cadence};
use crate::core::models::emi::Emi;
use crate::core::models::transaction::Transaction;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

fn transaction(amount: f64, timestamp: DateTime<Utc>) -> Transaction {
    Transaction {
        id: Uuid::new_v4().to_string(),
        user_id: "u1".to_string(),
        amount,
        category: "Food".to_string(),
        note: String::new(),
        timestamp,
    }
}

fn emi(amount: f64, next_due: DateTime<Utc>, remaining_count: u32) -> Emi {
    Emi {
        id: Uuid::new_v4().to_string(),
        user_id: "u1".to_string(),
        name: "Car loan".to_string(),
        amount,
        next_due,
        remaining_count,
    }
}

fn autopay(amount: f64, anchor: DateTime<Utc>, cadence: Cadence) -> Autopay {
    Autopay {
        id: Uuid::new_v4().to_string(),
        user_id: "u1".to_string(),
        name: "Streaming".to_string(),
        amount,
        anchor,
        cadence,
    }
}

#[test]
fn test_emi_completes_when_installments_run_out() {
    // Two installments elapse between January and late March
    let projection = project_next_emi_state(date(2024, 1, 15), 2, date(2024, 3, 20));
    assert_eq!(projection, EmiProjection::Complete);
}

#[test]
fn test_emi_rolls_forward_past_now() {
    let projection = project_next_emi_state(date(2024, 1, 15), 5, date(2024, 3, 20));
    assert_eq!(
        projection,
        EmiProjection::Active {
            next_due: date(2024, 4, 15),
            remaining: 2
        }
    );
}

#[test]
fn test_emi_with_future_anchor_is_untouched() {
    let projection = project_next_emi_state(date(2024, 5, 1), 3, date(2024, 3, 20));
    assert_eq!(
        projection,
        EmiProjection::Active {
            next_due: date(2024, 5, 1),
            remaining: 3
        }
    );
}

#[test]
fn test_emi_with_no_remaining_installments_is_complete() {
    let projection = project_next_emi_state(date(2024, 1, 15), 0, date(2024, 1, 1));
    assert_eq!(projection, EmiProjection::Complete);
}

#[test]
fn test_emi_rollover_clamps_month_end() {
    let projection = project_next_emi_state(date(2024, 1, 31), 6, date(2024, 2, 5));
    assert_eq!(
        projection,
        EmiProjection::Active {
            next_due: date(2024, 2, 29),
            remaining: 5
        }
    );
}

#[test]
fn test_quarterly_autopay_due_months() {
    let anchor = date(2024, 1, 10);
    // 5 months from January is not on the quarterly grid; 3 months is
    assert!(!is_autopay_due_in_month(anchor, Cadence::Quarterly, 2024, 6));
    assert!(is_autopay_due_in_month(anchor, Cadence::Quarterly, 2024, 4));
    assert!(is_autopay_due_in_month(anchor, Cadence::Quarterly, 2024, 1));
}

#[test]
fn test_autopay_not_due_before_anchor() {
    let anchor = date(2024, 1, 10);
    assert!(!is_autopay_due_in_month(anchor, Cadence::Monthly, 2023, 12));
}

#[test]
fn test_autopay_cadence_spans_year_rollover() {
    let anchor = date(2023, 11, 5);
    assert!(is_autopay_due_in_month(anchor, Cadence::Quarterly, 2024, 2));
    assert!(!is_autopay_due_in_month(anchor, Cadence::Quarterly, 2024, 3));
    assert!(is_autopay_due_in_month(anchor, Cadence::Yearly, 2024, 11));
    assert!(!is_autopay_due_in_month(anchor, Cadence::Yearly, 2024, 10));
    assert!(is_autopay_due_in_month(anchor, Cadence::HalfYearly, 2024, 5));
}

#[test]
fn test_month_index_is_monotonic_across_years() {
    assert_eq!(month_index(2024, 1) - month_index(2023, 12), 1);
    assert_eq!(month_index(2024, 6) - month_index(2024, 1), 5);
}

#[test]
fn test_month_outflow_combines_all_sources() {
    let transactions = vec![
        transaction(200.0, date(2024, 3, 10)),
        transaction(50.0, date(2024, 3, 28)),
        transaction(999.0, date(2024, 2, 10)), // outside the month
    ];
    let emis = vec![emi(100.0, date(2024, 6, 15), 4)];
    let autopays = vec![autopay(49.99, date(2024, 1, 1), Cadence::Monthly)];

    let outflow = month_outflow(&transactions, &emis, &autopays, 2024, 3);
    assert_eq!(outflow.transaction_total, 250.0);
    assert_eq!(outflow.emi_total, 100.0);
    assert_eq!(outflow.autopay_total, 49.99);
    assert_eq!(outflow.total, 399.99);
}

#[test]
fn test_trailing_trend_buckets_six_months_oldest_first() {
    let transactions = vec![transaction(75.0, date(2024, 3, 15))];
    let emis = vec![emi(100.0, date(2024, 7, 1), 10)];
    let autopays = vec![autopay(30.0, date(2024, 1, 20), Cadence::Quarterly)];

    let trend = trailing_trend(&transactions, &emis, &autopays, 2024, 6);
    assert_eq!(trend.len(), TREND_MONTHS);
    assert_eq!((trend[0].year, trend[0].month), (2024, 1));
    assert_eq!((trend[5].year, trend[5].month), (2024, 6));

    // Every bucket carries the active EMI
    assert!(trend.iter().all(|b| b.emi_total == 100.0));
    // Quarterly autopay lands in January and April only
    assert_eq!(trend[0].autopay_total, 30.0);
    assert_eq!(trend[3].autopay_total, 30.0);
    assert_eq!(trend[1].autopay_total, 0.0);
    // The lone transaction sits in March
    assert_eq!(trend[2].transaction_total, 75.0);
    assert_eq!(trend[2].total, 175.0);
}

#[test]
fn test_trend_window_crosses_year_boundary() {
    let trend = trailing_trend(&[], &[], &[], 2024, 2);
    let months: Vec<(i32, u32)> = trend.iter().map(|b| (b.year, b.month)).collect();
    assert_eq!(
        months,
        vec![(2023, 9), (2023, 10), (2023, 11), (2023, 12), (2024, 1), (2024, 2)]
    );
}
