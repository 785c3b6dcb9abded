use chrono::Datelike;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::engine::netting::round_to_cents;
use crate::core::engine::schedule::{is_autopay_due_in_month, month_index};
use crate::core::models::autopay::Autopay;
use crate::core::models::emi::Emi;
use crate::core::models::transaction::Transaction;

pub const TREND_MONTHS: usize = 6;

/// One month's aggregated outflow bucket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthOutflow {
    pub year: i32,
    pub month: u32,
    pub transaction_total: f64,
    pub emi_total: f64,
    pub autopay_total: f64,
    pub total: f64,
}

/// Aggregate a single calendar month: variable transactions dated in the
/// month, every active EMI's fixed amount (charged monthly regardless of
/// its due-day), and each autopay whose cadence lands in the month.
pub fn month_outflow(
    transactions: &[Transaction],
    emis: &[Emi],
    autopays: &[Autopay],
    year: i32,
    month: u32,
) -> MonthOutflow {
    let transaction_total = round_to_cents(
        transactions
            .iter()
            .filter(|t| t.timestamp.year() == year && t.timestamp.month() == month)
            .map(|t| t.amount)
            .sum(),
    );
    let emi_total = round_to_cents(
        emis.iter()
            .filter(|e| e.remaining_count > 0)
            .map(|e| e.amount)
            .sum(),
    );
    let autopay_total = round_to_cents(
        autopays
            .iter()
            .filter(|a| is_autopay_due_in_month(a.anchor, a.cadence, year, month))
            .map(|a| a.amount)
            .sum(),
    );

    MonthOutflow {
        year,
        month,
        transaction_total,
        emi_total,
        autopay_total,
        total: round_to_cents(transaction_total + emi_total + autopay_total),
    }
}

fn month_of_index(index: i32) -> (i32, u32) {
    (index.div_euclid(12), (index.rem_euclid(12) + 1) as u32)
}

/// The trailing six calendar months ending at (end_year, end_month)
/// inclusive, oldest bucket first. Feeds the dashboard trend chart.
pub fn trailing_trend(
    transactions: &[Transaction],
    emis: &[Emi],
    autopays: &[Autopay],
    end_year: i32,
    end_month: u32,
) -> Vec<MonthOutflow> {
    let end_index = month_index(end_year, end_month);
    (0..TREND_MONTHS)
        .map(|offset| {
            let (year, month) = month_of_index(end_index - (TREND_MONTHS as i32 - 1) + offset as i32);
            month_outflow(transactions, emis, autopays, year, month)
        })
        .collect()
}
