use chrono::{DateTime, Datelike, Months, Utc};

use crate::core::models::autopay::Cadence;

/// Outcome of rolling an EMI anchor forward to "now".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmiProjection {
    Active {
        next_due: DateTime<Utc>,
        remaining: u32,
    },
    Complete,
}

fn next_calendar_month(date: DateTime<Utc>) -> DateTime<Utc> {
    // Clamps day-of-month at month end (Jan 31 -> Feb 28).
    date.checked_add_months(Months::new(1))
        .expect("calendar month addition stays in range")
}

/// Advance an EMI anchor past "now", one calendar month per elapsed
/// installment. Each advance consumes one installment; hitting zero means
/// the EMI is complete and its record is removed by the caller.
pub fn project_next_emi_state(
    anchor: DateTime<Utc>,
    remaining: u32,
    now: DateTime<Utc>,
) -> EmiProjection {
    if remaining == 0 {
        return EmiProjection::Complete;
    }

    let mut next_due = anchor;
    let mut remaining = remaining;
    while next_due < now {
        next_due = next_calendar_month(next_due);
        remaining -= 1;
        if remaining == 0 {
            return EmiProjection::Complete;
        }
    }

    EmiProjection::Active { next_due, remaining }
}

/// Zero-based index of a calendar month on a single axis, so distances
/// across year boundaries are plain subtraction.
pub fn month_index(year: i32, month: u32) -> i32 {
    year * 12 + month as i32 - 1
}

/// An autopay is due in the target month iff the whole-month distance from
/// its anchor month is non-negative and a multiple of the cadence.
pub fn is_autopay_due_in_month(
    anchor: DateTime<Utc>,
    cadence: Cadence,
    year: i32,
    month: u32,
) -> bool {
    let distance = month_index(year, month) - month_index(anchor.year(), anchor.month());
    distance >= 0 && distance % cadence.months() as i32 == 0
}
