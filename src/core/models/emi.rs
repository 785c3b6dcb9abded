use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An installment loan: fixed amount due monthly, finite remaining count.
/// The record is deleted once the last installment rolls over.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Emi {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub amount: f64,
    pub next_due: DateTime<Utc>,
    pub remaining_count: u32,
}
