use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A group expense fronted by one member and split equally across the
/// participants. The payer may or may not be in the participant list.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SharedExpense {
    pub id: String,
    pub group_id: String,
    pub description: String,
    pub amount: f64,
    pub paid_by: String,
    pub participants: Vec<String>,
    pub timestamp: DateTime<Utc>,
}
