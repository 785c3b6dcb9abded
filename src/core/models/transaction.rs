use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A variable expense logged by a user against their monthly budget.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub amount: f64,
    pub category: String,
    pub note: String,
    pub timestamp: DateTime<Utc>,
}
