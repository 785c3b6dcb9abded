use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One monthly spending limit per user, applying to every calendar month.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Budget {
    pub user_id: String,
    pub monthly_limit: f64,
    pub updated_at: DateTime<Utc>,
}
