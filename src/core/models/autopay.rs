use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Cadence {
    Monthly,
    Quarterly,
    HalfYearly,
    Yearly,
}

impl Cadence {
    pub fn months(self) -> u32 {
        match self {
            Cadence::Monthly => 1,
            Cadence::Quarterly => 3,
            Cadence::HalfYearly => 6,
            Cadence::Yearly => 12,
        }
    }
}

impl std::fmt::Display for Cadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Cadence::Monthly => "MONTHLY",
            Cadence::Quarterly => "QUARTERLY",
            Cadence::HalfYearly => "HALF_YEARLY",
            Cadence::Yearly => "YEARLY",
        };
        write!(f, "{}", s)
    }
}

/// A recurring fixed-amount payment debited on a configurable cadence,
/// anchored at the first payment date.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Autopay {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub amount: f64,
    pub anchor: DateTime<Utc>,
    pub cadence: Cadence,
}
