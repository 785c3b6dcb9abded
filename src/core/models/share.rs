use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccessLevel {
    Read,
    Edit,
}

impl std::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AccessLevel::Read => "READ",
            AccessLevel::Edit => "EDIT",
        };
        write!(f, "{}", s)
    }
}

/// Grants the grantee read or edit access to the owner's financial data.
/// One grant per (owner, grantee) pair; edit implies read.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ShareGrant {
    pub id: String,
    pub owner_id: String,
    pub grantee_id: String,
    pub level: AccessLevel,
    pub created_at: DateTime<Utc>,
}
