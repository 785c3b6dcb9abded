use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    // Never leaves the server in responses
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}
