use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct GroupMember {
    pub user_id: String,
    pub name: String,
}

/// A SplitEase group: a fixed member list sharing expenses equally.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SplitGroup {
    pub id: String,
    pub name: String,
    pub created_by: String,
    pub members: Vec<GroupMember>,
}

impl SplitGroup {
    pub fn is_member(&self, user_id: &str) -> bool {
        self.members.iter().any(|m| m.user_id == user_id)
    }

    pub fn member_name(&self, user_id: &str) -> Option<&str> {
        self.members
            .iter()
            .find(|m| m.user_id == user_id)
            .map(|m| m.name.as_str())
    }
}
