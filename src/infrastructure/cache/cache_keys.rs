pub fn group_settlement_key(group_id: &str) -> String {
    format!("group_settlement:{}", group_id)
}
