pub const USER_REGISTERED: &str = "USER_REGISTERED";
pub const TRANSACTION_ADDED: &str = "TRANSACTION_ADDED";
pub const TRANSACTION_UPDATED: &str = "TRANSACTION_UPDATED";
pub const TRANSACTION_DELETED: &str = "TRANSACTION_DELETED";
pub const BUDGET_SET: &str = "BUDGET_SET";
pub const EMI_ADDED: &str = "EMI_ADDED";
pub const EMI_ROLLED_OVER: &str = "EMI_ROLLED_OVER";
pub const EMI_COMPLETED: &str = "EMI_COMPLETED";
pub const AUTOPAY_ADDED: &str = "AUTOPAY_ADDED";
pub const AUTOPAY_REMOVED: &str = "AUTOPAY_REMOVED";
pub const ACCESS_GRANTED: &str = "ACCESS_GRANTED";
pub const ACCESS_REVOKED: &str = "ACCESS_REVOKED";
pub const GROUP_CREATED: &str = "GROUP_CREATED";
pub const GROUP_DELETED: &str = "GROUP_DELETED";
pub const GROUP_EXPENSE_ADDED: &str = "GROUP_EXPENSE_ADDED";
pub const SETTLEMENT_QUERIED: &str = "SETTLEMENT_QUERIED";
pub const REPORT_QUERIED: &str = "REPORT_QUERIED";
pub const TREND_QUERIED: &str = "TREND_QUERIED";
