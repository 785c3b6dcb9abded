use crate::core::errors::FinTrackError;
use crate::core::models::{
    autopay::Autopay, budget::Budget, emi::Emi, expense::SharedExpense, group::SplitGroup,
    share::ShareGrant, transaction::Transaction, user::User,
};
use async_trait::async_trait;

/// Document-store contract: every entity is reachable by simple
/// get/query/put/delete operations. The hosted store's own transaction
/// semantics handle concurrent multi-client writes; callers only see
/// snapshots.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn create_user(&self, user: User) -> Result<User, FinTrackError>;
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, FinTrackError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, FinTrackError>;

    async fn save_transaction(&self, transaction: Transaction) -> Result<(), FinTrackError>;
    async fn get_transaction(&self, transaction_id: &str) -> Result<Option<Transaction>, FinTrackError>;
    async fn delete_transaction(&self, transaction_id: &str) -> Result<(), FinTrackError>;
    async fn get_user_transactions(&self, user_id: &str) -> Result<Vec<Transaction>, FinTrackError>;

    async fn save_budget(&self, budget: Budget) -> Result<(), FinTrackError>;
    async fn get_budget(&self, user_id: &str) -> Result<Option<Budget>, FinTrackError>;

    async fn save_emi(&self, emi: Emi) -> Result<(), FinTrackError>;
    async fn get_emi(&self, emi_id: &str) -> Result<Option<Emi>, FinTrackError>;
    async fn delete_emi(&self, emi_id: &str) -> Result<(), FinTrackError>;
    async fn get_user_emis(&self, user_id: &str) -> Result<Vec<Emi>, FinTrackError>;

    async fn save_autopay(&self, autopay: Autopay) -> Result<(), FinTrackError>;
    async fn get_autopay(&self, autopay_id: &str) -> Result<Option<Autopay>, FinTrackError>;
    async fn delete_autopay(&self, autopay_id: &str) -> Result<(), FinTrackError>;
    async fn get_user_autopays(&self, user_id: &str) -> Result<Vec<Autopay>, FinTrackError>;

    async fn save_share(&self, share: ShareGrant) -> Result<(), FinTrackError>;
    async fn get_share(&self, owner_id: &str, grantee_id: &str) -> Result<Option<ShareGrant>, FinTrackError>;
    async fn delete_share(&self, owner_id: &str, grantee_id: &str) -> Result<(), FinTrackError>;
    async fn get_shares_by_owner(&self, owner_id: &str) -> Result<Vec<ShareGrant>, FinTrackError>;
    async fn get_shares_for_grantee(&self, grantee_id: &str) -> Result<Vec<ShareGrant>, FinTrackError>;

    async fn save_group(&self, group: SplitGroup) -> Result<(), FinTrackError>;
    async fn get_group(&self, group_id: &str) -> Result<Option<SplitGroup>, FinTrackError>;
    async fn delete_group(&self, group_id: &str) -> Result<(), FinTrackError>;
    async fn get_user_groups(&self, user_id: &str) -> Result<Vec<SplitGroup>, FinTrackError>;

    async fn save_expense(&self, expense: SharedExpense) -> Result<(), FinTrackError>;
    async fn get_group_expenses(&self, group_id: &str) -> Result<Vec<SharedExpense>, FinTrackError>;
}

pub mod in_memory;
