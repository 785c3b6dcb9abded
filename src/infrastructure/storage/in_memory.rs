use crate::core::errors::FinTrackError;
use crate::core::models::{
    autopay::Autopay, budget::Budget, emi::Emi, expense::SharedExpense, group::SplitGroup,
    share::ShareGrant, transaction::Transaction, user::User,
};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

pub struct InMemoryStorage {
    users: Mutex<HashMap<String, User>>,
    emails: Mutex<HashMap<String, String>>, // email -> user_id
    transactions: Mutex<HashMap<String, Transaction>>,
    budgets: Mutex<HashMap<String, Budget>>, // user_id -> budget
    emis: Mutex<HashMap<String, Emi>>,
    autopays: Mutex<HashMap<String, Autopay>>,
    shares: Mutex<HashMap<(String, String), ShareGrant>>, // (owner_id, grantee_id)
    groups: Mutex<HashMap<String, SplitGroup>>,
    expenses: Mutex<HashMap<String, SharedExpense>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            users: Mutex::new(HashMap::new()),
            emails: Mutex::new(HashMap::new()),
            transactions: Mutex::new(HashMap::new()),
            budgets: Mutex::new(HashMap::new()),
            emis: Mutex::new(HashMap::new()),
            autopays: Mutex::new(HashMap::new()),
            shares: Mutex::new(HashMap::new()),
            groups: Mutex::new(HashMap::new()),
            expenses: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn create_user(&self, user: User) -> Result<User, FinTrackError> {
        let mut emails = self.emails.lock().await;
        if emails.contains_key(&user.email) {
            return Err(FinTrackError::EmailAlreadyRegistered(user.email));
        }
        emails.insert(user.email.clone(), user.id.clone());
        let mut users = self.users.lock().await;
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, FinTrackError> {
        Ok(self.users.lock().await.get(user_id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, FinTrackError> {
        // For production: use a database index on email
        let user_id = self.emails.lock().await.get(email).cloned();
        Ok(match user_id {
            Some(id) => self.users.lock().await.get(&id).cloned(),
            None => None,
        })
    }

    async fn save_transaction(&self, transaction: Transaction) -> Result<(), FinTrackError> {
        self.transactions
            .lock()
            .await
            .insert(transaction.id.clone(), transaction);
        Ok(())
    }

    async fn get_transaction(&self, transaction_id: &str) -> Result<Option<Transaction>, FinTrackError> {
        Ok(self.transactions.lock().await.get(transaction_id).cloned())
    }

    async fn delete_transaction(&self, transaction_id: &str) -> Result<(), FinTrackError> {
        self.transactions.lock().await.remove(transaction_id);
        Ok(())
    }

    async fn get_user_transactions(&self, user_id: &str) -> Result<Vec<Transaction>, FinTrackError> {
        // For production: use a database query with an index
        let mut transactions: Vec<Transaction> = self
            .transactions
            .lock()
            .await
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        transactions.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
        Ok(transactions)
    }

    async fn save_budget(&self, budget: Budget) -> Result<(), FinTrackError> {
        self.budgets
            .lock()
            .await
            .insert(budget.user_id.clone(), budget);
        Ok(())
    }

    async fn get_budget(&self, user_id: &str) -> Result<Option<Budget>, FinTrackError> {
        Ok(self.budgets.lock().await.get(user_id).cloned())
    }

    async fn save_emi(&self, emi: Emi) -> Result<(), FinTrackError> {
        self.emis.lock().await.insert(emi.id.clone(), emi);
        Ok(())
    }

    async fn get_emi(&self, emi_id: &str) -> Result<Option<Emi>, FinTrackError> {
        Ok(self.emis.lock().await.get(emi_id).cloned())
    }

    async fn delete_emi(&self, emi_id: &str) -> Result<(), FinTrackError> {
        self.emis.lock().await.remove(emi_id);
        Ok(())
    }

    async fn get_user_emis(&self, user_id: &str) -> Result<Vec<Emi>, FinTrackError> {
        let mut emis: Vec<Emi> = self
            .emis
            .lock()
            .await
            .values()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        emis.sort_by(|a, b| a.next_due.cmp(&b.next_due).then_with(|| a.id.cmp(&b.id)));
        Ok(emis)
    }

    async fn save_autopay(&self, autopay: Autopay) -> Result<(), FinTrackError> {
        self.autopays.lock().await.insert(autopay.id.clone(), autopay);
        Ok(())
    }

    async fn get_autopay(&self, autopay_id: &str) -> Result<Option<Autopay>, FinTrackError> {
        Ok(self.autopays.lock().await.get(autopay_id).cloned())
    }

    async fn delete_autopay(&self, autopay_id: &str) -> Result<(), FinTrackError> {
        self.autopays.lock().await.remove(autopay_id);
        Ok(())
    }

    async fn get_user_autopays(&self, user_id: &str) -> Result<Vec<Autopay>, FinTrackError> {
        let mut autopays: Vec<Autopay> = self
            .autopays
            .lock()
            .await
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        autopays.sort_by(|a, b| a.anchor.cmp(&b.anchor).then_with(|| a.id.cmp(&b.id)));
        Ok(autopays)
    }

    async fn save_share(&self, share: ShareGrant) -> Result<(), FinTrackError> {
        // Replaces any existing grant for the same pair
        self.shares
            .lock()
            .await
            .insert((share.owner_id.clone(), share.grantee_id.clone()), share);
        Ok(())
    }

    async fn get_share(&self, owner_id: &str, grantee_id: &str) -> Result<Option<ShareGrant>, FinTrackError> {
        Ok(self
            .shares
            .lock()
            .await
            .get(&(owner_id.to_string(), grantee_id.to_string()))
            .cloned())
    }

    async fn delete_share(&self, owner_id: &str, grantee_id: &str) -> Result<(), FinTrackError> {
        self.shares
            .lock()
            .await
            .remove(&(owner_id.to_string(), grantee_id.to_string()));
        Ok(())
    }

    async fn get_shares_by_owner(&self, owner_id: &str) -> Result<Vec<ShareGrant>, FinTrackError> {
        let mut shares: Vec<ShareGrant> = self
            .shares
            .lock()
            .await
            .values()
            .filter(|s| s.owner_id == owner_id)
            .cloned()
            .collect();
        shares.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(shares)
    }

    async fn get_shares_for_grantee(&self, grantee_id: &str) -> Result<Vec<ShareGrant>, FinTrackError> {
        let mut shares: Vec<ShareGrant> = self
            .shares
            .lock()
            .await
            .values()
            .filter(|s| s.grantee_id == grantee_id)
            .cloned()
            .collect();
        shares.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(shares)
    }

    async fn save_group(&self, group: SplitGroup) -> Result<(), FinTrackError> {
        self.groups.lock().await.insert(group.id.clone(), group);
        Ok(())
    }

    async fn get_group(&self, group_id: &str) -> Result<Option<SplitGroup>, FinTrackError> {
        Ok(self.groups.lock().await.get(group_id).cloned())
    }

    async fn delete_group(&self, group_id: &str) -> Result<(), FinTrackError> {
        // For production: delete the group and its expenses in one batch
        self.groups.lock().await.remove(group_id);
        self.expenses
            .lock()
            .await
            .retain(|_, e| e.group_id != group_id);
        Ok(())
    }

    async fn get_user_groups(&self, user_id: &str) -> Result<Vec<SplitGroup>, FinTrackError> {
        let mut groups: Vec<SplitGroup> = self
            .groups
            .lock()
            .await
            .values()
            .filter(|g| g.is_member(user_id))
            .cloned()
            .collect();
        groups.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(groups)
    }

    async fn save_expense(&self, expense: SharedExpense) -> Result<(), FinTrackError> {
        self.expenses.lock().await.insert(expense.id.clone(), expense);
        Ok(())
    }

    async fn get_group_expenses(&self, group_id: &str) -> Result<Vec<SharedExpense>, FinTrackError> {
        // Stable order keeps recomputation over the same snapshot identical
        let mut expenses: Vec<SharedExpense> = self
            .expenses
            .lock()
            .await
            .values()
            .filter(|e| e.group_id == group_id)
            .cloned()
            .collect();
        expenses.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
        Ok(expenses)
    }
}
