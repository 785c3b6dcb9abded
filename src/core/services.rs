use crate::auth::jwt::{Claims, JwtService};
use crate::config::CONFIG;
use crate::constants::{
    ACCESS_GRANTED, ACCESS_REVOKED, AUTOPAY_ADDED, AUTOPAY_REMOVED, BUDGET_SET, EMI_ADDED,
    EMI_COMPLETED, EMI_ROLLED_OVER, GROUP_CREATED, GROUP_DELETED, GROUP_EXPENSE_ADDED,
    REPORT_QUERIED, SETTLEMENT_QUERIED, TRANSACTION_ADDED, TRANSACTION_DELETED,
    TRANSACTION_UPDATED, TREND_QUERIED, USER_REGISTERED,
};
use crate::core::engine::netting::{
    PersonalSettlement, SettlementEntry, SettlementTransfer, compute_balances,
    personal_settlement, reduce_to_transfers, round_to_cents,
};
use crate::core::engine::report::{MonthOutflow, month_outflow, trailing_trend};
use crate::core::engine::schedule::{EmiProjection, is_autopay_due_in_month, project_next_emi_state};
use crate::core::errors::{FieldError, FinTrackError};
use crate::core::models::{
    autopay::{Autopay, Cadence},
    budget::Budget,
    emi::Emi,
    expense::SharedExpense,
    group::{GroupMember, SplitGroup},
    share::{AccessLevel, ShareGrant},
    transaction::Transaction,
    user::User,
};
use crate::core::models::audit::AppLog;
use crate::infrastructure::cache::Cache;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashSet;
use utoipa::ToSchema;
use uuid::Uuid;

/// Per-member net position inside a group, with display name attached.
#[derive(Serialize, Deserialize, Debug, ToSchema, Clone, PartialEq)]
pub struct MemberBalance {
    pub user_id: String,
    pub name: String,
    pub amount: f64,
}

/// The shared part of a group's settlement computation; cached per group
/// and identical for every member.
#[derive(Serialize, Deserialize, Debug, ToSchema, Clone, PartialEq)]
pub struct GroupSettlement {
    pub balances: Vec<MemberBalance>,
    pub transfers: Vec<SettlementTransfer>,
}

/// What a member sees: the group-wide picture plus their own slice.
#[derive(Serialize, Deserialize, Debug, ToSchema, Clone)]
pub struct GroupSettlementView {
    pub balances: Vec<MemberBalance>,
    pub transfers: Vec<SettlementTransfer>,
    pub you_owe: Vec<SettlementEntry>,
    pub you_are_owed: Vec<SettlementEntry>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema, Clone)]
pub struct MonthlyReport {
    pub outflow: MonthOutflow,
    pub monthly_limit: f64,
    pub remaining: f64,
}

pub struct FinTrackService<L: LoggingService, S: Storage, C: Cache> {
    storage: S,
    logging: L,
    cache: C,
    jwt_service: JwtService,
}

impl<L: LoggingService, S: Storage, C: Cache> FinTrackService<L, S, C> {
    pub fn new(storage: S, logging: L, cache: C, jwt_secret: String) -> Self {
        FinTrackService {
            storage,
            logging,
            cache,
            jwt_service: JwtService::new(jwt_secret),
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, FinTrackError> {
        self.jwt_service.validate_token(token)
    }

    async fn log_action(
        &self,
        action: &str,
        details: serde_json::Value,
        user_id: Option<&str>,
    ) -> Result<(), FinTrackError> {
        self.logging.log_action(action, details, user_id).await
    }

    fn validate_string_input(&self, field: &str, value: &str, max_length: usize) -> Result<(), FinTrackError> {
        if value.trim().is_empty() {
            return Err(FinTrackError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} cannot be empty", field),
                },
            ));
        }
        if value.len() > max_length {
            return Err(FinTrackError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("{} Too Long", field),
                    description: format!("{} cannot exceed {} characters", field, max_length),
                },
            ));
        }
        if value.chars().any(|c| c.is_control() || "<>{}[]".contains(c)) {
            return Err(FinTrackError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} contains invalid characters", field),
                },
            ));
        }
        Ok(())
    }

    fn validate_amount_input(&self, field: &str, amount: f64) -> Result<(), FinTrackError> {
        if amount <= 0.0 {
            return Err(FinTrackError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Invalid Amount".to_string(),
                    description: "Amount must be greater than 0".to_string(),
                },
            ));
        }
        if amount > 1_000_000.0 {
            return Err(FinTrackError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Amount Too Large".to_string(),
                    description: "Amount cannot exceed 1,000,000".to_string(),
                },
            ));
        }
        if !amount.is_finite() {
            return Err(FinTrackError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Invalid Amount".to_string(),
                    description: "Amount must be a finite number".to_string(),
                },
            ));
        }
        if ((amount * 100.0).round() - amount * 100.0).abs() > 1e-6 {
            return Err(FinTrackError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Invalid Amount".to_string(),
                    description: "Amount cannot have more than 2 decimal places".to_string(),
                },
            ));
        }
        Ok(())
    }

    fn validate_month(&self, month: u32) -> Result<(), FinTrackError> {
        if !(1..=12).contains(&month) {
            return Err(FinTrackError::InvalidInput(
                "month".to_string(),
                FieldError {
                    field: "month".to_string(),
                    title: "Invalid Month".to_string(),
                    description: "Month must be between 1 and 12".to_string(),
                },
            ));
        }
        Ok(())
    }

    async fn validate_owner(&self, owner_id: &str) -> Result<User, FinTrackError> {
        self.storage
            .get_user(owner_id)
            .await?
            .ok_or_else(|| FinTrackError::UserNotFound(owner_id.to_string()))
    }

    /// Owners always see their own data; anyone else needs a grant of
    /// either level.
    async fn require_read_access(&self, owner_id: &str, acting: &User) -> Result<(), FinTrackError> {
        if acting.id == owner_id {
            return Ok(());
        }
        self.validate_owner(owner_id).await?;
        match self.storage.get_share(owner_id, &acting.id).await? {
            Some(_) => Ok(()),
            None => Err(FinTrackError::AccessDenied(acting.id.clone())),
        }
    }

    /// Mutations on someone else's data need an edit-level grant.
    async fn require_edit_access(&self, owner_id: &str, acting: &User) -> Result<(), FinTrackError> {
        if acting.id == owner_id {
            return Ok(());
        }
        self.validate_owner(owner_id).await?;
        match self.storage.get_share(owner_id, &acting.id).await? {
            Some(share) if share.level == AccessLevel::Edit => Ok(()),
            Some(_) => Err(FinTrackError::ReadOnlyAccess(acting.id.clone())),
            None => Err(FinTrackError::AccessDenied(acting.id.clone())),
        }
    }

    async fn validate_group_membership(&self, group_id: &str, user_id: &str) -> Result<SplitGroup, FinTrackError> {
        let group = self
            .storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| FinTrackError::GroupNotFound(group_id.to_string()))?;
        if !group.is_member(user_id) {
            return Err(FinTrackError::NotGroupMember(user_id.to_string()));
        }
        Ok(group)
    }

    pub async fn register_user(&self, name: String, email: String, password: String) -> Result<User, FinTrackError> {
        if email.is_empty() {
            return Err(FinTrackError::MissingEmail);
        }
        if !email.contains('@') || !email.contains('.') || email.len() < 5 {
            return Err(FinTrackError::InvalidEmail(email));
        }
        if password.is_empty() {
            return Err(FinTrackError::InvalidInput(
                "password".to_string(),
                FieldError {
                    field: "password".to_string(),
                    title: "Invalid password".to_string(),
                    description: "Password cannot be empty".to_string(),
                },
            ));
        }
        self.validate_string_input("name", &name, 100)?;

        let password_hash = bcrypt::hash(&password, bcrypt::DEFAULT_COST)
            .map_err(|e| FinTrackError::InternalServerError(format!("Password hashing error: {}", e)))?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            password_hash,
        };
        let user = self.storage.create_user(user).await?;

        self.log_action(
            USER_REGISTERED,
            json!({ "user_id": user.id, "name": user.name, "email": user.email }),
            Some(user.id.as_str()),
        )
        .await?;

        Ok(user)
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> Result<String, FinTrackError> {
        let user = self
            .storage
            .get_user_by_email(email)
            .await?
            .ok_or(FinTrackError::InvalidCredentials)?;

        if bcrypt::verify(password, &user.password_hash)
            .map_err(|e| FinTrackError::InternalServerError(format!("Password verification error: {}", e)))?
        {
            // All users carry the "USER" role; extend with roles if needed
            self.jwt_service.generate_token(&user.id, "USER")
        } else {
            Err(FinTrackError::InvalidCredentials)
        }
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, FinTrackError> {
        self.storage.get_user(user_id).await
    }

    pub async fn add_transaction(
        &self,
        owner_id: &str,
        amount: f64,
        category: String,
        note: String,
        timestamp: Option<DateTime<Utc>>,
        acting: &User,
    ) -> Result<Transaction, FinTrackError> {
        self.require_edit_access(owner_id, acting).await?;
        self.validate_amount_input("amount", amount)?;
        self.validate_string_input("category", &category, 50)?;
        if !note.is_empty() {
            self.validate_string_input("note", &note, 255)?;
        }

        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            user_id: owner_id.to_string(),
            amount,
            category,
            note,
            timestamp: timestamp.unwrap_or_else(Utc::now),
        };
        self.storage.save_transaction(transaction.clone()).await?;

        self.log_action(
            TRANSACTION_ADDED,
            json!({
                "transaction_id": transaction.id,
                "owner_id": owner_id,
                "amount": transaction.amount,
                "category": transaction.category
            }),
            Some(acting.id.as_str()),
        )
        .await?;

        Ok(transaction)
    }

    pub async fn update_transaction(
        &self,
        transaction_id: &str,
        amount: f64,
        category: String,
        note: String,
        acting: &User,
    ) -> Result<Transaction, FinTrackError> {
        let mut transaction = self
            .storage
            .get_transaction(transaction_id)
            .await?
            .ok_or_else(|| FinTrackError::TransactionNotFound(transaction_id.to_string()))?;
        self.require_edit_access(&transaction.user_id, acting).await?;
        self.validate_amount_input("amount", amount)?;
        self.validate_string_input("category", &category, 50)?;
        if !note.is_empty() {
            self.validate_string_input("note", &note, 255)?;
        }

        transaction.amount = amount;
        transaction.category = category;
        transaction.note = note;
        self.storage.save_transaction(transaction.clone()).await?;

        self.log_action(
            TRANSACTION_UPDATED,
            json!({ "transaction_id": transaction.id, "owner_id": transaction.user_id }),
            Some(acting.id.as_str()),
        )
        .await?;

        Ok(transaction)
    }

    pub async fn delete_transaction(&self, transaction_id: &str, acting: &User) -> Result<(), FinTrackError> {
        let transaction = self
            .storage
            .get_transaction(transaction_id)
            .await?
            .ok_or_else(|| FinTrackError::TransactionNotFound(transaction_id.to_string()))?;
        self.require_edit_access(&transaction.user_id, acting).await?;
        self.storage.delete_transaction(transaction_id).await?;

        self.log_action(
            TRANSACTION_DELETED,
            json!({ "transaction_id": transaction_id, "owner_id": transaction.user_id }),
            Some(acting.id.as_str()),
        )
        .await?;
        Ok(())
    }

    pub async fn list_transactions(
        &self,
        owner_id: &str,
        month: Option<(i32, u32)>,
        acting: &User,
    ) -> Result<Vec<Transaction>, FinTrackError> {
        self.require_read_access(owner_id, acting).await?;
        if let Some((_, m)) = month {
            self.validate_month(m)?;
        }
        let mut transactions = self.storage.get_user_transactions(owner_id).await?;
        if let Some((year, m)) = month {
            use chrono::Datelike;
            transactions.retain(|t| t.timestamp.year() == year && t.timestamp.month() == m);
        }
        transactions.reverse(); // newest first
        Ok(transactions)
    }

    pub async fn set_budget(
        &self,
        owner_id: &str,
        monthly_limit: f64,
        acting: &User,
    ) -> Result<Budget, FinTrackError> {
        self.require_edit_access(owner_id, acting).await?;
        self.validate_amount_input("monthly_limit", monthly_limit)?;

        let budget = Budget {
            user_id: owner_id.to_string(),
            monthly_limit,
            updated_at: Utc::now(),
        };
        self.storage.save_budget(budget.clone()).await?;

        self.log_action(
            BUDGET_SET,
            json!({ "owner_id": owner_id, "monthly_limit": monthly_limit }),
            Some(acting.id.as_str()),
        )
        .await?;

        Ok(budget)
    }

    pub async fn get_budget(&self, owner_id: &str, acting: &User) -> Result<Option<Budget>, FinTrackError> {
        self.require_read_access(owner_id, acting).await?;
        self.storage.get_budget(owner_id).await
    }

    pub async fn add_emi(
        &self,
        owner_id: &str,
        name: String,
        amount: f64,
        first_due: DateTime<Utc>,
        installments: u32,
        acting: &User,
    ) -> Result<Emi, FinTrackError> {
        self.require_edit_access(owner_id, acting).await?;
        self.validate_string_input("name", &name, 100)?;
        self.validate_amount_input("amount", amount)?;
        if installments == 0 {
            return Err(FinTrackError::InvalidInput(
                "installments".to_string(),
                FieldError {
                    field: "installments".to_string(),
                    title: "Invalid Installments".to_string(),
                    description: "Installment count must be at least 1".to_string(),
                },
            ));
        }

        let emi = Emi {
            id: Uuid::new_v4().to_string(),
            user_id: owner_id.to_string(),
            name,
            amount,
            next_due: first_due,
            remaining_count: installments,
        };
        self.storage.save_emi(emi.clone()).await?;

        self.log_action(
            EMI_ADDED,
            json!({
                "emi_id": emi.id,
                "owner_id": owner_id,
                "amount": emi.amount,
                "installments": installments
            }),
            Some(acting.id.as_str()),
        )
        .await?;

        Ok(emi)
    }

    pub async fn list_emis(&self, owner_id: &str, acting: &User) -> Result<Vec<Emi>, FinTrackError> {
        self.require_read_access(owner_id, acting).await?;
        self.storage.get_user_emis(owner_id).await
    }

    /// Roll every EMI of the owner forward to "now". Advanced anchors are
    /// persisted; EMIs whose last installment elapsed are deleted. Returns
    /// the surviving EMIs so clients refresh in one round trip.
    pub async fn process_emi_rollovers(
        &self,
        owner_id: &str,
        now: DateTime<Utc>,
        acting: &User,
    ) -> Result<Vec<Emi>, FinTrackError> {
        self.require_edit_access(owner_id, acting).await?;

        let mut surviving = Vec::new();
        for mut emi in self.storage.get_user_emis(owner_id).await? {
            match project_next_emi_state(emi.next_due, emi.remaining_count, now) {
                EmiProjection::Complete => {
                    self.storage.delete_emi(&emi.id).await?;
                    self.log_action(
                        EMI_COMPLETED,
                        json!({ "emi_id": emi.id, "owner_id": owner_id }),
                        Some(acting.id.as_str()),
                    )
                    .await?;
                }
                EmiProjection::Active { next_due, remaining } => {
                    if next_due != emi.next_due || remaining != emi.remaining_count {
                        emi.next_due = next_due;
                        emi.remaining_count = remaining;
                        self.storage.save_emi(emi.clone()).await?;
                        self.log_action(
                            EMI_ROLLED_OVER,
                            json!({
                                "emi_id": emi.id,
                                "owner_id": owner_id,
                                "next_due": emi.next_due,
                                "remaining_count": emi.remaining_count
                            }),
                            Some(acting.id.as_str()),
                        )
                        .await?;
                    }
                    surviving.push(emi);
                }
            }
        }
        Ok(surviving)
    }

    pub async fn add_autopay(
        &self,
        owner_id: &str,
        name: String,
        amount: f64,
        anchor: DateTime<Utc>,
        cadence: Cadence,
        acting: &User,
    ) -> Result<Autopay, FinTrackError> {
        self.require_edit_access(owner_id, acting).await?;
        self.validate_string_input("name", &name, 100)?;
        self.validate_amount_input("amount", amount)?;

        let autopay = Autopay {
            id: Uuid::new_v4().to_string(),
            user_id: owner_id.to_string(),
            name,
            amount,
            anchor,
            cadence,
        };
        self.storage.save_autopay(autopay.clone()).await?;

        self.log_action(
            AUTOPAY_ADDED,
            json!({
                "autopay_id": autopay.id,
                "owner_id": owner_id,
                "amount": autopay.amount,
                "cadence": autopay.cadence.to_string()
            }),
            Some(acting.id.as_str()),
        )
        .await?;

        Ok(autopay)
    }

    pub async fn list_autopays(&self, owner_id: &str, acting: &User) -> Result<Vec<Autopay>, FinTrackError> {
        self.require_read_access(owner_id, acting).await?;
        self.storage.get_user_autopays(owner_id).await
    }

    pub async fn delete_autopay(&self, autopay_id: &str, acting: &User) -> Result<(), FinTrackError> {
        let autopay = self
            .storage
            .get_autopay(autopay_id)
            .await?
            .ok_or_else(|| FinTrackError::AutopayNotFound(autopay_id.to_string()))?;
        self.require_edit_access(&autopay.user_id, acting).await?;
        self.storage.delete_autopay(autopay_id).await?;

        self.log_action(
            AUTOPAY_REMOVED,
            json!({ "autopay_id": autopay_id, "owner_id": autopay.user_id }),
            Some(acting.id.as_str()),
        )
        .await?;
        Ok(())
    }

    pub async fn autopays_due_in_month(
        &self,
        owner_id: &str,
        year: i32,
        month: u32,
        acting: &User,
    ) -> Result<Vec<Autopay>, FinTrackError> {
        self.require_read_access(owner_id, acting).await?;
        self.validate_month(month)?;
        let autopays = self.storage.get_user_autopays(owner_id).await?;
        Ok(autopays
            .into_iter()
            .filter(|a| is_autopay_due_in_month(a.anchor, a.cadence, year, month))
            .collect())
    }

    pub async fn grant_access(
        &self,
        owner: &User,
        grantee_email: &str,
        level: AccessLevel,
    ) -> Result<ShareGrant, FinTrackError> {
        let grantee = self
            .storage
            .get_user_by_email(grantee_email)
            .await?
            .ok_or_else(|| FinTrackError::UserNotFound(grantee_email.to_string()))?;
        if grantee.id == owner.id {
            return Err(FinTrackError::SelfShare);
        }

        // Re-granting overwrites the previous level for the pair
        let share = ShareGrant {
            id: Uuid::new_v4().to_string(),
            owner_id: owner.id.clone(),
            grantee_id: grantee.id.clone(),
            level,
            created_at: Utc::now(),
        };
        self.storage.save_share(share.clone()).await?;

        self.log_action(
            ACCESS_GRANTED,
            json!({
                "owner_id": owner.id,
                "grantee_id": grantee.id,
                "level": level.to_string()
            }),
            Some(owner.id.as_str()),
        )
        .await?;

        Ok(share)
    }

    pub async fn revoke_access(&self, owner: &User, grantee_id: &str) -> Result<(), FinTrackError> {
        self.storage
            .get_share(&owner.id, grantee_id)
            .await?
            .ok_or_else(|| FinTrackError::ShareNotFound(grantee_id.to_string()))?;
        self.storage.delete_share(&owner.id, grantee_id).await?;

        self.log_action(
            ACCESS_REVOKED,
            json!({ "owner_id": owner.id, "grantee_id": grantee_id }),
            Some(owner.id.as_str()),
        )
        .await?;
        Ok(())
    }

    pub async fn list_grants(&self, owner: &User) -> Result<Vec<ShareGrant>, FinTrackError> {
        self.storage.get_shares_by_owner(&owner.id).await
    }

    pub async fn list_shared_with_me(&self, user: &User) -> Result<Vec<ShareGrant>, FinTrackError> {
        self.storage.get_shares_for_grantee(&user.id).await
    }

    pub async fn create_group(
        &self,
        name: String,
        members: Vec<User>,
        created_by: &User,
    ) -> Result<SplitGroup, FinTrackError> {
        self.validate_string_input("name", &name, 100)?;

        let mut all_members = members;
        if !all_members.iter().any(|m| m.id == created_by.id) {
            all_members.push(created_by.clone());
        }

        let mut seen = HashSet::new();
        let members: Vec<GroupMember> = all_members
            .into_iter()
            .filter(|u| seen.insert(u.id.clone()))
            .map(|u| GroupMember {
                user_id: u.id,
                name: u.name,
            })
            .collect();

        let group = SplitGroup {
            id: Uuid::new_v4().to_string(),
            name,
            created_by: created_by.id.clone(),
            members,
        };
        self.storage.save_group(group.clone()).await?;

        self.log_action(
            GROUP_CREATED,
            json!({
                "group_id": group.id,
                "name": group.name,
                "member_ids": group.members.iter().map(|m| m.user_id.clone()).collect::<Vec<_>>()
            }),
            Some(created_by.id.as_str()),
        )
        .await?;

        Ok(group)
    }

    pub async fn get_group(&self, group_id: &str, user: &User) -> Result<SplitGroup, FinTrackError> {
        self.validate_group_membership(group_id, &user.id).await
    }

    pub async fn list_groups(&self, user: &User) -> Result<Vec<SplitGroup>, FinTrackError> {
        self.storage.get_user_groups(&user.id).await
    }

    pub async fn delete_group(&self, group_id: &str, deleted_by: &User) -> Result<(), FinTrackError> {
        let group = self.validate_group_membership(group_id, &deleted_by.id).await?;
        if group.created_by != deleted_by.id {
            return Err(FinTrackError::NotGroupCreator(deleted_by.id.clone()));
        }
        self.storage.delete_group(group_id).await?;
        self.cache.invalidate_group_settlement(group_id).await?;

        self.log_action(
            GROUP_DELETED,
            json!({ "group_id": group_id, "name": group.name }),
            Some(deleted_by.id.as_str()),
        )
        .await?;
        Ok(())
    }

    pub async fn add_group_expense(
        &self,
        group_id: &str,
        description: String,
        amount: f64,
        paid_by: &str,
        participant_ids: Vec<String>,
        created_by: &User,
    ) -> Result<SharedExpense, FinTrackError> {
        let group = self.validate_group_membership(group_id, &created_by.id).await?;
        if !group.is_member(paid_by) {
            return Err(FinTrackError::NotGroupMember(paid_by.to_string()));
        }
        self.validate_string_input("description", &description, 255)?;
        self.validate_amount_input("amount", amount)?;

        if participant_ids.is_empty() {
            return Err(FinTrackError::EmptySplit);
        }
        let mut seen = HashSet::new();
        let mut participants = Vec::new();
        for participant_id in participant_ids {
            if !group.is_member(&participant_id) {
                return Err(FinTrackError::InvalidSplitParticipant(participant_id));
            }
            if seen.insert(participant_id.clone()) {
                participants.push(participant_id);
            }
        }

        let expense = SharedExpense {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.to_string(),
            description,
            amount,
            paid_by: paid_by.to_string(),
            participants,
            timestamp: Utc::now(),
        };
        self.storage.save_expense(expense.clone()).await?;
        self.cache.invalidate_group_settlement(group_id).await?;

        self.log_action(
            GROUP_EXPENSE_ADDED,
            json!({
                "expense_id": expense.id,
                "group_id": group_id,
                "amount": expense.amount,
                "paid_by": expense.paid_by
            }),
            Some(created_by.id.as_str()),
        )
        .await?;

        Ok(expense)
    }

    pub async fn list_group_expenses(
        &self,
        group_id: &str,
        user: &User,
    ) -> Result<Vec<SharedExpense>, FinTrackError> {
        self.validate_group_membership(group_id, &user.id).await?;
        self.storage.get_group_expenses(group_id).await
    }

    /// Group-wide balances and transfers come from the cache when fresh;
    /// the personalized slice is always computed per caller.
    pub async fn group_settlement(
        &self,
        group_id: &str,
        user: &User,
    ) -> Result<GroupSettlementView, FinTrackError> {
        let group = self.validate_group_membership(group_id, &user.id).await?;

        let settlement = match self.cache.get_group_settlement(group_id).await? {
            Some(cached) => cached,
            None => {
                let expenses = self.storage.get_group_expenses(group_id).await?;
                let balance_map = compute_balances(&group.members, &expenses);
                let transfers = reduce_to_transfers(&group.members, &balance_map);
                let balances = group
                    .members
                    .iter()
                    .map(|m| MemberBalance {
                        user_id: m.user_id.clone(),
                        name: m.name.clone(),
                        amount: balance_map.get(&m.user_id).copied().unwrap_or(0.0),
                    })
                    .collect();
                let settlement = GroupSettlement { balances, transfers };
                self.cache
                    .save_group_settlement(
                        group_id,
                        &settlement,
                        std::time::Duration::from_secs(CONFIG.settlement_cache_ttl_secs),
                    )
                    .await?;
                settlement
            }
        };

        let PersonalSettlement { you_owe, you_are_owed } =
            personal_settlement(&user.id, &group.members, &settlement.transfers);

        self.log_action(
            SETTLEMENT_QUERIED,
            json!({ "group_id": group_id, "user_id": user.id }),
            Some(user.id.as_str()),
        )
        .await?;

        Ok(GroupSettlementView {
            balances: settlement.balances,
            transfers: settlement.transfers,
            you_owe,
            you_are_owed,
        })
    }

    pub async fn monthly_report(
        &self,
        owner_id: &str,
        year: i32,
        month: u32,
        acting: &User,
    ) -> Result<MonthlyReport, FinTrackError> {
        self.require_read_access(owner_id, acting).await?;
        self.validate_month(month)?;

        let budget = self
            .storage
            .get_budget(owner_id)
            .await?
            .ok_or_else(|| FinTrackError::BudgetNotSet(owner_id.to_string()))?;
        let transactions = self.storage.get_user_transactions(owner_id).await?;
        let emis = self.storage.get_user_emis(owner_id).await?;
        let autopays = self.storage.get_user_autopays(owner_id).await?;

        let outflow = month_outflow(&transactions, &emis, &autopays, year, month);
        let remaining = round_to_cents(budget.monthly_limit - outflow.total);

        self.log_action(
            REPORT_QUERIED,
            json!({ "owner_id": owner_id, "year": year, "month": month }),
            Some(acting.id.as_str()),
        )
        .await?;

        Ok(MonthlyReport {
            outflow,
            monthly_limit: budget.monthly_limit,
            remaining,
        })
    }

    pub async fn spending_trend(
        &self,
        owner_id: &str,
        end_year: i32,
        end_month: u32,
        acting: &User,
    ) -> Result<Vec<MonthOutflow>, FinTrackError> {
        self.require_read_access(owner_id, acting).await?;
        self.validate_month(end_month)?;

        let transactions = self.storage.get_user_transactions(owner_id).await?;
        let emis = self.storage.get_user_emis(owner_id).await?;
        let autopays = self.storage.get_user_autopays(owner_id).await?;

        let trend = trailing_trend(&transactions, &emis, &autopays, end_year, end_month);

        self.log_action(
            TREND_QUERIED,
            json!({ "owner_id": owner_id, "end_year": end_year, "end_month": end_month }),
            Some(acting.id.as_str()),
        )
        .await?;

        Ok(trend)
    }

    pub async fn get_app_logs(&self) -> Result<Vec<AppLog>, FinTrackError> {
        self.logging.get_logs().await
    }
}
