use utoipa::OpenApi;

use crate::{
    api::models::{
        AddAutopayRequest, AddEmiRequest, AddGroupExpenseRequest, AddTransactionRequest,
        CreateGroupRequest, EmiRolloverRequest, ErrorResponse, GrantAccessRequest, LoginRequest,
        LoginResponse, RegisterRequest, RevokeAccessRequest, SetBudgetRequest,
        UpdateTransactionRequest,
    },
    core::{
        engine::netting::{SettlementEntry, SettlementTransfer},
        engine::report::MonthOutflow,
        models::{
            audit::AppLog,
            autopay::{Autopay, Cadence},
            budget::Budget,
            emi::Emi,
            expense::SharedExpense,
            group::{GroupMember, SplitGroup},
            share::{AccessLevel, ShareGrant},
            transaction::Transaction,
            user::User,
        },
        services::{GroupSettlement, GroupSettlementView, MemberBalance, MonthlyReport},
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::register,
        super::handlers::login,
        super::handlers::get_user,
        super::handlers::add_transaction,
        super::handlers::list_transactions,
        super::handlers::update_transaction,
        super::handlers::delete_transaction,
        super::handlers::set_budget,
        super::handlers::get_monthly_report,
        super::handlers::get_spending_trend,
        super::handlers::get_trend_chart,
        super::handlers::add_emi,
        super::handlers::list_emis,
        super::handlers::rollover_emis,
        super::handlers::add_autopay,
        super::handlers::list_autopays,
        super::handlers::delete_autopay,
        super::handlers::autopays_due,
        super::handlers::grant_access,
        super::handlers::revoke_access,
        super::handlers::list_grants,
        super::handlers::list_shared_with_me,
        super::handlers::create_group,
        super::handlers::list_groups,
        super::handlers::get_group,
        super::handlers::delete_group,
        super::handlers::add_group_expense,
        super::handlers::list_group_expenses,
        super::handlers::get_group_settlement,
        super::handlers::get_app_logs
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        LoginResponse,
        AddTransactionRequest,
        UpdateTransactionRequest,
        SetBudgetRequest,
        AddEmiRequest,
        EmiRolloverRequest,
        AddAutopayRequest,
        GrantAccessRequest,
        RevokeAccessRequest,
        CreateGroupRequest,
        AddGroupExpenseRequest,
        ErrorResponse,
        User,
        Transaction,
        Budget,
        Emi,
        Autopay,
        Cadence,
        ShareGrant,
        AccessLevel,
        SplitGroup,
        GroupMember,
        SharedExpense,
        AppLog,
        SettlementTransfer,
        SettlementEntry,
        MemberBalance,
        GroupSettlement,
        GroupSettlementView,
        MonthOutflow,
        MonthlyReport
    )),
    info(
        title = "FinTrack API",
        description = "API for personal finance tracking, budgets and group expense settlement",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
