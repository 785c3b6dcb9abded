use crate::{
    api::models::*,
    auth::jwt::Claims,
    core::{
        errors::FinTrackError,
        models::{
            audit::AppLog, autopay::Autopay, budget::Budget, emi::Emi, expense::SharedExpense,
            group::SplitGroup, share::ShareGrant, transaction::Transaction, user::User,
        },
        services::{FinTrackService, GroupSettlementView, MonthlyReport},
    },
    core::engine::report::MonthOutflow,
    infrastructure::{
        cache::in_memory::InMemoryCache, logging::in_memory::InMemoryLogging,
        storage::in_memory::InMemoryStorage,
    },
    visualization::Visualization,
};
use axum::{
    Extension, Json, Router,
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::{Datelike, Utc};
use http::header;

use std::sync::Arc;

/// Middleware to validate JWT
async fn auth_middleware(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| FinTrackError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| FinTrackError::Unauthorized("Invalid Authorization header".to_string()))?;

    let claims = service.validate_token(token)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

// Define API routes
pub fn api_routes(service: Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>) -> Router {
    let protected_routes = Router::new()
        .route("/users/{user_id}", get(get_user))
        .route("/transactions", post(add_transaction).get(list_transactions))
        .route(
            "/transactions/{transaction_id}",
            put(update_transaction).delete(delete_transaction),
        )
        .route("/budgets", post(set_budget))
        .route("/reports/monthly/{year}/{month}", get(get_monthly_report))
        .route("/reports/trend", get(get_spending_trend))
        .route("/reports/trend/chart", get(get_trend_chart))
        .route("/emis", post(add_emi).get(list_emis))
        .route("/emis/rollover", post(rollover_emis))
        .route("/autopays", post(add_autopay).get(list_autopays))
        .route("/autopays/{autopay_id}", delete(delete_autopay))
        .route("/autopays/due/{year}/{month}", get(autopays_due))
        .route("/shares", post(grant_access).get(list_grants).delete(revoke_access))
        .route("/shares/received", get(list_shared_with_me))
        .route("/groups", post(create_group).get(list_groups))
        .route("/groups/{group_id}", get(get_group).delete(delete_group))
        .route(
            "/groups/{group_id}/expenses",
            post(add_group_expense).get(list_group_expenses),
        )
        .route("/groups/{group_id}/settlement", get(get_group_settlement))
        .route("/logs", get(get_app_logs))
        .route_layer(middleware::from_fn_with_state(service.clone(), auth_middleware));

    Router::new()
        .route("/register", post(register)) // Unprotected
        .route("/login", post(login))
        .merge(protected_routes)
        .with_state(service)
}

async fn current_user(
    service: &FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>,
    claims: &Claims,
) -> Result<User, ApiError> {
    let user = service
        .get_user(&claims.sub)
        .await?
        .ok_or_else(|| FinTrackError::Unauthorized(format!("Unknown user {}", claims.sub)))?;
    Ok(user)
}

fn owner_or_self(owner_id: Option<String>, acting: &User) -> String {
    owner_id.unwrap_or_else(|| acting.id.clone())
}

#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = User),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub(crate) async fn register(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = service.register_user(req.name, req.email, req.password).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub(crate) async fn login(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let token = service.authenticate(&req.email, &req.password).await?;
    Ok(Json(LoginResponse { token }))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    params(("user_id" = String, Path, description = "ID of the user to retrieve")),
    responses(
        (status = 200, description = "User retrieved successfully", body = User),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn get_user(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let user = service
        .get_user(&user_id)
        .await?
        .ok_or_else(|| FinTrackError::UserNotFound(user_id))?;
    Ok(Json(user))
}

#[utoipa::path(
    post,
    path = "/api/transactions",
    request_body = AddTransactionRequest,
    responses(
        (status = 200, description = "Transaction added", body = Transaction),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 403, description = "No edit access", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn add_transaction(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<AddTransactionRequest>,
) -> Result<Json<Transaction>, ApiError> {
    let acting = current_user(&service, &claims).await?;
    let owner_id = owner_or_self(req.owner_id, &acting);
    let transaction = service
        .add_transaction(
            &owner_id,
            req.amount,
            req.category,
            req.note.unwrap_or_default(),
            req.timestamp,
            &acting,
        )
        .await?;
    Ok(Json(transaction))
}

#[utoipa::path(
    get,
    path = "/api/transactions",
    params(TransactionListQuery),
    responses(
        (status = 200, description = "Transactions listed", body = [Transaction]),
        (status = 403, description = "No read access", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn list_transactions(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<TransactionListQuery>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let acting = current_user(&service, &claims).await?;
    let owner_id = owner_or_self(query.owner_id, &acting);
    let month = match (query.year, query.month) {
        (Some(year), Some(month)) => Some((year, month)),
        _ => None,
    };
    let transactions = service.list_transactions(&owner_id, month, &acting).await?;
    Ok(Json(transactions))
}

#[utoipa::path(
    put,
    path = "/api/transactions/{transaction_id}",
    request_body = UpdateTransactionRequest,
    params(("transaction_id" = String, Path, description = "ID of the transaction")),
    responses(
        (status = 200, description = "Transaction updated", body = Transaction),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn update_transaction(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Extension(claims): Extension<Claims>,
    Path(transaction_id): Path<String>,
    Json(req): Json<UpdateTransactionRequest>,
) -> Result<Json<Transaction>, ApiError> {
    let acting = current_user(&service, &claims).await?;
    let transaction = service
        .update_transaction(
            &transaction_id,
            req.amount,
            req.category,
            req.note.unwrap_or_default(),
            &acting,
        )
        .await?;
    Ok(Json(transaction))
}

#[utoipa::path(
    delete,
    path = "/api/transactions/{transaction_id}",
    params(("transaction_id" = String, Path, description = "ID of the transaction")),
    responses(
        (status = 200, description = "Transaction deleted"),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn delete_transaction(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Extension(claims): Extension<Claims>,
    Path(transaction_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let acting = current_user(&service, &claims).await?;
    service.delete_transaction(&transaction_id, &acting).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/api/budgets",
    request_body = SetBudgetRequest,
    responses(
        (status = 200, description = "Budget set", body = Budget),
        (status = 400, description = "Bad request", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn set_budget(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SetBudgetRequest>,
) -> Result<Json<Budget>, ApiError> {
    let acting = current_user(&service, &claims).await?;
    let owner_id = owner_or_self(req.owner_id, &acting);
    let budget = service.set_budget(&owner_id, req.monthly_limit, &acting).await?;
    Ok(Json(budget))
}

#[utoipa::path(
    get,
    path = "/api/reports/monthly/{year}/{month}",
    params(
        ("year" = i32, Path, description = "Report year"),
        ("month" = u32, Path, description = "Report month (1-12)"),
        OwnerQuery
    ),
    responses(
        (status = 200, description = "Monthly report", body = MonthlyReport),
        (status = 404, description = "No budget set", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn get_monthly_report(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Extension(claims): Extension<Claims>,
    Path((year, month)): Path<(i32, u32)>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<MonthlyReport>, ApiError> {
    let acting = current_user(&service, &claims).await?;
    let owner_id = owner_or_self(query.owner_id, &acting);
    let report = service.monthly_report(&owner_id, year, month, &acting).await?;
    Ok(Json(report))
}

#[utoipa::path(
    get,
    path = "/api/reports/trend",
    params(TrendQuery),
    responses(
        (status = 200, description = "Trailing six-month outflow", body = [MonthOutflow]),
        (status = 403, description = "No read access", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn get_spending_trend(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<TrendQuery>,
) -> Result<Json<Vec<MonthOutflow>>, ApiError> {
    let acting = current_user(&service, &claims).await?;
    let owner_id = owner_or_self(query.owner_id, &acting);
    let now = Utc::now();
    let (year, month) = (query.year.unwrap_or(now.year()), query.month.unwrap_or(now.month()));
    let trend = service.spending_trend(&owner_id, year, month, &acting).await?;
    Ok(Json(trend))
}

#[utoipa::path(
    get,
    path = "/api/reports/trend/chart",
    params(TrendQuery),
    responses(
        (status = 200, description = "Chart.js configuration for the trend"),
        (status = 403, description = "No read access", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn get_trend_chart(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<TrendQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let acting = current_user(&service, &claims).await?;
    let owner_id = owner_or_self(query.owner_id, &acting);
    let now = Utc::now();
    let (year, month) = (query.year.unwrap_or(now.year()), query.month.unwrap_or(now.month()));
    let trend = service.spending_trend(&owner_id, year, month, &acting).await?;
    Ok(Json(Visualization::spending_trend_chart(&trend)))
}

#[utoipa::path(
    post,
    path = "/api/emis",
    request_body = AddEmiRequest,
    responses(
        (status = 200, description = "EMI added", body = Emi),
        (status = 400, description = "Bad request", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn add_emi(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<AddEmiRequest>,
) -> Result<Json<Emi>, ApiError> {
    let acting = current_user(&service, &claims).await?;
    let owner_id = owner_or_self(req.owner_id, &acting);
    let emi = service
        .add_emi(&owner_id, req.name, req.amount, req.first_due, req.installments, &acting)
        .await?;
    Ok(Json(emi))
}

#[utoipa::path(
    get,
    path = "/api/emis",
    params(OwnerQuery),
    responses(
        (status = 200, description = "EMIs listed", body = [Emi]),
        (status = 403, description = "No read access", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn list_emis(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<Vec<Emi>>, ApiError> {
    let acting = current_user(&service, &claims).await?;
    let owner_id = owner_or_self(query.owner_id, &acting);
    let emis = service.list_emis(&owner_id, &acting).await?;
    Ok(Json(emis))
}

#[utoipa::path(
    post,
    path = "/api/emis/rollover",
    request_body = EmiRolloverRequest,
    responses(
        (status = 200, description = "EMIs rolled forward; completed ones removed", body = [Emi]),
        (status = 403, description = "No edit access", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn rollover_emis(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<EmiRolloverRequest>,
) -> Result<Json<Vec<Emi>>, ApiError> {
    let acting = current_user(&service, &claims).await?;
    let owner_id = owner_or_self(req.owner_id, &acting);
    let emis = service.process_emi_rollovers(&owner_id, Utc::now(), &acting).await?;
    Ok(Json(emis))
}

#[utoipa::path(
    post,
    path = "/api/autopays",
    request_body = AddAutopayRequest,
    responses(
        (status = 200, description = "Autopay added", body = Autopay),
        (status = 400, description = "Bad request", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn add_autopay(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<AddAutopayRequest>,
) -> Result<Json<Autopay>, ApiError> {
    let acting = current_user(&service, &claims).await?;
    let owner_id = owner_or_self(req.owner_id, &acting);
    let autopay = service
        .add_autopay(&owner_id, req.name, req.amount, req.anchor, req.cadence, &acting)
        .await?;
    Ok(Json(autopay))
}

#[utoipa::path(
    get,
    path = "/api/autopays",
    params(OwnerQuery),
    responses(
        (status = 200, description = "Autopays listed", body = [Autopay]),
        (status = 403, description = "No read access", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn list_autopays(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<Vec<Autopay>>, ApiError> {
    let acting = current_user(&service, &claims).await?;
    let owner_id = owner_or_self(query.owner_id, &acting);
    let autopays = service.list_autopays(&owner_id, &acting).await?;
    Ok(Json(autopays))
}

#[utoipa::path(
    delete,
    path = "/api/autopays/{autopay_id}",
    params(("autopay_id" = String, Path, description = "ID of the autopay")),
    responses(
        (status = 200, description = "Autopay removed"),
        (status = 404, description = "Autopay not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn delete_autopay(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Extension(claims): Extension<Claims>,
    Path(autopay_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let acting = current_user(&service, &claims).await?;
    service.delete_autopay(&autopay_id, &acting).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/api/autopays/due/{year}/{month}",
    params(
        ("year" = i32, Path, description = "Target year"),
        ("month" = u32, Path, description = "Target month (1-12)"),
        OwnerQuery
    ),
    responses(
        (status = 200, description = "Autopays due in the target month", body = [Autopay]),
        (status = 400, description = "Bad request", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn autopays_due(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Extension(claims): Extension<Claims>,
    Path((year, month)): Path<(i32, u32)>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<Vec<Autopay>>, ApiError> {
    let acting = current_user(&service, &claims).await?;
    let owner_id = owner_or_self(query.owner_id, &acting);
    let autopays = service.autopays_due_in_month(&owner_id, year, month, &acting).await?;
    Ok(Json(autopays))
}

#[utoipa::path(
    post,
    path = "/api/shares",
    request_body = GrantAccessRequest,
    responses(
        (status = 200, description = "Access granted", body = ShareGrant),
        (status = 404, description = "Grantee not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn grant_access(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<GrantAccessRequest>,
) -> Result<Json<ShareGrant>, ApiError> {
    let acting = current_user(&service, &claims).await?;
    let share = service.grant_access(&acting, &req.grantee_email, req.level).await?;
    Ok(Json(share))
}

#[utoipa::path(
    delete,
    path = "/api/shares",
    request_body = RevokeAccessRequest,
    responses(
        (status = 200, description = "Access revoked"),
        (status = 404, description = "Share not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn revoke_access(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<RevokeAccessRequest>,
) -> Result<StatusCode, ApiError> {
    let acting = current_user(&service, &claims).await?;
    service.revoke_access(&acting, &req.grantee_id).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/api/shares",
    responses(
        (status = 200, description = "Grants issued by the authenticated user", body = [ShareGrant])
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn list_grants(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<ShareGrant>>, ApiError> {
    let acting = current_user(&service, &claims).await?;
    let shares = service.list_grants(&acting).await?;
    Ok(Json(shares))
}

#[utoipa::path(
    get,
    path = "/api/shares/received",
    responses(
        (status = 200, description = "Grants received by the authenticated user", body = [ShareGrant])
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn list_shared_with_me(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<ShareGrant>>, ApiError> {
    let acting = current_user(&service, &claims).await?;
    let shares = service.list_shared_with_me(&acting).await?;
    Ok(Json(shares))
}

#[utoipa::path(
    post,
    path = "/api/groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 200, description = "Group created", body = SplitGroup),
        (status = 404, description = "Member not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn create_group(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<Json<SplitGroup>, ApiError> {
    let acting = current_user(&service, &claims).await?;
    let members = req
        .member_ids
        .into_iter()
        .map(|id| async {
            service
                .get_user(&id)
                .await?
                .ok_or_else(|| FinTrackError::UserNotFound(id))
        })
        .collect::<Vec<_>>();
    let members = futures::future::try_join_all(members).await?;
    let group = service.create_group(req.name, members, &acting).await?;
    Ok(Json(group))
}

#[utoipa::path(
    get,
    path = "/api/groups",
    responses(
        (status = 200, description = "Groups the authenticated user belongs to", body = [SplitGroup])
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn list_groups(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<SplitGroup>>, ApiError> {
    let acting = current_user(&service, &claims).await?;
    let groups = service.list_groups(&acting).await?;
    Ok(Json(groups))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}",
    params(("group_id" = String, Path, description = "ID of the group")),
    responses(
        (status = 200, description = "Group retrieved", body = SplitGroup),
        (status = 404, description = "Group not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn get_group(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<String>,
) -> Result<Json<SplitGroup>, ApiError> {
    let acting = current_user(&service, &claims).await?;
    let group = service.get_group(&group_id, &acting).await?;
    Ok(Json(group))
}

#[utoipa::path(
    delete,
    path = "/api/groups/{group_id}",
    params(("group_id" = String, Path, description = "ID of the group")),
    responses(
        (status = 200, description = "Group deleted"),
        (status = 403, description = "Not the group creator", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn delete_group(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let acting = current_user(&service, &claims).await?;
    service.delete_group(&group_id, &acting).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/expenses",
    request_body = AddGroupExpenseRequest,
    params(("group_id" = String, Path, description = "ID of the group")),
    responses(
        (status = 200, description = "Expense added", body = SharedExpense),
        (status = 400, description = "Bad request", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn add_group_expense(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<String>,
    Json(req): Json<AddGroupExpenseRequest>,
) -> Result<Json<SharedExpense>, ApiError> {
    let acting = current_user(&service, &claims).await?;
    let paid_by = req.paid_by.unwrap_or_else(|| acting.id.clone());
    let expense = service
        .add_group_expense(
            &group_id,
            req.description,
            req.amount,
            &paid_by,
            req.participant_ids,
            &acting,
        )
        .await?;
    Ok(Json(expense))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/expenses",
    params(("group_id" = String, Path, description = "ID of the group")),
    responses(
        (status = 200, description = "Group expenses listed", body = [SharedExpense]),
        (status = 403, description = "Not a group member", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn list_group_expenses(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<SharedExpense>>, ApiError> {
    let acting = current_user(&service, &claims).await?;
    let expenses = service.list_group_expenses(&group_id, &acting).await?;
    Ok(Json(expenses))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/settlement",
    params(("group_id" = String, Path, description = "ID of the group")),
    responses(
        (status = 200, description = "Balances, transfers and the caller's view", body = GroupSettlementView),
        (status = 403, description = "Not a group member", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn get_group_settlement(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<String>,
) -> Result<Json<GroupSettlementView>, ApiError> {
    let acting = current_user(&service, &claims).await?;
    let settlement = service.group_settlement(&group_id, &acting).await?;
    Ok(Json(settlement))
}

#[utoipa::path(
    get,
    path = "/api/logs",
    responses((status = 200, description = "Application action log", body = [AppLog])),
    security(("Bearer" = []))
)]
pub(crate) async fn get_app_logs(
    State(service): State<Arc<FinTrackService<InMemoryLogging, InMemoryStorage, InMemoryCache>>>,
) -> Result<Json<Vec<AppLog>>, ApiError> {
    let logs = service.get_app_logs().await?;
    Ok(Json(logs))
}
