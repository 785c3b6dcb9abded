use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::errors::FinTrackError;
use crate::core::models::{autopay::Cadence, share::AccessLevel};

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Deserialize, ToSchema)]
pub struct AddTransactionRequest {
    /// Defaults to the authenticated user
    pub owner_id: Option<String>,
    pub amount: f64,
    pub category: String,
    pub note: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateTransactionRequest {
    pub amount: f64,
    pub category: String,
    pub note: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct SetBudgetRequest {
    pub owner_id: Option<String>,
    pub monthly_limit: f64,
}

#[derive(Deserialize, ToSchema)]
pub struct AddEmiRequest {
    pub owner_id: Option<String>,
    pub name: String,
    pub amount: f64,
    pub first_due: DateTime<Utc>,
    pub installments: u32,
}

#[derive(Deserialize, ToSchema)]
pub struct EmiRolloverRequest {
    pub owner_id: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct AddAutopayRequest {
    pub owner_id: Option<String>,
    pub name: String,
    pub amount: f64,
    pub anchor: DateTime<Utc>,
    pub cadence: Cadence,
}

#[derive(Deserialize, ToSchema)]
pub struct GrantAccessRequest {
    pub grantee_email: String,
    pub level: AccessLevel,
}

#[derive(Deserialize, ToSchema)]
pub struct RevokeAccessRequest {
    pub grantee_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateGroupRequest {
    pub name: String,
    pub member_ids: Vec<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct AddGroupExpenseRequest {
    pub description: String,
    pub amount: f64,
    /// Defaults to the authenticated user
    pub paid_by: Option<String>,
    pub participant_ids: Vec<String>,
}

#[derive(Deserialize, IntoParams)]
pub struct OwnerQuery {
    /// Defaults to the authenticated user
    pub owner_id: Option<String>,
}

#[derive(Deserialize, IntoParams)]
pub struct TransactionListQuery {
    pub owner_id: Option<String>,
    /// Filter to one calendar month; year and month go together
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Deserialize, IntoParams)]
pub struct TrendQuery {
    pub owner_id: Option<String>,
    /// End month of the trailing window; defaults to the current month
    pub year: Option<i32>,
    pub month: Option<u32>,
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for FinTrackError to implement IntoResponse
pub struct ApiError(pub FinTrackError);

impl From<FinTrackError> for ApiError {
    fn from(err: FinTrackError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            FinTrackError::MissingEmail
            | FinTrackError::InvalidEmail(_)
            | FinTrackError::SelfShare
            | FinTrackError::EmptySplit
            | FinTrackError::InvalidSplitParticipant(_)
            | FinTrackError::InvalidInput(_, _) => StatusCode::BAD_REQUEST,
            FinTrackError::InvalidCredentials | FinTrackError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            FinTrackError::AccessDenied(_)
            | FinTrackError::ReadOnlyAccess(_)
            | FinTrackError::NotGroupMember(_)
            | FinTrackError::NotGroupCreator(_) => StatusCode::FORBIDDEN,
            FinTrackError::UserNotFound(_)
            | FinTrackError::TransactionNotFound(_)
            | FinTrackError::EmiNotFound(_)
            | FinTrackError::AutopayNotFound(_)
            | FinTrackError::BudgetNotSet(_)
            | FinTrackError::ShareNotFound(_)
            | FinTrackError::GroupNotFound(_) => StatusCode::NOT_FOUND,
            FinTrackError::EmailAlreadyRegistered(_) => StatusCode::CONFLICT,
            FinTrackError::InternalServerError(_)
            | FinTrackError::StorageError(_)
            | FinTrackError::LoggingError(_)
            | FinTrackError::CacheError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
