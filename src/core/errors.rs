use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

#[derive(Error, Debug, Serialize)]
pub enum FinTrackError {
    /// Email field is empty
    #[error("Email is required")]
    MissingEmail,

    /// Email is already registered
    #[error("Email {0} already registered")]
    EmailAlreadyRegistered(String),

    /// Email format is invalid
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    /// Login with a wrong email/password pair
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// User with given ID or email not found
    #[error("User {0} not found")]
    UserNotFound(String),

    /// Transaction with given ID not found
    #[error("Transaction {0} not found")]
    TransactionNotFound(String),

    /// EMI with given ID not found
    #[error("EMI {0} not found")]
    EmiNotFound(String),

    /// Autopay with given ID not found
    #[error("Autopay {0} not found")]
    AutopayNotFound(String),

    /// No monthly budget configured for the user
    #[error("No budget set for user {0}")]
    BudgetNotSet(String),

    /// Acting user has no share grant on the owner's data
    #[error("User {0} has no access to this data")]
    AccessDenied(String),

    /// Acting user holds a read grant but attempted a mutation
    #[error("User {0} has read-only access to this data")]
    ReadOnlyAccess(String),

    /// Users cannot share data with themselves
    #[error("Cannot share data with yourself")]
    SelfShare,

    /// No share grant between the two users
    #[error("No share grant for user {0}")]
    ShareNotFound(String),

    /// Group with given ID not found
    #[error("Group {0} not found")]
    GroupNotFound(String),

    /// User is not a member of the group
    #[error("User {0} is not a group member")]
    NotGroupMember(String),

    /// Only the group creator may perform this action
    #[error("User {0} is not the group creator")]
    NotGroupCreator(String),

    /// Expense split has no participants
    #[error("Expense split must name at least one participant")]
    EmptySplit,

    /// Participant in a split is not a group member
    #[error("Invalid split participant: {0}")]
    InvalidSplitParticipant(String),

    /// Generic input validation error with detailed field information
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    /// Missing or invalid bearer token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error (e.g., unexpected failure)
    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),

    #[error("Cache error: {0}")]
    CacheError(String),
}
