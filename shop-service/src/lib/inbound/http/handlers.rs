use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::domain::user::models::User;
use crate::user::errors::UserError;

pub mod change_password;
pub mod forgot_password;
pub mod healthcheck;
pub mod login;
pub mod register;
pub mod reset_password;

/// Message returned for any failure the shopper cannot fix.
pub const INTERNAL_ERROR_MESSAGE: &str = "Your request could not be processed. Please try again.";

/// Message returned once a password has been replaced.
pub const PASSWORD_CHANGED_MESSAGE: &str =
    "Password changed successfully. Please login with your new password.";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Success envelope: `{ "success": true, ...data }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    success: bool,
    #[serde(flatten)]
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiErrorData { error })).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFoundByEmail(_)
            | UserError::EmailAlreadyExists(_)
            | UserError::ProviderMismatch(_)
            | UserError::InvalidCredentials
            | UserError::IncorrectCurrentPassword
            | UserError::ResetTokenExpired
            | UserError::InvalidEmail(_) => ApiError::BadRequest(err.to_string()),
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::Password(_)
            | UserError::Token(_)
            | UserError::UnknownRole(_)
            | UserError::UnknownProvider(_)
            | UserError::DatabaseError(_) => {
                tracing::error!(error = %err, "Request failed");
                ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub error: String,
}

/// First missing field of a request body, in checking order.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum MissingField {
    #[error("You must enter an email address.")]
    Email,

    #[error("You must enter your full name.")]
    FullName,

    #[error("You must enter a password.")]
    Password,

    #[error("You must enter a new password.")]
    NewPassword,
}

impl From<MissingField> for ApiError {
    fn from(err: MissingField) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// Absent, `null` and `""` all count as missing. Whitespace does not.
pub(crate) fn required(value: Option<String>, field: MissingField) -> Result<String, MissingField> {
    value.filter(|v| !v.is_empty()).ok_or(field)
}

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.as_str().to_string(),
            role: user.role.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponseData {
    pub message: String,
}

impl MessageResponseData {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
