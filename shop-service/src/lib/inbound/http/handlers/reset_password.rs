use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::required;
use super::ApiError;
use super::ApiSuccess;
use super::MessageResponseData;
use super::MissingField;
use super::PASSWORD_CHANGED_MESSAGE;
use crate::domain::user::models::ResetPasswordCommand;
use crate::inbound::http::extractors::string_field;
use crate::inbound::http::extractors::JsonBody;
use crate::inbound::http::router::AppState;

/// Redeem the emailed reset token. The token is looked up as given.
pub async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    JsonBody(body): JsonBody<ResetPasswordRequestBody>,
) -> Result<ApiSuccess<MessageResponseData>, ApiError> {
    state
        .auth_service
        .reset_password(body.try_into_command(token)?)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                MessageResponseData::new(PASSWORD_CHANGED_MESSAGE),
            )
        })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResetPasswordRequestBody {
    #[serde(default, deserialize_with = "string_field")]
    password: Option<String>,
}

impl ResetPasswordRequestBody {
    fn try_into_command(self, token: String) -> Result<ResetPasswordCommand, MissingField> {
        let password = required(self.password, MissingField::Password)?;
        Ok(ResetPasswordCommand { token, password })
    }
}
