use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::required;
use super::ApiError;
use super::ApiSuccess;
use super::MessageResponseData;
use super::MissingField;
use super::PASSWORD_CHANGED_MESSAGE;
use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::UserId;
use crate::inbound::http::extractors::string_field;
use crate::inbound::http::extractors::JsonBody;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn change_password(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    JsonBody(body): JsonBody<ChangePasswordRequestBody>,
) -> Result<ApiSuccess<MessageResponseData>, ApiError> {
    state
        .auth_service
        .change_password(body.try_into_command(authenticated.user_id)?)
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
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequestBody {
    #[serde(default, deserialize_with = "string_field")]
    password: Option<String>,
    #[serde(default, deserialize_with = "string_field")]
    confirm_password: Option<String>,
}

impl ChangePasswordRequestBody {
    fn try_into_command(self, user_id: UserId) -> Result<ChangePasswordCommand, MissingField> {
        let password = required(self.password, MissingField::Password)?;
        let confirm_password = required(self.confirm_password, MissingField::NewPassword)?;

        Ok(ChangePasswordCommand {
            user_id,
            password,
            confirm_password,
        })
    }
}
