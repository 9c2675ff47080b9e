use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::required;
use super::ApiError;
use super::ApiSuccess;
use super::MessageResponseData;
use super::MissingField;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::ForgotPasswordCommand;
use crate::inbound::http::extractors::string_field;
use crate::inbound::http::extractors::JsonBody;
use crate::inbound::http::router::AppState;

const RESET_LINK_SENT_MESSAGE: &str =
    "Please check your email for the link to reset your password.";

pub async fn forgot_password(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ForgotPasswordRequestBody>,
) -> Result<ApiSuccess<MessageResponseData>, ApiError> {
    state
        .auth_service
        .forgot_password(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                MessageResponseData::new(RESET_LINK_SENT_MESSAGE),
            )
        })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ForgotPasswordRequestBody {
    #[serde(default, deserialize_with = "string_field")]
    email: Option<String>,
}

impl ForgotPasswordRequestBody {
    fn try_into_command(self) -> Result<ForgotPasswordCommand, MissingField> {
        let email = required(self.email, MissingField::Email)?;

        Ok(ForgotPasswordCommand {
            email: EmailAddress::new(email).map_err(|_| MissingField::Email)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_required() {
        assert_eq!(
            ForgotPasswordRequestBody::default()
                .try_into_command()
                .unwrap_err(),
            MissingField::Email
        );
    }

    #[test]
    fn test_email_is_kept_verbatim() {
        let command = ForgotPasswordRequestBody {
            email: Some("not-an-email".to_string()),
        }
        .try_into_command()
        .unwrap();

        assert_eq!(command.email.as_str(), "not-an-email");
    }
}
