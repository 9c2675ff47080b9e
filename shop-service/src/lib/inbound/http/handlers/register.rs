use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::required;
use super::ApiError;
use super::ApiSuccess;
use super::MissingField;
use super::UserData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Registration;
use crate::inbound::http::extractors::bool_field;
use crate::inbound::http::extractors::string_field;
use crate::inbound::http::extractors::JsonBody;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequestBody>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref registration| ApiSuccess::new(StatusCode::OK, registration.into()))
}

/// HTTP request body for creating an account (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequestBody {
    #[serde(default, deserialize_with = "string_field")]
    email: Option<String>,
    #[serde(default, deserialize_with = "string_field")]
    first_name: Option<String>,
    #[serde(default, deserialize_with = "string_field")]
    last_name: Option<String>,
    #[serde(default, deserialize_with = "string_field")]
    password: Option<String>,
    #[serde(default, deserialize_with = "bool_field")]
    is_subscribed: Option<bool>,
}

impl RegisterRequestBody {
    fn try_into_command(self) -> Result<RegisterCommand, MissingField> {
        let email = required(self.email, MissingField::Email)?;
        let first_name = required(self.first_name, MissingField::FullName)?;
        let last_name = required(self.last_name, MissingField::FullName)?;
        let password = required(self.password, MissingField::Password)?;

        Ok(RegisterCommand {
            email: EmailAddress::new(email).map_err(|_| MissingField::Email)?,
            first_name,
            last_name,
            password,
            is_subscribed: self.is_subscribed.unwrap_or(false),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub subscribed: bool,
    pub token: String,
    pub user: UserData,
}

impl From<&Registration> for RegisterResponseData {
    fn from(registration: &Registration) -> Self {
        Self {
            subscribed: registration.subscribed,
            token: registration.session.token.clone(),
            user: (&registration.session.user).into(),
        }
    }
}
