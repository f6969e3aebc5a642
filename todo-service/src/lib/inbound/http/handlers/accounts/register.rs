use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::AccountData;
use crate::domain::account::errors::AccountError;
use crate::domain::account::models::AccountName;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Password;
use crate::domain::account::models::RegisterAccountCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let Json(body) = body.map_err(ApiError::from_body_rejection)?;

    state
        .account_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref account| {
            ApiSuccess::with_message(
                StatusCode::CREATED,
                "User registered successfully",
                account.into(),
            )
        })
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

fn required(value: Option<String>, field: &str) -> Result<String, AccountError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AccountError::Validation(format!("{} is required", field))),
    }
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterAccountCommand, AccountError> {
        let name = AccountName::new(required(self.name, "Name")?)?;
        let email = EmailAddress::new(required(self.email, "Email")?)?;
        let password = Password::new(required(self.password, "Password")?)?;

        Ok(RegisterAccountCommand::new(name, email, password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: Option<&str>, email: Option<&str>, password: Option<&str>) -> RegisterRequest {
        RegisterRequest {
            name: name.map(str::to_string),
            email: email.map(str::to_string),
            password: password.map(str::to_string),
        }
    }

    #[test]
    fn test_first_failing_field_wins() {
        let err = request(None, Some("not-an-email"), None)
            .try_into_command()
            .unwrap_err();
        assert_eq!(err.to_string(), "Name is required");

        let err = request(Some("Alice Smith"), Some("   "), Some("short"))
            .try_into_command()
            .unwrap_err();
        assert_eq!(err.to_string(), "Email is required");
    }

    #[test]
    fn test_password_policy() {
        let err = request(Some("Alice Smith"), Some("alice@example.com"), Some("lowercase1"))
            .try_into_command()
            .unwrap_err();
        assert!(matches!(err, AccountError::InvalidPassword(_)));
    }

    #[test]
    fn test_valid_request_lowercases_email() {
        let command = request(
            Some("Alice Smith"),
            Some("Alice@Example.COM"),
            Some("Secret123"),
        )
        .try_into_command()
        .unwrap();

        assert_eq!(command.email.as_str(), "alice@example.com");
    }
}
