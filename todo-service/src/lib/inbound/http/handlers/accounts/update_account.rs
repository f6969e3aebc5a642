use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::AccountData;
use crate::domain::account::errors::AccountError;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AccountName;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Password;
use crate::domain::account::models::SelfServiceAction;
use crate::domain::account::models::UpdateAccountCommand;
use crate::inbound::http::handlers::patch_body;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating an account (raw JSON).
///
/// `token` is accepted only so that an attempt to set it can be refused.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAccountRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub token: Option<serde_json::Value>,
}

impl UpdateAccountRequest {
    fn try_into_command(self) -> Result<UpdateAccountCommand, AccountError> {
        if self.token.as_ref().is_some_and(is_truthy) {
            return Err(AccountError::Validation(
                "Token cannot be manually updated.".to_string(),
            ));
        }

        let name = self.name.map(AccountName::new).transpose()?;
        let email = self.email.map(EmailAddress::new).transpose()?;
        let password = self.password.map(Password::new).transpose()?;

        Ok(UpdateAccountCommand {
            name,
            email,
            password,
        })
    }
}

/// Null, `false`, `0` and `""` do not count as an attempt to set a field.
fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

pub async fn update_account(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Path(id): Path<String>,
    body: Result<Json<UpdateAccountRequest>, JsonRejection>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let account_id = AccountId::from_string(&id).map_err(AccountError::from)?;
    account_id.authorize_self_service(&caller.account_id, SelfServiceAction::Update)?;

    let command = patch_body(body)?.try_into_command()?;

    state
        .account_service
        .update_account(&account_id, &caller.account_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref account| {
            ApiSuccess::with_message(StatusCode::OK, "User updated successfully.", account.into())
        })
}
