use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::SelfServiceAction;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn delete_account(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let account_id = AccountId::from_string(&id).map_err(AccountError::from)?;
    account_id.authorize_self_service(&caller.account_id, SelfServiceAction::Delete)?;

    state
        .account_service
        .delete_account(&account_id, &caller.account_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::message(StatusCode::OK, "User deleted successfully."))
}
