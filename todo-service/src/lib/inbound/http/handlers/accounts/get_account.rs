use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::AccountData;
use crate::domain::account::errors::AccountError;
use crate::domain::account::models::AccountId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let account_id = AccountId::from_string(&id).map_err(AccountError::from)?;

    state
        .account_service
        .get_account(&account_id)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}
