use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::TodoId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let todo_id = TodoId::from_string(&id).map_err(TodoError::from)?;

    state
        .todo_service
        .delete_todo(&todo_id, &caller.account_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::message(StatusCode::OK, "Todo deleted successfully."))
}
