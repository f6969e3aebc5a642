use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::TodoData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// Lists the caller's todos. The `:user_id` segment is not consulted.
pub async fn list_todos(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Path(_user_id): Path<String>,
) -> Result<ApiSuccess<Vec<TodoData>>, ApiError> {
    state
        .todo_service
        .list_todos_by_owner(&caller.account_id)
        .await
        .map_err(ApiError::from)
        .map(|todos| ApiSuccess::new(StatusCode::OK, todos.iter().map(TodoData::from).collect()))
}
