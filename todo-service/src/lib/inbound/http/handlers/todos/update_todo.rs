use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::TodoData;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::TodoDescription;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoStatus;
use crate::domain::todo::models::TodoTitle;
use crate::domain::todo::models::UpdateTodoCommand;
use crate::inbound::http::handlers::patch_body;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl UpdateTodoRequest {
    fn try_into_command(self) -> Result<UpdateTodoCommand, TodoError> {
        Ok(UpdateTodoCommand {
            title: self.title.map(TodoTitle::new).transpose()?,
            description: self.description.map(TodoDescription::new).transpose()?,
            status: self
                .status
                .map(|s| s.parse::<TodoStatus>())
                .transpose()?,
        })
    }
}

pub async fn update_todo(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<ApiSuccess<TodoData>, ApiError> {
    let todo_id = TodoId::from_string(&id).map_err(TodoError::from)?;
    let command = patch_body(body)?.try_into_command()?;

    state
        .todo_service
        .update_todo(&todo_id, &caller.account_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| {
            ApiSuccess::with_message(StatusCode::OK, "Todo updated successfully.", todo.into())
        })
}
