use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::TodoData;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::TodoDescription;
use crate::domain::todo::models::TodoStatus;
use crate::domain::todo::models::TodoTitle;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn create_todo(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    body: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<ApiSuccess<TodoData>, ApiError> {
    let Json(body) = body.map_err(ApiError::from_body_rejection)?;

    state
        .todo_service
        .create_todo(caller.account_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| {
            ApiSuccess::with_message(StatusCode::CREATED, "Todo created successfully.", todo.into())
        })
}

/// HTTP request body for creating a todo (raw JSON).
///
/// The owner is never read from the body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTodoRequest {
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
}

impl CreateTodoRequest {
    fn try_into_command(self) -> Result<CreateTodoCommand, TodoError> {
        let (title, description) = match (self.title, self.description) {
            (Some(title), Some(description))
                if !title.trim().is_empty() && !description.trim().is_empty() =>
            {
                (title, description)
            }
            _ => {
                return Err(TodoError::Validation(
                    "Title and description are required.".to_string(),
                ))
            }
        };

        let status = self
            .status
            .map(|s| s.parse::<TodoStatus>())
            .transpose()?
            .unwrap_or_default();

        Ok(CreateTodoCommand {
            title: TodoTitle::new(title)?,
            description: TodoDescription::new(description)?,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: Option<&str>, description: Option<&str>, status: Option<&str>) -> CreateTodoRequest {
        CreateTodoRequest {
            title: title.map(str::to_string),
            description: description.map(str::to_string),
            status: status.map(str::to_string),
        }
    }

    #[test]
    fn test_title_and_description_are_required() {
        let err = request(Some("Buy milk"), Some("  "), None)
            .try_into_command()
            .unwrap_err();

        assert_eq!(err.to_string(), "Title and description are required.");
    }

    #[test]
    fn test_status_defaults_to_pending() {
        let command = request(Some("Buy Milk"), Some("Two litres please"), None)
            .try_into_command()
            .unwrap();

        assert_eq!(command.status, TodoStatus::Pending);
        assert_eq!(command.title.as_str(), "buy milk");
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let err = request(Some("Buy Milk"), Some("Two litres please"), Some("someday"))
            .try_into_command()
            .unwrap_err();

        assert!(matches!(err, TodoError::InvalidStatus(_)));
    }
}
