use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::account::errors::AccountError;
use crate::domain::todo::errors::TodoError;

pub mod accounts;
pub mod todos;

/// Outcome marker carried by every response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// `{status, message?, data?}` envelope shared by every endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize> {
    status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T: Serialize> ApiResponseBody<T> {
    pub fn success(message: Option<String>, data: Option<T>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message,
            data,
        }
    }
}

impl ApiResponseBody<()> {
    pub fn error(message: String) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: Some(message),
            data: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::success(None, Some(data))))
    }

    pub fn with_message(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        ApiSuccess(
            status,
            Json(ApiResponseBody::success(Some(message.into()), Some(data))),
        )
    }
}

impl ApiSuccess<()> {
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        ApiSuccess(
            status,
            Json(ApiResponseBody::success(Some(message.into()), None)),
        )
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
}

impl ApiError {
    /// Malformed or mistyped JSON body
    pub fn from_body_rejection(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

/// Body of a partial update. A request without a JSON body is an empty patch.
pub fn patch_body<T: Default>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match body {
        Ok(Json(patch)) => Ok(patch),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => Err(ApiError::from_body_rejection(rejection)),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Internal Server Error: {}", msg),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        (status, Json(ApiResponseBody::error(message))).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidAccountId(_) => {
                ApiError::BadRequest("Invalid user ID format.".to_string())
            }
            AccountError::InvalidName(_)
            | AccountError::InvalidEmail(_)
            | AccountError::InvalidPassword(_)
            | AccountError::Validation(_) => ApiError::BadRequest(err.to_string()),
            AccountError::DuplicateEmail(_) => {
                ApiError::BadRequest("Email is already registered".to_string())
            }
            AccountError::NotFound(_) => ApiError::NotFound("User not found.".to_string()),
            AccountError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AccountError::Forbidden(msg) => ApiError::Forbidden(msg),
            AccountError::DatabaseError(_) | AccountError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::InvalidTodoId(_) => {
                ApiError::BadRequest("Invalid todo ID format.".to_string())
            }
            TodoError::InvalidTitle(_)
            | TodoError::InvalidDescription(_)
            | TodoError::InvalidStatus(_)
            | TodoError::Validation(_) => ApiError::BadRequest(err.to_string()),
            TodoError::NotFound(_) => ApiError::NotFound("Todo not found.".to_string()),
            TodoError::NoTodosFound => ApiError::NotFound(err.to_string()),
            TodoError::Forbidden(msg) => ApiError::Forbidden(msg),
            TodoError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

/// Fallback for unmatched routes
pub async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::errors::AccountNameError;

    #[test]
    fn test_success_envelope_shape() {
        let body = ApiResponseBody::success(Some("Done".to_string()), Some(42));
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"status": "success", "message": "Done", "data": 42})
        );
    }

    #[test]
    fn test_error_envelope_omits_data() {
        let json = serde_json::to_value(ApiResponseBody::error("Nope".to_string())).unwrap();

        assert_eq!(json, serde_json::json!({"status": "error", "message": "Nope"}));
    }

    #[test]
    fn test_account_error_mapping() {
        assert_eq!(
            ApiError::from(AccountError::InvalidName(AccountNameError::InvalidCharacters)),
            ApiError::BadRequest("Name should only contain letters and spaces".to_string())
        );
        assert_eq!(
            ApiError::from(AccountError::DuplicateEmail("a@b.io".to_string())),
            ApiError::BadRequest("Email is already registered".to_string())
        );
        assert_eq!(
            ApiError::from(AccountError::InvalidCredentials),
            ApiError::Unauthorized("Invalid credentials".to_string())
        );
        assert!(matches!(
            ApiError::from(AccountError::Forbidden("no".to_string())),
            ApiError::Forbidden(_)
        ));
    }

    #[test]
    fn test_todo_error_mapping() {
        assert_eq!(
            ApiError::from(TodoError::NoTodosFound),
            ApiError::NotFound("No todos found for this user.".to_string())
        );
        assert!(matches!(
            ApiError::from(TodoError::DatabaseError("down".to_string())),
            ApiError::InternalServerError(_)
        ));
    }
}
