use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::AccountData;
use crate::domain::account::errors::AccountError;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<([(header::HeaderName, HeaderValue); 1], ApiSuccess<LoginResponseData>), ApiError> {
    let Json(body) = body.map_err(ApiError::from_body_rejection)?;

    if body.email.trim().is_empty() || body.password.is_empty() {
        return Err(AccountError::InvalidCredentials.into());
    }

    let session = state
        .account_service
        .login(&body.email, &body.password)
        .await?;

    let cookie = state
        .session_cookie
        .header_value(&session.token, session.expires_in)
        .ok_or_else(|| {
            ApiError::InternalServerError("Session token is not a valid cookie value".to_string())
        })?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        ApiSuccess::with_message(
            StatusCode::OK,
            "Login successful",
            LoginResponseData {
                token: session.token,
                user: (&session.account).into(),
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    pub user: AccountData,
}
