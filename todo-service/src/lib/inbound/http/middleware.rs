use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::AccountId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

const AUTHENTICATION_REQUIRED: &str = "Authentication required to access this route";
const INVALID_TOKEN: &str = "Invalid or expired token";

/// Extension type to store the authenticated account in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
}

/// Middleware that admits a request only when its bearer token is valid and
/// is the account's current session token.
pub async fn session_guard(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&req)
        .inspect_err(|_| tracing::warn!("Missing or malformed Authorization header"))?
        .to_string();

    let claims = state.authenticator.validate_token(&token).map_err(|e| {
        tracing::warn!(error = %e, "JWT validation failed");
        ApiError::Unauthorized(INVALID_TOKEN.to_string())
    })?;

    let account_id = AccountId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not an account ID");
        ApiError::Unauthorized(INVALID_TOKEN.to_string())
    })?;

    let account = match state.account_service.get_account(&account_id).await {
        Ok(account) => account,
        Err(AccountError::NotFound(_)) => {
            tracing::warn!(account_id = %account_id, "Token subject no longer exists");
            return Err(ApiError::Unauthorized(INVALID_TOKEN.to_string()));
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load account for session check");
            return Err(ApiError::from(e));
        }
    };

    if !account.holds_session(&token) {
        tracing::warn!(account_id = %account_id, "Token is not the active session");
        return Err(ApiError::Unauthorized(INVALID_TOKEN.to_string()));
    }

    req.extensions_mut()
        .insert(AuthenticatedAccount { account_id });

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Result<&str, ApiError> {
    let unauthenticated = || ApiError::Unauthorized(AUTHENTICATION_REQUIRED.to_string());

    let auth_str = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(unauthenticated)?
        .to_str()
        .map_err(|_| unauthenticated())?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(unauthenticated()),
    }
}
