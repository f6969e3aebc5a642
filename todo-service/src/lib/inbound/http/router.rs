use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::middleware;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use axum::routing::MethodRouter;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::cookie::SessionCookie;
use super::handlers::accounts;
use super::handlers::route_not_found;
use super::handlers::todos;
use super::handlers::ApiError;
use super::middleware::session_guard;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::todo::ports::TodoServicePort;

/// Shared state for every HTTP handler and the session guard.
///
/// Services are held behind their ports so the binary can pick a storage
/// backend at startup.
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub todo_service: Arc<dyn TodoServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub session_cookie: Arc<SessionCookie>,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    todo_service: Arc<dyn TodoServicePort>,
    authenticator: Arc<Authenticator>,
    session_cookie: Arc<SessionCookie>,
) -> Router {
    let state = AppState {
        account_service,
        todo_service,
        authenticator,
        session_cookie,
    };

    let public_routes = Router::new()
        .route(
            "/api/users/register",
            post(accounts::register).fallback(route_not_found),
        )
        .route(
            "/api/users/login",
            post(accounts::login).fallback(route_not_found),
        );

    let protected_routes = Router::new()
        .route("/api/users", guarded(&state, get(accounts::list_accounts)))
        .route(
            "/api/users/:id",
            guarded(
                &state,
                get(accounts::get_account)
                    .patch(accounts::update_account)
                    .delete(accounts::delete_account),
            ),
        )
        .route("/api/todo/add", guarded(&state, post(todos::create_todo)))
        .route(
            "/api/todo/user/:user_id",
            guarded(&state, get(todos::list_todos)),
        )
        .route(
            "/api/todo/:id",
            guarded(
                &state,
                get(todos::get_todo)
                    .patch(todos::update_todo)
                    .delete(todos::delete_todo),
            ),
        );

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(|response: &Response, latency: Duration, _span: &Span| {
            tracing::info!(
                status = response.status().as_u16(),
                latency_ms = latency.as_millis(),
                "Request completed"
            );
        });

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(route_not_found)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

/// Puts the session guard in front of every method of `routes`. Unsupported
/// methods skip the guard and answer with the 404 envelope.
fn guarded(state: &AppState, routes: MethodRouter<AppState>) -> MethodRouter<AppState> {
    routes
        .route_layer(middleware::from_fn_with_state(state.clone(), session_guard))
        .fallback(route_not_found)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic message".to_string()
    };

    ApiError::InternalServerError(detail).into_response()
}
