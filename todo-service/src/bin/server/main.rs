use std::sync::Arc;

use anyhow::Error;
use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use todo_service::config::Config;
use todo_service::config::StorageBackend;
use todo_service::domain::account::ports::AccountServicePort;
use todo_service::domain::account::service::AccountService;
use todo_service::domain::todo::models::OwnershipPolicy;
use todo_service::domain::todo::ports::TodoServicePort;
use todo_service::domain::todo::service::TodoService;
use todo_service::inbound::http::cookie::SessionCookie;
use todo_service::inbound::http::create_router;
use todo_service::outbound::repositories::InMemoryAccountRepository;
use todo_service::outbound::repositories::InMemoryTodoRepository;
use todo_service::outbound::repositories::PostgresAccountRepository;
use todo_service::outbound::repositories::PostgresTodoRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "todo-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        backend = ?config.database.backend,
        http_port = config.server.http_port,
        token_ttl_hours = config.jwt.expiration_hours,
        cookie_secure = config.cookie.secure,
        enforce_todo_ownership = config.todos.enforce_ownership,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        config.jwt.expiration_hours,
    ));
    let session_cookie = Arc::new(SessionCookie::from_config(&config.cookie));
    let ownership = OwnershipPolicy::from(config.todos.enforce_ownership);

    let (account_service, todo_service): (Arc<dyn AccountServicePort>, Arc<dyn TodoServicePort>) =
        match config.database.backend {
            StorageBackend::Postgres => {
                let pg_pool = PgPoolOptions::new()
                    .max_connections(config.database.max_connections)
                    .connect(&config.database.url)
                    .await?;
                tracing::info!(
                    max_connections = config.database.max_connections,
                    database = "postgresql",
                    "Database connection pool created"
                );

                sqlx::migrate!("./migrations").run(&pg_pool).await?;
                tracing::info!(database = "postgresql", "Database migrations completed");

                let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool.clone()));
                let todo_repository = Arc::new(PostgresTodoRepository::new(pg_pool));

                (
                    Arc::new(AccountService::new(
                        account_repository,
                        Arc::clone(&authenticator),
                    )) as Arc<dyn AccountServicePort>,
                    Arc::new(TodoService::new(todo_repository, ownership))
                        as Arc<dyn TodoServicePort>,
                )
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on restart");

                (
                    Arc::new(AccountService::new(
                        Arc::new(InMemoryAccountRepository::new()),
                        Arc::clone(&authenticator),
                    )) as Arc<dyn AccountServicePort>,
                    Arc::new(TodoService::new(
                        Arc::new(InMemoryTodoRepository::new()),
                        ownership,
                    )) as Arc<dyn TodoServicePort>,
                )
            }
        };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        account_service,
        todo_service,
        authenticator,
        session_cookie,
    );

    axum::serve(http_listener, http_application).await?;

    Ok(())
}
