use std::sync::Arc;

use auth::Authenticator;
use auth::Claims;
use auth::JwtHandler;
use chrono::DateTime;
use chrono::Utc;
use serde_json::json;
use serde_json::Value;
use todo_service::config::CookieConfig;
use todo_service::domain::account::models::AccountId;
use todo_service::domain::account::ports::AccountRepository;
use todo_service::domain::account::service::AccountService;
use todo_service::domain::todo::models::OwnershipPolicy;
use todo_service::domain::todo::service::TodoService;
use todo_service::inbound::http::cookie::SessionCookie;
use todo_service::inbound::http::create_router;
use todo_service::outbound::repositories::InMemoryAccountRepository;
use todo_service::outbound::repositories::InMemoryTodoRepository;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_PASSWORD: &str = "Secret123";

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub accounts: Arc<InMemoryAccountRepository>,
    pub jwt_handler: JwtHandler,
}

/// Registered and logged-in account
pub struct TestAccount {
    pub id: String,
    pub email: String,
    pub token: String,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with(OwnershipPolicy::Unenforced).await
    }

    pub async fn spawn_with(ownership: OwnershipPolicy) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let accounts = Arc::new(InMemoryAccountRepository::new());
        let todos = Arc::new(InMemoryTodoRepository::new());

        let authenticator = Arc::new(Authenticator::new(TEST_SECRET, 1));
        let session_cookie = Arc::new(SessionCookie::from_config(&CookieConfig::default()));

        let account_service = Arc::new(AccountService::new(
            Arc::clone(&accounts),
            Arc::clone(&authenticator),
        ));
        let todo_service = Arc::new(TodoService::new(todos, ownership));

        let router = create_router(account_service, todo_service, authenticator, session_cookie);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            accounts,
            jwt_handler: JwtHandler::new(TEST_SECRET),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.patch(self.url(path)).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path)).bearer_auth(token)
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/users/register")
            .json(&json!({
                "name": name,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/users/login")
            .json(&json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register an account and log it in
    pub async fn signed_in(&self, name: &str, email: &str) -> TestAccount {
        let response = self.register(name, email, TEST_PASSWORD).await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let body: Value = response.json().await.expect("Failed to parse response");
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let response = self.login(email, TEST_PASSWORD).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.expect("Failed to parse response");
        let token = body["data"]["token"].as_str().unwrap().to_string();

        TestAccount {
            id,
            email: email.to_lowercase(),
            token,
        }
    }

    pub async fn create_todo(&self, token: &str, body: Value) -> reqwest::Response {
        self.post_authenticated("/api/todo/add", token)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Sign a token as if it had been issued at `issued_at` and make it the
    /// account's active session.
    pub async fn install_token_issued_at(
        &self,
        account: &TestAccount,
        issued_at: DateTime<Utc>,
    ) -> String {
        let claims = Claims::issued_at(&account.id, &account.email, issued_at, 1);
        let token = self.jwt_handler.encode(&claims).unwrap();

        let account_id = AccountId::from_string(&account.id).unwrap();
        self.accounts
            .set_active_token(&account_id, &token)
            .await
            .unwrap();

        token
    }
}
