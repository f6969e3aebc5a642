use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::LoginSession;
use crate::domain::account::models::RegisterAccountCommand;
use crate::domain::account::models::SelfServiceAction;
use crate::domain::account::models::UpdateAccountCommand;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AccountServicePort;

/// Domain service implementation for account operations.
///
/// Owns registration, login (session issuance) and self-service profile
/// management. Generic over the repository for testability.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn hash_password(&self, password: &str) -> Result<String, AccountError> {
        self.authenticator
            .hash_password(password)
            .map_err(|e| AccountError::Unknown(format!("Password hashing failed: {}", e)))
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError> {
        let password_hash = self.hash_password(command.password.expose())?;

        let account = Account {
            id: AccountId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            active_token: None,
            created_at: Utc::now(),
        };

        let created = self.repository.create(account).await?;
        tracing::info!(account_id = %created.id, "Account registered");

        Ok(created)
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginSession, AccountError> {
        let email = email.trim().to_lowercase();

        let mut account = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let session = self
            .authenticator
            .authenticate(
                password,
                &account.password_hash,
                &account.id.to_string(),
                account.email.as_str(),
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => AccountError::InvalidCredentials,
                AuthenticationError::PasswordError(err) => {
                    AccountError::Unknown(format!("Password verification failed: {}", err))
                }
                AuthenticationError::JwtError(err) => {
                    AccountError::Unknown(format!("Token generation failed: {}", err))
                }
            })?;

        self.repository
            .set_active_token(&account.id, &session.access_token)
            .await?;
        tracing::info!(account_id = %account.id, "Session issued");

        account.active_token = Some(session.access_token.clone());

        Ok(LoginSession {
            token: session.access_token,
            expires_in: session.expires_in,
            account,
        })
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError> {
        self.repository.list_all().await
    }

    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }

    async fn update_account(
        &self,
        id: &AccountId,
        caller: &AccountId,
        command: UpdateAccountCommand,
    ) -> Result<Account, AccountError> {
        id.authorize_self_service(caller, SelfServiceAction::Update)?;

        let mut account = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))?;

        if let Some(name) = command.name {
            account.name = name;
        }

        if let Some(email) = command.email {
            account.email = email;
        }

        if let Some(password) = command.password {
            account.password_hash = self.hash_password(password.expose())?;
        }

        self.repository.update(account).await
    }

    async fn delete_account(
        &self,
        id: &AccountId,
        caller: &AccountId,
    ) -> Result<(), AccountError> {
        id.authorize_self_service(caller, SelfServiceAction::Delete)?;

        self.repository.delete(id).await?;
        tracing::info!(account_id = %id, "Account deleted");

        Ok(())
    }
}
