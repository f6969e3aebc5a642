use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::LoginSession;
use crate::domain::account::models::RegisterAccountCommand;
use crate::domain::account::models::UpdateAccountCommand;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Validated name, email and password
    ///
    /// # Returns
    /// Created account with no active session
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError>;

    /// Verify credentials and open a new session.
    ///
    /// The issued token replaces the account's previous one.
    ///
    /// # Arguments
    /// * `email` - Email as typed by the user (matched case-insensitively)
    /// * `password` - Plaintext password
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, email: &str, password: &str) -> Result<LoginSession, AccountError>;

    /// Retrieve every account.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError>;

    /// Retrieve account by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError>;

    /// Update the caller's own account.
    ///
    /// # Arguments
    /// * `id` - Account to update
    /// * `caller` - Authenticated account performing the update
    /// * `command` - Optional name, email and password
    ///
    /// # Errors
    /// * `Forbidden` - `id` is not the caller's account
    /// * `NotFound` - Account does not exist
    /// * `DuplicateEmail` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update_account(
        &self,
        id: &AccountId,
        caller: &AccountId,
        command: UpdateAccountCommand,
    ) -> Result<Account, AccountError>;

    /// Delete the caller's own account. Todos it owns are left in place.
    ///
    /// # Errors
    /// * `Forbidden` - `id` is not the caller's account
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_account(&self, id: &AccountId, caller: &AccountId)
        -> Result<(), AccountError>;
}

/// Persistence operations for account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist new account to storage.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve account by identifier.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by exact (already lowercased) email.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    /// Retrieve all accounts, oldest first.
    async fn list_all(&self) -> Result<Vec<Account>, AccountError>;

    /// Write name, email and password hash of an existing account.
    ///
    /// The stored session token is left untouched.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DuplicateEmail` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, account: Account) -> Result<Account, AccountError>;

    /// Replace the account's active session token.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn set_active_token(&self, id: &AccountId, token: &str) -> Result<(), AccountError>;

    /// Remove account from storage.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &AccountId) -> Result<(), AccountError>;
}
