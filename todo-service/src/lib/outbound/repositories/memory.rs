//! Process-local stores used when `database.backend = "memory"` and by the
//! integration tests. Contents are lost on restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::ports::AccountRepository;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::ports::TodoRepository;

#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_taken(accounts: &HashMap<AccountId, Account>, account: &Account) -> bool {
    accounts
        .values()
        .any(|existing| existing.id != account.id && existing.email == account.email)
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.write().await;

        if email_taken(&accounts, &account) {
            return Err(AccountError::DuplicateEmail(
                account.email.as_str().to_string(),
            ));
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        Ok(self.accounts.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|account| account.email.as_str() == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Account>, AccountError> {
        let mut accounts: Vec<Account> = self.accounts.read().await.values().cloned().collect();
        accounts.sort_by_key(|account| account.created_at);
        Ok(accounts)
    }

    async fn update(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.write().await;

        if email_taken(&accounts, &account) {
            return Err(AccountError::DuplicateEmail(
                account.email.as_str().to_string(),
            ));
        }

        let stored = accounts
            .get_mut(&account.id)
            .ok_or_else(|| AccountError::NotFound(account.id.to_string()))?;

        stored.name = account.name;
        stored.email = account.email;
        stored.password_hash = account.password_hash;

        Ok(stored.clone())
    }

    async fn set_active_token(&self, id: &AccountId, token: &str) -> Result<(), AccountError> {
        let mut accounts = self.accounts.write().await;

        let stored = accounts
            .get_mut(id)
            .ok_or_else(|| AccountError::NotFound(id.to_string()))?;
        stored.active_token = Some(token.to_string());

        Ok(())
    }

    async fn delete(&self, id: &AccountId) -> Result<(), AccountError> {
        self.accounts
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AccountError::NotFound(id.to_string()))
    }
}

#[derive(Default)]
pub struct InMemoryTodoRepository {
    todos: RwLock<HashMap<TodoId, Todo>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn create(&self, todo: Todo) -> Result<Todo, TodoError> {
        self.todos.write().await.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, TodoError> {
        Ok(self.todos.read().await.get(id).cloned())
    }

    async fn find_by_owner(&self, owner: &AccountId) -> Result<Vec<Todo>, TodoError> {
        let mut todos: Vec<Todo> = self
            .todos
            .read()
            .await
            .values()
            .filter(|todo| todo.is_owned_by(owner))
            .cloned()
            .collect();
        todos.sort_by_key(|todo| todo.created_at);
        Ok(todos)
    }

    async fn update(&self, todo: Todo) -> Result<Todo, TodoError> {
        let mut todos = self.todos.write().await;

        let stored = todos
            .get_mut(&todo.id)
            .ok_or_else(|| TodoError::NotFound(todo.id.to_string()))?;

        stored.title = todo.title;
        stored.description = todo.description;
        stored.status = todo.status;

        Ok(stored.clone())
    }

    async fn delete(&self, id: &TodoId) -> Result<(), TodoError> {
        self.todos
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| TodoError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::account::models::AccountName;
    use crate::domain::account::models::EmailAddress;

    fn account(email: &str) -> Account {
        Account {
            id: AccountId::new(),
            name: AccountName::new("Alice Smith".to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            active_token: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let repository = InMemoryAccountRepository::new();

        repository.create(account("alice@example.com")).await.unwrap();
        let result = repository.create(account("ALICE@example.com")).await;

        assert!(matches!(result, Err(AccountError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_active_token() {
        let repository = InMemoryAccountRepository::new();
        let mut stored = repository.create(account("alice@example.com")).await.unwrap();

        repository
            .set_active_token(&stored.id, "token-1")
            .await
            .unwrap();

        stored.name = AccountName::new("Alice Jones".to_string()).unwrap();
        let updated = repository.update(stored).await.unwrap();

        assert_eq!(updated.name.as_str(), "Alice Jones");
        assert_eq!(updated.active_token.as_deref(), Some("token-1"));
    }

    #[tokio::test]
    async fn test_delete_missing_account() {
        let repository = InMemoryAccountRepository::new();

        let result = repository.delete(&AccountId::new()).await;
        assert!(matches!(result, Err(AccountError::NotFound(_))));
    }
}
